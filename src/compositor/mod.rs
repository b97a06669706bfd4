//! Frame compositor: turns an encoded symbol and a configuration into a
//! scene that both exporters consume.

pub mod geometry;
pub mod layout;
pub mod metrics;
pub mod paint;
pub mod scene;
pub mod treatment;

pub use layout::{FrameLayout, layout};
pub use scene::{Caption, Node, QrGroup, Scene, compose};
