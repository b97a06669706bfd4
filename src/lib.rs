//! QR code styling studio: a configurable frame, caption and symbol style
//! rendered into a scene, exported as PNG, JPEG or SVG.

pub mod compositor;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod state;
pub mod structs;
pub mod utils;
