pub mod color;
pub mod content;
pub mod controls;
pub mod frame;
pub mod studio;
pub mod style;
