pub mod encoder;
pub mod fonts;
