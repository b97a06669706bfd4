use std::path::PathBuf;

/// Raised by content checks. Surfaced inline, never blocks encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputValidationError {
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Invalid phone number format")]
    InvalidPhone,
    #[error("Network name (SSID) is required")]
    MissingSsid,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Logo file size must be under 500KB (got {size} bytes)")]
pub struct LogoTooLarge {
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color value: {0:?}")]
pub struct ColorParseError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum FontLoadError {
    #[error("Invalid font format (only TTF/OTF supported): {0}")]
    InvalidFormat(String),
    #[error("Font data could not be parsed: {0}")]
    Unparsable(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("QR code generation error: {0}")]
    Symbol(#[from] qrcode::types::QrError),
    #[error("Module buffer of {len} entries is not a {width}x{width} matrix")]
    Malformed { width: usize, len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("Capture failed: {0}")]
    Capture(String),
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("Could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum DataUriError {
    #[error("Not a data URI")]
    NotDataUri,
    #[error("Only base64 data URIs are supported")]
    NotBase64,
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}
