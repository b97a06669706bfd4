use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::DataUriError;

/// Build a base64 `data:` URI.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Decode a base64 `data:` URI into its mime type and bytes.
pub fn decode(uri: &str) -> Result<(String, Vec<u8>), DataUriError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(DataUriError::NotDataUri)?;
    let (meta, payload) = rest.split_once(',').ok_or(DataUriError::NotDataUri)?;
    let mime = meta.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}
