use serde::{Deserialize, Serialize};

use crate::error::LogoTooLarge;
use crate::models::content::ContentConfig;
use crate::models::frame::FrameConfig;
use crate::models::style::StyleConfig;
use crate::utils::data_uri;

pub const DEFAULT_SIZE: u32 = 256;
pub const MAX_LOGO_BYTES: usize = 500_000;

/// QR redundancy tier, lowest to highest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    #[default]
    H,
}

impl ErrorCorrection {
    pub const MAX: ErrorCorrection = ErrorCorrection::H;

    pub fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            ErrorCorrection::L => qrcode::EcLevel::L,
            ErrorCorrection::M => qrcode::EcLevel::M,
            ErrorCorrection::Q => qrcode::EcLevel::Q,
            ErrorCorrection::H => qrcode::EcLevel::H,
        }
    }
}

/// An uploaded logo, held as a `data:` URI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Logo {
    pub data_uri: String,
}

impl Logo {
    /// Uploads above 500KB are rejected.
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Result<Self, LogoTooLarge> {
        if bytes.len() > MAX_LOGO_BYTES {
            return Err(LogoTooLarge { size: bytes.len() });
        }
        Ok(Self {
            data_uri: data_uri::encode(mime, bytes),
        })
    }
}

/// Everything that determines one rendered artifact.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct StudioConfig {
    pub content: ContentConfig,
    pub style: StyleConfig,
    pub frame: FrameConfig,
    pub error_correction: ErrorCorrection,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            style: StyleConfig::default(),
            frame: FrameConfig::default(),
            error_correction: ErrorCorrection::default(),
            size: DEFAULT_SIZE,
            logo: None,
        }
    }
}

impl StudioConfig {
    /// Restores the styling to its defaults. Content is kept.
    pub fn reset(&mut self) {
        self.style = StyleConfig::default();
        self.frame = FrameConfig::default();
        self.logo = None;
    }
}
