use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Text,
    Url,
    Contact,
    Wifi,
}

impl ContentKind {
    pub fn placeholder(&self) -> &'static str {
        match self {
            ContentKind::Text => "Enter any text, message, or information you want to encode...",
            ContentKind::Url => "Enter a website URL (e.g., https://www.example.com)",
            ContentKind::Contact => "Name:\nPhone:\nEmail:\nAddress:",
            ContentKind::Wifi => "Network Name (SSID):\nPassword:\nSecurity: WPA/WPA2",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ContentKind::Text => {
                "Create a QR code for any text content like messages, notes, or identifiers."
            }
            ContentKind::Url => "Generate a QR code that opens a specific website when scanned.",
            ContentKind::Contact => {
                "Create a QR code that saves contact information directly to phones."
            }
            ContentKind::Wifi => "Generate a QR code that connects devices to your WiFi network.",
        }
    }

    pub fn all() -> Vec<ContentKind> {
        vec![
            ContentKind::Text,
            ContentKind::Url,
            ContentKind::Contact,
            ContentKind::Wifi,
        ]
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Text => write!(f, "Text"),
            ContentKind::Url => write!(f, "Url"),
            ContentKind::Contact => write!(f, "Contact"),
            ContentKind::Wifi => write!(f, "Wifi"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ContentConfig {
    pub payload: String,
    pub content_kind: ContentKind,
}

impl ContentConfig {
    pub fn new(payload: impl Into<String>, content_kind: ContentKind) -> Self {
        Self {
            payload: payload.into(),
            content_kind,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
