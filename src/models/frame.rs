use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::color::Color;

pub const DEFAULT_CAPTION: &str = "Scan Me!";
pub const DEFAULT_FONT: &str = "'Roboto', sans-serif";
pub const DEFAULT_GRADIENT_ANGLE: f32 = 120.0;

/// Font families offered by the design form: (display name, CSS value).
pub const FONT_CHOICES: &[(&str, &str)] = &[
    ("Roboto", "'Roboto', sans-serif"),
    ("Open Sans", "'Open Sans', sans-serif"),
    ("Montserrat", "'Montserrat', sans-serif"),
    ("Lato", "'Lato', sans-serif"),
    ("Playfair Display", "'Playfair Display', serif"),
    ("Poppins", "'Poppins', sans-serif"),
    ("Source Sans Pro", "'Source Sans Pro', sans-serif"),
    ("Ubuntu", "'Ubuntu', sans-serif"),
    ("Dancing Script", "'Dancing Script', cursive"),
    ("Pacifico", "'Pacifico', cursive"),
];

pub const CAPTION_SUGGESTIONS: &[&str] = &["Scan Me", "Learn More", "Connect", "Get Started"];

/// Direction presets for the gradient frame: (angle, label).
pub const GRADIENT_PRESETS: &[(f32, &str)] = &[
    (120.0, "Diagonal"),
    (90.0, "Horizontal"),
    (180.0, "Vertical"),
    (45.0, "Reverse Diagonal"),
];

/// Frame treatment. Values outside the known set deserialize to `Flat`,
/// the plain background + corner radius treatment.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum FrameStyle {
    #[default]
    Modern,
    Classic,
    Minimal,
    Fancy,
    Rounded,
    Shadow,
    Gradient,
    Custom,
    Flat,
}

impl FrameStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameStyle::Modern => "modern",
            FrameStyle::Classic => "classic",
            FrameStyle::Minimal => "minimal",
            FrameStyle::Fancy => "fancy",
            FrameStyle::Rounded => "rounded",
            FrameStyle::Shadow => "shadow",
            FrameStyle::Gradient => "gradient",
            FrameStyle::Custom => "custom",
            FrameStyle::Flat => "flat",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FrameStyle::Modern => "Clean and minimal",
            FrameStyle::Classic => "Traditional look",
            FrameStyle::Minimal => "Thin outline",
            FrameStyle::Fancy => "Warm accent border",
            FrameStyle::Rounded => "Soft corners",
            FrameStyle::Shadow => "Elevated look",
            FrameStyle::Gradient => "Smooth blend",
            FrameStyle::Custom => "Your style",
            FrameStyle::Flat => "Plain background",
        }
    }

    /// Whether `custom_options` affect this style.
    pub fn uses_custom_options(&self) -> bool {
        matches!(self, FrameStyle::Custom | FrameStyle::Gradient)
    }
}

impl From<String> for FrameStyle {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "modern" => FrameStyle::Modern,
            "classic" => FrameStyle::Classic,
            "minimal" => FrameStyle::Minimal,
            "fancy" => FrameStyle::Fancy,
            "rounded" => FrameStyle::Rounded,
            "shadow" => FrameStyle::Shadow,
            "gradient" => FrameStyle::Gradient,
            "custom" => FrameStyle::Custom,
            other => {
                log::debug!("Unknown frame style {:?}, using flat treatment", other);
                FrameStyle::Flat
            }
        }
    }
}

impl From<FrameStyle> for String {
    fn from(style: FrameStyle) -> Self {
        style.as_str().to_string()
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextPosition {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl TextPosition {
    /// Top/bottom stack vertically, left/right horizontally.
    pub fn is_lateral(&self) -> bool {
        matches!(self, TextPosition::Left | TextPosition::Right)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// SVG `text-anchor` value.
    pub fn anchor(&self) -> &'static str {
        match self {
            TextAlign::Left => "start",
            TextAlign::Center => "middle",
            TextAlign::Right => "end",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(try_from = "u16", into = "u16")]
pub enum FontWeight {
    Regular,
    #[default]
    Medium,
    SemiBold,
    Bold,
}

impl FontWeight {
    pub fn value(&self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::SemiBold => 600,
            FontWeight::Bold => 700,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::SemiBold => "Semi Bold",
            FontWeight::Bold => "Bold",
        }
    }

    pub fn all() -> Vec<FontWeight> {
        vec![
            FontWeight::Regular,
            FontWeight::Medium,
            FontWeight::SemiBold,
            FontWeight::Bold,
        ]
    }
}

impl TryFrom<u16> for FontWeight {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            400 => Ok(FontWeight::Regular),
            500 => Ok(FontWeight::Medium),
            600 => Ok(FontWeight::SemiBold),
            700 => Ok(FontWeight::Bold),
            other => Err(format!("unsupported font weight {}", other)),
        }
    }
}

impl From<FontWeight> for u16 {
    fn from(weight: FontWeight) -> Self {
        weight.value()
    }
}

/// Gradient direction in CSS degrees (0 points up, 90 points right).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "String", into = "String")]
pub struct GradientAngle(pub f32);

impl Default for GradientAngle {
    fn default() -> Self {
        GradientAngle(DEFAULT_GRADIENT_ANGLE)
    }
}

impl FromStr for GradientAngle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("deg").unwrap_or(trimmed).trim();
        number
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .map(GradientAngle)
            .ok_or_else(|| format!("invalid gradient direction {:?}", s))
    }
}

impl TryFrom<String> for GradientAngle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GradientAngle> for String {
    fn from(angle: GradientAngle) -> Self {
        angle.to_string()
    }
}

impl fmt::Display for GradientAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct CustomOptions {
    /// `data:` URI of an uploaded background image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_start: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_end: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_direction: Option<GradientAngle>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    pub frame_style: FrameStyle,
    pub caption_text: String,
    pub font: String,
    pub text_color: Color,
    pub text_position: TextPosition,
    pub container_background: Color,
    pub corner_radius: u32,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_options: Option<CustomOptions>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_style: FrameStyle::Modern,
            caption_text: DEFAULT_CAPTION.to_string(),
            font: DEFAULT_FONT.to_string(),
            text_color: Color::BLACK,
            text_position: TextPosition::Bottom,
            container_background: Color::WHITE,
            corner_radius: 10,
            font_size: 14,
            font_weight: FontWeight::Medium,
            text_align: TextAlign::Center,
            custom_options: None,
        }
    }
}

impl FrameConfig {
    pub fn has_caption(&self) -> bool {
        !self.caption_text.is_empty()
    }

    /// Custom options, only when the current style reads them.
    pub fn active_custom_options(&self) -> Option<&CustomOptions> {
        if self.frame_style.uses_custom_options() {
            self.custom_options.as_ref()
        } else {
            None
        }
    }
}
