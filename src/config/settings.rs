use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::export::raster::PIXEL_DENSITY;

const DEFAULT_OUTPUT_DIR: &str = "generated";

/// Faces tried when no default font is configured.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub default_font: Option<PathBuf>,
    pub pixel_density: u32,
}

impl Settings {
    /// Read settings from the environment. Call `dotenv()` first to pick up
    /// a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let output_dir = lookup("QRFRAME_OUTPUT_DIR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());
        let default_font = lookup("QRFRAME_DEFAULT_FONT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let pixel_density = match lookup("QRFRAME_PIXEL_DENSITY") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("QRFRAME_PIXEL_DENSITY must be a positive integer, got {:?}", raw))?,
            None => PIXEL_DENSITY,
        };
        anyhow::ensure!(pixel_density > 0, "QRFRAME_PIXEL_DENSITY must be at least 1");

        Ok(Self {
            output_dir: PathBuf::from(output_dir),
            default_font,
            pixel_density,
        })
    }

    /// The configured font, or the first system font found.
    pub fn fallback_font(&self) -> Option<PathBuf> {
        self.default_font.clone().or_else(|| {
            SYSTEM_FONT_CANDIDATES
                .iter()
                .map(Path::new)
                .find(|p| p.is_file())
                .map(Path::to_path_buf)
        })
    }
}
