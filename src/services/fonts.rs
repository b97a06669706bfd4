//! Session-scoped font registry.
//!
//! Uploaded TTF/OTF files are parsed once and kept for the lifetime of the
//! registry, which the session owns. Captions name fonts with a CSS family
//! list; the registry resolves the first registered family in that list.

use ab_glyph::FontArc;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use crate::error::FontLoadError;

pub const CUSTOM_FONT_PREFIX: &str = "custom-font-";
const VALID_EXTENSIONS: &[&str] = &["ttf", "otf"];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Names a registered font. Valid for as long as the registry that issued
/// it keeps the family.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontHandle {
    family: String,
    fingerprint: String,
}

impl FontHandle {
    /// CSS family name to put in `FrameConfig::font`.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

struct RegisteredFont {
    font: FontArc,
    fingerprint: String,
}

#[derive(Default)]
pub struct FontRegistry {
    fonts: HashMap<String, RegisteredFont>,
    fallback: Option<FontArc>,
}

/// `custom-font-<stem>` with whitespace runs replaced by `-`.
pub fn family_for_file(file_name: &str) -> String {
    let stem = match file_name.rfind('.') {
        Some(idx) if idx > 0 => &file_name[..idx],
        _ => file_name,
    };
    format!("{}{}", CUSTOM_FONT_PREFIX, WHITESPACE.replace_all(stem, "-"))
}

fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

fn parse_font(bytes: Vec<u8>) -> Result<FontArc, FontLoadError> {
    FontArc::try_from_vec(bytes).map_err(|e| FontLoadError::Unparsable(e.to_string()))
}

/// Family names from a CSS `font-family` list, quotes stripped.
pub fn css_families(list: &str) -> Vec<String> {
    list.split(',')
        .map(|f| f.trim().trim_matches(|c| c == '\'' || c == '"').trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an uploaded font file. Re-registering identical bytes under
    /// the same name returns the existing handle.
    pub fn register(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<FontHandle, FontLoadError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        if !VALID_EXTENSIONS.contains(&ext.as_str()) {
            return Err(FontLoadError::InvalidFormat(file_name.to_string()));
        }

        let family = family_for_file(file_name);
        let fingerprint = fingerprint(&bytes);
        if let Some(existing) = self.fonts.get(&family) {
            if existing.fingerprint == fingerprint {
                log::debug!("Font {} already registered", family);
                return Ok(FontHandle {
                    family,
                    fingerprint,
                });
            }
        }

        let font = parse_font(bytes)?;
        self.fonts.insert(
            family.clone(),
            RegisteredFont {
                font,
                fingerprint: fingerprint.clone(),
            },
        );
        log::info!("Registered custom font {}", family);
        Ok(FontHandle {
            family,
            fingerprint,
        })
    }

    /// Register a font under an explicit family name, e.g. a bundled face
    /// standing in for one of the catalogue fonts.
    pub fn register_family(&mut self, family: &str, bytes: Vec<u8>) -> Result<FontHandle, FontLoadError> {
        let fingerprint = fingerprint(&bytes);
        let font = parse_font(bytes)?;
        self.fonts.insert(
            family.to_string(),
            RegisteredFont {
                font,
                fingerprint: fingerprint.clone(),
            },
        );
        Ok(FontHandle {
            family: family.to_string(),
            fingerprint,
        })
    }

    /// Font used when no family in a caption's list is registered.
    pub fn set_fallback(&mut self, bytes: Vec<u8>) -> Result<(), FontLoadError> {
        self.fallback = Some(parse_font(bytes)?);
        Ok(())
    }

    pub fn load_fallback_file(&mut self, path: &Path) -> Result<(), FontLoadError> {
        let bytes = std::fs::read(path)?;
        self.set_fallback(bytes)?;
        log::info!("Loaded fallback font from {}", path.display());
        Ok(())
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn unregister(&mut self, handle: &FontHandle) -> bool {
        match self.fonts.get(&handle.family) {
            Some(font) if font.fingerprint == handle.fingerprint => {
                self.fonts.remove(&handle.family);
                true
            }
            _ => false,
        }
    }

    pub fn contains(&self, family: &str) -> bool {
        self.fonts.contains_key(family)
    }

    pub fn families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fonts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// First registered family of a CSS family list, else the fallback.
    pub fn resolve(&self, font_list: &str) -> Option<&FontArc> {
        css_families(font_list)
            .iter()
            .find_map(|family| self.fonts.get(family).map(|f| &f.font))
            .or(self.fallback.as_ref())
    }
}
