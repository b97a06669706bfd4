//! Text metrics used by layout.
//!
//! When the caption face is loaded, captions are measured with its real
//! advances and vertical metrics, so layout matches what the rasterizer
//! draws. Without a face, fixed per-em proportions stand in.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont};

use crate::models::frame::FontWeight;

pub const LINE_HEIGHT_EM: f32 = 1.4;
pub const ASCENT_EM: f32 = 0.8;
pub const DESCENT_EM: f32 = 0.2;
const SPACE_EM: f32 = 0.28;

fn advance_em(weight: FontWeight) -> f32 {
    match weight {
        FontWeight::Regular => 0.55,
        FontWeight::Medium => 0.57,
        FontWeight::SemiBold => 0.59,
        FontWeight::Bold => 0.61,
    }
}

/// Width of `text` in pixels at `scale`, with kerning.
pub fn measure_text_width(font: &FontArc, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

#[derive(Clone, Copy)]
pub struct TextMetrics<'a> {
    pub font_size: f32,
    pub weight: FontWeight,
    face: Option<&'a FontArc>,
}

impl<'a> TextMetrics<'a> {
    /// Estimated metrics, independent of any font file.
    pub fn new(font_size: u32, weight: FontWeight) -> Self {
        Self {
            font_size: font_size as f32,
            weight,
            face: None,
        }
    }

    /// Measure with `face` when one is available.
    pub fn with_face(mut self, face: Option<&'a FontArc>) -> Self {
        self.face = face;
        self
    }

    pub fn has_face(&self) -> bool {
        self.face.is_some()
    }

    fn scale(&self) -> PxScale {
        PxScale::from(self.font_size)
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT_EM
    }

    pub fn ascent(&self) -> f32 {
        match self.face {
            Some(font) => font.as_scaled(self.scale()).ascent(),
            None => self.font_size * ASCENT_EM,
        }
    }

    /// Distance below the baseline, as a positive number.
    pub fn descent(&self) -> f32 {
        match self.face {
            Some(font) => -font.as_scaled(self.scale()).descent(),
            None => self.font_size * DESCENT_EM,
        }
    }

    pub fn width(&self, text: &str) -> f32 {
        match self.face {
            Some(font) => measure_text_width(font, self.scale(), text),
            None => {
                let em = advance_em(self.weight);
                text.chars()
                    .map(|c| if c.is_whitespace() { SPACE_EM } else { em })
                    .sum::<f32>()
                    * self.font_size
            }
        }
    }

    /// Wrap text to `max_width`, keeping explicit line breaks. Words wider
    /// than the limit are broken per character.
    pub fn wrap(&self, text: &str, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, max_width, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, text: &str, max_width: f32, lines: &mut Vec<String>) {
        let mut current = String::new();

        for word in text.split_inclusive(char::is_whitespace) {
            let candidate = format!("{}{}", current, word);
            if self.width(candidate.trim_end()) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
                current.clear();
                if self.width(word.trim_end()) <= max_width {
                    current.push_str(word);
                    continue;
                }
            }

            for ch in word.chars() {
                let next = format!("{}{}", current, ch);
                if !current.is_empty() && self.width(next.trim_end()) > max_width {
                    lines.push(std::mem::take(&mut current).trim_end().to_string());
                }
                current.push(ch);
            }
        }

        lines.push(current.trim_end().to_string());
    }
}
