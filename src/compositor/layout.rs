//! Frame layout: where the QR symbol and the caption go.
//!
//! This is the single source of geometry for both the live scene and the
//! exported documents.

use ab_glyph::FontArc;

use crate::compositor::geometry::Rect;
use crate::compositor::metrics::TextMetrics;
use crate::models::frame::{FrameConfig, TextAlign, TextPosition};

/// Padding between the container edge and the QR symbol.
pub const QR_PADDING: f32 = 40.0;
/// Padding between the container edge and a caption column.
pub const TEXT_PADDING: f32 = 20.0;
/// Space between the QR symbol and a lateral caption.
pub const LATERAL_GAP: f32 = 20.0;
/// Caption width limit for left/right captions.
pub const LATERAL_CAPTION_MAX: f32 = 120.0;
/// Baseline of the first line of a top caption.
const TOP_BASELINE_SMALL: f32 = 25.0;
const TOP_BASELINE_LARGE: f32 = 30.0;
const SMALL_FONT_LIMIT: u32 = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct CaptionLayout {
    pub lines: Vec<String>,
    /// Baseline y of each line.
    pub baselines: Vec<f32>,
    /// Horizontal anchor; how lines hang off it depends on `align`.
    pub anchor_x: f32,
    pub align: TextAlign,
    /// Column the caption may occupy.
    pub column: Rect,
    /// Box covering all lines from first ascent to last descent.
    pub bounds: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub width: f32,
    pub height: f32,
    pub qr: Rect,
    pub caption: Option<CaptionLayout>,
}

impl FrameLayout {
    pub fn container(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

fn anchor_for(column: &Rect, align: TextAlign) -> f32 {
    match align {
        TextAlign::Left => column.x,
        TextAlign::Center => column.x + column.w / 2.0,
        TextAlign::Right => column.right(),
    }
}

fn caption(
    lines: Vec<String>,
    first_baseline: f32,
    column: Rect,
    metrics: &TextMetrics<'_>,
    align: TextAlign,
) -> CaptionLayout {
    let lh = metrics.line_height();
    let baselines: Vec<f32> = (0..lines.len()).map(|i| first_baseline + lh * i as f32).collect();
    let top = first_baseline - metrics.ascent();
    let bottom = baselines.last().copied().unwrap_or(first_baseline) + metrics.descent();
    CaptionLayout {
        anchor_x: anchor_for(&column, align),
        bounds: Rect::new(column.x, top, column.w, bottom - top),
        lines,
        baselines,
        align,
        column,
    }
}

/// Lay out a frame around a QR symbol of `size` by `size` units. Captions
/// are measured with `face`, the font the caption will be drawn with, or
/// with estimated metrics when there is none.
pub fn layout(frame: &FrameConfig, size: u32, face: Option<&FontArc>) -> FrameLayout {
    let s = size as f32;
    let metrics = TextMetrics::new(frame.font_size, frame.font_weight).with_face(face);

    if !frame.has_caption() {
        return FrameLayout {
            width: s + 2.0 * QR_PADDING,
            height: s + 2.0 * QR_PADDING,
            qr: Rect::new(QR_PADDING, QR_PADDING, s, s),
            caption: None,
        };
    }

    let lh = metrics.line_height();
    match frame.text_position {
        TextPosition::Top | TextPosition::Bottom => {
            let lines = metrics.wrap(&frame.caption_text, s);
            let extra = lh * (lines.len().saturating_sub(1)) as f32;
            let width = s + 2.0 * QR_PADDING;
            let height = s + 2.0 * QR_PADDING + extra;
            let column = Rect::new(TEXT_PADDING, 0.0, width - 2.0 * TEXT_PADDING, height);

            let (qr, first_baseline) = if frame.text_position == TextPosition::Bottom {
                // QR hugs the top; caption sits in the larger bottom band.
                (Rect::new(QR_PADDING, TEXT_PADDING, s, s), s + 3.0 * TEXT_PADDING)
            } else {
                let baseline = if frame.font_size <= SMALL_FONT_LIMIT {
                    TOP_BASELINE_SMALL
                } else {
                    TOP_BASELINE_LARGE
                };
                (Rect::new(QR_PADDING, QR_PADDING + extra, s, s), baseline)
            };

            FrameLayout {
                width,
                height,
                qr,
                caption: Some(caption(lines, first_baseline, column, &metrics, frame.text_align)),
            }
        }
        TextPosition::Left | TextPosition::Right => {
            let lines = metrics.wrap(&frame.caption_text, LATERAL_CAPTION_MAX);
            let column_w = lines
                .iter()
                .map(|l| metrics.width(l))
                .fold(1.0f32, f32::max)
                .min(LATERAL_CAPTION_MAX);
            // Lines are centred on the symbol's middle; a single line sits
            // exactly on it.
            let spread = lh * (lines.len().saturating_sub(1)) as f32;
            let block_h = spread + 2.0 * metrics.ascent().max(metrics.descent());
            let content_h = s.max(block_h);
            let height = content_h + 2.0 * QR_PADDING;
            let middle = QR_PADDING + content_h / 2.0;
            let width = s + QR_PADDING + LATERAL_GAP + column_w + TEXT_PADDING;

            let (qr_x, column_x) = if frame.text_position == TextPosition::Right {
                (QR_PADDING, QR_PADDING + s + LATERAL_GAP)
            } else {
                (TEXT_PADDING + column_w + LATERAL_GAP, TEXT_PADDING)
            };
            let qr = Rect::new(qr_x, middle - s / 2.0, s, s);
            let column = Rect::new(column_x, QR_PADDING, column_w, content_h);
            let first_baseline = middle - spread / 2.0;

            FrameLayout {
                width,
                height,
                qr,
                caption: Some(caption(lines, first_baseline, column, &metrics, frame.text_align)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::FontWeight;

    fn frame(position: TextPosition, align: TextAlign) -> FrameConfig {
        FrameConfig {
            text_position: position,
            text_align: align,
            ..FrameConfig::default()
        }
    }

    #[test]
    fn bottom_caption_matches_document_offsets() {
        let size = 256.0;
        for (align, x) in [
            (TextAlign::Left, 20.0),
            (TextAlign::Center, size / 2.0 + 40.0),
            (TextAlign::Right, size + 60.0),
        ] {
            let l = layout(&frame(TextPosition::Bottom, align), 256, None);
            let c = l.caption.unwrap();
            assert_eq!(c.anchor_x, x);
            assert_eq!(c.baselines[0], size + 60.0);
            assert_eq!(l.qr, Rect::new(40.0, 20.0, size, size));
            assert_eq!((l.width, l.height), (size + 80.0, size + 80.0));
        }
    }

    #[test]
    fn top_caption_baseline_depends_on_font_size() {
        let mut f = frame(TextPosition::Top, TextAlign::Center);
        assert_eq!(layout(&f, 256, None).caption.unwrap().baselines[0], 25.0);
        f.font_size = 24;
        let l = layout(&f, 256, None);
        assert_eq!(l.caption.unwrap().baselines[0], 30.0);
        assert_eq!(l.qr.y, 40.0);
    }

    #[test]
    fn lateral_caption_centers_on_symbol() {
        let l = layout(&frame(TextPosition::Right, TextAlign::Left), 256, None);
        let c = l.caption.unwrap();
        assert_eq!(c.column.x, 256.0 + 60.0);
        assert!(c.column.w <= LATERAL_CAPTION_MAX);
        assert_eq!(c.baselines, vec![256.0 / 2.0 + 40.0]);
        assert_eq!(l.qr.center().1, 256.0 / 2.0 + 40.0);
    }

    #[test]
    fn multi_line_lateral_caption_straddles_the_middle() {
        let mut f = frame(TextPosition::Left, TextAlign::Left);
        f.caption_text = "one\ntwo\nthree".into();
        let l = layout(&f, 256, None);
        let c = l.caption.unwrap();
        assert_eq!(c.baselines.len(), 3);
        assert!((c.baselines[1] - 168.0).abs() < 1e-3);
        assert!(c.bounds.y >= QR_PADDING);
    }

    #[test]
    fn lateral_caption_width_is_capped() {
        let mut f = frame(TextPosition::Left, TextAlign::Center);
        f.caption_text = "A considerably longer caption that needs wrapping".into();
        f.font_size = 20;
        let l = layout(&f, 200, None);
        let c = l.caption.unwrap();
        assert!(c.lines.len() > 1);
        assert!(c.column.w <= LATERAL_CAPTION_MAX);
        assert!(c.column.right() + LATERAL_GAP <= l.qr.x + 0.001);
    }

    #[test]
    fn caption_never_overlaps_symbol() {
        let captions = ["Scan Me!", "", "Two\nLines", &"word ".repeat(40)];
        for position in [TextPosition::Top, TextPosition::Bottom, TextPosition::Left, TextPosition::Right] {
            for text in captions {
                for font_size in [12, 14, 16, 17, 24, 32] {
                    for weight in FontWeight::all() {
                        let f = FrameConfig {
                            text_position: position,
                            caption_text: text.to_string(),
                            font_size,
                            font_weight: weight,
                            ..FrameConfig::default()
                        };
                        for size in [128, 256, 512] {
                            let l = layout(&f, size, None);
                            assert!(l.container().contains_rect(&l.qr));
                            if let Some(c) = &l.caption {
                                assert!(
                                    !c.bounds.intersects(&l.qr),
                                    "{:?} {:?} {} overlaps",
                                    position,
                                    text,
                                    font_size
                                );
                                assert!(l.container().contains_rect(&c.bounds));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn empty_caption_omits_block() {
        let mut f = FrameConfig::default();
        f.caption_text.clear();
        let l = layout(&f, 256, None);
        assert!(l.caption.is_none());
        assert_eq!(l.qr, Rect::new(40.0, 40.0, 256.0, 256.0));
    }
}
