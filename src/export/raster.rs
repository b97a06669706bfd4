//! Rasterizes a scene into an RGBA bitmap.

use ab_glyph::{Font, GlyphId, PxScale, ScaleFont};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::io::Cursor;

use crate::compositor::geometry::{Rect, Shape};
use crate::compositor::metrics::measure_text_width;
use crate::compositor::paint::{LinearGradient, Paint};
use crate::compositor::scene::{Caption, Node, Scene};
use crate::error::ExportError;
use crate::models::color::Color;
use crate::models::frame::TextAlign;
use crate::services::fonts::FontRegistry;
use crate::utils::data_uri;

pub const PIXEL_DENSITY: u32 = 3;
pub const RASTER_QUALITY: f32 = 1.0;
/// Largest bitmap `capture` will allocate, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 40_000_000;

enum Source<'a> {
    Solid(Color),
    Linear(&'a LinearGradient, Rect),
    Bitmap { image: RgbaImage, x0: i64, y0: i64 },
}

/// Device-pixel box covering a scene rect.
fn device_box(rect: &Rect, density: f32) -> (i64, i64, u32, u32) {
    let x0 = (rect.x * density).floor() as i64;
    let y0 = (rect.y * density).floor() as i64;
    let x1 = (rect.right() * density).ceil() as i64;
    let y1 = (rect.bottom() * density).ceil() as i64;
    (x0, y0, (x1 - x0).max(1) as u32, (y1 - y0).max(1) as u32)
}

fn decode_image(uri: &str) -> Result<DynamicImage, ExportError> {
    let (_, bytes) = data_uri::decode(uri).map_err(|e| ExportError::Capture(e.to_string()))?;
    Ok(image::load_from_memory(&bytes)?)
}

/// Source-over blend of `color` at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let sa = color.opacity() * coverage;
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let mix = |s: u8, d: u8| {
        ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };
    *dst = Rgba([
        mix(color.r, dst[0]),
        mix(color.g, dst[1]),
        mix(color.b, dst[2]),
        (out_a * 255.0).round() as u8,
    ]);
}

/// Paints scenes at a fixed pixel density using the session fonts.
pub struct Rasterizer<'a> {
    fonts: &'a FontRegistry,
    pixel_density: u32,
}

impl<'a> Rasterizer<'a> {
    pub fn new(fonts: &'a FontRegistry, pixel_density: u32) -> Self {
        Self {
            fonts,
            pixel_density: pixel_density.max(1),
        }
    }

    fn density(&self) -> f32 {
        self.pixel_density as f32
    }

    pub fn capture(&self, scene: &Scene) -> Result<RgbaImage, ExportError> {
        let d = self.density();
        let width = (scene.width * d).ceil() as u32;
        let height = (scene.height * d).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(ExportError::Capture("scene has no area".to_string()));
        }
        if width as u64 * height as u64 > MAX_CANVAS_PIXELS {
            return Err(ExportError::Capture(format!(
                "{}x{} bitmap exceeds the {} pixel limit",
                width, height, MAX_CANVAS_PIXELS
            )));
        }

        let mut canvas = RgbaImage::new(width, height);
        for node in &scene.frame {
            self.draw_node(&mut canvas, node, (0.0, 0.0))?;
        }
        for node in &scene.qr.nodes {
            self.draw_node(&mut canvas, node, scene.qr.origin)?;
        }
        if let Some(caption) = &scene.caption {
            self.draw_caption(&mut canvas, caption);
        }
        log::debug!("Captured {}x{} bitmap", width, height);
        Ok(canvas)
    }

    fn draw_node(&self, canvas: &mut RgbaImage, node: &Node, origin: (f32, f32)) -> Result<(), ExportError> {
        match node {
            Node::Fill { shape, paint } => {
                let shape = shape.translate(origin.0, origin.1);
                let bounds = shape.bounds();
                let source = match paint {
                    Paint::Solid(color) => Source::Solid(*color),
                    Paint::Linear(gradient) => Source::Linear(gradient, bounds),
                    Paint::Image(uri) => {
                        let (x0, y0, w, h) = device_box(&bounds, self.density());
                        let image = decode_image(uri)?
                            .resize_to_fill(w, h, FilterType::Lanczos3)
                            .to_rgba8();
                        Source::Bitmap { image, x0, y0 }
                    }
                };
                self.fill_shape(canvas, &shape, &source);
            }
            Node::Image { rect, data_uri } => {
                let rect = rect.translate(origin.0, origin.1);
                let (x0, y0, w, h) = device_box(&rect, self.density());
                let image = decode_image(data_uri)?
                    .resize(w, h, FilterType::Lanczos3)
                    .to_rgba8();
                let dx = x0 + (w as i64 - image.width() as i64) / 2;
                let dy = y0 + (h as i64 - image.height() as i64) / 2;
                for (ix, iy, pixel) in image.enumerate_pixels() {
                    let (tx, ty) = (dx + ix as i64, dy + iy as i64);
                    if tx < 0 || ty < 0 || tx >= canvas.width() as i64 || ty >= canvas.height() as i64 {
                        continue;
                    }
                    let color = Color::rgba(pixel[0], pixel[1], pixel[2], pixel[3]);
                    blend(canvas.get_pixel_mut(tx as u32, ty as u32), color, 1.0);
                }
            }
        }
        Ok(())
    }

    fn fill_shape(&self, canvas: &mut RgbaImage, shape: &Shape, source: &Source<'_>) {
        let d = self.density();
        let (bx, by, bw, bh) = device_box(&shape.bounds(), d);
        let x_start = bx.max(0) as u32;
        let y_start = by.max(0) as u32;
        let x_end = ((bx + bw as i64).max(0) as u32).min(canvas.width());
        let y_end = ((by + bh as i64).max(0) as u32).min(canvas.height());

        for py in y_start..y_end {
            for px in x_start..x_end {
                let sx = (px as f32 + 0.5) / d;
                let sy = (py as f32 + 0.5) / d;
                let coverage = (0.5 - shape.distance(sx, sy) * d).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let color = match source {
                    Source::Solid(color) => *color,
                    Source::Linear(gradient, bounds) => {
                        gradient.color_at(gradient.offset_at(bounds, sx, sy))
                    }
                    Source::Bitmap { image, x0, y0 } => {
                        let ix = (px as i64 - x0).clamp(0, image.width() as i64 - 1) as u32;
                        let iy = (py as i64 - y0).clamp(0, image.height() as i64 - 1) as u32;
                        let p = image.get_pixel(ix, iy);
                        Color::rgba(p[0], p[1], p[2], p[3])
                    }
                };
                blend(canvas.get_pixel_mut(px, py), color, coverage);
            }
        }
    }

    fn draw_caption(&self, canvas: &mut RgbaImage, caption: &Caption) {
        let Some(font) = self.fonts.resolve(&caption.font) else {
            log::warn!("No font available for {:?}, caption glyphs skipped", caption.font);
            return;
        };
        let d = self.density();
        let scale = PxScale::from(caption.font_size * d);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent();
        let layout = &caption.layout;

        for (line, baseline) in layout.lines.iter().zip(&layout.baselines) {
            let width = measure_text_width(font, scale, line);
            let anchor = layout.anchor_x * d;
            let x = match layout.align {
                TextAlign::Left => anchor,
                TextAlign::Center => anchor - width / 2.0,
                TextAlign::Right => anchor - width,
            };
            let y = (baseline * d - ascent).round() as i32;
            // Glyphs are placed one by one from the same advances and kerning
            // the layout measured with, so the drawn line spans `width`.
            let mut pen = x;
            let mut prev: Option<GlyphId> = None;
            let mut buf = [0u8; 4];
            for ch in line.chars() {
                let glyph_id = scaled.glyph_id(ch);
                if let Some(prev) = prev {
                    pen += scaled.kern(prev, glyph_id);
                }
                if !ch.is_whitespace() {
                    draw_text_mut(
                        canvas,
                        caption.color.to_pixel(),
                        pen.round() as i32,
                        y,
                        scale,
                        font,
                        ch.encode_utf8(&mut buf),
                    );
                }
                pen += scaled.h_advance(glyph_id);
                prev = Some(glyph_id);
            }
        }
    }
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// JPEG has no alpha; the bitmap is flattened onto white first.
pub fn encode_jpeg(image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let mut flat = RgbImage::new(image.width(), image.height());
    for (x, y, pixel) in image.enumerate_pixels() {
        let mut white = Rgba([255, 255, 255, 255]);
        blend(&mut white, Color::rgba(pixel[0], pixel[1], pixel[2], pixel[3]), 1.0);
        flat.put_pixel(x, y, Rgb([white[0], white[1], white[2]]));
    }
    let mut bytes = Vec::new();
    let quality = (RASTER_QUALITY * 100.0).round() as u8;
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
    encoder.encode_image(&flat)?;
    Ok(bytes)
}
