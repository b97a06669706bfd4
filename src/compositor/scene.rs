use crate::compositor::geometry::{Rect, Shape, clamp_radius};
use crate::compositor::layout::{CaptionLayout, FrameLayout, layout};
use crate::compositor::paint::Paint;
use crate::compositor::treatment::FrameTreatment;
use crate::models::color::Color;
use crate::models::frame::FontWeight;
use crate::models::studio::{ErrorCorrection, StudioConfig};
use crate::models::style::{CornerShape, ModuleShape};
use crate::services::encoder::{FINDER_SIZE, QrMatrix};
use crate::services::fonts::FontRegistry;

/// Light modules around the symbol.
pub const QUIET_ZONE: usize = 4;
/// Logo side relative to the symbol side.
const LOGO_RATIO: f32 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Fill { shape: Shape, paint: Paint },
    /// Embedded bitmap, fitted inside `rect`.
    Image { rect: Rect, data_uri: String },
}

/// The QR symbol, drawn in its own coordinate frame starting at `origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct QrGroup {
    pub origin: (f32, f32),
    pub size: f32,
    pub cell: f32,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub layout: CaptionLayout,
    pub font: String,
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
}

/// A composed artifact: container, symbol and caption, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub level: ErrorCorrection,
    pub frame: Vec<Node>,
    pub qr: QrGroup,
    pub caption: Option<Caption>,
}

impl Scene {
    /// Bounds of the symbol in scene coordinates.
    pub fn qr_bounds(&self) -> Rect {
        Rect::new(self.qr.origin.0, self.qr.origin.1, self.qr.size, self.qr.size)
    }
}

fn module_shape(shape: ModuleShape, x: f32, y: f32, cell: f32) -> Shape {
    match shape {
        ModuleShape::Squares => Shape::rect(Rect::new(x, y, cell, cell)),
        ModuleShape::Dots => Shape::circle(x + cell / 2.0, y + cell / 2.0, cell / 2.0),
        ModuleShape::Rounded => Shape::round_rect(Rect::new(x, y, cell, cell), cell * 0.3),
    }
}

/// Outer ring and inner eye of one finder pattern.
fn finder_shapes(shape: CornerShape, x: f32, y: f32, cell: f32) -> [Shape; 2] {
    let outer = Rect::new(x, y, cell * FINDER_SIZE as f32, cell * FINDER_SIZE as f32);
    let inner = outer.inset(cell);
    let eye = outer.inset(cell * 2.0);
    match shape {
        CornerShape::Square => [Shape::ring(outer, 0.0, inner, 0.0), Shape::rect(eye)],
        CornerShape::Dot => [
            Shape::ring(outer, outer.w / 2.0, inner, inner.w / 2.0),
            Shape::round_rect(eye, eye.w / 2.0),
        ],
        CornerShape::Rounded => [
            Shape::ring(outer, cell * 2.0, inner, cell * 1.2),
            Shape::round_rect(eye, cell * 0.8),
        ],
    }
}

fn qr_nodes(matrix: &QrMatrix, config: &StudioConfig, size: f32) -> (f32, Vec<Node>) {
    let style = &config.style;
    let cell = size / (matrix.width() + 2 * QUIET_ZONE) as f32;
    let offset = |m: usize| (m + QUIET_ZONE) as f32 * cell;
    let ink = Paint::Solid(style.foreground);

    let mut nodes = vec![Node::Fill {
        shape: Shape::rect(Rect::new(0.0, 0.0, size, size)),
        paint: Paint::Solid(style.background),
    }];

    for (x, y) in matrix.dark_modules() {
        if matrix.in_finder(x, y) {
            continue;
        }
        nodes.push(Node::Fill {
            shape: module_shape(style.module_shape, offset(x), offset(y), cell),
            paint: ink.clone(),
        });
    }

    for (fx, fy) in matrix.finder_origins() {
        for shape in finder_shapes(style.corner_shape, offset(fx), offset(fy), cell) {
            nodes.push(Node::Fill {
                shape,
                paint: ink.clone(),
            });
        }
    }

    if let Some(logo) = &config.logo {
        let side = size * LOGO_RATIO;
        let logo_rect = Rect::new((size - side) / 2.0, (size - side) / 2.0, side, side);
        let pad_color = if style.background.is_transparent() {
            Color::WHITE
        } else {
            style.background
        };
        nodes.push(Node::Fill {
            shape: Shape::round_rect(logo_rect.inset(-cell), cell),
            paint: Paint::Solid(pad_color),
        });
        nodes.push(Node::Image {
            rect: logo_rect,
            data_uri: logo.data_uri.clone(),
        });
    }

    (cell, nodes)
}

/// Compose the visual tree for an encoded symbol under a configuration.
/// The caption is measured with the face `fonts` resolves for it, which is
/// the face the rasterizer draws.
pub fn compose(matrix: &QrMatrix, config: &StudioConfig, fonts: &FontRegistry) -> Scene {
    let frame_cfg = &config.frame;
    let FrameLayout {
        width,
        height,
        qr,
        caption,
    } = layout(frame_cfg, config.size, fonts.resolve(&frame_cfg.font));

    let container = Rect::new(0.0, 0.0, width, height);
    let radius = clamp_radius(&container, frame_cfg.corner_radius as f32);
    let frame = FrameTreatment::for_frame(frame_cfg)
        .nodes(container, radius)
        .into_iter()
        .map(|(shape, paint)| Node::Fill { shape, paint })
        .collect();

    let (cell, nodes) = qr_nodes(matrix, config, qr.w);

    Scene {
        width,
        height,
        level: matrix.level(),
        frame,
        qr: QrGroup {
            origin: (qr.x, qr.y),
            size: qr.w,
            cell,
            nodes,
        },
        caption: caption.map(|layout| Caption {
            layout,
            font: frame_cfg.font.clone(),
            font_size: frame_cfg.font_size as f32,
            font_weight: frame_cfg.font_weight,
            color: frame_cfg.text_color,
        }),
    }
}
