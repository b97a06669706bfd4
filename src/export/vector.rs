//! Serializes a scene as a standalone SVG 1.1 document.

use std::fmt::Write;

use crate::compositor::geometry::{Rect, Shape};
use crate::compositor::paint::Paint;
use crate::compositor::scene::{Caption, Node, Scene};
use crate::utils::xml::{escape, num};

#[derive(Default)]
struct Defs {
    next_id: usize,
    body: String,
}

impl Defs {
    fn next(&mut self) -> String {
        self.next_id += 1;
        format!("paint-{}", self.next_id)
    }

    /// `fill` attributes for a paint over `bounds`.
    fn fill(&mut self, paint: &Paint, bounds: &Rect) -> String {
        match paint {
            Paint::Solid(color) => {
                if color.is_transparent() || color.is_opaque() {
                    format!("fill=\"{}\"", color.svg_paint())
                } else {
                    format!("fill=\"{}\" fill-opacity=\"{}\"", color.to_hex(), num(color.opacity()))
                }
            }
            Paint::Linear(gradient) => {
                let id = self.next();
                let ((x1, y1), (x2, y2)) = gradient.line(bounds);
                let _ = writeln!(
                    self.body,
                    "    <linearGradient id=\"{}\" gradientUnits=\"userSpaceOnUse\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\">",
                    id,
                    num(x1),
                    num(y1),
                    num(x2),
                    num(y2)
                );
                for (offset, color) in &gradient.stops {
                    let opacity = if color.is_opaque() {
                        String::new()
                    } else {
                        format!(" stop-opacity=\"{}\"", num(color.opacity()))
                    };
                    let _ = writeln!(
                        self.body,
                        "      <stop offset=\"{}\" stop-color=\"{}\"{}/>",
                        num(*offset),
                        color.to_hex(),
                        opacity
                    );
                }
                self.body.push_str("    </linearGradient>\n");
                format!("fill=\"url(#{})\"", id)
            }
            Paint::Image(uri) => {
                let id = self.next();
                let _ = writeln!(
                    self.body,
                    "    <pattern id=\"{}\" patternUnits=\"userSpaceOnUse\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\">",
                    id,
                    num(bounds.x),
                    num(bounds.y),
                    num(bounds.w),
                    num(bounds.h)
                );
                let _ = writeln!(
                    self.body,
                    "      <image width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid slice\" xlink:href=\"{}\"/>",
                    num(bounds.w),
                    num(bounds.h),
                    escape(uri)
                );
                self.body.push_str("    </pattern>\n");
                format!("fill=\"url(#{})\"", id)
            }
        }
    }
}

fn round_rect_path(rect: &Rect, radius: f32) -> String {
    let (x, y, r) = (rect.x, rect.y, radius);
    let (right, bottom) = (rect.right(), rect.bottom());
    if r <= 0.0 {
        return format!(
            "M{},{}H{}V{}H{}Z",
            num(x),
            num(y),
            num(right),
            num(bottom),
            num(x)
        );
    }
    let arc = |ex: f32, ey: f32| format!("A{},{} 0 0 1 {},{}", num(r), num(r), num(ex), num(ey));
    format!(
        "M{},{}H{}{}V{}{}H{}{}V{}{}Z",
        num(x + r),
        num(y),
        num(right - r),
        arc(right, y + r),
        num(bottom - r),
        arc(right - r, bottom),
        num(x + r),
        arc(x, bottom - r),
        num(y + r),
        arc(x + r, y)
    )
}

fn write_node(out: &mut String, defs: &mut Defs, node: &Node, indent: &str) {
    match node {
        Node::Fill { shape, paint } => {
            let fill = defs.fill(paint, &shape.bounds());
            match shape {
                Shape::RoundRect { rect, radius } => {
                    let corners = if *radius > 0.0 {
                        format!(" rx=\"{}\" ry=\"{}\"", num(*radius), num(*radius))
                    } else {
                        String::new()
                    };
                    let _ = writeln!(
                        out,
                        "{}<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{} {}/>",
                        indent,
                        num(rect.x),
                        num(rect.y),
                        num(rect.w),
                        num(rect.h),
                        corners,
                        fill
                    );
                }
                Shape::Ring {
                    outer,
                    outer_radius,
                    inner,
                    inner_radius,
                } => {
                    let _ = writeln!(
                        out,
                        "{}<path d=\"{}{}\" fill-rule=\"evenodd\" {}/>",
                        indent,
                        round_rect_path(outer, *outer_radius),
                        round_rect_path(inner, *inner_radius),
                        fill
                    );
                }
            }
        }
        Node::Image { rect, data_uri } => {
            let _ = writeln!(
                out,
                "{}<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\" xlink:href=\"{}\"/>",
                indent,
                num(rect.x),
                num(rect.y),
                num(rect.w),
                num(rect.h),
                escape(data_uri)
            );
        }
    }
}

fn write_caption(out: &mut String, caption: &Caption) {
    let layout = &caption.layout;
    let fill = if caption.color.is_opaque() || caption.color.is_transparent() {
        format!("fill=\"{}\"", caption.color.svg_paint())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            caption.color.to_hex(),
            num(caption.color.opacity())
        )
    };
    let first_baseline = layout.baselines.first().copied().unwrap_or_default();
    let _ = write!(
        out,
        "  <text x=\"{}\" y=\"{}\" text-anchor=\"{}\" {} style=\"font-family: {}; font-size: {}px; font-weight: {};\">",
        num(layout.anchor_x),
        num(first_baseline),
        layout.align.anchor(),
        fill,
        escape(&caption.font),
        num(caption.font_size),
        caption.font_weight.value()
    );
    if layout.lines.len() == 1 {
        out.push_str(&escape(&layout.lines[0]));
    } else {
        for (line, baseline) in layout.lines.iter().zip(&layout.baselines) {
            let _ = write!(
                out,
                "<tspan x=\"{}\" y=\"{}\">{}</tspan>",
                num(layout.anchor_x),
                num(*baseline),
                escape(line)
            );
        }
    }
    out.push_str("</text>\n");
}

/// Render the scene as an SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut defs = Defs::default();
    let mut body = String::new();

    for node in &scene.frame {
        write_node(&mut body, &mut defs, node, "  ");
    }

    let _ = writeln!(
        body,
        "  <g transform=\"translate({}, {})\">",
        num(scene.qr.origin.0),
        num(scene.qr.origin.1)
    );
    for node in &scene.qr.nodes {
        write_node(&mut body, &mut defs, node, "    ");
    }
    body.push_str("  </g>\n");

    if let Some(caption) = &scene.caption {
        write_caption(&mut body, caption);
    }

    let (w, h) = (num(scene.width), num(scene.height));
    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n");
    doc.push_str("<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n");
    let _ = writeln!(
        doc,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" version=\"1.1\" width=\"{0}\" height=\"{1}\" viewBox=\"0 0 {0} {1}\">",
        w, h
    );
    if !defs.body.is_empty() {
        doc.push_str("  <defs>\n");
        doc.push_str(&defs.body);
        doc.push_str("  </defs>\n");
    }
    doc.push_str(&body);
    doc.push_str("</svg>\n");
    doc
}
