//! Visual treatment of the frame container for each frame style.

use crate::compositor::geometry::{Rect, Shape};
use crate::compositor::paint::{LinearGradient, Paint};
use crate::models::color::Color;
use crate::models::frame::{FrameConfig, FrameStyle, DEFAULT_GRADIENT_ANGLE};

const WHITE: Color = Color::WHITE;
const SHADE_STEPS: usize = 3;

/// Stroke running along the inside of the container edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    /// Distance from the container edge.
    pub inset: f32,
    pub paint: Paint,
}

/// Inset elevation shading drawn as fading bands along the edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub depth: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameTreatment {
    pub fill: Paint,
    pub shade: Option<Shade>,
    pub borders: Vec<Border>,
    /// Height and paint of a bar across the top edge.
    pub accent_bar: Option<(f32, Paint)>,
}

fn gradient(angle: f32, start: &str, end: &str) -> Paint {
    let parse = |s: &str| s.parse::<Color>().unwrap_or(WHITE);
    Paint::Linear(LinearGradient::two_stop(angle, parse(start), parse(end)))
}

fn border(width: f32, color: Color) -> Border {
    Border {
        width,
        inset: 0.0,
        paint: Paint::Solid(color),
    }
}

fn shade(depth: f32, color: Color) -> Option<Shade> {
    Some(Shade { depth, color })
}

/// Default fill of the gradient style.
pub fn default_gradient() -> Paint {
    gradient(DEFAULT_GRADIENT_ANGLE, "#fdfbfb", "#ebedee")
}

impl FrameTreatment {
    fn flat(fill: Paint) -> Self {
        Self {
            fill,
            shade: None,
            borders: Vec::new(),
            accent_bar: None,
        }
    }

    pub fn for_frame(frame: &FrameConfig) -> Self {
        let custom = frame.active_custom_options();
        match frame.frame_style {
            FrameStyle::Modern => Self {
                fill: gradient(145.0, "#ffffff", "#f5f5f5"),
                shade: shade(6.0, Color::rgb(0xd9, 0xd9, 0xd9)),
                borders: vec![border(1.0, Color::rgba(255, 255, 255, 51))],
                accent_bar: None,
            },
            FrameStyle::Classic => Self {
                fill: Paint::Solid(WHITE),
                shade: shade(4.0, Color::rgba(0, 0, 0, 15)),
                borders: vec![
                    border(2.0, Color::rgb(0xe5, 0xe7, 0xeb)),
                    Border {
                        width: 1.0,
                        inset: 4.0,
                        paint: Paint::Solid(Color::rgb(0xe5, 0xe7, 0xeb)),
                    },
                ],
                accent_bar: None,
            },
            FrameStyle::Minimal => Self {
                fill: Paint::Solid(WHITE),
                shade: None,
                borders: vec![border(1.0, Color::rgb(0xf0, 0xf0, 0xf0))],
                accent_bar: None,
            },
            FrameStyle::Fancy => Self {
                fill: gradient(135.0, "#ffffff", "#f3f4f6"),
                shade: shade(10.0, Color::rgba(0, 0, 0, 26)),
                borders: vec![Border {
                    width: 2.0,
                    inset: 0.0,
                    paint: gradient(45.0, "#f6d365", "#fda085"),
                }],
                accent_bar: None,
            },
            FrameStyle::Rounded => Self {
                fill: gradient(145.0, "#ffffff", "#f0f0f0"),
                shade: shade(8.0, Color::rgb(0xd9, 0xd9, 0xd9)),
                borders: vec![border(1.0, Color::rgba(0, 0, 0, 13))],
                accent_bar: None,
            },
            FrameStyle::Shadow => Self {
                fill: gradient(180.0, "#ffffff", "#fafafa"),
                shade: shade(6.0, Color::rgba(0, 0, 0, 26)),
                borders: vec![border(1.0, Color::rgba(0, 0, 0, 13))],
                accent_bar: Some((4.0, gradient(90.0, "#60a5fa", "#e879f9"))),
            },
            FrameStyle::Gradient => {
                let fill = match custom {
                    Some(opts) => match (opts.gradient_start, opts.gradient_end) {
                        (Some(start), Some(end)) => {
                            let angle = opts.gradient_direction.unwrap_or_default().0;
                            Paint::Linear(LinearGradient::two_stop(angle, start, end))
                        }
                        _ => default_gradient(),
                    },
                    None => default_gradient(),
                };
                Self {
                    fill,
                    shade: shade(4.0, Color::rgba(0, 0, 0, 26)),
                    borders: vec![border(1.0, Color::rgba(255, 255, 255, 77))],
                    accent_bar: None,
                }
            }
            FrameStyle::Custom => {
                let fill = custom
                    .and_then(|opts| opts.background_image.clone())
                    .map(Paint::Image)
                    .unwrap_or(Paint::Solid(frame.container_background));
                Self {
                    fill,
                    shade: shade(4.0, Color::rgba(0, 0, 0, 26)),
                    borders: vec![border(1.0, Color::rgba(0, 0, 0, 26))],
                    accent_bar: None,
                }
            }
            FrameStyle::Flat => Self::flat(Paint::Solid(frame.container_background)),
        }
    }

    /// Shapes and paints making up the container, back to front.
    pub fn nodes(&self, container: Rect, radius: f32) -> Vec<(Shape, Paint)> {
        let mut nodes = vec![(Shape::round_rect(container, radius), self.fill.clone())];

        if let Some(shade) = self.shade {
            let step = shade.depth / SHADE_STEPS as f32;
            for i in 0..SHADE_STEPS {
                let offset = step * i as f32;
                let alpha = shade.color.a as f32 * (SHADE_STEPS - i) as f32 / SHADE_STEPS as f32;
                let color = Color::rgba(shade.color.r, shade.color.g, shade.color.b, alpha.round() as u8);
                let outer = container.inset(offset);
                nodes.push((
                    Shape::border(outer, (radius - offset).max(0.0), step),
                    Paint::Solid(color),
                ));
            }
        }

        if let Some((height, paint)) = &self.accent_bar {
            let inset = radius.min(container.w / 2.0);
            let bar = Rect::new(container.x + inset, container.y, container.w - 2.0 * inset, *height);
            nodes.push((Shape::rect(bar), paint.clone()));
        }

        for b in &self.borders {
            let outer = container.inset(b.inset);
            nodes.push((
                Shape::border(outer, (radius - b.inset).max(0.0), b.width),
                b.paint.clone(),
            ));
        }

        nodes
            .into_iter()
            .filter(|(_, paint)| !paint.is_invisible())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::frame::{CustomOptions, GradientAngle};

    #[test]
    fn gradient_style_uses_custom_stops() {
        let frame = FrameConfig {
            frame_style: FrameStyle::Gradient,
            custom_options: Some(CustomOptions {
                gradient_start: Some("#111111".parse().unwrap()),
                gradient_end: Some("#eeeeee".parse().unwrap()),
                gradient_direction: Some(GradientAngle(90.0)),
                ..CustomOptions::default()
            }),
            ..FrameConfig::default()
        };
        let treatment = FrameTreatment::for_frame(&frame);
        assert_eq!(
            treatment.fill,
            Paint::Linear(LinearGradient::two_stop(
                90.0,
                Color::rgb(0x11, 0x11, 0x11),
                Color::rgb(0xee, 0xee, 0xee)
            ))
        );
    }

    #[test]
    fn gradient_style_without_both_stops_uses_default() {
        let frame = FrameConfig {
            frame_style: FrameStyle::Gradient,
            custom_options: Some(CustomOptions {
                gradient_start: Some(Color::BLACK),
                ..CustomOptions::default()
            }),
            ..FrameConfig::default()
        };
        assert_eq!(FrameTreatment::for_frame(&frame).fill, default_gradient());
    }

    #[test]
    fn custom_image_takes_precedence_over_background() {
        let uri = "data:image/png;base64,AAAA".to_string();
        let frame = FrameConfig {
            frame_style: FrameStyle::Custom,
            container_background: Color::rgb(1, 2, 3),
            custom_options: Some(CustomOptions {
                background_image: Some(uri.clone()),
                ..CustomOptions::default()
            }),
            ..FrameConfig::default()
        };
        assert_eq!(FrameTreatment::for_frame(&frame).fill, Paint::Image(uri));

        let plain = FrameConfig {
            frame_style: FrameStyle::Custom,
            container_background: Color::rgb(1, 2, 3),
            ..FrameConfig::default()
        };
        assert_eq!(
            FrameTreatment::for_frame(&plain).fill,
            Paint::Solid(Color::rgb(1, 2, 3))
        );
    }

    #[test]
    fn flat_is_background_only() {
        let frame = FrameConfig {
            frame_style: FrameStyle::Flat,
            container_background: Color::rgb(10, 20, 30),
            ..FrameConfig::default()
        };
        let nodes = FrameTreatment::for_frame(&frame).nodes(Rect::new(0.0, 0.0, 100.0, 100.0), 10.0);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].1, Paint::Solid(Color::rgb(10, 20, 30)));
    }
}
