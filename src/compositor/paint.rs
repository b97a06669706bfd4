use crate::compositor::geometry::Rect;
use crate::models::color::Color;

/// CSS-style linear gradient. The angle follows CSS: 0 points up and
/// angles turn clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub angle: f32,
    pub stops: Vec<(f32, Color)>,
}

impl LinearGradient {
    pub fn two_stop(angle: f32, start: Color, end: Color) -> Self {
        Self {
            angle,
            stops: vec![(0.0, start), (1.0, end)],
        }
    }

    /// Start and end points of the gradient line for a box, as CSS lays it
    /// out: through the center, long enough that the corners hit 0 and 1.
    pub fn line(&self, bounds: &Rect) -> ((f32, f32), (f32, f32)) {
        let rad = self.angle.to_radians();
        let (dx, dy) = (rad.sin(), -rad.cos());
        let half = (bounds.w * dx.abs() + bounds.h * dy.abs()) / 2.0;
        let (cx, cy) = bounds.center();
        ((cx - dx * half, cy - dy * half), (cx + dx * half, cy + dy * half))
    }

    /// Position of a point along the gradient line, clamped to [0, 1].
    pub fn offset_at(&self, bounds: &Rect, px: f32, py: f32) -> f32 {
        let ((x1, y1), (x2, y2)) = self.line(bounds);
        let (vx, vy) = (x2 - x1, y2 - y1);
        let len_sq = vx * vx + vy * vy;
        if len_sq <= f32::EPSILON {
            return 0.0;
        }
        (((px - x1) * vx + (py - y1) * vy) / len_sq).clamp(0.0, 1.0)
    }

    pub fn color_at(&self, t: f32) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first.0 {
            return first.1;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.0 {
                let span = (b.0 - a.0).max(f32::EPSILON);
                return a.1.lerp(&b.1, (t - a.0) / span);
            }
        }
        self.stops.last().map(|s| s.1).unwrap_or(first.1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
    /// `data:` URI stretched to cover the painted area.
    Image(String),
}

impl Paint {
    pub fn is_invisible(&self) -> bool {
        matches!(self, Paint::Solid(c) if c.is_transparent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ninety_degrees_runs_left_to_right() {
        let g = LinearGradient::two_stop(90.0, Color::BLACK, Color::WHITE);
        let bounds = Rect::new(0.0, 0.0, 200.0, 100.0);
        let ((x1, y1), (x2, y2)) = g.line(&bounds);
        assert!((x1 - 0.0).abs() < 1e-3 && (y1 - 50.0).abs() < 1e-3);
        assert!((x2 - 200.0).abs() < 1e-3 && (y2 - 50.0).abs() < 1e-3);
        assert_eq!(g.color_at(g.offset_at(&bounds, 0.0, 10.0)), Color::BLACK);
        assert_eq!(g.color_at(g.offset_at(&bounds, 200.0, 90.0)), Color::WHITE);
    }

    #[test]
    fn one_eighty_runs_top_to_bottom() {
        let g = LinearGradient::two_stop(180.0, Color::BLACK, Color::WHITE);
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(g.offset_at(&bounds, 50.0, 0.0) < 0.01);
        assert!(g.offset_at(&bounds, 50.0, 100.0) > 0.99);
    }

    #[test]
    fn midpoint_blends_stops() {
        let g = LinearGradient::two_stop(90.0, Color::rgb(0, 0, 0), Color::rgb(200, 100, 50));
        assert_eq!(g.color_at(0.5), Color::rgb(100, 50, 25));
    }
}
