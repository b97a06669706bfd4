/// Axis-aligned rectangle in scene units (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Shrink on every side. Never produces negative extents.
    pub fn inset(&self, by: f32) -> Rect {
        let by = by.min(self.w / 2.0).min(self.h / 2.0);
        Rect::new(self.x + by, self.y + by, self.w - 2.0 * by, self.h - 2.0 * by)
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Interiors overlap. Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Fillable outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Rectangle with uniform corner radius; a radius of half the side
    /// makes a circle.
    RoundRect { rect: Rect, radius: f32 },
    /// Area between two round rects.
    Ring {
        outer: Rect,
        outer_radius: f32,
        inner: Rect,
        inner_radius: f32,
    },
}

impl Shape {
    pub fn rect(rect: Rect) -> Self {
        Shape::RoundRect { rect, radius: 0.0 }
    }

    pub fn round_rect(rect: Rect, radius: f32) -> Self {
        Shape::RoundRect {
            rect,
            radius: clamp_radius(&rect, radius),
        }
    }

    pub fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Shape::RoundRect {
            rect: Rect::new(cx - r, cy - r, 2.0 * r, 2.0 * r),
            radius: r,
        }
    }

    pub fn ring(outer: Rect, outer_radius: f32, inner: Rect, inner_radius: f32) -> Self {
        Shape::Ring {
            outer,
            outer_radius: clamp_radius(&outer, outer_radius),
            inner,
            inner_radius: clamp_radius(&inner, inner_radius),
        }
    }

    /// Ring of `width` running along the inside of a round rect.
    pub fn border(rect: Rect, radius: f32, width: f32) -> Self {
        let inner = rect.inset(width);
        Shape::ring(rect, radius, inner, (radius - width).max(0.0))
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::RoundRect { rect, .. } => *rect,
            Shape::Ring { outer, .. } => *outer,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Shape {
        match *self {
            Shape::RoundRect { rect, radius } => Shape::RoundRect {
                rect: rect.translate(dx, dy),
                radius,
            },
            Shape::Ring {
                outer,
                outer_radius,
                inner,
                inner_radius,
            } => Shape::Ring {
                outer: outer.translate(dx, dy),
                outer_radius,
                inner: inner.translate(dx, dy),
                inner_radius,
            },
        }
    }

    /// Signed distance from a point to the outline; negative inside.
    pub fn distance(&self, px: f32, py: f32) -> f32 {
        match self {
            Shape::RoundRect { rect, radius } => round_rect_distance(rect, *radius, px, py),
            Shape::Ring {
                outer,
                outer_radius,
                inner,
                inner_radius,
            } => round_rect_distance(outer, *outer_radius, px, py)
                .max(-round_rect_distance(inner, *inner_radius, px, py)),
        }
    }
}

pub fn clamp_radius(rect: &Rect, radius: f32) -> f32 {
    radius.max(0.0).min(rect.w / 2.0).min(rect.h / 2.0)
}

fn round_rect_distance(rect: &Rect, radius: f32, px: f32, py: f32) -> f32 {
    let (cx, cy) = rect.center();
    let qx = (px - cx).abs() - rect.w / 2.0 + radius;
    let qy = (py - cy).abs() - rect.h / 2.0 + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    outside + qx.max(qy).min(0.0) - radius
}
