//! 2D math used by the line rasterizer
//!
//! Only what line drawing needs: a point type, interpolation, truncation to
//! pixel indices, axis ordering and the slope-intercept line equation.

use std::ops::Sub;

/// Tolerance for degenerate geometry (zero-length, vertical, horizontal)
pub const EPSILON: f64 = f64::EPSILON;

/// 2D point / vector
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Squared length, avoids the square root when only comparing
    #[inline]
    pub fn squared_magnitude(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Sub for Vec2 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Linear interpolation, `t` is not clamped
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Truncate toward zero to get a pixel coordinate. Never rounds.
#[inline]
pub fn floor_to_index(x: f64) -> i64 {
    x as i64
}

/// Order two points by x. On a tie the first argument is the minimum.
#[inline]
pub fn order_by_x(p: Vec2, q: Vec2) -> (Vec2, Vec2) {
    if p.x > q.x {
        (q, p)
    } else {
        (p, q)
    }
}

/// Order two points by y. On a tie the first argument is the minimum.
#[inline]
pub fn order_by_y(p: Vec2, q: Vec2) -> (Vec2, Vec2) {
    if p.y > q.y {
        (q, p)
    } else {
        (p, q)
    }
}

/// y on the infinite line through `p1` and `p2` at the given x.
///
/// Divides by `p2.x - p1.x`: vertical lines must be handled by the caller.
#[inline]
pub fn evaluate_line_at_x(x: f64, p1: Vec2, p2: Vec2) -> f64 {
    (p2.y - p1.y) / (p2.x - p1.x) * (x - p1.x) + p1.y
}

#[inline]
pub fn squared_distance(p: Vec2, q: Vec2) -> f64 {
    (q - p).squared_magnitude()
}
