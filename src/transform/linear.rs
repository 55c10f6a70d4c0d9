//! 2D vector helpers.

use crate::foundation::core::{Point, Vec2};

/// Vectors shorter than this have no usable direction.
pub const DEGENERATE_LEN: f64 = 1e-9;

#[inline]
pub fn length(v: Vec2) -> f64 {
    v.x.hypot(v.y)
}

/// Unit vector along `v`, or `None` for (near) zero-length or non-finite input.
#[inline]
pub fn normalize(v: Vec2) -> Option<Vec2> {
    let len = length(v);
    if !len.is_finite() || len < DEGENERATE_LEN {
        return None;
    }
    Some(Vec2::new(v.x / len, v.y / len))
}

#[inline]
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Z component of the 3D cross product; positive when `b` is clockwise of `a` in y-down space.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

#[inline]
pub fn subtract(a: Point, b: Point) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

/// Signed angle from `a` to `b` in `(-pi, pi]`.
#[inline]
pub fn signed_angle(a: Vec2, b: Vec2) -> f64 {
    cross(a, b).atan2(dot(a, b))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/linear.rs"]
mod tests;
