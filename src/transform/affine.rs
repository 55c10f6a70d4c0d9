//! Affine transform helpers.

use crate::foundation::core::{Affine, Point, Vec2};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPS: f64 = 1e-12;

/// `a * b`: `b` applies first.
#[inline]
pub fn compose(a: Affine, b: Affine) -> Affine {
    a * b
}

/// Apply only the linear part of `t` (no translation) to `v`.
#[inline]
pub fn apply_vector(t: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = t.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

#[inline]
pub fn apply_point(t: Affine, p: Point) -> Point {
    t * p
}

/// Inverse of `t`, or `None` when `t` is singular or not finite.
pub fn checked_inverse(t: Affine) -> Option<Affine> {
    let det = t.determinant();
    if !det.is_finite() || det.abs() < SINGULAR_EPS {
        return None;
    }
    let inv = t.inverse();
    inv.as_coeffs().iter().all(|c| c.is_finite()).then_some(inv)
}

/// Map a scalar distance through `t` by transforming `(d, 0)` and taking its length.
///
/// Passing the screen-to-local transform converts a constant on-screen thickness
/// into local units, regardless of the layer's own scale and rotation.
pub fn scaled_distance(d: f64, t: Affine) -> f64 {
    crate::transform::linear::length(apply_vector(t, Vec2::new(d, 0.0)))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/affine.rs"]
mod tests;
