//! Axis-aligned bounding boxes in a plugin's local drawing space.

use crate::foundation::core::{Point, Rect};

/// `[x0, y0, x1, y1]` in local (pre-effect) space.
pub type BBox = Rect;

/// Inclusive containment test; tolerates boxes with swapped corners.
pub fn contains(bbox: BBox, p: Point) -> bool {
    let b = bbox.abs();
    p.x >= b.x0 && p.x <= b.x1 && p.y >= b.y0 && p.y <= b.y1
}

/// Expand all four edges outward by `d`.
pub fn dilate(bbox: BBox, d: f64) -> BBox {
    let b = bbox.abs();
    Rect::new(b.x0 - d, b.y0 - d, b.x1 + d, b.y1 + d)
}

pub fn center(bbox: BBox) -> Point {
    bbox.center()
}

/// Corners in drawing order: top-left, top-right, bottom-right, bottom-left.
pub fn corners(bbox: BBox) -> [Point; 4] {
    [
        Point::new(bbox.x0, bbox.y0),
        Point::new(bbox.x1, bbox.y0),
        Point::new(bbox.x1, bbox.y1),
        Point::new(bbox.x0, bbox.y1),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/transform/bbox.rs"]
mod tests;
