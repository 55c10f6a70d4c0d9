use crate::foundation::error::{LayerkitError, LayerkitResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of the rendering surface layers are drawn into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl Default for SurfaceSize {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
        }
    }
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> LayerkitResult<Self> {
        let size = Self { width, height };
        size.validate()?;
        Ok(size)
    }

    /// Surfaces are backed by `u16`-sized pixmaps.
    pub fn validate(self) -> LayerkitResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LayerkitError::validation("surface size must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(LayerkitError::validation("surface size exceeds u16"));
        }
        Ok(())
    }

    pub fn center(self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    pub fn as_f64(self) -> (f64, f64) {
        (f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
