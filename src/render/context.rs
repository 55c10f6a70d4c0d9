//! Canvas-style drawing context: a current state plus a save/restore stack.
//!
//! Coordinate operations post-multiply the current transform, so the most recent
//! call applies first to drawn geometry.

use crate::{
    foundation::color::Rgba8,
    foundation::core::{Affine, Rect, SurfaceSize, Vec2},
    foundation::error::LayerkitResult,
    plugins::image::PreparedImage,
};

/// Everything `save`/`restore` captures.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// Local-to-surface coordinate transform.
    pub transform: Affine,
    /// Opaque pixel filter, passed through to the surface.
    pub filter: String,
    /// Fill color for `fill_rect`.
    pub fill: Rgba8,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            filter: String::new(),
            fill: Rgba8::BLACK,
        }
    }
}

pub trait DrawContext {
    fn size(&self) -> SurfaceSize;

    fn state(&self) -> &DrawState;

    fn state_mut(&mut self) -> &mut DrawState;

    /// Push a copy of the current state.
    fn save(&mut self);

    /// Pop the last saved state; a no-op on an empty stack.
    fn restore(&mut self);

    /// Number of saved states.
    fn depth(&self) -> usize;

    fn fill_rect(&mut self, rect: Rect) -> LayerkitResult<()>;

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> LayerkitResult<()>;

    fn transform(&self) -> Affine {
        self.state().transform
    }

    fn set_transform(&mut self, transform: Affine) {
        self.state_mut().transform = transform;
    }

    fn translate(&mut self, v: Vec2) {
        let t = self.state().transform;
        self.state_mut().transform = t * Affine::translate(v);
    }

    fn rotate(&mut self, radians: f64) {
        let t = self.state().transform;
        self.state_mut().transform = t * Affine::rotate(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        let t = self.state().transform;
        self.state_mut().transform = t * Affine::scale_non_uniform(sx, sy);
    }

    fn set_filter(&mut self, filter: &str) {
        self.state_mut().filter = filter.to_string();
    }

    fn set_fill(&mut self, fill: Rgba8) {
        self.state_mut().fill = fill;
    }

    /// Restore until at most `depth` states remain saved.
    fn restore_to(&mut self, depth: usize) {
        while self.depth() > depth {
            self.restore();
        }
    }
}

/// Current state plus saved states; shared by every context implementation.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        if let Some(prev) = self.saved.pop() {
            self.current = prev;
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }
}

/// Context that tracks state but draws nothing.
///
/// Used for coordinate extraction, bounding boxes and hit-testing, none of which
/// need pixels.
#[derive(Clone, Debug)]
pub struct MeasureContext {
    size: SurfaceSize,
    stack: StateStack,
}

impl MeasureContext {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            stack: StateStack::default(),
        }
    }
}

impl DrawContext for MeasureContext {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn state(&self) -> &DrawState {
        self.stack.current()
    }

    fn state_mut(&mut self) -> &mut DrawState {
        self.stack.current_mut()
    }

    fn save(&mut self) {
        self.stack.save();
    }

    fn restore(&mut self) {
        self.stack.restore();
    }

    fn depth(&self) -> usize {
        self.stack.depth()
    }

    fn fill_rect(&mut self, _rect: Rect) -> LayerkitResult<()> {
        Ok(())
    }

    fn draw_image(&mut self, _image: &PreparedImage, _dest: Rect) -> LayerkitResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
