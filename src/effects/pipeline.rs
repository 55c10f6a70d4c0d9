//! Fixed-order effect registry.
//!
//! [`EffectPipeline::apply`] runs each configured effect in registry order, invokes the
//! draw callback once, then runs the effects' undo closures last-applied-first.
//! [`EffectPipeline::extract_transform`] is the same pass with a callback that only
//! reads back the accumulated transform.

use std::sync::Arc;

use crate::{
    effects::{
        config::{EffectId, EffectsConfig},
        filter::FilterEffect,
        transform::TransformEffect,
    },
    foundation::core::{Affine, Rect, SurfaceSize},
    foundation::error::{LayerkitError, LayerkitResult},
    plugins::image::PreparedImage,
    render::context::{DrawContext, DrawState},
};

/// Reverses one effect application. Undos restore to a recorded depth rather than
/// popping once, so an unbalanced frame above them is unwound too.
pub type Undo = Box<dyn FnOnce(&mut dyn DrawContext)>;

pub trait LayerEffect: Send + Sync {
    fn id(&self) -> EffectId;

    /// Mutate `ctx` for this effect's options in `config`, returning the reversal.
    /// Malformed options fall back to the effect's defaults.
    fn apply(&self, config: &EffectsConfig, ctx: &mut dyn DrawContext) -> Undo;
}

#[derive(Clone)]
pub struct EffectPipeline {
    effects: Vec<Arc<dyn LayerEffect>>,
}

impl std::fmt::Debug for EffectPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.effects.iter().map(|e| e.id()))
            .finish()
    }
}

impl Default for EffectPipeline {
    fn default() -> Self {
        Self::builtin()
    }
}

impl EffectPipeline {
    /// `transform` then `filter`.
    pub fn builtin() -> Self {
        Self {
            effects: vec![Arc::new(TransformEffect), Arc::new(FilterEffect)],
        }
    }

    pub fn ids(&self) -> impl Iterator<Item = EffectId> + '_ {
        self.effects.iter().map(|e| e.id())
    }

    pub fn effect_by_id(&self, id: &str) -> LayerkitResult<&dyn LayerEffect> {
        let id: EffectId = id.parse()?;
        self.effects
            .iter()
            .find(|e| e.id() == id)
            .map(|e| e.as_ref())
            .ok_or_else(|| LayerkitError::unknown_effect(id.as_str()))
    }

    pub fn apply<R>(
        &self,
        config: &EffectsConfig,
        ctx: &mut dyn DrawContext,
        draw: impl FnOnce(&mut dyn DrawContext) -> R,
    ) -> R {
        let base_depth = ctx.depth();
        let mut undos: Vec<Undo> = Vec::with_capacity(self.effects.len());
        for effect in &self.effects {
            if config.configured(effect.id()) {
                undos.push(effect.apply(config, &mut *ctx));
            }
        }

        let active_depth = ctx.depth();
        ctx.save();
        let out = draw(&mut CallbackScope {
            inner: &mut *ctx,
            floor: active_depth + 1,
        });
        ctx.restore_to(active_depth);

        while let Some(undo) = undos.pop() {
            undo(&mut *ctx);
        }
        ctx.restore_to(base_depth);
        out
    }

    /// Transform a draw inside [`Self::apply`] would see. On a fresh context this is the
    /// layer-local to surface mapping.
    pub fn extract_transform(&self, config: &EffectsConfig, ctx: &mut dyn DrawContext) -> Affine {
        self.apply(config, ctx, |ctx| ctx.transform())
    }
}

/// Context handed to a draw callback. Restores never pop below `floor`, so the
/// callback cannot unwind the pipeline's frame or anything saved before it.
struct CallbackScope<'a> {
    inner: &'a mut dyn DrawContext,
    floor: usize,
}

impl DrawContext for CallbackScope<'_> {
    fn size(&self) -> SurfaceSize {
        self.inner.size()
    }

    fn state(&self) -> &DrawState {
        self.inner.state()
    }

    fn state_mut(&mut self) -> &mut DrawState {
        self.inner.state_mut()
    }

    fn save(&mut self) {
        self.inner.save();
    }

    fn restore(&mut self) {
        if self.inner.depth() <= self.floor {
            tracing::warn!(
                depth = self.inner.depth(),
                "draw callback restored past its own save; ignored"
            );
            return;
        }
        self.inner.restore();
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn fill_rect(&mut self, rect: Rect) -> LayerkitResult<()> {
        self.inner.fill_rect(rect)
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect) -> LayerkitResult<()> {
        self.inner.draw_image(image, dest)
    }

    fn restore_to(&mut self, depth: usize) {
        self.inner.restore_to(depth.max(self.floor));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/pipeline.rs"]
mod tests;
