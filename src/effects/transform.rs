use crate::{
    effects::{
        config::{EffectId, EffectsConfig, ResolvedTransform},
        pipeline::{LayerEffect, Undo},
    },
    foundation::core::{SurfaceSize, Vec2},
    render::context::DrawContext,
};

/// Translate about the surface center, then rotate, then scale.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransformEffect;

impl TransformEffect {
    /// Parameters that reproduce a layer's current placement once written into its
    /// transform options. A layer without a transform entry sits at the surface
    /// origin, which is a translate of minus the surface center.
    pub fn effective(config: &EffectsConfig, surface: SurfaceSize) -> ResolvedTransform {
        match &config.transform {
            Some(t) => t.resolved(),
            None => {
                let c = surface.center();
                ResolvedTransform {
                    scale_x: 1.0,
                    scale_y: 1.0,
                    translate_x: -c.x,
                    translate_y: -c.y,
                    rotate: 0.0,
                }
            }
        }
    }
}

impl LayerEffect for TransformEffect {
    fn id(&self) -> EffectId {
        EffectId::Transform
    }

    fn apply(&self, config: &EffectsConfig, ctx: &mut dyn DrawContext) -> Undo {
        let t = config.transform.clone().unwrap_or_default().resolved();
        let depth = ctx.depth();
        ctx.save();
        ctx.translate(ctx.size().center());
        ctx.translate(Vec2::new(t.translate_x, t.translate_y));
        ctx.rotate(t.rotate);
        ctx.scale(t.scale_x, t.scale_y);
        Box::new(move |ctx: &mut dyn DrawContext| ctx.restore_to(depth))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transform.rs"]
mod tests;
