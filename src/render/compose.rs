use crate::{
    cache::computed::ComputeCache,
    effects::pipeline::EffectPipeline,
    foundation::core::SurfaceSize,
    foundation::error::LayerkitResult,
    layers::model::Layer,
    plugins::PluginRegistry,
    render::{FrameRGBA, context::DrawContext, raster::RasterContext},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    pub drawn: usize,
    /// Layers whose compute result was not available yet.
    pub skipped: usize,
}

/// Draw `layers` back to front into `ctx`, each inside its effects.
///
/// Index 0 is drawn last and ends up on top. A layer whose kind needs a compute result
/// that the cache does not hold yet is skipped, so one slow compute never blocks the
/// rest of the frame.
#[tracing::instrument(skip_all, fields(layers = layers.len()))]
pub fn draw_layers(
    layers: &[Layer],
    plugins: &PluginRegistry,
    pipeline: &EffectPipeline,
    cache: &ComputeCache,
    ctx: &mut dyn DrawContext,
) -> LayerkitResult<PassStats> {
    let mut stats = PassStats::default();
    for layer in layers.iter().rev() {
        let plugin = plugins.get(layer.kind)?;
        let computed = cache.get_for(layer);
        if plugin.has_compute() && computed.is_none() {
            tracing::debug!(layer = %layer.id, kind = %layer.kind, "skipping layer awaiting compute");
            stats.skipped += 1;
            continue;
        }
        pipeline.apply(&layer.effects_config, &mut *ctx, |ctx| {
            plugin.draw(ctx, &layer.options, computed)
        })?;
        stats.drawn += 1;
    }
    Ok(stats)
}

/// Render `layers` onto a fresh transparent surface.
pub fn render_frame(
    layers: &[Layer],
    plugins: &PluginRegistry,
    pipeline: &EffectPipeline,
    cache: &ComputeCache,
    size: SurfaceSize,
) -> LayerkitResult<FrameRGBA> {
    let mut ctx = RasterContext::new(size)?;
    let stats = draw_layers(layers, plugins, pipeline, cache, &mut ctx)?;
    tracing::debug!(drawn = stats.drawn, skipped = stats.skipped, "rendered frame");
    Ok(ctx.finish())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
