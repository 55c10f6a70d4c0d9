use crate::{
    foundation::color::Rgba8,
    foundation::core::Rect,
    foundation::error::LayerkitResult,
    layers::model::LayerKind,
    plugins::{ComputedResult, LayerPlugin},
    render::context::DrawContext,
};

/// Flood-fills the whole surface with `options.fillStyle`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FillPlugin;

/// Color named by `fillStyle`. Unparsable or missing values keep the context's current
/// fill, the way a canvas ignores an invalid `fillStyle` assignment.
pub fn fill_style(options: &serde_json::Value) -> Option<Rgba8> {
    let raw = options.get("fillStyle")?.as_str()?;
    match Rgba8::parse_css(raw) {
        Ok(c) => Some(c),
        Err(err) => {
            tracing::warn!(fill_style = raw, %err, "ignoring fill style");
            None
        }
    }
}

#[async_trait::async_trait]
impl LayerPlugin for FillPlugin {
    fn kind(&self) -> LayerKind {
        LayerKind::Fill
    }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        options: &serde_json::Value,
        _computed: Option<&ComputedResult>,
    ) -> LayerkitResult<()> {
        if let Some(color) = fill_style(options) {
            ctx.set_fill(color);
        }
        let (w, h) = ctx.size().as_f64();
        ctx.fill_rect(Rect::new(0.0, 0.0, w, h))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugins/fill.rs"]
mod tests;
