use crate::{
    effects::{
        config::{EffectId, EffectsConfig},
        pipeline::{LayerEffect, Undo},
    },
    render::context::DrawContext,
};

/// Passes `filter` through to the drawing surface. No coordinate change.
#[derive(Clone, Copy, Debug, Default)]
pub struct FilterEffect;

impl LayerEffect for FilterEffect {
    fn id(&self) -> EffectId {
        EffectId::Filter
    }

    fn apply(&self, config: &EffectsConfig, ctx: &mut dyn DrawContext) -> Undo {
        let filter = config
            .filter
            .as_ref()
            .and_then(|f| f.filter.as_deref())
            .unwrap_or("");
        let depth = ctx.depth();
        ctx.save();
        ctx.set_filter(filter);
        Box::new(move |ctx: &mut dyn DrawContext| ctx.restore_to(depth))
    }
}

/// Net opacity requested by a CSS-like filter string.
///
/// Only `opacity(<number>)` and `opacity(<percent>)` are honoured; they multiply.
/// Other functions are skipped with a warning, and a malformed tail stops parsing.
pub fn filter_opacity(filter: &str) -> f64 {
    let mut opacity = 1.0;
    let mut rest = filter.trim();
    if rest.is_empty() || rest == "none" {
        return opacity;
    }

    while !rest.is_empty() {
        let Some(open) = rest.find('(') else {
            tracing::warn!(filter, "malformed filter");
            break;
        };
        let Some(close) = rest[open..].find(')').map(|i| open + i) else {
            tracing::warn!(filter, "unterminated filter function");
            break;
        };
        let name = rest[..open].trim();
        let arg = rest[open + 1..close].trim();
        match name {
            "opacity" => match parse_amount(arg) {
                Some(v) => opacity *= v,
                None => tracing::warn!(arg, "ignoring invalid opacity amount"),
            },
            _ => tracing::warn!(function = name, "unsupported filter function ignored"),
        }
        rest = rest[close + 1..].trim_start();
    }
    opacity
}

fn parse_amount(arg: &str) -> Option<f64> {
    let v = match arg.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => arg.parse::<f64>().ok()?,
    };
    v.is_finite().then(|| v.clamp(0.0, 1.0))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
