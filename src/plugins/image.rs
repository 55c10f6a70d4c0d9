//! Raster image layers.
//!
//! Compute reads the file named by `options.src` and decodes it to premultiplied RGBA8.
//! Drawing centers the picture on the local origin, scaled so its longer side spans the
//! surface's shorter side.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;

use crate::{
    foundation::core::{Rect, SurfaceSize},
    foundation::error::{LayerkitError, LayerkitResult},
    layers::model::LayerKind,
    plugins::{ComputedResult, LayerPlugin},
    render::context::DrawContext,
    transform::bbox::BBox,
};

#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ImagePlugin;

pub fn decode_image(bytes: &[u8]) -> LayerkitResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

/// Destination rectangle for an image of `width` x `height` on `surface`.
pub fn fitted_rect(width: u32, height: u32, surface: SurfaceSize) -> Option<Rect> {
    let max_side = f64::from(width.max(height));
    if max_side <= 0.0 {
        return None;
    }
    let (sw, sh) = surface.as_f64();
    let scale = sw.min(sh) / max_side;
    let w = f64::from(width) * scale;
    let h = f64::from(height) * scale;
    Some(Rect::new(-w / 2.0, -h / 2.0, w / 2.0, h / 2.0))
}

fn source_path(options: &serde_json::Value) -> LayerkitResult<PathBuf> {
    let src = options
        .get("src")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| LayerkitError::compute(LayerKind::Image.as_str(), "missing 'src'"))?;
    Ok(PathBuf::from(src.strip_prefix("file://").unwrap_or(src)))
}

fn prepared(computed: Option<&ComputedResult>) -> Option<&PreparedImage> {
    computed.and_then(|c| c.downcast::<PreparedImage>())
}

#[async_trait::async_trait]
impl LayerPlugin for ImagePlugin {
    fn kind(&self) -> LayerKind {
        LayerKind::Image
    }

    fn has_compute(&self) -> bool {
        true
    }

    async fn compute(&self, options: &serde_json::Value) -> LayerkitResult<ComputedResult> {
        let path = source_path(options)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| LayerkitError::compute("image", format!("read '{}': {e}", path.display())))?;
        let image = tokio::task::spawn_blocking(move || decode_image(&bytes))
            .await
            .map_err(|e| LayerkitError::compute("image", format!("decode task failed: {e}")))?
            .map_err(|e| LayerkitError::compute("image", e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            width = image.width,
            height = image.height,
            "decoded image"
        );
        Ok(ComputedResult::new(image).with_cleanup(move |computed| {
            if let Ok(image) = computed.downcast::<PreparedImage>() {
                tracing::debug!(
                    width = image.width,
                    height = image.height,
                    "released decoded image"
                );
            }
        }))
    }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        _options: &serde_json::Value,
        computed: Option<&ComputedResult>,
    ) -> LayerkitResult<()> {
        let Some(image) = prepared(computed) else {
            return Ok(());
        };
        match fitted_rect(image.width, image.height, ctx.size()) {
            Some(dest) => ctx.draw_image(image, dest),
            None => Ok(()),
        }
    }

    fn bbox(
        &self,
        ctx: &dyn DrawContext,
        _options: &serde_json::Value,
        computed: Option<&ComputedResult>,
    ) -> Option<BBox> {
        let image = prepared(computed)?;
        fitted_rect(image.width, image.height, ctx.size())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugins/image.rs"]
mod tests;
