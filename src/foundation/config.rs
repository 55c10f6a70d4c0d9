use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::SurfaceSize,
    foundation::error::{LayerkitError, LayerkitResult},
    interact::hit_test::HitBands,
};

/// Default bound on the undo stack.
pub const DEFAULT_MAX_HISTORY: usize = 50;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Editor-wide settings. Every field has a default so partial JSON files are accepted.
pub struct EditorConfig {
    /// Size of the rendering surface.
    pub surface: SurfaceSize,
    /// Maximum number of undo states kept; oldest are evicted first.
    pub max_history: usize,
    /// Screen-space thickness of the scale and rotate hit zones.
    pub hit_bands: HitBands,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            surface: SurfaceSize::default(),
            max_history: DEFAULT_MAX_HISTORY,
            hit_bands: HitBands::default(),
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file, apply environment overrides and validate.
    pub fn from_json_file(path: &Path) -> LayerkitResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&text)?;
        let cfg = cfg.with_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Apply `LAYERKIT_*` environment overrides. Unparsable values are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(n) = lookup("LAYERKIT_MAX_HISTORY").and_then(|v| v.parse::<usize>().ok()) {
            self.max_history = n;
        }
        if let Some(b) = lookup("LAYERKIT_SCALE_BAND")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|b| b.is_finite())
        {
            self.hit_bands.scale_band = b;
        }
        if let Some(b) = lookup("LAYERKIT_ROTATE_BAND")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|b| b.is_finite())
        {
            self.hit_bands.rotate_band = b;
        }
        self
    }

    pub fn validate(&self) -> LayerkitResult<()> {
        self.surface.validate()?;
        let HitBands {
            scale_band,
            rotate_band,
        } = self.hit_bands;
        if !scale_band.is_finite() || scale_band < 0.0 {
            return Err(LayerkitError::validation(
                "hit_bands.scale_band must be finite and >= 0",
            ));
        }
        if !rotate_band.is_finite() || rotate_band < 0.0 {
            return Err(LayerkitError::validation(
                "hit_bands.rotate_band must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
