use crate::{effects::config::EffectsConfig, foundation::error::LayerkitError};

/// Opaque layer identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Closed set of layer kinds. Selects the plugin; never changes after creation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum LayerKind {
    Fill,
    Image,
    Text,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Fill, LayerKind::Image, LayerKind::Text];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Image => "image",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for LayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LayerKind {
    type Err = LayerkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayerKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| LayerkitError::unknown_kind(s))
    }
}

impl TryFrom<String> for LayerKind {
    type Error = LayerkitError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<LayerKind> for String {
    fn from(k: LayerKind) -> Self {
        k.as_str().to_string()
    }
}

/// One addressable visual element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    #[serde(alias = "pluginID")]
    pub kind: LayerKind,
    /// Plugin-specific options; the cache key is derived from their canonical form.
    #[serde(default)]
    pub options: serde_json::Value,
    #[serde(default, skip_serializing_if = "EffectsConfig::is_empty")]
    pub effects_config: EffectsConfig,
}

impl Layer {
    pub fn new(kind: LayerKind, options: serde_json::Value) -> Self {
        Self {
            id: LayerId::generate(),
            kind,
            options,
            effects_config: EffectsConfig::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<LayerId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_effects(mut self, effects_config: EffectsConfig) -> Self {
        self.effects_config = effects_config;
        self
    }
}

/// Ordered layer list; index 0 is topmost (composited last).
pub type Layers = Vec<Layer>;

pub fn find_layer<'a>(layers: &'a [Layer], id: &LayerId) -> Option<&'a Layer> {
    layers.iter().find(|l| &l.id == id)
}

/// New list with `layer` on top.
pub fn insert_top(layers: &[Layer], layer: Layer) -> Layers {
    let mut out = Vec::with_capacity(layers.len() + 1);
    out.push(layer);
    out.extend_from_slice(layers);
    out
}

/// New list with `f` applied to the layer identified by `id`; other layers are cloned as-is.
pub fn map_layer(layers: &[Layer], id: &LayerId, f: impl FnOnce(&mut Layer)) -> Layers {
    let mut f = Some(f);
    layers
        .iter()
        .map(|l| {
            let mut l = l.clone();
            if &l.id == id
                && let Some(f) = f.take()
            {
                f(&mut l);
            }
            l
        })
        .collect()
}

pub fn set_options(layers: &[Layer], id: &LayerId, options: serde_json::Value) -> Layers {
    map_layer(layers, id, |l| l.options = options)
}

pub fn remove_layer(layers: &[Layer], id: &LayerId) -> Layers {
    layers.iter().filter(|l| &l.id != id).cloned().collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layers/model.rs"]
mod tests;
