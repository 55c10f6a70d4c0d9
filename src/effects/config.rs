use std::collections::BTreeMap;

use serde::Deserialize as _;

use crate::foundation::error::LayerkitError;

/// Identifiers of the closed effect set, in registry (application) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EffectId {
    Transform,
    Filter,
}

impl EffectId {
    /// Fixed application order. Effects do not commute, so this order is part of the contract.
    pub const ALL: [EffectId; 2] = [EffectId::Transform, EffectId::Filter];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::Filter => "filter",
        }
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EffectId {
    type Err = LayerkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LayerkitError::unknown_effect(s))
    }
}

/// Partial options of the `transform` effect. Missing or malformed fields fall back to
/// identity values when the effect is applied.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub translate_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub translate_y: Option<f64>,
    /// Rotation in radians.
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

/// Fully defaulted transform parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotate: f64,
}

impl TransformOptions {
    pub fn resolved(&self) -> ResolvedTransform {
        fn or(v: Option<f64>, default: f64) -> f64 {
            v.filter(|n| n.is_finite()).unwrap_or(default)
        }

        ResolvedTransform {
            scale_x: or(self.scale_x, 1.0),
            scale_y: or(self.scale_y, 1.0),
            translate_x: or(self.translate_x, 0.0),
            translate_y: or(self.translate_y, 0.0),
            rotate: or(self.rotate, 0.0),
        }
    }
}

/// Partial options of the `filter` effect: an opaque filter string for the drawing surface.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterOptions {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Per-layer effect configuration, keyed by [`EffectId`].
///
/// Field order here is irrelevant; application always follows [`EffectId::ALL`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, serde_json::Value>")]
pub struct EffectsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<TransformOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterOptions>,
}

impl EffectsConfig {
    pub fn is_empty(&self) -> bool {
        self.transform.is_none() && self.filter.is_none()
    }

    pub fn configured(&self, id: EffectId) -> bool {
        match id {
            EffectId::Transform => self.transform.is_some(),
            EffectId::Filter => self.filter.is_some(),
        }
    }

    pub fn with_transform(mut self, transform: TransformOptions) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(FilterOptions {
            filter: Some(filter.into()),
        });
        self
    }

    /// The transform options, inserting an empty record when absent.
    pub fn transform_mut(&mut self) -> &mut TransformOptions {
        self.transform.get_or_insert_with(TransformOptions::default)
    }
}

impl TryFrom<BTreeMap<String, serde_json::Value>> for EffectsConfig {
    type Error = LayerkitError;

    fn try_from(raw: BTreeMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut out = EffectsConfig::default();
        for (key, value) in raw {
            if value.is_null() {
                key.parse::<EffectId>()?;
                continue;
            }
            match key.parse::<EffectId>()? {
                // Options are edited live; a malformed record degrades to defaults.
                EffectId::Transform => {
                    out.transform = Some(serde_json::from_value(value).unwrap_or_default());
                }
                EffectId::Filter => {
                    out.filter = Some(serde_json::from_value(value).unwrap_or_default());
                }
            }
        }
        Ok(out)
    }
}

fn lenient_f64<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    let n = match &v {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(n.filter(|n| n.is_finite()))
}

fn lenient_string<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(v.as_str().map(str::to_string))
}

#[cfg(test)]
#[path = "../../tests/unit/effects/config.rs"]
mod tests;
