/// Convenience result type used across layerkit.
pub type LayerkitResult<T> = Result<T, LayerkitError>;

/// Top-level error taxonomy used by the editing core.
#[derive(thiserror::Error, Debug)]
pub enum LayerkitError {
    /// Invalid user-provided data (project files, configuration, layer options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A layer kind identifier that no plugin is registered for.
    #[error("unknown layer kind '{0}'")]
    UnknownKind(String),

    /// An effect identifier outside the effect registry.
    #[error("unknown effect '{0}'")]
    UnknownEffect(String),

    /// A plugin compute step failed; the affected layers stay stale.
    #[error("compute error for '{kind}': {message}")]
    Compute {
        /// Layer kind whose compute step failed.
        kind: String,
        /// Failure description (aggregated when several computes failed).
        message: String,
    },

    /// Errors raised by a drawing surface.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerkitError {
    /// Build a [`LayerkitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LayerkitError::UnknownKind`] value.
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind(kind.into())
    }

    /// Build a [`LayerkitError::UnknownEffect`] value.
    pub fn unknown_effect(id: impl Into<String>) -> Self {
        Self::UnknownEffect(id.into())
    }

    /// Build a [`LayerkitError::Compute`] value.
    pub fn compute(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Compute {
            kind: kind.into(),
            message: msg.into(),
        }
    }

    /// Build a [`LayerkitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`LayerkitError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Whether this error signals an identifier the registries do not know.
    pub fn is_unknown_identifier(&self) -> bool {
        matches!(self, Self::UnknownKind(_) | Self::UnknownEffect(_))
    }
}

impl From<serde_json::Error> for LayerkitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
