//! Per-kind drawing collaborators.
//!
//! A plugin draws a layer into a [`DrawContext`], may run an asynchronous compute step
//! whose result is memoized by the compute cache, and may report a local bounding box
//! for hit-testing. The registry is an immutable table built once and shared by
//! reference.

use std::{any::Any, collections::HashMap, future::Future, pin::Pin, sync::Arc};

use crate::{
    foundation::error::{LayerkitError, LayerkitResult},
    layers::model::LayerKind,
    render::context::DrawContext,
    transform::bbox::BBox,
};

pub mod fill;
pub mod image;

/// Type-erased artifact produced by a plugin compute step.
pub type Computed = Arc<dyn Any + Send + Sync>;

pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type Cleanup = Box<dyn FnOnce(Computed) -> BoxFuture<()> + Send + Sync>;

/// A computed artifact plus the cleanup to run when it is evicted.
pub struct ComputedResult {
    pub computed: Computed,
    cleanup: Option<Cleanup>,
}

impl std::fmt::Debug for ComputedResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputedResult")
            .field("has_cleanup", &self.cleanup.is_some())
            .finish_non_exhaustive()
    }
}

impl ComputedResult {
    pub fn new<T: Any + Send + Sync>(computed: T) -> Self {
        Self {
            computed: Arc::new(computed),
            cleanup: None,
        }
    }

    /// Attach a synchronous cleanup.
    pub fn with_cleanup(mut self, f: impl FnOnce(Computed) + Send + Sync + 'static) -> Self {
        self.cleanup = Some(Box::new(move |c: Computed| -> BoxFuture<()> {
            f(c);
            Box::pin(async {})
        }));
        self
    }

    /// Attach an asynchronous cleanup.
    pub fn with_async_cleanup<F, Fut>(mut self, f: F) -> Self
    where
        F: FnOnce(Computed) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.cleanup = Some(Box::new(move |c: Computed| -> BoxFuture<()> {
            Box::pin(f(c))
        }));
        self
    }

    pub fn has_cleanup(&self) -> bool {
        self.cleanup.is_some()
    }

    /// Consume the result, running its cleanup (if any) to completion.
    pub async fn run_cleanup(self) {
        if let Some(cleanup) = self.cleanup {
            cleanup(self.computed).await;
        }
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.computed.downcast_ref::<T>()
    }
}

#[async_trait::async_trait]
pub trait LayerPlugin: Send + Sync {
    fn kind(&self) -> LayerKind;

    /// Whether layers of this kind need a compute step before drawing.
    fn has_compute(&self) -> bool {
        false
    }

    async fn compute(&self, options: &serde_json::Value) -> LayerkitResult<ComputedResult> {
        let _ = options;
        Err(LayerkitError::compute(
            self.kind().as_str(),
            "plugin has no compute step",
        ))
    }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        options: &serde_json::Value,
        computed: Option<&ComputedResult>,
    ) -> LayerkitResult<()>;

    /// Local-space bounding box, before any effect transform. `None` opts the layer
    /// out of hit-testing.
    fn bbox(
        &self,
        ctx: &dyn DrawContext,
        options: &serde_json::Value,
        computed: Option<&ComputedResult>,
    ) -> Option<BBox> {
        let _ = (ctx, options, computed);
        None
    }
}

#[derive(Clone, Default)]
pub struct PluginRegistry {
    plugins: HashMap<LayerKind, Arc<dyn LayerPlugin>>,
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.plugins.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("PluginRegistry").field("kinds", &kinds).finish()
    }
}

impl PluginRegistry {
    /// `fill` and `image`; `text` is left to the host.
    pub fn builtin() -> Self {
        Self::default()
            .with_plugin(Arc::new(fill::FillPlugin))
            .with_plugin(Arc::new(image::ImagePlugin))
    }

    pub fn with_plugin(mut self, plugin: Arc<dyn LayerPlugin>) -> Self {
        self.plugins.insert(plugin.kind(), plugin);
        self
    }

    pub fn get(&self, kind: LayerKind) -> LayerkitResult<&Arc<dyn LayerPlugin>> {
        self.plugins
            .get(&kind)
            .ok_or_else(|| LayerkitError::unknown_kind(kind.as_str()))
    }

    pub fn contains(&self, kind: LayerKind) -> bool {
        self.plugins.contains_key(&kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plugins/mod.rs"]
mod tests;
