//! The editing session a host UI drives.
//!
//! Wires the layer list history, the compute cache, the effect pipeline, hit-testing
//! and the gesture controller together. Every layer edit is committed through the
//! undo store and produces a new list value.

use crate::{
    cache::computed::{ComputeCache, RefreshStats},
    effects::{
        config::{EffectsConfig, TransformOptions},
        pipeline::EffectPipeline,
    },
    foundation::config::EditorConfig,
    foundation::core::Point,
    foundation::error::{LayerkitError, LayerkitResult},
    history::undoable::UndoableStore,
    interact::{
        gesture::GestureController,
        hit_test::{Hit, HitTester, LayerGeometry, Operation, Viewport},
    },
    layers::model::{self, Layer, LayerId, LayerKind, Layers},
    plugins::PluginRegistry,
    render::{FrameRGBA, compose},
};

/// Hover feedback for one pointer move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerFeedback {
    pub operation: Operation,
    pub hovered: Option<LayerId>,
    /// Whether the move committed a layer edit.
    pub edited: bool,
}

impl PointerFeedback {
    pub fn cursor(&self) -> &'static str {
        self.operation.cursor()
    }
}

/// Selection outline for the overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayQuad {
    pub layer: LayerId,
    pub corners: [Point; 4],
    pub selected: bool,
}

#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    plugins: PluginRegistry,
    pipeline: EffectPipeline,
    cache: ComputeCache,
    history: UndoableStore<Layers>,
    selected: Option<LayerId>,
    hovered: Option<Hit>,
    gesture: GestureController,
    viewport: Viewport,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_plugins(config, PluginRegistry::builtin())
    }

    pub fn with_plugins(config: EditorConfig, plugins: PluginRegistry) -> Self {
        let history = UndoableStore::new(Layers::new(), config.max_history);
        Self {
            config,
            plugins,
            pipeline: EffectPipeline::builtin(),
            cache: ComputeCache::new(),
            history,
            selected: None,
            hovered: None,
            gesture: GestureController::new(),
            viewport: Viewport::default(),
        }
    }

    /// Replace the layer list without recording history (project load).
    pub fn load(&mut self, layers: Layers) -> LayerkitResult<()> {
        for layer in &layers {
            self.plugins.get(layer.kind)?;
        }
        self.gesture.cancel();
        self.selected = None;
        self.hovered = None;
        self.history = UndoableStore::new(layers, self.config.max_history);
        Ok(())
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn plugins(&self) -> &PluginRegistry {
        &self.plugins
    }

    pub fn pipeline(&self) -> &EffectPipeline {
        &self.pipeline
    }

    pub fn cache(&self) -> &ComputeCache {
        &self.cache
    }

    pub fn layers(&self) -> &[Layer] {
        self.history.state()
    }

    pub fn selected(&self) -> Option<&LayerId> {
        self.selected.as_ref()
    }

    pub fn hovered(&self) -> Option<&Hit> {
        self.hovered.as_ref()
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn select(&mut self, id: Option<LayerId>) {
        self.selected = id.filter(|id| model::find_layer(self.layers(), id).is_some());
    }

    fn require(&self, id: &LayerId) -> LayerkitResult<&Layer> {
        model::find_layer(self.layers(), id)
            .ok_or_else(|| LayerkitError::validation(format!("no layer with id '{id}'")))
    }

    /// Insert `layer` on top and select it.
    ///
    /// Image and text layers without a transform entry get a default one, which centers
    /// them on the surface.
    pub fn add_layer(&mut self, mut layer: Layer) -> LayerkitResult<LayerId> {
        self.plugins.get(layer.kind)?;
        if model::find_layer(self.layers(), &layer.id).is_some() {
            return Err(LayerkitError::validation(format!(
                "duplicate layer id '{}'",
                layer.id
            )));
        }
        if layer.kind != LayerKind::Fill && layer.effects_config.transform.is_none() {
            layer.effects_config.transform = Some(TransformOptions::default());
        }
        let id = layer.id.clone();
        self.history.update(|layers| model::insert_top(layers, layer));
        self.selected = Some(id.clone());
        Ok(id)
    }

    pub fn set_layer_options(&mut self, id: &LayerId, options: serde_json::Value) -> LayerkitResult<()> {
        self.require(id)?;
        self.history
            .update(|layers| model::set_options(layers, id, options));
        Ok(())
    }

    pub fn set_layer_effects(&mut self, id: &LayerId, effects: EffectsConfig) -> LayerkitResult<()> {
        self.require(id)?;
        self.history
            .update(|layers| model::map_layer(layers, id, |l| l.effects_config = effects));
        Ok(())
    }

    pub fn remove_layer(&mut self, id: &LayerId) -> LayerkitResult<()> {
        self.require(id)?;
        self.history.update(|layers| model::remove_layer(layers, id));
        self.forget_missing();
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        self.gesture.cancel();
        let changed = self.history.undo();
        self.forget_missing();
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.gesture.cancel();
        let changed = self.history.redo();
        self.forget_missing();
        changed
    }

    fn forget_missing(&mut self) {
        let layers = self.history.state();
        if let Some(id) = &self.selected
            && model::find_layer(layers, id).is_none()
        {
            self.selected = None;
        }
        if let Some(hit) = &self.hovered
            && model::find_layer(layers, &hit.layer).is_none()
        {
            self.hovered = None;
        }
    }

    pub fn hit_tester(&self) -> HitTester<'_> {
        HitTester {
            plugins: &self.plugins,
            pipeline: &self.pipeline,
            cache: &self.cache,
            surface: self.config.surface,
            view: self.viewport.to_screen(),
            bands: self.config.hit_bands,
        }
    }

    pub fn geometry(&self, id: &LayerId) -> LayerkitResult<LayerGeometry> {
        self.hit_tester().measure(self.require(id)?)
    }

    /// Start a drag on the selected layer, or select the topmost layer under `screen`.
    pub fn pointer_down(&mut self, screen: Point) -> LayerkitResult<Operation> {
        let tester = HitTester {
            plugins: &self.plugins,
            pipeline: &self.pipeline,
            cache: &self.cache,
            surface: self.config.surface,
            view: self.viewport.to_screen(),
            bands: self.config.hit_bands,
        };
        let layers = self.history.state();
        let op = self
            .gesture
            .pointer_down(layers, self.selected.as_ref(), screen, &tester)?;
        if op == Operation::None {
            let hit = tester.resolve(layers, self.selected.as_ref(), screen)?;
            self.selected = hit.map(|h| h.layer);
        }
        Ok(op)
    }

    /// Apply the active drag, or refresh hover state when idle.
    pub fn pointer_move(&mut self, screen: Point) -> LayerkitResult<PointerFeedback> {
        if let Some(drag) = self.gesture.drag() {
            let operation = drag.operation;
            let target = drag.target.clone();
            let edited = match self.gesture.pointer_move(self.history.state(), screen) {
                Some(next) if next != *self.history.state() => {
                    self.history.set(next);
                    true
                }
                _ => false,
            };
            return Ok(PointerFeedback {
                operation,
                hovered: Some(target),
                edited,
            });
        }

        let hit = self
            .hit_tester()
            .resolve(self.layers(), self.selected.as_ref(), screen)?;
        let feedback = PointerFeedback {
            operation: hit.as_ref().map_or(Operation::None, |h| h.operation),
            hovered: hit.as_ref().map(|h| h.layer.clone()),
            edited: false,
        };
        self.hovered = hit;
        Ok(feedback)
    }

    pub fn pointer_up(&mut self) {
        self.gesture.pointer_up();
    }

    /// Pointer capture lost.
    pub fn cancel_gesture(&mut self) {
        self.gesture.cancel();
    }

    /// Outlines for the selected and hovered layers, selected first.
    pub fn overlay(&self) -> LayerkitResult<Vec<OverlayQuad>> {
        let mut out = Vec::new();
        let hovered = self.hovered.as_ref().map(|h| &h.layer);
        for (id, selected) in [(self.selected.as_ref(), true), (hovered, false)] {
            let Some(id) = id else { continue };
            if out.iter().any(|q: &OverlayQuad| &q.layer == id) {
                continue;
            }
            let Some(layer) = model::find_layer(self.layers(), id) else {
                continue;
            };
            if let Some(corners) = self.hit_tester().measure(layer)?.overlay_quad() {
                out.push(OverlayQuad {
                    layer: id.clone(),
                    corners,
                    selected,
                });
            }
        }
        Ok(out)
    }

    /// Whether some layer is still waiting for its compute result.
    pub fn is_computing(&self) -> LayerkitResult<bool> {
        self.cache.is_stale(self.history.state(), &self.plugins)
    }

    /// Run pending computes for the current layer list.
    pub async fn refresh(&mut self) -> LayerkitResult<RefreshStats> {
        self.cache
            .refresh_stale(self.history.state(), &self.plugins)
            .await
    }

    /// Render the current layers; layers still computing are left out.
    pub fn render(&self) -> LayerkitResult<FrameRGBA> {
        compose::render_frame(
            self.layers(),
            &self.plugins,
            &self.pipeline,
            &self.cache,
            self.config.surface,
        )
    }

    /// Evict every cached artifact and run its cleanup.
    pub async fn shutdown(&mut self) {
        let evicted = self.cache.clear().await;
        tracing::debug!(evicted, "editor shut down");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
