//! layerkit is the editing core of a small layered raster image editor.
//!
//! A document is an ordered list of [`Layer`]s. Each layer is drawn by a plugin for its
//! [`LayerKind`] inside a fixed-order effect pipeline, and the same pipeline answers
//! coordinate queries for hit-testing and drag gestures:
//!
//! - [`ComputeCache`] memoizes asynchronous per-layer compute results
//! - [`EffectPipeline`] applies reversible effects and extracts layer transforms
//! - [`HitTester`] and [`GestureController`] turn pointer events into layer edits
//! - [`UndoableStore`] keeps bounded undo/redo history
//! - [`Editor`] wires them into one session a host UI can drive
#![forbid(unsafe_code)]

mod foundation;

pub mod cache;
pub mod effects;
pub mod history;
pub mod interact;
pub mod layers;
pub mod plugins;
pub mod render;
pub mod session;
pub mod transform;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::config::{DEFAULT_MAX_HISTORY, EditorConfig};
pub use crate::foundation::core::{Affine, Point, Rect, SurfaceSize, Vec2};
pub use crate::foundation::error::{LayerkitError, LayerkitResult};

pub use crate::cache::computed::{ComputeCache, RefreshStats};
pub use crate::effects::config::{EffectId, EffectsConfig, FilterOptions, TransformOptions};
pub use crate::effects::pipeline::{EffectPipeline, LayerEffect};
pub use crate::history::undoable::UndoableStore;
pub use crate::interact::gesture::{GestureController, GestureState};
pub use crate::interact::hit_test::{HitBands, HitTester, Operation, Viewport};
pub use crate::layers::canonical::canonical_form;
pub use crate::layers::model::{Layer, LayerId, LayerKind, Layers};
pub use crate::plugins::{Computed, ComputedResult, LayerPlugin, PluginRegistry};
pub use crate::render::FrameRGBA;
pub use crate::render::context::{DrawContext, DrawState, MeasureContext};
pub use crate::render::raster::RasterContext;
pub use crate::session::editor::{Editor, OverlayQuad, PointerFeedback};
