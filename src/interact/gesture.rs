//! Pointer drag state machine.
//!
//! `Idle -> Dragging -> Idle`. Every move recomputes the edited parameters from the
//! snapshot taken at pointer-down plus the total pointer delta, never from the previous
//! frame, so long drags do not drift.

use crate::{
    effects::{
        config::{ResolvedTransform, TransformOptions},
        transform::TransformEffect,
    },
    foundation::core::{Affine, Point, Vec2},
    foundation::error::LayerkitResult,
    interact::hit_test::{HitTester, Operation, classify},
    layers::model::{Layer, LayerId, Layers, find_layer, map_layer},
    transform::{
        affine::{apply_point, apply_vector, checked_inverse},
        bbox,
        linear::{self, DEGENERATE_LEN},
    },
};

/// Lower bound for the scale factor of one gesture; keeps the layer invertible.
pub const MIN_SCALE_FACTOR: f64 = 1e-3;

#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub operation: Operation,
    /// Screen position of the pointer-down.
    pub start_pointer: Point,
    pub target: LayerId,
    pub initial_translate: Vec2,
    pub initial_rotate: f64,
    pub initial_scale: Vec2,
    /// Inverse of the full layer transform at pointer-down.
    screen_to_local: Affine,
    /// Inverse of the frame the translate parameters live in.
    screen_to_parent: Affine,
    local_center: Point,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragState),
}

/// One frame's change to the target's transform parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformEdit {
    Translate(Vec2),
    Scale(Vec2),
    Rotate(f64),
}

#[derive(Clone, Debug, Default)]
pub struct GestureController {
    state: GestureState,
}

/// Uniform factor for dragging `start` to `current` relative to `center`.
///
/// The pointer delta is projected onto the center-to-start direction and measured in
/// units of the start distance. `None` when the start sits on the center.
pub fn scale_factor(center: Point, start: Point, current: Point) -> Option<f64> {
    let dir = linear::subtract(start, center);
    let dist = linear::length(dir);
    if !dist.is_finite() || dist < DEGENERATE_LEN {
        return None;
    }
    let unit = Vec2::new(dir.x / dist, dir.y / dist);
    let projected = linear::dot(linear::subtract(current, start), unit);
    let factor = 1.0 + projected / dist;
    factor.is_finite().then(|| factor.max(MIN_SCALE_FACTOR))
}

/// Signed angle swept from `start` to `current` around `center`.
pub fn rotation_delta(center: Point, start: Point, current: Point) -> Option<f64> {
    let a = linear::normalize(linear::subtract(start, center))?;
    let b = linear::normalize(linear::subtract(current, center))?;
    let angle = linear::signed_angle(a, b);
    angle.is_finite().then_some(angle)
}

impl DragState {
    /// Edit for the pointer at `screen`, or `None` for a degenerate frame.
    pub fn edit_at(&self, screen: Point) -> Option<TransformEdit> {
        match self.operation {
            Operation::None => None,
            Operation::Move => {
                let delta = apply_vector(self.screen_to_parent, screen - self.start_pointer);
                let t = self.initial_translate + delta;
                (t.x.is_finite() && t.y.is_finite()).then_some(TransformEdit::Translate(t))
            }
            Operation::Scale => {
                let factor = scale_factor(
                    self.local_center,
                    apply_point(self.screen_to_local, self.start_pointer),
                    apply_point(self.screen_to_local, screen),
                )?;
                Some(TransformEdit::Scale(self.initial_scale * factor))
            }
            Operation::Rotate => {
                let delta = rotation_delta(
                    self.local_center,
                    apply_point(self.screen_to_local, self.start_pointer),
                    apply_point(self.screen_to_local, screen),
                )?;
                Some(TransformEdit::Rotate(self.initial_rotate + delta))
            }
        }
    }

    fn snapshot(&self) -> ResolvedTransform {
        ResolvedTransform {
            scale_x: self.initial_scale.x,
            scale_y: self.initial_scale.y,
            translate_x: self.initial_translate.x,
            translate_y: self.initial_translate.y,
            rotate: self.initial_rotate,
        }
    }

    /// Write `edit` into `layer`'s transform options.
    pub fn apply_edit(&self, layer: &mut Layer, edit: TransformEdit) {
        if layer.effects_config.transform.is_none() {
            // No transform entry at pointer-down: seed one that keeps the placement.
            let s = self.snapshot();
            layer.effects_config.transform = Some(TransformOptions {
                scale_x: Some(s.scale_x),
                scale_y: Some(s.scale_y),
                translate_x: Some(s.translate_x),
                translate_y: Some(s.translate_y),
                rotate: Some(s.rotate),
            });
        }
        let t = layer.effects_config.transform_mut();
        match edit {
            TransformEdit::Translate(v) => {
                t.translate_x = Some(v.x);
                t.translate_y = Some(v.y);
            }
            TransformEdit::Scale(s) => {
                t.scale_x = Some(s.x);
                t.scale_y = Some(s.y);
            }
            TransformEdit::Rotate(r) => t.rotate = Some(r),
        }
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn drag(&self) -> Option<&DragState> {
        match &self.state {
            GestureState::Dragging(d) => Some(d),
            GestureState::Idle => None,
        }
    }

    /// Start a drag if `screen` falls in a zone of the selected layer.
    ///
    /// Returns the operation started, [`Operation::None`] when nothing started. Only the
    /// already-selected layer is considered.
    pub fn pointer_down(
        &mut self,
        layers: &[Layer],
        selected: Option<&LayerId>,
        screen: Point,
        tester: &HitTester<'_>,
    ) -> LayerkitResult<Operation> {
        if let Some(d) = self.drag() {
            return Ok(d.operation);
        }
        let Some(layer) = selected.and_then(|id| find_layer(layers, id)) else {
            return Ok(Operation::None);
        };
        let geom = tester.measure(layer)?;
        let (Some(local_bbox), Some(screen_to_local), Some(screen_to_parent)) = (
            geom.bbox,
            geom.to_local(),
            checked_inverse(tester.view),
        ) else {
            return Ok(Operation::None);
        };

        let operation = classify(
            apply_point(screen_to_local, screen),
            local_bbox,
            tester.bands,
            screen_to_local,
        );
        if operation == Operation::None {
            return Ok(Operation::None);
        }

        let initial = TransformEffect::effective(&layer.effects_config, tester.surface);
        tracing::debug!(layer = %layer.id, ?operation, "drag started");
        self.state = GestureState::Dragging(DragState {
            operation,
            start_pointer: screen,
            target: layer.id.clone(),
            initial_translate: Vec2::new(initial.translate_x, initial.translate_y),
            initial_rotate: initial.rotate,
            initial_scale: Vec2::new(initial.scale_x, initial.scale_y),
            screen_to_local,
            screen_to_parent,
            local_center: bbox::center(local_bbox),
        });
        Ok(operation)
    }

    /// New layer list for the pointer at `screen`, or `None` when idle, when the target
    /// is gone, or for a degenerate frame.
    pub fn pointer_move(&self, layers: &[Layer], screen: Point) -> Option<Layers> {
        let drag = self.drag()?;
        find_layer(layers, &drag.target)?;
        let edit = drag.edit_at(screen)?;
        Some(map_layer(layers, &drag.target, |layer| {
            drag.apply_edit(layer, edit);
        }))
    }

    pub fn pointer_up(&mut self) {
        if let GestureState::Dragging(d) = std::mem::take(&mut self.state) {
            tracing::debug!(layer = %d.target, operation = ?d.operation, "drag finished");
        }
    }

    /// Pointer capture lost; drop the drag without another edit.
    pub fn cancel(&mut self) {
        if let GestureState::Dragging(d) = std::mem::take(&mut self.state) {
            tracing::debug!(layer = %d.target, "drag cancelled");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/gesture.rs"]
mod tests;
