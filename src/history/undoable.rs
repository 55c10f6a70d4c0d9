//! Bounded undo/redo over whole state values.
//!
//! Every committed edit pushes the previous value onto the undo stack (oldest evicted
//! past `max_history`) and discards the redo stack. There is no redo tree.

use std::collections::VecDeque;

use crate::foundation::config::DEFAULT_MAX_HISTORY;

#[derive(Clone, Debug)]
pub struct UndoableStore<T> {
    current: T,
    undo_stack: VecDeque<T>,
    redo_stack: Vec<T>,
    max_history: usize,
}

impl<T: Default> Default for UndoableStore<T> {
    fn default() -> Self {
        Self::new(T::default(), DEFAULT_MAX_HISTORY)
    }
}

impl<T> UndoableStore<T> {
    pub fn new(initial: T, max_history: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            max_history,
        }
    }

    pub fn state(&self) -> &T {
        &self.current
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    fn push_undo(&mut self, value: T) {
        if self.max_history == 0 {
            return;
        }
        while self.undo_stack.len() >= self.max_history {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(value);
    }

    /// Commit `value` as the new current state.
    pub fn set(&mut self, value: T) {
        let prev = std::mem::replace(&mut self.current, value);
        self.push_undo(prev);
        self.redo_stack.clear();
    }

    /// Commit the value computed from the current state.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.current);
        self.set(next);
    }

    /// Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.undo_stack.pop_back() else {
            return false;
        };
        let replaced = std::mem::replace(&mut self.current, prev);
        self.redo_stack.push(replaced);
        true
    }

    /// Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        let replaced = std::mem::replace(&mut self.current, next);
        self.push_undo(replaced);
        true
    }

    /// Drop both stacks, keeping the current state.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/undoable.rs"]
mod tests;
