//! Snapshot undo/redo.
//!
//! Edits return whole new timelines, so undo keeps the timelines themselves
//! instead of inverse commands.

use std::collections::VecDeque;

use crate::timeline::Timeline;

/// Undo/redo history of timeline snapshots.
#[derive(Debug, Clone)]
pub struct History {
    /// States before each committed edit (most recent last).
    undo: VecDeque<Timeline>,
    /// States that were undone (most recent last).
    redo: Vec<Timeline>,
    /// Maximum history depth.
    max_depth: usize,
}

impl History {
    /// Create a history keeping at most `max_depth` undo steps.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record the state an edit is about to replace.
    /// A new edit invalidates the redo history.
    pub fn push(&mut self, before: Timeline) {
        self.redo.clear();
        self.undo.push_back(before);
        while self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
    }

    /// State to restore for undo; `current` becomes redoable.
    pub fn undo(&mut self, current: Timeline) -> Option<Timeline> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// State to restore for redo; `current` becomes undoable again.
    pub fn redo(&mut self, current: Timeline) -> Option<Timeline> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(200)
    }
}
