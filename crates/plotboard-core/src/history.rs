//! Undo/redo history of committed scene mutations.
//!
//! Every committed mutation is recorded as an invertible `Action`. The
//! history keeps two bounded stacks: `undo`, which drops its oldest entry
//! past the configured depth, and `redo`, which is cleared whenever a new
//! action is recorded — history is linear, there is no branching.
//!
//! The history only decides *which* record to apply; applying it to the
//! item list is the scene's job.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::item::{ItemId, SceneItem};
use crate::transform::TransformOp;

/// One committed, invertible mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Items were added; the payload carries the full instances so undo can
    /// delete them and redo can restore them with identical ids.
    AddItems(Vec<SceneItem>),
    /// Items were deleted; the payload carries the full instances.
    DeleteItems(Vec<SceneItem>),
    /// A transform was committed against the listed items.
    TransformItems { ids: Vec<ItemId>, op: TransformOp },
    /// Items were locked. Inverse of `UnlockItems`: the pair is
    /// deliberately asymmetric — undoing a lock unconditionally unlocks,
    /// without restoring any earlier per-item locked flag.
    LockItems(Vec<ItemId>),
    /// Items were unlocked.
    UnlockItems(Vec<ItemId>),
    /// The draw order changed. Carries full ordering snapshots rather than
    /// a computed permutation; the inverse simply swaps them.
    Rearrange {
        before: Vec<ItemId>,
        after: Vec<ItemId>,
    },
}

impl Action {
    /// The action that exactly reverses this one.
    pub fn inverse(&self) -> Action {
        match self {
            Action::AddItems(items) => Action::DeleteItems(items.clone()),
            Action::DeleteItems(items) => Action::AddItems(items.clone()),
            Action::TransformItems { ids, op } => Action::TransformItems {
                ids: ids.clone(),
                op: op.inverse(),
            },
            Action::LockItems(ids) => Action::UnlockItems(ids.clone()),
            Action::UnlockItems(ids) => Action::LockItems(ids.clone()),
            Action::Rearrange { before, after } => Action::Rearrange {
                before: after.clone(),
                after: before.clone(),
            },
        }
    }
}

/// Bounded linear undo/redo stacks.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Action>,
    redo: Vec<Action>,
    max_depth: usize,
}

impl History {
    /// Create a history bounded to `max_depth` undoable actions.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Whether an undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether a redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Record a committed action. Clears the redo stack and drops the
    /// oldest record past the depth bound.
    pub fn record(&mut self, action: Action) {
        log::debug!("history: record {action:?}");
        self.redo.clear();
        self.undo.push_back(action);
        if self.undo.len() > self.max_depth {
            self.undo.pop_front();
        }
    }

    pub fn record_add(&mut self, items: Vec<SceneItem>) {
        self.record(Action::AddItems(items));
    }

    pub fn record_delete(&mut self, items: Vec<SceneItem>) {
        self.record(Action::DeleteItems(items));
    }

    pub fn record_transform(&mut self, ids: Vec<ItemId>, op: TransformOp) {
        self.record(Action::TransformItems { ids, op });
    }

    pub fn record_lock(&mut self, ids: Vec<ItemId>) {
        self.record(Action::LockItems(ids));
    }

    pub fn record_unlock(&mut self, ids: Vec<ItemId>) {
        self.record(Action::UnlockItems(ids));
    }

    pub fn record_rearrange(&mut self, before: Vec<ItemId>, after: Vec<ItemId>) {
        self.record(Action::Rearrange { before, after });
    }

    /// Pop the most recent action onto the redo stack and return its
    /// inverse, which the caller applies.
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.undo.pop_back()?;
        let inverse = action.inverse();
        self.redo.push(action);
        log::debug!("history: undo -> {inverse:?}");
        Some(inverse)
    }

    /// Pop the most recent undone action back onto the undo stack and
    /// return it unchanged, which the caller applies. Does not clear the
    /// redo stack again.
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.redo.pop()?;
        self.undo.push_back(action.clone());
        log::debug!("history: redo -> {action:?}");
        Some(action)
    }
}
