//! Selection tracking and z-order hit cycling.

use kurbo::Point;

use crate::item::{ItemId, SceneItem};

/// Callback invoked with the selected ids after every selection mutation.
pub type SelectionObserver = Box<dyn FnMut(&[ItemId])>;

/// Ordered set of selected items.
///
/// Insertion order is selection order; the first entry is the primary
/// selection used by single-item operations (rotate). Observers run
/// synchronously on every mutating call.
pub struct Selection {
    ids: Vec<ItemId>,
    observers: Vec<SelectionObserver>,
}

impl std::fmt::Debug for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selection")
            .field("ids", &self.ids)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

fn find<'a>(items: &'a [SceneItem], id: ItemId) -> Option<&'a SceneItem> {
    items.iter().find(|item| item.id == id)
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self {
            ids: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// The selected ids, in selection order.
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    /// The primary selection (first selected), if any.
    pub fn primary(&self) -> Option<ItemId> {
        self.ids.first().copied()
    }

    /// Number of selected items.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether an item is selected.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.ids.contains(&id)
    }

    /// Register a selection-change observer.
    pub fn add_observer(&mut self, observer: SelectionObserver) {
        self.observers.push(observer);
    }

    fn notify(&mut self) {
        let ids = self.ids.clone();
        for observer in &mut self.observers {
            observer(&ids);
        }
    }

    /// Clear the selection.
    pub fn deselect(&mut self) {
        self.ids.clear();
        self.notify();
    }

    /// Replace the selection.
    pub fn set_selected(&mut self, ids: Vec<ItemId>) {
        self.ids = ids;
        self.notify();
    }

    /// Append to the selection, ignoring duplicates.
    pub fn add(&mut self, id: ItemId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
        self.notify();
    }

    /// Drop ids that no longer exist (after a delete or undo).
    pub fn retain_existing(&mut self, items: &[SceneItem]) {
        let before = self.ids.len();
        self.ids.retain(|&id| find(items, id).is_some());
        if self.ids.len() != before {
            self.notify();
        }
    }

    /// Whether the selection can be moved: non-empty, nothing locked, and
    /// every member supports translation.
    pub fn can_move(&self, items: &[SceneItem]) -> bool {
        !self.ids.is_empty()
            && self.ids.iter().all(|&id| {
                find(items, id).is_some_and(|item| !item.locked && item.shape.supports_move())
            })
    }

    /// Whether the selection can be scaled.
    pub fn can_scale(&self, items: &[SceneItem]) -> bool {
        !self.ids.is_empty()
            && self.ids.iter().all(|&id| {
                find(items, id).is_some_and(|item| !item.locked && item.shape.supports_scale())
            })
    }

    /// Whether the selection can be rotated. Rotation is single-item only:
    /// a shared pivot is ambiguous for a multi-selection.
    pub fn can_rotate(&self, items: &[SceneItem]) -> bool {
        let &[id] = &self.ids[..] else {
            return false;
        };
        find(items, id).is_some_and(|item| !item.locked && item.shape.supports_rotation())
    }

    /// Handle a click (a pointer-up with no intervening drag) at a virtual
    /// point, cycling downward through the stack of overlapping hits.
    ///
    /// The hit stack is gathered topmost-drawn-first; locked items are
    /// skipped unless `override_lock`. A click on empty space deselects.
    /// When the primary selection already sits on the bottom-most hit the
    /// click deselects; otherwise the next hit down becomes the selection,
    /// added to it when `multi` is held, replacing it otherwise. Cycling
    /// lets occluded items be reached without a layers UI.
    pub fn handle_click(
        &mut self,
        point: Point,
        items: &[SceneItem],
        multi: bool,
        override_lock: bool,
        tolerance: f64,
    ) {
        let hits: Vec<ItemId> = items
            .iter()
            .rev()
            .filter(|item| (override_lock || !item.locked) && item.hit_test(point, tolerance))
            .map(|item| item.id)
            .collect();

        if hits.is_empty() {
            self.deselect();
            return;
        }

        let current = self.primary().and_then(|p| hits.iter().position(|&h| h == p));
        match current {
            None => {
                if multi {
                    self.add(hits[0]);
                } else {
                    self.set_selected(vec![hits[0]]);
                }
            }
            Some(i) if i + 1 == hits.len() => self.deselect(),
            Some(i) => {
                let next = hits[i + 1];
                if multi {
                    self.add(next);
                } else {
                    self.set_selected(vec![next]);
                }
            }
        }
    }
}
