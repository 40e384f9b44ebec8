//! Selection state: which object ids are currently selected.
//!
//! Selection refers to objects by id only. An id whose object has left the
//! store stays in the set but is inert: it selects nothing visually and is
//! filtered out by [`Selection::present_in`].

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::doc::{ObjectId, ObjectStore};

/// A discrete change to the selection, produced by pointer gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum SelectionChange {
    /// Replace the selection with exactly this id.
    Exclusive(ObjectId),
    /// Empty the selection.
    Clear,
}

impl SelectionChange {
    /// The ids the selection holds after this change.
    #[must_use]
    pub fn ids(self) -> Vec<ObjectId> {
        match self {
            Self::Exclusive(id) => vec![id],
            Self::Clear => Vec::new(),
        }
    }
}

/// Ordered set of selected object ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with `{id}`. Returns whether the set changed.
    pub fn select_exclusive(&mut self, id: ObjectId) -> bool {
        if self.ids.len() == 1 && self.ids[0] == id {
            return false;
        }
        self.ids.clear();
        self.ids.push(id);
        true
    }

    /// Empty the selection. Returns whether the set changed.
    pub fn clear(&mut self) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        self.ids.clear();
        true
    }

    /// Apply a change through the matching entry point.
    pub fn apply(&mut self, change: SelectionChange) -> bool {
        match change {
            SelectionChange::Exclusive(id) => self.select_exclusive(id),
            SelectionChange::Clear => self.clear(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids whose objects are still in `store`, in selection order.
    #[must_use]
    pub fn present_in(&self, store: &ObjectStore) -> Vec<ObjectId> {
        self.ids.iter().copied().filter(|id| store.contains(id)).collect()
    }

    /// Whether `id` is selected and its object is still present.
    #[must_use]
    pub fn is_visibly_selected(&self, id: &ObjectId, store: &ObjectStore) -> bool {
        self.contains(id) && store.contains(id)
    }
}
