//! Host side of the canvas: callbacks and a ready-made board model.
//!
//! The core never owns objects or selection. It reports what should change
//! as [`Action`]s, and [`dispatch`] forwards each one to the matching
//! [`CanvasHost`] callback in order. [`BoardState`] is a complete host for
//! applications (and tests) that need nothing more than a store and a
//! selection.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::doc::{CanvasObject, ObjectId, ObjectStore, ObjectsUpdate};
use crate::engine::Action;
use crate::input::Cursor;
use crate::selection::{Selection, SelectionChange};

/// Callbacks the canvas core notifies.
pub trait CanvasHost {
    /// Selection should change through `change`'s entry point.
    fn on_selection_change(&mut self, change: SelectionChange);
    /// The object sequence should be updated.
    fn on_objects_change(&mut self, update: ObjectsUpdate);
    /// A tap landed on empty canvas.
    fn on_background_tap(&mut self);
    /// The camera moved.
    fn on_camera_change(&mut self, _camera: Camera) {}
    /// The pan layer cursor changed.
    fn on_cursor_change(&mut self, _cursor: Cursor) {}
}

/// Forward actions to `host` in order.
///
/// Returns whether a repaint was requested. `PreventDefault` is a platform
/// concern and is left to the caller.
pub fn dispatch<H: CanvasHost + ?Sized>(host: &mut H, actions: Vec<Action>) -> bool {
    let mut render = false;
    for action in actions {
        match action {
            Action::SelectionChanged(change) => host.on_selection_change(change),
            Action::ObjectsChanged(update) => host.on_objects_change(update),
            Action::BackgroundTapped => host.on_background_tap(),
            Action::CameraChanged(camera) => host.on_camera_change(camera),
            Action::SetCursor(cursor) => host.on_cursor_change(cursor),
            Action::RenderNeeded => render = true,
            Action::PreventDefault => {}
        }
    }
    render
}

/// A minimal host: an object store, a selection, and a tap counter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardState {
    pub objects: ObjectStore,
    pub selection: Selection,
    pub background_taps: u64,
}

impl BoardState {
    #[must_use]
    pub fn new(objects: Vec<CanvasObject>) -> Self {
        Self { objects: ObjectStore::from_objects(objects), ..Self::default() }
    }

    /// Selected ids whose objects still exist.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selection.present_in(&self.objects)
    }
}

impl CanvasHost for BoardState {
    fn on_selection_change(&mut self, change: SelectionChange) {
        self.selection.apply(change);
    }

    fn on_objects_change(&mut self, update: ObjectsUpdate) {
        self.objects.apply(&update);
    }

    fn on_background_tap(&mut self) {
        self.background_taps += 1;
    }
}
