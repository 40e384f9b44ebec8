//! Drag controller: per-object drag bindings and screen-to-world deltas.
//!
//! Every object in the store gets one binding while dragging is enabled.
//! Bindings are rebuilt whenever the set of object ids changes, and a
//! rebuild always releases every previous binding first, so repeated binds
//! never stack handlers on the same object.
//!
//! Drag increments arrive in screen pixels. They are divided by the camera
//! scale at the moment of each increment, so a dragged object tracks the
//! cursor 1:1 on screen.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::doc::{ObjectId, ObjectStore, ObjectsUpdate};

/// Per-object drag state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragBinding {
    /// A drag on this object is in progress.
    pub active: bool,
    /// World-space distance moved during the current drag.
    pub accumulated: Point,
}

/// Owns the id → binding map for the object layer.
#[derive(Debug, Clone)]
pub struct DragController {
    bindings: HashMap<ObjectId, DragBinding>,
    /// Ids in store order at the last bind, used to detect set changes.
    bound_ids: Vec<ObjectId>,
    enabled: bool,
    binds: u64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DragController {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self { bindings: HashMap::new(), bound_ids: Vec::new(), enabled, binds: 0 }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn dragging on or off. Turning it off releases every binding.
    pub fn set_enabled(&mut self, enabled: bool, store: &ObjectStore) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.bind_all(store);
    }

    /// Release every binding, then bind each object in `store`.
    pub fn bind_all(&mut self, store: &ObjectStore) {
        self.unbind_all();
        self.bound_ids = store.ids();
        if !self.enabled {
            return;
        }
        for id in &self.bound_ids {
            self.bindings.insert(*id, DragBinding::default());
        }
        self.binds += 1;
        tracing::debug!(count = self.bindings.len(), "drag bindings rebuilt");
    }

    /// Release every binding, ending any drag in progress.
    pub fn unbind_all(&mut self) {
        self.bindings.clear();
        self.bound_ids.clear();
    }

    /// Rebind if the store's id set differs from the last bind. Returns whether it rebound.
    pub fn sync(&mut self, store: &ObjectStore) -> bool {
        let same = store.len() == self.bound_ids.len() && store.iter().zip(&self.bound_ids).all(|(o, id)| o.id == *id);
        if same {
            return false;
        }
        self.bind_all(store);
        true
    }

    #[must_use]
    pub fn is_bound(&self, id: &ObjectId) -> bool {
        self.bindings.contains_key(id)
    }

    #[must_use]
    pub fn binding(&self, id: &ObjectId) -> Option<DragBinding> {
        self.bindings.get(id).copied()
    }

    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// How many times bindings have been (re)built.
    #[must_use]
    pub fn bind_generation(&self) -> u64 {
        self.binds
    }

    /// The object currently being dragged, if any.
    #[must_use]
    pub fn active_drag(&self) -> Option<ObjectId> {
        self.bindings.iter().find(|(_, b)| b.active).map(|(id, _)| *id)
    }

    /// Start dragging `id`. Returns false if it has no binding.
    pub fn begin(&mut self, id: &ObjectId) -> bool {
        let Some(binding) = self.bindings.get_mut(id) else {
            return false;
        };
        *binding = DragBinding { active: true, accumulated: Point::default() };
        tracing::debug!(%id, "drag started");
        true
    }

    /// Convert a screen-space increment into a translation of `id`.
    ///
    /// `scale` is the camera scale right now. Returns `None` when the object
    /// is not being dragged or the scale cannot divide.
    pub fn drag_by(&mut self, id: &ObjectId, screen_delta: Point, scale: f64) -> Option<ObjectsUpdate> {
        if !(scale.is_finite() && scale > 0.0) {
            return None;
        }
        let binding = self.bindings.get_mut(id).filter(|b| b.active)?;
        let delta = Point::new(screen_delta.x / scale, screen_delta.y / scale);
        binding.accumulated = binding.accumulated + delta;
        tracing::trace!(%id, dx = delta.x, dy = delta.y, "drag increment");
        Some(ObjectsUpdate::Translate { id: *id, delta })
    }

    /// Finish dragging `id`, returning the total world-space distance moved.
    pub fn end(&mut self, id: &ObjectId) -> Option<Point> {
        let binding = self.bindings.get_mut(id).filter(|b| b.active)?;
        let total = binding.accumulated;
        *binding = DragBinding::default();
        tracing::debug!(%id, dx = total.x, dy = total.y, "drag ended");
        Some(total)
    }
}
