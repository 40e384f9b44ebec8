//! Document model: canvas objects, their rectangles, and the ordered store.
//!
//! The host application owns the [`ObjectStore`]. The canvas core only reads
//! it to render and to decide which objects get drag bindings, and proposes
//! changes as [`ObjectsUpdate`] values that the host applies. Store order is
//! paint order: later objects draw above earlier ones.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a canvas object.
pub type ObjectId = Uuid;

/// Axis-aligned rectangle in world space. `w` and `h` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Build a rectangle; negative sizes collapse to zero.
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w: w.max(0.0), h: h.max(0.0) }
    }

    /// The same rectangle moved by `delta`, size untouched.
    #[must_use]
    pub fn translated(self, delta: Point) -> Self {
        Self { x: self.x + delta.x, y: self.y + delta.y, ..self }
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A positioned visual entity on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasObject {
    /// Unique within the store for the object's lifetime.
    pub id: ObjectId,
    /// Opaque tag, used only for default labeling.
    #[serde(rename = "type")]
    pub kind: String,
    /// Placement in world space.
    pub rect: Rect,
}

impl CanvasObject {
    #[must_use]
    pub fn new(id: ObjectId, kind: impl Into<String>, rect: Rect) -> Self {
        Self { id, kind: kind.into(), rect }
    }

    /// Default label shown when the host renders no content of its own.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.kind, self.id)
    }
}

/// A proposed change to the object sequence.
///
/// `Replace` is a full replacement; `Translate` is a function of the previous
/// sequence that moves one object and leaves every other object untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectsUpdate {
    Replace(Vec<CanvasObject>),
    Translate { id: ObjectId, delta: Point },
}

impl ObjectsUpdate {
    /// Compute the next sequence from `prev`.
    #[must_use]
    pub fn apply_to(&self, prev: &[CanvasObject]) -> Vec<CanvasObject> {
        match self {
            Self::Replace(next) => next.clone(),
            Self::Translate { id, delta } => prev
                .iter()
                .map(|obj| {
                    if obj.id == *id {
                        CanvasObject { rect: obj.rect.translated(*delta), ..obj.clone() }
                    } else {
                        obj.clone()
                    }
                })
                .collect(),
        }
    }
}

/// Ordered, host-owned collection of canvas objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CanvasObject>", into = "Vec<CanvasObject>")]
pub struct ObjectStore {
    objects: Vec<CanvasObject>,
}

impl ObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Create a store from a sequence, keeping the first object for any repeated id.
    #[must_use]
    pub fn from_objects(objects: Vec<CanvasObject>) -> Self {
        let mut store = Self::new();
        store.replace(objects);
        store
    }

    /// Replace the whole sequence. Later duplicates of an id are dropped.
    pub fn replace(&mut self, objects: Vec<CanvasObject>) {
        let mut seen = HashSet::with_capacity(objects.len());
        self.objects = objects
            .into_iter()
            .filter(|obj| {
                let fresh = seen.insert(obj.id);
                if !fresh {
                    tracing::warn!(id = %obj.id, "dropping duplicate canvas object id");
                }
                fresh
            })
            .collect();
    }

    /// Replace the sequence with a function of the previous one.
    pub fn update(&mut self, f: impl FnOnce(&[CanvasObject]) -> Vec<CanvasObject>) {
        let next = f(&self.objects);
        self.replace(next);
    }

    /// Apply a proposed update from the canvas core.
    pub fn apply(&mut self, update: &ObjectsUpdate) {
        self.update(|prev| update.apply_to(prev));
    }

    /// Move one object by a world-space delta. Returns false if the id is absent.
    pub fn translate(&mut self, id: &ObjectId, delta: Point) -> bool {
        let Some(obj) = self.objects.iter_mut().find(|o| o.id == *id) else {
            return false;
        };
        obj.rect = obj.rect.translated(delta);
        true
    }

    /// Append an object. Returns false (and changes nothing) if the id is taken.
    pub fn push(&mut self, obj: CanvasObject) -> bool {
        if self.contains(&obj.id) {
            return false;
        }
        self.objects.push(obj);
        true
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: &ObjectId) -> Option<CanvasObject> {
        let index = self.objects.iter().position(|o| o.id == *id)?;
        Some(self.objects.remove(index))
    }

    #[must_use]
    pub fn get(&self, id: &ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.get(id).is_some()
    }

    /// Objects in paint order (bottom first).
    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanvasObject> {
        self.objects.iter()
    }

    /// Ids in paint order.
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl<'a> IntoIterator for &'a ObjectStore {
    type Item = &'a CanvasObject;
    type IntoIter = std::slice::Iter<'a, CanvasObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}

impl From<Vec<CanvasObject>> for ObjectStore {
    fn from(objects: Vec<CanvasObject>) -> Self {
        Self::from_objects(objects)
    }
}

impl From<ObjectStore> for Vec<CanvasObject> {
    fn from(store: ObjectStore) -> Self {
        store.objects
    }
}
