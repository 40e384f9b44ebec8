#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{CanvasObject, Rect};

fn card(x: f64, y: f64) -> CanvasObject {
    CanvasObject::new(Uuid::new_v4(), "card", Rect::new(x, y, 50.0, 50.0))
}

fn store_of(objs: &[CanvasObject]) -> ObjectStore {
    ObjectStore::from_objects(objs.to_vec())
}

#[test]
fn bind_all_binds_every_object() {
    let store = store_of(&[card(0.0, 0.0), card(10.0, 10.0)]);
    let mut drag = DragController::default();
    drag.bind_all(&store);
    assert_eq!(drag.binding_count(), 2);
    assert!(store.iter().all(|o| drag.is_bound(&o.id)));
}

#[test]
fn rebinding_twice_never_duplicates() {
    let store = store_of(&[card(0.0, 0.0), card(10.0, 10.0)]);
    let mut drag = DragController::default();
    drag.bind_all(&store);
    drag.bind_all(&store);
    assert_eq!(drag.binding_count(), 2);
    assert_eq!(drag.bind_generation(), 2);
}

#[test]
fn sync_rebinds_only_when_ids_change() {
    let a = card(0.0, 0.0);
    let b = card(0.0, 0.0);
    let mut store = store_of(std::slice::from_ref(&a));
    let mut drag = DragController::default();
    assert!(drag.sync(&store));
    assert!(!drag.sync(&store));

    store.translate(&a.id, Point::new(5.0, 5.0));
    assert!(!drag.sync(&store), "geometry changes do not rebind");

    store.push(b.clone());
    assert!(drag.sync(&store));
    assert!(drag.is_bound(&b.id));

    store.remove(&a.id);
    assert!(drag.sync(&store));
    assert!(!drag.is_bound(&a.id));
    assert_eq!(drag.binding_count(), 1);
}

#[test]
fn disabled_controller_binds_nothing() {
    let store = store_of(&[card(0.0, 0.0)]);
    let mut drag = DragController::new(false);
    drag.bind_all(&store);
    assert_eq!(drag.binding_count(), 0);
    assert!(!drag.begin(&store.ids()[0]));
}

#[test]
fn set_enabled_toggles_bindings() {
    let store = store_of(&[card(0.0, 0.0)]);
    let mut drag = DragController::default();
    drag.bind_all(&store);
    drag.set_enabled(false, &store);
    assert_eq!(drag.binding_count(), 0);
    drag.set_enabled(true, &store);
    assert_eq!(drag.binding_count(), 1);
}

#[test]
fn drag_delta_is_divided_by_scale() {
    let obj = card(100.0, 100.0);
    let id = obj.id;
    let mut store = store_of(&[obj]);
    let mut drag = DragController::default();
    drag.bind_all(&store);

    for scale in [0.25, 0.5, 1.0, 2.0, 3.5] {
        store.replace(vec![CanvasObject::new(id, "card", Rect::new(100.0, 100.0, 50.0, 50.0))]);
        assert!(drag.begin(&id));
        let update = drag.drag_by(&id, Point::new(20.0, 10.0), scale).expect("update");
        store.apply(&update);
        let rect = store.get(&id).map(|o| o.rect).expect("object");
        assert_eq!(rect, Rect::new(100.0 + 20.0 / scale, 100.0 + 10.0 / scale, 50.0, 50.0));
        drag.end(&id);
    }
}

#[test]
fn drag_uses_live_scale_per_increment() {
    let obj = card(0.0, 0.0);
    let id = obj.id;
    let mut drag = DragController::default();
    drag.bind_all(&store_of(&[obj]));
    drag.begin(&id);
    drag.drag_by(&id, Point::new(10.0, 0.0), 1.0);
    drag.drag_by(&id, Point::new(10.0, 0.0), 2.0);
    assert_eq!(drag.end(&id), Some(Point::new(15.0, 0.0)));
}

#[test]
fn drag_without_begin_is_ignored() {
    let obj = card(0.0, 0.0);
    let id = obj.id;
    let mut drag = DragController::default();
    drag.bind_all(&store_of(&[obj]));
    assert!(drag.drag_by(&id, Point::new(10.0, 0.0), 1.0).is_none());
    assert!(drag.end(&id).is_none());
}

#[test]
fn drag_on_unknown_id_is_ignored() {
    let mut drag = DragController::default();
    let ghost = Uuid::new_v4();
    assert!(!drag.begin(&ghost));
    assert!(drag.drag_by(&ghost, Point::new(1.0, 1.0), 1.0).is_none());
}

#[test]
fn drag_with_unusable_scale_is_ignored() {
    let obj = card(0.0, 0.0);
    let id = obj.id;
    let mut drag = DragController::default();
    drag.bind_all(&store_of(&[obj]));
    drag.begin(&id);
    assert!(drag.drag_by(&id, Point::new(1.0, 1.0), 0.0).is_none());
    assert!(drag.drag_by(&id, Point::new(1.0, 1.0), f64::NAN).is_none());
}

#[test]
fn removing_object_mid_drag_releases_it() {
    let a = card(0.0, 0.0);
    let id = a.id;
    let mut store = store_of(&[a, card(5.0, 5.0)]);
    let mut drag = DragController::default();
    drag.bind_all(&store);
    drag.begin(&id);
    assert_eq!(drag.active_drag(), Some(id));

    store.remove(&id);
    drag.sync(&store);
    assert_eq!(drag.active_drag(), None);
    assert!(drag.drag_by(&id, Point::new(1.0, 1.0), 1.0).is_none());
}

#[test]
fn drag_leaves_other_objects_untouched() {
    let a = card(0.0, 0.0);
    let b = card(200.0, 200.0);
    let mut store = store_of(&[a.clone(), b.clone()]);
    let mut drag = DragController::default();
    drag.bind_all(&store);
    drag.begin(&a.id);
    let update = drag.drag_by(&a.id, Point::new(8.0, 8.0), 2.0).expect("update");
    store.apply(&update);
    assert_eq!(store.get(&b.id), Some(&b));
    assert_eq!(store.get(&a.id).map(|o| o.rect), Some(Rect::new(4.0, 4.0, 50.0, 50.0)));
}
