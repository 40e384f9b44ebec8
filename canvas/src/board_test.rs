use uuid::Uuid;

use super::*;
use crate::camera::Point;
use crate::doc::Rect;

fn card() -> CanvasObject {
    CanvasObject::new(Uuid::new_v4(), "card", Rect::new(0.0, 0.0, 40.0, 40.0))
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl CanvasHost for Recorder {
    fn on_selection_change(&mut self, change: SelectionChange) {
        self.events.push(format!("select:{}", change.ids().len()));
    }

    fn on_objects_change(&mut self, _update: ObjectsUpdate) {
        self.events.push("objects".to_owned());
    }

    fn on_background_tap(&mut self) {
        self.events.push("tap".to_owned());
    }

    fn on_camera_change(&mut self, camera: Camera) {
        self.events.push(format!("camera:{}", camera.x));
    }
}

#[test]
fn dispatch_preserves_order_and_reports_render() {
    let mut host = Recorder::default();
    let render = dispatch(
        &mut host,
        vec![
            Action::BackgroundTapped,
            Action::SelectionChanged(SelectionChange::Clear),
            Action::CameraChanged(Camera::new(7.0, 0.0, 1.0)),
            Action::PreventDefault,
            Action::RenderNeeded,
        ],
    );
    assert!(render);
    assert_eq!(host.events, vec!["tap", "select:0", "camera:7"]);
}

#[test]
fn dispatch_without_render_request() {
    let mut host = Recorder::default();
    assert!(!dispatch(&mut host, vec![Action::PreventDefault]));
    assert!(host.events.is_empty());
}

#[test]
fn board_applies_selection_changes() {
    let obj = card();
    let id = obj.id;
    let mut board = BoardState::new(vec![obj]);
    dispatch(&mut board, vec![Action::SelectionChanged(SelectionChange::Exclusive(id))]);
    assert_eq!(board.selected_ids(), vec![id]);
    dispatch(&mut board, vec![Action::SelectionChanged(SelectionChange::Clear)]);
    assert!(board.selection.is_empty());
}

#[test]
fn board_applies_object_updates() {
    let obj = card();
    let id = obj.id;
    let mut board = BoardState::new(vec![obj]);
    dispatch(
        &mut board,
        vec![Action::ObjectsChanged(ObjectsUpdate::Translate { id, delta: Point::new(3.0, 4.0) })],
    );
    assert_eq!(board.objects.get(&id).map(|o| o.rect.origin()), Some(Point::new(3.0, 4.0)));
}

#[test]
fn board_counts_background_taps() {
    let mut board = BoardState::default();
    dispatch(&mut board, vec![Action::BackgroundTapped, Action::BackgroundTapped]);
    assert_eq!(board.background_taps, 2);
}

#[test]
fn selected_ids_skips_removed_objects() {
    let obj = card();
    let id = obj.id;
    let mut board = BoardState::new(vec![obj]);
    board.selection.select_exclusive(id);
    board.objects.remove(&id);
    assert!(board.selected_ids().is_empty());
    assert!(board.selection.contains(&id));
}
