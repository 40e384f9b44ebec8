#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

const A: &str = "6f1c2e43-5b0d-4c1b-9d67-0a9b8f1d2c3e";
const B: &str = "0b7d9a51-3e2f-4a8c-b1d4-5c6e7f809a1b";

fn script(value: serde_json::Value) -> Script {
    serde_json::from_value(value).expect("script")
}

fn two_cards(events: serde_json::Value) -> Script {
    script(json!({
        "viewport": { "left": 0.0, "top": 0.0, "width": 800.0, "height": 600.0 },
        "objects": [
            { "id": A, "type": "card", "rect": { "x": 100.0, "y": 100.0, "w": 50.0, "h": 50.0 } },
            { "id": B, "type": "note", "rect": { "x": 300.0, "y": 120.0, "w": 80.0, "h": 40.0 } }
        ],
        "events": events
    }))
}

fn id(raw: &str) -> ObjectId {
    raw.parse().expect("uuid")
}

#[test]
fn wheel_script_zooms_around_pointer() {
    let summary = replay(
        two_cards(json!([
            { "type": "wheel", "client": { "x": 400.0, "y": 300.0 }, "delta": { "dx": 0.0, "dy": -100.0 } }
        ])),
        &Overrides::default(),
    )
    .expect("replay");
    assert!((summary.camera.x + 60.0).abs() < 1e-9);
    assert!((summary.camera.y + 45.0).abs() < 1e-9);
    assert!((summary.camera.scale - 1.15).abs() < 1e-9);
}

#[test]
fn select_then_drag_moves_only_the_selected_card() {
    let summary = replay(
        two_cards(json!([
            { "type": "pointer_down", "client": { "x": 110.0, "y": 110.0 }, "target": { "type": "object", "id": A } },
            { "type": "pointer_move", "client": { "x": 130.0, "y": 120.0 } },
            { "type": "pointer_up", "client": { "x": 130.0, "y": 120.0 } }
        ])),
        &Overrides::default(),
    )
    .expect("replay");
    assert_eq!(summary.selection, vec![id(A)]);
    let a = summary.objects.get(&id(A)).expect("a");
    assert_eq!((a.rect.x, a.rect.y), (120.0, 110.0));
    let b = summary.objects.get(&id(B)).expect("b");
    assert_eq!((b.rect.x, b.rect.y), (300.0, 120.0));
}

#[test]
fn background_tap_is_counted_and_clears_selection() {
    let summary = replay(
        two_cards(json!([
            { "type": "pointer_down", "client": { "x": 110.0, "y": 110.0 }, "target": { "type": "object", "id": A } },
            { "type": "pointer_up", "client": { "x": 110.0, "y": 110.0 } },
            { "type": "pointer_down", "client": { "x": 600.0, "y": 500.0 }, "target": { "type": "background" } },
            { "type": "pointer_up", "client": { "x": 600.0, "y": 500.0 } }
        ])),
        &Overrides::default(),
    )
    .expect("replay");
    assert!(summary.selection.is_empty());
    assert_eq!(summary.background_taps, 1);
}

#[test]
fn pan_key_override_changes_which_key_pans() {
    let events = json!([
        { "type": "key_down", "key": "KeyH" },
        { "type": "pointer_down", "client": { "x": 10.0, "y": 10.0 }, "target": { "type": "background" } },
        { "type": "pointer_move", "client": { "x": 40.0, "y": 30.0 } },
        { "type": "pointer_up", "client": { "x": 40.0, "y": 30.0 } },
        { "type": "key_up", "key": "KeyH" }
    ]);

    let default_keys = replay(two_cards(events.clone()), &Overrides::default()).expect("replay");
    assert_eq!(default_keys.camera, Camera::default());

    let overrides = Overrides { pan_key: Some("KeyH".to_owned()), ..Overrides::default() };
    let remapped = replay(two_cards(events), &overrides).expect("replay");
    assert_eq!(remapped.camera, Camera { x: 30.0, y: 20.0, scale: 1.0 });
    assert_eq!(remapped.background_taps, 0);
}

#[test]
fn script_camera_is_clamped_into_range() {
    let mut s = two_cards(json!([]));
    s.camera = Some(Camera { x: 5.0, y: 6.0, scale: 10.0 });
    let summary = replay(s, &Overrides::default()).expect("replay");
    assert_eq!(summary.camera, Camera { x: 5.0, y: 6.0, scale: 3.5 });
}

#[test]
fn invalid_override_is_a_config_error() {
    let overrides = Overrides { wheel_sensitivity: Some(0.0), ..Overrides::default() };
    let err = replay(two_cards(json!([])), &overrides).expect_err("config error");
    assert!(matches!(err, ReplayError::Config(_)));
}

#[test]
fn malformed_script_is_a_json_error() {
    let err = Script::from_json(r#"{ "viewport": 3 }"#).expect_err("json error");
    assert!(matches!(err, ReplayError::Json(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = Script::load(Path::new("does/not/exist.json")).expect_err("io error");
    assert!(matches!(err, ReplayError::Io { .. }));
}

#[test]
fn summary_serializes_objects_as_a_list() {
    let summary = replay(two_cards(json!([])), &Overrides::default()).expect("replay");
    let value = serde_json::to_value(&summary).expect("json");
    assert_eq!(value["objects"].as_array().map(Vec::len), Some(2));
    assert_eq!(value["objects"][0]["type"], "card");
    assert_eq!(value["background_taps"], 0);
}
