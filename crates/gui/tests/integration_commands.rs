//! Scripted sessions through the JSON command protocol.

use studyroom_gui_lib::command::{execute_json, execute_json_batch};
use studyroom_gui_lib::fixtures;
use studyroom_gui_lib::harness::RoomHarness;

#[test]
fn test_add_drag_and_inspect() {
    let mut h = RoomHarness::new();
    let responses = execute_json_batch(&mut h, r#"[{"command":"add_item","kind":"bookshelf"}]"#).unwrap();
    assert!(responses[0].success);
    let data = responses[0].data.as_ref().unwrap();
    assert_eq!(data["index"], 0);
    assert!(data["id"].as_str().unwrap().starts_with("bookshelf_"));

    let (x, y) = (h.item(0).unwrap().x, h.item(0).unwrap().y);
    let script = format!(
        r#"[
            {{"command":"pointer_down","x":{},"y":{}}},
            {{"command":"pointer_move","x":{},"y":{}}},
            {{"command":"pointer_up"}},
            {{"command":"inspect"}}
        ]"#,
        x + 5.0,
        y + 5.0,
        x + 105.0,
        y + 55.0
    );
    let responses = execute_json_batch(&mut h, &script).unwrap();
    assert!(responses.iter().all(|r| r.success));

    let inspect = responses[3].data.as_ref().unwrap();
    assert_eq!(inspect["item_count"], 1);
    assert_eq!(inspect["selected"], 0);
    let moved = &inspect["items"][0];
    assert!((moved["x"].as_f64().unwrap() - (x + 100.0) as f64).abs() < 1e-3);
    assert!((moved["y"].as_f64().unwrap() - (y + 50.0) as f64).abs() < 1e-3);
}

#[test]
fn test_move_after_release_reports_nothing() {
    let mut h = RoomHarness::with_items(vec![fixtures::boxed("desk_1", 10.0, 10.0, 80.0, 40.0)]);
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command":"pointer_down","x":20,"y":20},
            {"command":"pointer_leave"},
            {"command":"pointer_move","x":300,"y":300}
        ]"#,
    )
    .unwrap();

    assert!(responses[2].data.as_ref().unwrap()["report"].is_null());
    assert_eq!(h.item(0).unwrap().x, 10.0);
}

#[test]
fn test_settings_commands() {
    let mut h = RoomHarness::new();
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command":"set_theme","theme":"nature"},
            {"command":"set_lighting","lighting":-20},
            {"command":"inspect"}
        ]"#,
    )
    .unwrap();

    assert_eq!(responses[1].data.as_ref().unwrap()["lighting"], 0);
    let settings = &responses[2].data.as_ref().unwrap()["settings"];
    assert_eq!(settings["theme"], "nature");
    assert_eq!(settings["lighting"], 0);
}

#[test]
fn test_errors_do_not_abort_batch() {
    let mut h = RoomHarness::with_items(fixtures::sample_room());
    let responses = execute_json_batch(
        &mut h,
        r#"[
            {"command":"delete","index":17},
            {"command":"select","index":9},
            {"command":"delete","index":1},
            {"command":"inspect"}
        ]"#,
    )
    .unwrap();

    assert!(!responses[0].success);
    assert!(!responses[1].success);
    assert_eq!(responses[2].data.as_ref().unwrap()["removed"], "chair_2");
    assert_eq!(responses[3].data.as_ref().unwrap()["item_count"], 5);
}

#[test]
fn test_malformed_json_is_rejected() {
    let mut h = RoomHarness::new();
    assert!(execute_json(&mut h, r#"{"command":"teleport"}"#).is_err());
    assert!(execute_json_batch(&mut h, "not json").is_err());
    assert!(h.items().is_empty());
}
