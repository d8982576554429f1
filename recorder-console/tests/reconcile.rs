//! Properties of the base-field / override split.

use platforms_settings::default_registry;
use recorder_console::Error;
use recorder_console::domain::config::{FormValues, OVERRIDE_TEXT_KEY, collect, collect_entity, expand};
use recorder_console::domain::{BASE_FIELD_NAMES, HookAction, StreamerEntity};
use recorder_console::services::OverrideEditor;
use rstest::rstest;
use serde_json::{Map, Value, json};

fn form(value: Value) -> FormValues {
    match value {
        Value::Object(map) => map,
        _ => panic!("form values must be an object"),
    }
}

fn entity(value: Value) -> StreamerEntity {
    serde_json::from_value(value).expect("valid streamer entity")
}

fn bilibili_entity() -> StreamerEntity {
    entity(json!({
        "id": 12,
        "url": "https://live.bilibili.com/22603245",
        "remark": "bili",
        "filename": "{streamer}%Y-%m-%d",
        "split_time": 3600,
        "upload_id": 3,
        "status": "Idle",
        "format": "flv",
        "time_range": "[\"2024-01-01T12:00:00.000Z\",\"2024-01-01T18:00:00.000Z\"]",
        "excluded_keywords": ["rerun"],
        "preprocessor": [{"run": "echo start"}],
        "postprocessor": [{"mv": "backup/"}, "rm"],
        "opt_args": ["--hls-live-edge", "6"],
        "override": {
            "bili_qn": 10000,
            "user.bili_cookie": "a.json",
            "douyu_rate": 0,
            "LOGGING": {"root": {"level": "DEBUG"}}
        }
    }))
}

#[rstest]
#[case::full(bilibili_entity())]
#[case::new(StreamerEntity::new("https://www.douyu.com/123", "douyu"))]
#[case::no_override(entity(json!({"id": 1, "url": "https://www.huya.com/1", "remark": "huya"})))]
#[case::hook_without_value(entity(json!({"id": 2, "url": "https://www.huya.com/2", "remark": "huya", "postprocessor": [{"mv": null}]})))]
fn expand_collect_round_trip(#[case] entity: StreamerEntity) {
    let expanded = expand(&entity).unwrap();
    let collected = collect_entity(&expanded, &entity.override_map()).unwrap();
    assert_eq!(expand(&collected).unwrap(), expanded);
}

#[rstest]
#[case::plain(json!({"url": "u", "remark": "r", "bili_qn": 10000, "huya_danmaku": true}), None)]
#[case::raw_json(
    json!({"url": "u", "remark": "r", "override_text": "{\"remark\": \"x\", \"status\": 1, \"cc_protocol\": \"hls\"}"}),
    None
)]
#[case::seeded(json!({"url": "u", "status": "Idle", "twitch_danmaku": false}), Some(json!({"id": 3, "bili_qn": 400})))]
fn collect_keeps_top_level_and_override_disjoint(#[case] values: Value, #[case] previous: Option<Value>) {
    let previous = previous.map(form).unwrap_or_default();
    let wire = collect(&form(values), &previous, BASE_FIELD_NAMES).unwrap();

    let overrides = wire["override"].as_object().unwrap();
    for key in wire.keys() {
        assert!(BASE_FIELD_NAMES.contains(&key.as_str()), "unexpected top-level key {key}");
        assert!(!overrides.contains_key(key), "{key} is both top-level and in override");
    }
}

#[test]
fn create_scenario() {
    let values = form(json!({"url": "https://live.bilibili.com/1", "remark": "test", "bili_qn": 10000}));
    let wire = collect(&values, &Map::new(), &["url", "remark"]).unwrap();
    assert_eq!(
        Value::Object(wire),
        json!({"url": "https://live.bilibili.com/1", "remark": "test", "override": {"bili_qn": 10000}})
    );
}

#[test]
fn raw_override_json() {
    let previous = bilibili_entity().override_map();
    let values = form(json!({
        "url": "https://live.bilibili.com/22603245",
        "remark": "bili",
        "override_text": r#"{"bili_qn": 10000}"#
    }));

    let entity = collect_entity(&values, &previous).unwrap();
    assert_eq!(Value::Object(entity.override_map()), json!({"bili_qn": 10000}));
}

#[test]
fn raw_override_replaces_expanded_values() {
    let original = entity(json!({
        "id": 5,
        "url": "https://live.bilibili.com/5",
        "remark": "bili",
        "override": {"bili_qn": 400, "douyu_rate": 0}
    }));
    let mut values = expand(&original).unwrap();
    values.insert(OVERRIDE_TEXT_KEY.into(), json!(r#"{"bili_qn": 10000}"#));

    let collected = collect_entity(&values, &original.override_map()).unwrap();
    assert_eq!(Value::Object(collected.override_map()), json!({"bili_qn": 10000}));
}

#[test]
fn editor_raw_override_edit_wins() {
    let editor = OverrideEditor::new(default_registry().unwrap().into(), bilibili_entity()).unwrap();
    let mut values = editor.initial_values().unwrap();
    assert_eq!(values["bili_qn"], json!(10000));
    assert!(editor.override_text().unwrap().contains("douyu_rate"));

    values.insert(
        OVERRIDE_TEXT_KEY.into(),
        json!(r#"{"bili_qn": 400, "user.bili_cookie": "b.json"}"#),
    );
    let saved = editor.submit(&values).unwrap();
    assert_eq!(saved.id, Some(12));
    assert_eq!(
        Value::Object(saved.override_map()),
        json!({"bili_qn": 400, "user.bili_cookie": "b.json"})
    );
    assert_eq!(saved.postprocessor, Some(vec![HookAction::mv("backup/"), HookAction::rm()]));
}

#[test]
fn editor_without_raw_override_keeps_field_edits() {
    let editor = OverrideEditor::new(default_registry().unwrap().into(), bilibili_entity()).unwrap();
    let mut values = editor.initial_values().unwrap();
    values.insert("bili_qn".into(), json!(400));

    let saved = editor.submit(&values).unwrap();
    let overrides = saved.override_map();
    assert_eq!(overrides["bili_qn"], json!(400));
    assert_eq!(overrides["douyu_rate"], json!(0));
}

#[test]
fn malformed_raw_override_is_rejected() {
    let original = bilibili_entity();
    let previous = original.override_map();
    let mut values = expand(&original).unwrap();
    values.insert("override_text".into(), json!("{bad json"));

    let err = collect_entity(&values, &previous).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.field_errors().unwrap()[0].field, "override_text");
    assert_eq!(original, bilibili_entity());
}

#[test]
fn dot_keys_stay_flat() {
    let values = expand(&bilibili_entity()).unwrap();
    assert_eq!(values["user.bili_cookie"], json!("a.json"));
    assert!(!values.contains_key("user"));

    let wire = collect(&values, &Map::new(), BASE_FIELD_NAMES).unwrap();
    assert_eq!(wire["override"]["user.bili_cookie"], json!("a.json"));
}

#[test]
fn hook_lists_switch_shape() {
    let values = expand(&bilibili_entity()).unwrap();
    assert_eq!(
        values["postprocessor"],
        json!([{"cmd": "mv", "value": "backup/"}, {"cmd": "rm"}])
    );

    let entity = collect_entity(&values, &Map::new()).unwrap();
    assert_eq!(
        entity.postprocessor,
        Some(vec![HookAction::mv("backup/"), HookAction::rm()])
    );
    assert_eq!(
        entity.to_wire().unwrap()["postprocessor"],
        json!([{"mv": "backup/"}, "rm"])
    );
}
