use habitlog_core::migrate::{migrate_records, records_from_value, RECORDS_VERSION};
use habitlog_core::tracker::{Tracker, RECORDS_KEY};
use habitlog_core::{HabitState, KeyValueStore, MemoryKvStore};
use serde_json::{json, Value};

#[test]
fn migration_is_idempotent_for_every_historical_shape() {
    let mut records = all_generations_mapping();
    migrate_records(&mut records);
    let once = records.clone();
    migrate_records(&mut records);
    assert_eq!(records, once);
}

#[test]
fn migration_is_total_over_every_historical_shape() {
    let mut records = all_generations_mapping();
    migrate_records(&mut records);

    let entries = records.as_object().expect("mapping stays a mapping");
    assert_eq!(entries.len(), 4);
    for (key, entry) in entries {
        assert!(
            entry["habitStates"].is_object(),
            "entry {key} lacks a habitStates object: {entry}"
        );
        let memos = entry["memos"].as_array().expect("memos is an array");
        for memo in memos {
            assert!(memo["text"].is_string(), "memo in {key} lacks text");
            assert!(memo["done"].is_boolean(), "memo in {key} lacks done");
        }
    }
}

#[test]
fn v1_id_list_becomes_completed_states() {
    let records = records_from_value(json!({"2024-01-01": ["h1"]})).unwrap();

    let record = &records["2024-01-01"];
    assert_eq!(record.habit_states.len(), 1);
    assert_eq!(record.habit_states.get("h1"), Some(&HabitState::Completed));
    assert!(record.memos.is_empty());
}

#[test]
fn v2_record_with_string_memos_and_completed_list_applies_both_steps() {
    let records = records_from_value(json!({
        "2024-02-10": {"completed": ["h1", "h2"], "memos": ["stretch first"]}
    }))
    .unwrap();

    let record = &records["2024-02-10"];
    assert_eq!(record.habit_states.get("h1"), Some(&HabitState::Completed));
    assert_eq!(record.habit_states.get("h2"), Some(&HabitState::Completed));
    assert_eq!(record.memos.len(), 1);
    assert_eq!(record.memos[0].text, "stretch first");
    assert!(!record.memos[0].done);
}

#[test]
fn v4_data_passes_through_unchanged() {
    let input = json!({
        "2024-03-01": {
            "habitStates": {"h1": "skipped", "h2": "missed"},
            "memos": [{"text": "travel day", "done": true}]
        }
    });
    let mut migrated = input.clone();
    migrate_records(&mut migrated);
    assert_eq!(migrated, input);
}

#[test]
fn load_path_migrates_legacy_store_contents() {
    let mut store = MemoryKvStore::new();
    store
        .set(
            RECORDS_KEY,
            r#"{"2024-01-01": ["h1"], "2024-01-02": {"completed": ["h1"], "memos": ["note"]}}"#,
        )
        .unwrap();

    let tracker = Tracker::init(store).unwrap();

    let first = &tracker.state().records["2024-01-01"];
    assert_eq!(first.habit_states.get("h1"), Some(&HabitState::Completed));
    let second = &tracker.state().records["2024-01-02"];
    assert_eq!(second.habit_states.get("h1"), Some(&HabitState::Completed));
    assert_eq!(second.memos[0].text, "note");
}

#[test]
fn pipeline_targets_version_four() {
    assert_eq!(RECORDS_VERSION, 4);
}

/// One mapping containing every on-disk generation at once.
fn all_generations_mapping() -> Value {
    json!({
        "2023-11-01": ["h1", "h2"],
        "2023-11-02": {"completed": ["h1"], "memos": ["buy milk"]},
        "2023-11-03": {"completed": ["h2"], "memos": [{"text": "call mom", "done": true}]},
        "2023-11-04": {"habitStates": {"h1": "skipped"}, "memos": []}
    })
}
