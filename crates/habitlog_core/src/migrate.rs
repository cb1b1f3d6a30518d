//! Persisted record-shape migration pipeline.
//!
//! # Responsibility
//! - Upgrade any historical records shape (v1..v3) to the current v4 shape.
//! - Register upgrade steps in strictly increasing shape order.
//!
//! # Invariants
//! - Steps are pure and applied per date-key entry, oldest shape first.
//! - A record may match several steps (string memos AND a `completed`
//!   list); every matching step applies, not only the first.
//! - Running the pipeline on v4 data is a no-op (idempotent).
//!
//! Historical shapes:
//! - v1: bare array of completed habit ids.
//! - v2: `{completed: [id], memos: [string]}`.
//! - v3: `{completed: [id], memos: [{text, done}]}`.
//! - v4: `{habitStates: {id: state}, memos: [{text, done}]}`.

use crate::model::record::DailyRecord;
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Shape version produced by this pipeline.
pub const RECORDS_VERSION: u32 = 4;

struct ShapeUpgrade {
    /// Oldest shape this step still detects.
    legacy_version: u32,
    detects: fn(&Value) -> bool,
    upgrade: fn(&mut Value),
}

const UPGRADES: &[ShapeUpgrade] = &[
    ShapeUpgrade {
        legacy_version: 1,
        detects: is_bare_id_list,
        upgrade: wrap_bare_id_list,
    },
    ShapeUpgrade {
        legacy_version: 2,
        detects: has_string_memos,
        upgrade: objectify_memos,
    },
    ShapeUpgrade {
        legacy_version: 3,
        detects: has_completed_list,
        upgrade: fold_completed_list,
    },
];

/// Upgrades one per-day entry to the v4 shape, in place.
pub fn migrate_record(entry: &mut Value) {
    for step in UPGRADES {
        if (step.detects)(entry) {
            (step.upgrade)(entry);
            debug!(
                "event=record_upgrade module=migrate status=ok from_shape=v{}",
                step.legacy_version
            );
        }
    }
    normalize_v4(entry);
}

/// Upgrades a whole records mapping to the v4 shape, in place.
///
/// Anything that is not a JSON object becomes an empty mapping; entry keys
/// are kept verbatim, including ones the codec would not produce. The
/// store never discards a day of user history it does not understand.
pub fn migrate_records(records: &mut Value) {
    match records {
        Value::Object(entries) => {
            for entry in entries.values_mut() {
                migrate_record(entry);
            }
        }
        other => {
            *other = Value::Object(Map::new());
        }
    }
}

/// Migrates and decodes a records mapping into the typed v4 model.
pub fn records_from_value(
    mut records: Value,
) -> Result<BTreeMap<String, DailyRecord>, serde_json::Error> {
    migrate_records(&mut records);
    serde_json::from_value(records)
}

/// v1 detector: the entry is a bare array of completed habit ids.
fn is_bare_id_list(entry: &Value) -> bool {
    entry.is_array()
}

/// v1 -> v2: wrap the id list into the keyed record object.
fn wrap_bare_id_list(entry: &mut Value) {
    let ids = entry.take();
    let mut wrapped = Map::new();
    wrapped.insert("completed".to_string(), ids);
    wrapped.insert("memos".to_string(), Value::Array(Vec::new()));
    *entry = Value::Object(wrapped);
}

/// v2 detector: at least one memo is a bare string.
fn has_string_memos(entry: &Value) -> bool {
    entry
        .get("memos")
        .and_then(Value::as_array)
        .is_some_and(|memos| memos.iter().any(Value::is_string))
}

/// v2 -> v3: promote bare-string memos to `{text, done: false}` objects.
fn objectify_memos(entry: &mut Value) {
    let Some(memos) = entry.get_mut("memos").and_then(Value::as_array_mut) else {
        return;
    };
    for memo in memos.iter_mut() {
        if let Value::String(text) = memo {
            let mut object = Map::new();
            object.insert("text".to_string(), Value::String(std::mem::take(text)));
            object.insert("done".to_string(), Value::Bool(false));
            *memo = Value::Object(object);
        }
    }
}

/// v3 detector: the entry still carries a `completed` id array.
fn has_completed_list(entry: &Value) -> bool {
    entry.get("completed").is_some_and(Value::is_array)
}

/// v3 -> v4: every listed id becomes an explicit `completed` state; the
/// legacy field is removed.
fn fold_completed_list(entry: &mut Value) {
    let Some(record) = entry.as_object_mut() else {
        return;
    };
    let completed = match record.remove("completed") {
        Some(Value::Array(ids)) => ids,
        _ => return,
    };

    let states = record
        .entry("habitStates".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let Some(states) = states.as_object_mut() else {
        return;
    };
    for id in completed {
        if let Value::String(id) = id {
            states.insert(id, Value::String("completed".to_string()));
        }
    }
}

/// Final guarantee: `habitStates` is an object of known state tags and
/// `memos` is an array of well-formed memo objects.
///
/// Entries that cannot be coerced are dropped rather than failing the
/// load; a dropped state entry is equivalent to `missed` and the read
/// path backfills it.
fn normalize_v4(entry: &mut Value) {
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    let Some(record) = entry.as_object_mut() else {
        return;
    };

    let states = record
        .entry("habitStates".to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !states.is_object() {
        *states = Value::Object(Map::new());
    }
    if let Some(states) = states.as_object_mut() {
        states.retain(|_, state| {
            matches!(
                state.as_str(),
                Some("completed") | Some("skipped") | Some("missed")
            )
        });
    }

    let memos = record
        .entry("memos".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !memos.is_array() {
        *memos = Value::Array(Vec::new());
    }
    if let Some(memos) = memos.as_array_mut() {
        memos.retain(|memo| {
            memo.get("text")
                .and_then(Value::as_str)
                .is_some_and(|text| !text.is_empty())
        });
        for memo in memos.iter_mut() {
            if let Some(memo) = memo.as_object_mut() {
                let done = memo.get("done").and_then(Value::as_bool).unwrap_or(false);
                memo.insert("done".to_string(), Value::Bool(done));
            }
        }
    }
}
