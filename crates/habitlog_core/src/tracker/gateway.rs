//! Import/export gateway.
//!
//! # Responsibility
//! - Serialize the full aggregate to the versioned payload.
//! - Restore a payload, migrating records and archiving the replaced
//!   state first.
//!
//! # Invariants
//! - Emitted payloads are always version 4; accepted `records` may be
//!   any historical shape.
//! - Validation happens before any mutation; a rejected import leaves
//!   state untouched and takes no backup.
//! - A successful import archives the pre-import state under a fresh
//!   backup key before anything is overwritten. Backups are never
//!   overwritten or pruned.

use crate::migrate::records_from_value;
use crate::model::habit::Habit;
use crate::model::record::DailyRecord;
use crate::store::KeyValueStore;
use crate::tracker::{Tracker, TrackerError, TrackerResult, BACKUP_KEY_PREFIX};
use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Version tag written into every exported payload. Bumped only when the
/// payload schema changes.
pub const PAYLOAD_VERSION: u32 = 4;

/// Full snapshot of the tracker aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub version: u32,
    /// RFC 3339 timestamp of the export, local offset.
    pub exported_at: String,
    pub habits: Vec<Habit>,
    pub records: BTreeMap<String, DailyRecord>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Builds a version-4 snapshot of the current state.
    pub fn export_payload(&self) -> ExportPayload {
        ExportPayload {
            version: PAYLOAD_VERSION,
            exported_at: Local::now().to_rfc3339(),
            habits: self.state.habits.clone(),
            records: self.state.records.clone(),
            keywords: self.state.keywords.clone(),
        }
    }

    /// Serializes the current state as a payload document.
    pub fn export_json(&self) -> TrackerResult<String> {
        let raw = serde_json::to_string(&self.export_payload())?;
        Ok(raw)
    }

    /// Restores state from a parsed payload document.
    ///
    /// # Contract
    /// - `payload.habits` must be a sequence and `payload.records` a
    ///   mapping; otherwise `InvalidShape` with no state change.
    /// - On success the pre-import state is archived first; the returned
    ///   string is the backup's storage key.
    /// - Imported records pass through migration; they are NOT pruned
    ///   against the imported habit list (v1 payloads legitimately
    ///   reference ids with no surviving habit entry).
    pub fn import_value(&mut self, payload: &Value) -> TrackerResult<String> {
        let habits_value = payload.get("habits").cloned().unwrap_or(Value::Null);
        if !habits_value.is_array() {
            return Err(TrackerError::InvalidShape(
                "`habits` must be a sequence".to_string(),
            ));
        }
        let records_value = payload.get("records").cloned().unwrap_or(Value::Null);
        if !records_value.is_object() {
            return Err(TrackerError::InvalidShape(
                "`records` must be a mapping".to_string(),
            ));
        }

        let habits: Vec<Habit> = serde_json::from_value(habits_value)
            .map_err(|err| TrackerError::InvalidShape(format!("habit entry: {err}")))?;
        let records = records_from_value(records_value)
            .map_err(|err| TrackerError::InvalidShape(format!("record entry: {err}")))?;
        let keywords: Vec<String> = payload
            .get("keywords")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let backup_key = self.archive_current_state()?;

        self.state.habits = habits;
        self.state.records = records;
        self.state.keywords = keywords;
        self.persist_habits()?;
        self.persist_records()?;
        self.persist_keywords()?;

        info!(
            "event=import module=gateway status=ok habits={} records={} keywords={} backup_key={}",
            self.state.habits.len(),
            self.state.records.len(),
            self.state.keywords.len(),
            backup_key
        );
        Ok(backup_key)
    }

    /// Parses and restores a payload document from text.
    ///
    /// A text that is not valid JSON is rejected as `MalformedDocument`
    /// through the same no-mutation path as `InvalidShape`.
    pub fn import_json(&mut self, text: &str) -> TrackerResult<String> {
        let payload: Value = serde_json::from_str(text)
            .map_err(|err| TrackerError::MalformedDocument(err.to_string()))?;
        self.import_value(&payload)
    }

    /// Writes the current state verbatim under a fresh timestamped backup
    /// key and returns that key.
    fn archive_current_state(&mut self) -> TrackerResult<String> {
        let snapshot = serde_json::to_string(&self.export_payload())?;

        let stamp = Local::now().timestamp_millis();
        let mut backup_key = format!("{BACKUP_KEY_PREFIX}{stamp}");
        let mut bump = 0u32;
        // Imports within the same millisecond must not overwrite an
        // earlier snapshot.
        while self.store.get(&backup_key)?.is_some() {
            bump += 1;
            backup_key = format!("{BACKUP_KEY_PREFIX}{stamp}-{bump}");
        }

        self.store.set(&backup_key, &snapshot)?;
        Ok(backup_key)
    }
}
