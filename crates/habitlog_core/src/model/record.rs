//! Per-day record model.
//!
//! # Responsibility
//! - Define the daily bundle of habit states and memos.
//! - Provide the pure backfill helper used by the read path.
//!
//! # Invariants
//! - A day's state for one habit is exactly one of the three tags.
//! - `habit_states` never holds an id that is absent from the registry
//!   (enforced by the registry's cascade delete, not by this type).
//! - Memo insertion order is preserved; deletion is by position.

use crate::model::habit::HabitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion state of one habit on one day.
///
/// Absence of an entry is equivalent to `Missed`; the read path backfills
/// explicit entries for every registered habit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitState {
    /// Done for the day; counts toward the completion rate.
    Completed,
    /// Deliberately skipped; mutually exclusive with `Completed`.
    Skipped,
    /// Not done and not skipped.
    #[default]
    Missed,
}

/// Free-text note attached to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    /// Non-empty note text.
    pub text: String,
    /// Checked-off flag, toggled independently of habit states.
    pub done: bool,
}

/// The per-date bundle of habit completion states and memos.
///
/// One record exists per calendar day that has any data; records are
/// created on first access and never deleted, even when emptied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Habit id -> state for this day.
    #[serde(default)]
    pub habit_states: BTreeMap<HabitId, HabitState>,
    /// Ordered memo list.
    #[serde(default)]
    pub memos: Vec<Memo>,
}

/// Inserts `Missed` for every registered habit missing from the record.
///
/// Returns whether anything was inserted, so callers know when a
/// write-through is due. Pure with respect to persistence; the read path
/// owns calling it.
pub fn ensure_backfilled<'a>(
    record: &mut DailyRecord,
    habit_ids: impl IntoIterator<Item = &'a HabitId>,
) -> bool {
    let mut changed = false;
    for id in habit_ids {
        if !record.habit_states.contains_key(id) {
            record.habit_states.insert(id.clone(), HabitState::Missed);
            changed = true;
        }
    }
    changed
}
