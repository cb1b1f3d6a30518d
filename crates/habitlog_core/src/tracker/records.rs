//! Record store operations.
//!
//! # Responsibility
//! - Get-or-create per-day records with registry-complete backfill.
//! - Apply habit-state and memo mutations with write-through persistence.
//!
//! # Invariants
//! - Reading an unseen date never errors; it creates the empty record.
//! - Backfill runs on every read, because habits can be registered after
//!   a record already exists.
//! - A state write for an unregistered habit id is a silent no-op, so
//!   `habit_states` never gains an id the registry does not know.
//! - Out-of-range memo positions are silent no-ops.

use crate::model::habit::HabitId;
use crate::model::record::{ensure_backfilled, DailyRecord, HabitState, Memo};
use crate::store::KeyValueStore;
use crate::tracker::{Tracker, TrackerResult};

impl<S: KeyValueStore> Tracker<S> {
    /// Returns the record for `date_key`, creating and backfilling it as
    /// needed.
    ///
    /// # Contract
    /// - The returned snapshot has a state entry for every currently
    ///   registered habit (`Missed` when never explicitly set).
    /// - Not read-only with respect to persistence: creation or backfill
    ///   writes through before returning.
    pub fn get_or_create(&mut self, date_key: &str) -> TrackerResult<DailyRecord> {
        let ids = self.habit_ids();
        let created = !self.state.records.contains_key(date_key);
        let record = self.state.records.entry(date_key.to_string()).or_default();
        let backfilled = ensure_backfilled(record, &ids);
        let snapshot = record.clone();

        if created || backfilled {
            self.persist_records()?;
        }
        Ok(snapshot)
    }

    /// Overwrites one habit's state for the day.
    ///
    /// The three states are mutually exclusive; writing `Skipped` over
    /// `Completed` replaces it, never stacks. Unknown habit ids are
    /// ignored.
    pub fn set_habit_state(
        &mut self,
        date_key: &str,
        habit_id: &str,
        state: HabitState,
    ) -> TrackerResult<()> {
        if !self.state.habits.iter().any(|habit| habit.id == habit_id) {
            return Ok(());
        }

        let ids = self.habit_ids();
        let record = self.state.records.entry(date_key.to_string()).or_default();
        ensure_backfilled(record, &ids);
        record.habit_states.insert(habit_id.to_string(), state);
        self.persist_records()
    }

    /// Appends a memo to the day.
    ///
    /// Whitespace-only text is a silent no-op; stored text is trimmed.
    pub fn add_memo(&mut self, date_key: &str, text: &str) -> TrackerResult<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        let record = self.state.records.entry(date_key.to_string()).or_default();
        record.memos.push(Memo {
            text: text.to_string(),
            done: false,
        });
        self.persist_records()
    }

    /// Removes the memo at `index`; out-of-range positions (including a
    /// day with no record) are a no-op and never create a record.
    pub fn delete_memo(&mut self, date_key: &str, index: usize) -> TrackerResult<()> {
        let Some(record) = self.state.records.get_mut(date_key) else {
            return Ok(());
        };
        if index >= record.memos.len() {
            return Ok(());
        }
        record.memos.remove(index);
        self.persist_records()
    }

    /// Sets the done flag of the memo at `index`; out-of-range positions
    /// are a no-op.
    pub fn set_memo_done(&mut self, date_key: &str, index: usize, done: bool) -> TrackerResult<()> {
        let Some(memo) = self
            .state
            .records
            .get_mut(date_key)
            .and_then(|record| record.memos.get_mut(index))
        else {
            return Ok(());
        };
        memo.done = done;
        self.persist_records()
    }

    pub(crate) fn habit_ids(&self) -> Vec<HabitId> {
        self.state.habits.iter().map(|habit| habit.id.clone()).collect()
    }
}
