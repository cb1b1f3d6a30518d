//! Habit registry operations.
//!
//! # Responsibility
//! - Own the ordered habit list: creation, deletion, flag toggles.
//! - Cascade habit deletion into every per-day record.
//!
//! # Invariants
//! - Names are trimmed, then validated non-empty and unique
//!   (case-sensitive exact match).
//! - List order is display order; new habits append at the end.
//! - After `delete_habit(id)` returns, no record holds a state for `id`.
//! - Toggles on unknown ids are silent no-ops (stale UI references).
//!
//! Renaming is deliberately unsupported: a rename would either reuse the
//! id (not what the product ever did) or orphan history. Delete and
//! recreate is the documented path.

use crate::model::habit::{Habit, HabitId};
use crate::store::KeyValueStore;
use crate::tracker::{Tracker, TrackerError, TrackerResult};
use log::info;

impl<S: KeyValueStore> Tracker<S> {
    /// Creates a habit and appends it to the display list.
    ///
    /// # Contract
    /// - `name` is trimmed before validation; whitespace-only is rejected.
    /// - Returns the new habit's stable id on success.
    ///
    /// # Errors
    /// - `EmptyName` / `DuplicateName` with no state change.
    pub fn add_habit(
        &mut self,
        name: &str,
        color: &str,
        important: bool,
    ) -> TrackerResult<HabitId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        if self.state.habits.iter().any(|habit| habit.name == name) {
            return Err(TrackerError::DuplicateName(name.to_string()));
        }

        let habit = Habit::new(name, color, important);
        let id = habit.id.clone();
        self.state.habits.push(habit);
        self.persist_habits()?;

        info!(
            "event=habit_add module=registry status=ok id={} name_len={} important={}",
            id,
            name.len(),
            important
        );
        Ok(id)
    }

    /// Deletes a habit and purges its id from every record.
    ///
    /// # Contract
    /// - Unknown ids are a no-op.
    /// - The habit list and all touched records are mutated in memory
    ///   first, then written through, so a caller never observes a
    ///   partial cascade.
    pub fn delete_habit(&mut self, id: &str) -> TrackerResult<()> {
        let before = self.state.habits.len();
        self.state.habits.retain(|habit| habit.id != id);
        let removed = self.state.habits.len() != before;

        let mut purged_records = 0usize;
        for record in self.state.records.values_mut() {
            if record.habit_states.remove(id).is_some() {
                purged_records += 1;
            }
        }

        if !removed && purged_records == 0 {
            return Ok(());
        }

        self.persist_habits()?;
        self.persist_records()?;

        info!(
            "event=habit_delete module=registry status=ok id={id} purged_records={purged_records}"
        );
        Ok(())
    }

    /// Flips the `important` flag; unknown ids are ignored.
    pub fn toggle_important(&mut self, id: &str) -> TrackerResult<()> {
        self.toggle_flag(id, |habit| {
            habit.important = !habit.important;
        })
    }

    /// Flips the `disabled` flag; unknown ids are ignored.
    ///
    /// Disabled habits keep their history and stay in the backfill set;
    /// the flag only marks them globally inactive for presentation.
    pub fn toggle_disabled(&mut self, id: &str) -> TrackerResult<()> {
        self.toggle_flag(id, |habit| {
            habit.disabled = !habit.disabled;
        })
    }

    /// Habit definitions in display order.
    pub fn habits(&self) -> &[Habit] {
        &self.state.habits
    }

    /// Appends a keyword to the reference vocabulary.
    ///
    /// Whitespace-only and duplicate entries are silent no-ops.
    pub fn add_keyword(&mut self, text: &str) -> TrackerResult<()> {
        let text = text.trim();
        if text.is_empty() || self.state.keywords.iter().any(|entry| entry == text) {
            return Ok(());
        }
        self.state.keywords.push(text.to_string());
        self.persist_keywords()
    }

    /// Removes a keyword; absent entries are a no-op.
    pub fn remove_keyword(&mut self, text: &str) -> TrackerResult<()> {
        let before = self.state.keywords.len();
        self.state.keywords.retain(|entry| entry != text);
        if self.state.keywords.len() == before {
            return Ok(());
        }
        self.persist_keywords()
    }

    /// Keyword list in insertion order.
    pub fn keywords(&self) -> &[String] {
        &self.state.keywords
    }

    fn toggle_flag(&mut self, id: &str, flip: impl FnOnce(&mut Habit)) -> TrackerResult<()> {
        let Some(habit) = self.state.habits.iter_mut().find(|habit| habit.id == id) else {
            return Ok(());
        };
        flip(habit);
        self.persist_habits()
    }
}
