//! Rolling 30-day trend aggregation.
//!
//! # Responsibility
//! - Derive the per-habit completion/skip/miss series used by charts.
//! - Compute completion-rate statistics over the window.
//!
//! # Invariants
//! - The window is 30 days, `[end - 29, end]` inclusive, ascending.
//! - Day resolution goes through get-or-create semantics, so a trend
//!   call may backfill and persist records.
//! - Chart encoding is three-level: completed, skipped, and missed bars
//!   are visually distinct.

use crate::datekey;
use crate::model::record::{ensure_backfilled, HabitState};
use crate::store::KeyValueStore;
use crate::tracker::{Tracker, TrackerResult};
use chrono::{Duration, NaiveDate};

/// Length of the rolling trend window in days.
pub const TREND_WINDOW_DAYS: i64 = 30;

/// One day of a habit's trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub state: HabitState,
    /// Marks the bar the UI highlights as the current day.
    pub is_today: bool,
}

/// Relative bar height for chart rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarScale {
    Full,
    Half,
    Minimum,
}

impl BarScale {
    /// Bar height as a percentage of the chart's full scale.
    pub fn percent(self) -> u8 {
        match self {
            Self::Full => 100,
            Self::Half => 50,
            Self::Minimum => 20,
        }
    }
}

impl HabitState {
    /// Chart bar height policy for this state.
    pub fn bar_scale(self) -> BarScale {
        match self {
            Self::Completed => BarScale::Full,
            Self::Skipped => BarScale::Half,
            Self::Missed => BarScale::Minimum,
        }
    }
}

impl<S: KeyValueStore> Tracker<S> {
    /// Returns the habit's 30-day series ending today (local time).
    pub fn trend(&mut self, habit_id: &str) -> TrackerResult<Vec<TrendPoint>> {
        self.trend_window(habit_id, datekey::today())
    }

    /// Returns the habit's 30-day series ending at `window_end`.
    ///
    /// # Contract
    /// - Exactly `TREND_WINDOW_DAYS` points, ascending by date.
    /// - Every touched record is backfilled against the current registry;
    ///   changes persist once per call.
    /// - Missing state entries resolve to `Missed`.
    pub fn trend_window(
        &mut self,
        habit_id: &str,
        window_end: NaiveDate,
    ) -> TrackerResult<Vec<TrendPoint>> {
        let ids = self.habit_ids();
        let today = datekey::today();
        let mut changed = false;
        let mut points = Vec::with_capacity(TREND_WINDOW_DAYS as usize);

        for offset in (0..TREND_WINDOW_DAYS).rev() {
            let date = window_end - Duration::days(offset);
            let key = datekey::to_key(date);
            let created = !self.state.records.contains_key(&key);
            let record = self.state.records.entry(key).or_default();
            if ensure_backfilled(record, &ids) || created {
                changed = true;
            }

            let state = record
                .habit_states
                .get(habit_id)
                .copied()
                .unwrap_or_default();
            points.push(TrendPoint {
                date,
                state,
                is_today: date == today,
            });
        }

        if changed {
            self.persist_records()?;
        }
        Ok(points)
    }

    /// Integer completion percentage over the window ending today.
    ///
    /// Only `Completed` days count; `Skipped` does not.
    pub fn completion_rate(&mut self, habit_id: &str) -> TrackerResult<u8> {
        self.completion_rate_window(habit_id, datekey::today())
    }

    /// Integer completion percentage over the window ending at
    /// `window_end`. Always within `0..=100`.
    pub fn completion_rate_window(
        &mut self,
        habit_id: &str,
        window_end: NaiveDate,
    ) -> TrackerResult<u8> {
        let series = self.trend_window(habit_id, window_end)?;
        let completed = series
            .iter()
            .filter(|point| matches!(point.state, HabitState::Completed))
            .count();
        Ok((completed as f64 * 100.0 / TREND_WINDOW_DAYS as f64).round() as u8)
    }
}
