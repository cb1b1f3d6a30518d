//! Core domain logic for HabitLog.
//! This crate is the single source of truth for business invariants.

pub mod datekey;
pub mod logging;
pub mod migrate;
pub mod model;
pub mod palette;
pub mod store;
pub mod tracker;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{Habit, HabitId};
pub use model::record::{ensure_backfilled, DailyRecord, HabitState, Memo};
pub use store::{KeyValueStore, MemoryKvStore, SqliteKvStore, StoreError, StoreResult};
pub use tracker::gateway::{ExportPayload, PAYLOAD_VERSION};
pub use tracker::trend::{BarScale, TrendPoint, TREND_WINDOW_DAYS};
pub use tracker::{Tracker, TrackerError, TrackerResult, TrackerState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
