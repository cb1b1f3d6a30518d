//! Domain model for habits and per-day records.
//!
//! # Responsibility
//! - Define the canonical (version 4) data structures used by core logic.
//! - Keep wire field names stable with historically persisted data.
//!
//! # Invariants
//! - Every habit is identified by a stable `HabitId` string.
//! - In-memory state is always version-4 shape; older shapes exist only
//!   inside the migration pipeline.

pub mod habit;
pub mod record;
