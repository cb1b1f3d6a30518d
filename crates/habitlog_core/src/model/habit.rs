//! Habit definition model.
//!
//! # Responsibility
//! - Define the habit record owned by the registry.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `name` is non-empty and unique among all habits (enforced by the
//!   registry at creation time, not by this type).
//! - `color` is an opaque palette tag; unknown tags are tolerated and
//!   resolve to a fallback at display time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a habit.
///
/// Kept as a `String` alias: freshly created habits get a v4 uuid, but
/// historical payloads carry arbitrary id strings that must round-trip
/// unchanged.
pub type HabitId = String;

/// A user-defined recurring activity tracked per day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Stable id used as the key into per-day state maps.
    pub id: HabitId,
    /// Display name, unique case-sensitively among all habits.
    pub name: String,
    /// Palette color tag.
    pub color: String,
    /// Pinned/important flag.
    #[serde(default)]
    pub important: bool,
    /// Globally inactive without deleting history.
    #[serde(default)]
    pub disabled: bool,
}

impl Habit {
    /// Creates a habit with a freshly generated stable id.
    ///
    /// # Invariants
    /// - `disabled` starts as `false`.
    /// - Name validation is the registry's concern, not this constructor's.
    pub fn new(name: impl Into<String>, color: impl Into<String>, important: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color: color.into(),
            important,
            disabled: false,
        }
    }
}
