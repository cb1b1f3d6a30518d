//! Date key codec.
//!
//! # Responsibility
//! - Canonicalize a calendar day to its stable `YYYY-MM-DD` record key.
//! - Provide the local-time day-equality check used by "today" highlighting.
//!
//! # Invariants
//! - Two dates with equal year/month/day produce identical keys.
//! - `parse_key` accepts exactly what `to_key` emits; no timezone math.

use chrono::{DateTime, Datelike, Local, NaiveDate};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar day as its canonical record key.
pub fn to_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a record key back to a calendar day.
///
/// Returns `None` for anything that is not a zero-padded `YYYY-MM-DD`
/// naming a real calendar date.
pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}

/// Returns whether two local timestamps fall on the same calendar day.
pub fn same_day(a: &DateTime<Local>, b: &DateTime<Local>) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Returns today's calendar day in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
