//! Tracker state and use-case services.
//!
//! # Responsibility
//! - Own the single in-memory aggregate (habits, records, keywords).
//! - Orchestrate mutations with explicit write-through persistence.
//!
//! # Invariants
//! - There is no ambient singleton; callers own the `Tracker` value.
//! - Every mutating operation persists its effect before returning.
//! - Record migration runs unconditionally on every load and import.

use crate::migrate::records_from_value;
use crate::model::habit::Habit;
use crate::model::record::DailyRecord;
use crate::store::{KeyValueStore, StoreError};
use log::info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod gateway;
pub mod records;
pub mod registry;
pub mod trend;

/// Storage key for the habit list.
pub const HABITS_KEY: &str = "habitTracker_habits";
/// Storage key for the records mapping.
pub const RECORDS_KEY: &str = "habitTracker_records";
/// Storage key for the keyword list.
pub const KEYWORDS_KEY: &str = "habitTracker_keywords";
/// Prefix of timestamped backup snapshot keys written on import.
pub const BACKUP_KEY_PREFIX: &str = "habitTracker_backup_";

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Tracker-level error taxonomy.
///
/// Validation variants carry enough context to tell the caller which rule
/// failed; rejected operations never leave partial state behind.
#[derive(Debug)]
pub enum TrackerError {
    /// Habit creation with an empty (after trim) name.
    EmptyName,
    /// Habit creation colliding with an existing name.
    DuplicateName(String),
    /// A payload or persisted value fails structural validation.
    InvalidShape(String),
    /// An import source could not be parsed as a structured document.
    MalformedDocument(String),
    /// Persistence-layer failure; callers should treat this as fatal.
    Store(StoreError),
    /// State could not be encoded for persistence.
    Serialize(serde_json::Error),
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name cannot be empty"),
            Self::DuplicateName(name) => write!(f, "a habit named `{name}` already exists"),
            Self::InvalidShape(detail) => write!(f, "payload failed validation: {detail}"),
            Self::MalformedDocument(detail) => {
                write!(f, "source is not a structured document: {detail}")
            }
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::EmptyName
            | Self::DuplicateName(_)
            | Self::InvalidShape(_)
            | Self::MalformedDocument(_) => None,
        }
    }
}

impl From<StoreError> for TrackerError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// The owned in-memory aggregate behind all tracker operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    /// Habit definitions in display (insertion) order.
    pub habits: Vec<Habit>,
    /// Date key -> per-day record, always version-4 shape in memory.
    pub records: BTreeMap<String, DailyRecord>,
    /// User-managed reference vocabulary; unique, insertion-ordered.
    pub keywords: Vec<String>,
}

/// Use-case surface over [`TrackerState`] and a persistence capability.
pub struct Tracker<S: KeyValueStore> {
    pub(crate) state: TrackerState,
    pub(crate) store: S,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads tracker state from the store, migrating records to the
    /// current shape.
    ///
    /// # Contract
    /// - Absent keys load as empty defaults; a fresh store is valid.
    /// - Record migration runs on every load, not only on version bumps.
    ///
    /// # Errors
    /// - `MalformedDocument` when a persisted value is not valid JSON.
    /// - `InvalidShape` when a persisted value decodes to the wrong shape.
    /// - `Store` when the persistence layer fails.
    pub fn init(store: S) -> TrackerResult<Self> {
        let habits: Vec<Habit> = match store.get(HABITS_KEY)? {
            Some(raw) => {
                let value = parse_persisted(HABITS_KEY, &raw)?;
                serde_json::from_value(value).map_err(|err| {
                    TrackerError::InvalidShape(format!("persisted habits: {err}"))
                })?
            }
            None => Vec::new(),
        };

        let records = match store.get(RECORDS_KEY)? {
            Some(raw) => {
                let value = parse_persisted(RECORDS_KEY, &raw)?;
                records_from_value(value).map_err(|err| {
                    TrackerError::InvalidShape(format!("persisted records: {err}"))
                })?
            }
            None => BTreeMap::new(),
        };

        let keywords: Vec<String> = match store.get(KEYWORDS_KEY)? {
            Some(raw) => {
                let value = parse_persisted(KEYWORDS_KEY, &raw)?;
                serde_json::from_value(value).map_err(|err| {
                    TrackerError::InvalidShape(format!("persisted keywords: {err}"))
                })?
            }
            None => Vec::new(),
        };

        info!(
            "event=state_load module=tracker status=ok habits={} records={} keywords={}",
            habits.len(),
            records.len(),
            keywords.len()
        );

        Ok(Self {
            state: TrackerState {
                habits,
                records,
                keywords,
            },
            store,
        })
    }

    /// Read-only view of the whole aggregate.
    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn persist_habits(&mut self) -> TrackerResult<()> {
        let raw = serde_json::to_string(&self.state.habits)?;
        self.store.set(HABITS_KEY, &raw)?;
        Ok(())
    }

    pub(crate) fn persist_records(&mut self) -> TrackerResult<()> {
        let raw = serde_json::to_string(&self.state.records)?;
        self.store.set(RECORDS_KEY, &raw)?;
        Ok(())
    }

    pub(crate) fn persist_keywords(&mut self) -> TrackerResult<()> {
        let raw = serde_json::to_string(&self.state.keywords)?;
        self.store.set(KEYWORDS_KEY, &raw)?;
        Ok(())
    }
}

fn parse_persisted(key: &str, raw: &str) -> TrackerResult<Value> {
    serde_json::from_str(raw)
        .map_err(|err| TrackerError::MalformedDocument(format!("value under `{key}`: {err}")))
}
