//! Per-day log store: the single source of truth.
//!
//! One structured value per (metric, calendar date). Writes validate the
//! payload and replace any existing entry for that key (last-write-wins,
//! no history). Every derived value in the engine is recomputable from
//! this store plus the clock; everything else is disposable.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::metric::{MetricId, MetricPayload};
use crate::storage::{load_json, save_json, StorageAdapter};

/// One logged value for one metric on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub metric: MetricId,
    pub date: NaiveDate,
    pub payload: MetricPayload,
}

/// Append/overwrite ledger keyed by (metric, calendar date).
///
/// Each metric's entries persist as one JSON blob under `logs:<metric>`,
/// so a write never clobbers an unrelated metric. A corrupt blob reads
/// back as empty.
pub struct LogStore<'a> {
    adapter: &'a dyn StorageAdapter,
}

impl<'a> LogStore<'a> {
    pub fn new(adapter: &'a dyn StorageAdapter) -> Self {
        Self { adapter }
    }

    fn key(metric: MetricId) -> String {
        format!("logs:{metric}")
    }

    fn load_map(&self, metric: MetricId) -> BTreeMap<NaiveDate, MetricPayload> {
        load_json(self.adapter, &Self::key(metric)).unwrap_or_default()
    }

    /// Write `payload` for (metric, date), replacing any existing entry.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for out-of-domain payloads or a
    /// payload whose shape belongs to a different metric; nothing is
    /// persisted in that case.
    pub fn write(
        &self,
        metric: MetricId,
        date: NaiveDate,
        payload: MetricPayload,
    ) -> Result<(), CoreError> {
        payload.validate()?;
        if payload.metric() != metric {
            return Err(ValidationError::MetricMismatch {
                metric,
                payload: payload.metric(),
            }
            .into());
        }
        let mut entries = self.load_map(metric);
        entries.insert(date, payload);
        save_json(self.adapter, &Self::key(metric), &entries)
    }

    /// Remove the entry for (metric, date), if any.
    pub fn delete(&self, metric: MetricId, date: NaiveDate) -> Result<(), CoreError> {
        let mut entries = self.load_map(metric);
        if entries.remove(&date).is_some() {
            save_json(self.adapter, &Self::key(metric), &entries)?;
        }
        Ok(())
    }

    /// Read the entry for (metric, date).
    pub fn read(&self, metric: MetricId, date: NaiveDate) -> Option<MetricPayload> {
        self.load_map(metric).get(&date).cloned()
    }

    /// Entries in `[from, to]`, ascending by date.
    ///
    /// A pure read: repeating the same range yields identical results
    /// until the next write.
    pub fn read_range(&self, metric: MetricId, from: NaiveDate, to: NaiveDate) -> Vec<LogEntry> {
        self.load_map(metric)
            .range(from..=to)
            .map(|(&date, payload)| LogEntry {
                metric,
                date,
                payload: payload.clone(),
            })
            .collect()
    }

    /// Every date with an entry for `metric`.
    pub fn all_dates(&self, metric: MetricId) -> BTreeSet<NaiveDate> {
        self.load_map(metric).into_keys().collect()
    }

    /// Number of days with an entry for `metric`.
    pub fn total_entries(&self, metric: MetricId) -> u64 {
        self.load_map(metric).len() as u64
    }

    /// Number of days whose entry counts as a completed session.
    pub fn completed_sessions(&self, metric: MetricId) -> u64 {
        self.load_map(metric)
            .values()
            .filter(|p| p.counts_as_completed_session())
            .count() as u64
    }
}
