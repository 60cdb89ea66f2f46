//! Immutable progression snapshot handed to the presentation layer.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metric::MetricId;
use crate::streak::StreakState;

/// Derived pool view: configuration bound plus current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub capacity: u32,
    pub level: u32,
    pub last_refill_date: Option<NaiveDate>,
}

/// Fully-derived progression state as of one calendar date.
///
/// Created fresh on every recomputation and never mutated in place;
/// consumers hold only copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionSnapshot {
    pub as_of: NaiveDate,
    pub streaks: BTreeMap<MetricId, StreakState>,
    pub pools: BTreeMap<String, PoolSnapshot>,
    pub unlocks: BTreeMap<String, BTreeSet<String>>,
}

impl ProgressionSnapshot {
    /// Streak for a metric, or the empty state if absent.
    pub fn streak(&self, metric: MetricId) -> StreakState {
        self.streaks
            .get(&metric)
            .copied()
            .unwrap_or_else(StreakState::empty)
    }

    /// Whether `id` is unlocked in `collection`.
    pub fn is_unlocked(&self, collection: &str, id: &str) -> bool {
        self.unlocks
            .get(collection)
            .is_some_and(|set| set.contains(id))
    }
}
