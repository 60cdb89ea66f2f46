//! Threshold-based unlock collections.
//!
//! Each collection is an ordered list of rules evaluated against monotonic
//! counters (total entries, max streak, completed sessions). Unlocking is a
//! one-way ratchet: the persisted set only grows, and newly computed
//! unlocks merge into it via union, never replacement, so later data edits
//! that lower a counter cannot take an unlock away.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::metric::MetricId;

/// Monotonic counter a rule's threshold is compared against.
///
/// Counters that can decrease (a live `current` streak, today's cup count)
/// are deliberately not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CounterSource {
    /// Total number of days with an entry for the metric.
    TotalEntries { metric: MetricId },
    /// Longest consecutive-day streak ever observed for the metric.
    MaxStreak { metric: MetricId },
    /// Days whose entry counts as a completed session (e.g. exercise done).
    CompletedSessions { metric: MetricId },
}

/// One threshold rule in a collection, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRule {
    /// Identifier of the unlockable (sticker, badge, trophy).
    pub id: String,
    /// Counter value at which the unlockable is granted.
    pub threshold: u64,
    pub counter: CounterSource,
}

/// A granted unlock, recorded permanently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockEvent {
    pub id: String,
    pub unlocked_on: NaiveDate,
}

/// Persisted ratchet state for one collection.
///
/// Kept independent of the live counter derivation: losing and recomputing
/// every other derived value must not shrink this set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnlockState {
    #[serde(default)]
    pub unlocked: BTreeSet<String>,
    /// Unlock log in grant order, for presentation.
    #[serde(default)]
    pub history: Vec<UnlockEvent>,
}

/// Evaluate `rules` against current counter values, merging new unlocks
/// into `state` by union.
///
/// Returns the ids granted by this pass in rule declaration order. Ids
/// already present stay present regardless of what the counters say now.
pub fn evaluate<F>(
    rules: &[UnlockRule],
    counter_value: F,
    state: &mut UnlockState,
    today: NaiveDate,
) -> Vec<String>
where
    F: Fn(&CounterSource) -> u64,
{
    let mut newly = Vec::new();
    for rule in rules {
        if state.unlocked.contains(&rule.id) {
            continue;
        }
        if counter_value(&rule.counter) >= rule.threshold {
            state.unlocked.insert(rule.id.clone());
            state.history.push(UnlockEvent {
                id: rule.id.clone(),
                unlocked_on: today,
            });
            newly.push(rule.id.clone());
        }
    }
    newly
}
