//! Consecutive-day streak evaluation.
//!
//! A streak is a pure function of the set of dates with an entry and
//! "today" from the [`Clock`](crate::clock::Clock). `current` is defined
//! relative to today and is never replayed historically: back-filling a
//! past date can raise `max` but never repairs a broken `current`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How a missed day affects the running streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakPolicy {
    /// No entry today keeps yesterday's run alive but does not extend it.
    #[default]
    GraceDay,
    /// The streak counts only when today itself has an entry.
    Strict,
}

/// Derived streak state for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    /// Length of the run ending at (or alive through) today.
    pub current: u32,
    /// Longest consecutive run anywhere in the date set.
    pub max: u32,
    /// Most recent date with an entry, if any.
    pub last_log_date: Option<NaiveDate>,
}

impl StreakState {
    pub fn empty() -> Self {
        Self {
            current: 0,
            max: 0,
            last_log_date: None,
        }
    }

    /// Whether the streak is alive as of the evaluation date.
    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Evaluate streak state for a metric's date set as of `today`.
///
/// `current` anchors at today if it has an entry, or (under the grace-day
/// policy) at yesterday if only yesterday does; otherwise it is 0. `max`
/// is recomputed in a single ascending pass over the sorted set.
pub fn evaluate(dates: &BTreeSet<NaiveDate>, today: NaiveDate, policy: StreakPolicy) -> StreakState {
    let last_log_date = dates.iter().next_back().copied();

    let anchor = if dates.contains(&today) {
        Some(today)
    } else if policy == StreakPolicy::GraceDay {
        today.pred_opt().filter(|y| dates.contains(y))
    } else {
        None
    };

    let current = anchor.map_or(0, |a| run_ending_at(dates, a));
    let max = longest_run(dates).max(current);

    StreakState {
        current,
        max,
        last_log_date,
    }
}

/// Length of the consecutive run that ends exactly at `end`.
fn run_ending_at(dates: &BTreeSet<NaiveDate>, end: NaiveDate) -> u32 {
    let mut len = 0u32;
    let mut cursor = Some(end);
    while let Some(day) = cursor {
        if !dates.contains(&day) {
            break;
        }
        len += 1;
        cursor = day.pred_opt();
    }
    len
}

/// Longest window of consecutive dates, one pass over the sorted set.
fn longest_run(dates: &BTreeSet<NaiveDate>) -> u32 {
    let mut max = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in dates {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        max = max.max(run);
        prev = Some(day);
    }
    max
}
