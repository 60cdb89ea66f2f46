//! Bounded resource pools with a daily refill cadence.
//!
//! A pool is a consumable allowance (ink for journal decorations, energy
//! for exercise rewards) that refills once per calendar date when observed.
//! A pool untouched for N days still refills by exactly one day's worth on
//! the next observation: there is no backlog accumulation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PoolError;
use crate::metric::MetricId;

/// Static configuration for one pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Upper bound on the level; refills clamp here.
    pub capacity: u32,
    /// Amount restored on the first observation of a new calendar date.
    pub base_refill: u32,
    /// Extra refill granted while the bonus metric's streak is alive.
    #[serde(default)]
    pub streak_bonus: u32,
    /// Metric whose streak gates the bonus, if any.
    #[serde(default)]
    pub bonus_metric: Option<MetricId>,
}

/// Persisted state for one pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    pub level: u32,
    /// Date the daily refill was last applied; guards idempotence.
    #[serde(default)]
    pub last_refill_date: Option<NaiveDate>,
}

impl PoolState {
    /// A never-observed pool starts full.
    pub fn fresh(config: &PoolConfig) -> Self {
        Self {
            level: config.capacity,
            last_refill_date: None,
        }
    }

    /// Clamp the level into bounds, for states loaded under an older or
    /// edited configuration.
    pub fn clamp(&mut self, config: &PoolConfig) {
        self.level = self.level.min(config.capacity);
    }

    /// Apply at most one daily refill for `today`.
    ///
    /// Returns true when the state changed. Repeated calls on the same
    /// calendar date are no-ops, and elapsed idle days never stack.
    pub fn refill(&mut self, config: &PoolConfig, today: NaiveDate, streak_alive: bool) -> bool {
        if self.last_refill_date == Some(today) {
            return false;
        }
        let bonus = if streak_alive { config.streak_bonus } else { 0 };
        self.level = self
            .level
            .saturating_add(config.base_refill)
            .saturating_add(bonus)
            .min(config.capacity);
        self.last_refill_date = Some(today);
        true
    }

    /// Consume `amount` from the pool, all-or-nothing.
    ///
    /// # Errors
    /// Returns [`PoolError::Insufficient`] if `amount` exceeds the level;
    /// the pool is left unchanged.
    pub fn consume(&mut self, amount: u32) -> Result<(), PoolError> {
        if amount > self.level {
            return Err(PoolError::Insufficient {
                requested: amount,
                available: self.level,
            });
        }
        self.level -= amount;
        Ok(())
    }
}
