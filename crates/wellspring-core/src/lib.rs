//! # Wellspring Core Library
//!
//! This library provides the progression computation engine for the
//! Wellspring wellness tracker. It turns raw per-day log entries
//! (hydration, sleep, weight, mood, journal, exercise) into derived
//! gamification state: consecutive-day streaks, capped daily-refill
//! resource pools, and threshold-based unlock collections. The
//! presentation layer is a thin consumer over the same core library.
//!
//! ## Architecture
//!
//! - **Log Store**: per-day ledger keyed by (metric, calendar date),
//!   last-write-wins, the single source of truth
//! - **Streak Calculator**: pure function of a date set and "today"
//! - **Resource Pools**: bounded counters refilled once per calendar date
//! - **Unlock Engine**: monotonic ratchet over threshold rules
//! - **Progression Engine**: composes the above into immutable snapshots,
//!   re-derived from the log store on every mutation
//!
//! ## Key Components
//!
//! - [`ProgressionEngine`]: the public entry point (`write`, `consume`,
//!   `snapshot`)
//! - [`Clock`]: injectable date source for deterministic day boundaries
//! - [`StorageAdapter`](storage::StorageAdapter): pluggable blob
//!   persistence (SQLite on disk, in-memory for tests)
//! - [`Config`](storage::Config): streak policies, pool catalog, and
//!   unlock rules

pub mod clock;
pub mod engine;
pub mod error;
pub mod metric;
pub mod pool;
pub mod snapshot;
pub mod storage;
pub mod store;
pub mod streak;
pub mod unlock;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::ProgressionEngine;
pub use error::{ConfigError, CoreError, PoolError, StorageError, ValidationError};
pub use metric::{MetricId, MetricPayload, MoodLevel};
pub use pool::{PoolConfig, PoolState};
pub use snapshot::{PoolSnapshot, ProgressionSnapshot};
pub use storage::{Config, MemoryAdapter, SqliteAdapter};
pub use store::{LogEntry, LogStore};
pub use streak::{StreakPolicy, StreakState};
pub use unlock::{CounterSource, UnlockRule, UnlockState};
