//! Progression aggregator: the engine's public entry point.
//!
//! Composes the log store, streak calculator, resource pools, and unlock
//! collections into one snapshot. Derived state is re-derived from the log
//! store on every mutation; nothing incremental is trusted across reloads.
//! Write-path errors surface to the caller, recomputation-path errors
//! degrade the affected key to an empty-but-valid default.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, PoolError, Result};
use crate::metric::{MetricId, MetricPayload};
use crate::pool::PoolState;
use crate::snapshot::{PoolSnapshot, ProgressionSnapshot};
use crate::storage::{load_json, save_json, Config, SqliteAdapter, StorageAdapter};
use crate::store::LogStore;
use crate::streak::{self, StreakState};
use crate::unlock::{self, CounterSource, UnlockState};

/// The progression computation engine.
///
/// Owns its clock, storage adapter, and configuration via explicit
/// injection; there are no ambient singletons. Single-threaded: every
/// command runs to completion before the next is accepted.
pub struct ProgressionEngine {
    adapter: Box<dyn StorageAdapter>,
    clock: Box<dyn Clock>,
    config: Config,
}

impl ProgressionEngine {
    pub fn new(adapter: Box<dyn StorageAdapter>, clock: Box<dyn Clock>, config: Config) -> Self {
        Self {
            adapter,
            clock,
            config,
        }
    }

    /// Open the engine over the default on-disk database, system clock,
    /// and user configuration.
    pub fn open() -> Result<Self> {
        Ok(Self::new(
            Box::new(SqliteAdapter::open()?),
            Box::new(SystemClock),
            Config::load()?,
        ))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Record a metric value for a calendar date and return the freshly
    /// recomputed snapshot.
    ///
    /// # Errors
    /// Returns a validation error for out-of-domain payloads (nothing is
    /// persisted) or a storage error if the write cannot be saved.
    pub fn write(
        &self,
        metric: MetricId,
        date: NaiveDate,
        payload: MetricPayload,
    ) -> Result<ProgressionSnapshot> {
        LogStore::new(self.adapter.as_ref()).write(metric, date, payload)?;
        Ok(self.recompute(self.clock.today()))
    }

    /// Consume `amount` from a pool, all-or-nothing.
    ///
    /// The daily refill is applied first, so a pool observed for the first
    /// time today refills before the consumption is checked.
    ///
    /// # Errors
    /// Returns [`PoolError::UnknownPool`] for an unconfigured pool id and
    /// [`PoolError::Insufficient`] when the level cannot cover `amount`
    /// (the level is left unchanged).
    pub fn consume(&self, pool_id: &str, amount: u32) -> Result<ProgressionSnapshot> {
        let cfg = self
            .config
            .pools
            .get(pool_id)
            .ok_or_else(|| PoolError::UnknownPool(pool_id.to_string()))?;
        let today = self.clock.today();
        let key = format!("pool:{pool_id}");

        let mut state: PoolState =
            load_json(self.adapter.as_ref(), &key).unwrap_or_else(|| PoolState::fresh(cfg));
        state.clamp(cfg);
        let refilled = state.refill(cfg, today, self.bonus_streak_alive(cfg, today));

        match state.consume(amount) {
            Ok(()) => {
                save_json(self.adapter.as_ref(), &key, &state)?;
                debug!(pool = pool_id, amount, level = state.level, "consumed");
                Ok(self.recompute(today))
            }
            Err(e) => {
                // The refill was a legitimate observation; keep it even
                // though the consumption was rejected.
                if refilled {
                    if let Err(save_err) = save_json(self.adapter.as_ref(), &key, &state) {
                        warn!(pool = pool_id, error = %save_err, "failed to persist refill");
                    }
                }
                Err(CoreError::Pool(e))
            }
        }
    }

    /// Current progression snapshot as of today.
    pub fn snapshot(&self) -> ProgressionSnapshot {
        self.recompute(self.clock.today())
    }

    /// Re-derive the full snapshot from the log store as of `as_of`.
    ///
    /// Pure with respect to (store contents, persisted ratchets, persisted
    /// pool state, `as_of`): two calls with no intervening writes yield
    /// equal snapshots. A corrupted persisted key falls back to its
    /// empty-but-valid default without affecting the others.
    pub fn recompute(&self, as_of: NaiveDate) -> ProgressionSnapshot {
        let store = LogStore::new(self.adapter.as_ref());

        let mut streaks = BTreeMap::new();
        for metric in MetricId::ALL {
            let dates = store.all_dates(metric);
            let policy = self.config.streaks.policy_for(metric);
            streaks.insert(metric, streak::evaluate(&dates, as_of, policy));
        }

        let mut pools = BTreeMap::new();
        for (pool_id, cfg) in &self.config.pools {
            let key = format!("pool:{pool_id}");
            let mut state: PoolState =
                load_json(self.adapter.as_ref(), &key).unwrap_or_else(|| PoolState::fresh(cfg));
            state.clamp(cfg);

            let alive = cfg
                .bonus_metric
                .map(|m| streaks[&m].is_alive())
                .unwrap_or(false);
            if state.refill(cfg, as_of, alive) {
                debug!(pool = %pool_id, level = state.level, "daily refill");
                if let Err(e) = save_json(self.adapter.as_ref(), &key, &state) {
                    warn!(pool = %pool_id, error = %e, "failed to persist refill");
                }
            }

            pools.insert(
                pool_id.clone(),
                PoolSnapshot {
                    capacity: cfg.capacity,
                    level: state.level,
                    last_refill_date: state.last_refill_date,
                },
            );
        }

        let mut unlocks = BTreeMap::new();
        for (collection_id, collection) in &self.config.collections {
            let key = format!("unlocks:{collection_id}");
            let mut state: UnlockState =
                load_json(self.adapter.as_ref(), &key).unwrap_or_default();

            let newly = unlock::evaluate(
                &collection.rules,
                |counter| self.counter_value(&store, &streaks, counter),
                &mut state,
                as_of,
            );
            if !newly.is_empty() {
                debug!(collection = %collection_id, unlocked = ?newly, "new unlocks");
                if let Err(e) = save_json(self.adapter.as_ref(), &key, &state) {
                    warn!(collection = %collection_id, error = %e, "failed to persist unlocks");
                }
            }

            unlocks.insert(collection_id.clone(), state.unlocked);
        }

        ProgressionSnapshot {
            as_of,
            streaks,
            pools,
            unlocks,
        }
    }

    fn counter_value(
        &self,
        store: &LogStore<'_>,
        streaks: &BTreeMap<MetricId, StreakState>,
        counter: &CounterSource,
    ) -> u64 {
        match counter {
            CounterSource::TotalEntries { metric } => store.total_entries(*metric),
            CounterSource::MaxStreak { metric } => u64::from(streaks[metric].max),
            CounterSource::CompletedSessions { metric } => store.completed_sessions(*metric),
        }
    }

    fn bonus_streak_alive(&self, cfg: &crate::pool::PoolConfig, today: NaiveDate) -> bool {
        let Some(metric) = cfg.bonus_metric else {
            return false;
        };
        let store = LogStore::new(self.adapter.as_ref());
        let policy = self.config.streaks.policy_for(metric);
        streak::evaluate(&store.all_dates(metric), today, policy).is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryAdapter;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn engine_at(day: u32) -> ProgressionEngine {
        ProgressionEngine::new(
            Box::new(MemoryAdapter::new()),
            Box::new(FixedClock::new(date(day))),
            Config::default(),
        )
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let engine = engine_at(10);
        engine
            .write(MetricId::Hydration, date(10), MetricPayload::Hydration { cups: 5 })
            .unwrap();
        let first = engine.snapshot();
        let second = engine.snapshot();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_store_yields_valid_snapshot() {
        let engine = engine_at(1);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.streak(MetricId::Journal).current, 0);
        assert_eq!(snapshot.pools["ink"].level, 100);
        assert!(snapshot.unlocks["hydration_badges"].is_empty());
    }

    #[test]
    fn test_consume_drains_and_rejects_at_zero() {
        let engine = engine_at(1);
        // capacity=100, level=100: five consumes of 20 drain to zero.
        for expected in [80, 60, 40, 20, 0] {
            let snapshot = engine.consume("ink", 20).unwrap();
            assert_eq!(snapshot.pools["ink"].level, expected);
        }
        let err = engine.consume("ink", 1).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Pool(PoolError::Insufficient { requested: 1, available: 0 })
        ));
        assert_eq!(engine.snapshot().pools["ink"].level, 0);
    }

    #[test]
    fn test_unknown_pool_rejected() {
        let engine = engine_at(1);
        assert!(matches!(
            engine.consume("mana", 1).unwrap_err(),
            CoreError::Pool(PoolError::UnknownPool(_))
        ));
    }

    #[test]
    fn test_write_recomputes_streak() {
        let engine = engine_at(3);
        for d in 1..=2 {
            engine
                .write(MetricId::Journal, date(d), MetricPayload::Journal { word_count: 50 })
                .unwrap();
        }
        let snapshot = engine
            .write(MetricId::Journal, date(3), MetricPayload::Journal { word_count: 80 })
            .unwrap();
        assert_eq!(snapshot.streak(MetricId::Journal).current, 3);
        assert!(snapshot.is_unlocked("journal_stickers", "quill"));
    }

    #[test]
    fn test_corrupt_pool_key_does_not_block_others() {
        let adapter = MemoryAdapter::new();
        adapter.save("pool:ink", b"\x00\x01 not json").unwrap();
        let engine = ProgressionEngine::new(
            Box::new(adapter),
            Box::new(FixedClock::new(date(1))),
            Config::default(),
        );
        let snapshot = engine.snapshot();
        // Corrupt key falls back to a full pool; the rest is untouched.
        assert_eq!(snapshot.pools["ink"].level, 100);
        assert_eq!(snapshot.pools["energy"].level, 30);
        assert_eq!(snapshot.streak(MetricId::Hydration).current, 0);
    }

    #[test]
    fn test_refill_once_per_day_through_snapshot() {
        let engine = engine_at(1);
        engine.consume("ink", 50).unwrap();
        // Repeated snapshots on the same day must not refill again.
        assert_eq!(engine.snapshot().pools["ink"].level, 50);
        assert_eq!(engine.snapshot().pools["ink"].level, 50);
    }

    #[test]
    fn test_next_day_refills_exactly_once() {
        use std::rc::Rc;
        let clock = Rc::new(FixedClock::new(date(1)));
        let engine = ProgressionEngine::new(
            Box::new(MemoryAdapter::new()),
            Box::new(Rc::clone(&clock)),
            Config::default(),
        );

        engine.consume("ink", 90).unwrap();
        assert_eq!(engine.snapshot().pools["ink"].level, 10);

        // A week of idle days still refills by one day's worth only.
        clock.advance(7);
        assert_eq!(engine.snapshot().pools["ink"].level, 30);
    }
}
