//! TOML-based engine configuration.
//!
//! Defines the streak policy per metric, the resource pool catalog, and
//! the unlock rule collections. Stored at
//! `~/.config/wellspring/config.toml`; a missing file yields the built-in
//! defaults, and missing sections default individually.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, CoreError};
use crate::metric::MetricId;
use crate::pool::PoolConfig;
use crate::streak::StreakPolicy;
use crate::unlock::{CounterSource, UnlockRule};

use super::data_dir;

/// Streak policy configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreaksConfig {
    /// Metrics whose streak breaks immediately on a missed day.
    /// Everything else gets the one-grace-day policy.
    #[serde(default)]
    pub strict: Vec<MetricId>,
}

impl StreaksConfig {
    pub fn policy_for(&self, metric: MetricId) -> StreakPolicy {
        if self.strict.contains(&metric) {
            StreakPolicy::Strict
        } else {
            StreakPolicy::GraceDay
        }
    }
}

/// One unlock collection: an ordered rule list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub rules: Vec<UnlockRule>,
}

/// Engine configuration.
///
/// Serialized to/from TOML at `~/.config/wellspring/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streaks: StreaksConfig,
    #[serde(default = "default_pools")]
    pub pools: BTreeMap<String, PoolConfig>,
    #[serde(default = "default_collections")]
    pub collections: BTreeMap<String, CollectionConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            streaks: StreaksConfig::default(),
            pools: default_pools(),
            collections: default_collections(),
        }
    }
}

fn default_pools() -> BTreeMap<String, PoolConfig> {
    let mut pools = BTreeMap::new();
    pools.insert(
        "ink".to_string(),
        PoolConfig {
            capacity: 100,
            base_refill: 20,
            streak_bonus: 5,
            bonus_metric: Some(MetricId::Journal),
        },
    );
    pools.insert(
        "energy".to_string(),
        PoolConfig {
            capacity: 30,
            base_refill: 8,
            streak_bonus: 2,
            bonus_metric: Some(MetricId::Exercise),
        },
    );
    pools
}

fn default_collections() -> BTreeMap<String, CollectionConfig> {
    let mut collections = BTreeMap::new();
    collections.insert(
        "hydration_badges".to_string(),
        CollectionConfig {
            rules: vec![
                rule("droplet", 3, CounterSource::TotalEntries { metric: MetricId::Hydration }),
                rule("stream", 7, CounterSource::TotalEntries { metric: MetricId::Hydration }),
                rule("river", 30, CounterSource::TotalEntries { metric: MetricId::Hydration }),
                rule("ocean", 90, CounterSource::TotalEntries { metric: MetricId::Hydration }),
            ],
        },
    );
    collections.insert(
        "journal_stickers".to_string(),
        CollectionConfig {
            rules: vec![
                rule("quill", 3, CounterSource::MaxStreak { metric: MetricId::Journal }),
                rule("scroll", 7, CounterSource::MaxStreak { metric: MetricId::Journal }),
                rule("tome", 14, CounterSource::MaxStreak { metric: MetricId::Journal }),
                rule("library", 30, CounterSource::MaxStreak { metric: MetricId::Journal }),
            ],
        },
    );
    collections.insert(
        "exercise_trophies".to_string(),
        CollectionConfig {
            rules: vec![
                rule("bronze", 5, CounterSource::CompletedSessions { metric: MetricId::Exercise }),
                rule("silver", 20, CounterSource::CompletedSessions { metric: MetricId::Exercise }),
                rule("gold", 50, CounterSource::CompletedSessions { metric: MetricId::Exercise }),
            ],
        },
    );
    collections
}

fn rule(id: &str, threshold: u64, counter: CounterSource) -> UnlockRule {
    UnlockRule {
        id: id.to_string(),
        threshold,
        counter,
    }
}

impl Config {
    /// Path to the configuration file.
    pub fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load the configuration, or the defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Ok(config)
    }

    /// Save the configuration to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
