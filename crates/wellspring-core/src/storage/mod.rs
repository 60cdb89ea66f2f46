//! Persistence layer: adapter trait, backends, and configuration.
//!
//! State is persisted as JSON blobs under namespaced string keys
//! (`logs:<metric>`, `pool:<pool>`, `unlocks:<collection>`). A blob that
//! cannot be deserialized is treated as missing, never as a hard crash:
//! the engine recovers that one key to an empty-but-valid default.

mod config;
pub mod memory;
pub mod sqlite;

pub use config::{CollectionConfig, Config, StreaksConfig};
pub use memory::MemoryAdapter;
pub use sqlite::SqliteAdapter;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{CoreError, StorageError};

/// Blob store the engine persists through.
///
/// Implementations are synchronous; the engine is the sole writer and every
/// command runs to completion before the next is accepted.
pub trait StorageAdapter {
    /// Load the blob for `key`, or `None` if it has never been saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Save the blob for `key`, replacing any previous value.
    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

// Lets callers share one adapter between the engine and direct store
// access (tests, maintenance tooling).
impl<A: StorageAdapter + ?Sized> StorageAdapter for std::rc::Rc<A> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}

/// Returns `~/.config/wellspring[-dev]/` based on WELLSPRING_ENV.
///
/// Set WELLSPRING_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, CoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WELLSPRING_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wellspring-dev")
    } else {
        base_dir.join("wellspring")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load and deserialize the value under `key`.
///
/// Unreadable or undeserializable blobs are logged and reported as
/// missing, so one corrupted key degrades to its default instead of
/// failing the whole recomputation.
pub fn load_json<T: DeserializeOwned>(adapter: &dyn StorageAdapter, key: &str) -> Option<T> {
    let bytes = match adapter.load(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "failed to load persisted state, treating as missing");
            return None;
        }
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "corrupt persisted state, falling back to defaults");
            None
        }
    }
}

/// Serialize `value` and save it under `key`.
pub fn save_json<T: Serialize>(
    adapter: &dyn StorageAdapter,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let bytes = serde_json::to_vec(value)?;
    adapter.save(key, &bytes)?;
    Ok(())
}
