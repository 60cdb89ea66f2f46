//! Core error types for wellspring-core.
//!
//! This module defines the error hierarchy using thiserror. Write-path
//! errors (validation, insufficient resources) are returned to the caller;
//! recomputation-path errors are absorbed internally so derived state is
//! always renderable.

use std::path::PathBuf;
use thiserror::Error;

use crate::metric::MetricId;

/// Core error type for wellspring-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Payload rejected at write time
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Resource pool operation rejected
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    /// Persistence-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Validation errors raised on the write path.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Payload value outside its metric-specific domain
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },

    /// Payload shape does not belong to the metric being written
    #[error("Payload for metric '{payload}' cannot be written to metric '{metric}'")]
    MetricMismatch { metric: MetricId, payload: MetricId },
}

/// Resource pool errors.
#[derive(Error, Debug)]
pub enum PoolError {
    /// Consume exceeds the current level; the pool is left unchanged
    #[error("Insufficient resource: requested {requested}, available {available}")]
    Insufficient { requested: u32, available: u32 },

    /// Pool id not present in the configuration
    #[error("Unknown pool: {0}")]
    UnknownPool(String),
}

/// Persistence-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the database file
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
