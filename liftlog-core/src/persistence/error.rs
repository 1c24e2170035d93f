//! Persistence error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a key-value backend.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the persistence bridge.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Backend(#[from] BackendError),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Migration from {from} to {to} failed: {reason}")]
    Migration {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Saving revision {revision} failed: {reason}")]
    WriteFailed { revision: u64, reason: String },

    #[error("Persister stopped before saving revision {0}")]
    PersisterStopped(u64),
}
