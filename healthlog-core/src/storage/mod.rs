//! Local persistence for the journal.
//!
//! Records are stored as JSON text in a synchronous string-keyed store:
//! - `dailyLogs`: map of `YYYY-MM-DD` -> list of log entries
//! - `medications`: list of medications
//! - `doctorVisits`: list of doctor visits
//!
//! There is no locking. Two processes writing the same data directory at once
//! can overwrite each other's changes.

mod file_store;
mod memory_store;
mod record_key;
mod store;

use std::path::PathBuf;
use thiserror::Error;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use record_key::RecordKey;
pub use store::Store;

/// A synchronous string-keyed store of UTF-8 values.
pub trait KeyValueStore {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Errors that can occur while reading or writing records.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage quota exceeded writing '{key}' ({needed} of {limit} bytes)")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    #[error("Stored value for '{key}' is not valid: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
