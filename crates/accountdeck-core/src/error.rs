//! Error types for the core library.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The persisted collection exists but could not be decoded.
    ///
    /// The store is not constructed; there is no fallback to defaults once a
    /// value is present under the key.
    #[error("Failed to hydrate accounts from key `{key}`: {source}")]
    Hydration {
        /// Storage key that held the unreadable value.
        key: String,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be encoded for write-back.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persistence adapter rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
