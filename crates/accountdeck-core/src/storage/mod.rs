//! Persistence adapters.
//!
//! A [`Storage`] is a synchronous string key-value store in the style of
//! browser local storage: every value is a whole string, reads return the
//! last written value, writes overwrite it.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a persistence adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Underlying file system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto this adapter.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The write would grow the store past its quota.
    #[error("Storage quota exceeded writing `{key}`: {required} bytes needed, quota is {quota}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total size the store would have after the write.
        required: usize,
        /// Configured quota in bytes.
        quota: usize,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Synchronous string key-value store.
pub trait Storage {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot read the value.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot persist the value. The previous
    /// value is left in place.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove the value stored under `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot remove the value.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}
