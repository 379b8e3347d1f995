//! In-memory storage adapter.

use std::collections::HashMap;

use super::{Storage, StorageError, StorageResult};

/// Storage backed by a `HashMap`, with an optional byte quota.
///
/// The quota counts key and value lengths of every entry, which is how
/// browsers account local storage usage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create an empty, unbounded storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty storage that rejects writes beyond `quota` bytes.
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Create a storage pre-populated with one entry.
    #[must_use]
    pub fn with_item(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut items = HashMap::new();
        items.insert(key.into(), value.into());
        Self { items, quota: None }
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Bytes currently used, as counted against the quota.
    #[must_use]
    pub fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota {
            let current = self.items.get(key).map_or(0, |v| key.len() + v.len());
            let required = self.used_bytes() - current + key.len() + value.len();
            if required > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_item("accounts").unwrap(), None);
    }

    #[test]
    fn set_overwrites() {
        let mut storage = MemoryStorage::new();
        storage.set_item("k", "one").unwrap();
        storage.set_item("k", "two").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("two"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn remove_missing_is_ok() {
        let mut storage = MemoryStorage::with_item("k", "v");
        storage.remove_item("k").unwrap();
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "1234").unwrap();

        let err = storage.set_item("k", "12345678").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                required: 9,
                quota: 8,
                ..
            }
        ));
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("1234"));
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.set_item("k", "1234567").unwrap();
        storage.set_item("k", "7654321").unwrap();
        assert_eq!(storage.used_bytes(), 8);
    }
}
