//! File-backed storage adapter.
//!
//! Each key lives in its own `<key>.json` file under a single directory.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! reader never observes a half-written value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Storage, StorageError, StorageResult};

const FILE_EXTENSION: &str = "json";

/// Storage that keeps one file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`.
    ///
    /// The directory is created lazily on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file that stores `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidKey` if the key could escape the
    /// storage directory.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

fn validate_key(key: &str) -> StorageResult<()> {
    let invalid = key.is_empty()
        || key == "."
        || key.contains("..")
        || key.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No stored value at {:?}", path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let tmp_path = self.dir.join(format!(".{key}.{FILE_EXTENSION}.tmp"));
        std::fs::write(&tmp_path, value)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get_item("accounts").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        storage.set_item("accounts", "[]").unwrap();
        assert_eq!(storage.get_item("accounts").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested").join("accounts.json").exists());
        assert!(!dir.path().join("nested").join(".accounts.json.tmp").exists());
    }

    #[test]
    fn set_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("accounts", "a much longer first value").unwrap();
        storage.set_item("accounts", "short").unwrap();
        assert_eq!(
            storage.get_item("accounts").unwrap().as_deref(),
            Some("short")
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set_item("accounts", "[]").unwrap();
        storage.remove_item("accounts").unwrap();
        storage.remove_item("accounts").unwrap();
        assert_eq!(storage.get_item("accounts").unwrap(), None);
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        for key in ["", ".", "../escape", "a/b", "a\\b", "nul\0"] {
            assert!(
                matches!(
                    storage.set_item(key, "x"),
                    Err(StorageError::InvalidKey(_))
                ),
                "key {key:?} should be rejected"
            );
        }
    }
}
