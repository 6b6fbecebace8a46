//! File-backed record storage.
//!
//! Each record lives in `<dir>/<key>.json`. Writes go to a hidden sibling
//! file first and are renamed into place, so readers only ever see a
//! complete record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shopnext_core::{CartStorage, StorageError};

/// Stores records as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a storage rooted at `dir`.
    ///
    /// The directory is created on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the records.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, self.path_for(key))?;

        tracing::debug!(key, dir = %self.dir.display(), "Record saved");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.load("cart-storage").unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.save("cart-storage", r#"{"version":1}"#).unwrap();
        assert_eq!(
            storage.load("cart-storage").unwrap().as_deref(),
            Some(r#"{"version":1}"#)
        );
        assert!(dir.path().join("cart-storage.json").exists());
    }

    #[test]
    fn test_save_replaces_whole_record() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.save("k", "a much longer first value").unwrap();
        storage.save("k", "short").unwrap();

        assert_eq!(storage.load("k").unwrap().as_deref(), Some("short"));
        assert!(!dir.path().join(".k.json.tmp").exists());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data").join("records");
        let storage = FileStorage::new(&nested);

        storage.save("k", "v").unwrap();
        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_unreadable_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A directory where the file should be cannot be read as a string.
        fs::create_dir(storage.path_for("k")).unwrap();

        assert!(matches!(storage.load("k"), Err(StorageError::Io(_))));
    }
}
