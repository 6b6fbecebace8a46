//! Key-value persistence port for the cart.
//!
//! The store serializes its whole state into one string and hands it to a
//! [`CartStorage`] under a fixed key. Implementations decide where the bytes
//! live; [`MemoryStorage`] keeps them in process, the storefront binary
//! writes them to disk.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted record could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The persisted record was written by a newer schema.
    #[error("unsupported schema version {found} (newest supported is {supported})")]
    UnsupportedVersion {
        /// Version found in the record.
        found: u32,
        /// Newest version this build understands.
        supported: u32,
    },
}

/// Persistence backend for named records.
///
/// Writes are whole-value replacements; there are no partial updates.
pub trait CartStorage: Send + Sync {
    /// Read the record stored under `key`, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one record.
    #[must_use]
    pub fn with_record(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

impl<S: CartStorage + ?Sized> CartStorage for std::sync::Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }
}
