//! Key/value persistence backends
//!
//! The adapter surface is deliberately small: get/set of JSON payloads by
//! key, no transactions, no indexing. Collections are overwritten wholesale
//! on every write.

use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;

/// Well-known key for the document collection
pub const DOCUMENTS_KEY: &str = "legiflow.documents";

/// Well-known key for the audit log collection
pub const AUDIT_LOG_KEY: &str = "legiflow.audit_log";

/// Key-based get/set of JSON payloads
///
/// Implementations persist whole collections as JSON arrays; a missing key
/// reads as `None`, never as an error.
pub trait StorageBackend: Send + Sync {
    /// Read the payload stored under `key`, if any
    ///
    /// # Errors
    /// Backend failure (I/O and similar); a missing key is `Ok(None)`.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the payload stored under `key`
    ///
    /// # Errors
    /// Backend failure; partial writes are not surfaced distinctly.
    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError>;
}

/// In-memory backend; the default test double
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .insert(key.to_string(), payload.to_string());
        Ok(())
    }
}

/// File-per-key backend under a root directory
///
/// Keys map to `{root}/{key}.json`. The root directory is created lazily on
/// first write.
#[derive(Debug)]
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend rooted at `root`
    #[inline]
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), payload)?;
        Ok(())
    }
}
