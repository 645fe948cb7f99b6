//! Audit log store
//!
//! Append-style list of action records. Entries are seeded or appended,
//! never mutated or deleted.

use crate::backend::{StorageBackend, AUDIT_LOG_KEY};
use crate::error::StoreError;
use legiflow_core::AuditEntry;

/// Audit trail with write-through persistence
#[derive(Debug)]
pub struct AuditLogStore<B: StorageBackend> {
    backend: B,
    entries: Vec<AuditEntry>,
}

impl<B: StorageBackend> AuditLogStore<B> {
    /// Load the log from the backend
    ///
    /// Missing or unreadable payloads degrade to an empty log.
    #[must_use]
    pub fn open(backend: B) -> Self {
        let entries = match backend.read(AUDIT_LOG_KEY) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!("unreadable audit log, starting empty: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("audit log read failed, starting empty: {err}");
                Vec::new()
            }
        };

        Self { backend, entries }
    }

    /// Snapshot of the log, oldest first
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Seed the log if it is empty
    ///
    /// # Errors
    /// Serialization or backend write failure.
    pub fn seed_if_empty(&mut self, entries: Vec<AuditEntry>) -> Result<(), StoreError> {
        if self.entries.is_empty() {
            tracing::info!(count = entries.len(), "seeding audit log");
            self.commit(entries)?;
        }
        Ok(())
    }

    /// Append one entry to the log
    ///
    /// # Errors
    /// Serialization or backend write failure; the log is unchanged.
    pub fn append(&mut self, entry: AuditEntry) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        next.push(entry);
        self.commit(next)
    }

    /// Next unused entry id
    #[inline]
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.entries.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }

    fn commit(&mut self, next: Vec<AuditEntry>) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&next)?;
        self.backend.write(AUDIT_LOG_KEY, &payload)?;
        self.entries = next;
        Ok(())
    }
}
