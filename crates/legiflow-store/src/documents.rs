//! Write-through document store
//!
//! Owns the in-memory document collection. Every mutation rebuilds the
//! collection, serializes it, writes it through the backend, and only then
//! commits it to memory, so a failed write leaves the store unchanged.
//! Last-writer-wins; there is no conflict detection (single-operator
//! model).

use crate::backend::{StorageBackend, DOCUMENTS_KEY};
use crate::error::StoreError;
use legiflow_core::{Document, DocumentId};

/// Document collection with write-through persistence
#[derive(Debug)]
pub struct DocumentStore<B: StorageBackend> {
    backend: B,
    documents: Vec<Document>,
}

impl<B: StorageBackend> DocumentStore<B> {
    /// Load the collection from the backend
    ///
    /// A missing key or an unreadable payload degrades to an empty
    /// collection; the store never fails to open.
    #[must_use]
    pub fn open(backend: B) -> Self {
        let documents = match backend.read(DOCUMENTS_KEY) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(docs) => docs,
                Err(err) => {
                    tracing::warn!("unreadable document collection, starting empty: {err}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("document read failed, starting empty: {err}");
                Vec::new()
            }
        };

        tracing::debug!(count = documents.len(), "document store opened");
        Self { backend, documents }
    }

    /// Snapshot of the collection, in storage order
    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Number of documents
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Insert a new document at the front of the collection
    ///
    /// New drafts are listed first, matching the drafting view ordering.
    /// Ids must be unique; generated sequence numbers can collide, so the
    /// caller retries with a fresh id on `DuplicateDocument`.
    ///
    /// # Errors
    /// - `StoreError::DuplicateDocument` if a document already has this id
    /// - Serialization or backend write failure; the collection is unchanged
    pub fn insert(&mut self, doc: Document) -> Result<(), StoreError> {
        if self.get(&doc.id).is_some() {
            return Err(StoreError::DuplicateDocument(doc.id));
        }
        let mut next = self.documents.clone();
        next.insert(0, doc);
        self.commit(next)
    }

    /// Replace the stored document with the same id
    ///
    /// # Errors
    /// - `StoreError::DocumentNotFound` if no document has this id
    /// - Serialization or backend write failure; the collection is unchanged
    pub fn update(&mut self, doc: Document) -> Result<(), StoreError> {
        let mut next = self.documents.clone();
        let slot = next
            .iter_mut()
            .find(|d| d.id == doc.id)
            .ok_or_else(|| StoreError::DocumentNotFound(doc.id.clone()))?;
        *slot = doc;
        self.commit(next)
    }

    /// Permanently remove a document
    ///
    /// Hard delete: no soft-delete, no tombstone. Returns the removed
    /// document.
    ///
    /// # Errors
    /// - `StoreError::DocumentNotFound` if no document has this id
    /// - Serialization or backend write failure; the collection is unchanged
    pub fn remove(&mut self, id: &DocumentId) -> Result<Document, StoreError> {
        let mut next = self.documents.clone();
        let idx = next
            .iter()
            .position(|d| &d.id == id)
            .ok_or_else(|| StoreError::DocumentNotFound(id.clone()))?;
        let removed = next.remove(idx);
        self.commit(next)?;
        Ok(removed)
    }

    /// Seed the collection if it is empty
    ///
    /// No-op when any documents are already present.
    ///
    /// # Errors
    /// Serialization or backend write failure.
    pub fn seed_if_empty(&mut self, docs: Vec<Document>) -> Result<(), StoreError> {
        if self.documents.is_empty() {
            tracing::info!(count = docs.len(), "seeding document collection");
            self.commit(docs)?;
        }
        Ok(())
    }

    /// Write the whole collection through, then commit to memory
    fn commit(&mut self, next: Vec<Document>) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&next)?;
        self.backend.write(DOCUMENTS_KEY, &payload)?;
        self.documents = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use legiflow_test_utils::{fixed_engine, sample_draft};

    #[test]
    fn open_on_empty_backend_starts_empty() {
        let store = DocumentStore::open(MemoryBackend::new());
        assert!(store.is_empty());
    }

    #[test]
    fn insert_prepends() {
        let mut store = DocumentStore::open(MemoryBackend::new());
        let engine = fixed_engine();

        let first = engine
            .create_draft("First", legiflow_core::DocumentType::Ordinance, "clerk")
            .unwrap();
        let second = engine
            .create_draft("Second", legiflow_core::DocumentType::Resolution, "clerk")
            .unwrap();

        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();

        assert_eq!(store.documents()[0].id, second.id);
        assert_eq!(store.documents()[1].id, first.id);
    }

    #[test]
    fn insert_duplicate_id_fails_unchanged() {
        let mut store = DocumentStore::open(MemoryBackend::new());
        let doc = sample_draft();
        let id = doc.id.clone();

        store.insert(doc.clone()).unwrap();
        let err = store.insert(doc).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateDocument(ref dup) if dup == &id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_missing_document_fails_unchanged() {
        let mut store = DocumentStore::open(MemoryBackend::new());
        let doc = sample_draft();

        let err = store.update(doc).unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_is_permanent() {
        let mut store = DocumentStore::open(MemoryBackend::new());
        let doc = sample_draft();
        let id = doc.id.clone();

        store.insert(doc).unwrap();
        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(store.get(&id).is_none());

        let err = store.remove(&id).unwrap_err();
        assert!(matches!(err, StoreError::DocumentNotFound(_)));
    }

    #[test]
    fn seed_if_empty_is_one_shot() {
        let mut store = DocumentStore::open(MemoryBackend::new());
        store
            .seed_if_empty(legiflow_test_utils::fixture_documents())
            .unwrap();
        assert_eq!(store.len(), 7);

        // Second seed is a no-op.
        store.seed_if_empty(vec![sample_draft()]).unwrap();
        assert_eq!(store.len(), 7);
    }

    #[test]
    fn corrupt_payload_recovers_to_empty() {
        let backend = MemoryBackend::new();
        backend.write(DOCUMENTS_KEY, "{not json").unwrap();

        let store = DocumentStore::open(backend);
        assert!(store.is_empty());
    }
}
