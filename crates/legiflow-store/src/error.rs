//! Error types for the persistence layer

use legiflow_core::DocumentId;

/// Store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced document is not in the store
    #[error("document not found: {0}")]
    DocumentNotFound(DocumentId),

    /// A document with this id is already in the store
    #[error("duplicate document id: {0}")]
    DuplicateDocument(DocumentId),

    /// Collection failed to serialize or deserialize
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Backend read or write failed
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Backend(err.to_string())
    }
}
