//! LegiFlow Store - persistence layer
//!
//! Key/value persistence for the workflow core:
//! - `StorageBackend` trait with in-memory and JSON-file backends
//! - Write-through `DocumentStore` (read-modify-write, last-writer-wins)
//! - Seeded, append-style `AuditLogStore`
//!
//! # Example
//!
//! ```rust
//! use legiflow_store::{DocumentStore, MemoryBackend};
//!
//! let store = DocumentStore::open(MemoryBackend::new());
//! assert!(store.is_empty());
//! ```

#![warn(unreachable_pub)]

pub mod audit;
pub mod backend;
pub mod documents;
pub mod error;

pub use audit::AuditLogStore;
pub use backend::{JsonFileBackend, MemoryBackend, StorageBackend, AUDIT_LOG_KEY, DOCUMENTS_KEY};
pub use documents::DocumentStore;
pub use error::StoreError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
