//! LegiFlow Core - legislative document workflow engine
//!
//! The state/query core of the workflow tool:
//! - Document, section, and vote data model
//! - Lifecycle engine enforcing status/stage/lock/tally transitions
//! - Reporting engine filtering and aggregating document snapshots
//!
//! # Example
//!
//! ```rust
//! use legiflow_core::{DocumentType, LifecycleEngine, VoteOption, WorkflowConfig};
//!
//! # fn example() -> Result<(), legiflow_core::LifecycleError> {
//! let engine = LifecycleEngine::new(WorkflowConfig::new());
//!
//! let mut doc = engine.create_draft("Test Ordinance", DocumentType::Ordinance, "clerk")?;
//! engine.cast_vote(&mut doc, "alice", VoteOption::Approve)?;
//!
//! assert_eq!(doc.votes.approve, 1);
//! assert_eq!(doc.votes.absent, 9);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod error;
pub mod lifecycle;
pub mod report;
pub mod types;

// Re-exports for convenience
pub use error::LifecycleError;
pub use lifecycle::LifecycleEngine;
pub use report::{generate_report, Report, ReportFilters};
pub use types::{
    AuditEntry, Document, DocumentId, DocumentStatus, DocumentType, ReadingStage, Section,
    SectionId, SectionStatus, VoteOption, VotePolicy, VoteTally, WorkflowConfig,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the workflow core
    pub use crate::{
        generate_report, Document, DocumentId, DocumentStatus, DocumentType, LifecycleEngine,
        LifecycleError, ReportFilters, SectionStatus, VoteOption, WorkflowConfig,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
