//! Error types for the lifecycle engine
//!
//! Covers the failure taxonomy:
//! - Precondition violations (locked sections, double votes)
//! - Missing documents or sections
//! - Illegal status transitions

use crate::types::{DocumentStatus, SectionId, VoteOption};

/// Lifecycle engine error type
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// Draft created without a title
    #[error("draft title must not be empty")]
    EmptyTitle,

    /// Referenced section does not exist
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// Edit attempted on a locked section
    #[error("section is locked: {0}")]
    SectionLocked(SectionId),

    /// Voter has already cast a vote
    #[error("member has already voted: {voter}")]
    AlreadyVoted {
        /// Offending voter identity
        voter: String,
    },

    /// Vote edit without a prior cast
    #[error("member has not voted yet: {voter}")]
    HasNotVoted {
        /// Offending voter identity
        voter: String,
    },

    /// Every member has already voted
    #[error("no absent members remain to cast a vote")]
    NoAbsentMembers,

    /// Vote edit would drain an empty bucket
    #[error("cannot retract vote from empty bucket: {0}")]
    EmptyBucket(VoteOption),

    /// Status state machine forbids the transition
    #[error("illegal status transition: {from} -> {to}")]
    InvalidTransition {
        /// Current status
        from: DocumentStatus,
        /// Requested status
        to: DocumentStatus,
    },

    /// Progress value outside 0-100
    #[error("progress out of range: {0}")]
    ProgressOutOfRange(u32),
}

impl LifecycleError {
    /// Whether the caller attempted a state-incompatible operation
    ///
    /// Distinguishes precondition violations from lookup failures.
    #[inline]
    #[must_use]
    pub fn is_precondition_violation(&self) -> bool {
        !matches!(self, Self::SectionNotFound(_))
    }
}
