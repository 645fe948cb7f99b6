//! Core types for the legislative workflow
//!
//! Defines the fundamental types for the engine:
//! - Document and section identifiers
//! - Status and reading-stage enums with their legal transitions
//! - Vote tallies and voting policy
//! - Workflow configuration

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unique document identifier, `{PREFIX}-{YEAR}-{SEQ}`
///
/// The prefix is derived from the document type (`ORD`/`RES`), the year is
/// four digits, and the sequence is a three-digit number.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Build an identifier from its parts
    #[inline]
    #[must_use]
    pub fn new(doc_type: DocumentType, year: i32, seq: u16) -> Self {
        Self(format!("{}-{year}-{seq:03}", doc_type.prefix()))
    }

    /// Build an identifier with a random three-digit sequence number
    #[inline]
    #[must_use]
    pub fn generate(doc_type: DocumentType, year: i32) -> Self {
        let seq = rand::rng().random_range(100..=999);
        Self::new(doc_type, year, seq)
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique section identifier within its parent document
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Identifier for the `ordinal`-th section of a document (1-based)
    #[inline]
    #[must_use]
    pub fn for_ordinal(doc_id: &DocumentId, ordinal: usize) -> Self {
        Self(format!("sec-{doc_id}-{ordinal}"))
    }

    /// Identifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of legislation; immutable after creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentType {
    /// A municipal ordinance
    Ordinance,
    /// A council resolution
    Resolution,
}

impl DocumentType {
    /// All document types, in display order
    pub const ALL: [DocumentType; 2] = [DocumentType::Ordinance, DocumentType::Resolution];

    /// Identifier prefix for this type
    #[inline]
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentType::Ordinance => "ORD",
            DocumentType::Resolution => "RES",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Ordinance => write!(f, "Ordinance"),
            DocumentType::Resolution => write!(f, "Resolution"),
        }
    }
}

/// Workflow status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentStatus {
    /// Being drafted
    Draft,
    /// Under council review
    #[serde(rename = "In Review")]
    InReview,
    /// Approved by the council
    Approved,
    /// Rejected by the council
    Rejected,
    /// Archived; terminal
    Archived,
}

impl DocumentStatus {
    /// All statuses, in workflow order
    ///
    /// Report maps are initialized from this list so every status is always
    /// present, never sparse.
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Draft,
        DocumentStatus::InReview,
        DocumentStatus::Approved,
        DocumentStatus::Rejected,
        DocumentStatus::Archived,
    ];

    /// Whether no transition out of this status exists
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, DocumentStatus::Archived)
    }

    /// Whether the status state machine permits `self -> next`
    ///
    /// Legal transitions: `Draft -> InReview -> {Approved, Rejected}`, and
    /// any non-archived status `-> Archived`.
    #[inline]
    #[must_use]
    pub fn can_transition_to(&self, next: DocumentStatus) -> bool {
        match (self, next) {
            (DocumentStatus::Archived, _) => false,
            (_, DocumentStatus::Archived) => true,
            (DocumentStatus::Draft, DocumentStatus::InReview) => true,
            (DocumentStatus::InReview, DocumentStatus::Approved | DocumentStatus::Rejected) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Draft => write!(f, "Draft"),
            DocumentStatus::InReview => write!(f, "In Review"),
            DocumentStatus::Approved => write!(f, "Approved"),
            DocumentStatus::Rejected => write!(f, "Rejected"),
            DocumentStatus::Archived => write!(f, "Archived"),
        }
    }
}

/// Procedural reading stage of a document
///
/// Linear progression; no engine operation advances it automatically. Stage
/// advancement policy belongs to the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadingStage {
    /// First reading before the council
    #[serde(rename = "1st Reading")]
    FirstReading,
    /// Second reading
    #[serde(rename = "2nd Reading")]
    SecondReading,
    /// Third reading
    #[serde(rename = "3rd Reading")]
    ThirdReading,
    /// Mayoral review
    #[serde(rename = "Mayor's Review")]
    MayorReview,
    /// Passed into effect
    Passed,
}

impl ReadingStage {
    /// Next stage in the linear progression, if any
    #[inline]
    #[must_use]
    pub fn next(&self) -> Option<ReadingStage> {
        match self {
            ReadingStage::FirstReading => Some(ReadingStage::SecondReading),
            ReadingStage::SecondReading => Some(ReadingStage::ThirdReading),
            ReadingStage::ThirdReading => Some(ReadingStage::MayorReview),
            ReadingStage::MayorReview => Some(ReadingStage::Passed),
            ReadingStage::Passed => None,
        }
    }
}

/// Editing state of a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionStatus {
    /// Open for edits
    Editing,
    /// Content frozen until unlocked
    Locked,
}

impl SectionStatus {
    /// The opposite state
    #[inline]
    #[must_use]
    pub fn toggled(&self) -> SectionStatus {
        match self {
            SectionStatus::Editing => SectionStatus::Locked,
            SectionStatus::Locked => SectionStatus::Editing,
        }
    }
}

/// A substructure of a document
///
/// Content is an opaque rich-text payload; the engine never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique within the parent document
    pub id: SectionId,
    /// Section heading
    pub title: String,
    /// Opaque rich-text payload
    pub content: String,
    /// Editing state
    pub status: SectionStatus,
}

impl Section {
    /// Create a new section open for editing
    #[inline]
    #[must_use]
    pub fn new(id: SectionId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            status: SectionStatus::Editing,
        }
    }

    /// Whether the section is locked against edits
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status == SectionStatus::Locked
    }
}

/// A member's choice on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOption {
    /// In favor
    Approve,
    /// Against
    Disapprove,
    /// Present but not voting
    Abstain,
}

impl std::fmt::Display for VoteOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteOption::Approve => write!(f, "approve"),
            VoteOption::Disapprove => write!(f, "disapprove"),
            VoteOption::Abstain => write!(f, "abstain"),
        }
    }
}

/// Vote tally for a document
///
/// Invariant: `approve + disapprove + abstain + absent == total_members`
/// after every engine mutation under the member-tracked policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteTally {
    /// Votes in favor
    pub approve: u32,
    /// Votes against
    pub disapprove: u32,
    /// Abstentions
    pub abstain: u32,
    /// Members yet to vote
    pub absent: u32,
    /// Fixed committee size
    pub total_members: u32,
}

impl VoteTally {
    /// Fresh tally with every member absent
    #[inline]
    #[must_use]
    pub fn new(total_members: u32) -> Self {
        Self {
            approve: 0,
            disapprove: 0,
            abstain: 0,
            absent: total_members,
            total_members,
        }
    }

    /// Whether the bucket sum matches the committee size
    #[inline]
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.approve + self.disapprove + self.abstain + self.absent == self.total_members
    }

    /// Count in the bucket for `option`
    #[inline]
    #[must_use]
    pub fn bucket(&self, option: VoteOption) -> u32 {
        match option {
            VoteOption::Approve => self.approve,
            VoteOption::Disapprove => self.disapprove,
            VoteOption::Abstain => self.abstain,
        }
    }

    pub(crate) fn bucket_mut(&mut self, option: VoteOption) -> &mut u32 {
        match option {
            VoteOption::Approve => &mut self.approve,
            VoteOption::Disapprove => &mut self.disapprove,
            VoteOption::Abstain => &mut self.abstain,
        }
    }
}

/// A unit of legislation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique identifier
    pub id: DocumentId,
    /// Free-text title
    pub title: String,
    /// Kind of legislation; immutable after creation
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// Workflow status
    pub status: DocumentStatus,
    /// Reading stage
    pub stage: ReadingStage,
    /// Ordered sections; insertion order is document order
    pub sections: Vec<Section>,
    /// Vote tally
    pub votes: VoteTally,
    /// Members who have cast a vote
    ///
    /// Absent from legacy payloads; defaults to empty on load.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub voted_by: BTreeSet<String>,
    /// Calendar date of the last engine mutation
    pub last_updated: NaiveDate,
    /// Creator identity; immutable
    pub created_by: String,
    /// Informational completion estimate, 0-100; no derivation
    ///
    /// Out-of-range stored values clamp to 100 on load, matching the
    /// range the engine enforces on writes.
    #[serde(deserialize_with = "progress_in_range")]
    pub progress: u8,
}

/// Clamp a stored progress value into the 0-100 range
fn progress_in_range<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u32::deserialize(deserializer)?;
    Ok(u8::try_from(raw.min(100)).unwrap_or(100))
}

impl Document {
    /// Find a section by id
    #[inline]
    #[must_use]
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// Find a section by id, mutably
    #[inline]
    pub(crate) fn section_mut(&mut self, id: &SectionId) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| &s.id == id)
    }
}

/// Immutable audit trail record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    /// Monotonic entry id
    pub id: u64,
    /// Acting user
    pub user: String,
    /// Avatar URL for display
    pub user_avatar: String,
    /// What was done
    pub action: String,
    /// Document the action applied to
    pub target: String,
    /// Human-readable timestamp
    pub timestamp: String,
}

/// Voting policy applied by the lifecycle engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VotePolicy {
    /// Invariant-preserving: casting moves one member from `absent` to the
    /// chosen bucket and records the voter, so double votes are rejected.
    #[default]
    MemberTracked,
    /// Legacy free tally: casting increments the chosen bucket and never
    /// touches `absent`. The sum invariant is not maintained.
    UncheckedTally,
}

/// Lifecycle engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Fixed committee size for new drafts
    pub committee_size: u32,
    /// Progress value assigned to new drafts
    pub initial_progress: u8,
    /// Voting policy
    pub vote_policy: VotePolicy,
}

impl WorkflowConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With committee size
    #[inline]
    #[must_use]
    pub fn with_committee_size(mut self, size: u32) -> Self {
        self.committee_size = size;
        self
    }

    /// With voting policy
    #[inline]
    #[must_use]
    pub fn with_vote_policy(mut self, policy: VotePolicy) -> Self {
        self.vote_policy = policy;
        self
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            committee_size: 10,
            initial_progress: 5,
            vote_policy: VotePolicy::MemberTracked,
        }
    }
}
