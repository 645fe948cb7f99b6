//! Document lifecycle engine
//!
//! Enforces legal transitions over a document's status, stage, section set,
//! and vote tally:
//! - Draft creation with a seeded purpose section
//! - Section editing guarded by per-section locks
//! - Invariant-preserving vote casting and editing
//! - Status changes constrained by the workflow state machine
//!
//! Every operation validates its own preconditions; callers are never
//! trusted to pre-check state. Each successful mutation stamps the
//! document's `last_updated` with the engine's current calendar date.

use crate::error::LifecycleError;
use crate::types::{
    Document, DocumentId, DocumentStatus, DocumentType, ReadingStage, Section, SectionId,
    SectionStatus, VoteOption, VotePolicy, VoteTally, WorkflowConfig,
};
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::BTreeSet;

/// The lifecycle engine
///
/// Holds the workflow configuration; documents are passed in by the caller
/// and mutated in place. The engine retains no references across calls.
#[derive(Debug, Clone)]
pub struct LifecycleEngine {
    /// Configuration
    config: WorkflowConfig,
    /// Fixed calendar date, for deterministic tests and backdated fixtures
    fixed_today: Option<NaiveDate>,
}

impl LifecycleEngine {
    /// Create a new engine
    #[inline]
    #[must_use]
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            fixed_today: None,
        }
    }

    /// Pin the engine's calendar date
    #[inline]
    #[must_use]
    pub fn with_fixed_date(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    /// Get configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    fn today(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Create a new draft document
    ///
    /// The draft starts in `Draft`/`FirstReading` with one seeded purpose
    /// section open for editing and an all-absent tally at the configured
    /// committee size.
    ///
    /// # Errors
    /// - `LifecycleError::EmptyTitle` if the title is empty or whitespace
    pub fn create_draft(
        &self,
        title: impl Into<String>,
        doc_type: DocumentType,
        created_by: impl Into<String>,
    ) -> Result<Document, LifecycleError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(LifecycleError::EmptyTitle);
        }

        let today = self.today();
        let id = DocumentId::generate(doc_type, today.year());

        let seed_section = Section::new(
            SectionId::for_ordinal(&id, 1),
            "Section 1: Purpose",
            format!(
                "<p>Provide the main purpose of this {} here.</p>",
                doc_type.to_string().to_lowercase()
            ),
        );

        let doc = Document {
            id,
            title,
            doc_type,
            status: DocumentStatus::Draft,
            stage: ReadingStage::FirstReading,
            sections: vec![seed_section],
            votes: VoteTally::new(self.config.committee_size),
            voted_by: BTreeSet::new(),
            last_updated: today,
            created_by: created_by.into(),
            progress: self.config.initial_progress,
        };

        tracing::info!(id = %doc.id, "created draft: {}", doc.title);
        Ok(doc)
    }

    /// Append a new section open for editing
    ///
    /// Always succeeds; returns the appended section.
    pub fn add_section<'a>(&self, doc: &'a mut Document) -> &'a Section {
        let ordinal = doc.sections.len() + 1;
        let section = Section::new(
            SectionId::for_ordinal(&doc.id, ordinal),
            format!("Section {ordinal}: New Section"),
            "<p>Start writing content for this new section.</p>",
        );

        tracing::debug!(id = %doc.id, section = %section.id, "added section");
        doc.sections.push(section);
        doc.last_updated = self.today();
        doc.sections.last().unwrap_or_else(|| unreachable!())
    }

    /// Replace the content of a section
    ///
    /// # Errors
    /// - `LifecycleError::SectionNotFound` if the section does not exist
    /// - `LifecycleError::SectionLocked` if the section is locked; content
    ///   is left unchanged
    pub fn edit_section_content(
        &self,
        doc: &mut Document,
        section_id: &SectionId,
        content: impl Into<String>,
    ) -> Result<(), LifecycleError> {
        let section = doc
            .section_mut(section_id)
            .ok_or_else(|| LifecycleError::SectionNotFound(section_id.clone()))?;

        if section.is_locked() {
            return Err(LifecycleError::SectionLocked(section_id.clone()));
        }

        section.content = content.into();
        doc.last_updated = self.today();
        Ok(())
    }

    /// Flip a section between `Editing` and `Locked`
    ///
    /// Permitted for any actor in either direction; returns the new status.
    ///
    /// # Errors
    /// - `LifecycleError::SectionNotFound` if the section does not exist
    pub fn toggle_section_lock(
        &self,
        doc: &mut Document,
        section_id: &SectionId,
    ) -> Result<SectionStatus, LifecycleError> {
        let section = doc
            .section_mut(section_id)
            .ok_or_else(|| LifecycleError::SectionNotFound(section_id.clone()))?;

        section.status = section.status.toggled();
        let status = section.status;
        tracing::debug!(id = %doc.id, section = %section_id, ?status, "toggled section lock");

        doc.last_updated = self.today();
        Ok(status)
    }

    /// Cast a member's vote
    ///
    /// Under `MemberTracked` (the default), one member moves from `absent`
    /// to the chosen bucket and the voter identity is recorded, so the
    /// tally invariant holds after every cast. Under `UncheckedTally` the
    /// chosen bucket is incremented and `absent` is left alone, matching
    /// the legacy behavior.
    ///
    /// # Errors
    /// - `LifecycleError::AlreadyVoted` if the member already voted
    ///   (`MemberTracked` only)
    /// - `LifecycleError::NoAbsentMembers` if every member has voted
    ///   (`MemberTracked` only)
    pub fn cast_vote(
        &self,
        doc: &mut Document,
        voter_id: impl Into<String>,
        option: VoteOption,
    ) -> Result<(), LifecycleError> {
        let voter_id = voter_id.into();

        match self.config.vote_policy {
            VotePolicy::MemberTracked => {
                if doc.voted_by.contains(&voter_id) {
                    return Err(LifecycleError::AlreadyVoted { voter: voter_id });
                }
                if doc.votes.absent == 0 {
                    return Err(LifecycleError::NoAbsentMembers);
                }
                doc.votes.absent -= 1;
                *doc.votes.bucket_mut(option) += 1;
                doc.voted_by.insert(voter_id.clone());
                debug_assert!(doc.votes.is_balanced());
            }
            VotePolicy::UncheckedTally => {
                *doc.votes.bucket_mut(option) += 1;
            }
        }

        tracing::info!(id = %doc.id, voter = %voter_id, %option, "vote cast");
        doc.last_updated = self.today();
        Ok(())
    }

    /// Move a member's vote from one bucket to another
    ///
    /// `absent` is untouched; it was already decremented at first cast.
    ///
    /// # Errors
    /// - `LifecycleError::HasNotVoted` if no vote was recorded for the
    ///   member (`MemberTracked` only)
    /// - `LifecycleError::EmptyBucket` if the previous bucket is empty
    pub fn edit_vote(
        &self,
        doc: &mut Document,
        voter_id: impl Into<String>,
        previous: VoteOption,
        new: VoteOption,
    ) -> Result<(), LifecycleError> {
        let voter_id = voter_id.into();

        if self.config.vote_policy == VotePolicy::MemberTracked
            && !doc.voted_by.contains(&voter_id)
        {
            return Err(LifecycleError::HasNotVoted { voter: voter_id });
        }
        if doc.votes.bucket(previous) == 0 {
            return Err(LifecycleError::EmptyBucket(previous));
        }

        *doc.votes.bucket_mut(previous) -= 1;
        *doc.votes.bucket_mut(new) += 1;

        tracing::info!(id = %doc.id, voter = %voter_id, from = %previous, to = %new, "vote edited");
        doc.last_updated = self.today();
        Ok(())
    }

    /// Set the workflow status
    ///
    /// Constrained by the status state machine; `Archived` is terminal.
    /// Returns the previous status. The engine never derives approval or
    /// rejection from vote tallies; that policy lives outside this core.
    ///
    /// # Errors
    /// - `LifecycleError::InvalidTransition` if the state machine forbids
    ///   the change
    pub fn change_status(
        &self,
        doc: &mut Document,
        new_status: DocumentStatus,
    ) -> Result<DocumentStatus, LifecycleError> {
        if !doc.status.can_transition_to(new_status) {
            return Err(LifecycleError::InvalidTransition {
                from: doc.status,
                to: new_status,
            });
        }

        let previous = doc.status;
        doc.status = new_status;
        doc.last_updated = self.today();

        tracing::info!(id = %doc.id, %previous, status = %new_status, "status changed");
        Ok(previous)
    }

    /// Archive a document
    ///
    /// Convenience for `change_status(doc, Archived)`.
    ///
    /// # Errors
    /// - `LifecycleError::InvalidTransition` if already archived
    pub fn archive(&self, doc: &mut Document) -> Result<DocumentStatus, LifecycleError> {
        self.change_status(doc, DocumentStatus::Archived)
    }

    /// Set the informational progress value
    ///
    /// Progress is an opaque stored field; the engine derives nothing from
    /// it.
    ///
    /// # Errors
    /// - `LifecycleError::ProgressOutOfRange` if above 100
    pub fn set_progress(&self, doc: &mut Document, progress: u8) -> Result<(), LifecycleError> {
        if progress > 100 {
            return Err(LifecycleError::ProgressOutOfRange(u32::from(progress)));
        }
        doc.progress = progress;
        doc.last_updated = self.today();
        Ok(())
    }
}

impl Default for LifecycleEngine {
    fn default() -> Self {
        Self::new(WorkflowConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> LifecycleEngine {
        LifecycleEngine::new(WorkflowConfig::default())
            .with_fixed_date(NaiveDate::from_ymd_opt(2023, 10, 28).unwrap())
    }

    #[test]
    fn create_draft_seeds_expected_state() {
        let doc = engine()
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        assert_eq!(doc.status, DocumentStatus::Draft);
        assert_eq!(doc.stage, ReadingStage::FirstReading);
        assert_eq!(doc.votes, VoteTally::new(10));
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.sections[0].status, SectionStatus::Editing);
        assert_eq!(doc.progress, 5);
        assert!(doc.id.as_str().starts_with("ORD-2023-"));
    }

    #[test]
    fn create_draft_rejects_empty_title() {
        let err = engine()
            .create_draft("   ", DocumentType::Resolution, "Current User")
            .unwrap_err();
        assert!(matches!(err, LifecycleError::EmptyTitle));
    }

    #[test]
    fn add_section_numbers_sequentially() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let section = eng.add_section(&mut doc).clone();
        assert_eq!(section.title, "Section 2: New Section");
        assert_eq!(section.status, SectionStatus::Editing);
        assert_eq!(doc.sections.len(), 2);
    }

    #[test]
    fn edit_new_section_succeeds() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let section_id = eng.add_section(&mut doc).id.clone();
        eng.edit_section_content(&mut doc, &section_id, "<p>Amended.</p>")
            .unwrap();

        assert_eq!(doc.section(&section_id).unwrap().content, "<p>Amended.</p>");
    }

    #[test]
    fn edit_locked_section_fails_and_preserves_content() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();
        let section_id = doc.sections[0].id.clone();
        let original = doc.sections[0].content.clone();

        eng.toggle_section_lock(&mut doc, &section_id).unwrap();
        let err = eng
            .edit_section_content(&mut doc, &section_id, "<p>Sneaky edit.</p>")
            .unwrap_err();

        assert!(matches!(err, LifecycleError::SectionLocked(_)));
        assert!(err.is_precondition_violation());
        assert_eq!(doc.section(&section_id).unwrap().content, original);
    }

    #[test]
    fn toggle_lock_twice_restores_status() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();
        let section_id = doc.sections[0].id.clone();

        assert_eq!(
            eng.toggle_section_lock(&mut doc, &section_id).unwrap(),
            SectionStatus::Locked
        );
        assert_eq!(
            eng.toggle_section_lock(&mut doc, &section_id).unwrap(),
            SectionStatus::Editing
        );
    }

    #[test]
    fn missing_section_is_not_found() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let err = eng
            .edit_section_content(&mut doc, &SectionId::from("missing"), "x")
            .unwrap_err();
        assert!(matches!(err, LifecycleError::SectionNotFound(_)));
    }

    #[test]
    fn cast_vote_moves_absent_to_bucket() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();

        assert_eq!(doc.votes.approve, 1);
        assert_eq!(doc.votes.absent, 9);
        assert_eq!(doc.votes.total_members, 10);
        assert!(doc.votes.is_balanced());
    }

    #[test]
    fn double_vote_is_rejected() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();
        let err = eng
            .cast_vote(&mut doc, "alice", VoteOption::Disapprove)
            .unwrap_err();

        assert!(matches!(err, LifecycleError::AlreadyVoted { .. }));
        assert_eq!(doc.votes.approve, 1);
        assert_eq!(doc.votes.disapprove, 0);
    }

    #[test]
    fn cast_then_edit_preserves_invariant() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();
        eng.edit_vote(&mut doc, "alice", VoteOption::Approve, VoteOption::Abstain)
            .unwrap();

        assert_eq!(doc.votes.approve, 0);
        assert_eq!(doc.votes.abstain, 1);
        assert_eq!(doc.votes.absent, 9);
        assert!(doc.votes.is_balanced());
    }

    #[test]
    fn edit_without_cast_is_rejected() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let err = eng
            .edit_vote(&mut doc, "alice", VoteOption::Approve, VoteOption::Abstain)
            .unwrap_err();
        assert!(matches!(err, LifecycleError::HasNotVoted { .. }));
    }

    #[test]
    fn full_committee_cannot_overcast() {
        let config = WorkflowConfig::new().with_committee_size(2);
        let eng = LifecycleEngine::new(config);
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();
        eng.cast_vote(&mut doc, "bob", VoteOption::Disapprove).unwrap();
        let err = eng
            .cast_vote(&mut doc, "carol", VoteOption::Abstain)
            .unwrap_err();

        assert!(matches!(err, LifecycleError::NoAbsentMembers));
    }

    #[test]
    fn unchecked_tally_matches_legacy_behavior() {
        let config = WorkflowConfig::new().with_vote_policy(VotePolicy::UncheckedTally);
        let eng = LifecycleEngine::new(config);
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();

        // Absent untouched, sum invariant intentionally broken.
        assert_eq!(doc.votes.approve, 1);
        assert_eq!(doc.votes.absent, 10);
        assert!(!doc.votes.is_balanced());

        // Re-votes permitted without identity tracking.
        eng.cast_vote(&mut doc, "alice", VoteOption::Approve).unwrap();
        assert_eq!(doc.votes.approve, 2);
    }

    #[test]
    fn status_follows_state_machine() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.change_status(&mut doc, DocumentStatus::InReview).unwrap();
        eng.change_status(&mut doc, DocumentStatus::Approved).unwrap();
        eng.archive(&mut doc).unwrap();
        assert_eq!(doc.status, DocumentStatus::Archived);

        let err = eng
            .change_status(&mut doc, DocumentStatus::Draft)
            .unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { .. }));
    }

    #[test]
    fn draft_can_skip_straight_to_archive() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let previous = eng.archive(&mut doc).unwrap();
        assert_eq!(previous, DocumentStatus::Draft);
        assert_eq!(doc.status, DocumentStatus::Archived);
    }

    #[test]
    fn draft_cannot_jump_to_approved() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        let err = eng
            .change_status(&mut doc, DocumentStatus::Approved)
            .unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::InvalidTransition {
                from: DocumentStatus::Draft,
                to: DocumentStatus::Approved
            }
        ));
    }

    #[test]
    fn mutations_stamp_last_updated() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let eng = LifecycleEngine::default().with_fixed_date(today);
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();
        doc.last_updated = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

        eng.add_section(&mut doc);
        assert_eq!(doc.last_updated, today);
    }

    #[test]
    fn progress_is_clamp_checked() {
        let eng = engine();
        let mut doc = eng
            .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
            .unwrap();

        eng.set_progress(&mut doc, 100).unwrap();
        assert_eq!(doc.progress, 100);

        let err = eng.set_progress(&mut doc, 101).unwrap_err();
        assert!(matches!(err, LifecycleError::ProgressOutOfRange(101)));
        assert_eq!(doc.progress, 100);
    }
}
