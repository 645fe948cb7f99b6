//! Testing utilities for the LegiFlow workspace
//!
//! Shared fixtures, seed data, and setup helpers.

#![allow(missing_docs)]

use chrono::NaiveDate;
use legiflow_core::types::{Section, SectionId, VoteTally};
use legiflow_core::{
    AuditEntry, Document, DocumentId, DocumentStatus, DocumentType, LifecycleEngine, ReadingStage,
    WorkflowConfig,
};
use std::collections::BTreeSet;

/// Calendar date used by fixture engines so tests are deterministic.
pub fn fixture_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 28).expect("valid fixture date")
}

/// Engine pinned to the fixture date with the default configuration.
pub fn fixed_engine() -> LifecycleEngine {
    LifecycleEngine::new(WorkflowConfig::default()).with_fixed_date(fixture_date())
}

/// Fresh draft created through the engine, for mutation tests.
pub fn sample_draft() -> Document {
    fixed_engine()
        .create_draft("Test Ordinance", DocumentType::Ordinance, "Current User")
        .expect("fixture draft")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn tally(approve: u32, disapprove: u32, abstain: u32, absent: u32) -> VoteTally {
    VoteTally {
        approve,
        disapprove,
        abstain,
        absent,
        total_members: 10,
    }
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &str,
    title: &str,
    doc_type: DocumentType,
    status: DocumentStatus,
    stage: ReadingStage,
    sections: Vec<Section>,
    votes: VoteTally,
    updated: NaiveDate,
    created_by: &str,
    progress: u8,
) -> Document {
    Document {
        id: DocumentId::from(id),
        title: title.to_string(),
        doc_type,
        status,
        stage,
        sections,
        votes,
        voted_by: BTreeSet::new(),
        last_updated: updated,
        created_by: created_by.to_string(),
        progress,
    }
}

fn section(id: &str, title: &str, content: &str, locked: bool) -> Section {
    let mut sec = Section::new(SectionId::from(id), title, content);
    if locked {
        sec.status = legiflow_core::SectionStatus::Locked;
    }
    sec
}

/// The seven-document reporting fixture
///
/// Mixed types, statuses, and dates; two Approved documents and one
/// Archived document.
pub fn fixture_documents() -> Vec<Document> {
    vec![
        document(
            "ORD-2023-001",
            "Zoning Regulation Update for Commercial Districts",
            DocumentType::Ordinance,
            DocumentStatus::InReview,
            ReadingStage::SecondReading,
            vec![
                section("sec1-1", "Section 1: Preamble", "<p>Whereas, the City Council has identified a need to modernize zoning regulations...</p>", true),
                section("sec1-2", "Section 2: Definitions", "<p>Key terms used within this ordinance are defined as follows...</p>", true),
                section("sec1-3", "Section 3: Permitted Uses", "<p>3.2: Operating hours for businesses adjacent to residential zones...</p>", false),
            ],
            tally(4, 2, 1, 3),
            date(2023, 10, 26),
            "Alice Johnson",
            75,
        ),
        document(
            "RES-2023-015",
            "Resolution for Public Park Renovation Initiative",
            DocumentType::Resolution,
            DocumentStatus::Approved,
            ReadingStage::Passed,
            vec![section("sec2-1", "Section 1: Purpose", "<p>This resolution authorizes the allocation of funds for park renovation.</p>", true)],
            tally(9, 1, 0, 0),
            date(2023, 10, 22),
            "Bob Williams",
            100,
        ),
        document(
            "ORD-2023-002",
            "Plastic Bag Ban Implementation Act",
            DocumentType::Ordinance,
            DocumentStatus::Draft,
            ReadingStage::FirstReading,
            vec![section("sec3-1", "Section 1: Definitions", "<p>For the purposes of this ordinance, a \"single-use plastic bag\" is defined as...</p>", false)],
            tally(0, 0, 0, 10),
            date(2023, 10, 27),
            "Charlie Brown",
            25,
        ),
        document(
            "ORD-2023-003",
            "Updated Noise Control Ordinance",
            DocumentType::Ordinance,
            DocumentStatus::Rejected,
            ReadingStage::ThirdReading,
            vec![
                section("sec4-1", "Section 1: Preamble", "<p>Introduction to the noise control ordinance.</p>", true),
                section("sec4-2", "Section 2: Noise Limits", "<p>Maximum permissible noise levels are hereby established...</p>", true),
            ],
            tally(4, 6, 0, 0),
            date(2023, 9, 15),
            "Diana Prince",
            90,
        ),
        document(
            "ORD-2023-004",
            "Bicycle Lane Expansion Project",
            DocumentType::Ordinance,
            DocumentStatus::Approved,
            ReadingStage::Passed,
            vec![section("sec6-1", "Article I: Expansion Plan", "<p>The Department of Transportation shall expand bicycle lanes...</p>", true)],
            tally(8, 1, 1, 0),
            date(2023, 10, 20),
            "Frank Castle",
            100,
        ),
        document(
            "RES-2023-017",
            "City Arts Festival Funding",
            DocumentType::Resolution,
            DocumentStatus::Draft,
            ReadingStage::FirstReading,
            vec![section("sec7-1", "Preamble", "<p>A resolution to approve funding for the annual City Arts Festival.</p>", false)],
            tally(0, 0, 0, 10),
            date(2023, 10, 28),
            "Grace Lee",
            10,
        ),
        document(
            "ORD-2022-051",
            "Previous Year Budget Allocation",
            DocumentType::Ordinance,
            DocumentStatus::Archived,
            ReadingStage::Passed,
            vec![section("arc1", "Final Budget", "<h2>Final Budget</h2><p>Final budget allocations for fiscal year 2022.</p>", true)],
            tally(10, 0, 0, 0),
            date(2022, 12, 15),
            "Admin",
            100,
        ),
    ]
}

/// Seeded audit trail entries
pub fn seed_audit_entries() -> Vec<AuditEntry> {
    let entry = |id: u64, user: &str, avatar: &str, action: &str, target: &str, ts: &str| AuditEntry {
        id,
        user: user.to_string(),
        user_avatar: avatar.to_string(),
        action: action.to_string(),
        target: target.to_string(),
        timestamp: ts.to_string(),
    };

    vec![
        entry(1, "Alice Johnson", "https://i.pravatar.cc/150?u=alice", "Voted on", "ORD-2023-001", "2023-10-27 11:05 AM"),
        entry(2, "Alice Johnson", "https://i.pravatar.cc/150?u=alice", "Locked Section 2 of", "ORD-2023-001", "2023-10-27 10:45 AM"),
        entry(3, "Bob Williams", "https://i.pravatar.cc/150?u=bob", "Approved", "RES-2023-015", "2023-10-27 09:30 AM"),
        entry(4, "Charlie Brown", "https://i.pravatar.cc/150?u=charlie", "Created Draft", "ORD-2023-002", "2023-10-27 08:15 AM"),
        entry(5, "Diana Prince", "https://i.pravatar.cc/150?u=diana", "Voted on", "ORD-2023-003", "2023-10-26 01:10 PM"),
    ]
}
