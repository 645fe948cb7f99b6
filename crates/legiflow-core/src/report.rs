//! Reporting engine
//!
//! Pure function from a document collection and filter criteria to the
//! matching subset plus aggregate counts. Reads a snapshot; never mutates.

use crate::types::{Document, DocumentStatus, DocumentType};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

/// Filter criteria for report generation
///
/// Empty type/status sets mean "no restriction", not "match nothing".
/// Date bounds compare calendar dates only and are inclusive on both ends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilters {
    /// Earliest `last_updated` to include
    pub start_date: Option<NaiveDate>,
    /// Latest `last_updated` to include
    pub end_date: Option<NaiveDate>,
    /// Document types to include; empty means all
    pub types: BTreeSet<DocumentType>,
    /// Statuses to include; empty means all
    pub statuses: BTreeSet<DocumentStatus>,
}

impl ReportFilters {
    /// Create an unrestricted filter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a start date
    #[inline]
    #[must_use]
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// With an end date
    #[inline]
    #[must_use]
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Restrict to a document type (additive)
    #[inline]
    #[must_use]
    pub fn with_type(mut self, doc_type: DocumentType) -> Self {
        self.types.insert(doc_type);
        self
    }

    /// Restrict to a status (additive)
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: DocumentStatus) -> Self {
        self.statuses.insert(status);
        self
    }

    /// Whether a document satisfies every criterion
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(start) = self.start_date {
            if doc.last_updated < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if doc.last_updated > end {
                return false;
            }
        }
        if !self.types.is_empty() && !self.types.contains(&doc.doc_type) {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&doc.status) {
            return false;
        }
        true
    }
}

/// Aggregate report over a document collection
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Number of matching documents
    pub total_docs: usize,
    /// Matching documents, in original collection order
    pub filtered: Vec<Document>,
    /// Per-type counts over the matching subset; both types always present
    pub counts_by_type: BTreeMap<DocumentType, usize>,
    /// Per-status counts over the matching subset; all five statuses always
    /// present, never sparse
    pub counts_by_status: BTreeMap<DocumentStatus, usize>,
}

/// Generate a report over a document snapshot
///
/// Pure and deterministic: identical inputs yield identical output, and the
/// input collection is never mutated.
#[must_use]
pub fn generate_report(documents: &[Document], filters: &ReportFilters) -> Report {
    let filtered: Vec<Document> = documents
        .iter()
        .filter(|doc| filters.matches(doc))
        .cloned()
        .collect();

    let mut counts_by_type: BTreeMap<DocumentType, usize> =
        DocumentType::ALL.iter().map(|t| (*t, 0)).collect();
    let mut counts_by_status: BTreeMap<DocumentStatus, usize> =
        DocumentStatus::ALL.iter().map(|s| (*s, 0)).collect();

    for doc in &filtered {
        *counts_by_type.entry(doc.doc_type).or_default() += 1;
        *counts_by_status.entry(doc.status).or_default() += 1;
    }

    tracing::debug!(
        total = filtered.len(),
        of = documents.len(),
        "generated report"
    );

    Report {
        total_docs: filtered.len(),
        filtered,
        counts_by_type,
        counts_by_status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::LifecycleEngine;
    use crate::types::WorkflowConfig;

    fn doc(
        seq: u16,
        doc_type: DocumentType,
        status: DocumentStatus,
        updated: (i32, u32, u32),
    ) -> Document {
        let date = NaiveDate::from_ymd_opt(updated.0, updated.1, updated.2).unwrap();
        let engine = LifecycleEngine::new(WorkflowConfig::default()).with_fixed_date(date);
        let mut doc = engine
            .create_draft(format!("Fixture {seq}"), doc_type, "Fixture Author")
            .unwrap();
        doc.id = crate::types::DocumentId::new(doc_type, updated.0, seq);
        doc.status = status;
        doc
    }

    fn fixture() -> Vec<Document> {
        vec![
            doc(1, DocumentType::Ordinance, DocumentStatus::InReview, (2023, 10, 26)),
            doc(15, DocumentType::Resolution, DocumentStatus::Approved, (2023, 10, 22)),
            doc(2, DocumentType::Ordinance, DocumentStatus::Draft, (2023, 10, 27)),
            doc(3, DocumentType::Ordinance, DocumentStatus::Rejected, (2023, 9, 15)),
            doc(4, DocumentType::Ordinance, DocumentStatus::Approved, (2023, 10, 20)),
        ]
    }

    #[test]
    fn unrestricted_filter_matches_everything_in_order() {
        let docs = fixture();
        let report = generate_report(&docs, &ReportFilters::new());

        assert_eq!(report.total_docs, docs.len());
        let ids: Vec<_> = report.filtered.iter().map(|d| d.id.clone()).collect();
        let expected: Vec<_> = docs.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn status_filter_restricts_counts() {
        let docs = fixture();
        let filters = ReportFilters::new().with_status(DocumentStatus::Approved);
        let report = generate_report(&docs, &filters);

        assert_eq!(report.total_docs, 2);
        assert_eq!(report.counts_by_status[&DocumentStatus::Approved], 2);
        // Dense map: excluded statuses present at zero.
        assert_eq!(report.counts_by_status.len(), 5);
        assert_eq!(report.counts_by_status[&DocumentStatus::Draft], 0);
        assert_eq!(report.counts_by_status[&DocumentStatus::Archived], 0);
    }

    #[test]
    fn type_filter_restricts_matches() {
        let docs = fixture();
        let filters = ReportFilters::new().with_type(DocumentType::Resolution);
        let report = generate_report(&docs, &filters);

        assert_eq!(report.total_docs, 1);
        assert_eq!(report.counts_by_type[&DocumentType::Resolution], 1);
        assert_eq!(report.counts_by_type[&DocumentType::Ordinance], 0);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let docs = fixture();
        let filters = ReportFilters::new()
            .since(NaiveDate::from_ymd_opt(2023, 10, 20).unwrap())
            .until(NaiveDate::from_ymd_opt(2023, 10, 26).unwrap());
        let report = generate_report(&docs, &filters);

        // 10-26, 10-22, and 10-20 fall inside; 10-27 and 9-15 do not.
        assert_eq!(report.total_docs, 3);
    }

    #[test]
    fn combined_filters_intersect() {
        let docs = fixture();
        let filters = ReportFilters::new()
            .with_type(DocumentType::Ordinance)
            .with_status(DocumentStatus::Approved)
            .since(NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        let report = generate_report(&docs, &filters);

        assert_eq!(report.total_docs, 1);
        assert_eq!(report.filtered[0].id.as_str(), "ORD-2023-004");
    }

    #[test]
    fn report_is_idempotent() {
        let docs = fixture();
        let filters = ReportFilters::new().with_status(DocumentStatus::InReview);

        let first = generate_report(&docs, &filters);
        let second = generate_report(&docs, &filters);
        assert_eq!(first, second);
    }

    #[test]
    fn report_does_not_mutate_input() {
        let docs = fixture();
        let before = docs.clone();
        let _ = generate_report(&docs, &ReportFilters::new());
        assert_eq!(docs, before);
    }
}
