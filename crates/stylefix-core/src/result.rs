//! Thread-safe aggregation of diagnostics keyed by document identity.

use crate::types::{Diagnostic, DocumentId};
use dashmap::DashMap;

/// One recorded finding together with the schedule index of the analyzer
/// that produced it.
#[derive(Debug, Clone)]
struct Entry {
    schedule: usize,
    diagnostic: Diagnostic,
}

/// A concurrent, append-only mapping from document identity to diagnostics.
///
/// Appends are safe under concurrent analyzer runs across projects. Reads
/// return diagnostics ordered by the order analyzers were scheduled, then by
/// location, so reporting is reproducible even though the underlying runs
/// are concurrent. Duplicate (analyzer, document, diagnostic) entries are
/// rejected on append.
#[derive(Debug, Default)]
pub struct AnalysisResult {
    entries: DashMap<DocumentId, Vec<Entry>>,
}

impl AnalysisResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one diagnostic produced by the analyzer at `schedule` index.
    ///
    /// A diagnostic equal to one already recorded for the same document is
    /// dropped.
    pub fn append(&self, schedule: usize, diagnostic: Diagnostic) {
        let mut list = self.entries.entry(diagnostic.document).or_default();
        if list.iter().any(|e| e.diagnostic == diagnostic) {
            return;
        }
        list.push(Entry {
            schedule,
            diagnostic,
        });
    }

    /// Returns `true` if no diagnostics have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|list| list.value().is_empty())
    }

    /// Total number of recorded diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().map(|list| list.value().len()).sum()
    }

    /// Identities of all documents with at least one diagnostic, sorted.
    #[must_use]
    pub fn document_ids(&self) -> Vec<DocumentId> {
        let mut ids: Vec<DocumentId> = self
            .entries
            .iter()
            .filter(|list| !list.value().is_empty())
            .map(|list| *list.key())
            .collect();
        ids.sort();
        ids
    }

    /// Diagnostics recorded for one document, in schedule-then-location order.
    #[must_use]
    pub fn diagnostics_for(&self, id: DocumentId) -> Vec<Diagnostic> {
        let Some(list) = self.entries.get(&id) else {
            return Vec::new();
        };
        let mut entries: Vec<Entry> = list.value().clone();
        entries.sort_by(|a, b| {
            a.schedule
                .cmp(&b.schedule)
                .then(a.diagnostic.location.line.cmp(&b.diagnostic.location.line))
                .then(
                    a.diagnostic
                        .location
                        .column
                        .cmp(&b.diagnostic.location.column),
                )
                .then(
                    a.diagnostic
                        .location
                        .offset
                        .cmp(&b.diagnostic.location.offset),
                )
        });
        entries.into_iter().map(|e| e.diagnostic).collect()
    }

    /// Diagnostics recorded for one document that a given analyzer produced.
    #[must_use]
    pub fn diagnostics_for_analyzer(&self, id: DocumentId, analyzer: &str) -> Vec<Diagnostic> {
        self.diagnostics_for(id)
            .into_iter()
            .filter(|d| d.analyzer == analyzer)
            .collect()
    }

    /// All recorded diagnostics, grouped by document and ordered per document.
    #[must_use]
    pub fn all_diagnostics(&self) -> Vec<Diagnostic> {
        self.document_ids()
            .into_iter()
            .flat_map(|id| self.diagnostics_for(id))
            .collect()
    }
}
