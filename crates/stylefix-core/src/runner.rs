//! Batch execution of analyzers against a single project.

use crate::analyzer::{AnalyzeError, Analyzer};
use crate::cancellation::CancellationToken;
use crate::options::OptionSet;
use crate::result::AnalysisResult;
use crate::workspace::Project;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Allow-list restricting which documents diagnostics are retained for.
///
/// An empty filter means no restriction. A non-empty filter drops every
/// diagnostic whose document path is not in the list, so that only documents
/// explicitly selected for formatting are reported or fixed even when the
/// project contains other files.
#[derive(Debug, Clone, Default)]
pub struct DocumentFilter {
    paths: HashSet<PathBuf>,
}

impl DocumentFilter {
    /// A filter that allows every document.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// A filter that allows only the given paths.
    #[must_use]
    pub fn allow_only<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if diagnostics for this path are retained.
    #[must_use]
    pub fn allows(&self, path: &Path) -> bool {
        self.paths.is_empty() || self.paths.contains(path)
    }
}

/// Runs a batch of analyzers against one project, merging retained
/// diagnostics into the shared result.
///
/// All analyzers run against the project as a single batch; the schedule
/// index recorded with each diagnostic is the analyzer's position in
/// `analyzers`. Appends into `result` are safe under concurrent calls from
/// sibling projects.
///
/// Cancellation is polled before each analyzer; a cancelled run stops
/// early and returns `Ok` with whatever was already recorded.
///
/// # Errors
///
/// Returns the first analyzer failure, attributed to this project. Results
/// already recorded for other projects (or by earlier analyzers in this
/// batch) are unaffected.
pub fn run_analyzers(
    result: &AnalysisResult,
    analyzers: &[Arc<dyn Analyzer>],
    project: &Project,
    options: &OptionSet,
    filter: &DocumentFilter,
    token: &CancellationToken,
) -> Result<(), AnalyzeError> {
    for (schedule, analyzer) in analyzers.iter().enumerate() {
        if token.is_cancelled() {
            debug!(
                project = project.name(),
                "analysis cancelled, stopping project run"
            );
            return Ok(());
        }

        if !options.is_enabled(analyzer.name()) {
            debug!("Skipping disabled analyzer: {}", analyzer.name());
            continue;
        }

        let diagnostics = analyzer.analyze(project, options)?;
        let severity_override = options.severity_override(analyzer.name());

        for mut diagnostic in diagnostics {
            if !filter.allows(&diagnostic.location.file) {
                continue;
            }
            if let Some(severity) = severity_override {
                diagnostic.severity = severity;
            }
            result.append(schedule, diagnostic);
        }
    }

    Ok(())
}
