//! Top-level coordination of analysis sweeps and fix application.
//!
//! The orchestrator fans analysis out across all projects in parallel, one
//! worker per project, into a shared [`AnalysisResult`]. In report mode it
//! then emits diagnostics as sortable log lines; in fix mode it drives the
//! sequential apply-and-recheck loop over each analyzer/fixer pair.

use crate::analyzer::{Analyzer, AnalyzerRegistry};
use crate::applier::apply_fixes;
use crate::cancellation::CancellationToken;
use crate::result::AnalysisResult;
use crate::runner::{run_analyzers, DocumentFilter};
use crate::types::{Diagnostic, DocumentId, Severity};
use crate::workspace::Workspace;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced before any sweep begins.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The registry supplied no analyzer/fixer pairs.
    #[error("no analyzers registered")]
    NoAnalyzers,
}

/// Whether to report diagnostics or apply fixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    /// Run all analyzers once and emit diagnostics; no workspace mutation.
    Report,
    /// Process analyzer/fixer pairs sequentially, applying fixes.
    Fix,
}

/// Result of one orchestrated format operation.
#[derive(Debug)]
pub struct FormatOutcome {
    /// The resulting workspace snapshot. In report mode this is the input
    /// snapshot unchanged.
    pub workspace: Workspace,
    /// Diagnostics emitted in report mode, in (path, line, column) order.
    /// Empty in fix mode.
    pub diagnostics: Vec<Diagnostic>,
    /// Identities of documents whose text changed in fix mode.
    pub changed_documents: Vec<DocumentId>,
    /// Elapsed time of the whole operation.
    pub elapsed: Duration,
}

/// Coordinates analyzer execution and fix application over a workspace.
pub struct Orchestrator {
    registry: Arc<dyn AnalyzerRegistry>,
    treat_as_errors: bool,
}

impl Orchestrator {
    /// Creates an orchestrator over the given registry.
    #[must_use]
    pub fn new(registry: Arc<dyn AnalyzerRegistry>) -> Self {
        Self {
            registry,
            treat_as_errors: false,
        }
    }

    /// Sets whether report-mode diagnostics are emitted with error severity
    /// instead of warning severity.
    #[must_use]
    pub fn treat_as_errors(mut self, treat_as_errors: bool) -> Self {
        self.treat_as_errors = treat_as_errors;
        self
    }

    /// Runs one format operation over a workspace snapshot.
    ///
    /// `eligible_paths` restricts analysis and fixes to the listed document
    /// paths; an empty list means every document is eligible.
    ///
    /// Cancellation is cooperative: a cancelled run returns the best current
    /// outcome, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::NoAnalyzers`] if the registry supplies
    /// no pairs. All other failures are recovered at project or document
    /// granularity and logged.
    pub fn run(
        &self,
        workspace: Workspace,
        eligible_paths: &[PathBuf],
        mode: FormatMode,
        token: &CancellationToken,
    ) -> Result<FormatOutcome, OrchestratorError> {
        let pairs = self.registry.analyzer_fixer_pairs();
        if pairs.is_empty() {
            return Err(OrchestratorError::NoAnalyzers);
        }

        info!(
            projects = workspace.projects().len(),
            pairs = pairs.len(),
            ?mode,
            "starting format operation"
        );

        let started = Instant::now();
        let filter = DocumentFilter::allow_only(eligible_paths.iter().cloned());

        let mut outcome = match mode {
            FormatMode::Report => self.report(workspace, &pairs, &filter, token),
            FormatMode::Fix => self.fix(workspace, &pairs, &filter, token),
        };
        outcome.elapsed = started.elapsed();

        info!(
            elapsed_ms = outcome.elapsed.as_millis(),
            diagnostics = outcome.diagnostics.len(),
            changed_documents = outcome.changed_documents.len(),
            "format operation complete"
        );

        Ok(outcome)
    }

    /// Report mode: one parallel sweep of all analyzers, then emit every
    /// diagnostic as a single sortable line.
    fn report(
        &self,
        workspace: Workspace,
        pairs: &[crate::analyzer::AnalyzerFixerPair],
        filter: &DocumentFilter,
        token: &CancellationToken,
    ) -> FormatOutcome {
        let analyzers: Vec<Arc<dyn Analyzer>> =
            pairs.iter().map(|p| Arc::clone(&p.analyzer)).collect();

        let result = AnalysisResult::new();
        self.sweep(&workspace, &result, &analyzers, filter, token);

        let severity = if self.treat_as_errors {
            Severity::Error
        } else {
            Severity::Warning
        };

        let mut diagnostics = result.all_diagnostics();
        for d in &mut diagnostics {
            d.severity = severity;
        }
        diagnostics.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });

        for d in &diagnostics {
            let line = d.report_line();
            match severity {
                Severity::Error => tracing::error!("{line}"),
                _ => tracing::warn!("{line}"),
            }
        }

        FormatOutcome {
            workspace,
            diagnostics,
            changed_documents: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Fix mode: process pairs strictly sequentially, each against the
    /// current snapshot left behind by the previous pair.
    ///
    /// One top-level pass over the pair list, not a global fixpoint: a later
    /// fixer's edit can reintroduce a violation an earlier fixer resolved,
    /// and such residual diagnostics are left for the next invocation.
    fn fix(
        &self,
        workspace: Workspace,
        pairs: &[crate::analyzer::AnalyzerFixerPair],
        filter: &DocumentFilter,
        token: &CancellationToken,
    ) -> FormatOutcome {
        let mut current = workspace;
        let mut changed: Vec<DocumentId> = Vec::new();

        for pair in pairs {
            if token.is_cancelled() {
                info!("fix operation cancelled, returning current snapshot");
                break;
            }

            let Some(fixer) = pair.fixer.as_ref() else {
                debug!(
                    analyzer = pair.analyzer.name(),
                    "analyzer has no fixer, skipping in fix mode"
                );
                continue;
            };

            // Fresh result scoped to this pair, re-derived from the current
            // snapshot so earlier fixers' edits are visible.
            let result = AnalysisResult::new();
            let analyzers = [Arc::clone(&pair.analyzer)];
            self.sweep(&current, &result, &analyzers, filter, token);

            if result.is_empty() {
                debug!(
                    analyzer = pair.analyzer.name(),
                    "no diagnostics, fixer not invoked"
                );
                continue;
            }

            debug!(
                analyzer = pair.analyzer.name(),
                diagnostics = result.len(),
                "applying fixes"
            );

            let next = apply_fixes(&current, &result, pair.analyzer.name(), fixer.as_ref(), token);
            let delta = current.changed_documents(&next);
            if delta.is_empty() {
                debug!(analyzer = pair.analyzer.name(), "fix pass changed nothing");
            } else {
                changed.extend(delta);
                current = next;
            }
        }

        changed.sort();
        changed.dedup();

        FormatOutcome {
            workspace: current,
            diagnostics: Vec::new(),
            changed_documents: changed,
            elapsed: Duration::ZERO,
        }
    }

    /// One analysis sweep: one parallel worker per project, all merging into
    /// the shared result. Waits for every project before returning (a join
    /// barrier); per-project failures are logged and isolated.
    fn sweep(
        &self,
        workspace: &Workspace,
        result: &AnalysisResult,
        analyzers: &[Arc<dyn Analyzer>],
        filter: &DocumentFilter,
        token: &CancellationToken,
    ) {
        workspace.projects().par_iter().for_each(|project| {
            if token.is_cancelled() {
                return;
            }
            let options = self.registry.analyzer_options(project);
            if let Err(e) = run_analyzers(result, analyzers, project, &options, filter, token) {
                warn!(
                    project = project.name(),
                    error = %e,
                    "project analysis failed, continuing with remaining projects"
                );
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerFixerPair, StaticRegistry};
    use crate::types::Location;
    use std::path::Path;

    struct NeverFires;

    impl Analyzer for NeverFires {
        fn name(&self) -> &'static str {
            "never-fires"
        }
        fn code(&self) -> &'static str {
            "T000"
        }

        fn analyze(
            &self,
            _project: &crate::workspace::Project,
            _options: &crate::options::OptionSet,
        ) -> Result<Vec<Diagnostic>, crate::analyzer::AnalyzeError> {
            Ok(Vec::new())
        }
    }

    struct FlagFirstLine;

    impl Analyzer for FlagFirstLine {
        fn name(&self) -> &'static str {
            "flag-first-line"
        }
        fn code(&self) -> &'static str {
            "T001"
        }

        fn analyze(
            &self,
            project: &crate::workspace::Project,
            _options: &crate::options::OptionSet,
        ) -> Result<Vec<Diagnostic>, crate::analyzer::AnalyzeError> {
            Ok(project
                .documents()
                .iter()
                .map(|d| {
                    Diagnostic::new(
                        "T001",
                        "flag-first-line",
                        Severity::Info,
                        d.id(),
                        Location::new(d.path().to_path_buf(), 1, 1),
                        "flagged",
                    )
                })
                .collect())
        }
    }

    fn workspace() -> Workspace {
        Workspace::builder()
            .project("app")
            .document("src/main.rs", "fn main() {}\n")
            .build()
    }

    #[test]
    fn empty_registry_is_a_configuration_error() {
        let orchestrator = Orchestrator::new(Arc::new(StaticRegistry::new(Vec::new())));
        let err = orchestrator
            .run(
                workspace(),
                &[],
                FormatMode::Report,
                &CancellationToken::new(),
            )
            .unwrap_err();
        assert!(matches!(err, OrchestratorError::NoAnalyzers));
    }

    #[test]
    fn report_mode_returns_snapshot_unchanged() {
        let registry = StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(
            FlagFirstLine,
        ))]);
        let ws = workspace();
        let outcome = Orchestrator::new(Arc::new(registry))
            .run(ws.clone(), &[], FormatMode::Report, &CancellationToken::new())
            .unwrap();

        assert_eq!(outcome.diagnostics.len(), 1);
        assert!(!ws.text_differs(&outcome.workspace));
        assert!(outcome.changed_documents.is_empty());
    }

    #[test]
    fn treat_as_errors_forces_error_severity() {
        let registry = StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(
            FlagFirstLine,
        ))]);
        let outcome = Orchestrator::new(Arc::new(registry))
            .treat_as_errors(true)
            .run(
                workspace(),
                &[],
                FormatMode::Report,
                &CancellationToken::new(),
            )
            .unwrap();

        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn report_line_names_the_document() {
        let registry = StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(
            FlagFirstLine,
        ))]);
        let outcome = Orchestrator::new(Arc::new(registry))
            .run(
                workspace(),
                &[],
                FormatMode::Report,
                &CancellationToken::new(),
            )
            .unwrap();

        assert_eq!(outcome.diagnostics[0].report_line(), "src/main.rs(1,1): flagged");
        assert_eq!(
            outcome.diagnostics[0].location.file,
            Path::new("src/main.rs")
        );
    }

    #[test]
    fn fix_mode_with_quiet_analyzer_changes_nothing() {
        let registry =
            StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(NeverFires))]);
        let ws = workspace();
        let outcome = Orchestrator::new(Arc::new(registry))
            .run(ws.clone(), &[], FormatMode::Fix, &CancellationToken::new())
            .unwrap();

        assert!(outcome.changed_documents.is_empty());
        assert!(!ws.text_differs(&outcome.workspace));
    }

    #[test]
    fn cancelled_fix_returns_current_snapshot_ok() {
        let registry = StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(
            FlagFirstLine,
        ))]);
        let token = CancellationToken::new();
        token.cancel();
        let ws = workspace();
        let outcome = Orchestrator::new(Arc::new(registry))
            .run(ws.clone(), &[], FormatMode::Fix, &token)
            .unwrap();

        assert!(!ws.text_differs(&outcome.workspace));
    }
}
