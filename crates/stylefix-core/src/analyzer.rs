//! Capability traits for analyzers and fixers, and the registry that
//! supplies them.
//!
//! Analyzers and fixers are opaque plugin units: an analyzer is a pure
//! function from a project and its options to diagnostics, a fixer turns a
//! document plus its diagnostics into text edits. Both must be stateless and
//! reentrant - the engine calls them concurrently across projects and
//! documents.

use crate::options::OptionSet;
use crate::types::{Diagnostic, Severity, TextEdit};
use crate::workspace::{Document, Project};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced while analyzing a project.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// An analyzer failed while examining a project.
    #[error("analyzer '{analyzer}' failed on project '{project}': {message}")]
    Failed {
        /// Analyzer that failed.
        analyzer: String,
        /// Project being analyzed.
        project: String,
        /// Failure description.
        message: String,
    },
}

/// Errors produced while computing fixes for a document.
#[derive(Debug, Error)]
pub enum FixError {
    /// A fixer failed while computing edits for a document.
    #[error("fixer '{fixer}' failed on {path}: {message}")]
    Failed {
        /// Fixer that failed.
        fixer: String,
        /// Document path.
        path: PathBuf,
        /// Failure description.
        message: String,
    },
}

/// A diagnostic analyzer operating on whole projects.
///
/// Implementations examine every document of the given project and return
/// the style findings. They never mutate anything.
pub trait Analyzer: Send + Sync {
    /// Returns the kebab-case name of this analyzer (e.g., "tab-indentation").
    fn name(&self) -> &'static str;

    /// Returns the analyzer code (e.g., "SF001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this analyzer checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for diagnostics from this analyzer.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Analyzes a project and returns the diagnostics found.
    ///
    /// # Errors
    ///
    /// Returns an error if analysis of the project fails as a whole; the
    /// caller attributes the failure to this project and continues with
    /// sibling projects.
    fn analyze(&self, project: &Project, options: &OptionSet)
        -> Result<Vec<Diagnostic>, AnalyzeError>;
}

/// A fixer capable of resolving diagnostics its paired analyzer produces.
pub trait Fixer: Send + Sync {
    /// Returns the name of this fixer.
    fn name(&self) -> &'static str;

    /// Computes the edits resolving the given diagnostics of one document.
    ///
    /// All diagnostics passed in belong to `document` and were produced by
    /// the paired analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if edits cannot be computed; the caller leaves this
    /// document unchanged and continues with sibling documents.
    fn fix(&self, document: &Document, diagnostics: &[Diagnostic])
        -> Result<Vec<TextEdit>, FixError>;
}

/// An analyzer paired with zero-or-one fixer.
///
/// Analyzers without a fixer are report-only.
#[derive(Clone)]
pub struct AnalyzerFixerPair {
    /// The diagnostic analyzer.
    pub analyzer: Arc<dyn Analyzer>,
    /// The fixer resolving this analyzer's diagnostics, if any.
    pub fixer: Option<Arc<dyn Fixer>>,
}

impl AnalyzerFixerPair {
    /// Creates a pair with a fixer.
    #[must_use]
    pub fn fixable(analyzer: Arc<dyn Analyzer>, fixer: Arc<dyn Fixer>) -> Self {
        Self {
            analyzer,
            fixer: Some(fixer),
        }
    }

    /// Creates a report-only pair.
    #[must_use]
    pub fn report_only(analyzer: Arc<dyn Analyzer>) -> Self {
        Self {
            analyzer,
            fixer: None,
        }
    }
}

impl std::fmt::Debug for AnalyzerFixerPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerFixerPair")
            .field("analyzer", &self.analyzer.name())
            .field("fixer", &self.fixer.as_ref().map(|x| x.name()))
            .finish()
    }
}

/// Registry supplying the analyzer/fixer pairs and per-project options.
///
/// Discovery and registration of analyzers is external to the engine; the
/// orchestrator only consumes this interface.
pub trait AnalyzerRegistry: Send + Sync {
    /// Returns the ordered list of analyzer/fixer pairs to run.
    ///
    /// Order is significant: report-mode diagnostics are ordered by it, and
    /// fix mode processes pairs in exactly this order.
    fn analyzer_fixer_pairs(&self) -> Vec<AnalyzerFixerPair>;

    /// Resolves the analyzer option set for one project.
    fn analyzer_options(&self, project: &Project) -> OptionSet;
}

/// A registry over a fixed pair list and one shared option set.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    pairs: Vec<AnalyzerFixerPair>,
    options: OptionSet,
}

impl StaticRegistry {
    /// Creates a registry with the given pairs and default options.
    #[must_use]
    pub fn new(pairs: Vec<AnalyzerFixerPair>) -> Self {
        Self {
            pairs,
            options: OptionSet::new(),
        }
    }

    /// Sets the option set returned for every project.
    #[must_use]
    pub fn with_options(mut self, options: OptionSet) -> Self {
        self.options = options;
        self
    }
}

impl AnalyzerRegistry for StaticRegistry {
    fn analyzer_fixer_pairs(&self) -> Vec<AnalyzerFixerPair> {
        self.pairs.clone()
    }

    fn analyzer_options(&self, _project: &Project) -> OptionSet {
        self.options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentId, Location};
    use crate::workspace::Workspace;

    struct TestAnalyzer;

    impl Analyzer for TestAnalyzer {
        fn name(&self) -> &'static str {
            "test-analyzer"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test analyzer"
        }

        fn analyze(
            &self,
            project: &Project,
            _options: &OptionSet,
        ) -> Result<Vec<Diagnostic>, AnalyzeError> {
            Ok(project
                .documents()
                .iter()
                .map(|d| {
                    Diagnostic::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        d.id(),
                        Location::new(d.path().to_path_buf(), 1, 1),
                        "test finding",
                    )
                })
                .collect())
        }
    }

    #[test]
    fn analyzer_trait_defaults() {
        let analyzer = TestAnalyzer;
        assert_eq!(analyzer.name(), "test-analyzer");
        assert_eq!(analyzer.default_severity(), Severity::Warning);
    }

    #[test]
    fn static_registry_returns_pairs_in_order() {
        let registry = StaticRegistry::new(vec![AnalyzerFixerPair::report_only(Arc::new(
            TestAnalyzer,
        ))]);
        let pairs = registry.analyzer_fixer_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].analyzer.name(), "test-analyzer");
        assert!(pairs[0].fixer.is_none());
    }

    #[test]
    fn analyzer_produces_one_finding_per_document() {
        let ws = Workspace::builder()
            .project("app")
            .document("a.rs", "x")
            .document("b.rs", "y")
            .build();
        let diagnostics = TestAnalyzer
            .analyze(&ws.projects()[0], &OptionSet::new())
            .unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].document, DocumentId(0));
    }
}
