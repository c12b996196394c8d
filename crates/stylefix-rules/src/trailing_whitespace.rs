//! Analyzer and fixer for trailing whitespace.
//!
//! Flags spaces and tabs at the end of a line; the fixer deletes the
//! trailing run. CRLF line endings are preserved.

use crate::util::lines_with_offsets;
use stylefix_core::{
    AnalyzeError, Analyzer, Diagnostic, Document, FixError, Fixer, Location, OptionSet, Project,
    TextEdit,
};

/// Analyzer code for trailing-whitespace.
pub const CODE: &str = "SF002";

/// Analyzer name for trailing-whitespace.
pub const NAME: &str = "trailing-whitespace";

/// Flags trailing spaces and tabs on each line.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespace;

impl TrailingWhitespace {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for TrailingWhitespace {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags trailing whitespace at line ends"
    }

    fn analyze(
        &self,
        project: &Project,
        _options: &OptionSet,
    ) -> Result<Vec<Diagnostic>, AnalyzeError> {
        let mut diagnostics = Vec::new();
        for doc in project.documents() {
            for line in lines_with_offsets(doc.text()) {
                // Keep the \r of a CRLF ending out of the trailing run
                let content = line.content.strip_suffix('\r').unwrap_or(line.content);
                let trimmed = content.trim_end_matches([' ', '\t']);
                if trimmed.len() == content.len() {
                    continue;
                }
                let run_start = trimmed.len();
                let run_len = content.len() - run_start;
                diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    doc.id(),
                    Location::new(doc.path().to_path_buf(), line.number, run_start + 1)
                        .with_span(line.offset + run_start, run_len),
                    "trailing whitespace",
                ));
            }
        }
        Ok(diagnostics)
    }
}

/// Deletes each flagged trailing-whitespace run.
#[derive(Debug, Clone, Default)]
pub struct TrailingWhitespaceFixer;

impl TrailingWhitespaceFixer {
    /// Creates the fixer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Fixer for TrailingWhitespaceFixer {
    fn name(&self) -> &'static str {
        "trailing-whitespace-fixer"
    }

    fn fix(
        &self,
        _document: &Document,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<TextEdit>, FixError> {
        Ok(diagnostics
            .iter()
            .map(|d| TextEdit::new(d.location.clone(), ""))
            .collect())
    }
}
