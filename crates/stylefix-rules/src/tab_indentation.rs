//! Analyzer and fixer for tab characters in indentation.
//!
//! # Rationale
//!
//! Mixing tabs and spaces in indentation renders differently depending on
//! editor settings. This pair flags every tab used for indentation and
//! rewrites it to spaces.
//!
//! # Configuration
//!
//! - `spaces_per_tab`: number of spaces each tab becomes (fixer, default: 4)

use crate::util::lines_with_offsets;
use stylefix_core::{
    AnalyzeError, Analyzer, Diagnostic, Document, FixError, Fixer, Location, OptionSet, Project,
    Severity, TextEdit,
};

/// Analyzer code for tab-indentation.
pub const CODE: &str = "SF001";

/// Analyzer name for tab-indentation.
pub const NAME: &str = "tab-indentation";

/// Flags tab characters in leading indentation.
#[derive(Debug, Clone, Default)]
pub struct TabIndentation;

impl TabIndentation {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for TabIndentation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags tab characters used for indentation"
    }

    fn analyze(
        &self,
        project: &Project,
        _options: &OptionSet,
    ) -> Result<Vec<Diagnostic>, AnalyzeError> {
        let mut diagnostics = Vec::new();
        for doc in project.documents() {
            for line in lines_with_offsets(doc.text()) {
                for (i, byte) in line.content.bytes().enumerate() {
                    match byte {
                        b'\t' => diagnostics.push(Diagnostic::new(
                            CODE,
                            NAME,
                            self.default_severity(),
                            doc.id(),
                            Location::new(doc.path().to_path_buf(), line.number, i + 1)
                                .with_span(line.offset + i, 1),
                            "tab character in indentation",
                        )),
                        b' ' => {}
                        _ => break,
                    }
                }
            }
        }
        Ok(diagnostics)
    }
}

/// Replaces each flagged tab with a configurable number of spaces.
#[derive(Debug, Clone)]
pub struct TabFixer {
    spaces_per_tab: usize,
}

impl Default for TabFixer {
    fn default() -> Self {
        Self::new()
    }
}

impl TabFixer {
    /// Creates a fixer with the default width of 4 spaces.
    #[must_use]
    pub fn new() -> Self {
        Self { spaces_per_tab: 4 }
    }

    /// Sets how many spaces each tab becomes.
    #[must_use]
    pub fn spaces_per_tab(mut self, spaces: usize) -> Self {
        self.spaces_per_tab = spaces;
        self
    }
}

impl Fixer for TabFixer {
    fn name(&self) -> &'static str {
        "tab-fixer"
    }

    fn fix(
        &self,
        _document: &Document,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<TextEdit>, FixError> {
        let replacement = " ".repeat(self.spaces_per_tab);
        Ok(diagnostics
            .iter()
            .map(|d| TextEdit::new(d.location.clone(), replacement.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stylefix_core::Workspace;

    fn check_text(text: &str) -> Vec<Diagnostic> {
        let ws = Workspace::builder()
            .project("test")
            .document("test.txt", text)
            .build();
        TabIndentation::new()
            .analyze(&ws.projects()[0], &OptionSet::new())
            .unwrap()
    }

    #[test]
    fn detects_leading_tab() {
        let diagnostics = check_text("\tindented\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].code, CODE);
        assert_eq!(diagnostics[0].location.line, 1);
        assert_eq!(diagnostics[0].location.column, 1);
    }

    #[test]
    fn detects_tab_after_spaces() {
        let diagnostics = check_text("  \tmixed\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].location.column, 3);
        assert_eq!(diagnostics[0].location.offset, 2);
    }

    #[test]
    fn ignores_tab_after_content() {
        let diagnostics = check_text("key:\tvalue\n");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn one_diagnostic_per_tab() {
        let diagnostics = check_text("\t\tdouble\n\tsingle\n");
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn fixer_replaces_tab_spans() {
        let ws = Workspace::builder()
            .project("test")
            .document("test.txt", "\tx\n")
            .build();
        let doc = &ws.projects()[0].documents()[0];
        let diagnostics = check_text("\tx\n");

        let edits = TabFixer::new()
            .spaces_per_tab(1)
            .fix(doc, &diagnostics)
            .unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, " ");
        assert_eq!(edits[0].location.offset, 0);
        assert_eq!(edits[0].location.length, 1);
    }
}
