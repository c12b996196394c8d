//! Analyzer and fixer for the final newline convention.
//!
//! A non-empty document must end with exactly one newline. The fixer
//! appends a missing newline or trims a surplus run down to one.

use stylefix_core::{
    AnalyzeError, Analyzer, Diagnostic, Document, FixError, Fixer, Location, OptionSet, Project,
    TextEdit,
};

/// Analyzer code for final-newline.
pub const CODE: &str = "SF003";

/// Analyzer name for final-newline.
pub const NAME: &str = "final-newline";

/// Flags documents that do not end with exactly one newline.
#[derive(Debug, Clone, Default)]
pub struct FinalNewline;

impl FinalNewline {
    /// Creates the analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Returns the byte offset where the trailing newline run starts, and its
/// length. `(len, 0)` means the document has no trailing newline.
fn trailing_newline_run(text: &str) -> (usize, usize) {
    let trimmed = text.trim_end_matches('\n');
    (trimmed.len(), text.len() - trimmed.len())
}

impl Analyzer for FinalNewline {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires documents to end with exactly one newline"
    }

    fn analyze(
        &self,
        project: &Project,
        _options: &OptionSet,
    ) -> Result<Vec<Diagnostic>, AnalyzeError> {
        let mut diagnostics = Vec::new();
        for doc in project.documents() {
            let text = doc.text();
            if text.is_empty() {
                continue;
            }
            let (run_start, run_len) = trailing_newline_run(text);
            if run_len == 1 {
                continue;
            }
            let line = text[..run_start].matches('\n').count() + 1;
            let column = run_start - text[..run_start].rfind('\n').map_or(0, |p| p + 1) + 1;
            let message = if run_len == 0 {
                "missing final newline"
            } else {
                "multiple trailing newlines"
            };
            diagnostics.push(Diagnostic::new(
                CODE,
                NAME,
                self.default_severity(),
                doc.id(),
                Location::new(doc.path().to_path_buf(), line, column)
                    .with_span(run_start, run_len),
                message,
            ));
        }
        Ok(diagnostics)
    }
}

/// Rewrites the trailing newline run to exactly one newline.
#[derive(Debug, Clone, Default)]
pub struct FinalNewlineFixer;

impl FinalNewlineFixer {
    /// Creates the fixer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Fixer for FinalNewlineFixer {
    fn name(&self) -> &'static str {
        "final-newline-fixer"
    }

    fn fix(
        &self,
        _document: &Document,
        diagnostics: &[Diagnostic],
    ) -> Result<Vec<TextEdit>, FixError> {
        Ok(diagnostics
            .iter()
            .map(|d| TextEdit::new(d.location.clone(), "\n"))
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
        FinalNewline::new()
            .analyze(&ws.projects()[0], &OptionSet::new())
            .unwrap()
    }

    #[test]
    fn accepts_single_final_newline() {
        assert!(check_text("content\n").is_empty());
    }

    #[test]
    fn accepts_empty_document() {
        assert!(check_text("").is_empty());
    }

    #[test]
    fn flags_missing_newline() {
        let diagnostics = check_text("content");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "missing final newline");
        assert_eq!(diagnostics[0].location.offset, 7);
        assert_eq!(diagnostics[0].location.length, 0);
    }

    #[test]
    fn flags_multiple_trailing_newlines() {
        let diagnostics = check_text("content\n\n\n");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "multiple trailing newlines");
        assert_eq!(diagnostics[0].location.offset, 7);
        assert_eq!(diagnostics[0].location.length, 3);
    }

    #[test]
    fn fixer_normalizes_to_one_newline() {
        let ws = Workspace::builder()
            .project("test")
            .document("test.txt", "content\n\n\n")
            .build();
        let doc = &ws.projects()[0].documents()[0];
        let diagnostics = check_text("content\n\n\n");

        let edits = FinalNewlineFixer::new().fix(doc, &diagnostics).unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].new_text, "\n");
        assert_eq!(edits[0].location.offset, 7);
        assert_eq!(edits[0].location.length, 3);
    }
}
