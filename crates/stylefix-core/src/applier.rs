//! Applies a fixer's edits to the documents of a workspace snapshot.

use crate::analyzer::Fixer;
use crate::cancellation::CancellationToken;
use crate::result::AnalysisResult;
use crate::types::{DocumentId, TextEdit};
use crate::workspace::{Document, Workspace};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Computes and applies one fixer's edits against a workspace snapshot.
///
/// Every document with at least one diagnostic attributed to
/// `analyzer_name` gets the fixer's proposed edits. Edits for distinct
/// documents are computed in parallel; each document's own edits are merged
/// deterministically by location order, rejecting overlapping later edits
/// rather than corrupting text.
///
/// Failure to compute or apply edits for one document is logged and leaves
/// that document unchanged; sibling documents' fixes still apply.
///
/// Returns a new snapshot sharing all unaffected documents. The caller
/// detects change by comparing document texts against the input snapshot.
#[must_use]
pub fn apply_fixes(
    workspace: &Workspace,
    result: &AnalysisResult,
    analyzer_name: &str,
    fixer: &dyn Fixer,
    token: &CancellationToken,
) -> Workspace {
    let targets: Vec<Arc<Document>> = result
        .document_ids()
        .into_iter()
        .filter(|id| !result.diagnostics_for_analyzer(*id, analyzer_name).is_empty())
        .filter_map(|id| workspace.document(id).cloned())
        .collect();

    let edited: Vec<(DocumentId, String)> = targets
        .par_iter()
        .filter_map(|document| {
            if token.is_cancelled() {
                return None;
            }
            let diagnostics = result.diagnostics_for_analyzer(document.id(), analyzer_name);
            let edits = match fixer.fix(document, &diagnostics) {
                Ok(edits) => edits,
                Err(e) => {
                    warn!(
                        path = %document.path().display(),
                        error = %e,
                        "fix computation failed, leaving document unchanged"
                    );
                    return None;
                }
            };
            if edits.is_empty() {
                return None;
            }
            let new_text = apply_edits(document.path(), document.text(), edits)?;
            Some((document.id(), new_text))
        })
        .collect();

    let mut next = workspace.clone();
    for (id, text) in edited {
        next = next.with_document_text(id, text);
    }
    next
}

/// Merges edits into a document's text.
///
/// Edits are sorted by byte offset; an edit overlapping an already-accepted
/// earlier edit is rejected. Accepted edits are applied back-to-front so
/// earlier offsets stay valid. Returns `None` (document fails as a whole) if
/// any edit is out of bounds or not on a character boundary.
fn apply_edits(path: &Path, text: &str, mut edits: Vec<TextEdit>) -> Option<String> {
    edits.sort_by_key(|e| (e.offset(), e.end()));

    let mut accepted: Vec<TextEdit> = Vec::with_capacity(edits.len());
    for edit in edits {
        if edit.end() > text.len()
            || !text.is_char_boundary(edit.offset())
            || !text.is_char_boundary(edit.end())
        {
            warn!(
                path = %path.display(),
                offset = edit.offset(),
                length = edit.location.length,
                "edit span out of bounds, leaving document unchanged"
            );
            return None;
        }
        if let Some(previous) = accepted.last() {
            if edit.offset() < previous.end() {
                debug!(
                    path = %path.display(),
                    offset = edit.offset(),
                    "rejecting edit overlapping an earlier edit"
                );
                continue;
            }
        }
        accepted.push(edit);
    }

    let mut new_text = text.to_string();
    for edit in accepted.iter().rev() {
        new_text.replace_range(edit.offset()..edit.end(), &edit.new_text);
    }
    Some(new_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FixError;
    use crate::types::{Diagnostic, Location, Severity};
    use crate::workspace::Workspace;
    use std::path::PathBuf;

    fn edit(offset: usize, length: usize, new_text: &str) -> TextEdit {
        TextEdit::new(
            Location::new(PathBuf::from("a.rs"), 1, 1).with_span(offset, length),
            new_text,
        )
    }

    #[test]
    fn non_overlapping_edits_all_apply() {
        let text = "aaa bbb ccc";
        let merged = apply_edits(
            Path::new("a.rs"),
            text,
            vec![edit(8, 3, "C"), edit(0, 3, "A")],
        );
        assert_eq!(merged.as_deref(), Some("A bbb C"));
    }

    #[test]
    fn overlapping_later_edit_is_rejected() {
        let text = "abcdef";
        let merged = apply_edits(
            Path::new("a.rs"),
            text,
            vec![edit(0, 4, "X"), edit(2, 3, "Y")],
        );
        assert_eq!(merged.as_deref(), Some("Xef"));
    }

    #[test]
    fn out_of_bounds_edit_fails_whole_document() {
        let merged = apply_edits(Path::new("a.rs"), "short", vec![edit(3, 99, "x")]);
        assert!(merged.is_none());
    }

    #[test]
    fn non_char_boundary_edit_fails_whole_document() {
        // 'é' is two bytes; offset 1 splits it
        let merged = apply_edits(Path::new("a.rs"), "é", vec![edit(1, 1, "x")]);
        assert!(merged.is_none());
    }

    #[test]
    fn insertion_edit_has_zero_length() {
        let merged = apply_edits(Path::new("a.rs"), "ab", vec![edit(2, 0, "c")]);
        assert_eq!(merged.as_deref(), Some("abc"));
    }

    // ── apply_fixes over a workspace ──

    struct ReplaceSpanFixer;

    impl Fixer for ReplaceSpanFixer {
        fn name(&self) -> &'static str {
            "replace-span"
        }

        fn fix(
            &self,
            _document: &Document,
            diagnostics: &[Diagnostic],
        ) -> Result<Vec<TextEdit>, FixError> {
            Ok(diagnostics
                .iter()
                .map(|d| TextEdit::new(d.location.clone(), " "))
                .collect())
        }
    }

    struct FailingFixer;

    impl Fixer for FailingFixer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn fix(
            &self,
            document: &Document,
            _diagnostics: &[Diagnostic],
        ) -> Result<Vec<TextEdit>, FixError> {
            Err(FixError::Failed {
                fixer: self.name().to_string(),
                path: document.path().to_path_buf(),
                message: "boom".to_string(),
            })
        }
    }

    fn tab_diagnostic(doc: DocumentId, path: &str, offset: usize) -> Diagnostic {
        Diagnostic::new(
            "SF001",
            "tab-indentation",
            Severity::Warning,
            doc,
            Location::new(PathBuf::from(path), 1, 1).with_span(offset, 1),
            "tab character in indentation",
        )
    }

    #[test]
    fn applies_fix_to_flagged_document_only() {
        let ws = Workspace::builder()
            .project("app")
            .document("a.rs", "\tx")
            .document("b.rs", "\ty")
            .build();
        let result = AnalysisResult::new();
        result.append(0, tab_diagnostic(DocumentId(0), "a.rs", 0));

        let fixed = apply_fixes(
            &ws,
            &result,
            "tab-indentation",
            &ReplaceSpanFixer,
            &CancellationToken::new(),
        );

        assert_eq!(fixed.document(DocumentId(0)).unwrap().text(), " x");
        assert_eq!(fixed.document(DocumentId(1)).unwrap().text(), "\ty");
    }

    #[test]
    fn failing_document_keeps_original_while_siblings_are_fixed() {
        let ws = Workspace::builder()
            .project("app")
            .document("a.rs", "\tx")
            .build();
        let result = AnalysisResult::new();
        result.append(0, tab_diagnostic(DocumentId(0), "a.rs", 0));

        let fixed = apply_fixes(
            &ws,
            &result,
            "tab-indentation",
            &FailingFixer,
            &CancellationToken::new(),
        );

        assert_eq!(fixed.document(DocumentId(0)).unwrap().text(), "\tx");
        assert!(!ws.text_differs(&fixed));
    }

    #[test]
    fn cancelled_token_applies_nothing() {
        let ws = Workspace::builder()
            .project("app")
            .document("a.rs", "\tx")
            .build();
        let result = AnalysisResult::new();
        result.append(0, tab_diagnostic(DocumentId(0), "a.rs", 0));

        let token = CancellationToken::new();
        token.cancel();
        let fixed = apply_fixes(&ws, &result, "tab-indentation", &ReplaceSpanFixer, &token);

        assert!(!ws.text_differs(&fixed));
    }
}
