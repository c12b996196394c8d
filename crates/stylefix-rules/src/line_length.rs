//! Report-only analyzer for overlong lines.
//!
//! # Configuration
//!
//! - `max_length`: maximum line length in characters (default: 120)
//!
//! There is no paired fixer: breaking a long line needs human judgment.

use crate::util::lines_with_offsets;
use stylefix_core::{
    AnalyzeError, Analyzer, Diagnostic, Location, OptionSet, Project,
};

/// Analyzer code for line-length.
pub const CODE: &str = "SF004";

/// Analyzer name for line-length.
pub const NAME: &str = "line-length";

/// Default maximum line length in characters.
const DEFAULT_MAX_LENGTH: usize = 120;

/// Flags lines longer than a configurable maximum.
#[derive(Debug, Clone)]
pub struct LineLength {
    max_length: usize,
}

impl Default for LineLength {
    fn default() -> Self {
        Self::new()
    }
}

impl LineLength {
    /// Creates the analyzer with the default maximum.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }

    /// Sets the maximum line length.
    #[must_use]
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

impl Analyzer for LineLength {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags lines exceeding the maximum length"
    }

    fn analyze(
        &self,
        project: &Project,
        options: &OptionSet,
    ) -> Result<Vec<Diagnostic>, AnalyzeError> {
        let max_length = options
            .analyzer(NAME)
            .map_or(self.max_length as i64, |o| {
                o.get_int("max_length", self.max_length as i64)
            })
            .max(0) as usize;

        let mut diagnostics = Vec::new();
        for doc in project.documents() {
            for line in lines_with_offsets(doc.text()) {
                let content = line.content.strip_suffix('\r').unwrap_or(line.content);
                let length = content.chars().count();
                if length <= max_length {
                    continue;
                }
                diagnostics.push(Diagnostic::new(
                    CODE,
                    NAME,
                    self.default_severity(),
                    doc.id(),
                    Location::new(doc.path().to_path_buf(), line.number, max_length + 1)
                        .with_span(line.offset, content.len()),
                    format!("line is {length} characters, limit is {max_length}"),
                ));
            }
        }
        Ok(diagnostics)
    }
}
