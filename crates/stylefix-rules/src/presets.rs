//! Analyzer/fixer pair presets for common configurations.

use crate::{
    FinalNewline, FinalNewlineFixer, LineLength, TabFixer, TabIndentation, TrailingWhitespace,
    TrailingWhitespaceFixer,
};
use std::sync::Arc;
use stylefix_core::{AnalyzerFixerPair, OptionSet, StaticRegistry};

/// Preset configurations for stylefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Recommended pairs with sensible defaults.
    Recommended,
    /// Strict pairs for maximum consistency.
    Strict,
    /// Minimal pairs for gradual adoption.
    Minimal,
}

impl Preset {
    /// Returns the ordered pairs for this preset.
    #[must_use]
    pub fn pairs(self) -> Vec<AnalyzerFixerPair> {
        match self {
            Self::Recommended => recommended_pairs(),
            Self::Strict => strict_pairs(),
            Self::Minimal => minimal_pairs(),
        }
    }
}

/// Returns the recommended ordered set of pairs.
///
/// Includes:
/// - `tab-indentation` (SF001) - tabs in indentation, fixable
/// - `trailing-whitespace` (SF002) - trailing whitespace, fixable
/// - `final-newline` (SF003) - final newline convention, fixable
#[must_use]
pub fn recommended_pairs() -> Vec<AnalyzerFixerPair> {
    vec![
        AnalyzerFixerPair::fixable(Arc::new(TabIndentation::new()), Arc::new(TabFixer::new())),
        AnalyzerFixerPair::fixable(
            Arc::new(TrailingWhitespace::new()),
            Arc::new(TrailingWhitespaceFixer::new()),
        ),
        AnalyzerFixerPair::fixable(
            Arc::new(FinalNewline::new()),
            Arc::new(FinalNewlineFixer::new()),
        ),
    ]
}

/// Returns the strict ordered set of pairs.
///
/// Includes all recommended pairs plus:
/// - `line-length` (SF004) - overlong lines, report-only
#[must_use]
pub fn strict_pairs() -> Vec<AnalyzerFixerPair> {
    let mut pairs = recommended_pairs();
    pairs.push(AnalyzerFixerPair::report_only(Arc::new(LineLength::new())));
    pairs
}

/// Returns the minimal ordered set of pairs.
///
/// For gradual adoption, only includes `trailing-whitespace`.
#[must_use]
pub fn minimal_pairs() -> Vec<AnalyzerFixerPair> {
    vec![AnalyzerFixerPair::fixable(
        Arc::new(TrailingWhitespace::new()),
        Arc::new(TrailingWhitespaceFixer::new()),
    )]
}

/// Returns all available pairs.
#[must_use]
pub fn all_pairs() -> Vec<AnalyzerFixerPair> {
    strict_pairs()
}

/// Builds a registry from a preset and a shared option set.
#[must_use]
pub fn registry(preset: Preset, options: OptionSet) -> StaticRegistry {
    StaticRegistry::new(preset.pairs()).with_options(options)
}
