//! # stylefix-rules
//!
//! Built-in style analyzer/fixer pairs for stylefix.
//!
//! Each analyzer flags one class of whitespace or layout issue; fixable
//! analyzers come with a paired fixer that resolves exactly the
//! diagnostics the analyzer produces.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod final_newline;
mod line_length;
mod presets;
mod tab_indentation;
mod trailing_whitespace;
mod util;

pub use final_newline::{FinalNewline, FinalNewlineFixer};
pub use line_length::LineLength;
pub use presets::{all_pairs, minimal_pairs, recommended_pairs, registry, strict_pairs, Preset};
pub use tab_indentation::{TabFixer, TabIndentation};
pub use trailing_whitespace::{TrailingWhitespace, TrailingWhitespaceFixer};
