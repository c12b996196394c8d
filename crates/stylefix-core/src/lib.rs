//! # stylefix-core
//!
//! Core engine for stylefix: a code-style analysis and fix orchestration
//! framework over immutable workspace snapshots.
//!
//! The engine coordinates three pieces:
//!
//! - [`run_analyzers`] executes a batch of analyzers against one project,
//!   merging findings into a shared [`AnalysisResult`]
//! - [`apply_fixes`] turns one fixer's diagnostics into edited documents on
//!   a new [`Workspace`] snapshot
//! - [`Orchestrator`] fans analysis out across projects in parallel and
//!   either reports diagnostics or drives the sequential fix loop over each
//!   [`AnalyzerFixerPair`]
//!
//! ## Example
//!
//! ```ignore
//! use stylefix_core::{CancellationToken, FormatMode, Orchestrator};
//!
//! let orchestrator = Orchestrator::new(registry);
//! let outcome = orchestrator.run(
//!     workspace,
//!     &eligible_paths,
//!     FormatMode::Fix,
//!     &CancellationToken::new(),
//! )?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod applier;
mod cancellation;
mod options;
mod orchestrator;
mod result;
mod runner;
mod types;
mod workspace;

pub use analyzer::{
    AnalyzeError, Analyzer, AnalyzerFixerPair, AnalyzerRegistry, FixError, Fixer, StaticRegistry,
};
pub use applier::apply_fixes;
pub use cancellation::CancellationToken;
pub use options::{AnalyzerOptions, Config, ConfigError, EngineConfig, OptionSet};
pub use orchestrator::{FormatMode, FormatOutcome, Orchestrator, OrchestratorError};
pub use result::AnalysisResult;
pub use runner::{run_analyzers, DocumentFilter};
pub use types::{Diagnostic, DocumentId, Location, Severity, StyleDiagnostic, TextEdit};
pub use workspace::{Document, Project, TextEncoding, Workspace, WorkspaceBuilder};
