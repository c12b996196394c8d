//! Check command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use stylefix_core::{CancellationToken, FormatMode, Orchestrator, Severity};

use crate::config_resolver::ConfigSource;
use crate::{loader, OutputFormat};

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    analyzers_filter: Option<String>,
    exclude: Vec<String>,
    as_errors: bool,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(source)?;
    let loaded = loader::load(path, &config.engine, &exclude)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    tracing::info!(
        "Checking {} ({} files)",
        path.display(),
        loaded.files_loaded
    );

    let registry = super::build_registry(&config, analyzers_filter.as_deref());
    let outcome = Orchestrator::new(registry)
        .treat_as_errors(as_errors)
        .run(
            loaded.workspace,
            &[],
            FormatMode::Report,
            &CancellationToken::new(),
        )
        .context("Check failed")?;

    super::print(&outcome.diagnostics, loaded.files_loaded, format)?;

    // Exit with error code if there are errors
    if outcome
        .diagnostics
        .iter()
        .any(|d| d.severity == Severity::Error)
    {
        std::process::exit(1);
    }

    Ok(())
}
