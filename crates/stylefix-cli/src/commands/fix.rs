//! Fix command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use stylefix_core::{CancellationToken, FormatMode, Orchestrator, TextEncoding};

use crate::config_resolver::ConfigSource;
use crate::loader;

/// UTF-8 byte-order mark, re-added when persisting BOM documents.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Runs the fix command.
pub fn run(
    path: &Path,
    analyzers_filter: Option<String>,
    exclude: Vec<String>,
    dry_run: bool,
    source: &ConfigSource,
) -> Result<()> {
    let config = super::load_config(source)?;
    let loaded = loader::load(path, &config.engine, &exclude)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    tracing::info!("Fixing {} ({} files)", path.display(), loaded.files_loaded);

    let registry = super::build_registry(&config, analyzers_filter.as_deref());
    let outcome = Orchestrator::new(registry)
        .run(
            loaded.workspace.clone(),
            &[],
            FormatMode::Fix,
            &CancellationToken::new(),
        )
        .context("Fix failed")?;

    if outcome.changed_documents.is_empty() {
        println!("No changes needed ({} files checked)", loaded.files_loaded);
        return Ok(());
    }

    for id in &outcome.changed_documents {
        // Invariant: changed ids come from the snapshot we passed in
        let doc = outcome
            .workspace
            .document(*id)
            .context("changed document missing from result snapshot")?;
        let target = loaded.absolute_path(doc.path());

        if dry_run {
            println!("Would fix: {}", doc.path().display());
            continue;
        }

        let mut bytes = Vec::with_capacity(doc.text().len() + UTF8_BOM.len());
        if doc.encoding() == TextEncoding::Utf8Bom {
            bytes.extend_from_slice(UTF8_BOM);
        }
        bytes.extend_from_slice(doc.text().as_bytes());

        std::fs::write(&target, bytes)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        println!("Fixed: {}", doc.path().display());
    }

    if dry_run {
        println!(
            "{} file(s) would change (dry run, nothing written)",
            outcome.changed_documents.len()
        );
    } else {
        println!(
            "Fixed {} file(s) in {}ms",
            outcome.changed_documents.len(),
            outcome.elapsed.as_millis()
        );
    }

    Ok(())
}
