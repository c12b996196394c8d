//! CLI command implementations.

pub mod check;
pub mod fix;
pub mod init;
pub mod list_analyzers;
mod output;

pub use output::print;

use crate::config_resolver::ConfigSource;
use anyhow::{Context, Result};
use std::sync::Arc;
use stylefix_core::{AnalyzerFixerPair, AnalyzerRegistry, Config, StaticRegistry};
use stylefix_rules::{all_pairs, Preset};

/// Loads configuration from a resolved source, falling back to defaults.
pub fn load_config(source: &ConfigSource) -> Result<Config> {
    match source {
        ConfigSource::Default => Ok(Config::default()),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))
        }
    }
}

/// Builds the analyzer registry from config and an optional CLI filter.
///
/// The preset comes from the config (default: recommended); a
/// comma-separated `--analyzers` filter narrows it to specific analyzers,
/// matched by name or code. Unknown names are warned about and skipped.
pub fn build_registry(config: &Config, analyzers_filter: Option<&str>) -> Arc<dyn AnalyzerRegistry> {
    let pairs = match analyzers_filter {
        Some(filter) => {
            let names: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_pairs(&names)
        }
        None => preset_from_config(config).pairs(),
    };

    Arc::new(StaticRegistry::new(pairs).with_options(config.option_set()))
}

/// Resolves the preset named in config, defaulting to recommended.
fn preset_from_config(config: &Config) -> Preset {
    match config.preset.as_deref() {
        None | Some("recommended") => Preset::Recommended,
        Some("strict") => Preset::Strict,
        Some("minimal") => Preset::Minimal,
        Some(other) => {
            tracing::warn!("Unknown preset '{other}', using recommended");
            Preset::Recommended
        }
    }
}

/// Selects pairs by analyzer name or code from the full set.
fn filter_pairs(names: &[&str]) -> Vec<AnalyzerFixerPair> {
    let available = all_pairs();
    let mut pairs = Vec::new();

    for name in names {
        match available
            .iter()
            .find(|p| p.analyzer.name() == *name || p.analyzer.code() == *name)
        {
            Some(pair) => pairs.push(pair.clone()),
            None => tracing::warn!("Unknown analyzer: {}", name),
        }
    }

    pairs
}
