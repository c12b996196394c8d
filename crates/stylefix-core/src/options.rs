//! Configuration and per-project analyzer option sets.

use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for stylefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Per-analyzer configurations.
    #[serde(default)]
    pub analyzers: HashMap<String, AnalyzerOptions>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Resolves the option set consumed by analyzer runs.
    #[must_use]
    pub fn option_set(&self) -> OptionSet {
        OptionSet {
            analyzers: self.analyzers.clone(),
        }
    }
}

/// Engine-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Glob patterns to exclude from formatting.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, all discovered files).
    #[serde(default)]
    pub include: Vec<String>,

    /// Whether to respect .gitignore files during discovery.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/target/**".to_string(), "**/vendor/**".to_string()],
            include: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Per-analyzer configuration options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Whether this analyzer is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this analyzer's diagnostics.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Analyzer-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl AnalyzerOptions {
    /// Gets a boolean option with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.options
            .get(key)
            .and_then(toml::Value::as_bool)
            .unwrap_or(default)
    }

    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The analyzer option set resolved for one project.
///
/// Consumed read-only by the analysis runner: disabled analyzers are
/// skipped, severity overrides are applied to every diagnostic an
/// analyzer yields.
#[derive(Debug, Clone, Default)]
pub struct OptionSet {
    analyzers: HashMap<String, AnalyzerOptions>,
}

impl OptionSet {
    /// Creates an empty option set (all analyzers enabled, defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the options for one analyzer.
    #[must_use]
    pub fn with_analyzer(mut self, name: impl Into<String>, options: AnalyzerOptions) -> Self {
        self.analyzers.insert(name.into(), options);
        self
    }

    /// Checks if an analyzer is enabled.
    #[must_use]
    pub fn is_enabled(&self, analyzer_name: &str) -> bool {
        self.analyzers
            .get(analyzer_name)
            .map_or(true, |o| o.enabled.unwrap_or(true))
    }

    /// Gets the severity override for an analyzer.
    #[must_use]
    pub fn severity_override(&self, analyzer_name: &str) -> Option<Severity> {
        self.analyzers.get(analyzer_name).and_then(|o| o.severity)
    }

    /// Gets the options for an analyzer, if configured.
    #[must_use]
    pub fn analyzer(&self, analyzer_name: &str) -> Option<&AnalyzerOptions> {
        self.analyzers.get(analyzer_name)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
