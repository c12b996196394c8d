//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# stylefix configuration

# Preset: recommended (default), strict, or minimal
preset = "recommended"

[engine]
# Glob patterns to exclude from formatting
exclude = [
    "**/target/**",
    "**/vendor/**",
    "**/generated/**",
]

# Glob patterns to include (empty = all discovered files)
# include = ["**/*.rs", "**/*.toml"]

# Respect .gitignore files during discovery
respect_gitignore = true

# Analyzer configurations
# Each analyzer can be enabled/disabled and have its severity overridden

[analyzers.tab-indentation]
enabled = true
# severity = "warning"  # Override default severity
# spaces_per_tab = 4

[analyzers.trailing-whitespace]
enabled = true

# [analyzers.line-length]
# enabled = true
# max_length = 120
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("stylefix.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created stylefix.toml");
    println!("\nNext steps:");
    println!("  1. Edit stylefix.toml to configure analyzers");
    println!("  2. Run: stylefix check");
    println!("  3. Run: stylefix fix");

    Ok(())
}
