//! Shared output formatting for check results.

use anyhow::Result;
use stylefix_core::{Diagnostic, Severity};

use crate::OutputFormat;

/// Print diagnostics in the specified format.
pub fn print(diagnostics: &[Diagnostic], files_checked: usize, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(diagnostics, files_checked),
        OutputFormat::Json => return print_json(diagnostics),
        OutputFormat::Compact => print_compact(diagnostics),
    }
    Ok(())
}

fn print_text(diagnostics: &[Diagnostic], files_checked: usize) {
    let errors = count(diagnostics, Severity::Error);
    let warnings = count(diagnostics, Severity::Warning);
    let infos = count(diagnostics, Severity::Info);

    for diagnostic in diagnostics {
        let severity_indicator = match diagnostic.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };

        println!(
            "{} {} at {}:{}:{}",
            diagnostic.code,
            diagnostic.analyzer,
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
        );
        println!("  {}: {}", severity_indicator, diagnostic.message);
        println!();
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, files_checked
    );
}

fn print_json(diagnostics: &[Diagnostic]) -> Result<()> {
    let json = serde_json::to_string_pretty(diagnostics)?;
    println!("{json}");
    Ok(())
}

fn print_compact(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!(
            "{}:{}:{}: {} [{}] {}",
            diagnostic.location.file.display(),
            diagnostic.location.line,
            diagnostic.location.column,
            diagnostic.severity,
            diagnostic.code,
            diagnostic.message,
        );
    }
}

fn count(diagnostics: &[Diagnostic], severity: Severity) -> usize {
    diagnostics.iter().filter(|d| d.severity == severity).count()
}
