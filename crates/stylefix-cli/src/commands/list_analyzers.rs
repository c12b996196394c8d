//! List analyzers command implementation.

use stylefix_rules::all_pairs;

/// Runs the list-analyzers command.
pub fn run() {
    println!("Available analyzers:\n");
    println!("{:<10} {:<25} {:<8} Description", "Code", "Name", "Fix");
    println!("{}", "-".repeat(80));

    for pair in all_pairs() {
        println!(
            "{:<10} {:<25} {:<8} {}",
            pair.analyzer.code(),
            pair.analyzer.name(),
            if pair.fixer.is_some() { "yes" } else { "no" },
            pair.analyzer.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - SF001, SF002, SF003 (default)");
    println!("  strict       - All analyzers, including report-only ones");
    println!("  minimal      - SF002 only (for gradual adoption)");

    println!("\nUse --analyzers to filter specific analyzers, e.g.:");
    println!("  stylefix check --analyzers trailing-whitespace,final-newline");
    println!("  stylefix fix --analyzers SF001,SF002");
}
