//! List rules command implementation.

use doclint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - DL001, DL002, DL003 with defaults (default)");
    println!("  strict       - @author and @version required, no narrative tags");
    println!("  minimal      - DL002 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  doclint check --rules javadoc-method,javadoc-type");
    println!("  doclint check --rules DL001,DL002");
}
