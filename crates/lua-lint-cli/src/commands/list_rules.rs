//! List rules command implementation.

use lua_lint_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<20} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  default     - LL001, LL002, LL003, LL004");
    println!("  naming      - LL001, LL002, LL003 (globals allowed)");
    println!("  no-globals  - LL004 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  lua-lint check --rules local-var-name,no-global-var");
    println!("  lua-lint check --rules LL001,LL004");
}
