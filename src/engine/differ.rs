//! Diff display - subnetctl-specific UI

use colored::Colorize;
use declarative::{DiffSummary, ResourceDiff, ResourceState};

/// One-character marker for a diff
fn symbol(diff: &ResourceDiff) -> colored::ColoredString {
    if diff.is_addition() {
        "+".green()
    } else if diff.is_removal() {
        "-".red()
    } else if diff.is_modification() {
        "~".yellow()
    } else {
        "?".dimmed()
    }
}

/// Short description of the transition a diff represents
pub fn describe(diff: &ResourceDiff) -> String {
    match (&diff.current, &diff.desired) {
        (ResourceState::Absent, _) => "(missing, will create)".to_string(),
        (_, ResourceState::Absent) => "(will remove)".to_string(),
        (ResourceState::Drifted { changes }, _) => match changes.len() {
            1 => "(1 property differs)".to_string(),
            n => format!("({n} properties differ)"),
        },
        (ResourceState::Unknown, _) => "(state unknown)".to_string(),
        _ => String::new(),
    }
}

/// Display a list of diffs in a user-friendly format
pub fn display_diff(diffs: &[ResourceDiff]) {
    if diffs.is_empty() {
        println!();
        println!("  {} No changes needed", "✓".green());
        return;
    }

    println!();
    println!(
        "┌─ {} ─────────────────────────────────────────┐",
        "Subnet Diff".bold()
    );
    println!("│");

    for diff in diffs {
        println!(
            "│   {} {:<30} {}",
            symbol(diff),
            diff.resource_id,
            describe(diff).dimmed()
        );
        for change in diff.changes() {
            println!("│       {}", change.dimmed());
        }
    }
    println!("│");

    let summary = DiffSummary::from_diffs(diffs);
    println!("├─────────────────────────────────────────────────────┤");
    println!(
        "│ Summary: {} changes ({} to create, {} to update, {} to remove)",
        summary.total().to_string().bold(),
        summary.additions.to_string().green(),
        summary.modifications.to_string().yellow(),
        summary.removals.to_string().red()
    );
    println!("└─────────────────────────────────────────────────────┘");
}
