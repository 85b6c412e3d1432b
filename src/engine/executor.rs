//! Execution engine - subnetctl executor with UI integration

use anyhow::Result;
use colored::Colorize;
use declarative::{
    ApplyResult, AutoConfirm, ConfirmCallback, ExecuteOptions, ExecuteSummary, ExecutionPlan,
    ProgressCallback, compute_diffs,
};

use super::differ::display_diff;

/// Options for execution (adds `yes` for confirmation skip)
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Don't make changes, just show what would happen
    pub dry_run: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Verbose output
    pub verbose: bool,
}

/// Execute the plan with terminal output
pub fn execute(plan: ExecutionPlan, opts: RunOptions) -> Result<ExecuteSummary> {
    let diffs = compute_diffs(plan.resources());
    display_diff(&diffs);

    let exec_opts = ExecuteOptions {
        dry_run: opts.dry_run,
        verbose: opts.verbose,
    };
    let mut progress = TerminalProgress {
        verbose: opts.verbose,
    };

    let summary = if opts.yes {
        declarative::execute(plan, exec_opts, &mut progress, &mut AutoConfirm)?
    } else {
        declarative::execute(plan, exec_opts, &mut progress, &mut DialoguerConfirm)?
    };

    if diffs.is_empty() {
        return Ok(summary);
    }

    if opts.dry_run {
        println!();
        println!("  {} Dry run - no changes made", "ℹ".blue());
        return Ok(summary);
    }

    if summary.declined {
        println!();
        println!("  {} Aborted", "✗".red());
        return Ok(summary);
    }

    print_summary(&summary);
    Ok(summary)
}

/// Prints one line per resource as it completes
struct TerminalProgress {
    verbose: bool,
}

impl ProgressCallback for TerminalProgress {
    fn on_pass_start(&mut self, count: usize) {
        println!();
        println!("  {} Applying {} subnets...", "→".cyan(), count);
    }

    fn on_resource_start(&mut self, id: &str, description: &str) {
        if self.verbose {
            println!("    {} {} {}", "·".dimmed(), id, description.dimmed());
        }
    }

    fn on_resource_complete(&mut self, id: &str, result: &ApplyResult) {
        match result {
            ApplyResult::NoChange => {
                if self.verbose {
                    println!("    {} {} {}", "○".dimmed(), id, "(no change)".dimmed());
                }
            }
            ApplyResult::Created => println!("    {} {} created", "✓".green(), id),
            ApplyResult::Modified => println!("    {} {} updated", "✓".green(), id),
            ApplyResult::Removed => println!("    {} {} removed", "✓".green(), id),
            ApplyResult::Skipped { reason } => {
                println!("    {} {} {}", "⊘".yellow(), id, format!("({reason})").dimmed());
            }
            ApplyResult::Failed { error } => {
                println!("    {} {} {}", "✗".red(), id, error.red());
            }
        }
    }

    fn on_pass_complete(&mut self) {}
}

/// Confirm with user
struct DialoguerConfirm;

impl ConfirmCallback for DialoguerConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        use dialoguer::Confirm;

        println!();
        let confirmed = Confirm::new()
            .with_prompt(prompt)
            .default(true)
            .interact()?;

        Ok(confirmed)
    }
}

/// Print final summary
fn print_summary(summary: &ExecuteSummary) {
    println!();
    if summary.is_success() {
        println!("  {} Subnets reconciled successfully!", "✓".green().bold());
    } else {
        println!("  {} Subnets reconciled with errors", "⚠".yellow().bold());
    }

    if summary.created > 0 {
        println!("    • {} subnets created", summary.created);
    }
    if summary.modified > 0 {
        println!("    • {} subnets updated", summary.modified);
    }
    if summary.removed > 0 {
        println!("    • {} subnets removed", summary.removed);
    }
    if summary.skipped > 0 {
        println!("    • {} subnets skipped", summary.skipped);
    }
    if summary.failed > 0 {
        println!("    • {} {} failed", summary.failed, "subnets".red());
    }
}
