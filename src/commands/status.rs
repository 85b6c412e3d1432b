//! `subnetctl status` - declared subnets against discovered ones

use anyhow::Result;
use colored::Colorize;
use declarative::{ExecutionPlan, ResourceState};
use std::sync::Arc;

use crate::Context;
use crate::config::Manifest;
use crate::engine::build_plan;
use crate::ui;

/// Per-state counts for the status footer
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub in_sync: usize,
    pub drifted: usize,
    pub missing: usize,
    pub to_remove: usize,
    pub unknown: usize,
}

pub fn run(ctx: &Context, target: Option<&str>) -> Result<()> {
    let manifest = Manifest::load(ctx.config.as_deref())?;
    if manifest.subnets.is_empty() {
        ui::info("No subnets declared");
        return Ok(());
    }

    let client = Arc::new(manifest.client());
    if !ctx.quiet && !client.is_available() {
        ui::warn("neutron is not available; declared subnets are shown as missing");
    }

    let plan = build_plan(&manifest, &client, target)?;
    if plan.is_empty() {
        ui::warn(&format!("No declared subnet matches {}", target.unwrap_or("")));
        return Ok(());
    }

    ui::header("Subnet Status");
    let counts = report(&plan, ctx.verbose > 0);

    println!();
    ui::kv(
        "Summary",
        &format!(
            "{} in sync, {} drifted, {} missing, {} to remove",
            counts.in_sync.to_string().green(),
            counts.drifted.to_string().yellow(),
            counts.missing.to_string().yellow(),
            counts.to_remove.to_string().red()
        ),
    );
    if counts.unknown > 0 {
        ui::warn(&format!("{} subnets could not be inspected", counts.unknown));
    }
    Ok(())
}

/// Print one line per resource and count states.
pub fn report(plan: &ExecutionPlan, verbose: bool) -> StatusCounts {
    let mut counts = StatusCounts::default();

    for resource in plan.resources() {
        let id = resource.id();
        let current = resource
            .current_state()
            .unwrap_or(ResourceState::Unknown);
        let desired = resource.desired_state();

        match (&current, &desired) {
            (ResourceState::Unknown, _) => {
                counts.unknown += 1;
                println!("  {} {:<30} {}", "?".dimmed(), id, "(unknown)".dimmed());
            }
            (ResourceState::Absent, ResourceState::Absent) => {
                counts.in_sync += 1;
                println!("  {} {:<30} {}", "✓".green(), id, "(absent)".dimmed());
            }
            (ResourceState::Absent, _) => {
                counts.missing += 1;
                println!("  {} {:<30} {}", "+".green(), id, "(missing)".yellow());
            }
            (_, ResourceState::Absent) => {
                counts.to_remove += 1;
                println!("  {} {:<30} {}", "-".red(), id, "(will be removed)".red());
            }
            (ResourceState::Drifted { changes }, _) => {
                counts.drifted += 1;
                println!("  {} {:<30} {}", "~".yellow(), id, "(drifted)".yellow());
                for change in changes {
                    ui::dim(&format!("    {change}"));
                }
            }
            _ => {
                counts.in_sync += 1;
                println!("  {} {}", "✓".green(), id);
            }
        }

        if verbose {
            ui::dim(&resource.description());
        }
    }

    counts
}
