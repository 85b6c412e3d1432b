//! `subnetctl apply` - one reconciliation pass

use anyhow::{Result, bail};
use std::sync::Arc;

use crate::Context;
use crate::config::Manifest;
use crate::engine::{RunOptions, build_plan, execute};
use crate::ui;

pub fn run(ctx: &Context, target: Option<&str>, dry_run: bool, yes: bool) -> Result<()> {
    let manifest = Manifest::load(ctx.config.as_deref())?;
    if manifest.subnets.is_empty() {
        ui::info("No subnets declared");
        return Ok(());
    }

    let client = Arc::new(manifest.client());
    if !ctx.quiet && !client.is_available() {
        ui::warn("neutron is not available; subnets cannot be discovered");
    }

    let plan = build_plan(&manifest, &client, target)?;
    if plan.is_empty() {
        ui::warn(&format!("No declared subnet matches {}", target.unwrap_or("")));
        return Ok(());
    }

    let summary = execute(
        plan,
        RunOptions {
            dry_run,
            yes,
            verbose: ctx.verbose > 0,
        },
    )?;

    if !summary.is_success() {
        bail!("{} of {} subnets failed", summary.failed, summary.total());
    }
    Ok(())
}
