//! Execution planner - binds the manifest to discovered subnets

use anyhow::{Context, Result};
use declarative::ExecutionPlan;
use neutronkit::Client;
use std::sync::Arc;

use crate::config::Manifest;
use crate::resource::SubnetResource;

/// Discover subnets once and build a plan in manifest order.
///
/// `target` narrows the plan to one subnet ("web" or "subnet.web").
pub fn build_plan(
    manifest: &Manifest,
    client: &Arc<Client>,
    target: Option<&str>,
) -> Result<ExecutionPlan> {
    let bindings = client
        .prefetch(&manifest.subnets)
        .context("Failed to discover subnets")?;

    let mut plan = ExecutionPlan::new();
    for (spec, binding) in manifest.subnets.iter().zip(bindings) {
        plan.add(Box::new(SubnetResource::new(
            Arc::clone(client),
            spec.clone(),
            binding,
        )));
    }

    Ok(plan.filter_by_target(target))
}
