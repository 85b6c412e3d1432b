//! `subnetctl destroy` - delete one subnet by name

use anyhow::{Context as _, Result, bail};
use dialoguer::Confirm;
use neutronkit::{Client, ResourceBinding};

use crate::Context;
use crate::config::Manifest;
use crate::ui;

pub fn run(ctx: &Context, name: &str, yes: bool) -> Result<()> {
    let manifest = Manifest::load(ctx.config.as_deref())?;
    let client = manifest.client();

    let binding = find(&client, name)?;
    let Some(subnet) = &binding.instance else {
        bail!("Subnet {name} not found");
    };

    ui::kv("Subnet", &subnet.name);
    ui::kv("ID", &subnet.id);
    ui::kv("CIDR", subnet.cidr.as_deref().unwrap_or("-"));

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete subnet {name}?"))
            .default(false)
            .interact()?;
        if !confirmed {
            ui::dim("Aborted");
            return Ok(());
        }
    }

    destroy(&client, binding)?;
    ui::success(&format!("Deleted subnet {name}"));
    Ok(())
}

/// Bind `name` against a fresh discovery pass.
fn find(client: &Client, name: &str) -> Result<ResourceBinding> {
    let instances = client.instances().context("Failed to discover subnets")?;
    Ok(ResourceBinding {
        name: name.to_string(),
        instance: instances.into_iter().find(|s| s.name == name),
    })
}

fn destroy(client: &Client, binding: ResourceBinding) -> Result<()> {
    let name = binding.name.clone();
    client
        .provider(binding)
        .destroy()
        .with_context(|| format!("Failed to delete subnet {name}"))
}
