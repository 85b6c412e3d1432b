//! `subnetctl list` - subnets known to neutron

use anyhow::{Context as _, Result};
use colored::Colorize;
use neutronkit::Subnet;

use crate::Context;
use crate::config::Manifest;
use crate::ui;

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let manifest = Manifest::load(ctx.config.as_deref())?;
    let client = manifest.client();
    let subnets = client.instances().context("Failed to list subnets")?;

    if json {
        println!("{}", render_json(&subnets)?);
        return Ok(());
    }

    if subnets.is_empty() {
        ui::info("No subnets found");
        return Ok(());
    }

    ui::header(&format!("Subnets ({})", subnets.len()));
    println!(
        "  {} {} {} {} {}",
        ui::fit("NAME", 24).as_str().bold(),
        ui::fit("ID", 38).as_str().bold(),
        ui::fit("CIDR", 20).as_str().bold(),
        ui::fit("GATEWAY", 16).as_str().bold(),
        "DHCP".bold()
    );
    for subnet in &subnets {
        println!("  {}", table_row(subnet));
    }
    Ok(())
}

fn render_json(subnets: &[Subnet]) -> Result<String> {
    serde_json::to_string_pretty(subnets).context("Failed to serialize subnets")
}

fn table_row(subnet: &Subnet) -> String {
    let dash = "-";
    format!(
        "{} {} {} {} {}",
        ui::fit(&subnet.name, 24),
        ui::fit(&subnet.id, 38),
        ui::fit(subnet.cidr.as_deref().unwrap_or(dash), 20),
        ui::fit(subnet.gateway_ip.as_deref().unwrap_or(dash), 16),
        subnet.enable_dhcp.as_deref().unwrap_or(dash)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{into_client, web_backend};

    #[test]
    fn test_json_output_uses_field_names() {
        let (client, _) = into_client(web_backend());
        let subnets = client.instances().unwrap();

        let json: serde_json::Value = serde_json::from_str(&render_json(&subnets).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "web");
        assert_eq!(json[0]["cidr"], "10.0.0.0/24");
        assert_eq!(json[0]["allocation_pools"][1], "10.0.0.254");
    }

    #[test]
    fn test_table_row_marks_unset_values() {
        let subnet = Subnet {
            name: "bare".into(),
            id: "id-1".into(),
            ..Default::default()
        };
        let row = table_row(&subnet);
        assert!(row.starts_with("bare "));
        assert!(row.ends_with('-'));
    }
}
