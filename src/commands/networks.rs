//! `subnetctl networks` - network id facts

use anyhow::{Context as _, Result};
use neutronkit::ListedResource;

use crate::Context;
use crate::config::Manifest;

pub fn run(ctx: &Context) -> Result<()> {
    let manifest = Manifest::load(ctx.config.as_deref())?;
    let networks = manifest
        .client()
        .networks()
        .context("Failed to list networks")?;

    for line in facts(&networks) {
        println!("{line}");
    }
    Ok(())
}

/// One `neutron_network_id_<name>=<id>` line per network.
pub fn facts(networks: &[ListedResource]) -> Vec<String> {
    networks
        .iter()
        .map(|net| format!("neutron_network_id_{}={}", net.name, net.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{into_client, neutron_error};
    use neutronkit::backend::mock::MockBackend;

    #[test]
    fn test_facts_from_listing() {
        let (client, _) = into_client(
            MockBackend::new()
                .respond("net-list", "id,name\nnet-1,private\nnet-2,public\n"),
        );

        let networks = client.networks().unwrap();
        assert_eq!(
            facts(&networks),
            vec![
                "neutron_network_id_private=net-1",
                "neutron_network_id_public=net-2",
            ]
        );
    }

    #[test]
    fn test_no_facts_without_neutron() {
        let (client, _) = into_client(
            MockBackend::new()
                .fail(
                    "net-list",
                    neutron_error(
                        "net-list",
                        "You must provide a username via either --os-username or env[OS_USERNAME]",
                    ),
                ),
        );

        assert!(facts(&client.networks().unwrap()).is_empty());
    }
}
