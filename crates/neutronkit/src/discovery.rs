//! Instance discovery and binding.
//!
//! Discovery always runs to completion before any create, update or delete
//! decision is made in a pass. Nothing is cached between passes.

use log::{debug, warn};

use crate::backend::{Backend, OutputFormat};
use crate::codec;
use crate::error::Result;
use crate::types::{ListedResource, Subnet};

fn listing_args() -> Vec<String> {
    ["--column=id", "--column=name", "--quote=none"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Enumerate subnets and hydrate each one with `subnet-show`.
///
/// A missing, unauthenticated or unreachable CLI yields an empty list.
/// Other failures propagate.
pub fn list_instances(backend: &dyn Backend) -> Result<Vec<Subnet>> {
    let listing = match backend.run("subnet-list", Some(OutputFormat::Csv), &listing_args()) {
        Ok(text) => text,
        Err(e) if e.is_unavailable() => {
            warn!("Skipping subnet discovery: {e}");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut subnets = Vec::new();
    for row in codec::decode_listing(&listing) {
        let detail = match backend.run("subnet-show", Some(OutputFormat::Shell), &[row.id.clone()]) {
            Ok(text) => text,
            Err(e) if e.is_unavailable() => {
                warn!("Skipping subnet discovery: {e}");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };
        let subnet = Subnet::from_attributes(&codec::decode_attributes(&detail));
        debug!("Discovered subnet {} ({})", subnet.name, subnet.id);
        subnets.push(subnet);
    }

    Ok(subnets)
}

/// Enumerate networks as `id,name` rows.
///
/// Tool unavailability yields an empty list, like [`list_instances`].
pub fn list_networks(backend: &dyn Backend) -> Result<Vec<ListedResource>> {
    match backend.run("net-list", Some(OutputFormat::Csv), &listing_args()) {
        Ok(text) => Ok(codec::decode_listing(&text)),
        Err(e) if e.is_unavailable() => {
            warn!("Skipping network discovery: {e}");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

/// Association between a declared name and a discovered subnet for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceBinding {
    /// Declared resource name
    pub name: String,
    /// Matched instance, if any
    pub instance: Option<Subnet>,
}

impl ResourceBinding {
    /// A binding for a resource that does not exist remotely.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance: None,
        }
    }

    /// Whether a remote instance was bound.
    pub fn exists(&self) -> bool {
        self.instance.is_some()
    }
}

/// Bind each declared name to the first discovered subnet with that name.
pub fn prefetch<'a>(
    names: impl IntoIterator<Item = &'a str>,
    instances: &[Subnet],
) -> Vec<ResourceBinding> {
    names
        .into_iter()
        .map(|name| ResourceBinding {
            name: name.to_string(),
            instance: instances.iter().find(|s| s.name == name).cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::mock::MockBackend;
    use crate::error::Error;

    const LISTING: &str = "id,name\nid-1,web\nid-2,db\n";

    fn backend() -> MockBackend {
        MockBackend::new()
            .respond("subnet-list", LISTING)
            .respond(
                "subnet-show id-1",
                "id=\"id-1\"\nname=\"web\"\ncidr=\"10.0.1.0/24\"\n",
            )
            .respond(
                "subnet-show id-2",
                "id=\"id-2\"\nname=\"db\"\ncidr=\"10.0.2.0/24\"\n",
            )
    }

    #[test]
    fn test_list_instances_follows_listing_order() {
        let backend = backend();
        let subnets = list_instances(&backend).unwrap();
        let names: Vec<_> = subnets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["web", "db"]);
        assert_eq!(subnets[1].cidr.as_deref(), Some("10.0.2.0/24"));
        assert_eq!(
            backend.subcommands(),
            vec!["subnet-list", "subnet-show", "subnet-show"]
        );
        assert_eq!(backend.calls()[0].args, listing_args());
    }

    #[test]
    fn test_tool_absent_yields_nothing() {
        let backend = MockBackend::new().fail("subnet-list", || Error::NeutronNotFound);
        let subnets = list_instances(&backend).unwrap();
        assert!(subnets.is_empty());

        let bindings = prefetch(["web", "db"], &subnets);
        assert!(bindings.iter().all(|b| !b.exists()));
    }

    #[test]
    fn test_unauthenticated_yields_nothing() {
        let backend = MockBackend::new().fail("subnet-list", || Error::Unauthenticated {
            message: "401".into(),
        });
        assert!(list_instances(&backend).unwrap().is_empty());
    }

    #[test]
    fn test_credentials_lost_mid_listing_yields_nothing() {
        let backend = backend().fail("subnet-show id-2", || Error::Unauthenticated {
            message: "401 Unauthorized".into(),
        });
        assert!(list_instances(&backend).unwrap().is_empty());
        assert_eq!(
            backend.subcommands(),
            vec!["subnet-list", "subnet-show", "subnet-show"]
        );
    }

    #[test]
    fn test_other_failures_propagate() {
        let backend = MockBackend::new().fail("subnet-list", || Error::CommandFailed {
            message: "neutron subnet-list failed".into(),
            stderr: "Internal Server Error".into(),
        });
        assert!(list_instances(&backend).is_err());
    }

    #[test]
    fn test_prefetch_binds_first_match() {
        let first = Subnet {
            name: "web".into(),
            id: "id-1".into(),
            ..Default::default()
        };
        let dup = Subnet {
            name: "web".into(),
            id: "id-3".into(),
            ..Default::default()
        };
        let bindings = prefetch(["web", "cache"], &[first, dup]);
        assert_eq!(bindings[0].instance.as_ref().unwrap().id, "id-1");
        assert!(!bindings[1].exists());
    }

    #[test]
    fn test_list_networks() {
        let backend = MockBackend::new().respond("net-list", "id,name\nn-1,public\nn-2,private\n");
        let networks = list_networks(&backend).unwrap();
        assert_eq!(networks.len(), 2);
        assert_eq!(networks[0].name, "public");
    }
}
