//! # neutronkit
//!
//! Reconcile declared Neutron subnets against what the `neutron` CLI reports.
//!
//! This crate provides functionality for:
//! - Running authenticated `neutron` commands ([`backend`])
//! - Decoding CSV listings and shell-style attribute blocks ([`codec`])
//! - Discovering subnets and binding them to declared names ([`discovery`])
//! - Creating, updating and deleting subnets with an immutability policy
//!   ([`provider`])
//!
//! ## Example
//!
//! ```no_run
//! use neutronkit::{AuthEnv, Client, SubnetSpec};
//! use std::collections::HashMap;
//!
//! let client = Client::new(None, AuthEnv::from_env(), HashMap::new());
//!
//! let mut spec = SubnetSpec::new("private_subnet");
//! spec.cidr = Some("10.0.0.0/24".into());
//! spec.network_name = Some("private".into());
//!
//! let bindings = client.prefetch(std::slice::from_ref(&spec)).expect("discovery failed");
//! let mut provider = client.provider(bindings[0].clone());
//! if !provider.exists() {
//!     provider.create(&spec).expect("create failed");
//! }
//! ```

#![warn(clippy::all)]

pub mod auth;
pub mod backend;
pub mod codec;
pub mod discovery;
pub mod error;
pub mod provider;
pub mod tenant;
pub mod types;

pub use auth::AuthEnv;
pub use discovery::ResourceBinding;
pub use error::{Error, ErrorCategory, Result};
pub use provider::SubnetProvider;
pub use tenant::{TenantDirectory, TenantResolver};
pub use types::{
    AttrValue, AttributeMutability, Ensure, ListedResource, PropertyChange, Subnet,
    SubnetProperty, SubnetSpec,
};

use backend::{Backend, neutron::NeutronBackend, openstack::OpenstackProjects};
use std::collections::HashMap;
use std::path::Path;

/// High-level client for subnet reconciliation.
///
/// The client wraps a backend and a tenant resolver and hands out one
/// [`SubnetProvider`] per declared subnet.
pub struct Client {
    backend: Box<dyn Backend>,
    tenants: Box<dyn TenantResolver>,
}

impl Client {
    /// Create a client that shells out to `neutron`.
    ///
    /// `tenants` is the known name → id table; unknown names are looked up
    /// with `openstack project list`.
    pub fn new(
        neutron_path: Option<&Path>,
        auth: AuthEnv,
        tenants: HashMap<String, String>,
    ) -> Self {
        let backend = NeutronBackend::new(neutron_path, auth.clone());
        let tenants =
            TenantDirectory::new(tenants).with_lister(Box::new(OpenstackProjects::new(auth)));
        Self {
            backend: Box::new(backend),
            tenants: Box::new(tenants),
        }
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(backend: Box<dyn Backend>, tenants: Box<dyn TenantResolver>) -> Self {
        Self { backend, tenants }
    }

    /// Check if the neutron client can run.
    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    /// Discover every subnet. Empty when neutron is unavailable.
    pub fn instances(&self) -> Result<Vec<Subnet>> {
        discovery::list_instances(self.backend.as_ref())
    }

    /// Discover every network as `id,name`.
    pub fn networks(&self) -> Result<Vec<ListedResource>> {
        discovery::list_networks(self.backend.as_ref())
    }

    /// Discover subnets and bind them to the declared names.
    pub fn prefetch(&self, declared: &[SubnetSpec]) -> Result<Vec<ResourceBinding>> {
        let instances = self.instances()?;
        Ok(discovery::prefetch(
            declared.iter().map(|s| s.name.as_str()),
            &instances,
        ))
    }

    /// A provider for one bound subnet.
    pub fn provider(&self, binding: ResourceBinding) -> SubnetProvider<'_> {
        SubnetProvider::new(self.backend.as_ref(), self.tenants.as_ref(), binding)
    }
}
