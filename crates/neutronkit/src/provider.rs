//! Reconciliation engine for one declared subnet.
//!
//! A provider starts from the binding made by discovery and runs exactly one
//! synchronous operation per call:
//!
//! ```text
//! Absent  --create-->  Present
//! Present --update-->  Present   (Updatable properties only)
//! Present --update-->  error     (Immutable properties, nothing sent)
//! Present --destroy--> Absent
//! ```

use log::{info, warn};

use crate::backend::{Backend, OutputFormat};
use crate::codec;
use crate::discovery::ResourceBinding;
use crate::error::{Error, Result};
use crate::tenant::TenantResolver;
use crate::types::{
    AttrValue, AttributeMutability, PropertyChange, Subnet, SubnetProperty, SubnetSpec,
};

/// Drives create, update and delete for one subnet.
pub struct SubnetProvider<'a> {
    backend: &'a dyn Backend,
    tenants: &'a dyn TenantResolver,
    name: String,
    /// Last known remote state; `None` when absent
    state: Option<Subnet>,
}

impl<'a> SubnetProvider<'a> {
    /// Create a provider from a discovery binding.
    pub fn new(
        backend: &'a dyn Backend,
        tenants: &'a dyn TenantResolver,
        binding: ResourceBinding,
    ) -> Self {
        Self {
            backend,
            tenants,
            name: binding.name,
            state: binding.instance,
        }
    }

    /// Declared resource name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the subnet is present.
    pub fn exists(&self) -> bool {
        self.state.is_some()
    }

    /// Last known remote state.
    pub fn current(&self) -> Option<&Subnet> {
        self.state.as_ref()
    }

    /// Create the subnet and adopt the confirmed attributes as current state.
    ///
    /// Tenant names are resolved before anything is sent. Local state is only
    /// replaced once the confirmation sentinel has been seen.
    pub fn create(&mut self, spec: &SubnetSpec) -> Result<&Subnet> {
        let tenant_id = match (&spec.tenant_name, &spec.tenant_id) {
            (Some(name), _) => Some(self.tenants.resolve(name)?),
            (None, Some(id)) => Some(id.clone()),
            (None, None) => None,
        };

        let args = codec::encode_create_args(spec, tenant_id.as_deref())?;
        let output = self
            .backend
            .run("subnet-create", Some(OutputFormat::Shell), &args)?;

        let attrs = codec::decode_creation_output(&output)?;
        let mut subnet = Subnet::from_attributes(&attrs);
        subnet.name = spec.name.clone();
        info!("Created subnet {} ({})", subnet.name, subnet.id);

        Ok(&*self.state.insert(subnet))
    }

    /// Change one property in place.
    ///
    /// An absent subnet and immutable properties fail without any remote
    /// call. Creatable ones are logged and left alone.
    pub fn update(&mut self, property: SubnetProperty, value: &AttrValue) -> Result<()> {
        if self.state.is_none() {
            return Err(Error::SubnetAbsent {
                name: self.name.clone(),
            });
        }

        match property.mutability() {
            AttributeMutability::Immutable => Err(Error::ImmutableProperty {
                property: property.to_string(),
            }),
            AttributeMutability::Creatable => {
                warn!(
                    "{property} of subnet {} can only be set at creation; leaving it unchanged",
                    self.name
                );
                Ok(())
            }
            AttributeMutability::Updatable => {
                let args = codec::encode_update_args(&self.name, property, value).ok_or_else(
                    || Error::ImmutableProperty {
                        property: property.to_string(),
                    },
                )?;
                self.backend.run("subnet-update", None, &args)?;
                info!("Updated {property} of subnet {}", self.name);

                if let Some(state) = self.state.as_mut() {
                    state.set_value(property, value);
                }
                Ok(())
            }
        }
    }

    /// Bring an existing subnet in line with `spec`.
    ///
    /// Every change is checked against the mutability table before the first
    /// update is sent. Updates then run in property order and stop at the
    /// first failure; earlier ones are not rolled back.
    pub fn sync(&mut self, spec: &SubnetSpec) -> Result<Vec<PropertyChange>> {
        let Some(current) = &self.state else {
            return Ok(Vec::new());
        };
        let changes = spec.changes(current);

        if let Some(change) = changes
            .iter()
            .find(|c| c.property.mutability() == AttributeMutability::Immutable)
        {
            return Err(Error::ImmutableProperty {
                property: change.property.to_string(),
            });
        }

        for change in &changes {
            self.update(change.property, &change.desired)?;
        }

        Ok(changes
            .into_iter()
            .filter(|c| c.property.mutability() == AttributeMutability::Updatable)
            .collect())
    }

    /// Delete the subnet by name and mark it absent.
    pub fn destroy(&mut self) -> Result<()> {
        self.backend
            .run("subnet-delete", None, std::slice::from_ref(&self.name))?;
        info!("Deleted subnet {}", self.name);
        self.state = None;
        Ok(())
    }
}
