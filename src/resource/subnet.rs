//! Neutron subnet resource

use anyhow::{Context, Result};
use declarative::{ApplyContext, ApplyResult, Resource, ResourceState};
use neutronkit::{Client, Ensure, PropertyChange, ResourceBinding, SubnetSpec};
use std::fmt;
use std::sync::Arc;

/// A declared subnet bound to what discovery found under its name
pub struct SubnetResource {
    client: Arc<Client>,
    spec: SubnetSpec,
    binding: ResourceBinding,
}

impl SubnetResource {
    pub fn new(client: Arc<Client>, spec: SubnetSpec, binding: ResourceBinding) -> Self {
        Self {
            client,
            spec,
            binding,
        }
    }

    /// Declared properties that differ from the discovered subnet.
    pub fn changes(&self) -> Vec<PropertyChange> {
        self.binding
            .instance
            .as_ref()
            .map(|actual| self.spec.changes(actual))
            .unwrap_or_default()
    }

    fn create(&self) -> Result<ApplyResult> {
        let mut provider = self.client.provider(self.binding.clone());
        provider
            .create(&self.spec)
            .with_context(|| format!("Failed to create subnet {}", self.spec.name))?;
        Ok(ApplyResult::Created)
    }

    fn sync(&self) -> Result<ApplyResult> {
        let mut provider = self.client.provider(self.binding.clone());
        let applied = provider
            .sync(&self.spec)
            .with_context(|| format!("Failed to update subnet {}", self.spec.name))?;
        if applied.is_empty() {
            Ok(ApplyResult::Skipped {
                reason: "only creation-time properties differ".into(),
            })
        } else {
            Ok(ApplyResult::Modified)
        }
    }

    fn destroy(&self) -> Result<ApplyResult> {
        let mut provider = self.client.provider(self.binding.clone());
        provider
            .destroy()
            .with_context(|| format!("Failed to delete subnet {}", self.spec.name))?;
        Ok(ApplyResult::Removed)
    }
}

impl fmt::Debug for SubnetResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubnetResource")
            .field("spec", &self.spec)
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

impl Resource for SubnetResource {
    fn id(&self) -> String {
        self.spec.name.clone()
    }

    fn description(&self) -> String {
        match self.spec.ensure {
            Ensure::Present => format!(
                "Subnet {} ({})",
                self.spec.name,
                self.spec.cidr.as_deref().unwrap_or("no cidr")
            ),
            Ensure::Absent => format!("Remove subnet {}", self.spec.name),
        }
    }

    fn resource_type(&self) -> &'static str {
        "subnet"
    }

    fn current_state(&self) -> Result<ResourceState> {
        if !self.binding.exists() {
            return Ok(ResourceState::Absent);
        }
        if self.spec.ensure == Ensure::Absent {
            return Ok(ResourceState::Present);
        }

        let changes = self.changes();
        if changes.is_empty() {
            Ok(ResourceState::Present)
        } else {
            Ok(ResourceState::Drifted {
                changes: changes.iter().map(ToString::to_string).collect(),
            })
        }
    }

    fn desired_state(&self) -> ResourceState {
        match self.spec.ensure {
            Ensure::Present => ResourceState::Present,
            Ensure::Absent => ResourceState::Absent,
        }
    }

    fn apply(&self, ctx: &mut ApplyContext) -> Result<ApplyResult> {
        if !self.needs_apply()? {
            return Ok(ApplyResult::NoChange);
        }

        if ctx.dry_run {
            return Ok(ApplyResult::Skipped {
                reason: "Dry run".into(),
            });
        }

        match (self.spec.ensure, self.binding.exists()) {
            (Ensure::Present, false) => self.create(),
            (Ensure::Present, true) => self.sync(),
            (Ensure::Absent, true) => self.destroy(),
            (Ensure::Absent, false) => Ok(ApplyResult::NoChange),
        }
    }
}
