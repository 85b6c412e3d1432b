//! Tenant name to id resolution.

use log::debug;
use std::collections::HashMap;

use crate::backend::ProjectLister;
use crate::error::{Error, Result};

/// Resolves a declared tenant name to its Keystone id.
pub trait TenantResolver: Send + Sync {
    /// Return the id for `name`, or `Error::TenantResolution`.
    fn resolve(&self, name: &str) -> Result<String>;
}

/// Looks a tenant up in a known table first, then asks Keystone.
pub struct TenantDirectory {
    known: HashMap<String, String>,
    lister: Option<Box<dyn ProjectLister>>,
}

impl TenantDirectory {
    /// A directory backed only by the given table.
    pub fn new(known: HashMap<String, String>) -> Self {
        Self {
            known,
            lister: None,
        }
    }

    /// Fall back to a live project listing for unknown names.
    pub fn with_lister(mut self, lister: Box<dyn ProjectLister>) -> Self {
        self.lister = Some(lister);
        self
    }
}

impl TenantResolver for TenantDirectory {
    fn resolve(&self, name: &str) -> Result<String> {
        if let Some(id) = self.known.get(name) {
            return Ok(id.clone());
        }

        let Some(lister) = &self.lister else {
            return Err(Error::TenantResolution {
                tenant: name.to_string(),
                message: "not in the [tenants] table".to_string(),
            });
        };

        debug!("Looking up tenant {name} in keystone");
        let projects = lister.list_projects().map_err(|e| Error::TenantResolution {
            tenant: name.to_string(),
            message: e.to_string(),
        })?;

        projects
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .ok_or_else(|| Error::TenantResolution {
                tenant: name.to_string(),
                message: "no such project".to_string(),
            })
    }
}
