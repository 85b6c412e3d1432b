//! Project lookup through the `openstack` command.

use log::debug;
use std::process::Command;

use crate::auth::AuthEnv;
use crate::backend::ProjectLister;
use crate::codec;
use crate::error::{Error, Result};
use crate::types::ListedResource;

/// Lists Keystone projects with `openstack project list`.
pub struct OpenstackProjects {
    auth: AuthEnv,
}

impl OpenstackProjects {
    /// Create a lister using the given credentials.
    pub fn new(auth: AuthEnv) -> Self {
        Self { auth }
    }
}

impl ProjectLister for OpenstackProjects {
    fn list_projects(&self) -> Result<Vec<ListedResource>> {
        self.auth.validate()?;

        let openstack = which::which("openstack").map_err(|_| Error::CommandFailed {
            message: "openstack command not found".to_string(),
            stderr: String::new(),
        })?;

        let args = [
            "project", "list", "-f", "csv", "-c", "ID", "-c", "Name", "--quote", "none",
        ];
        debug!("openstack {}", args.join(" "));

        let output = Command::new(openstack)
            .args(args)
            .envs(self.auth.vars())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_neutron_output(&stderr, "project list"));
        }

        Ok(codec::decode_listing(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }
}
