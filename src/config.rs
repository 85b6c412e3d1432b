//! Subnet manifest loading and validation.
//!
//! The manifest is a TOML file, by default
//! `~/.config/subnetctl/subnets.toml`:
//!
//! ```toml
//! neutron_bin = "/usr/bin/neutron"
//!
//! [auth]
//! auth_url = "http://127.0.0.1:5000/v2.0/"
//! username = "admin"
//! password = "secret"
//! tenant_name = "admin"
//!
//! [tenants]
//! services = "9b2ab5d6c1b24dc1a5c3e0e1c9f6a7b8"
//!
//! [[subnet]]
//! name = "private_subnet"
//! cidr = "10.0.0.0/24"
//! network_name = "private"
//! tenant_name = "services"
//! dns_nameservers = ["8.8.8.8"]
//! ```

use anyhow::{Context, Result, bail};
use log::debug;
use neutronkit::{AuthEnv, Client, Ensure, SubnetSpec};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the manifest path
pub const CONFIG_ENV: &str = "SUBNETCTL_CONFIG";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("subnetctl"))
}

/// Get the default manifest path
pub fn default_manifest_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("subnets.toml"))
}

/// Declared subnets plus the settings needed to reach neutron
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Credentials; unset fields fall back to `OS_*` variables
    #[serde(default)]
    pub auth: AuthEnv,
    /// Explicit neutron executable, otherwise looked up in `PATH`
    #[serde(default)]
    pub neutron_bin: Option<PathBuf>,
    /// Known tenant name → id table
    #[serde(default)]
    pub tenants: HashMap<String, String>,
    #[serde(default, rename = "subnet")]
    pub subnets: Vec<SubnetSpec>,
}

impl Manifest {
    /// Load the manifest from `explicit`, or from the default location.
    ///
    /// An explicit path must exist. A missing default manifest is treated
    /// as an empty one so discovery commands work without it.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_manifest_path()?;
                if !path.exists() {
                    debug!("No manifest at {}, using an empty one", path.display());
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid manifest {}", path.display()))
    }

    /// Parse and validate manifest text.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Check constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.subnets {
            if spec.name.trim().is_empty() {
                bail!("subnet name must not be empty");
            }
            if !seen.insert(spec.name.as_str()) {
                bail!("subnet {} is declared more than once", spec.name);
            }
            validate_subnet(spec)?;
        }
        Ok(())
    }

    /// Credentials from the manifest, completed from the environment.
    pub fn auth(&self) -> AuthEnv {
        self.auth.clone().or(AuthEnv::from_env())
    }

    /// Build a client for this manifest's neutron endpoint.
    pub fn client(&self) -> Client {
        Client::new(self.neutron_bin.as_deref(), self.auth(), self.tenants.clone())
    }
}

fn validate_subnet(spec: &SubnetSpec) -> Result<()> {
    let name = &spec.name;

    if let Some(pools) = &spec.allocation_pools
        && pools.len() != 2
    {
        bail!(
            "subnet {name}: allocation_pools must be [start, end], got {} entries",
            pools.len()
        );
    }
    if spec.network_id.is_some() && spec.network_name.is_some() {
        bail!("subnet {name}: set either network_id or network_name, not both");
    }
    if spec.tenant_id.is_some() && spec.tenant_name.is_some() {
        bail!("subnet {name}: set either tenant_id or tenant_name, not both");
    }
    if let Some(version) = spec.ip_version
        && version != 4
        && version != 6
    {
        bail!("subnet {name}: ip_version must be 4 or 6, got {version}");
    }
    if spec.ensure == Ensure::Present {
        if spec.cidr.is_none() {
            bail!("subnet {name}: cidr is required");
        }
        if spec.network_id.is_none() && spec.network_name.is_none() {
            bail!("subnet {name}: network_id or network_name is required");
        }
    }
    Ok(())
}
