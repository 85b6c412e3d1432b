//! Command gateway to the Neutron control plane.
//!
//! The [`Backend`] trait is the only way the engine talks to the outside
//! world, allowing for different implementations (real CLI, mock for testing).

pub mod neutron;
pub mod openstack;

#[cfg(any(test, feature = "test-util"))]
pub mod mock;

use crate::error::Result;
use crate::types::ListedResource;

/// Output format requested from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `key="value"` per line
    Shell,
    /// Comma-separated with a header row
    Csv,
}

impl OutputFormat {
    /// The `--format=` flag for this format.
    pub fn flag(&self) -> &'static str {
        match self {
            OutputFormat::Shell => "--format=shell",
            OutputFormat::Csv => "--format=csv",
        }
    }
}

/// Backend trait for control plane commands.
///
/// One call is one CLI invocation. Implementations never retry.
pub trait Backend: Send + Sync {
    /// Check if the CLI can be executed at all.
    fn is_available(&self) -> bool;

    /// Run `subcommand` with an optional output format and arguments.
    ///
    /// Returns stdout on success; a non-zero exit becomes an error.
    fn run(
        &self,
        subcommand: &str,
        format: Option<OutputFormat>,
        args: &[String],
    ) -> Result<String>;
}

/// Source of tenant (project) names and ids.
pub trait ProjectLister: Send + Sync {
    /// List every visible project as `id,name` rows.
    fn list_projects(&self) -> Result<Vec<ListedResource>>;
}
