//! Diff computation for resources

use crate::resource::{BoxedResource, Resource};
use crate::types::ResourceState;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// A diff between current and desired state of a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDiff {
    /// Unique identifier of the resource
    pub resource_id: String,
    /// Type of the resource
    pub resource_type: String,
    /// Human-readable description
    pub description: String,
    /// Current state
    pub current: ResourceState,
    /// Desired state
    pub desired: ResourceState,
}

impl ResourceDiff {
    /// Create a diff from a resource, returning None if no changes needed
    pub fn from_resource(resource: &dyn Resource) -> Result<Option<Self>> {
        let current = resource.current_state()?;
        let desired = resource.desired_state();

        if current == desired {
            return Ok(None);
        }

        Ok(Some(Self {
            resource_id: resource.id(),
            resource_type: resource.resource_type().to_string(),
            description: resource.description(),
            current,
            desired,
        }))
    }

    /// Check if this diff represents an addition
    pub fn is_addition(&self) -> bool {
        self.current.is_absent() && self.desired.is_present()
    }

    /// Check if this diff represents a removal
    pub fn is_removal(&self) -> bool {
        self.current.is_present() && self.desired.is_absent()
    }

    /// Check if this diff represents an in-place modification
    pub fn is_modification(&self) -> bool {
        matches!(self.current, ResourceState::Drifted { .. }) && self.desired.is_present()
    }

    /// Property-level changes, if any
    pub fn changes(&self) -> &[String] {
        match &self.current {
            ResourceState::Drifted { changes } => changes,
            _ => &[],
        }
    }
}

/// Compute diffs for a list of resources
///
/// Returns only resources that have differences between current and desired
/// state. Resources whose state cannot be read are skipped.
pub fn compute_diffs(resources: &[BoxedResource]) -> Vec<ResourceDiff> {
    resources
        .iter()
        .filter_map(|r| ResourceDiff::from_resource(r.as_ref()).ok().flatten())
        .collect()
}

/// Diff summary statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Number of resources to add
    pub additions: usize,
    /// Number of resources to remove
    pub removals: usize,
    /// Number of resources to modify
    pub modifications: usize,
}

impl DiffSummary {
    /// Create a summary from a list of diffs
    pub fn from_diffs(diffs: &[ResourceDiff]) -> Self {
        let mut summary = Self::default();
        for diff in diffs {
            if diff.is_addition() {
                summary.additions += 1;
            } else if diff.is_removal() {
                summary.removals += 1;
            } else {
                summary.modifications += 1;
            }
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diff(current: ResourceState, desired: ResourceState) -> ResourceDiff {
        ResourceDiff {
            resource_id: "web".into(),
            resource_type: "subnet".into(),
            description: "Subnet web".into(),
            current,
            desired,
        }
    }

    #[test]
    fn test_classification() {
        let add = diff(ResourceState::Absent, ResourceState::Present);
        let remove = diff(ResourceState::Present, ResourceState::Absent);
        let drift = diff(
            ResourceState::Drifted {
                changes: vec!["gateway_ip: 10.0.0.1 → 10.0.0.254".into()],
            },
            ResourceState::Present,
        );

        assert!(add.is_addition());
        assert!(remove.is_removal());
        assert!(drift.is_modification());
        assert_eq!(drift.changes().len(), 1);
        assert!(add.changes().is_empty());

        let summary = DiffSummary::from_diffs(&[add, remove, drift]);
        assert_eq!(
            summary,
            DiffSummary {
                additions: 1,
                removals: 1,
                modifications: 1
            }
        );
        assert!(summary.has_changes());
    }

    #[test]
    fn test_drifted_to_absent_is_removal() {
        let d = diff(
            ResourceState::Drifted {
                changes: vec!["cidr".into()],
            },
            ResourceState::Absent,
        );
        assert!(d.is_removal());
        assert!(!d.is_modification());
    }
}
