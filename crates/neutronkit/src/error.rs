//! Error types for Neutron operations.
//!
//! Errors are grouped into categories so callers can tell a missing or
//! unauthenticated `neutron` tool (which discovery tolerates) apart from
//! failures that must reach the operator.

use thiserror::Error;

/// Categories of errors raised while talking to the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The CLI is missing, unauthenticated, or cannot reach the API
    RemoteToolUnavailable,
    /// The CLI answered, but not in the shape we rely on
    ContractViolation,
    /// A property the remote system cannot change after creation
    ImmutableProperty,
    /// A tenant name could not be turned into an id
    TenantResolution,
    /// The CLI exited non-zero for some other reason
    CommandFailed,
    /// Anything else
    Other,
}

impl ErrorCategory {
    /// Whether discovery may treat this as "nothing found".
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::RemoteToolUnavailable)
    }

    /// Get a user-friendly description of this error category.
    pub fn description(&self) -> &'static str {
        match self {
            Self::RemoteToolUnavailable => "Neutron is not available",
            Self::ContractViolation => "Unexpected neutron output",
            Self::ImmutableProperty => "Property cannot be updated",
            Self::TenantResolution => "Unknown tenant",
            Self::CommandFailed => "Neutron command failed",
            Self::Other => "Unexpected error",
        }
    }

    /// Get actionable advice for resolving this error category.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::RemoteToolUnavailable => {
                "Install python-neutronclient and check the [auth] section or OS_* variables"
            }
            Self::ContractViolation => "Check the neutron client version; its output format changed",
            Self::ImmutableProperty => "Delete and recreate the subnet to change this property",
            Self::TenantResolution => "Add the tenant to the [tenants] table or create it first",
            Self::CommandFailed => "Check the error details from neutron",
            Self::Other => "Check the error details for more information",
        }
    }
}

/// Errors that can occur during Neutron operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The neutron executable could not be located
    #[error("neutron command not found. Install python-neutronclient")]
    NeutronNotFound,

    /// Credentials are missing or were rejected
    #[error("authentication failed: {message}")]
    Unauthenticated {
        /// What was missing or what the API said
        message: String,
    },

    /// The API endpoint could not be reached
    #[error("neutron API unreachable: {message}")]
    Unreachable {
        /// Connection error reported by the client
        message: String,
    },

    /// Command execution failed
    #[error("command failed: {message}")]
    CommandFailed {
        /// Description of what command failed
        message: String,
        /// Standard error output from the failed command
        stderr: String,
    },

    /// `subnet-create` succeeded but did not print the confirmation sentinel
    #[error("did not get expected message on subnet creation, got {output}")]
    CreationContractViolation {
        /// Raw stdout of the create call
        output: String,
    },

    /// An update was requested for a property fixed at creation
    #[error("Property {property} does not support being updated")]
    ImmutableProperty {
        /// Name of the rejected property
        property: String,
    },

    /// A declared tenant name has no id
    #[error("unable to find tenant {tenant}: {message}")]
    TenantResolution {
        /// Declared tenant name
        tenant: String,
        /// Why lookup failed
        message: String,
    },

    /// A required attribute was not declared
    #[error("missing required attribute: {attribute}")]
    MissingAttribute {
        /// Attribute name
        attribute: String,
    },

    /// An operation needs an existing subnet but none is bound
    #[error("subnet {name} does not exist")]
    SubnetAbsent {
        /// Declared subnet name
        name: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::NeutronNotFound | Error::Unauthenticated { .. } | Error::Unreachable { .. } => {
                ErrorCategory::RemoteToolUnavailable
            }
            Error::CreationContractViolation { .. } => ErrorCategory::ContractViolation,
            Error::ImmutableProperty { .. } => ErrorCategory::ImmutableProperty,
            Error::TenantResolution { .. } => ErrorCategory::TenantResolution,
            Error::CommandFailed { .. } => ErrorCategory::CommandFailed,
            _ => ErrorCategory::Other,
        }
    }

    /// Whether the remote tool is unusable (missing, unauthenticated, unreachable).
    pub fn is_unavailable(&self) -> bool {
        self.category().is_unavailable()
    }

    /// Create an error from neutron command output.
    ///
    /// Analyzes stderr to categorize the error appropriately.
    pub fn from_neutron_output(stderr: &str, subcommand: &str) -> Self {
        let stderr_lower = stderr.to_lowercase();

        if stderr_lower.contains("you must provide")
            || stderr_lower.contains("authentication required")
            || stderr_lower.contains("unauthorized")
            || stderr_lower.contains("(http 401)")
            || stderr_lower.contains("invalid credentials")
        {
            return Error::Unauthenticated {
                message: stderr.trim().to_string(),
            };
        }

        if stderr_lower.contains("unable to establish connection")
            || stderr_lower.contains("connection refused")
            || stderr_lower.contains("could not resolve")
            || stderr_lower.contains("timed out")
            || stderr_lower.contains("service unavailable")
        {
            return Error::Unreachable {
                message: stderr.trim().to_string(),
            };
        }

        Error::CommandFailed {
            message: format!("neutron {subcommand} failed"),
            stderr: stderr.trim().to_string(),
        }
    }
}

/// Result type for Neutron operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_categories() {
        assert!(Error::NeutronNotFound.is_unavailable());
        assert!(
            Error::Unauthenticated {
                message: String::new()
            }
            .is_unavailable()
        );
        assert!(
            !Error::ImmutableProperty {
                property: "cidr".into()
            }
            .is_unavailable()
        );
    }

    #[test]
    fn test_from_neutron_output_auth() {
        let err = Error::from_neutron_output(
            "You must provide a username via either --os-username or env[OS_USERNAME]",
            "subnet-list",
        );
        assert!(matches!(err, Error::Unauthenticated { .. }));
        assert_eq!(err.category(), ErrorCategory::RemoteToolUnavailable);
    }

    #[test]
    fn test_from_neutron_output_unreachable() {
        let err = Error::from_neutron_output(
            "Unable to establish connection to http://127.0.0.1:9696/v2.0/subnets.json",
            "subnet-list",
        );
        assert!(matches!(err, Error::Unreachable { .. }));
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_from_neutron_output_generic() {
        let err = Error::from_neutron_output("Invalid input for cidr", "subnet-create");
        assert_eq!(err.category(), ErrorCategory::CommandFailed);
        assert!(err.to_string().contains("subnet-create"));
    }

    #[test]
    fn test_immutable_message_names_property() {
        let err = Error::ImmutableProperty {
            property: "cidr".into(),
        };
        assert_eq!(err.to_string(), "Property cidr does not support being updated");
    }
}
