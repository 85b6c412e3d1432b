//! Core types for subnet reconciliation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::codec;

/// A decoded attribute value.
///
/// The shell output format prints every value as a quoted string; values
/// spread over several lines become lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Single string value
    Scalar(String),
    /// Multi-line or list value
    List(Vec<String>),
}

impl AttrValue {
    /// Flatten to a list; an empty scalar is an empty list.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            AttrValue::Scalar(s) if s.is_empty() => Vec::new(),
            AttrValue::Scalar(s) => vec![s.clone()],
            AttrValue::List(items) => items.iter().filter(|i| !i.is_empty()).cloned().collect(),
        }
    }

    /// Collapse to one string, joining list items with newlines.
    pub fn to_scalar(&self) -> String {
        match self {
            AttrValue::Scalar(s) => s.clone(),
            AttrValue::List(items) => items.join("\n"),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Scalar(s) => write!(f, "{s}"),
            AttrValue::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Attribute name to value, as decoded from neutron output.
pub type AttributeMap = BTreeMap<String, AttrValue>;

/// One row of a two-column `id,name` listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListedResource {
    /// Remote id
    pub id: String,
    /// Display name, trimmed
    pub name: String,
}

/// How a property may change once the subnet exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeMutability {
    /// Only honoured by `subnet-create`
    Creatable,
    /// Changed in place with `subnet-update`
    Updatable,
    /// Any change after creation is an error
    Immutable,
}

/// Managed subnet properties, in the order they are compared and applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetProperty {
    Cidr,
    IpVersion,
    GatewayIp,
    AllocationPools,
    HostRoutes,
    DnsNameservers,
    EnableDhcp,
    NetworkId,
    TenantId,
}

impl SubnetProperty {
    /// Every property, in comparison order.
    pub const ALL: [SubnetProperty; 9] = [
        SubnetProperty::Cidr,
        SubnetProperty::IpVersion,
        SubnetProperty::GatewayIp,
        SubnetProperty::AllocationPools,
        SubnetProperty::HostRoutes,
        SubnetProperty::DnsNameservers,
        SubnetProperty::EnableDhcp,
        SubnetProperty::NetworkId,
        SubnetProperty::TenantId,
    ];

    /// Attribute key used by neutron output and the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubnetProperty::Cidr => "cidr",
            SubnetProperty::IpVersion => "ip_version",
            SubnetProperty::GatewayIp => "gateway_ip",
            SubnetProperty::AllocationPools => "allocation_pools",
            SubnetProperty::HostRoutes => "host_routes",
            SubnetProperty::DnsNameservers => "dns_nameservers",
            SubnetProperty::EnableDhcp => "enable_dhcp",
            SubnetProperty::NetworkId => "network_id",
            SubnetProperty::TenantId => "tenant_id",
        }
    }

    /// Mutability table consulted by the update dispatcher.
    pub fn mutability(&self) -> AttributeMutability {
        match self {
            SubnetProperty::GatewayIp
            | SubnetProperty::EnableDhcp
            | SubnetProperty::DnsNameservers => AttributeMutability::Updatable,
            SubnetProperty::HostRoutes => AttributeMutability::Creatable,
            SubnetProperty::Cidr
            | SubnetProperty::AllocationPools
            | SubnetProperty::IpVersion
            | SubnetProperty::NetworkId
            | SubnetProperty::TenantId => AttributeMutability::Immutable,
        }
    }

    /// Whether values compare as booleans (`True` == `true`).
    fn is_boolean(&self) -> bool {
        matches!(self, SubnetProperty::EnableDhcp)
    }

    /// Compare an actual value with a desired one.
    pub fn values_match(&self, actual: Option<&AttrValue>, desired: &AttrValue) -> bool {
        let Some(actual) = actual else {
            return desired.to_list().is_empty();
        };
        match desired {
            AttrValue::List(want) => actual.to_list() == *want,
            AttrValue::Scalar(want) if self.is_boolean() => {
                actual.to_scalar().eq_ignore_ascii_case(want)
            }
            AttrValue::Scalar(want) => actual.to_scalar() == *want,
        }
    }
}

impl fmt::Display for SubnetProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a declared subnet should exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    /// Subnet must exist
    #[default]
    Present,
    /// Subnet must not exist
    Absent,
}

/// A subnet as reported by the control plane.
///
/// Rebuilt from scratch on every discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnet {
    pub name: String,
    pub id: String,
    pub cidr: Option<String>,
    pub ip_version: Option<String>,
    pub gateway_ip: Option<String>,
    /// Flat start/end sequence, see [`codec::decode_allocation_pools`]
    pub allocation_pools: Vec<String>,
    pub host_routes: Option<String>,
    pub dns_nameservers: Vec<String>,
    pub enable_dhcp: Option<String>,
    pub network_id: Option<String>,
    pub tenant_id: Option<String>,
}

impl Subnet {
    /// Hydrate from decoded attributes. Unknown keys are ignored.
    pub fn from_attributes(attrs: &AttributeMap) -> Self {
        let scalar = |key: &str| {
            attrs
                .get(key)
                .map(AttrValue::to_scalar)
                .filter(|v| !v.is_empty())
        };

        Self {
            name: scalar("name").unwrap_or_default(),
            id: scalar("id").unwrap_or_default(),
            cidr: scalar("cidr"),
            ip_version: scalar("ip_version"),
            gateway_ip: scalar("gateway_ip"),
            allocation_pools: attrs
                .get("allocation_pools")
                .map(|v| codec::decode_allocation_pools(&v.to_scalar()))
                .unwrap_or_default(),
            host_routes: scalar("host_routes"),
            dns_nameservers: attrs
                .get("dns_nameservers")
                .map(AttrValue::to_list)
                .unwrap_or_default(),
            enable_dhcp: scalar("enable_dhcp"),
            network_id: scalar("network_id"),
            tenant_id: scalar("tenant_id"),
        }
    }

    /// Current value of a property, if the remote reported one.
    pub fn value(&self, property: SubnetProperty) -> Option<AttrValue> {
        let scalar = |v: &Option<String>| v.clone().map(AttrValue::Scalar);
        match property {
            SubnetProperty::Cidr => scalar(&self.cidr),
            SubnetProperty::IpVersion => scalar(&self.ip_version),
            SubnetProperty::GatewayIp => scalar(&self.gateway_ip),
            SubnetProperty::AllocationPools => Some(AttrValue::List(self.allocation_pools.clone())),
            SubnetProperty::HostRoutes => scalar(&self.host_routes),
            SubnetProperty::DnsNameservers => Some(AttrValue::List(self.dns_nameservers.clone())),
            SubnetProperty::EnableDhcp => scalar(&self.enable_dhcp),
            SubnetProperty::NetworkId => scalar(&self.network_id),
            SubnetProperty::TenantId => scalar(&self.tenant_id),
        }
    }

    /// Record a value after a successful update.
    pub(crate) fn set_value(&mut self, property: SubnetProperty, value: &AttrValue) {
        let scalar = Some(value.to_scalar()).filter(|v| !v.is_empty());
        match property {
            SubnetProperty::Cidr => self.cidr = scalar,
            SubnetProperty::IpVersion => self.ip_version = scalar,
            SubnetProperty::GatewayIp => self.gateway_ip = scalar,
            SubnetProperty::AllocationPools => self.allocation_pools = value.to_list(),
            SubnetProperty::HostRoutes => self.host_routes = scalar,
            SubnetProperty::DnsNameservers => self.dns_nameservers = value.to_list(),
            SubnetProperty::EnableDhcp => self.enable_dhcp = scalar,
            SubnetProperty::NetworkId => self.network_id = scalar,
            SubnetProperty::TenantId => self.tenant_id = scalar,
        }
    }
}

/// A subnet as declared in the manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubnetSpec {
    pub name: String,
    #[serde(default)]
    pub ensure: Ensure,
    /// Read-only; reported by neutron, never sent
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub cidr: Option<String>,
    #[serde(default)]
    pub ip_version: Option<u8>,
    #[serde(default)]
    pub gateway_ip: Option<String>,
    /// `[start, end]` of the first pool
    #[serde(default)]
    pub allocation_pools: Option<Vec<String>>,
    #[serde(default)]
    pub host_routes: Option<String>,
    #[serde(default)]
    pub dns_nameservers: Option<Vec<String>>,
    #[serde(default)]
    pub enable_dhcp: Option<bool>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default)]
    pub network_name: Option<String>,
    #[serde(default)]
    pub tenant_id: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
}

impl SubnetSpec {
    /// Create an empty declaration for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Declared value of a property, rendered the way neutron prints it.
    pub fn value(&self, property: SubnetProperty) -> Option<AttrValue> {
        let scalar = |v: &Option<String>| v.clone().map(AttrValue::Scalar);
        match property {
            SubnetProperty::Cidr => scalar(&self.cidr),
            SubnetProperty::IpVersion => self.ip_version.map(|v| AttrValue::Scalar(v.to_string())),
            SubnetProperty::GatewayIp => scalar(&self.gateway_ip),
            SubnetProperty::AllocationPools => self.allocation_pools.clone().map(AttrValue::List),
            SubnetProperty::HostRoutes => scalar(&self.host_routes),
            SubnetProperty::DnsNameservers => self.dns_nameservers.clone().map(AttrValue::List),
            SubnetProperty::EnableDhcp => self
                .enable_dhcp
                .map(|v| AttrValue::Scalar(codec::render_bool(v).to_string())),
            SubnetProperty::NetworkId => scalar(&self.network_id),
            SubnetProperty::TenantId => scalar(&self.tenant_id),
        }
    }

    /// Declared properties that differ from `actual`, in comparison order.
    pub fn changes(&self, actual: &Subnet) -> Vec<PropertyChange> {
        SubnetProperty::ALL
            .iter()
            .filter_map(|&property| {
                let desired = self.value(property)?;
                let current = actual.value(property);
                if property.values_match(current.as_ref(), &desired) {
                    None
                } else {
                    Some(PropertyChange {
                        property,
                        current,
                        desired,
                    })
                }
            })
            .collect()
    }
}

/// One property that needs to move from `current` to `desired`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub property: SubnetProperty,
    pub current: Option<AttrValue>,
    pub desired: AttrValue,
}

impl fmt::Display for PropertyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let current = self
            .current
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "(unset)".to_string());
        write!(f, "{}: {} → {}", self.property, current, self.desired)
    }
}
