//! Encoding and decoding of neutron CLI text.
//!
//! The client prints three shapes we care about:
//! ```text
//! id,name                                   <- --format=csv --quote=none
//! 5d3c...,private_subnet
//!
//! allocation_pools="{"start": "10.0.0.2", "end": "10.0.0.254"}"   <- --format=shell
//! cidr="10.0.0.0/24"
//! dns_nameservers="8.8.8.8
//! 8.8.4.4"
//!
//! Created a new subnet:                     <- subnet-create
//! cidr="10.0.0.0/24"
//! ```

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::types::{AttrValue, AttributeMap, ListedResource, SubnetProperty, SubnetSpec};

/// Phrase `subnet-create` prints before the attribute block.
pub const CREATION_SENTINEL: &str = "Created a new subnet:";

/// Start of a `key=value` line.
static PAIR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$").expect("valid pair regex")
});

/// A further `key="` on the same line, after a closed value.
static NEXT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""\s+([A-Za-z_][A-Za-z0-9_]*)\s*=\s*""#).expect("valid next-pair regex")
});

/// Any `<key>: "<value>"` fragment.
static QUOTED_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#":\s*"([^"]*)""#).expect("valid quoted-field regex"));

/// Decode a two-column `id,name` CSV listing.
///
/// The header is dropped. Each line splits on its first comma only, so names
/// may themselves contain commas. Lines without a comma or id are skipped.
pub fn decode_listing(text: &str) -> Vec<ListedResource> {
    text.lines()
        .skip(1)
        .filter_map(|line| {
            let (id, name) = line.trim().split_once(',')?;
            let id = id.trim();
            if id.is_empty() {
                return None;
            }
            Some(ListedResource {
                id: id.to_string(),
                name: name.trim().to_string(),
            })
        })
        .collect()
}

/// Decode a shell-style attribute block.
///
/// Lines that do not start a new `key=value` pair continue the previous
/// value, which then becomes a list.
pub fn decode_attributes(text: &str) -> AttributeMap {
    let mut attrs = AttributeMap::new();
    let mut last_key: Option<String> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        match split_pairs(line) {
            Some(pairs) => {
                for (key, value) in pairs {
                    attrs.insert(key.to_string(), AttrValue::Scalar(unquote(value).to_string()));
                    last_key = Some(key.to_string());
                }
            }
            None => {
                let Some(key) = &last_key else {
                    continue;
                };
                let piece = unquote(line.trim()).to_string();
                let merged = match attrs.remove(key) {
                    Some(AttrValue::Scalar(first)) => AttrValue::List(vec![first, piece]),
                    Some(AttrValue::List(mut items)) => {
                        items.push(piece);
                        AttrValue::List(items)
                    }
                    None => AttrValue::Scalar(piece),
                };
                attrs.insert(key.clone(), merged);
            }
        }
    }

    attrs
}

/// Split a line into its `key=value` pairs, or `None` for a continuation line.
fn split_pairs(line: &str) -> Option<Vec<(&str, &str)>> {
    let caps = PAIR_LINE.captures(line)?;
    let mut key = caps.get(1)?.as_str();
    let mut rest = caps.get(2)?.as_str();

    let mut pairs = Vec::new();
    while let Some(next) = NEXT_PAIR.captures(rest) {
        let whole = next.get(0)?;
        let next_key = next.get(1)?.as_str();
        // Keep the closing quote with the current value, and the opening
        // quote with the next one.
        pairs.push((key, rest[..whole.start() + 1].trim()));
        key = next_key;
        rest = &rest[whole.end() - 1..];
    }
    pairs.push((key, rest.trim()));
    Some(pairs)
}

/// Strip one leading and one trailing double quote.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix('"').unwrap_or(value);
    value.strip_suffix('"').unwrap_or(value)
}

/// Extract every quoted value that follows a colon, in document order.
///
/// `{"start": "10.0.0.2", "end": "10.0.0.254"}` gives
/// `["10.0.0.2", "10.0.0.254"]`. Keys are not looked at, so several pools
/// come out as one flat start/end/start/end sequence.
pub fn decode_allocation_pools(text: &str) -> Vec<String> {
    QUOTED_FIELD
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

/// Decode the output of `subnet-create`.
///
/// Nothing is parsed unless the confirmation sentinel is present.
pub fn decode_creation_output(text: &str) -> Result<AttributeMap> {
    match text.find(CREATION_SENTINEL) {
        Some(pos) => Ok(decode_attributes(&text[pos + CREATION_SENTINEL.len()..])),
        None => Err(Error::CreationContractViolation {
            output: text.to_string(),
        }),
    }
}

/// Render a boolean the way neutron prints it.
pub fn render_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Encode the arguments for `subnet-create`.
///
/// `tenant_id` is the already-resolved tenant. The network reference and the
/// cidr come last, as positionals.
pub fn encode_create_args(spec: &SubnetSpec, tenant_id: Option<&str>) -> Result<Vec<String>> {
    let cidr = spec.cidr.as_deref().ok_or_else(|| Error::MissingAttribute {
        attribute: "cidr".to_string(),
    })?;

    let mut args = vec![format!("--name={}", spec.name)];

    if let Some(version) = spec.ip_version {
        args.push(format!("--ip-version={version}"));
    }
    if let Some(gateway) = &spec.gateway_ip {
        args.push(format!("--gateway-ip={gateway}"));
    }
    if let Some(dhcp) = spec.enable_dhcp {
        args.push(format!("--enable-dhcp={}", render_bool(dhcp)));
    }
    if let Some(tenant) = tenant_id {
        args.push(format!("--tenant_id={tenant}"));
    }
    if let Some(pool) = &spec.allocation_pools {
        let start = pool.first().map(String::as_str).unwrap_or_default();
        let end = pool.get(1).map(String::as_str).unwrap_or_default();
        args.push(format!("--allocation-pool=start={start},end={end}"));
    }
    for nameserver in spec.dns_nameservers.iter().flatten() {
        args.push(format!("--dns-nameserver={nameserver}"));
    }
    if let Some(network) = spec.network_name.as_ref().or(spec.network_id.as_ref()) {
        args.push(network.clone());
    }
    args.push(cidr.to_string());

    Ok(args)
}

/// Encode the arguments for a `subnet-update` of one property.
///
/// Returns `None` for properties that cannot be updated in place.
pub fn encode_update_args(
    name: &str,
    property: SubnetProperty,
    value: &AttrValue,
) -> Option<Vec<String>> {
    match property {
        SubnetProperty::GatewayIp => Some(vec![
            format!("--gateway-ip={}", value.to_scalar()),
            name.to_string(),
        ]),
        SubnetProperty::EnableDhcp => Some(vec![
            format!("--enable-dhcp={}", value.to_scalar()),
            name.to_string(),
        ]),
        SubnetProperty::DnsNameservers => {
            let servers = value.to_list();
            let mut args = vec![name.to_string(), "--dns-nameservers".to_string()];
            if servers.is_empty() {
                args.push("action=clear".to_string());
            } else {
                args.push("list=true".to_string());
                args.extend(servers);
            }
            Some(args)
        }
        _ => None,
    }
}
