//! Neutron fixtures and client helpers for command and resource tests.

use neutronkit::backend::mock::{CallLog, MockBackend};
use neutronkit::{Client, Error, TenantDirectory};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

const WEB_LISTING: &str = "id,name\nid-web,web\n";

const WEB_DETAIL: &str = r#"allocation_pools="{"start": "10.0.0.2", "end": "10.0.0.254"}"
cidr="10.0.0.0/24"
dns_nameservers="8.8.8.8"
enable_dhcp="True"
gateway_ip="10.0.0.1"
host_routes=""
id="id-web"
ip_version="4"
name="web"
network_id="net-1"
tenant_id="t-1"
"#;

/// Backend that already knows the `web` subnet.
pub fn web_backend() -> MockBackend {
    MockBackend::new()
        .respond("subnet-list", WEB_LISTING)
        .respond("subnet-show id-web", WEB_DETAIL)
}

/// The error neutron would report for `stderr`.
pub fn neutron_error(
    subcommand: &'static str,
    stderr: &'static str,
) -> impl Fn() -> Error + Send + Sync {
    move || Error::from_neutron_output(stderr, subcommand)
}

/// Wrap `backend` in a client whose tenant table maps `admin` to `t-1`.
pub fn into_client(backend: MockBackend) -> (Arc<Client>, CallLog) {
    let calls = backend.call_log();
    let client = Client::with_backend(
        Box::new(backend),
        Box::new(TenantDirectory::new(HashMap::from([(
            "admin".to_string(),
            "t-1".to_string(),
        )]))),
    );
    (Arc::new(client), calls)
}

/// Recorded mutating calls as `"subcommand arg1 arg2 ..."`.
pub fn mutations(calls: &CallLog) -> Vec<String> {
    calls
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .filter(|c| matches!(c.subcommand.as_str(), "subnet-create" | "subnet-update" | "subnet-delete"))
        .map(|c| {
            let mut line = vec![c.subcommand.clone()];
            line.extend(c.args.iter().cloned());
            line.join(" ")
        })
        .collect()
}
