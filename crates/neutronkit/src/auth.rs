//! Keystone credentials handed to the CLI tools.
//!
//! The `neutron` and `openstack` clients read their credentials from
//! `OS_*` environment variables. Values from the manifest win over the
//! ones already present in the process environment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Credentials exported to every CLI invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthEnv {
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub tenant_name: Option<String>,
    #[serde(default)]
    pub region_name: Option<String>,
}

impl AuthEnv {
    /// Read credentials from `OS_*` variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        Self {
            auth_url: get("OS_AUTH_URL"),
            username: get("OS_USERNAME"),
            password: get("OS_PASSWORD"),
            tenant_name: get("OS_TENANT_NAME").or_else(|| get("OS_PROJECT_NAME")),
            region_name: get("OS_REGION_NAME"),
        }
    }

    /// Fill unset fields from `fallback`.
    pub fn or(self, fallback: AuthEnv) -> Self {
        Self {
            auth_url: self.auth_url.or(fallback.auth_url),
            username: self.username.or(fallback.username),
            password: self.password.or(fallback.password),
            tenant_name: self.tenant_name.or(fallback.tenant_name),
            region_name: self.region_name.or(fallback.region_name),
        }
    }

    /// Names of required fields that are still unset.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("OS_AUTH_URL", &self.auth_url),
            ("OS_USERNAME", &self.username),
            ("OS_PASSWORD", &self.password),
            ("OS_TENANT_NAME", &self.tenant_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Fail with `Unauthenticated` unless every required field is set.
    pub fn validate(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Unauthenticated {
                message: format!("insufficient credentials, missing {}", missing.join(", ")),
            })
        }
    }

    /// Environment variables to export.
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        [
            ("OS_AUTH_URL", &self.auth_url),
            ("OS_USERNAME", &self.username),
            ("OS_PASSWORD", &self.password),
            ("OS_TENANT_NAME", &self.tenant_name),
            ("OS_PROJECT_NAME", &self.tenant_name),
            ("OS_REGION_NAME", &self.region_name),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_and_validate() {
        let auth = AuthEnv::from_lookup(lookup(&[
            ("OS_AUTH_URL", "http://127.0.0.1:5000/v2.0/"),
            ("OS_USERNAME", "admin"),
            ("OS_PASSWORD", "secret"),
            ("OS_PROJECT_NAME", "admin"),
        ]));
        assert_eq!(auth.tenant_name.as_deref(), Some("admin"));
        assert!(auth.validate().is_ok());
    }

    #[test]
    fn test_missing_credentials_are_unauthenticated() {
        let auth = AuthEnv::from_lookup(lookup(&[("OS_USERNAME", "admin"), ("OS_PASSWORD", "")]));
        assert_eq!(
            auth.missing(),
            vec!["OS_AUTH_URL", "OS_PASSWORD", "OS_TENANT_NAME"]
        );
        let err = auth.validate().unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_manifest_values_win() {
        let manifest = AuthEnv {
            username: Some("neutron".into()),
            ..Default::default()
        };
        let env = AuthEnv {
            username: Some("admin".into()),
            password: Some("secret".into()),
            ..Default::default()
        };
        let merged = manifest.or(env);
        assert_eq!(merged.username.as_deref(), Some("neutron"));
        assert_eq!(merged.password.as_deref(), Some("secret"));
    }
}
