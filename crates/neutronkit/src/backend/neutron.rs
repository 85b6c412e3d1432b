//! Real Neutron backend using the `neutron` command.

use log::debug;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::auth::AuthEnv;
use crate::backend::{Backend, OutputFormat};
use crate::error::{Error, Result};

/// Backend that executes real `neutron` commands.
pub struct NeutronBackend {
    /// Path to the neutron executable, if one was found
    neutron_path: Option<PathBuf>,
    /// Credentials exported to each invocation
    auth: AuthEnv,
}

impl NeutronBackend {
    /// Create a new NeutronBackend.
    ///
    /// A missing client is not an error here; every call then fails with
    /// [`Error::NeutronNotFound`], which discovery tolerates.
    pub fn new(neutron_path: Option<&Path>, auth: AuthEnv) -> Self {
        let neutron_path = resolve(neutron_path, std::env::var_os("PATH"));
        Self { neutron_path, auth }
    }

    /// Build the full argument vector for one invocation.
    fn command_args(subcommand: &str, format: Option<OutputFormat>, args: &[String]) -> Vec<String> {
        let mut full = vec![subcommand.to_string()];
        if let Some(format) = format {
            full.push(format.flag().to_string());
        }
        full.extend(args.iter().cloned());
        full
    }
}

impl Backend for NeutronBackend {
    fn is_available(&self) -> bool {
        self.neutron_path.as_ref().is_some_and(|path| {
            Command::new(path)
                .arg("--version")
                .output()
                .is_ok_and(|o| o.status.success())
        })
    }

    fn run(
        &self,
        subcommand: &str,
        format: Option<OutputFormat>,
        args: &[String],
    ) -> Result<String> {
        let neutron = self.neutron_path.as_ref().ok_or(Error::NeutronNotFound)?;
        self.auth.validate()?;

        let full = Self::command_args(subcommand, format, args);
        debug!("neutron {}", full.join(" "));

        let output = Command::new(neutron)
            .args(&full)
            .envs(self.auth.vars())
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                    Error::NeutronNotFound
                }
                _ => Error::CommandFailed {
                    message: format!("failed to execute neutron: {e}"),
                    stderr: String::new(),
                },
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::from_neutron_output(&stderr, subcommand));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// The explicit path, or the first executable `neutron` in `search_path`.
fn resolve(explicit: Option<&Path>, search_path: Option<OsString>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().ok()?;
            which::which_in("neutron", search_path, cwd).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> AuthEnv {
        AuthEnv {
            auth_url: Some("http://127.0.0.1:5000/v2.0/".into()),
            username: Some("admin".into()),
            password: Some("secret".into()),
            tenant_name: Some("admin".into()),
            region_name: None,
        }
    }

    #[test]
    fn test_command_args_with_format() {
        let args = NeutronBackend::command_args(
            "subnet-show",
            Some(OutputFormat::Shell),
            &["abc".to_string()],
        );
        assert_eq!(args, vec!["subnet-show", "--format=shell", "abc"]);
    }

    #[test]
    fn test_command_args_without_format() {
        let args = NeutronBackend::command_args("subnet-delete", None, &["lab".to_string()]);
        assert_eq!(args, vec!["subnet-delete", "lab"]);
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        let backend =
            NeutronBackend::new(Some(Path::new("/nonexistent/bin/neutron")), credentials());
        assert!(!backend.is_available());

        let err = backend.run("subnet-list", None, &[]).unwrap_err();
        assert!(matches!(err, Error::NeutronNotFound));
        assert!(err.is_unavailable());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_neutron_on_path_is_ignored() {
        use crate::discovery;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let stray = dir.path().join("neutron");
        std::fs::write(&stray, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&stray, std::fs::Permissions::from_mode(0o644)).unwrap();

        let neutron_path = resolve(None, Some(dir.path().as_os_str().to_owned()));
        assert_eq!(neutron_path, None);

        let backend = NeutronBackend {
            neutron_path,
            auth: credentials(),
        };
        assert!(discovery::list_instances(&backend).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_explicit_path_is_unavailable() {
        use crate::discovery;
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::TempDir::new().unwrap();
        let stray = dir.path().join("neutron");
        std::fs::write(&stray, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&stray, std::fs::Permissions::from_mode(0o644)).unwrap();

        let backend = NeutronBackend::new(Some(&stray), credentials());
        let err = backend.run("subnet-list", None, &[]).unwrap_err();
        assert!(matches!(err, Error::NeutronNotFound));
        assert!(discovery::list_instances(&backend).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_path_wins_over_search() {
        let path = Path::new("/opt/openstack/bin/neutron");
        assert_eq!(resolve(Some(path), None), Some(path.to_path_buf()));
    }

    #[test]
    fn test_missing_credentials_checked_before_running() {
        let backend = NeutronBackend::new(Some(Path::new("/bin/true")), AuthEnv::default());
        let err = backend.run("subnet-list", None, &[]).unwrap_err();
        assert!(matches!(err, Error::Unauthenticated { .. }));
    }
}
