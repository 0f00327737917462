//! Runtime presence check and version probe.
//!
//! Validates that the required interpreter is discoverable on the search
//! path before anything else touches the filesystem. The version minimum
//! is a soft gate: logged, never enforced.

use crate::environment::Environment;
use crate::error::BootstrapError;
use crate::manifest::RuntimeSpec;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Result of the runtime check.
#[derive(Debug)]
pub struct RuntimeCheck {
    pub binary: String,
    pub path: PathBuf,
    pub installed_version: Option<String>,
    pub minimum_version: String,
    /// Informational only; a `false` here never fails the run.
    pub meets_minimum: bool,
}

/// Check the runtime against the manifest's runtime entry.
///
/// Fails with `MissingRuntime` when the binary is absent; a found binary
/// whose version cannot be probed or is below the minimum still passes.
pub fn check_runtime(env: &Environment, spec: &RuntimeSpec) -> Result<RuntimeCheck, BootstrapError> {
    let path = env
        .find_binary(&spec.binary)
        .ok_or_else(|| BootstrapError::MissingRuntime {
            binary: spec.binary.clone(),
            minimum: spec.minimum_version.clone(),
            hint: spec.install_hint.clone(),
        })?;

    let installed_version = probe_version(&path);
    let meets_minimum = match &installed_version {
        Some(version) => version_meets_minimum(version, &spec.minimum_version).unwrap_or(false),
        None => false,
    };

    Ok(RuntimeCheck {
        binary: spec.binary.clone(),
        path,
        installed_version,
        minimum_version: spec.minimum_version.clone(),
        meets_minimum,
    })
}

/// Run `<binary> --version` and pull a semantic version out of the output.
fn probe_version(path: &Path) -> Option<String> {
    let output = Command::new(path).arg("--version").output().ok()?;

    if !output.status.success() {
        return None;
    }

    // Rscript historically printed its banner on stderr; check both streams.
    let stdout = String::from_utf8_lossy(&output.stdout);
    extract_version(&stdout).or_else(|| {
        let stderr = String::from_utf8_lossy(&output.stderr);
        extract_version(&stderr)
    })
}

/// Extract a semantic version from version output.
/// Handles various formats:
///   "R scripting front-end version 4.3.2 (2023-10-31)" -> "4.3.2"
///   "R version 4.1.0 (2021-05-18) -- \"Camp Pontanezen\"" -> "4.1.0"
///   "v3.2.1" -> "3.2.1"
fn extract_version(output: &str) -> Option<String> {
    let re = regex::Regex::new(r"v?(\d+\.\d+\.\d+)").ok()?;
    re.captures(output)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check if the installed version meets the minimum.
fn version_meets_minimum(installed: &str, minimum: &str) -> Result<bool> {
    let installed_ver = semver::Version::parse(installed.trim())
        .with_context(|| format!("Failed to parse installed version: {}", installed))?;

    let minimum_ver = semver::Version::parse(minimum.trim())
        .with_context(|| format!("Failed to parse minimum version: {}", minimum))?;

    Ok(installed_ver >= minimum_ver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::OsFamily;

    fn spec() -> RuntimeSpec {
        RuntimeSpec {
            binary: "fake-runtime".to_string(),
            minimum_version: "4.1.0".to_string(),
            install_hint: "https://cran.r-project.org/".to_string(),
        }
    }

    #[test]
    fn test_extract_version() {
        assert_eq!(
            extract_version("R scripting front-end version 4.3.2 (2023-10-31)"),
            Some("4.3.2".to_string())
        );
        assert_eq!(
            extract_version("R version 4.1.0 (2021-05-18) -- \"Camp Pontanezen\""),
            Some("4.1.0".to_string())
        );
        assert_eq!(extract_version("v3.2.1"), Some("3.2.1".to_string()));
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    fn test_version_comparison() {
        assert!(version_meets_minimum("4.3.2", "4.1.0").unwrap());
        assert!(version_meets_minimum("4.1.0", "4.1.0").unwrap());
        assert!(!version_meets_minimum("4.0.5", "4.1.0").unwrap());
        assert!(version_meets_minimum("garbage", "4.1.0").is_err());
    }

    #[test]
    fn test_missing_runtime_fails_fast() {
        let home = tempfile::tempdir().unwrap();
        let env = Environment {
            os_family: OsFamily::Linux,
            home_dir: home.path().to_path_buf(),
            search_path: vec![],
        };

        let err = check_runtime(&env, &spec()).unwrap_err();
        match err {
            BootstrapError::MissingRuntime { binary, minimum, .. } => {
                assert_eq!(binary, "fake-runtime");
                assert_eq!(minimum, "4.1.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_found_runtime_probes_version() {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = tempfile::tempdir().unwrap();
        let exe = bin_dir.path().join("fake-runtime");
        std::fs::write(
            &exe,
            "#!/bin/sh\necho \"R scripting front-end version 4.3.1 (2023-06-16)\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let home = tempfile::tempdir().unwrap();
        let env = Environment {
            os_family: OsFamily::Linux,
            home_dir: home.path().to_path_buf(),
            search_path: vec![bin_dir.path().to_path_buf()],
        };

        let check = check_runtime(&env, &spec()).unwrap();
        assert_eq!(check.installed_version, Some("4.3.1".to_string()));
        assert!(check.meets_minimum);
    }

    #[cfg(unix)]
    #[test]
    fn test_below_minimum_is_soft() {
        use std::os::unix::fs::PermissionsExt;

        let bin_dir = tempfile::tempdir().unwrap();
        let exe = bin_dir.path().join("fake-runtime");
        std::fs::write(&exe, "#!/bin/sh\necho \"version 3.6.3\"\n").unwrap();
        std::fs::set_permissions(&exe, std::fs::Permissions::from_mode(0o755)).unwrap();

        let home = tempfile::tempdir().unwrap();
        let env = Environment {
            os_family: OsFamily::Linux,
            home_dir: home.path().to_path_buf(),
            search_path: vec![bin_dir.path().to_path_buf()],
        };

        // Below-minimum is reported but does not error.
        let check = check_runtime(&env, &spec()).unwrap();
        assert_eq!(check.installed_version, Some("3.6.3".to_string()));
        assert!(!check.meets_minimum);
    }
}
