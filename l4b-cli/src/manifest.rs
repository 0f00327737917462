//! Bootstrap manifest loading.
//!
//! Reads l4b.toml and validates the runtime requirement, the toolchain
//! patch definition and the two package lists.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Manifest filename expected at the project root.
pub const DEFAULT_MANIFEST: &str = "l4b.toml";

/// Bootstrap manifest structure matching l4b.toml
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub bootstrap: BootstrapSection,
}

#[derive(Debug, Deserialize)]
pub struct BootstrapSection {
    pub runtime: RuntimeSpec,
    pub toolchain: ToolchainSpec,
    pub packages: PackageSection,
}

/// Required language runtime.
#[derive(Debug, Deserialize, Clone)]
pub struct RuntimeSpec {
    /// Binary expected on the search path, e.g. "Rscript".
    pub binary: String,
    /// Minimum supported version, e.g. "4.1.0". Logged, not enforced.
    pub minimum_version: String,
    /// Where to get the runtime if it is missing.
    pub install_hint: String,
}

/// Platform-specific compiler-toolchain patch.
#[derive(Debug, Deserialize, Clone)]
pub struct ToolchainSpec {
    /// OS family the patch applies on, e.g. "macos".
    pub os_family: String,
    /// SDK directory the build flags point at.
    pub sdk_path: PathBuf,
    /// Configuration directory, tilde-expanded against the home directory.
    pub config_dir: String,
    /// Configuration file inside `config_dir`.
    pub config_file: String,
    /// Marker line guarding the patch block against re-application.
    pub marker: String,
    /// Command the user can run when the SDK is missing.
    pub remediation: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PackageSection {
    /// General-purpose packages installed from the primary repository.
    pub primary: Vec<String>,
    /// Domain packages installed through the secondary repository manager.
    #[serde(default)]
    pub secondary: Vec<String>,
}

/// Load the manifest from a TOML file.
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the manifest path, erroring with a pointer when it is absent.
pub fn locate_manifest(explicit: Option<PathBuf>) -> Result<PathBuf> {
    let path = explicit.unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
    if !path.exists() {
        anyhow::bail!(
            "Bootstrap manifest not found: {}\nRun from the project root or pass --manifest",
            path.display()
        );
    }
    Ok(path)
}
