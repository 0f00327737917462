//! Execution-environment description.
//!
//! Every bootstrap step takes an explicit `Environment` instead of reading
//! ambient process state, so tests can simulate platforms deterministically.

use std::env;
use std::path::{Path, PathBuf};

/// Operating-system family the bootstrapper distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Macos,
    Linux,
    Windows,
    Other,
}

impl OsFamily {
    /// Parse an identifier such as `std::env::consts::OS` or a manifest value.
    pub fn parse(id: &str) -> OsFamily {
        match id.to_ascii_lowercase().as_str() {
            "macos" | "darwin" => OsFamily::Macos,
            "linux" => OsFamily::Linux,
            "windows" => OsFamily::Windows,
            _ => OsFamily::Other,
        }
    }
}

/// Snapshot of the ambient state the bootstrapper is allowed to consult.
#[derive(Debug, Clone)]
pub struct Environment {
    pub os_family: OsFamily,
    pub home_dir: PathBuf,
    pub search_path: Vec<PathBuf>,
}

impl Environment {
    /// Detect the environment of the current process.
    pub fn detect() -> anyhow::Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;

        let search_path = env::var_os("PATH")
            .map(|raw| env::split_paths(&raw).collect())
            .unwrap_or_default();

        Ok(Self {
            os_family: OsFamily::parse(env::consts::OS),
            home_dir,
            search_path,
        })
    }

    /// Locate an executable on the search path.
    pub fn find_binary(&self, name: &str) -> Option<PathBuf> {
        self.search_path
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    }

    /// Expand a leading `~` against this environment's home directory.
    pub fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(remainder) = path.strip_prefix('~') {
            let remainder = remainder.trim_start_matches('/');
            return self.home_dir.join(remainder);
        }
        PathBuf::from(path)
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
