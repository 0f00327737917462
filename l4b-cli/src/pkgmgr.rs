//! Package-manager client.
//!
//! The bootstrapper drives the external lockfile-based package manager
//! through the `PackageManager` trait and never sees its command syntax.
//! The production client shells out to the R script runner; tests
//! substitute a recording fake.

use crate::error::BootstrapError;
use std::path::PathBuf;
use std::process::Command;

/// Outcome of `ensure_initialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// A lockfile already exists; initialization skipped.
    AlreadyInitialized,
    /// The project library was initialized bare.
    Initialized,
}

/// Lockfile-based package-manager capability.
pub trait PackageManager {
    /// Bootstrap the manager bare when no lockfile exists yet.
    fn ensure_initialized(&self) -> Result<InitOutcome, BootstrapError>;

    /// Install the general-purpose package list.
    fn install(&self, packages: &[String]) -> Result<(), BootstrapError>;

    /// Install the secondary repository manager when it is absent.
    fn ensure_secondary_manager(&self) -> Result<(), BootstrapError>;

    /// Install the domain package list through the secondary repository.
    fn install_secondary(&self, packages: &[String]) -> Result<(), BootstrapError>;

    /// Snapshot the resolved dependency graph into the lockfile,
    /// non-interactively.
    fn snapshot(&self) -> Result<(), BootstrapError>;
}

/// Client that drives `renv` and `BiocManager` through the R script runner.
pub struct RscriptPackageManager {
    runtime: PathBuf,
    project_dir: PathBuf,
}

impl RscriptPackageManager {
    pub fn new(runtime: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            runtime,
            project_dir,
        }
    }

    fn lockfile(&self) -> PathBuf {
        self.project_dir.join("renv.lock")
    }

    /// Run one R expression, mapping any failure to the step's exit status.
    fn run_expression(&self, step: &str, expression: &str) -> Result<(), BootstrapError> {
        log::debug!("{}: {}", step, expression);

        let status = Command::new(&self.runtime)
            .arg("-e")
            .arg(expression)
            .current_dir(&self.project_dir)
            .status();

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(status) => Err(BootstrapError::DelegatedInstall {
                step: step.to_string(),
                status: status.code().unwrap_or(1),
            }),
            Err(e) => {
                // Spawn failure after the presence check passed; treat it
                // like command-not-found.
                log::warn!("{}: failed to spawn {}: {}", step, self.runtime.display(), e);
                Err(BootstrapError::DelegatedInstall {
                    step: step.to_string(),
                    status: 127,
                })
            }
        }
    }
}

impl PackageManager for RscriptPackageManager {
    fn ensure_initialized(&self) -> Result<InitOutcome, BootstrapError> {
        if self.lockfile().exists() {
            return Ok(InitOutcome::AlreadyInitialized);
        }
        self.run_expression("init", "renv::init(bare = TRUE)")?;
        Ok(InitOutcome::Initialized)
    }

    fn install(&self, packages: &[String]) -> Result<(), BootstrapError> {
        self.run_expression(
            "install-primary",
            &format!("renv::install({})", r_vector(packages)),
        )
    }

    fn ensure_secondary_manager(&self) -> Result<(), BootstrapError> {
        // 🤓 Probe first so an already-present manager is never reinstalled
        self.run_expression(
            "secondary-manager",
            "if (!requireNamespace(\"BiocManager\", quietly = TRUE)) renv::install(\"BiocManager\")",
        )
    }

    fn install_secondary(&self, packages: &[String]) -> Result<(), BootstrapError> {
        self.run_expression(
            "install-secondary",
            &format!(
                "BiocManager::install({}, update = FALSE, ask = FALSE)",
                r_vector(packages)
            ),
        )
    }

    fn snapshot(&self) -> Result<(), BootstrapError> {
        self.run_expression("snapshot", "renv::snapshot(prompt = FALSE)")
    }
}

/// Render a package list as an R character vector.
fn r_vector(packages: &[String]) -> String {
    let quoted: Vec<String> = packages.iter().map(|p| format!("\"{}\"", p)).collect();
    format!("c({})", quoted.join(", "))
}
