//! Delegated package installation.
//!
//! Drives the package-manager steps in a fixed order. The first failure
//! aborts the run; remaining steps never execute.

use crate::error::BootstrapError;
use crate::manifest::PackageSection;
use crate::pkgmgr::{InitOutcome, PackageManager};

/// What the install phase accomplished.
#[derive(Debug, Default)]
pub struct InstallSummary {
    pub initialized: bool,
    pub primary_installed: usize,
    pub secondary_installed: usize,
    pub snapshot_taken: bool,
}

/// Install both package lists and snapshot the lockfile.
///
/// Step order: ensure-initialized, install primary, ensure secondary
/// manager, install secondary, snapshot.
pub fn install_packages(
    client: &dyn PackageManager,
    packages: &PackageSection,
) -> Result<InstallSummary, BootstrapError> {
    let mut summary = InstallSummary::default();

    println!("📦 Preparing lockfile-based package manager...");
    match client.ensure_initialized()? {
        InitOutcome::Initialized => {
            summary.initialized = true;
            println!("  ✨ Initialized bare project library");
        }
        InitOutcome::AlreadyInitialized => {
            println!("  ✅ Lockfile already present");
        }
    }

    println!(
        "📦 Installing {} general-purpose packages...",
        packages.primary.len()
    );
    client.install(&packages.primary)?;
    summary.primary_installed = packages.primary.len();

    if packages.secondary.is_empty() {
        log::debug!("no secondary packages requested");
    } else {
        println!("🔬 Ensuring secondary repository manager...");
        client.ensure_secondary_manager()?;

        println!(
            "🔬 Installing {} domain packages...",
            packages.secondary.len()
        );
        client.install_secondary(&packages.secondary)?;
        summary.secondary_installed = packages.secondary.len();
    }

    println!("🔒 Snapshotting resolved dependencies...");
    client.snapshot()?;
    summary.snapshot_taken = true;

    Ok(summary)
}
