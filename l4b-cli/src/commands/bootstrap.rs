//! Bootstrap command handlers.
//!
//! - Check the runtime (fail fast when absent)
//! - Patch the compiler toolchain (idempotent)
//! - Install both package lists and snapshot the lockfile
//! - Write the run report

use crate::bootstrap::report::BootstrapReport;
use crate::bootstrap::{
    InstallSummary, PatchOutcome, RuntimeCheck, apply_patch, check_runtime, config_path,
    install_packages, print_report, write_report,
};
use crate::environment::Environment;
use crate::manifest::{Manifest, ToolchainSpec, load_manifest, locate_manifest};
use crate::pkgmgr::RscriptPackageManager;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
pub enum BootstrapCommands {
    /// Run the full bootstrap (runtime check + toolchain patch + installs + snapshot)
    #[clap(alias = "init")]
    Run {
        /// Skip the compiler-toolchain patch
        #[clap(long)]
        skip_patch: bool,

        /// Skip package installation and the lockfile snapshot
        #[clap(long)]
        skip_install: bool,

        /// Path to the bootstrap manifest (default: ./l4b.toml)
        #[clap(short, long)]
        manifest: Option<PathBuf>,

        /// Output path for the run report (default: ~/.l4b/bootstrap-report.toml)
        #[clap(short, long)]
        output: Option<PathBuf>,

        /// Print the report to stdout instead of a file
        #[clap(long)]
        print: bool,
    },

    /// Check the runtime only
    Check {
        /// Path to the bootstrap manifest (default: ./l4b.toml)
        #[clap(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Apply the toolchain patch only
    Patch {
        /// Path to the bootstrap manifest (default: ./l4b.toml)
        #[clap(short, long)]
        manifest: Option<PathBuf>,
    },
}

impl Default for BootstrapCommands {
    fn default() -> Self {
        BootstrapCommands::Run {
            skip_patch: false,
            skip_install: false,
            manifest: None,
            output: None,
            print: false,
        }
    }
}

/// Handle bootstrap commands
pub fn handle_bootstrap_command(cmd: BootstrapCommands) -> Result<()> {
    match cmd {
        BootstrapCommands::Run {
            skip_patch,
            skip_install,
            manifest,
            output,
            print,
        } => run_bootstrap(skip_patch, skip_install, manifest, output, print),
        BootstrapCommands::Check { manifest } => check_only(manifest),
        BootstrapCommands::Patch { manifest } => patch_only(manifest),
    }
}

fn load(manifest: Option<PathBuf>) -> Result<Manifest> {
    let manifest_path = locate_manifest(manifest)?;
    load_manifest(&manifest_path)
}

fn run_bootstrap(
    skip_patch: bool,
    skip_install: bool,
    manifest: Option<PathBuf>,
    output: Option<PathBuf>,
    print_only: bool,
) -> Result<()> {
    println!("🧪 l4b bootstrap - preparing the analysis environment");
    println!();

    let manifest = load(manifest)?;
    let env = Environment::detect()?;

    println!("📋 Checking runtime...");
    let runtime = check_runtime(&env, &manifest.bootstrap.runtime)?;
    report_runtime(&runtime);

    let patch = if skip_patch {
        println!("⏭️  Skipping toolchain patch");
        None
    } else {
        Some(patch_step(&env, &manifest.bootstrap.toolchain)?)
    };

    let install = if skip_install {
        println!("⏭️  Skipping package installation");
        None
    } else {
        let project_dir = std::env::current_dir().context("Failed to resolve project directory")?;
        let client = RscriptPackageManager::new(runtime.path.clone(), project_dir);
        Some(install_packages(&client, &manifest.bootstrap.packages)?)
    };

    finish_with_report(runtime, patch, install, output, print_only)
}

fn finish_with_report(
    runtime: RuntimeCheck,
    patch: Option<PatchOutcome>,
    install: Option<InstallSummary>,
    output: Option<PathBuf>,
    print_only: bool,
) -> Result<()> {
    let report = BootstrapReport {
        timestamp: Utc::now().to_rfc3339(),
        runtime,
        patch,
        install,
    };

    println!();
    if print_only {
        print_report(&report);
    } else {
        let output_path =
            output.unwrap_or_else(|| PathBuf::from("~/.l4b/bootstrap-report.toml"));
        write_report(&report, &output_path).context("Failed to write bootstrap report")?;

        print_report(&report);
        println!();
        println!("📄 Report written to: {}", output_path.display());
    }

    println!();
    println!("✅ Bootstrap complete!");

    Ok(())
}

fn report_runtime(runtime: &RuntimeCheck) {
    match &runtime.installed_version {
        Some(version) => {
            println!(
                "  ✅ {} {} at {}",
                runtime.binary,
                version,
                runtime.path.display()
            );
            if !runtime.meets_minimum {
                // Soft gate: warn and keep going.
                println!(
                    "  ⚠️  Installed {} is below the supported minimum {}",
                    version, runtime.minimum_version
                );
                log::warn!(
                    "runtime {} below supported minimum {}",
                    version,
                    runtime.minimum_version
                );
            }
        }
        None => {
            println!(
                "  ⚠️  {} found at {} but the version could not be determined",
                runtime.binary,
                runtime.path.display()
            );
        }
    }
}

fn patch_step(env: &Environment, spec: &ToolchainSpec) -> Result<PatchOutcome> {
    println!("🔧 Patching compiler toolchain...");
    let outcome = apply_patch(env, spec)?;

    match outcome {
        PatchOutcome::NotApplicable => {
            println!("  ⏭️  Not a {} host, nothing to patch", spec.os_family);
        }
        PatchOutcome::SdkMissing => {
            println!("  ⚠️  SDK not found at {}", spec.sdk_path.display());
            println!("     Fix with: {}", spec.remediation);
        }
        PatchOutcome::AlreadyPatched => {
            println!("  ✅ {} already patched", spec.config_file);
        }
        PatchOutcome::Patched => {
            println!(
                "  ✨ Appended build flags to {}",
                config_path(env, spec).display()
            );
        }
    }

    Ok(outcome)
}

fn check_only(manifest: Option<PathBuf>) -> Result<()> {
    let manifest = load(manifest)?;
    let env = Environment::detect()?;

    println!("📋 Checking runtime...");
    let runtime = check_runtime(&env, &manifest.bootstrap.runtime)?;
    report_runtime(&runtime);

    Ok(())
}

fn patch_only(manifest: Option<PathBuf>) -> Result<()> {
    let manifest = load(manifest)?;
    let env = Environment::detect()?;

    patch_step(&env, &manifest.bootstrap.toolchain)?;
    Ok(())
}
