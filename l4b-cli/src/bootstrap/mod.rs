//! Bootstrap pipeline for preparing the analysis environment.
//!
//! - Runtime presence check and version probe
//! - Idempotent compiler-toolchain patch (macOS)
//! - Delegated package installation and lockfile snapshot
//! - Run report

pub mod installer;
pub mod report;
pub mod runtime;
pub mod toolchain;

pub use installer::{InstallSummary, install_packages};
pub use report::{BootstrapReport, print_report, write_report};
pub use runtime::{RuntimeCheck, check_runtime};
pub use toolchain::{PatchOutcome, apply_patch, config_path};
