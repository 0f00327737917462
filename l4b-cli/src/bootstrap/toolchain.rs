//! Idempotent compiler-toolchain patch.
//!
//! On macOS, source package builds need explicit sysroot flags pointing at
//! the command-line tools SDK. The patch appends a marker-guarded block to
//! the user's Makevars; the marker keeps re-runs from stacking duplicates.

use crate::environment::{Environment, OsFamily};
use crate::manifest::ToolchainSpec;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// What the patch step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Host is not the patch target; configuration left untouched.
    NotApplicable,
    /// SDK directory absent; warned and skipped, configuration untouched.
    SdkMissing,
    /// Marker already present; configuration untouched.
    AlreadyPatched,
    /// Patch block appended.
    Patched,
}

/// Configuration file the patch targets, for this environment.
pub fn config_path(env: &Environment, spec: &ToolchainSpec) -> PathBuf {
    env.expand_path(&spec.config_dir).join(&spec.config_file)
}

/// Render the block appended to the configuration file: the marker line
/// plus preprocessor, compiler and linker flags against the SDK.
fn render_block(spec: &ToolchainSpec) -> String {
    let sdk = spec.sdk_path.display();
    format!(
        "\n{marker}\n\
         CPPFLAGS += -isysroot {sdk}\n\
         CFLAGS += -isysroot {sdk}\n\
         CXXFLAGS += -isysroot {sdk}\n\
         LDFLAGS += -L{sdk}/usr/lib -isysroot {sdk}\n",
        marker = spec.marker,
        sdk = sdk,
    )
}

/// Apply the toolchain patch for this environment.
///
/// Only the target OS family is ever patched; a missing SDK downgrades the
/// step to a warning. Applying twice leaves the file byte-identical to the
/// first application.
pub fn apply_patch(env: &Environment, spec: &ToolchainSpec) -> Result<PatchOutcome> {
    if env.os_family != OsFamily::parse(&spec.os_family) {
        log::debug!("toolchain patch only applies on {}", spec.os_family);
        return Ok(PatchOutcome::NotApplicable);
    }

    if !spec.sdk_path.is_dir() {
        log::warn!("SDK not found at {}", spec.sdk_path.display());
        return Ok(PatchOutcome::SdkMissing);
    }

    let config_dir = env.expand_path(&spec.config_dir);
    let config_file = config_dir.join(&spec.config_file);

    if config_file.exists() {
        let existing = fs::read_to_string(&config_file)
            .with_context(|| format!("Failed to read {}", config_file.display()))?;
        if existing.contains(&spec.marker) {
            return Ok(PatchOutcome::AlreadyPatched);
        }
    }

    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create directory: {}", config_dir.display()))?;

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config_file)
        .with_context(|| format!("Failed to open {}", config_file.display()))?;

    file.write_all(render_block(spec).as_bytes())
        .with_context(|| format!("Failed to append to {}", config_file.display()))?;

    Ok(PatchOutcome::Patched)
}
