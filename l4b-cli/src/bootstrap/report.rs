//! Bootstrap run report.
//!
//! Collects what each step did, prints a console summary and optionally
//! dumps a TOML-shaped report file.

use crate::bootstrap::installer::InstallSummary;
use crate::bootstrap::runtime::RuntimeCheck;
use crate::bootstrap::toolchain::PatchOutcome;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Report encompassing one bootstrap run.
#[derive(Debug)]
pub struct BootstrapReport {
    pub timestamp: String,
    pub runtime: RuntimeCheck,
    pub patch: Option<PatchOutcome>,
    pub install: Option<InstallSummary>,
}

fn patch_label(outcome: PatchOutcome) -> &'static str {
    match outcome {
        PatchOutcome::NotApplicable => "not-applicable",
        PatchOutcome::SdkMissing => "sdk-missing",
        PatchOutcome::AlreadyPatched => "already-patched",
        PatchOutcome::Patched => "patched",
    }
}

/// Serialize the report as TOML-shaped text.
fn serialize_report(report: &BootstrapReport) -> String {
    let mut out = String::new();

    out.push_str("# l4b bootstrap report\n\n");
    out.push_str("[meta]\n");
    out.push_str(&format!("timestamp = \"{}\"\n\n", report.timestamp));

    out.push_str("[runtime]\n");
    out.push_str(&format!("binary = \"{}\"\n", report.runtime.binary));
    out.push_str(&format!("path = \"{}\"\n", report.runtime.path.display()));
    match &report.runtime.installed_version {
        Some(version) => out.push_str(&format!("installed_version = \"{}\"\n", version)),
        None => out.push_str("installed_version = \"unknown\"\n"),
    }
    out.push_str(&format!(
        "minimum_version = \"{}\"\n",
        report.runtime.minimum_version
    ));
    out.push_str(&format!(
        "meets_minimum = {}\n\n",
        report.runtime.meets_minimum
    ));

    if let Some(patch) = report.patch {
        out.push_str("[toolchain]\n");
        out.push_str(&format!("outcome = \"{}\"\n\n", patch_label(patch)));
    }

    if let Some(ref install) = report.install {
        out.push_str("[packages]\n");
        out.push_str(&format!("initialized = {}\n", install.initialized));
        out.push_str(&format!(
            "primary_installed = {}\n",
            install.primary_installed
        ));
        out.push_str(&format!(
            "secondary_installed = {}\n",
            install.secondary_installed
        ));
        out.push_str(&format!("snapshot_taken = {}\n", install.snapshot_taken));
    }

    out
}

/// Write the report file, creating parent directories as needed.
pub fn write_report(report: &BootstrapReport, output_path: &Path) -> Result<()> {
    let content = serialize_report(report);

    let expanded = shellexpand::tilde(output_path.to_string_lossy().as_ref()).into_owned();
    let final_path = Path::new(&expanded);

    if let Some(parent) = final_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory: {}", parent.display()))?;
    }

    fs::write(final_path, content)
        .with_context(|| format!("Failed to write report to {}", final_path.display()))?;

    Ok(())
}

/// Print the report to stdout in human-readable form.
pub fn print_report(report: &BootstrapReport) {
    println!("🧪 l4b bootstrap report");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Generated: {}", report.timestamp);
    println!();

    print!("🔤 Runtime: ");
    match &report.runtime.installed_version {
        Some(version) if report.runtime.meets_minimum => {
            println!("✅ {} {} ({})", report.runtime.binary, version, report.runtime.path.display());
        }
        Some(version) => {
            println!(
                "⚠️  {} {} is below the supported minimum {}",
                report.runtime.binary, version, report.runtime.minimum_version
            );
        }
        None => {
            println!(
                "⚠️  {} found but version unknown (requires {})",
                report.runtime.binary, report.runtime.minimum_version
            );
        }
    }

    if let Some(patch) = report.patch {
        let line = match patch {
            PatchOutcome::NotApplicable => "⏭️  not applicable on this host",
            PatchOutcome::SdkMissing => "⚠️  skipped, SDK missing",
            PatchOutcome::AlreadyPatched => "✅ already patched",
            PatchOutcome::Patched => "✨ flags appended",
        };
        println!("🔧 Toolchain: {}", line);
    }

    if let Some(ref install) = report.install {
        println!(
            "📦 Packages: {} primary, {} domain{}",
            install.primary_installed,
            install.secondary_installed,
            if install.initialized {
                " (library initialized)"
            } else {
                ""
            }
        );
        if install.snapshot_taken {
            println!("🔒 Lockfile snapshot taken");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample_report() -> BootstrapReport {
        BootstrapReport {
            timestamp: "2026-08-07T12:00:00Z".to_string(),
            runtime: RuntimeCheck {
                binary: "Rscript".to_string(),
                path: PathBuf::from("/usr/local/bin/Rscript"),
                installed_version: Some("4.3.1".to_string()),
                minimum_version: "4.1.0".to_string(),
                meets_minimum: true,
            },
            patch: Some(PatchOutcome::Patched),
            install: Some(InstallSummary {
                initialized: true,
                primary_installed: 7,
                secondary_installed: 4,
                snapshot_taken: true,
            }),
        }
    }

    #[test]
    fn test_serialize_report_sections() {
        let toml_text = serialize_report(&sample_report());
        assert!(toml_text.contains("[meta]"));
        assert!(toml_text.contains("[runtime]"));
        assert!(toml_text.contains("outcome = \"patched\""));
        assert!(toml_text.contains("primary_installed = 7"));
        assert!(toml_text.contains("snapshot_taken = true"));
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/report.toml");

        write_report(&sample_report(), &output).unwrap();
        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("meets_minimum = true"));
    }
}
