//! End-to-end tests for the l4b binary.

use assert_cmd::Command;
use std::fs;
use std::path::Path;

const MISSING_RUNTIME_MANIFEST: &str = r##"
[bootstrap.runtime]
binary = "no-such-runtime-xyz"
minimum_version = "4.1.0"
install_hint = "https://example.invalid/runtime"

[bootstrap.toolchain]
os_family = "macos"
sdk_path = "/definitely/not/a/real/sdk"
config_dir = "~/.R"
config_file = "Makevars"
marker = "# managed block"
remediation = "xcode-select --install"

[bootstrap.packages]
primary = ["survival"]
secondary = []
"##;

fn l4b() -> Command {
    Command::cargo_bin("l4b").unwrap()
}

fn write_manifest(dir: &Path, content: &str) {
    fs::write(dir.join("l4b.toml"), content).unwrap();
}

#[test]
fn help_mentions_subcommands() {
    let output = l4b().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("run"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("patch"));
}

#[test]
fn missing_manifest_is_actionable() {
    let project = tempfile::tempdir().unwrap();

    let output = l4b()
        .current_dir(project.path())
        .arg("check")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("manifest not found"));
}

#[test]
fn missing_runtime_fails_before_any_side_effect() {
    let project = tempfile::tempdir().unwrap();
    let home = tempfile::tempdir().unwrap();
    let empty_bin = tempfile::tempdir().unwrap();
    write_manifest(project.path(), MISSING_RUNTIME_MANIFEST);

    let output = l4b()
        .current_dir(project.path())
        .env("HOME", home.path())
        .env("PATH", empty_bin.path())
        .arg("run")
        .arg("--print")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no-such-runtime-xyz"));
    assert!(stderr.contains("4.1.0"));
    assert!(stderr.contains("example.invalid"));

    // Nothing was patched, installed or reported.
    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
    assert!(!project.path().join("renv.lock").exists());
}

#[cfg(unix)]
#[test]
fn check_reports_runtime_version() {
    use std::os::unix::fs::PermissionsExt;

    let project = tempfile::tempdir().unwrap();
    let bin_dir = tempfile::tempdir().unwrap();

    let exe = bin_dir.path().join("stub-runtime");
    fs::write(
        &exe,
        "#!/bin/sh\necho \"R scripting front-end version 4.3.1 (2023-06-16)\"\n",
    )
    .unwrap();
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();

    let manifest = MISSING_RUNTIME_MANIFEST.replace("no-such-runtime-xyz", "stub-runtime");
    write_manifest(project.path(), &manifest);

    let output = l4b()
        .current_dir(project.path())
        .env("PATH", bin_dir.path())
        .arg("check")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("4.3.1"));
}
