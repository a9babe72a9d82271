//! End-to-end tests for global CLI behaviour (help, version, etc.).

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sca() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sca"));
    for var in ["SCA_TENANT", "SCA_USERNAME", "SCA_PASSWORD", "SCA_API_URL", "SCA_AC_URL"] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn help_shows_usage() {
    sca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SCA cloud service"));
}

#[test]
fn help_lists_commands() {
    sca()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("secure"))
        .stdout(predicate::str::contains("activity"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_format() {
    let output = sca().arg("--version").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.contains("sca") && stdout.chars().any(|c| c.is_ascii_digit()),
        "version should contain 'sca' and a version number"
    );
}

#[test]
fn no_args_shows_help() {
    sca().assert().failure().stderr(predicate::str::contains("Usage"));
}

#[test]
fn invalid_command_fails() {
    sca().arg("invalid-command").assert().failure();
}

#[test]
fn malformed_project_id_is_rejected() {
    sca().args(["scans", "not-a-uuid"]).assert().failure();
}

#[test]
fn scan_requires_a_source() {
    sca()
        .args(["scan", "3fa85f64-5717-4562-b3fc-2c963f66afa6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--archive").or(predicate::str::contains("--git")));
}

#[test]
fn missing_tenant_exits_with_error_code() {
    let dir = TempDir::new().unwrap();

    sca()
        .arg("projects")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--tenant"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(".sca.toml"), "timeout_secs = \"soon\"").unwrap();

    sca()
        .arg("projects")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse config"));
}
