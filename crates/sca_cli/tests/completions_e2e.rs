//! End-to-end tests for the `sca completions` command.

use assert_cmd::Command;
use predicates::prelude::*;

fn sca() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sca"))
}

#[test]
fn bash_completions() {
    sca()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn zsh_completions() {
    sca()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compdef"));
}

#[test]
fn fish_completions() {
    sca()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn invalid_shell_fails() {
    sca().args(["completions", "tcsh"]).assert().failure();
}
