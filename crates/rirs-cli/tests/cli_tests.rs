//! Argument parsing and help output checks for the `rirs` binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_both_subcommands() {
    Command::cargo_bin("rirs")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("health"));
}

#[test]
fn chat_help_shows_the_web_toggle() {
    Command::cargo_bin("rirs")
        .unwrap()
        .args(["chat", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--web"))
        .stdout(predicate::str::contains("--provider"));
}

#[test]
fn version_flag_works() {
    Command::cargo_bin("rirs")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn web_toggle_conflicts_with_explicit_provider() {
    Command::cargo_bin("rirs")
        .unwrap()
        .args(["chat", "hello", "--web", "--provider", "gemini"])
        .assert()
        .failure();
}

#[test]
fn unknown_health_endpoint_is_rejected_locally() {
    Command::cargo_bin("rirs")
        .unwrap()
        .args(["health", "--endpoint", "bogus"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown endpoint: bogus"));
}
