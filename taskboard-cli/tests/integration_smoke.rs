//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_serve() {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Run the HTTP API server"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_serve_requires_database_url() {
    let mut cmd = Command::cargo_bin("taskboard").unwrap();
    cmd.arg("serve").env_remove("DATABASE_URL");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}
