//! CLI integration tests using the real termbundle binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

fn termbundle_cmd() -> Command {
    Command::cargo_bin("termbundle").unwrap()
}

#[test]
fn test_help_output() {
    termbundle_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("expand"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("submit"));
}

#[test]
fn test_version_output() {
    termbundle_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("termbundle"));
}

#[test]
fn test_ingest_requires_files() {
    termbundle_cmd().arg("ingest").assert().failure();
}

#[test]
fn test_remove_requires_index() {
    termbundle_cmd().arg("remove").assert().failure();
}

#[test]
fn test_search_requires_connection() {
    termbundle_cmd()
        .args(["search", "--name", "diabetes"])
        .assert()
        .failure();
}

#[test]
fn test_search_unknown_connection_fails() {
    let ws = common::TestWorkspace::new();
    ws.write_file(
        "connections.yaml",
        "connections:\n  - name: local\n    base_url: http://localhost:8080/fhir\n",
    );

    termbundle_cmd()
        .current_dir(&ws.path)
        .args(["search", "--from", "staging", "--name", "diabetes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connection 'staging' not found"));
}

#[test]
fn test_missing_connections_file_fails() {
    let ws = common::TestWorkspace::new();

    termbundle_cmd()
        .current_dir(&ws.path)
        .args(["search", "--from", "local", "--name", "diabetes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Connections file not found"));
}

#[test]
fn test_submit_without_bundle_file_fails() {
    let ws = common::TestWorkspace::new();
    ws.write_file(
        "connections.yaml",
        "connections:\n  - name: local\n    base_url: http://localhost:8080/fhir\n",
    );

    termbundle_cmd()
        .current_dir(&ws.path)
        .args(["submit", "--to", "local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}
