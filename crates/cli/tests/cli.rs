//! End-to-end tests for the `hydrator` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const STREAM_NODE: &str = r#"{
  "id": "Stream-1",
  "name": "Stream",
  "type": "batchsource",
  "properties": { "format": "csv" },
  "outputSchema": "{\"type\":\"record\",\"name\":\"etlSchemaBody\",\"fields\":[{\"name\":\"price\",\"type\":[\"double\"]}]}",
  "_backendProperties": {
    "name": { "name": "name", "description": "Stream name", "required": true },
    "format": { "name": "format", "description": "", "required": false },
    "schema": { "name": "schema", "description": "", "required": false }
  }
}"#;

const STREAM_WIDGET: &str = r#"{
  "groups": {
    "position": ["general"],
    "general": { "display": "General", "position": ["format"], "fields": {} }
  },
  "outputschema": { "schema": { "property-watch": "format" } }
}"#;

fn project() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::create_dir_all(dir.path().join(".hydrator/widgets")).expect("Failed to create widgets dir");
    std::fs::write(
        dir.path().join(".hydrator/widgets/Stream-batchsource.json"),
        STREAM_WIDGET,
    )
    .expect("Failed to write widget");
    std::fs::write(dir.path().join("node.json"), STREAM_NODE).expect("Failed to write node");
    dir
}

fn hydrator(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("hydrator").expect("Binary should build");
    cmd.current_dir(root);
    cmd
}

#[test]
fn test_reconcile_with_widget_config() {
    let dir = project();

    hydrator(dir.path())
        .args(["reconcile", "--node", "node.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "general""#))
        .stdout(predicate::str::contains(r#""name": "generic""#))
        .stdout(predicate::str::contains(r#""key": "schema""#));
}

#[test]
fn test_reconcile_without_widget_config() {
    let dir = project();
    std::fs::remove_dir_all(dir.path().join(".hydrator")).expect("Failed to remove config");

    hydrator(dir.path())
        .args(["reconcile", "--node", "node.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No widget configuration found"))
        .stdout(predicate::str::contains(r#""name": "generic""#));
}

#[test]
fn test_schema_normalizes_stored_schema() {
    let dir = project();

    hydrator(dir.path())
        .args(["schema", "--node", "node.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"name":"price","type":["double","null"]}"#,
        ));
}

#[test]
fn test_validate_reports_duplicates() {
    let dir = project();
    std::fs::write(
        dir.path().join("dup.json"),
        r#"{"fields":[{"name":"a","type":"string"},{"name":"a","type":"int"}]}"#,
    )
    .expect("Failed to write schema");

    hydrator(dir.path())
        .args(["validate", "--schema", "dup.json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "There are two or more fields with the same name.",
        ));
}

#[test]
fn test_validate_accepts_unique_fields() {
    let dir = project();
    std::fs::write(
        dir.path().join("ok.json"),
        r#"{"fields":[{"name":"a","type":"string"}]}"#,
    )
    .expect("Failed to write schema");

    hydrator(dir.path())
        .args(["validate", "--schema", "ok.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Schema is valid"));
}

#[test]
fn test_edge_prepends_stream_fields() {
    let dir = project();
    std::fs::write(dir.path().join("nodes.json"), format!("[{STREAM_NODE}]"))
        .expect("Failed to write nodes");

    hydrator(dir.path())
        .args(["edge", "--nodes", "nodes.json", "--source", "Stream-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "ts""#))
        .stdout(predicate::str::contains(r#""type": "map<string, string>""#))
        .stdout(predicate::str::contains(r#""name": "price""#));
}

#[test]
fn test_edge_unknown_source_fails() {
    let dir = project();
    std::fs::write(dir.path().join("nodes.json"), "[]").expect("Failed to write nodes");

    hydrator(dir.path())
        .args(["edge", "--nodes", "nodes.json", "--source", "Missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing"));
}

#[test]
fn test_reconcile_fallback_is_logged() {
    let dir = project();
    std::fs::remove_dir_all(dir.path().join(".hydrator")).expect("Failed to remove config");

    hydrator(dir.path())
        .env("RUST_LOG", "debug")
        .args(["reconcile", "--node", "node.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("reconciling without widget configuration"));
}
