use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const ENTITIES: &str = r#"{
  "savedProspects": [
    {
      "id": "A",
      "name": "Acme",
      "partners": [
        { "name": "Jane", "qualification": "CEO" },
        { "name": "Bob", "qualification": "CFO", "linkedCompanies": [{ "name": "Initech" }] }
      ]
    },
    { "id": "B", "name": "Globex", "partners": [{ "name": "Jane", "qualification": "Partner" }] },
    { "id": "C", "name": "Umbrella" }
  ]
}"#;

fn setup() -> (TempDir, std::path::PathBuf) {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("entities.json");
    fs::write(&path, ENTITIES).expect("write entities");
    (temp, path)
}

#[allow(deprecated)]
fn run(args: &[&str]) -> Value {
    let output = Command::cargo_bin("prospect-graph")
        .expect("binary")
        .env_remove("PROSPECT_GRAPH_CONFIG")
        .args(args)
        .output()
        .expect("command run");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn graph_prints_master_snapshot() {
    let (_temp, path) = setup();
    let body = run(&["--quiet", "graph", "--input", path.to_str().unwrap()]);

    let nodes = body["nodes"].as_array().expect("nodes");
    let keys: Vec<&str> = nodes.iter().filter_map(|n| n["key"].as_str()).collect();
    assert_eq!(keys, vec!["A", "B", "C", "Initech"]);
    assert_eq!(nodes[3]["type"], "external");
    assert_eq!(body["edges"].as_array().map(Vec::len), Some(2));
}

#[test]
fn ego_by_contact_with_layout() {
    let (_temp, path) = setup();
    let body = run(&[
        "ego",
        "--input",
        path.to_str().unwrap(),
        "--contact",
        "Jane",
        "--layout",
    ]);

    assert_eq!(body["focus"]["mode"], "contact");
    assert_eq!(body["edges"][0]["contact"], "Jane");
    assert_eq!(body["positions"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["positions"][0]["x"], 600.0);
}

#[test]
fn ego_for_isolated_entity_keeps_focal_node() {
    let (_temp, path) = setup();
    let body = run(&["ego", "--input", path.to_str().unwrap(), "--entity", "C"]);

    assert_eq!(body["nodes"].as_array().map(Vec::len), Some(1));
    assert!(body["edges"].as_array().is_some_and(Vec::is_empty));
    assert!(body.get("positions").is_none());
}

#[test]
fn view_defaults_to_first_entity() {
    let (_temp, path) = setup();
    let body = run(&["view", "--input", path.to_str().unwrap(), "--hover", "Jane"]);

    assert_eq!(body["state"], "graph");
    assert_eq!(body["focus"]["value"], "A");
    assert_eq!(body["dimmed_nodes"][0], "Initech");
}

#[test]
fn view_reports_missing_connections() {
    let (_temp, path) = setup();
    let body = run(&["view", "--input", path.to_str().unwrap(), "--entity", "C"]);

    assert_eq!(body["state"], "no_connections");
}

#[test]
fn view_with_empty_collection_is_no_data() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("empty.json");
    fs::write(&path, "[]").expect("write");

    let body = run(&["view", "--input", path.to_str().unwrap()]);
    assert_eq!(body["state"], "no_data");
}

#[test]
#[allow(deprecated)]
fn view_renders_markdown() {
    let (_temp, path) = setup();
    Command::cargo_bin("prospect-graph")
        .expect("binary")
        .args([
            "view",
            "--input",
            path.to_str().unwrap(),
            "--contact",
            "Bob",
            "--format",
            "markdown",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("contact Bob"))
        .stdout(predicate::str::contains("| `A` | `Initech` | Bob | linked_company |"));
}

#[test]
#[allow(deprecated)]
fn config_file_changes_canvas() {
    let (temp, path) = setup();
    let config = temp.path().join("graph.toml");
    fs::write(&config, "[layout]\nwidth = 100.0\nheight = 100.0\nradius_divisor = 2.0\n")
        .expect("write config");

    let body = run(&[
        "--config",
        config.to_str().unwrap(),
        "ego",
        "--input",
        path.to_str().unwrap(),
        "--entity",
        "A",
        "--layout",
    ]);
    assert_eq!(body["positions"][0]["x"], 50.0);
    assert_eq!(body["positions"][1]["x"], 100.0);
}

#[test]
#[allow(deprecated)]
fn unknown_focal_entity_fails() {
    let (_temp, path) = setup();
    Command::cargo_bin("prospect-graph")
        .expect("binary")
        .args(["view", "--input", path.to_str().unwrap(), "--entity", "Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown focal company"));
}
