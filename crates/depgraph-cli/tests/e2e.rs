//! End-to-end tests for the `dg` binary.
//!
//! Each test writes a manifest into a temp dir and runs `dg` there with the
//! user config dir pointed at the same temp dir, so config lookup sees only
//! what the test puts in place.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const SERVICE_JSON: &str = r#"{
  "web": ["api", "ui"],
  "api": ["db", "auth"],
  "ui": ["api"],
  "auth": ["db"]
}"#;

const CYCLIC_JSON: &str = r#"{
  "a": ["b"],
  "b": ["c"],
  "c": ["a"],
  "d": ["d"]
}"#;

fn dg_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dg"));
    cmd.current_dir(dir);
    cmd.env("XDG_CONFIG_HOME", dir);
    cmd.env("HOME", dir);
    cmd.env("DEPGRAPH_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn dg_pretty_cmd(dir: &Path) -> Command {
    let mut cmd = dg_cmd(dir);
    cmd.env("FORMAT", "pretty");
    cmd
}

fn write_manifest(dir: &TempDir, name: &str, content: &str) {
    std::fs::write(dir.path().join(name), content).expect("manifest must be written");
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = dg_cmd(dir)
        .args(args)
        .arg("--json")
        .output()
        .expect("dg should not crash");
    assert!(
        output.status.success(),
        "dg {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_json_reports_summary() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    let json = run_json(dir.path(), &["analyze", "deps.json"]);
    assert_eq!(json["node_count"], 5);
    assert_eq!(json["edge_count"], 6);
    assert_eq!(json["root_nodes"], serde_json::json!(["web"]));
    assert_eq!(json["leaf_nodes"], serde_json::json!(["db"]));
    assert_eq!(json["max_depth"], 2);
    assert_eq!(json["has_cycles"], false);
}

#[test]
fn analyze_pretty_verbose_lists_cycles() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", CYCLIC_JSON);

    dg_pretty_cmd(dir.path())
        .args(["analyze", "deps.json", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency Graph Analysis"))
        .stdout(predicate::str::contains("2 detected"))
        .stdout(predicate::str::contains("Cycle 2: d → d"));
}

#[test]
fn project_config_enables_verbose() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", CYCLIC_JSON);
    write_manifest(&dir, "depgraph.toml", "[analysis]\nverbose = true\n");

    dg_cmd(dir.path())
        .args(["--format", "text", "analyze", "deps.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cycle d -> d"));
}

#[test]
fn toml_manifest_is_accepted() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(
        &dir,
        "deps.toml",
        "app = [\"auth\", \"db\"]\n\n[auth]\nversion = \"2.1\"\ndeps = [\"crypto\"]\n",
    );

    let json = run_json(dir.path(), &["analyze", "deps.toml"]);
    assert_eq!(json["node_count"], 4);
    assert_eq!(json["leaf_nodes"], serde_json::json!(["db", "crypto"]));
}

// ---------------------------------------------------------------------------
// cycles
// ---------------------------------------------------------------------------

#[test]
fn cycles_json_lists_closed_paths() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", CYCLIC_JSON);

    let json = run_json(dir.path(), &["cycles", "deps.json"]);
    assert_eq!(json["count"], 2);
    assert_eq!(
        json["cycles"],
        serde_json::json!([["a", "b", "c", "a"], ["d", "d"]])
    );
}

#[test]
fn cycles_pretty_on_acyclic_graph() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    dg_pretty_cmd(dir.path())
        .args(["detect-cycles", "deps.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No circular dependencies found."));
}

// ---------------------------------------------------------------------------
// stats
// ---------------------------------------------------------------------------

#[test]
fn stats_json_has_topological_order() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    let json = run_json(dir.path(), &["stats", "deps.json", "-v"]);
    assert_eq!(
        json["topological_order"],
        serde_json::json!(["web", "ui", "api", "auth", "db"])
    );
    assert_eq!(json["direct_deps"]["api"], 2);
    assert_eq!(json["direct_deps"]["db"], 0);
}

#[test]
fn stats_on_cyclic_graph_succeeds_without_order() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", CYCLIC_JSON);

    let json = run_json(dir.path(), &["stats", "deps.json"]);
    assert!(json["topological_order"].is_null());
    assert_eq!(json["cycle_count"], 2);
}

// ---------------------------------------------------------------------------
// scc / depth / deps
// ---------------------------------------------------------------------------

#[test]
fn scc_json_separates_clusters() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", CYCLIC_JSON);

    let json = run_json(dir.path(), &["scc", "deps.json"]);
    assert_eq!(json["component_count"], 2);
    assert_eq!(json["clusters"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["independent"], 1);
}

#[test]
fn depth_uses_configured_root() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);
    write_manifest(&dir, "depgraph.toml", "[analysis]\nroot = \"api\"\n");

    let json = run_json(dir.path(), &["depth", "deps.json"]);
    assert_eq!(json["root"], "api");
    assert_eq!(json["depths"]["api"], 0);
    assert_eq!(json["depths"]["auth"], 1);
    assert!(json["depths"].get("web").is_none());
}

#[test]
fn depth_flag_overrides_config() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);
    write_manifest(&dir, "depgraph.toml", "[analysis]\nroot = \"api\"\n");

    let json = run_json(dir.path(), &["depth", "deps.json", "--root", "ui"]);
    assert_eq!(json["root"], "ui");
    assert_eq!(json["depths"]["db"], 2);
}

#[test]
fn deps_text_lists_sorted_names() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    dg_cmd(dir.path())
        .args(["--format", "text", "deps", "deps.json", "ui"])
        .assert()
        .success()
        .stdout("api\nauth\ndb\n");
}

#[test]
#[cfg(target_os = "linux")]
fn user_config_output_is_read_from_temp_home() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);
    std::fs::create_dir_all(dir.path().join("depgraph")).expect("config dir");
    write_manifest(&dir, "depgraph/config.toml", "output = \"json\"\n");

    let output = dg_cmd(dir.path())
        .args(["deps", "deps.json", "ui"])
        .output()
        .expect("dg should not crash");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["count"], 3);
}

#[test]
fn missing_user_config_falls_back_to_text() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    dg_cmd(dir.path())
        .args(["deps", "deps.json", "ui"])
        .assert()
        .success()
        .stdout("api\nauth\ndb\n");
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn unknown_node_fails_with_code() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    let output = dg_cmd(dir.path())
        .args(["deps", "deps.json", "ghost", "--json"])
        .output()
        .expect("dg should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let json_end = stderr.find("\n}").map_or(stderr.len(), |i| i + 2);
    let json: Value = serde_json::from_str(&stderr[..json_end]).expect("JSON error on stderr");
    assert_eq!(json["error"]["error_code"], "E2001");
    assert!(
        json["error"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("ghost"))
    );
}

#[test]
fn unknown_depth_root_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", SERVICE_JSON);

    dg_pretty_cmd(dir.path())
        .args(["depth", "deps.json", "--root", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("node 'ghost' not in graph"));
}

#[test]
fn missing_manifest_fails() {
    let dir = TempDir::new().expect("tempdir");

    dg_pretty_cmd(dir.path())
        .args(["analyze", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn malformed_manifest_fails() {
    let dir = TempDir::new().expect("tempdir");
    write_manifest(&dir, "deps.json", "[1, 2, 3]");

    dg_pretty_cmd(dir.path())
        .args(["cycles", "deps.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

// ---------------------------------------------------------------------------
// completions
// ---------------------------------------------------------------------------

#[test]
fn completions_emit_script() {
    let dir = TempDir::new().expect("tempdir");

    dg_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dg"));
}
