//! Integration tests for the `geoimport` CLI binary.
//!
//! Argument parsing, help output, completions, configuration handling and
//! error exit codes, plus a few commands against a mock importer.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `geoimport` binary with env isolation.
///
/// Clears all `GEOIMPORT_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn geoimport_cmd_in(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("geoimport");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("GEOIMPORT_PROFILE")
        .env_remove("GEOIMPORT_URL")
        .env_remove("GEOIMPORT_WORKSPACE_URL")
        .env_remove("GEOIMPORT_USERNAME")
        .env_remove("GEOIMPORT_PASSWORD")
        .env_remove("GEOIMPORT_OUTPUT")
        .env_remove("GEOIMPORT_INSECURE")
        .env_remove("GEOIMPORT_TIMEOUT");
    cmd
}

fn geoimport_cmd() -> assert_cmd::Command {
    geoimport_cmd_in(Path::new("/tmp/geoimport-cli-test-nonexistent"))
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn rest_root(server: &MockServer) -> String {
    format!("{}/geoserver/rest/", server.uri())
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = geoimport_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    geoimport_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("GeoServer importer")
            .and(predicate::str::contains("imports"))
            .and(predicate::str::contains("tasks"))
            .and(predicate::str::contains("transforms"))
            .and(predicate::str::contains("workspaces")),
    );
}

#[test]
fn test_version_flag() {
    geoimport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("geoimport"));
}

#[test]
fn test_upload_requires_files() {
    let output = geoimport_cmd()
        .args(["tasks", "upload", "1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_element_must_be_layer_or_target() {
    let output = geoimport_cmd()
        .args(["tasks", "update", "1", "0", "--element", "style", "--data", "{}"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("layer"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    geoimport_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    geoimport_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("geoimport"));
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_config_explains_setup() {
    let output = geoimport_cmd().args(["imports", "list"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No import service configured"),
        "unexpected output:\n{text}"
    );
    assert!(text.contains("config init"));
}

#[test]
fn test_unknown_profile_is_reported() {
    let output = geoimport_cmd()
        .args(["-p", "nope", "imports", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("Profile 'nope' not found"));
}

#[test]
fn test_non_http_url_is_a_usage_error() {
    let output = geoimport_cmd()
        .args(["--url", "ftp://example.com/rest/", "imports", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("http(s)"));
}

#[test]
fn test_config_set_then_show() {
    let home = tempfile::tempdir().unwrap();

    geoimport_cmd_in(home.path())
        .args(["config", "set", "url", "http://gs.example/geoserver/rest/"])
        .assert()
        .success();
    geoimport_cmd_in(home.path())
        .args(["config", "set", "username", "admin"])
        .assert()
        .success();

    geoimport_cmd_in(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[profiles.default]")
                .and(predicate::str::contains("http://gs.example/geoserver/rest/"))
                .and(predicate::str::contains("username = \"admin\"")),
        );
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let output = geoimport_cmd_in(home.path())
        .args(["config", "set", "site", "x"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Valid keys"));
}

#[test]
fn test_presets_listed_from_config() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("geoimport");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("config.toml"),
        r#"
default_profile = "local"

[profiles.local]
url = "http://localhost:8080/geoserver/rest/"

[[presets]]
name = "cite shapefiles"
state = "READY"
data = { format = "Shapefile" }
transforms = [{ type = "AttributeRemapTransform", field = "d", target = "java.util.Date" }]
"#,
    )
    .unwrap();

    geoimport_cmd_in(home.path())
        .args(["presets", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("cite shapefiles\n");
}

// ── Against a mock importer ─────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_imports_list_plain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoserver/rest/imports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "imports": [
                { "id": 0, "state": "COMPLETE" },
                { "id": 1, "state": "PENDING" }
            ]
        })))
        .mount(&server)
        .await;

    geoimport_cmd()
        .args(["--url", &rest_root(&server), "imports", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("0\n1\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_import_targets_workspace() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/geoserver/rest/imports"))
        .and(body_json(json!({
            "import": { "targetWorkspace": { "workspace": { "name": "cite" } } }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "import": {
                "id": 7,
                "state": "PENDING",
                "targetWorkspace": { "workspace": { "name": "cite" } }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    geoimport_cmd()
        .args([
            "--url",
            &rest_root(&server),
            "imports",
            "create",
            "--workspace",
            "cite",
            "-o",
            "plain",
        ])
        .assert()
        .success()
        .stdout("7\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_import_exits_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geoserver/rest/imports/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No such import: 99"))
        .mount(&server)
        .await;

    let output = geoimport_cmd()
        .args(["--url", &rest_root(&server), "imports", "get", "99"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("No such import: 99"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/geoserver/rest/imports/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    geoimport_cmd()
        .args(["--url", &rest_root(&server), "--yes", "imports", "delete", "3"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Import 3 deleted"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_without_yes_refuses_when_not_interactive() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let output = geoimport_cmd()
        .args(["--url", &rest_root(&server), "imports", "delete", "3"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json_body_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let output = geoimport_cmd()
        .args([
            "--url",
            &rest_root(&server),
            "tasks",
            "update",
            "1",
            "0",
            "--data",
            "{not json",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("invalid JSON"));
}
