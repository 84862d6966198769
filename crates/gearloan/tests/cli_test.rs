//! Integration tests for the `gearloan` CLI binary.
//!
//! Argument parsing, completions, and config handling run against an
//! isolated config directory. Store-backed commands run against a
//! wiremock record store.
#![allow(clippy::unwrap_used)]

use std::path::Path;
use std::process::Output;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

const EXEC_PATH: &str = "/macros/s/test-deployment/exec";
const READY: &str = "พร้อมให้ยืม";
const BORROWED: &str = "ถูกยืม";

/// Build a command for the `gearloan` binary with env isolation.
///
/// Clears every `GEARLOAN_*` variable the CLI reads and points the config
/// directories at `home`, so tests never touch the real configuration.
fn gearloan_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("gearloan");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("GEARLOAN_PROFILE")
        .env_remove("GEARLOAN_ENDPOINT")
        .env_remove("GEARLOAN_OUTPUT")
        .env_remove("GEARLOAN_INSECURE")
        .env_remove("GEARLOAN_TIMEOUT")
        .env_remove("GEARLOAN_DEFAULT_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn ready(id: &str, name: &str) -> Value {
    json!({ "id": id, "name": name, "type": "AV", "image": "", "status": READY })
}

fn borrowed(id: &str, name: &str, who: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "type": "Photo",
        "image": "",
        "status": BORROWED,
        "borrower": who,
        "borrowDate": "2024-01-01"
    })
}

/// First GET answers `first`, every later GET answers `then`.
async fn mount_catalog(server: &MockServer, first: Value, then: Value) {
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(EXEC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(then))
        .mount(server)
        .await;
}

async fn expect_no_writes(server: &MockServer) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

/// Run the binary against `server` off the async runtime.
async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let endpoint = format!("{}{EXEC_PATH}", server.uri());
    let args: Vec<String> = args.iter().map(|a| (*a).to_owned()).collect();
    tokio::task::spawn_blocking(move || {
        let home = tempfile::tempdir().unwrap();
        gearloan_cmd(home.path())
            .arg("--endpoint")
            .arg(endpoint)
            .args(args)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = tempfile::tempdir().unwrap();
    gearloan_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("equipment")
            .and(predicate::str::contains("borrow"))
            .and(predicate::str::contains("return"))
            .and(predicate::str::contains("browse")),
    );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    gearloan_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gearloan"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    gearloan_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    gearloan_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path()).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("foobar"), "Expected the bad subcommand echoed:\n{text}");
}

#[test]
fn test_list_without_config() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path()).arg("list").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(text.contains("config"), "Expected a config hint:\n{text}");
}

#[test]
fn test_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path())
        .args(["--profile", "lab", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("lab"));
}

#[test]
fn test_borrow_without_name_needs_terminal() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path())
        .args(["--endpoint", "http://127.0.0.1:1/exec", "borrow", "E1"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--name"));
}

#[test]
fn test_return_without_yes_needs_terminal() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path())
        .args(["--endpoint", "http://127.0.0.1:1/exec", "return", "E2"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("--yes"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_set_then_profiles() {
    let home = tempfile::tempdir().unwrap();

    gearloan_cmd(home.path())
        .args(["config", "set", "endpoint", "https://store.example/exec"])
        .assert()
        .success();
    gearloan_cmd(home.path())
        .args(["--profile", "annex", "config", "set", "ready-label", "Ready"])
        .assert()
        .success();

    gearloan_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("annex\ndefault *\n");

    gearloan_cmd(home.path())
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("https://store.example/exec")
                .and(predicate::str::contains("\"ready_label\": \"Ready\"")),
        );
}

#[test]
fn test_config_set_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path())
        .args(["config", "set", "endpoint", "ftp://store.example"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let output = gearloan_cmd(home.path())
        .args(["config", "set", "colour", "red"])
        .output()
        .unwrap();
    assert!(combined_output(&output).contains("Valid keys"));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    let output = gearloan_cmd(home.path())
        .args(["config", "use", "nowhere"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("nowhere"));
}

#[test]
fn test_config_path_under_config_home() {
    let home = tempfile::tempdir().unwrap();
    gearloan_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Store-backed commands ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_list_filters_and_formats() {
    let server = MockServer::start().await;
    let items = json!([
        ready("E1", "Projector"),
        borrowed("E2", "Tripod", "Bob"),
        ready("E3", "Portable speaker")
    ]);
    mount_catalog(&server, items.clone(), items).await;

    let output = run_against(&server, &["list", "--status", "ready", "-o", "plain"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "E1\nE3\n");

    let output = run_against(&server, &["list", "-s", "PRO", "-o", "json-compact"]).await;
    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], "E1");

    let output = run_against(&server, &["list", "--status", "borrowed"]).await;
    let table = String::from_utf8_lossy(&output.stdout);
    assert!(table.contains("Tripod") && table.contains("Bob"));
    assert!(!table.contains("Projector"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_show_missing_item() {
    let server = MockServer::start().await;
    let items = json!([ready("E1", "Projector")]);
    mount_catalog(&server, items.clone(), items).await;

    let output = run_against(&server, &["show", "E9"]).await;
    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("E9"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_borrow_confirmed_by_readback() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!([ready("E1", "Projector")]),
        json!([borrowed("E1", "Projector", "Alice")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(EXEC_PATH))
        .and(body_json(json!({
            "action": "borrow",
            "equipmentId": "E1",
            "borrowerName": "Alice"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["borrow", "E1", "--name", "  Alice ", "-o", "json"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));

    let item: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(item["status"], "borrowed");
    assert_eq!(item["borrower"], "Alice");
    assert!(String::from_utf8_lossy(&output.stderr).contains("Item borrowed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_borrow_blank_name_sends_nothing() {
    let server = MockServer::start().await;
    let items = json!([ready("E1", "Projector")]);
    mount_catalog(&server, items.clone(), items).await;
    expect_no_writes(&server).await;

    let output = run_against(&server, &["borrow", "E1", "--name", "   "]).await;
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("borrower"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_borrow_of_borrowed_item_is_a_conflict() {
    let server = MockServer::start().await;
    let items = json!([borrowed("E2", "Tripod", "Bob")]);
    mount_catalog(&server, items.clone(), items).await;
    expect_no_writes(&server).await;

    let output = run_against(&server, &["borrow", "E2", "--name", "Alice"]).await;
    assert_eq!(output.status.code(), Some(6));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unconfirmed_borrow_fails() {
    let server = MockServer::start().await;
    // Someone else got there first.
    mount_catalog(
        &server,
        json!([ready("E1", "Projector")]),
        json!([borrowed("E1", "Projector", "Carol")]),
    )
    .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["borrow", "E1", "--name", "Alice"]).await;
    assert_eq!(output.status.code(), Some(6));
    assert!(combined_output(&output).contains("did not apply"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_return_with_yes() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        json!([borrowed("E2", "Tripod", "Bob")]),
        json!([ready("E2", "Tripod")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(EXEC_PATH))
        .and(body_json(json!({ "action": "return", "equipmentId": "E2" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_against(&server, &["--yes", "return", "E2", "-o", "plain"]).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "E2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_store_error_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let output = run_against(&server, &["list"]).await;
    assert_eq!(output.status.code(), Some(7));
    assert!(combined_output(&output).contains("HTTP 500"));
}
