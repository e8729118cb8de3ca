use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::process::Command;

fn stepcapture(dir: &tempfile::TempDir) -> Command {
    let bin = assert_cmd::cargo::cargo_bin!("stepcapture");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output")
}

#[test]
fn commands_lists_whole_catalogue() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of(stepcapture(&dir).args(["--output", "json", "commands"]));
    let value: Value = serde_json::from_str(&stdout).unwrap();
    let commands = value.as_array().unwrap();
    assert_eq!(commands.len(), 41);
    let clear = commands
        .iter()
        .find(|c| c["key"] == "clearValue")
        .expect("clearValue listed");
    assert_eq!(clear["produces"], "typeText");
    assert_eq!(clear["defaultFields"]["text"], "");
    assert_eq!(clear["elementScoped"], true);
}

#[test]
fn commands_filter_by_variant() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of(stepcapture(&dir).args(["commands", "--variant", "selectOption"]));
    assert!(stdout.contains("selectByVisibleText"));
    assert!(stdout.contains("selectByIndex"));
    assert!(!stdout.contains("setValue"));
    assert!(stdout.contains("3 command(s)"));
}

#[test]
fn commands_reject_unknown_variant() {
    let dir = tempfile::tempdir().unwrap();
    stepcapture(&dir)
        .args(["commands", "--variant", "teleport"])
        .assert()
        .failure();
}

#[test]
fn locate_lists_candidates_with_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("page.yaml");
    std::fs::write(
        &scenario,
        r#"
document:
  tag: body
  children:
    - tag: input
      ref: search
      attrs: { data-testid: search-box, id: q, name: q, aria-label: Search, class: field }
    - tag: div
      children:
        - tag: span
          ref: orphan
        - tag: span
"#,
    )
    .unwrap();

    let stdout = stdout_of(stepcapture(&dir).args([
        "--output",
        "json",
        "locate",
        scenario.to_str().unwrap(),
        "--target",
        "search",
    ]));
    let value: Value = serde_json::from_str(&stdout).unwrap();
    let candidates = value["candidates"].as_array().unwrap();
    let selectors: Vec<&str> = candidates
        .iter()
        .map(|c| c["selector"].as_str().unwrap())
        .collect();
    assert_eq!(
        selectors,
        vec![
            r#"[data-testid="search-box"]"#,
            "#q",
            r#"input[name="q"]"#,
            r#"input[aria-label="Search"]"#,
            "input.field",
        ]
    );
    assert_eq!(candidates[0]["strategy"], "test-id");

    let stdout = stdout_of(stepcapture(&dir).args([
        "locate",
        scenario.to_str().unwrap(),
        "--target",
        "orphan",
    ]));
    assert_eq!(
        stdout.trim(),
        "1. body > div > span:nth-of-type(1)  (path)"
    );
}

#[test]
fn config_prints_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of(stepcapture(&dir).args(["--output", "json", "config"]));
    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["locator"]["max_candidates"], 5);
    assert_eq!(value["capture"]["reserved_container_id"], "__stepcapture-root");
    assert_eq!(value["steps"]["timeout_ms"], 5000);
}

#[test]
fn repository_sample_config_parses() {
    let sample = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.yaml");
    let dir = tempfile::tempdir().unwrap();
    let stdout = stdout_of(stepcapture(&dir).args([
        "--output",
        "yaml",
        "--config",
        sample.to_str().unwrap(),
        "config",
    ]));
    assert!(stdout.contains("max_candidates: 5"));
    assert!(stdout.contains("outline_element_id: __stepcapture-outline"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    stepcapture(&dir)
        .args(["--config", "nope.yaml", "config"])
        .assert()
        .failure();
}
