use assert_cmd::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

/// Runs the binary from an empty directory with an explicit config file so the
/// repository's own `config/config.yaml` is not picked up.
fn stepcapture(dir: &tempfile::TempDir, config: &str) -> Command {
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, config).expect("write config");
    let bin = assert_cmd::cargo::cargo_bin!("stepcapture");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--config", config_path.to_str().unwrap()]);
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn record_login_scenario_emits_expected_steps() {
    let dir = tempfile::tempdir().unwrap();
    let login = fixture("login.yaml");
    let value = json_stdout(stepcapture(&dir, "{}").args([
        "--output",
        "json",
        "record",
        login.to_str().unwrap(),
    ]));

    assert_eq!(value["steps_produced"].as_u64(), Some(4));
    assert_eq!(value["final_mode"].as_str(), Some("idle"));

    let steps: Vec<Value> = value["entries"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|entry| entry["messages"].as_array())
        .flatten()
        .filter(|message| message["type"] == "step_produced")
        .map(|message| message["payload"].clone())
        .collect();
    assert_eq!(steps.len(), 4);

    assert_eq!(steps[0]["variant"], "navigate");
    assert_eq!(steps[0]["url"], "https://app.example.com/login");

    assert_eq!(steps[1]["commandKey"], "setValue");
    assert_eq!(steps[1]["text"], "me@example.com");
    assert_eq!(steps[1]["primaryLocator"], r#"input[name="email"]"#);

    assert_eq!(steps[2]["commandKey"], "selectByVisibleText");
    assert_eq!(steps[2]["optionValue"], "Asia");
    assert_eq!(steps[2]["primaryLocator"], r#"select[aria-label="Region"]"#);

    assert_eq!(steps[3]["variant"], "click");
    assert_eq!(steps[3]["primaryLocator"], "button.btn.primary");

    let pick = &value["entries"][11];
    assert_eq!(pick["intercepted"], true);
    let pick_messages = pick["messages"].as_array().unwrap();
    let exits = pick_messages
        .iter()
        .filter(|m| m["type"] == "set_picking" && m["payload"] == false)
        .count();
    assert_eq!(exits, 1);
    // the reserved panel button is ignored
    assert!(value["entries"][8].get("messages").is_none());
}

#[test]
fn record_human_output_summarises_session() {
    let dir = tempfile::tempdir().unwrap();
    let login = fixture("login.yaml");
    let assert = stepcapture(&dir, "{}")
        .args(["record", login.to_str().unwrap()])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("#11 activate(submit) [intercepted]"));
    assert!(stdout.contains("-> step click [click] locator=button.btn.primary"));
    assert!(stdout.contains("-> highlight at (40, 120) 96x32"));
    assert!(stdout.contains("4 step(s) produced, final mode: idle"));
}

#[test]
fn abandoned_edit_produces_no_step() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = fixture("abandoned_edit.json");
    let value = json_stdout(stepcapture(&dir, "{}").args([
        "--output",
        "json",
        "record",
        "--steps-only",
        scenario.to_str().unwrap(),
    ]));
    assert_eq!(value, Value::Array(Vec::new()));
}

#[test]
fn configured_step_defaults_reach_steps() {
    let dir = tempfile::tempdir().unwrap();
    let login = fixture("login.yaml");
    let value = json_stdout(
        stepcapture(&dir, "steps:\n  timeout_ms: 1234\n  scope_hint: frame:login\n").args([
            "--output",
            "json",
            "record",
            "--steps-only",
            login.to_str().unwrap(),
        ]),
    );
    let steps = value.as_array().unwrap();
    assert_eq!(steps.len(), 4);
    for step in steps {
        assert_eq!(step["timeoutMs"], 1234);
        assert_eq!(step["scopeHint"], "frame:login");
    }
}

#[test]
fn unknown_event_reference_fails() {
    let dir = tempfile::tempdir().unwrap();
    let scenario = dir.path().join("broken.yaml");
    std::fs::write(
        &scenario,
        "document: { tag: body }\nevents:\n  - set_recording: true\n  - focus_in: ghost\n",
    )
    .unwrap();
    let assert = stepcapture(&dir, "{}")
        .args(["record", scenario.to_str().unwrap()])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("unknown node 'ghost'"));
}
