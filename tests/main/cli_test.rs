//! CLI contract tests.

use std::fs;

use assert_cmd::Command;

fn chatview(config_toml: &str) -> (tempfile::TempDir, Command) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, config_toml).expect("write config");

    let mut cmd = Command::cargo_bin("chatview").expect("binary should build");
    cmd.arg("--config").arg(&config_path).env("RUST_LOG", "off");
    (dir, cmd)
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn preview_prints_description_and_thumbnail() {
    let (dir, mut cmd) = chatview("[server]\nurl = \"https://chat.example.com\"\n");
    let message_path = dir.path().join("message.json");
    fs::write(
        &message_path,
        r#"{
            "_id": "m1",
            "msg": "",
            "ts": "2024-05-17T14:42:00Z",
            "u": { "username": "grace" },
            "attachments": [{ "image_url": "/file-upload/cat.png" }]
        }"#,
    )
    .expect("write message");

    let output = cmd
        .arg("preview")
        .arg(&message_path)
        .args(["--user-id", "u1", "--token", "t1"])
        .output()
        .expect("run");
    let json = stdout_json(&output);

    assert_eq!(json["description"], "Image");
    assert_eq!(json["author"], "grace");
    assert_eq!(
        json["thumbnail"],
        "https://chat.example.com/file-upload/cat.png?rc_uid=u1&rc_token=t1"
    );
}

#[test]
fn reporting_applies_toggles() {
    let (_dir, mut cmd) = chatview("");
    let output = cmd
        .args(["reporting", "--crash", "false", "--event", "se_log_out"])
        .output()
        .expect("run");
    let json = stdout_json(&output);

    assert_eq!(json["crash_reporting"], false);
    assert_eq!(json["analytics_reporting"], true);
    assert_eq!(json["analytics_available"], true);
}

#[test]
fn restricted_build_reports_no_analytics() {
    let (_dir, mut cmd) = chatview("[build]\nvariant = \"restricted\"\n");
    let output = cmd.arg("reporting").output().expect("run");
    let json = stdout_json(&output);

    assert_eq!(json["variant"], "restricted");
    assert_eq!(json["analytics_available"], false);
}

#[test]
fn settings_lists_rows() {
    let (_dir, mut cmd) = chatview("[build]\nvariant = \"restricted\"\n");
    let output = cmd.arg("settings").output().expect("run");
    let json = stdout_json(&output);

    let items = json["items"].as_array().expect("items array");
    assert!(items.iter().any(|i| i == "Logout"));
    assert!(!items.iter().any(|i| i == "Review_this_app"));
    assert_eq!(
        json["share_link"],
        "https://f-droid.org/en/packages/chat.rocket.android"
    );
}
