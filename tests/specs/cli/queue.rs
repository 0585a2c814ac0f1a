// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `tj queue`, `tj sync`, `tj upload` and `tj status` while offline.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tj(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tj");
    cmd.env("TJ_STATE_DIR", temp.path())
        .env_remove("TJ_SERVER_URL")
        .env_remove("TJ_LOG")
        .arg("--offline");
    cmd
}

fn queue_json(temp: &TempDir) -> Vec<serde_json::Value> {
    let output = tj(temp).args(["queue", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn queue_starts_empty() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout("Queue is empty\n");
    assert!(queue_json(&temp).is_empty());
}

#[test]
fn queue_lists_actions_in_order() {
    let temp = TempDir::new().unwrap();
    tj(&temp).args(["new", "Kyoto"]).assert().success();
    tj(&temp).args(["new", "Osaka"]).assert().success();
    tj(&temp).args(["rm", "srv-1"]).assert().success();

    tj(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("3 pending actions:"));

    let actions = queue_json(&temp);
    let kinds: Vec<_> = actions.iter().map(|a| a["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, ["CREATE", "CREATE", "DELETE"]);
    assert_eq!(actions[0]["payload"]["title"], "Kyoto");
    assert_eq!(actions[1]["payload"]["title"], "Osaka");
    assert_eq!(actions[2]["method"], "DELETE");
    assert!(actions[2]["payload"].is_null());
    assert!(actions[0]["enqueuedAt"].is_string());
}

#[test]
fn queue_survives_between_invocations() {
    let temp = TempDir::new().unwrap();
    tj(&temp).args(["new", "Kyoto"]).assert().success();
    assert_eq!(queue_json(&temp).len(), 1);
    assert!(temp.path().join("store.db").exists());
}

#[test]
fn sync_offline_sends_nothing() {
    let temp = TempDir::new().unwrap();
    tj(&temp).args(["new", "Kyoto"]).assert().success();

    tj(&temp)
        .arg("sync")
        .assert()
        .success()
        .stdout("synced: 0, failed: 0\n");
    assert_eq!(queue_json(&temp).len(), 1);
}

#[test]
fn sync_json_report() {
    let temp = TempDir::new().unwrap();
    let output = tj(&temp).args(["sync", "-o", "json"]).output().unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["synced"], 0);
    assert_eq!(report["failed"], 0);
    assert_eq!(report["reconciled"], serde_json::json!([]));
}

#[test]
fn upload_offline_fails() {
    let temp = TempDir::new().unwrap();
    let image = temp.path().join("cover.jpg");
    std::fs::write(&image, b"jpeg").unwrap();

    tj(&temp)
        .arg("upload")
        .arg(&image)
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: offline"));
}

#[test]
fn upload_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .args(["upload", "/definitely/not/here.jpg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn status_offline() {
    let temp = TempDir::new().unwrap();
    tj(&temp).args(["new", "Kyoto"]).assert().success();

    tj(&temp)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("(offline)"))
        .stdout(predicate::str::contains("pending: 1"));
}
