// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `tj new`, `tj list` and `tj rm` without a reachable server.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use yare::parameterized;

/// `tj` bound to a private state directory, forced offline.
fn tj(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tj");
    cmd.env("TJ_STATE_DIR", temp.path())
        .env_remove("TJ_SERVER_URL")
        .env_remove("TJ_LOG")
        .arg("--offline");
    cmd
}

fn create_trip(temp: &TempDir, title: &str, opts: &[&str]) -> String {
    let output = tj(temp)
        .arg("new")
        .arg(title)
        .args(opts)
        .args(["-o", "id"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

// =============================================================================
// new
// =============================================================================

#[test]
fn new_offline_prints_local_id() {
    let temp = TempDir::new().unwrap();
    let id = create_trip(&temp, "Kyoto", &[]);
    assert!(id.starts_with("local-"), "unexpected id: {}", id);
}

#[test]
fn new_offline_text_mentions_queue() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .args(["new", "Kyoto", "-d", "Japan"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Queued local-"))
        .stdout(predicate::str::contains("Kyoto"));
}

#[test]
fn new_json_uses_wire_field_names() {
    let temp = TempDir::new().unwrap();
    let output = tj(&temp)
        .args([
            "new", "Kyoto", "--start", "2024-04-01", "--end", "2024-04-10", "-o", "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let trip: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trip["title"], "Kyoto");
    assert_eq!(trip["startDate"], "2024-04-01");
    assert_eq!(trip["endDate"], "2024-04-10");
}

#[test]
fn new_rejects_end_before_start() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .args(["new", "Kyoto", "--start", "2024-04-10", "--end", "2024-04-01"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error: invalid trip"));

    tj(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("Queue is empty"));
}

#[parameterized(
    slashes = { "2024/04/01" },
    impossible = { "2024-13-01" },
)]
fn new_rejects_malformed_date(date: &str) {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .args(["new", "Kyoto", "--start", date])
        .assert()
        .failure();
}

// =============================================================================
// list
// =============================================================================

#[test]
fn list_empty() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout("No trips\n");
}

#[test]
fn list_shows_pending_trips() {
    let temp = TempDir::new().unwrap();
    let id = create_trip(&temp, "Kyoto", &["-d", "Japan"]);

    tj(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("@ Japan"))
        .stdout(predicate::str::contains("[pending]"));
}

#[test]
fn list_ids_in_creation_order() {
    let temp = TempDir::new().unwrap();
    let first = create_trip(&temp, "Kyoto", &[]);
    let second = create_trip(&temp, "Osaka", &[]);

    tj(&temp)
        .args(["list", "-o", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{}\n{}\n", first, second)));
}

#[test]
fn list_json_is_an_array() {
    let temp = TempDir::new().unwrap();
    create_trip(&temp, "Kyoto", &[]);

    let output = tj(&temp).args(["list", "-o", "json"]).output().unwrap();
    let trips: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(trips.as_array().unwrap().len(), 1);
}

// =============================================================================
// rm
// =============================================================================

#[test]
fn rm_local_trip_withdraws_it() {
    let temp = TempDir::new().unwrap();
    let id = create_trip(&temp, "Kyoto", &[]);

    tj(&temp)
        .args(["rm", id.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("Withdrew pending trip {}\n", id)));

    tj(&temp).arg("list").assert().stdout("No trips\n");
    tj(&temp)
        .arg("queue")
        .assert()
        .stdout(predicate::str::contains("Queue is empty"));
}

#[test]
fn rm_server_trip_offline_is_queued() {
    let temp = TempDir::new().unwrap();
    tj(&temp)
        .args(["rm", "srv-42"])
        .assert()
        .success()
        .stdout("Queued delete of srv-42 (offline)\n");

    tj(&temp)
        .arg("queue")
        .assert()
        .success()
        .stdout(predicate::str::contains("DELETE /trips/srv-42"));
}
