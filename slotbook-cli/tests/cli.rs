//! End-to-end CLI tests.
//!
//! Each test runs the real binary against a temporary data directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SLOT: &str = "2030-01-01T10:00:00Z";

fn slotbook(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("slotbook").unwrap();
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.env_remove("SLOTBOOK_REQUESTER");
    cmd
}

/// Initializes a data directory and seeds one resource, returning its id.
fn seed(data_dir: &TempDir) -> String {
    slotbook(data_dir).arg("init").assert().success();

    let output = slotbook(data_dir)
        .args(["resource", "add", "--name", "Room A"])
        .assert()
        .success();
    String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string()
}

#[test]
fn init_reports_database_path() {
    let dir = TempDir::new().unwrap();
    slotbook(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("slotbook.db"));
}

#[test]
fn book_prints_reservation_id() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "alice", "--at", SLOT,
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\n$").unwrap());
}

#[test]
fn double_booking_exits_with_conflict_code() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "alice", "--at", SLOT,
        ])
        .assert()
        .success();

    slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "bob", "--at", SLOT,
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("slot conflict"));
}

#[test]
fn past_dated_booking_exits_with_validation_code() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    slotbook(&dir)
        .args([
            "book",
            "--resource",
            &resource,
            "--requester",
            "alice",
            "--at",
            "2001-01-01T10:00:00Z",
        ])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("validation error"));
}

#[test]
fn unknown_resource_exits_with_not_found_code() {
    let dir = TempDir::new().unwrap();
    slotbook(&dir).arg("init").assert().success();

    slotbook(&dir)
        .args(["book", "--resource", "404", "--requester", "alice", "--at", SLOT])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn cancel_rebook_round_trip() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    let output = slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "alice", "--at", SLOT,
        ])
        .assert()
        .success();
    let first_id = String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string();

    // A stranger cannot cancel it.
    slotbook(&dir)
        .args([
            "cancel", "--reservation", &first_id, "--requester", "mallory",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("forbidden"));

    // The owner can, and the slot becomes bookable again.
    slotbook(&dir)
        .args([
            "cancel", "--reservation", &first_id, "--requester", "alice",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));

    let output = slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "bob", "--at", SLOT,
        ])
        .assert()
        .success();
    let second_id = String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string();
    assert_ne!(second_id, first_id);
}

#[test]
fn confirm_then_list_as_json() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    let output = slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "alice", "--at", SLOT,
        ])
        .assert()
        .success();
    let id = String::from_utf8(output.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string();

    slotbook(&dir)
        .args(["confirm", "--reservation", &id, "--requester", "alice"])
        .assert()
        .success();

    let output = slotbook(&dir)
        .args(["list", "--requester", "alice", "--format", "json"])
        .assert()
        .success();
    let listed: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).unwrap();

    let entries = listed.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "confirmed");
    assert_eq!(entries[0]["version"], 2);
}

#[test]
fn offline_resource_rejects_bookings() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    slotbook(&dir)
        .args([
            "resource",
            "set-availability",
            "--resource",
            &resource,
            "--available",
            "false",
        ])
        .assert()
        .success();

    slotbook(&dir)
        .args([
            "book", "--resource", &resource, "--requester", "alice", "--at", SLOT,
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not currently accepting"));
}

#[test]
fn resource_list_shows_availability() {
    let dir = TempDir::new().unwrap();
    let resource = seed(&dir);

    slotbook(&dir)
        .args([
            "resource",
            "set-availability",
            "--resource",
            &resource,
            "--available",
            "false",
        ])
        .assert()
        .success();

    slotbook(&dir)
        .args(["resource", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offline"));

    // The offline resource disappears from the available-only view.
    slotbook(&dir)
        .args(["resource", "list", "--available-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room A").not());
}
