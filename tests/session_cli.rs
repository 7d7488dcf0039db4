//! End-to-end tests: scripted stdin into the binary

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn deskmate(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("deskmate").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env_remove("DESKMATE_CONFIG")
        .env_remove("DESKMATE_DATA_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn read_document(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("assistant_data.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_first_run_captures_name_and_saves_on_exit() {
    let dir = TempDir::new().unwrap();

    deskmate(dir.path())
        .write_stdin("Ada\n1\nWrite report\n1\n1\nBuy milk\n3\n2\n2\n1\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's your name?"))
        .stdout(predicate::str::contains("Task added successfully!"))
        .stdout(predicate::str::contains("Task deleted: 'Write report'"))
        .stdout(predicate::str::contains("Goodbye! See you next time!"));

    let doc = read_document(dir.path());
    assert_eq!(doc["user"], "Ada");
    assert!(doc["last_saved"].is_string());
    assert!(doc["notes"].as_array().unwrap().is_empty());

    let tasks = doc["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["task"], "Buy milk");
    assert_eq!(tasks[0]["priority"], "Low");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn test_data_survives_restart() {
    let dir = TempDir::new().unwrap();

    deskmate(dir.path())
        .write_stdin("Ada\n3\nQuarterly numbers\nWork\n3\nCall mom\n\n1\nPay rent\n1\n8\n")
        .assert()
        .success();

    deskmate(dir.path())
        .write_stdin("4\n2\n1\n1\n2\n3\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("What's your name?").not())
        .stdout(predicate::str::contains("User: Ada"))
        .stdout(predicate::str::contains("📁 WORK (1 notes):"))
        .stdout(predicate::str::contains("📁 GENERAL (1 notes):"))
        .stdout(predicate::str::contains("Task 1 marked as completed!"))
        .stdout(predicate::str::contains("1. [✓] Pay rent"));

    let doc = read_document(dir.path());
    assert_eq!(doc["tasks"][0]["completed"], true);
    assert!(doc["tasks"][0]["completed_at"].is_string());
    assert_eq!(doc["notes"][1]["category"], "General");
}

#[test]
fn test_end_of_input_offers_save_and_exits_cleanly() {
    let dir = TempDir::new().unwrap();

    deskmate(dir.path())
        .write_stdin("Ada\n1\nUnsaved idea\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Program interrupted!"))
        .stdout(predicate::str::contains("Save data before exiting?"));

    // The name was saved on capture; the task was not.
    let doc = read_document(dir.path());
    assert_eq!(doc["user"], "Ada");
    assert!(doc["tasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_calculator_divide_by_zero() {
    let dir = TempDir::new().unwrap();

    deskmate(dir.path())
        .write_stdin("Ada\n5\n4\n5\n0\n4\n6\n3\n5\n6\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 ÷ 0 = Undefined (division by zero)"))
        .stdout(predicate::str::contains("2. 6 ÷ 3 = 2"));
}

#[test]
fn test_corrupt_data_file_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("assistant_data.json"), "not json").unwrap();

    deskmate(dir.path())
        .write_stdin("Ada\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load data"));

    assert_eq!(read_document(dir.path())["user"], "Ada");
}

#[test]
fn test_data_file_flag_and_local_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("deskmate.toml"),
        "[assistant]\nname = \"Jarvis\"\n",
    )
    .unwrap();

    deskmate(dir.path())
        .args(["--data-file", "nested/organizer.json"])
        .write_stdin("Ada\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm Jarvis"));

    assert!(dir.path().join("nested/organizer.json").exists());
    assert!(!dir.path().join("assistant_data.json").exists());
}
