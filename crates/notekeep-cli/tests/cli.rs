// End-to-end tests driving the `notes` binary against a temporary database.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TWO_NOTES: &str = r#"{
  "notes": [
    {
      "id": 1,
      "tags": [
        "errand"
      ],
      "content": "Buy milk"
    },
    {
      "id": 2,
      "tags": [
        "family"
      ],
      "content": "Call mom"
    }
  ]
}"#;

fn notes(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("notes").unwrap();
    cmd.env_remove("NOTEKEEP_DB")
        .env_remove("NOTEKEEP_CONFIG")
        .env_remove("NOTEKEEP_ID_STRATEGY")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

fn seeded(content: &str) -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db.json");
    fs::write(&db, content).unwrap();
    (temp, db)
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn init_creates_empty_database() {
    let temp = TempDir::new().unwrap();
    let db = temp.path().join("db.json");

    notes(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized note database"));
    assert_eq!(fs::read_to_string(&db).unwrap(), "{\n  \"notes\": []\n}");

    notes(&db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn new_then_all_round_trip() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    notes(&db)
        .args(["new", "  Buy milk  ", "--tags", "errand, shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Note created successfully"))
        .stdout(predicate::str::contains("Buy milk"));

    let all = json_stdout(notes(&db).args(["all", "--json"]));
    let list = all.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["content"], "Buy milk");
    assert_eq!(list[0]["tags"], serde_json::json!(["errand", "shop"]));
    assert!(list[0]["id"].as_u64().unwrap() > 1_577_836_800_000);
}

#[test]
fn new_reads_content_from_stdin() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    let created = json_stdout(
        notes(&db)
            .args(["new", "-t", "piped", "--json"])
            .write_stdin("Piped note\n"),
    );
    assert_eq!(created["content"], "Piped note");
    assert_eq!(created["tags"], serde_json::json!(["piped"]));
}

#[test]
fn new_without_tags_is_usage_error() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    notes(&db)
        .args(["new", "Buy milk"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--tags"));
    assert_eq!(fs::read_to_string(&db).unwrap(), r#"{"notes": []}"#);
}

#[test]
fn new_with_blank_content_fails() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    notes(&db)
        .args(["new", "   ", "-t", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[test]
fn find_matches_content_case_insensitively() {
    let (_temp, db) = seeded(TWO_NOTES);

    let found = json_stdout(notes(&db).args(["find", "CALL", "--json"]));
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], 2);

    let by_tag = json_stdout(notes(&db).args(["find", "errand", "--json"]));
    assert!(by_tag.as_array().unwrap().is_empty());
}

#[test]
fn all_prints_human_readable_notes() {
    let (_temp, db) = seeded(TWO_NOTES);

    notes(&db)
        .arg("all")
        .assert()
        .success()
        .stdout(predicate::str::contains("#1"))
        .stdout(predicate::str::contains("[family]"))
        .stdout(predicate::str::contains("    Call mom"));
}

#[test]
fn remove_existing_note() {
    let (_temp, db) = seeded(TWO_NOTES);

    notes(&db)
        .args(["remove", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed note with id: 1"));

    let remaining = json_stdout(notes(&db).args(["all", "--json"]));
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["content"], "Call mom");
}

#[test]
fn remove_unknown_id_reports_not_found_without_writing() {
    let (_temp, db) = seeded(TWO_NOTES);

    notes(&db)
        .args(["remove", "999"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No note found with id: 999"));
    assert_eq!(fs::read_to_string(&db).unwrap(), TWO_NOTES);
}

#[test]
fn remove_non_numeric_id_is_usage_error() {
    let (_temp, db) = seeded(TWO_NOTES);

    notes(&db).args(["remove", "abc"]).assert().code(2);
}

#[test]
fn clean_empties_database() {
    let (_temp, db) = seeded(TWO_NOTES);

    notes(&db)
        .arg("clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed all notes"));
    assert_eq!(fs::read_to_string(&db).unwrap(), "{\n  \"notes\": []\n}");
}

#[test]
fn missing_database_is_an_error() {
    let temp = TempDir::new().unwrap();

    notes(&temp.path().join("absent.json"))
        .arg("all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("I/O error"));
}

#[test]
fn malformed_database_is_an_error() {
    let (_temp, db) = seeded(r#"{"items": []}"#);

    notes(&db)
        .arg("all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed note database"));
}

#[test]
fn web_is_not_available() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    notes(&db)
        .args(["web", "8080"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("port 8080"));
}

#[test]
fn config_reports_database_path() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    let shown = json_stdout(notes(&db).args(["config", "--json"]));
    assert_eq!(shown["db"], db.display().to_string());
    assert_eq!(shown["config"]["id"]["strategy"], "timestamp");
}

#[test]
fn sequential_ids_from_environment() {
    let (_temp, db) = seeded(r#"{"notes": []}"#);

    notes(&db)
        .env("NOTEKEEP_ID_STRATEGY", "sequential")
        .args(["new", "first", "-t", "a"])
        .assert()
        .success();
    notes(&db)
        .env("NOTEKEEP_ID_STRATEGY", "sequential")
        .args(["new", "second", "-t", "b"])
        .assert()
        .success();

    let all = json_stdout(notes(&db).args(["all", "--json"]));
    assert_eq!(all[0]["id"], 1);
    assert_eq!(all[1]["id"], 2);
}
