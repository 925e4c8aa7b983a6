use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn notekeeper_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notekeeper"));
    cmd.env_remove("NOTEKEEPER_ROOT").env("RUST_LOG", "error");
    cmd
}

fn run(dir: &Path, args: &[&str]) -> Output {
    notekeeper_cmd()
        .current_dir(dir)
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_init_creates_notekeeper_directory() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["init"]);

    assert!(output.status.success());
    assert!(tmp.path().join(".notekeeper").exists());
    assert!(tmp.path().join(".notekeeper/loro.db").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = TempDir::new().unwrap();

    run(tmp.path(), &["init"]);
    let output = run(tmp.path(), &["init"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Already initialized"));
}

#[test]
fn test_add_without_init_fails() {
    let tmp = TempDir::new().unwrap();

    let output = run(tmp.path(), &["--root", ".", "add", "Title", "Body"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not in a notekeeper project"));
}

#[test]
fn test_add_and_list_workflow() {
    let tmp = TempDir::new().unwrap();
    assert!(run(tmp.path(), &["init"]).status.success());

    let output = run(tmp.path(), &["add", "Buy milk", "2%", "--important=ON"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Buy milk"));
    assert!(stdout.contains("(important)"));

    let output = run(tmp.path(), &["add", "Call mom", "Sunday"]);
    assert!(output.status.success());

    let output = run(tmp.path(), &["list", "--json"]);
    assert!(output.status.success());
    let records: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["title"], "Buy milk");
    assert_eq!(records[0]["description"], "2%");
    assert_eq!(records[0]["important"], true);
    assert_eq!(records[1]["title"], "Call mom");
    assert_eq!(records[1]["important"], false);
    assert!(!records[0]["id"].as_str().unwrap().is_empty());
}

#[test]
fn test_list_from_subdirectory_finds_root() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "Nested", "found from below"]);

    let nested = tmp.path().join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    let output = run(&nested, &["list"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nested"));
}

#[test]
fn test_get_by_sequence_number() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);
    run(tmp.path(), &["add", "First", "one"]);
    run(tmp.path(), &["add", "Second", "two", "--important", "yes"]);

    let output = run(tmp.path(), &["get", "2", "--json"]);
    assert!(output.status.success());
    let note: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(note["title"], "Second");
    assert_eq!(note["important"], true);
    assert_eq!(note["sequence_number"], 2);

    let output = run(tmp.path(), &["get", "9"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Note not found: 9"));
}

#[test]
fn test_list_empty() {
    let tmp = TempDir::new().unwrap();
    run(tmp.path(), &["init"]);

    let output = run(tmp.path(), &["list"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("No notes found."));
}
