//! CLI integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn fruits_file(dir: &TempDir) -> PathBuf {
    write_file(dir, "fruits.json", r#"["Pineapple", "Banana", "Grape", "Apple"]"#)
}

/// Command isolated from the user's config file
fn cellsuggest(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cellsuggest").unwrap();
    cmd.arg("--config").arg(dir.join("absent.toml"));
    cmd
}

#[test]
fn test_help() {
    Command::cargo_bin("cellsuggest")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--query"))
        .stdout(predicate::str::contains("--latency-ms"));
}

#[test]
fn test_query_prints_ranked_matches() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", "ap"])
        .assert()
        .success()
        .stdout("Apple\nGrape\nPineapple\n");
}

#[test]
fn test_query_case_sensitive() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", "Ap", "--case-sensitive"])
        .assert()
        .success()
        .stdout("Apple\n");
}

#[test]
fn test_query_without_filter_keeps_source_order() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", "ban", "--no-filter"])
        .assert()
        .success()
        .stdout("Pineapple\nBanana\nGrape\nApple\n");
}

#[test]
fn test_empty_query_keeps_source_order() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", ""])
        .assert()
        .success()
        .stdout("Pineapple\nBanana\nGrape\nApple\n");
}

#[test]
fn test_non_list_source_gives_no_candidates() {
    let dir = tempdir().unwrap();
    let source = write_file(&dir, "object.json", r#"{"fruit": "Apple"}"#);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", "a"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_malformed_source_fails() {
    let dir = tempdir().unwrap();
    let source = write_file(&dir, "broken.json", r#"["Apple","#);

    cellsuggest(dir.path())
        .arg(&source)
        .args(["--query", "a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load candidates"));
}

#[test]
fn test_config_file_settings_apply() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);
    let config = write_file(&dir, "config.toml", "[cell]\nfilter = false\n");

    Command::cargo_bin("cellsuggest")
        .unwrap()
        .arg(&source)
        .arg("--config")
        .arg(&config)
        .args(["--query", "grape"])
        .assert()
        .success()
        .stdout("Pineapple\nBanana\nGrape\nApple\n");
}

#[test]
fn test_malformed_config_warns_and_uses_defaults() {
    let dir = tempdir().unwrap();
    let source = fruits_file(&dir);
    let config = write_file(&dir, "config.toml", "[cell\nfilter = ");

    Command::cargo_bin("cellsuggest")
        .unwrap()
        .arg(&source)
        .arg("--config")
        .arg(&config)
        .args(["--query", "grape"])
        .assert()
        .success()
        .stdout("Grape\n")
        .stderr(predicate::str::contains("Warning"));
}
