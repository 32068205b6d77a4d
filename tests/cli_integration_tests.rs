//! CLI Integration Tests
//!
//! Tests the CLI binary directly using assert_cmd to exercise main.rs code paths.
//!
//! # Coverage Exclusion
//! These tests are skipped during coverage runs because the binaries are not
//! instrumented there.

#![cfg(not(coverage))]
#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn tabula(data_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tabula").unwrap();
    cmd.env_remove("TABULA_DATA_DIR")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

fn write_parts_workbook(dir: &Path) -> PathBuf {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Parts list").unwrap();
    worksheet.write_string(1, 0, "Part").unwrap();
    worksheet.write_string(1, 1, "Qty").unwrap();
    worksheet.write_string(2, 0, "bolt").unwrap();
    worksheet.write_number(2, 1, 10.0).unwrap();
    worksheet.write_string(3, 0, "nut").unwrap();
    worksheet.write_number(3, 1, 25.0).unwrap();

    let path = dir.join("parts.xlsx");
    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("tabula").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabula"))
        .stdout(predicate::str::contains("COMMANDS"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("tabula").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tabula"));
}

#[test]
fn test_server_help() {
    let mut cmd = Command::cargo_bin("tabula-server").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("/api/get-data"));
}

// ═══════════════════════════════════════════════════════════════════════════
// CONVERT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_convert_prints_records() {
    let temp = TempDir::new().unwrap();
    let file = write_parts_workbook(temp.path());

    tabula(&temp.path().join("uploads"))
        .arg("convert")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Part\": \"bolt\""))
        .stdout(predicate::str::contains("\"Qty\": \"25\""))
        .stdout(predicate::str::contains("Parts list").not());

    assert!(!temp.path().join("uploads").exists());
}

#[test]
fn test_convert_to_file() {
    let temp = TempDir::new().unwrap();
    let file = write_parts_workbook(temp.path());
    let output = temp.path().join("parts.json");

    tabula(&temp.path().join("uploads"))
        .arg("convert")
        .arg(&file)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Records: 2"));

    let content = fs::read_to_string(output).unwrap();
    assert!(content.contains("\"nut\""));
}

#[test]
fn test_convert_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    tabula(temp.path())
        .arg("convert")
        .arg(temp.path().join("absent.xlsx"))
        .assert()
        .failure();
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT / ADD / FIELDS / SHOW
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_then_show() {
    let temp = TempDir::new().unwrap();
    let file = write_parts_workbook(temp.path());
    let data_dir = temp.path().join("uploads");

    tabula(&data_dir)
        .args(["import", "--category", "parts"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 new, 2 total"));

    // Second import adds nothing
    tabula(&data_dir)
        .args(["import", "--category", "parts"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 new, 2 total"));

    tabula(&data_dir)
        .args(["show", "parts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Part\": \"bolt\""));

    assert!(data_dir.join("parts.json").exists());
}

#[test]
fn test_add_then_fields() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("uploads");

    tabula(&data_dir)
        .args(["add", "tools", "--field", "Tool=hammer", "--field", "Weight=2kg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 records"));

    tabula(&data_dir)
        .args(["fields", "tools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tool"))
        .stdout(predicate::str::contains("Weight"));
}

#[test]
fn test_add_rejects_malformed_field() {
    let temp = TempDir::new().unwrap();
    tabula(temp.path())
        .args(["add", "tools", "--field", "no-separator"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_fields_on_missing_category() {
    let temp = TempDir::new().unwrap();
    tabula(temp.path())
        .args(["fields", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No data file"));
}

#[test]
fn test_show_rejects_path_escape() {
    let temp = TempDir::new().unwrap();
    tabula(temp.path())
        .args(["show", "../etc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidCategory"));
}
