//! Integration tests for unpick-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use unpick_core::test_utils::ZipTestBuilder;
use unpick_core::test_utils::create_test_tar_gz;
use unpick_core::test_utils::create_test_zip;
use unpick_core::test_utils::write_archive;

fn unpick_cmd() -> Command {
    cargo_bin_cmd!("unpick")
}

/// Writes the sample archive and an empty destination directory.
fn sample_zip(temp: &TempDir) -> (PathBuf, PathBuf) {
    let data = ZipTestBuilder::new()
        .add_directory("docs/")
        .add_file("docs/readme.txt", b"hello")
        .add_file("docs/guide/intro.md", b"intro")
        .add_file("logo.png", b"png")
        .build();
    let archive = write_archive(temp.path(), "bundle.zip", &data);
    let dest = temp.path().join("out");
    fs::create_dir(&dest).expect("failed to create destination");
    (archive, dest)
}

#[test]
fn test_version_flag() {
    unpick_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("unpick"));
}

#[test]
fn test_extract_help() {
    unpick_cmd()
        .args(["extract", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--rename"))
        .stdout(predicate::str::contains("--staging-dir"));
}

#[test]
fn test_list_numbers_files_only() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, _) = sample_zip(&temp);

    unpick_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("1          5  docs/readme.txt"))
        .stdout(predicate::str::contains("3          3  logo.png"))
        .stdout(predicate::str::contains("Total: 3 files"))
        .stdout(predicate::str::contains("docs/\n").not());
}

#[test]
fn test_list_all_shows_directories() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, _) = sample_zip(&temp);

    unpick_cmd()
        .args(["list", "--all"])
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("d "))
        .stdout(predicate::str::contains("docs/"));
}

#[test]
fn test_list_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, _) = sample_zip(&temp);

    let output = unpick_cmd()
        .args(["--json", "list"])
        .arg(&archive)
        .output()
        .expect("failed to run unpick");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(json["operation"], "list");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["format"], "zip");
    let files = json["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["number"], 1);
    assert_eq!(files[0]["path"], "docs/readme.txt");
    assert!(json["data"].get("entries").is_none());
}

#[test]
fn test_list_missing_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    unpick_cmd()
        .arg("list")
        .arg(temp.path().join("missing.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot open archive"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_list_unsupported_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let path = temp.path().join("notes.rar");
    fs::write(&path, b"rar").unwrap();

    unpick_cmd()
        .arg("list")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported archive format"));
}

#[test]
fn test_extract_rename_into_subdirectory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["--rename", "1=README.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"))
        .stdout(predicate::str::contains("docs/readme.txt -> docs/README.txt"));

    assert_eq!(fs::read(dest.join("docs/README.txt")).unwrap(), b"hello");
    assert!(!dest.join("docs/readme.txt").exists());
    assert!(!dest.join("logo.png").exists());
    assert!(!dest.join(".temp").exists());
}

#[test]
fn test_extract_select_and_path() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["-s", "3", "--path", "docs/guide/intro.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files copied: 2"));

    assert_eq!(fs::read(dest.join("logo.png")).unwrap(), b"png");
    assert_eq!(fs::read(dest.join("docs/guide/intro.md")).unwrap(), b"intro");
    assert!(!dest.join("docs/readme.txt").exists());
}

#[test]
fn test_extract_all_from_tar_gz() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(
        temp.path(),
        "bundle.tar.gz",
        &create_test_tar_gz(&[("a/one.txt", b"1"), ("two.txt", b"22")]),
    );
    let dest = temp.path().join("out");
    fs::create_dir(&dest).unwrap();

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .arg("--all")
        .assert()
        .success();

    assert_eq!(fs::read(dest.join("a/one.txt")).unwrap(), b"1");
    assert_eq!(fs::read(dest.join("two.txt")).unwrap(), b"22");
}

#[test]
fn test_extract_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    let output = unpick_cmd()
        .args(["--json", "extract"])
        .arg(&archive)
        .arg(&dest)
        .args(["-r", "1=README.txt"])
        .output()
        .expect("failed to run unpick");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(json["operation"], "extract");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_copied"], 1);
    assert_eq!(json["data"]["bytes_written"], 5);
    let results = json["data"]["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["outcome"], "copied");
    assert_eq!(results[0]["target"], "docs/README.txt");
}

#[test]
fn test_extract_invalid_rename_fails_entry_only() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    let output = unpick_cmd()
        .args(["--json", "extract"])
        .arg(&archive)
        .arg(&dest)
        .args(["-r", "1=a/b", "-s", "3"])
        .output()
        .expect("failed to run unpick");
    assert!(!output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is not JSON");
    assert_eq!(json["status"], "error");
    assert_eq!(json["data"]["files_copied"], 1);
    assert_eq!(json["data"]["files_failed"], 1);
    assert_eq!(json["data"]["results"][0]["outcome"], "failed");
    assert_eq!(json["data"]["results"][1]["outcome"], "copied");
    assert_eq!(fs::read(dest.join("logo.png")).unwrap(), b"png");
    assert!(!dest.join(".temp").exists());
}

#[test]
fn test_extract_nothing_selected() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files selected"));
}

#[test]
fn test_extract_number_out_of_range() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["-s", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn test_extract_zero_is_rejected_by_parser() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["-s", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start at 1"));
}

#[test]
fn test_extract_missing_destination() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, _) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("nowhere"))
        .arg("--all")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an existing directory"));
}

#[test]
fn test_extract_custom_staging_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["--staging-dir", "_work", "-s", "3"])
        .assert()
        .success();

    assert!(dest.join("logo.png").exists());
    assert!(!dest.join("_work").exists());
}

#[test]
fn test_extract_invalid_staging_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["--staging-dir", "a/b", "-s", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--staging-dir"));
}

#[test]
fn test_extract_file_count_limit() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = write_archive(
        temp.path(),
        "many.zip",
        &create_test_zip(&[("a", b"a"), ("b", b"b"), ("c", b"c")]),
    );
    let dest = temp.path().join("out");
    fs::create_dir(&dest).unwrap();

    unpick_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["--all", "--max-files", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit exceeded"))
        .stderr(predicate::str::contains("--max-files"));

    assert!(!dest.join(".temp").exists());
    assert!(!dest.join("a").exists());
}

#[test]
fn test_quiet_suppresses_summary() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let (archive, dest) = sample_zip(&temp);

    unpick_cmd()
        .arg("--quiet")
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .args(["-s", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(dest.join("docs/readme.txt").exists());
}

#[test]
fn test_completion_bash() {
    unpick_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unpick"));
}
