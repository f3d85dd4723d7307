use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::str::contains;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/analysis.ipynb")
}

fn nbfolio() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("nbfolio"));
    cmd.env_remove("NBFOLIO_CONFIG_FILE")
        .env_remove("RUST_LOG")
        .arg("--log-level")
        .arg("error");
    cmd
}

#[test]
fn preview_prints_json_payloads() {
    let assert = nbfolio()
        .arg("preview")
        .arg(fixture_path())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    let cells: serde_json::Value = serde_json::from_str(&stdout).expect("json listing");
    assert_eq!(cells.as_array().map(Vec::len), Some(5));
    assert_eq!(cells[0]["payload"]["kind"], "markup");
    assert_eq!(cells[1]["label"], "Code cell #1");
    assert_eq!(cells[2]["payload"]["cellType"], "raw");
}

#[test]
fn preview_text_format_lists_labels() {
    nbfolio()
        .arg("preview")
        .arg("--format")
        .arg("text")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(contains("== Code cell #1 =="))
        .stdout(contains("-- Outputs --"))
        .stdout(contains("== Unknown cell type raw =="));
}

#[test]
fn export_writes_project_files() {
    let out = tempfile::tempdir().expect("temp dir");

    nbfolio()
        .arg("export")
        .arg("--out-dir")
        .arg(out.path())
        .arg("--with-cells")
        .arg("--excerpt-chars")
        .arg("20")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(contains("package.json"))
        .stdout(contains("..."));

    let manifest = fs::read_to_string(out.path().join("package.json")).expect("manifest written");
    assert!(manifest.contains("\"notebook-web-export\""));
    let data = fs::read_to_string(out.path().join("src/NotebookData.js")).expect("data written");
    assert!(data.starts_with("const notebook = {"));
    let script = fs::read_to_string(out.path().join("cell-4.py")).expect("cell script written");
    assert_eq!(script, "plot(rows)");
}

#[test]
fn non_notebook_extension_is_rejected() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("notes.json");
    fs::write(&path, r#"{"cells": []}"#).expect("write input");

    nbfolio()
        .arg("preview")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(contains(".ipynb"));
}

#[test]
fn malformed_document_fails_with_format_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.ipynb");
    fs::write(&path, r#"{"cells": "nope"}"#).expect("write input");

    nbfolio()
        .arg("preview")
        .arg(&path)
        .assert()
        .code(3)
        .stderr(contains("must be a sequence"));
}
