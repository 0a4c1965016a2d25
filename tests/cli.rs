//! Drives the `strictjson` binary end to end.

use std::io::Write;

use assert_cmd::Command;

fn checker() -> Command {
    Command::cargo_bin("strictjson").unwrap()
}

fn document(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn valid_document_exits_zero() {
    let file = document(r#"{"a": [1, 2, 3]}"#);
    let assert = checker().arg(file.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("ok (object)"), "stdout: {stdout}");
}

#[test]
fn invalid_document_exits_nonzero() {
    let file = document(r#"{"a": 1"#);
    checker().arg(file.path()).assert().failure();
}

#[test]
fn json_format_reports_the_error_kind_and_span() {
    let file = document("[1 2");
    let assert = checker()
        .args(["--format", "json"])
        .arg(file.path())
        .assert()
        .failure();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let diagnostic: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(diagnostic["kind"], "miss-comma-or-square-bracket");
    assert_eq!(diagnostic["lo"], 3);
}

#[test]
fn json_format_reports_success() {
    let file = document("null");
    let assert = checker()
        .args(["--format", "json"])
        .arg(file.path())
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let outcome: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(outcome["ok"], true);
    assert_eq!(outcome["kind"], "null");
}

#[test]
fn unreadable_input_fails_with_context() {
    checker().arg("definitely-not-a-file.json").assert().failure();
}
