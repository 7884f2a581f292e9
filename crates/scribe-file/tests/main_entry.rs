//! Integration tests for the `scribe-file` binary entry point.
//!
//! Drives the plugin over stdin and stdout the way a host does.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

fn execute_line(destination: &str, contents: &str, force: bool) -> String {
    let request = serde_json::json!({
        "operation": "execute",
        "arguments": {
            "destination": destination,
            "contents": contents,
            "force": force,
        },
    });
    format!("{request}\n")
}

#[test]
fn execute_writes_file_and_reports_path() {
    let workspace = TempDir::new().expect("create temp dir");
    let destination = workspace.path().join("out.txt");
    let destination_str = destination.to_str().expect("utf8 path");

    let mut command = cargo_bin_cmd!("scribe-file");
    command
        .env("SCRIBE_LOG_FORMAT", "compact")
        .write_stdin(execute_line(destination_str, "hello", false));
    command
        .assert()
        .success()
        .stdout(contains("\"success\":true"))
        .stdout(contains(destination_str));

    assert_eq!(std::fs::read(&destination).expect("read"), b"hello");
}

#[test]
fn conflict_is_reported_in_the_response() {
    let workspace = TempDir::new().expect("create temp dir");
    let destination = workspace.path().join("out.txt");
    std::fs::write(&destination, "hello").expect("seed file");
    let destination_str = destination.to_str().expect("utf8 path");

    let mut command = cargo_bin_cmd!("scribe-file");
    command.write_stdin(execute_line(destination_str, "hi", false));
    command
        .assert()
        .success()
        .stdout(contains("\"success\":false"))
        .stdout(contains("already exists"));

    assert_eq!(std::fs::read(&destination).expect("read"), b"hello");
}

#[test]
fn invalid_log_format_still_answers_the_host() {
    let mut command = cargo_bin_cmd!("scribe-file");
    command
        .env("SCRIBE_LOG_FORMAT", "xml")
        .write_stdin("{\"operation\":\"schema\"}\n");
    command
        .assert()
        .success()
        .stdout(contains("\"success\":true"))
        .stderr(contains("xml"));
}
