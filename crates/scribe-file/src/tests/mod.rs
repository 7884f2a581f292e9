//! Unit and behavioural tests for datasource request dispatch.


use std::collections::HashMap;
use std::io::Cursor;

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use scribe_protocol::{DiagnosticSeverity, PluginOutput, PluginRequest, PluginResponse};
use tempfile::TempDir;

use crate::{LocalFilesystem, execute_request, run_with_filesystem};

#[fixture]
fn workspace() -> TempDir {
    TempDir::new().expect("create temp dir")
}

fn destination_in(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("temp path should be UTF-8")
}

fn request(operation: &str, arguments: serde_json::Value) -> PluginRequest {
    let serde_json::Value::Object(map) = arguments else {
        panic!("arguments must be a JSON object");
    };
    PluginRequest::with_arguments(operation, map.into_iter().collect::<HashMap<_, _>>())
}

fn dispatch(input: &[u8]) -> PluginResponse {
    let mut stdin = Cursor::new(input.to_vec());
    let mut stdout = Vec::new();
    run_with_filesystem(&mut stdin, &mut stdout, &LocalFilesystem).expect("dispatch should succeed");
    let output = String::from_utf8(stdout).expect("utf8 stdout");
    serde_json::from_str(output.trim()).expect("parse response")
}

fn only_error_message(response: &PluginResponse) -> &str {
    assert!(!response.is_success());
    assert_eq!(response.output(), &PluginOutput::Empty);
    let [diagnostic] = response.diagnostics() else {
        panic!("expected one diagnostic, got: {:?}", response.diagnostics());
    };
    assert_eq!(diagnostic.severity(), DiagnosticSeverity::Error);
    diagnostic.message()
}

// ---------------------------------------------------------------------------
// execute
// ---------------------------------------------------------------------------

#[rstest]
fn execute_writes_file_and_echoes_path(workspace: TempDir) {
    let destination = destination_in(&workspace, "out.txt");
    let request = request(
        "execute",
        serde_json::json!({"destination": destination.as_str(), "contents": "hello"}),
    );

    let response =
        execute_request(&LocalFilesystem, &request).expect("execute should succeed");

    assert!(response.is_success());
    assert_eq!(
        response.output(),
        &PluginOutput::Value {
            data: serde_json::json!({"path": destination.as_str()})
        }
    );
    assert_eq!(std::fs::read(&destination).expect("read"), b"hello");
}

#[rstest]
fn execute_conflict_reports_destination_field(workspace: TempDir) {
    let destination = destination_in(&workspace, "out.txt");
    std::fs::write(&destination, "hello").expect("seed file");
    let line = serde_json::json!({
        "operation": "execute",
        "arguments": {"destination": destination.as_str(), "contents": "hi"},
    })
    .to_string();

    let response = dispatch(format!("{line}\n").as_bytes());

    let message = only_error_message(&response);
    assert!(message.contains("already exists"), "unexpected message: {message}");
    assert_eq!(
        response.diagnostics().first().and_then(|diag| diag.field()),
        Some("destination")
    );
    assert_eq!(std::fs::read(&destination).expect("read"), b"hello");
}

#[rstest]
#[case::missing(serde_json::json!({"contents": "x"}))]
#[case::empty(serde_json::json!({"destination": "", "force": true}))]
fn execute_without_destination_fails(#[case] arguments: serde_json::Value) {
    let err = execute_request(&LocalFilesystem, &request("execute", arguments))
        .expect_err("missing destination should fail");
    assert_eq!(err.to_string(), "the `destination` must be specified");
}

#[test]
fn execute_with_mistyped_argument_fails() {
    let err = execute_request(
        &LocalFilesystem,
        &request("execute", serde_json::json!({"destination": "a", "force": "yes"})),
    )
    .expect_err("decode should fail");
    assert!(
        err.to_string().contains("invalid datasource configuration"),
        "unexpected message: {err}"
    );
}

// ---------------------------------------------------------------------------
// validate and schema
// ---------------------------------------------------------------------------

#[rstest]
fn validate_does_not_create_file(workspace: TempDir) {
    let destination = destination_in(&workspace, "out.txt");
    let response = execute_request(
        &LocalFilesystem,
        &request("validate", serde_json::json!({"destination": destination.as_str()})),
    )
    .expect("validate should succeed");

    assert!(response.is_success());
    assert_eq!(response.output(), &PluginOutput::Empty);
    assert!(!destination.exists());
}

#[test]
fn validate_rejects_empty_destination() {
    let err = execute_request(
        &LocalFilesystem,
        &request("validate", serde_json::json!({"destination": ""})),
    )
    .expect_err("validate should fail");
    assert!(err.to_string().contains("destination"));
}

#[test]
fn schema_lists_configuration_and_output_fields() {
    let response = execute_request(&LocalFilesystem, &PluginRequest::new("schema"))
        .expect("schema should succeed");
    let PluginOutput::Value { data } = response.output() else {
        panic!("expected value output");
    };

    let names = |section: &str| -> Vec<String> {
        data.get(section)
            .and_then(serde_json::Value::as_array)
            .map(|fields| {
                fields
                    .iter()
                    .filter_map(|field| field.get("name").and_then(serde_json::Value::as_str))
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    };
    assert_eq!(names("config"), vec!["contents", "destination", "force"]);
    assert_eq!(names("output"), vec!["path"]);

    let required = crate::schema::config_fields()
        .iter()
        .filter(|field| field.required())
        .map(|field| field.name())
        .collect::<Vec<_>>();
    assert_eq!(required, vec!["destination"]);
}

#[test]
fn unsupported_operation_returns_error() {
    let err = execute_request(&LocalFilesystem, &PluginRequest::new("delete"))
        .expect_err("unsupported operation should fail");
    assert!(
        err.to_string().contains("unsupported datasource operation 'delete'"),
        "unexpected message: {err}"
    );
}

// ---------------------------------------------------------------------------
// stdin/stdout dispatch layer
// ---------------------------------------------------------------------------

#[test]
fn empty_stdin_yields_failure_response() {
    let response = dispatch(b"");
    assert_eq!(only_error_message(&response), "plugin request was empty");
}

#[test]
fn invalid_json_yields_failure_response() {
    let response = dispatch(b"not valid json\n");
    let message = only_error_message(&response);
    assert!(message.contains("invalid plugin request JSON"), "unexpected: {message}");
}

#[rstest]
fn dispatch_writes_exactly_one_line(workspace: TempDir) {
    let destination = destination_in(&workspace, "out.txt");
    let line = serde_json::json!({
        "operation": "execute",
        "arguments": {"destination": destination.as_str()},
    })
    .to_string();
    let mut stdin = Cursor::new(format!("{line}\n").into_bytes());
    let mut stdout = Vec::new();

    run_with_filesystem(&mut stdin, &mut stdout, &LocalFilesystem).expect("dispatch should succeed");

    let output = String::from_utf8(stdout).expect("utf8 stdout");
    assert_eq!(output.lines().count(), 1);
    assert_eq!(std::fs::read(&destination).expect("read").len(), 0);
}
