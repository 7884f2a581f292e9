//! File datasource plugin: materializes a payload on disk for its host.
//!
//! The plugin reads exactly one JSONL request from stdin, runs the requested
//! operation, and writes one JSONL response to stdout. Three operations are
//! understood:
//!
//! - `execute` decodes a [`FileConfig`], writes the file through
//!   [`materialize`], and answers with `{"path": <destination>}`.
//! - `validate` decodes and validates the configuration without touching the
//!   filesystem.
//! - `schema` describes the configuration and output fields.
//!
//! Every failure, including an unreadable request, is reported to the host
//! as a failure response with one error diagnostic. Only a failure to deliver
//! the response itself surfaces as a [`DispatchError`].

pub mod config;
pub mod error;
pub mod materialize;
pub mod schema;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::io::{BufRead, Write};

use scribe_protocol::{
    DiagnosticSeverity, PluginDiagnostic, PluginOutput, PluginRequest, PluginResponse,
    ProtocolError, read_request, write_response,
};
use thiserror::Error;
use tracing::{debug, warn};

pub use self::config::{ConfigError, FileConfig};
pub use self::error::{ErrorClass, MaterializeError};
pub use self::materialize::{FileOutput, Filesystem, LocalFilesystem, materialize};

const DISPATCH_TARGET: &str = "scribe_file::dispatch";

/// Operation that writes the file.
pub const EXECUTE_OPERATION: &str = "execute";
/// Operation that only checks the configuration.
pub const VALIDATE_OPERATION: &str = "validate";
/// Operation that describes configuration and output fields.
pub const SCHEMA_OPERATION: &str = "schema";

/// Errors raised while answering the host.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The response could not be serialised or written to stdout.
    #[error("failed to respond to host: {source}")]
    Respond {
        /// Underlying protocol error.
        #[source]
        source: ProtocolError,
    },
}

/// Failures of a single operation, reported back to the host.
#[derive(Debug, Error)]
pub(crate) enum OperationError {
    #[error(transparent)]
    Request(#[from] ProtocolError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
    #[error("unsupported datasource operation '{operation}'")]
    Unsupported { operation: String },
}

impl OperationError {
    const fn field(&self) -> Option<&'static str> {
        match self {
            Self::Materialize(error) => error.field(),
            Self::Request(_) | Self::Config(_) | Self::Unsupported { .. } => None,
        }
    }
}

/// Executes one request from `stdin` against `filesystem` and writes one
/// response to `stdout`.
///
/// # Errors
///
/// Returns an error if the response cannot be serialised or written.
pub fn run_with_filesystem<F: Filesystem>(
    stdin: &mut impl BufRead,
    stdout: &mut impl Write,
    filesystem: &F,
) -> Result<(), DispatchError> {
    let outcome = read_request(stdin)
        .map_err(OperationError::from)
        .and_then(|request| execute_request(filesystem, &request));

    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            warn!(
                target: DISPATCH_TARGET,
                error = %error,
                "datasource request failed"
            );
            failure_response(&error)
        }
    };

    write_response(stdout, &response).map_err(|source| DispatchError::Respond { source })
}

/// Executes one request against the local filesystem.
///
/// # Errors
///
/// Returns an error if the response cannot be written.
pub fn run(stdin: &mut impl BufRead, stdout: &mut impl Write) -> Result<(), DispatchError> {
    run_with_filesystem(stdin, stdout, &LocalFilesystem)
}

pub(crate) fn execute_request<F: Filesystem>(
    filesystem: &F,
    request: &PluginRequest,
) -> Result<PluginResponse, OperationError> {
    debug!(
        target: DISPATCH_TARGET,
        operation = request.operation(),
        arguments = request.arguments().len(),
        "dispatching datasource request"
    );

    match request.operation() {
        EXECUTE_OPERATION => execute_materialize(filesystem, request),
        VALIDATE_OPERATION => execute_validate(request),
        SCHEMA_OPERATION => Ok(PluginResponse::success(PluginOutput::Value {
            data: schema::describe(),
        })),
        other => Err(OperationError::Unsupported {
            operation: other.to_owned(),
        }),
    }
}

fn execute_materialize<F: Filesystem>(
    filesystem: &F,
    request: &PluginRequest,
) -> Result<PluginResponse, OperationError> {
    let config = FileConfig::from_value(request.arguments_object())?;
    let output = materialize(filesystem, &config)?;
    let data = serde_json::json!({ "path": output.path() });
    Ok(PluginResponse::success(PluginOutput::Value { data }))
}

fn execute_validate(request: &PluginRequest) -> Result<PluginResponse, OperationError> {
    let config = FileConfig::from_value(request.arguments_object())?;
    config.validate()?;
    Ok(PluginResponse::success(PluginOutput::Empty))
}

pub(crate) fn failure_response(error: &OperationError) -> PluginResponse {
    let diagnostic = PluginDiagnostic::new(DiagnosticSeverity::Error, error.to_string());
    let tagged = match error.field() {
        Some(field) => diagnostic.with_field(field),
        None => diagnostic,
    };
    PluginResponse::failure(vec![tagged])
}
