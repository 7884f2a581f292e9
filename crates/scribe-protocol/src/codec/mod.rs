//! Line codec for the one-shot exchange.

use std::io::{BufRead, Write};

use crate::error::ProtocolError;
use crate::protocol::{PluginRequest, PluginResponse};

/// Reads exactly one request line from `reader`.
///
/// # Errors
///
/// Returns [`ProtocolError::EmptyRequest`] when the stream ends before any
/// bytes arrive, and [`ProtocolError::Decode`] when the line is not a valid
/// request document.
pub fn read_request(reader: &mut impl BufRead) -> Result<PluginRequest, ProtocolError> {
    let mut line = String::new();
    let bytes_read = reader
        .read_line(&mut line)
        .map_err(|source| ProtocolError::Read { source })?;

    if bytes_read == 0 {
        return Err(ProtocolError::EmptyRequest);
    }

    serde_json::from_str(line.trim()).map_err(|source| ProtocolError::Decode { source })
}

/// Writes `response` to `writer` as one newline-terminated line and flushes.
///
/// # Errors
///
/// Returns an error if the response cannot be serialised or written.
pub fn write_response(
    writer: &mut impl Write,
    response: &PluginResponse,
) -> Result<(), ProtocolError> {
    let payload =
        serde_json::to_string(response).map_err(|source| ProtocolError::Serialize { source })?;
    writer
        .write_all(payload.as_bytes())
        .map_err(|source| ProtocolError::Write { source })?;
    writer
        .write_all(b"\n")
        .map_err(|source| ProtocolError::Write { source })?;
    writer
        .flush()
        .map_err(|source| ProtocolError::Write { source })
}
