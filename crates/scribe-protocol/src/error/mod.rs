//! Errors raised while reading requests and writing responses.

use thiserror::Error;

/// Errors arising from the JSONL exchange with the host.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Reading the request line from stdin failed.
    #[error("failed to read request: {source}")]
    Read {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Stdin closed before a request line arrived.
    #[error("plugin request was empty")]
    EmptyRequest,

    /// The request line is not a valid request document.
    #[error("invalid plugin request JSON: {source}")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Serializing the response payload failed.
    #[error("failed to serialize plugin response: {source}")]
    Serialize {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Writing the response to stdout failed.
    #[error("failed to write plugin response: {source}")]
    Write {
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ProtocolError {
    /// Returns `true` when the failure concerns the incoming request.
    ///
    /// Request-side failures are reported back to the host as a failure
    /// response. Response-side failures leave no channel to report through.
    #[must_use]
    pub const fn is_request_error(&self) -> bool {
        matches!(
            self,
            Self::Read { .. } | Self::EmptyRequest | Self::Decode { .. }
        )
    }
}
