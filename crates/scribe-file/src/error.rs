//! Failure taxonomy for file materialization.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Broad classification of a [`MaterializeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request was unusable; no I/O was attempted.
    Configuration,
    /// The destination already exists and overwriting was not permitted.
    Conflict,
    /// The filesystem rejected the open or the write.
    Io,
}

/// Errors raised while materializing a file.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// No destination path was supplied.
    #[error("the `destination` must be specified")]
    MissingDestination,

    /// The destination exists and `force` was not set.
    #[error("destination file \"{path}\" already exists")]
    AlreadyExists {
        /// Destination as supplied.
        path: Utf8PathBuf,
    },

    /// Opening or creating the destination failed.
    #[error("failed to create destination \"{path}\": {source}")]
    Create {
        /// Destination as supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the payload failed.
    #[error("failed to write contents to \"{path}\": {source}")]
    Write {
        /// Destination as supplied.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The destination stopped accepting bytes before the payload was written.
    #[error(
        "failed to write contents to \"{path}\": expected to write {expected} bytes, but wrote {written} instead"
    )]
    ShortWrite {
        /// Destination as supplied.
        path: Utf8PathBuf,
        /// Payload length in bytes.
        expected: usize,
        /// Bytes accepted before the write stalled.
        written: usize,
    },
}

impl MaterializeError {
    /// Returns the class of this failure.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingDestination => ErrorClass::Configuration,
            Self::AlreadyExists { .. } => ErrorClass::Conflict,
            Self::Create { .. } | Self::Write { .. } | Self::ShortWrite { .. } => ErrorClass::Io,
        }
    }

    /// Returns the configuration field this failure concerns, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingDestination | Self::AlreadyExists { .. } => Some("destination"),
            Self::Create { .. } | Self::Write { .. } | Self::ShortWrite { .. } => None,
        }
    }
}
