//! Datasource configuration decoded from the host's argument map.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::MaterializeError;

/// Configuration for one file materialization.
///
/// Every field is optional at the decoding layer so that a missing
/// `destination` is reported by [`FileConfig::validate`] with the same
/// message as an explicit empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// The file to write the contents to.
    destination: Utf8PathBuf,
    /// The contents of the file to create. Empty by default.
    contents: String,
    /// Erase the destination if it exists.
    force: bool,
}

/// Errors raised while decoding a [`FileConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The argument map does not match the configuration shape.
    #[error("invalid datasource configuration: {source}")]
    Decode {
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FileConfig {
    /// Creates a configuration that refuses to overwrite existing files.
    #[must_use]
    pub fn new(destination: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            contents: contents.into(),
            force: false,
        }
    }

    /// Sets whether an existing destination may be overwritten.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Decodes a configuration from a JSON object of arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Decode`] if a field has the wrong type or an
    /// unknown field is present.
    pub fn from_value(arguments: serde_json::Value) -> Result<Self, ConfigError> {
        serde_json::from_value(arguments).map_err(|source| ConfigError::Decode { source })
    }

    /// Checks the configuration without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`MaterializeError::MissingDestination`] when the destination
    /// is empty.
    pub fn validate(&self) -> Result<(), MaterializeError> {
        if self.destination.as_str().is_empty() {
            return Err(MaterializeError::MissingDestination);
        }
        Ok(())
    }

    /// Returns the destination path exactly as supplied.
    #[must_use]
    pub fn destination(&self) -> &Utf8Path {
        self.destination.as_path()
    }

    /// Returns the payload to write.
    #[must_use]
    pub const fn contents(&self) -> &str {
        self.contents.as_str()
    }

    /// Returns whether an existing destination may be overwritten.
    #[must_use]
    pub const fn force(&self) -> bool {
        self.force
    }
}
