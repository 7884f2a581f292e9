//! Environment-backed settings for plugin processes.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

use crate::defaults::{LOG_FILTER_ENV, LOG_FORMAT_ENV, default_log_filter, default_log_format};

/// Output format for log events written to stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, for hosts that collect plugin stderr.
    #[default]
    Json,
    /// Single-line text for people reading stderr directly.
    Compact,
}

/// Error returned when a [`LogFormat`] name is not recognised.
pub type LogFormatParseError = strum::ParseError;

/// Settings controlling plugin process behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    log_filter: String,
    log_format: LogFormat,
}

/// Errors raised while reading [`Settings`].
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The configured log format is not recognised.
    #[error("invalid value '{value}' for {variable}: {source}")]
    InvalidLogFormat {
        /// Environment variable that held the value.
        variable: &'static str,
        /// Raw value that failed to parse.
        value: String,
        /// Underlying parse error.
        #[source]
        source: LogFormatParseError,
    },
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: String::from(default_log_filter()),
            log_format: default_log_format(),
        }
    }
}

impl Settings {
    /// Builds settings with explicit values.
    #[must_use]
    pub fn new(log_filter: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            log_filter: log_filter.into(),
            log_format,
        }
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `SCRIBE_LOG_FORMAT` is set to an unknown format.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps variable names to values.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the log format value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let log_filter = read(LOG_FILTER_ENV).unwrap_or_else(|| String::from(default_log_filter()));
        let log_format = match read(LOG_FORMAT_ENV) {
            Some(value) => {
                value
                    .parse::<LogFormat>()
                    .map_err(|source| SettingsError::InvalidLogFormat {
                        variable: LOG_FORMAT_ENV,
                        value,
                        source,
                    })?
            }
            None => default_log_format(),
        };

        Ok(Self {
            log_filter,
            log_format,
        })
    }

    /// Returns the `tracing` filter expression.
    #[must_use]
    pub const fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
