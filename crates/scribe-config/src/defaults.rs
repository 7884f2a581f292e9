//! Default values and environment variable names for [`crate::Settings`].

use crate::settings::LogFormat;

/// Environment variable holding the log filter expression.
pub const LOG_FILTER_ENV: &str = "SCRIBE_LOG_FILTER";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "SCRIBE_LOG_FORMAT";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
