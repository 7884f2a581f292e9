//! Process-level settings shared by the Scribe plugin binaries.
//!
//! Host-supplied configuration travels inside each plugin request. The
//! settings here cover the process itself: which log events are emitted and
//! in which format. They are read from the environment once at start-up,
//! falling back to the defaults in [`defaults`].

pub mod defaults;
mod settings;

pub use defaults::{
    DEFAULT_LOG_FILTER, LOG_FILTER_ENV, LOG_FORMAT_ENV, default_log_filter, default_log_format,
};
pub use settings::{LogFormat, LogFormatParseError, Settings, SettingsError};
