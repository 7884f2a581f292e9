//! Wire protocol shared by Scribe plugins and their host.
//!
//! A plugin is a short-lived process that handles exactly one request. The
//! host writes one [`PluginRequest`] line to the plugin's stdin and closes it.
//! The plugin writes one [`PluginResponse`] line to stdout and exits. Stderr is
//! reserved for diagnostics logging and is not part of the protocol.
//!
//! # Example
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use scribe_protocol::{PluginOutput, PluginResponse, read_request, write_response};
//!
//! let mut stdin = Cursor::new(b"{\"operation\":\"schema\"}\n".to_vec());
//! let request = read_request(&mut stdin).expect("request should decode");
//! assert_eq!(request.operation(), "schema");
//!
//! let mut stdout = Vec::new();
//! write_response(&mut stdout, &PluginResponse::success(PluginOutput::Empty))
//!     .expect("response should encode");
//! assert!(stdout.ends_with(b"\n"));
//! ```

pub mod codec;
pub mod error;
pub mod protocol;

pub use self::codec::{read_request, write_response};
pub use self::error::ProtocolError;
pub use self::protocol::{
    DiagnosticSeverity, PluginDiagnostic, PluginOutput, PluginRequest, PluginResponse,
};
