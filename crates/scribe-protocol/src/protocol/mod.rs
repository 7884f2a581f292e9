//! Request and response documents exchanged with the host.
//!
//! Both documents are serialised as a single JSON line terminated by a
//! newline character.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Request sent from the host to a plugin on stdin.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use scribe_protocol::PluginRequest;
///
/// let mut arguments = HashMap::new();
/// arguments.insert(String::from("destination"), "/tmp/out.txt".into());
/// let request = PluginRequest::with_arguments("execute", arguments);
/// assert_eq!(request.operation(), "execute");
/// assert!(request.arguments().contains_key("destination"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginRequest {
    operation: String,
    #[serde(default)]
    arguments: HashMap<String, serde_json::Value>,
}

impl PluginRequest {
    /// Creates a request with no arguments.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            arguments: HashMap::new(),
        }
    }

    /// Creates a request with arguments.
    #[must_use]
    pub fn with_arguments(
        operation: impl Into<String>,
        arguments: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            operation: operation.into(),
            arguments,
        }
    }

    /// Returns the operation name.
    #[must_use]
    pub const fn operation(&self) -> &str {
        self.operation.as_str()
    }

    /// Returns the arguments map.
    #[must_use]
    pub const fn arguments(&self) -> &HashMap<String, serde_json::Value> {
        &self.arguments
    }

    /// Returns the arguments as a JSON object, ready for typed decoding.
    #[must_use]
    pub fn arguments_object(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.arguments
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

/// Response sent from a plugin to the host on stdout.
///
/// A successful response never carries error diagnostics; a failed response
/// always carries [`PluginOutput::Empty`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginResponse {
    success: bool,
    output: PluginOutput,
    #[serde(default)]
    diagnostics: Vec<PluginDiagnostic>,
}

impl PluginResponse {
    /// Creates a successful response with the given output.
    #[must_use]
    pub const fn success(output: PluginOutput) -> Self {
        Self {
            success: true,
            output,
            diagnostics: Vec::new(),
        }
    }

    /// Creates a failed response with diagnostics.
    #[must_use]
    pub const fn failure(diagnostics: Vec<PluginDiagnostic>) -> Self {
        Self {
            success: false,
            output: PluginOutput::Empty,
            diagnostics,
        }
    }

    /// Creates a failed response carrying one error diagnostic.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::failure(vec![PluginDiagnostic::new(
            DiagnosticSeverity::Error,
            message,
        )])
    }

    /// Returns whether the plugin completed successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the plugin output.
    #[must_use]
    pub const fn output(&self) -> &PluginOutput {
        &self.output
    }

    /// Returns the diagnostic messages.
    #[must_use]
    pub fn diagnostics(&self) -> &[PluginDiagnostic] {
        &self.diagnostics
    }
}

/// Output payload from a plugin.
///
/// The `kind` field discriminates the variants in JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PluginOutput {
    /// A structured value, such as a datasource result or a schema.
    Value {
        /// Arbitrary JSON data.
        data: serde_json::Value,
    },
    /// Empty output (plugin had nothing to produce).
    Empty,
}

/// A diagnostic message emitted by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PluginDiagnostic {
    severity: DiagnosticSeverity,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl PluginDiagnostic {
    /// Creates a diagnostic with the given severity and message.
    #[must_use]
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            field: None,
        }
    }

    /// Attaches the configuration field the diagnostic refers to.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Returns the severity level.
    #[must_use]
    pub const fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Returns the message text.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the configuration field, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

/// Severity level for plugin diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSeverity {
    /// A fatal error that prevented the plugin from completing.
    Error,
    /// A non-fatal warning.
    Warning,
    /// An informational message.
    Info,
}
