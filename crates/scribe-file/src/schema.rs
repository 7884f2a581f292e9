//! Field specifications for the datasource's configuration and output.
//!
//! Hosts use these to build a decoder for the configuration block and to
//! type the result before invoking the plugin.

use serde::Serialize;

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// A UTF-8 string.
    String,
    /// A boolean flag.
    Bool,
}

/// Specification of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    description: &'static str,
}

impl FieldSpec {
    const fn new(
        name: &'static str,
        kind: FieldKind,
        required: bool,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            kind,
            required,
            description,
        }
    }

    /// Returns the field name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns whether the host must supply the field.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }
}

const CONFIG_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new(
        "contents",
        FieldKind::String,
        false,
        "The contents of the file to create. If no contents are specified, the file will be empty.",
    ),
    FieldSpec::new(
        "destination",
        FieldKind::String,
        true,
        "The file to write the contents to.",
    ),
    FieldSpec::new(
        "force",
        FieldKind::Bool,
        false,
        "Erase the destination if it exists. Defaults to false.",
    ),
];

const OUTPUT_FIELDS: [FieldSpec; 1] = [FieldSpec::new(
    "path",
    FieldKind::String,
    true,
    "The path of the file created.",
)];

/// Returns the configuration fields accepted by `execute` and `validate`.
#[must_use]
pub const fn config_fields() -> &'static [FieldSpec] {
    &CONFIG_FIELDS
}

/// Returns the fields of a successful `execute` result.
#[must_use]
pub const fn output_fields() -> &'static [FieldSpec] {
    &OUTPUT_FIELDS
}

/// Returns both field lists as a JSON document.
#[must_use]
pub fn describe() -> serde_json::Value {
    serde_json::json!({
        "config": config_fields(),
        "output": output_fields(),
    })
}
