//! Opaque JSON payloads.
//!
//! Some parts of a transcript have tool-specific shapes that the model does not
//! specialise: the `toolUseResult` field, inputs of unknown tools, and structured
//! tool-result content. They are kept as an [`OpaqueValue`] so renderers can still
//! print them without knowing their shape.

use serde_json::Value;
use std::fmt;

/// A JSON value retained without further structural decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueValue(Value);

impl OpaqueValue {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Pretty-print as indented JSON (two spaces).
    ///
    /// Works for any shape. Serializing a `Value` cannot fail in practice, but if it
    /// ever does the compact form is returned instead.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }

    /// JSON kind name, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        json_kind(&self.0)
    }
}

impl From<Value> for OpaqueValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for OpaqueValue {
    /// Compact single-line JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a JSON value's kind.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
