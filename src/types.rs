/// Shared serializable output types for all commands.
///
/// These types are what gets written to stdout, either as JSON or rendered
/// as a table. They are decoupled from the internal `ConfigStore` type.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of a loaded output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigEntryOutput {
    /// Key, dotted when selected with `--key`.
    pub key: String,
    /// JSON type name of the value (e.g., "string", "object").
    pub kind: String,
    /// The value itself.
    pub value: Value,
}

impl ConfigEntryOutput {
    #[must_use]
    pub fn new(key: &str, value: &Value) -> Self {
        Self {
            key: key.to_owned(),
            kind: value_kind(value).to_owned(),
            value: value.clone(),
        }
    }
}

/// Summary of a loaded output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfigReport {
    /// Path of the loaded file.
    pub path: String,
    /// Detected format ("json" or "yaml").
    pub format: String,
    /// Selected entries.
    pub entries: Vec<ConfigEntryOutput>,
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
