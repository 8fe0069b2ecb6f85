use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Caller-supplied check configuration: a JSON object mapping check names
/// to their parameters (boolean flags, strings, or integer thresholds).
///
/// Keys that name no known check are silently ignored, so specs written
/// for newer catalogs keep working against older binaries and vice versa.
#[derive(Debug, Clone, Default)]
pub struct CheckSpec {
    entries: Map<String, Value>,
}

impl CheckSpec {
    /// Parse the check spec from its JSON literal form. Anything other
    /// than a JSON object is rejected up front.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| Error::InvalidCheckSpec(e.to_string()))?;
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(Error::InvalidCheckSpec(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            ))),
        }
    }

    /// Raw parameter for a check key, if present.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Whether a flag-style check is switched on. Mirrors loose
    /// truthiness: `false`, `0`, `""`, and `null` all read as off.
    pub fn is_enabled(&self, key: &str) -> bool {
        self.entries.get(key).is_some_and(truthy)
    }

    /// String parameter for a value-style check.
    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(Value::as_str)
    }

    /// Integer threshold parameter for a count-style check.
    pub fn int_param(&self, key: &str) -> Option<i64> {
        self.entries.get(key).and_then(Value::as_i64)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
