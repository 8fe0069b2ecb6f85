use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observed tool invocation, extracted from an assistant message.
///
/// `order_index` is assigned at extraction time as the running count of
/// records produced so far. It is the sole ordering key for before/after
/// reasoning; timestamps are never consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub tool_name: String,
    /// Raw tool input object; field layout depends on `tool_name`.
    pub input: Value,
    pub order_index: usize,
}

impl ToolCallRecord {
    pub fn new(tool_name: impl Into<String>, input: Value, order_index: usize) -> Self {
        Self {
            tool_name: tool_name.into(),
            input,
            order_index,
        }
    }

    /// String-valued input field, or "" when absent or non-string.
    pub fn str_field(&self, name: &str) -> &str {
        self.input.get(name).and_then(Value::as_str).unwrap_or("")
    }

    /// Boolean-valued input field, defaulting to false.
    pub fn bool_field(&self, name: &str) -> bool {
        self.input
            .get(name)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Shell command of a Bash call.
    pub fn command(&self) -> &str {
        self.str_field("command")
    }

    /// Skill identifier of a Skill call.
    pub fn skill(&self) -> &str {
        self.str_field("skill")
    }

    /// Delegation target of a Task call.
    pub fn subagent_type(&self) -> &str {
        self.str_field("subagent_type")
    }

    /// Prompt text of a Task call.
    pub fn prompt(&self) -> &str {
        self.str_field("prompt")
    }

    /// Target path of a Read/Write call.
    pub fn file_path(&self) -> &str {
        self.str_field("file_path")
    }

    /// File contents of a Write call.
    pub fn content(&self) -> &str {
        self.str_field("content")
    }
}
