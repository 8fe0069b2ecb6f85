use serde::Deserialize;
use serde_json::Value;

/// One line of a Claude Code JSONL transcript. Only assistant events
/// carry tool invocations; everything else deserializes to `Unknown`
/// and is dropped by the extractor.
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "kebab-case")]
pub(crate) enum TranscriptRecord {
    Assistant(AssistantRecord),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantRecord {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub content: Vec<AssistantContent>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub(crate) enum AssistantContent {
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Unknown,
}
