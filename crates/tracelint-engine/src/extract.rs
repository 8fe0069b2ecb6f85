use std::path::Path;

use tracelint_types::{Result, ToolCallRecord};

use crate::schema::{AssistantContent, TranscriptRecord};

/// Extract the ordered tool-call records from transcript text.
///
/// Each line is parsed independently; blank lines and lines that are not
/// valid JSON are skipped without diagnostics (transcripts routinely
/// contain noise lines). `order_index` is the running count of records
/// produced so far, monotonic across the whole transcript.
pub fn extract_tool_calls(text: &str) -> Vec<ToolCallRecord> {
    let mut records = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Ok(TranscriptRecord::Assistant(event)) = serde_json::from_str(line) else {
            continue;
        };
        for block in event.message.content {
            if let AssistantContent::ToolUse { name, input } = block {
                let order_index = records.len();
                records.push(ToolCallRecord::new(name, input, order_index));
            }
        }
    }

    records
}

/// Read and extract a transcript file. An unreadable file is fatal and
/// propagates to the caller; nothing inside the file is.
pub fn extract_tool_calls_from_file(path: &Path) -> Result<Vec<ToolCallRecord>> {
    let text = std::fs::read_to_string(path)?;
    Ok(extract_tool_calls(&text))
}
