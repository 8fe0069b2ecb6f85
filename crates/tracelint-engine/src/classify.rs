use tracelint_types::{Summary, ToolCallRecord};

/// Ordered partition of the full record list into per-tool buckets.
///
/// Membership is exact string equality on `tool_name`; a record with an
/// unrecognized tool stays reachable through `all` (for ordering checks)
/// but lands in no named bucket. Insertion order is source order.
pub struct Buckets<'a> {
    pub all: &'a [ToolCallRecord],
    pub task: Vec<&'a ToolCallRecord>,
    pub bash: Vec<&'a ToolCallRecord>,
    pub skill: Vec<&'a ToolCallRecord>,
    pub read: Vec<&'a ToolCallRecord>,
    pub write: Vec<&'a ToolCallRecord>,
    /// Bash calls that genuinely invoke claudish against a model, as
    /// opposed to diagnostics like `which claudish`.
    pub claudish: Vec<&'a ToolCallRecord>,
}

/// A Bash command counts as a claudish model invocation only when both
/// signals are present: the tool name and the model-selection flag.
/// Tool-name-only matches (version checks, incidental mentions) are
/// excluded.
pub fn is_claudish_invocation(command: &str) -> bool {
    command.contains("claudish") && command.contains("--model")
}

impl<'a> Buckets<'a> {
    pub fn classify(records: &'a [ToolCallRecord]) -> Self {
        let mut buckets = Buckets {
            all: records,
            task: Vec::new(),
            bash: Vec::new(),
            skill: Vec::new(),
            read: Vec::new(),
            write: Vec::new(),
            claudish: Vec::new(),
        };

        for record in records {
            match record.tool_name.as_str() {
                "Task" => buckets.task.push(record),
                "Bash" => {
                    if is_claudish_invocation(record.command()) {
                        buckets.claudish.push(record);
                    }
                    buckets.bash.push(record);
                }
                "Skill" => buckets.skill.push(record),
                "Read" => buckets.read.push(record),
                "Write" => buckets.write.push(record),
                _ => {}
            }
        }

        buckets
    }

    /// Skill identifiers in invocation order, `?` for missing fields.
    pub fn skills_invoked(&self) -> Vec<String> {
        self.skill
            .iter()
            .map(|r| named_or_placeholder(r.skill()))
            .collect()
    }

    /// Delegation targets in invocation order, `?` for missing fields.
    pub fn agents_used(&self) -> Vec<String> {
        self.task
            .iter()
            .map(|r| named_or_placeholder(r.subagent_type()))
            .collect()
    }

    /// Bucket counts and extracted lists; emitted with every report,
    /// independent of which checks were requested.
    pub fn summarize(&self) -> Summary {
        Summary {
            total_tool_calls: self.all.len(),
            task_calls: self.task.len(),
            bash_calls: self.bash.len(),
            skill_calls: self.skill.len(),
            read_calls: self.read.len(),
            write_calls: self.write.len(),
            claudish_calls: self.claudish.len(),
            skills_invoked: self.skills_invoked(),
            agents_used: self.agents_used(),
            ..Summary::default()
        }
    }
}

fn named_or_placeholder(value: &str) -> String {
    if value.is_empty() {
        "?".to_string()
    } else {
        value.to_string()
    }
}
