// Predicates and helpers shared by both checklist variants.

use serde_json::Value;
use tracelint_types::CheckResult;

use crate::classify::Buckets;

/// Every delegation call must target the expected agent. Zero Task
/// calls is itself a failure: this check requires the delegation to
/// have happened at all.
pub(super) fn task_agent_is(param: &Value, buckets: &Buckets) -> CheckResult {
    let expected = param.as_str().unwrap_or("");
    if buckets.task.is_empty() {
        return CheckResult::new(
            "task_agent_is",
            false,
            format!("No Task calls found (expected agent: {expected})"),
        );
    }

    let wrong: Vec<&str> = buckets
        .task
        .iter()
        .map(|tc| missing_or(tc.subagent_type()))
        .filter(|agent| *agent != expected)
        .collect();

    if wrong.is_empty() {
        CheckResult::new(
            "task_agent_is",
            true,
            format!("All {} Task calls use {expected}", buckets.task.len()),
        )
    } else {
        CheckResult::new(
            "task_agent_is",
            false,
            format!("Wrong agents used: {wrong:?} (expected: {expected})"),
        )
    }
}

/// Inclusive lower-bound count check with a uniform detail string.
pub(super) fn min_count_result(
    check: &'static str,
    label: &str,
    actual: usize,
    param: &Value,
) -> CheckResult {
    let minimum = param.as_i64().unwrap_or(0);
    CheckResult::new(
        check,
        actual as i64 >= minimum,
        format!("{actual} {label} (minimum: {minimum})"),
    )
}

/// Substitute the literal `MISSING` for an absent field, so failure
/// details name the offender instead of showing an empty string.
pub(super) fn missing_or(value: &str) -> &str {
    if value.is_empty() { "MISSING" } else { value }
}

/// Truncate a shell command for inclusion in a detail string.
pub(super) fn excerpt(command: &str) -> &str {
    match command.char_indices().nth(80) {
        Some((idx, _)) => &command[..idx],
        None => command,
    }
}

/// First non-blank line of a free-text field, with the whole text
/// trimmed first.
pub(super) fn first_line(text: &str) -> &str {
    text.trim().lines().next().map(str::trim).unwrap_or("")
}
