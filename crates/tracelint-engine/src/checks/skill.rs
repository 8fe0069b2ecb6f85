// Skill-routing checklist: validates that an agent picked the Skill
// tool over Task/Bash alternatives, targeted the right skill, and
// spelled the claudemem binary correctly in shell commands.

use once_cell::sync::Lazy;
use serde_json::{Value, json};
use std::collections::HashSet;
use tracelint_types::CheckResult;

use super::common::{excerpt, min_count_result, task_agent_is};
use super::{Activation, CheckDef};
use crate::classify::Buckets;

/// Skill identifiers that must never appear as a Task `subagent_type`.
/// Invoking a skill through the delegation mechanism is the classic
/// routing mistake this catalog exists to catch.
static KNOWN_SKILLS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "code-analysis:claudemem-search",
        "code-analysis:claudemem-orchestration",
        "code-analysis:architect-detective",
        "code-analysis:developer-detective",
        "code-analysis:tester-detective",
        "code-analysis:debugger-detective",
        "code-analysis:ultrathink-detective",
        "code-analysis:deep-analysis",
        "code-analysis:investigate",
        "code-analysis:code-search-selector",
        "code-analysis:search-interceptor",
        "code-analysis:cross-plugin-detective",
        "code-analysis:claudish-usage",
    ]
    .into_iter()
    .collect()
});

/// Known misspellings of `claudemem`. The trailing-space entry catches
/// a dropped final `m` followed by an argument.
const CLAUDEMEM_TYPOS: &[&str] = &[
    "clademem",
    "claudmem",
    "claudeem",
    "cluademem",
    "claudememm",
    "claudeme ",
    "claudmen",
    "cladumem",
];

/// Fixed declaration order; report entries follow this order regardless
/// of how the caller's spec is keyed.
pub const CATALOG: &[CheckDef] = &[
    CheckDef {
        name: "skill_invoked_is",
        activation: Activation::ValueParam,
        run: skill_invoked_is,
    },
    CheckDef {
        name: "skill_invoked_contains",
        activation: Activation::ValueParam,
        run: skill_invoked_contains,
    },
    CheckDef {
        name: "no_skill_invoked",
        activation: Activation::Flag,
        run: no_skill_invoked,
    },
    CheckDef {
        name: "skill_min_count",
        activation: Activation::ValueParam,
        run: skill_min_count,
    },
    CheckDef {
        name: "no_task_with_skill_name",
        activation: Activation::Flag,
        run: no_task_with_skill_name,
    },
    CheckDef {
        name: "task_agent_is",
        activation: Activation::ValueParam,
        run: task_agent_is,
    },
    CheckDef {
        name: "bash_claudemem_spelled_correctly",
        activation: Activation::Flag,
        run: bash_claudemem_spelled_correctly,
    },
    CheckDef {
        name: "no_bash_typo_clademem",
        activation: Activation::Flag,
        run: no_bash_typo_clademem,
    },
];

fn observed_skills(buckets: &Buckets) -> Vec<String> {
    buckets.skill.iter().map(|sc| sc.skill().to_string()).collect()
}

fn describe_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        format!("{skills:?}")
    }
}

fn skill_invoked_is(param: &Value, buckets: &Buckets) -> CheckResult {
    let expected = param.as_str().unwrap_or("");
    let actual = observed_skills(buckets);
    let found = actual.iter().any(|name| name == expected);
    let detail = if found {
        format!("Skill \"{expected}\" invoked correctly")
    } else {
        format!(
            "Expected skill \"{expected}\" not found. Actual skills: {}",
            describe_skills(&actual)
        )
    };
    CheckResult::new("skill_invoked_is", found, detail)
}

fn skill_invoked_contains(param: &Value, buckets: &Buckets) -> CheckResult {
    let keyword = param.as_str().unwrap_or("").to_lowercase();
    let actual = observed_skills(buckets);
    let found = !keyword.is_empty() && actual.iter().any(|n| n.to_lowercase().contains(&keyword));
    let detail = if found {
        format!("Skill containing \"{keyword}\" found")
    } else {
        format!(
            "No skill containing \"{keyword}\" invoked. Actual skills: {}",
            describe_skills(&actual)
        )
    };
    CheckResult::new("skill_invoked_contains", found, detail)
}

fn no_skill_invoked(_param: &Value, buckets: &Buckets) -> CheckResult {
    if buckets.skill.is_empty() {
        CheckResult::new(
            "no_skill_invoked",
            true,
            "No Skill tool calls (correct for simple task)",
        )
    } else {
        CheckResult::new(
            "no_skill_invoked",
            false,
            format!(
                "{} unnecessary Skill calls: {:?}",
                buckets.skill.len(),
                buckets.skills_invoked()
            ),
        )
    }
}

fn skill_min_count(param: &Value, buckets: &Buckets) -> CheckResult {
    min_count_result("skill_min_count", "Skill calls", buckets.skill.len(), param)
}

fn no_task_with_skill_name(_param: &Value, buckets: &Buckets) -> CheckResult {
    let offenders: Vec<&str> = buckets
        .task
        .iter()
        .map(|tc| tc.subagent_type())
        .filter(|agent| KNOWN_SKILLS.contains(agent))
        .collect();
    if offenders.is_empty() {
        CheckResult::new(
            "no_task_with_skill_name",
            true,
            "No Task calls attempted with skill names as subagent_type",
        )
    } else {
        CheckResult::new(
            "no_task_with_skill_name",
            false,
            format!("Task tool incorrectly used with skill names: {offenders:?}"),
        )
    }
}

/// Pair each typo found in a command with a truncated excerpt of it.
fn find_typos(buckets: &Buckets) -> Vec<Value> {
    let mut found = Vec::new();
    for bc in &buckets.bash {
        let lowered = bc.command().to_lowercase();
        for typo in CLAUDEMEM_TYPOS {
            if lowered.contains(typo) {
                found.push(json!({"typo": typo, "command": excerpt(bc.command())}));
            }
        }
    }
    found
}

fn bash_claudemem_spelled_correctly(_param: &Value, buckets: &Buckets) -> CheckResult {
    let relevant: Vec<&str> = buckets
        .bash
        .iter()
        .map(|bc| bc.command())
        .filter(|cmd| {
            let lowered = cmd.to_lowercase();
            lowered.contains("claudemem") || CLAUDEMEM_TYPOS.iter().any(|t| lowered.contains(t))
        })
        .collect();

    if relevant.is_empty() {
        return CheckResult::new(
            "bash_claudemem_spelled_correctly",
            true,
            "No claudemem Bash commands to check (OK if skill was only loaded)",
        );
    }

    let misspelled = find_typos(buckets);
    if misspelled.is_empty() {
        CheckResult::new(
            "bash_claudemem_spelled_correctly",
            true,
            format!(
                "All {} claudemem commands spelled correctly",
                relevant.len()
            ),
        )
    } else {
        CheckResult::new(
            "bash_claudemem_spelled_correctly",
            false,
            format!("Misspellings found: {}", Value::Array(misspelled)),
        )
    }
}

fn no_bash_typo_clademem(_param: &Value, buckets: &Buckets) -> CheckResult {
    let found = find_typos(buckets);
    if found.is_empty() {
        CheckResult::new(
            "no_bash_typo_clademem",
            true,
            "No claudemem typos in Bash commands",
        )
    } else {
        CheckResult::new(
            "no_bash_typo_clademem",
            false,
            format!("Typos found: {}", Value::Array(found)),
        )
    }
}
