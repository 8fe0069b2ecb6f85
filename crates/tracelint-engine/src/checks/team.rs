// Team-orchestration checklist: validates delegation fan-out, proxy-mode
// prompt headers, vote templates, session directory hygiene, claudish
// shell invocations, and investigation ordering.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracelint_types::CheckResult;

use super::common::{excerpt, first_line, min_count_result, missing_or, task_agent_is};
use super::{Activation, CheckDef};
use crate::classify::Buckets;

const PROXY_MARKER: &str = "PROXY_MODE";

/// Tools whose use before the first real dispatch counts as
/// pre-digestion.
const INVESTIGATION_TOOLS: &[&str] = &["Read", "Grep", "Glob", "WebSearch", "WebFetch"];

/// Reads of these files are setup, not investigation: the preferences
/// file (step 1b of the orchestration) and the settings check.
const SETUP_PATH_PATTERNS: &[&str] = &["multimodel-team.json", "settings.json"];

/// Path fragments that mark a post-run verification read: captured
/// model output, exit status, or stderr.
const RESULT_PATH_MARKERS: &[&str] = &[".md", ".exit", "stderr"];

/// Loose heuristic for "output redirected to a markdown file". Not a
/// shell grammar; a redirect to any `.md` path qualifies.
static MD_REDIRECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r">\s*\S+\.md\b").expect("valid redirect pattern"));

/// Fixed declaration order; report entries follow this order regardless
/// of how the caller's spec is keyed.
pub const CATALOG: &[CheckDef] = &[
    CheckDef {
        name: "task_agent_is",
        activation: Activation::ValueParam,
        run: task_agent_is,
    },
    CheckDef {
        name: "task_min_count",
        activation: Activation::ValueParam,
        run: task_min_count,
    },
    CheckDef {
        name: "has_proxy_mode",
        activation: Activation::Flag,
        run: has_proxy_mode,
    },
    CheckDef {
        name: "proxy_mode_first_line",
        activation: Activation::Flag,
        run: proxy_mode_first_line,
    },
    CheckDef {
        name: "proxy_mode_model_contains",
        activation: Activation::ValueParam,
        run: proxy_mode_model_contains,
    },
    CheckDef {
        name: "no_proxy_mode_for_internal",
        activation: Activation::Flag,
        run: no_proxy_mode_for_internal,
    },
    CheckDef {
        name: "run_in_background",
        activation: Activation::Flag,
        run: run_in_background,
    },
    CheckDef {
        name: "has_vote_template",
        activation: Activation::Flag,
        run: has_vote_template,
    },
    CheckDef {
        name: "has_vote_format",
        activation: Activation::Flag,
        run: has_vote_format,
    },
    CheckDef {
        name: "no_predigest",
        activation: Activation::Flag,
        run: no_predigest,
    },
    CheckDef {
        name: "session_dir_pattern",
        activation: Activation::ValueParam,
        run: session_dir_pattern,
    },
    CheckDef {
        name: "no_tmp_dir",
        activation: Activation::Flag,
        run: no_tmp_dir,
    },
    CheckDef {
        name: "bash_min_count",
        activation: Activation::ValueParam,
        run: bash_min_count,
    },
    CheckDef {
        name: "bash_claudish_has_stdin",
        activation: Activation::Flag,
        run: bash_claudish_has_stdin,
    },
    CheckDef {
        name: "bash_claudish_captures_exit",
        activation: Activation::Flag,
        run: bash_claudish_captures_exit,
    },
    CheckDef {
        name: "bash_claudish_redirects_md",
        activation: Activation::Flag,
        run: bash_claudish_redirects_md,
    },
    CheckDef {
        name: "verifies_results",
        activation: Activation::Flag,
        run: verifies_results,
    },
];

fn task_min_count(param: &Value, buckets: &Buckets) -> CheckResult {
    min_count_result("task_min_count", "Task calls", buckets.task.len(), param)
}

fn has_proxy_mode(_param: &Value, buckets: &Buckets) -> CheckResult {
    let found = buckets
        .task
        .iter()
        .any(|tc| tc.prompt().contains(PROXY_MARKER));
    let detail = if found {
        "PROXY_MODE found in Task prompt"
    } else {
        "No PROXY_MODE found in any Task prompt"
    };
    CheckResult::new("has_proxy_mode", found, detail)
}

fn proxy_mode_first_line(_param: &Value, buckets: &Buckets) -> CheckResult {
    let mut all_first_line = true;
    let mut parts: Vec<String> = Vec::new();
    for tc in &buckets.task {
        let prompt = tc.prompt();
        if !prompt.contains(PROXY_MARKER) {
            continue;
        }
        let line = first_line(prompt);
        if line.starts_with(PROXY_MARKER) {
            parts.push(format!("OK: \"{}\"", excerpt_short(line)));
        } else {
            all_first_line = false;
            parts.push(format!("WRONG first line: \"{}\"", excerpt_short(line)));
        }
    }
    if parts.is_empty() {
        all_first_line = false;
        parts.push("No PROXY_MODE found in any Task".to_string());
    }
    CheckResult::new("proxy_mode_first_line", all_first_line, parts.join("; "))
}

fn proxy_mode_model_contains(param: &Value, buckets: &Buckets) -> CheckResult {
    let keyword = param.as_str().unwrap_or("").to_lowercase();
    for tc in &buckets.task {
        for line in tc.prompt().lines() {
            let line = line.trim();
            if !line.starts_with(PROXY_MARKER) {
                continue;
            }
            let model_id = line.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
            if !keyword.is_empty() && model_id.to_lowercase().contains(&keyword) {
                return CheckResult::new(
                    "proxy_mode_model_contains",
                    true,
                    format!("Found: PROXY_MODE: {model_id}"),
                );
            }
        }
    }
    CheckResult::new(
        "proxy_mode_model_contains",
        false,
        format!("No PROXY_MODE line containing \"{keyword}\" found"),
    )
}

fn no_proxy_mode_for_internal(_param: &Value, buckets: &Buckets) -> CheckResult {
    let has_proxy = buckets
        .task
        .iter()
        .any(|tc| tc.prompt().contains(PROXY_MARKER));
    let detail = if has_proxy {
        "Found PROXY_MODE in Task prompt for internal model"
    } else {
        "No PROXY_MODE in Task prompts (correct for internal)"
    };
    CheckResult::new("no_proxy_mode_for_internal", !has_proxy, detail)
}

fn run_in_background(_param: &Value, buckets: &Buckets) -> CheckResult {
    let offenders: Vec<&str> = buckets
        .task
        .iter()
        .filter(|tc| !tc.bool_field("run_in_background"))
        .map(|tc| missing_or(tc.subagent_type()))
        .collect();
    if offenders.is_empty() {
        CheckResult::new(
            "run_in_background",
            true,
            format!(
                "All {} Task calls use run_in_background",
                buckets.task.len()
            ),
        )
    } else {
        CheckResult::new(
            "run_in_background",
            false,
            format!("Task calls missing run_in_background=true: {offenders:?}"),
        )
    }
}

/// Free-text fields a marker check scans: Task prompts and Write
/// contents (a vote template may be delivered either way).
fn marker_texts<'a>(buckets: &'a Buckets<'a>) -> impl Iterator<Item = &'a str> {
    buckets
        .task
        .iter()
        .map(|tc| tc.prompt())
        .chain(buckets.write.iter().map(|wc| wc.content()))
}

fn has_vote_template(_param: &Value, buckets: &Buckets) -> CheckResult {
    let found =
        marker_texts(buckets).any(|t| t.contains("Team Vote") || t.contains("Independent Review"));
    let detail = if found {
        "Vote template found in Task prompt"
    } else {
        "No vote template text found in any Task prompt"
    };
    CheckResult::new("has_vote_template", found, detail)
}

fn has_vote_format(_param: &Value, buckets: &Buckets) -> CheckResult {
    let found = marker_texts(buckets)
        .any(|t| t.contains("VERDICT") && (t.contains("APPROVE") || t.contains("REJECT")));
    let detail = if found {
        "Vote format block found"
    } else {
        "No VERDICT/APPROVE/REJECT format found in Task prompts"
    };
    CheckResult::new("has_vote_format", found, detail)
}

fn no_predigest(_param: &Value, buckets: &Buckets) -> CheckResult {
    // First real work dispatch: delegation or a genuine claudish model
    // invocation, whichever comes first. With neither present, every
    // investigative call counts.
    let first_dispatch = buckets
        .task
        .first()
        .map(|tc| tc.order_index)
        .into_iter()
        .chain(buckets.claudish.first().map(|bc| bc.order_index))
        .min()
        .unwrap_or(usize::MAX);

    let offenders: Vec<&str> = buckets
        .all
        .iter()
        .filter(|record| record.order_index < first_dispatch)
        .filter(|record| INVESTIGATION_TOOLS.contains(&record.tool_name.as_str()))
        .filter(|record| {
            let path = record.file_path();
            !SETUP_PATH_PATTERNS.iter().any(|pat| path.contains(pat))
        })
        .map(|record| record.tool_name.as_str())
        .collect();

    if offenders.is_empty() {
        CheckResult::new(
            "no_predigest",
            true,
            "No pre-digestion tools before first dispatch",
        )
    } else {
        CheckResult::new(
            "no_predigest",
            false,
            format!("Pre-digestion detected: {offenders:?} called before first dispatch"),
        )
    }
}

fn session_dir_pattern(param: &Value, buckets: &Buckets) -> CheckResult {
    let pattern = param.as_str().unwrap_or("");
    let found = !pattern.is_empty()
        && buckets
            .bash
            .iter()
            .any(|bc| bc.command().contains("mkdir") && bc.command().contains(pattern));
    let detail = if found {
        format!("Session dir with \"{pattern}\" found in mkdir")
    } else {
        format!("No mkdir with \"{pattern}\" found in Bash calls")
    };
    CheckResult::new("session_dir_pattern", found, detail)
}

fn no_tmp_dir(_param: &Value, buckets: &Buckets) -> CheckResult {
    let in_mkdir = buckets
        .bash
        .iter()
        .any(|bc| bc.command().contains("mkdir") && bc.command().contains("/tmp/"));
    let in_prompt = buckets.task.iter().any(|tc| tc.prompt().contains("/tmp/"));
    let has_tmp = in_mkdir || in_prompt;
    let detail = if has_tmp {
        "Found /tmp/ path in Bash mkdir or Task prompt"
    } else {
        "No /tmp/ paths found"
    };
    CheckResult::new("no_tmp_dir", !has_tmp, detail)
}

fn bash_min_count(param: &Value, buckets: &Buckets) -> CheckResult {
    min_count_result(
        "bash_min_count",
        "claudish invocations",
        buckets.claudish.len(),
        param,
    )
}

/// Uniform-property check over the claudish bucket: every command must
/// satisfy the property; an empty bucket passes vacuously.
fn all_claudish(
    check: &'static str,
    buckets: &Buckets,
    property: impl Fn(&str) -> bool,
    pass_label: &str,
    fail_label: &str,
) -> CheckResult {
    if buckets.claudish.is_empty() {
        return CheckResult::new(check, true, "No claudish invocations to check");
    }
    let offenders: Vec<&str> = buckets
        .claudish
        .iter()
        .map(|bc| bc.command())
        .filter(|cmd| !property(cmd))
        .map(excerpt)
        .collect();
    if offenders.is_empty() {
        CheckResult::new(
            check,
            true,
            format!("All {} claudish invocations {pass_label}", buckets.claudish.len()),
        )
    } else {
        CheckResult::new(check, false, format!("{fail_label}: {offenders:?}"))
    }
}

fn bash_claudish_has_stdin(_param: &Value, buckets: &Buckets) -> CheckResult {
    all_claudish(
        "bash_claudish_has_stdin",
        buckets,
        |cmd| cmd.contains("--stdin"),
        "pass the prompt via --stdin",
        "claudish invocations missing --stdin",
    )
}

fn bash_claudish_captures_exit(_param: &Value, buckets: &Buckets) -> CheckResult {
    all_claudish(
        "bash_claudish_captures_exit",
        buckets,
        |cmd| cmd.contains("$?"),
        "capture the exit status",
        "claudish invocations not capturing $?",
    )
}

fn bash_claudish_redirects_md(_param: &Value, buckets: &Buckets) -> CheckResult {
    all_claudish(
        "bash_claudish_redirects_md",
        buckets,
        |cmd| MD_REDIRECT.is_match(cmd),
        "redirect output to a .md file",
        "claudish invocations without a .md output redirect",
    )
}

fn verifies_results(_param: &Value, buckets: &Buckets) -> CheckResult {
    let last_launch = buckets
        .task
        .iter()
        .chain(buckets.claudish.iter())
        .map(|record| record.order_index)
        .max();

    let Some(last_launch) = last_launch else {
        return CheckResult::new(
            "verifies_results",
            true,
            "No model invocations to verify",
        );
    };

    let result_reads = buckets
        .read
        .iter()
        .filter(|rc| rc.order_index > last_launch)
        .filter(|rc| {
            let path = rc.file_path();
            RESULT_PATH_MARKERS.iter().any(|m| path.contains(m))
        })
        .count();

    if result_reads > 0 {
        CheckResult::new(
            "verifies_results",
            true,
            format!("{result_reads} result-file reads after final model launch"),
        )
    } else {
        CheckResult::new(
            "verifies_results",
            false,
            format!("No reads of result/exit/stderr files after last model launch (order {last_launch})"),
        )
    }
}

fn excerpt_short(line: &str) -> &str {
    match line.char_indices().nth(60) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
