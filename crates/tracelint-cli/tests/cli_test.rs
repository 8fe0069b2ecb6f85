use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write as _;
use tempfile::NamedTempFile;

fn transcript_file(lines: &[serde_json::Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write line");
    }
    file
}

fn assistant_with_tool(name: &str, input: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "type": "assistant",
        "message": {"content": [{"type": "tool_use", "id": "t1", "name": name, "input": input}]}
    })
}

fn tracelint() -> Command {
    Command::cargo_bin("tracelint").expect("tracelint binary")
}

#[test]
fn passing_checklist_exits_zero_with_report_on_stdout() {
    let file = transcript_file(&[assistant_with_tool(
        "Skill",
        serde_json::json!({"skill": "code-analysis:claudemem-search"}),
    )]);

    tracelint()
        .arg("skill")
        .arg(file.path())
        .arg(r#"{"skill_invoked_is": "code-analysis:claudemem-search"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"passed\": true"))
        .stdout(predicate::str::contains("skill_invoked_is"));
}

#[test]
fn failing_checklist_exits_one_but_still_prints_full_report() {
    let file = transcript_file(&[
        assistant_with_tool("Bash", serde_json::json!({"command": "run clademem search"})),
        assistant_with_tool("Skill", serde_json::json!({"skill": "a:b"})),
    ]);

    tracelint()
        .arg("skill")
        .arg(file.path())
        .arg(r#"{"no_bash_typo_clademem": true, "skill_min_count": 1}"#)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"passed\": false"))
        // the passing check is reported alongside the failing one
        .stdout(predicate::str::contains("skill_min_count"))
        .stdout(predicate::str::contains("clademem"));
}

#[test]
fn team_variant_runs_its_own_catalog() {
    let file = transcript_file(&[assistant_with_tool(
        "Task",
        serde_json::json!({
            "subagent_type": "dev:researcher",
            "prompt": "PROXY_MODE: x-ai/grok-4\nReview",
            "run_in_background": true
        }),
    )]);

    tracelint()
        .arg("team")
        .arg(file.path())
        .arg(r#"{"task_agent_is": "dev:researcher", "has_proxy_mode": true, "run_in_background": true}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("has_proxy_mode"));
}

#[test]
fn empty_check_spec_passes_vacuously() {
    let file = transcript_file(&[assistant_with_tool(
        "Bash",
        serde_json::json!({"command": "ls"}),
    )]);

    tracelint()
        .arg("team")
        .arg(file.path())
        .arg("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"checks\": []"))
        .stdout(predicate::str::contains("\"bash_calls\": 1"));
}

#[test]
fn missing_arguments_print_usage_and_exit_one() {
    tracelint()
        .arg("skill")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn unreadable_transcript_is_an_infrastructure_failure() {
    tracelint()
        .arg("skill")
        .arg("/no/such/file.jsonl")
        .arg("{}")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to read transcript"));
}

#[test]
fn invalid_check_spec_json_is_an_infrastructure_failure() {
    let file = transcript_file(&[]);
    tracelint()
        .arg("skill")
        .arg(file.path())
        .arg("not json")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("checks JSON"));
}
