use serde_json::json;
use tracelint_engine::analyze_skill_routing;
use tracelint_types::{CheckSpec, Report, ToolCallRecord};

fn record(tool: &str, input: serde_json::Value, order: usize) -> ToolCallRecord {
    ToolCallRecord::new(tool, input, order)
}

fn run(records: &[ToolCallRecord], spec_json: &str) -> Report {
    let spec = CheckSpec::from_json(spec_json).expect("valid spec");
    analyze_skill_routing(records, &spec)
}

#[test]
fn skill_invoked_is_exact_match_passes() {
    let records = vec![record(
        "Skill",
        json!({"skill": "code-analysis:claudemem-search"}),
        0,
    )];
    let report = run(
        &records,
        r#"{"skill_invoked_is": "code-analysis:claudemem-search"}"#,
    );
    assert!(report.passed);
    assert_eq!(report.checks.len(), 1);
    assert_eq!(report.checks[0].check, "skill_invoked_is");
}

#[test]
fn skill_invoked_is_is_case_sensitive_and_lists_candidates() {
    let records = vec![record(
        "Skill",
        json!({"skill": "Code-Analysis:Claudemem-Search"}),
        0,
    )];
    let report = run(
        &records,
        r#"{"skill_invoked_is": "code-analysis:claudemem-search"}"#,
    );
    assert!(!report.passed);
    assert!(report.checks[0].detail.contains("Code-Analysis:Claudemem-Search"));
}

#[test]
fn skill_invoked_contains_is_case_insensitive() {
    let records = vec![record("Skill", json!({"skill": "code-analysis:ClaudeMem-search"}), 0)];
    let report = run(&records, r#"{"skill_invoked_contains": "claudemem"}"#);
    assert!(report.passed);
}

#[test]
fn skill_name_used_as_delegation_target_is_flagged() {
    let records = vec![record(
        "Task",
        json!({"subagent_type": "code-analysis:claudemem-search", "prompt": "search"}),
        0,
    )];
    let report = run(&records, r#"{"no_task_with_skill_name": true}"#);
    assert!(!report.passed);
    assert!(
        report.checks[0]
            .detail
            .contains("code-analysis:claudemem-search")
    );
}

#[test]
fn proper_agent_delegation_is_not_flagged_as_skill_confusion() {
    let records = vec![record(
        "Task",
        json!({"subagent_type": "code-analysis:detective", "prompt": "dig"}),
        0,
    )];
    let report = run(&records, r#"{"no_task_with_skill_name": true}"#);
    assert!(report.passed);
}

#[test]
fn bash_typo_is_detected_with_evidence() {
    let records = vec![record("Bash", json!({"command": "run clademem search foo"}), 0)];
    let report = run(&records, r#"{"no_bash_typo_clademem": true}"#);
    assert!(!report.passed);
    let detail = &report.checks[0].detail;
    assert!(detail.contains("\"typo\""), "detail: {detail}");
    assert!(detail.contains("clademem"), "detail: {detail}");
}

#[test]
fn correct_spelling_passes_and_typo_alongside_fails() {
    let correct = vec![record(
        "Bash",
        json!({"command": "claudemem search 'query'"}),
        0,
    )];
    let report = run(&correct, r#"{"bash_claudemem_spelled_correctly": true}"#);
    assert!(report.passed);

    // Correct spelling in one command does not excuse a typo in another
    let mixed = vec![
        record("Bash", json!({"command": "claudemem search 'query'"}), 0),
        record("Bash", json!({"command": "claudmem stats"}), 1),
    ];
    let report = run(&mixed, r#"{"bash_claudemem_spelled_correctly": true}"#);
    assert!(!report.passed);
    assert!(report.checks[0].detail.contains("claudmem"));
}

#[test]
fn spelling_check_passes_vacuously_without_claudemem_commands() {
    let records = vec![record("Bash", json!({"command": "ls -la"}), 0)];
    let report = run(&records, r#"{"bash_claudemem_spelled_correctly": true}"#);
    assert!(report.passed);
    assert!(report.checks[0].detail.contains("No claudemem Bash commands"));
}

#[test]
fn no_skill_invoked_treats_absence_as_success() {
    let records = vec![record("Bash", json!({"command": "ls"}), 0)];
    let report = run(&records, r#"{"no_skill_invoked": true}"#);
    assert!(report.passed);

    let records = vec![record("Skill", json!({"skill": "a:b"}), 0)];
    let report = run(&records, r#"{"no_skill_invoked": true}"#);
    assert!(!report.passed);
    assert!(report.checks[0].detail.contains("a:b"));
}

#[test]
fn skill_min_count_is_inclusive() {
    let records = vec![
        record("Skill", json!({"skill": "a:b"}), 0),
        record("Skill", json!({"skill": "a:c"}), 1),
    ];
    assert!(run(&records, r#"{"skill_min_count": 2}"#).passed);
    assert!(!run(&records, r#"{"skill_min_count": 3}"#).passed);
}

#[test]
fn task_agent_is_requires_presence() {
    let records = vec![record("Bash", json!({"command": "ls"}), 0)];
    let report = run(&records, r#"{"task_agent_is": "code-analysis:detective"}"#);
    assert!(!report.passed);
    assert!(report.checks[0].detail.contains("No Task calls found"));
}

#[test]
fn empty_spec_passes_vacuously_with_summary_intact() {
    let records = vec![
        record("Skill", json!({"skill": "a:b"}), 0),
        record("Task", json!({"subagent_type": "dev:researcher"}), 1),
    ];
    let report = run(&records, "{}");
    assert!(report.passed);
    assert!(report.checks.is_empty());
    assert_eq!(report.summary.skill_calls, 1);
    assert_eq!(report.summary.task_calls, 1);
    assert_eq!(report.summary.skills_invoked, vec!["a:b"]);
    assert_eq!(report.summary.agents_used, vec!["dev:researcher"]);
}

#[test]
fn results_follow_catalog_order_not_spec_key_order() {
    let records = vec![record("Skill", json!({"skill": "a:b"}), 0)];
    // Keys deliberately listed in reverse of catalog order
    let report = run(
        &records,
        r#"{"skill_min_count": 1, "no_skill_invoked": true, "skill_invoked_is": "a:b"}"#,
    );
    let names: Vec<&str> = report.checks.iter().map(|c| c.check.as_str()).collect();
    assert_eq!(
        names,
        vec!["skill_invoked_is", "no_skill_invoked", "skill_min_count"]
    );
}

#[test]
fn adding_an_unrelated_passing_check_does_not_change_existing_outcomes() {
    let records = vec![record("Skill", json!({"skill": "a:b"}), 0)];
    let base = run(&records, r#"{"skill_invoked_is": "wrong"}"#);
    let extended = run(
        &records,
        r#"{"skill_invoked_is": "wrong", "skill_min_count": 1}"#,
    );
    assert!(!base.passed);
    assert!(!extended.passed);
    assert_eq!(base.checks[0].passed, extended.checks[0].passed);
    assert_eq!(base.checks[0].detail, extended.checks[0].detail);
}

#[test]
fn evaluation_is_deterministic() {
    let records = vec![
        record("Skill", json!({"skill": "a:b"}), 0),
        record("Bash", json!({"command": "claudmem ls"}), 1),
    ];
    let spec = r#"{"skill_invoked_is": "a:b", "no_bash_typo_clademem": true}"#;
    let first = serde_json::to_string(&run(&records, spec)).unwrap();
    let second = serde_json::to_string(&run(&records, spec)).unwrap();
    assert_eq!(first, second);
}
