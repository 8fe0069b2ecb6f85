use serde::{Deserialize, Serialize};

/// Outcome of one predicate evaluation.
///
/// `detail` always carries enough concrete evidence (offending values,
/// counts, "none found") to diagnose a failure without re-reading the
/// transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub check: String,
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn new(check: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            check: check.to_string(),
            passed,
            detail: detail.into(),
        }
    }
}

/// Unconditional per-run statistics, emitted regardless of which checks
/// were requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,
    pub total_tool_calls: usize,
    pub task_calls: usize,
    pub bash_calls: usize,
    pub skill_calls: usize,
    pub read_calls: usize,
    pub write_calls: usize,
    pub claudish_calls: usize,
    pub skills_invoked: Vec<String>,
    pub agents_used: Vec<String>,
}

/// Aggregate verdict over one transcript and one check spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: Summary,
}

impl Report {
    /// Assemble the report from collected results. Overall pass is the
    /// conjunction; zero requested checks passes vacuously.
    pub fn from_results(checks: Vec<CheckResult>, mut summary: Summary) -> Self {
        let passed = checks.iter().all(|r| r.passed);
        summary.total_checks = checks.len();
        summary.passed_checks = checks.iter().filter(|r| r.passed).count();
        summary.failed_checks = checks.iter().filter(|r| !r.passed).count();
        Self {
            passed,
            checks,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_check_list_passes_vacuously() {
        let report = Report::from_results(Vec::new(), Summary::default());
        assert!(report.passed);
        assert!(report.checks.is_empty());
        assert_eq!(report.summary.total_checks, 0);
    }

    #[test]
    fn one_failure_fails_the_report_without_hiding_others() {
        let report = Report::from_results(
            vec![
                CheckResult::new("a", true, "ok"),
                CheckResult::new("b", false, "bad"),
                CheckResult::new("c", true, "ok"),
            ],
            Summary::default(),
        );
        assert!(!report.passed);
        assert_eq!(report.checks.len(), 3);
        assert_eq!(report.summary.passed_checks, 2);
        assert_eq!(report.summary.failed_checks, 1);
    }
}
