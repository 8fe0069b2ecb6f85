// Engine module - Core processing logic (extraction, classification, evaluation)
// This layer sits between raw transcript text and CLI presentation

pub mod checks;
pub mod classify;
pub mod extract;
mod schema;

pub use classify::Buckets;
pub use extract::{extract_tool_calls, extract_tool_calls_from_file};

use tracelint_types::{CheckSpec, Report, ToolCallRecord};

// Façade API - Stable public interface for CLI layer
// CLI should use these functions instead of directly accessing internal modules

/// Run the skill-routing checklist over extracted tool calls.
pub fn analyze_skill_routing(records: &[ToolCallRecord], spec: &CheckSpec) -> Report {
    let buckets = Buckets::classify(records);
    checks::evaluate(checks::skill::CATALOG, spec, &buckets)
}

/// Run the team-orchestration checklist over extracted tool calls.
pub fn analyze_team_orchestration(records: &[ToolCallRecord], spec: &CheckSpec) -> Report {
    let buckets = Buckets::classify(records);
    checks::evaluate(checks::team::CATALOG, spec, &buckets)
}
