use anyhow::{Context, Result};
use std::path::Path;

use crate::args::{Cli, Commands};
use tracelint_engine::{analyze_skill_routing, analyze_team_orchestration, extract_tool_calls_from_file};
use tracelint_types::{CheckSpec, Report};

/// Run the selected checklist and print the report to stdout. Returns
/// the overall verdict; I/O and spec-parse failures bubble up as fatal.
pub fn run(cli: Cli) -> Result<bool> {
    let report = match &cli.command {
        Commands::Skill { transcript, checks } => {
            analyze(transcript, checks, analyze_skill_routing)?
        }
        Commands::Team { transcript, checks } => {
            analyze(transcript, checks, analyze_team_orchestration)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(report.passed)
}

fn analyze(
    transcript: &Path,
    checks: &str,
    analyzer: fn(&[tracelint_types::ToolCallRecord], &CheckSpec) -> Report,
) -> Result<Report> {
    let spec = CheckSpec::from_json(checks).context("Failed to parse checks JSON")?;
    let records = extract_tool_calls_from_file(transcript)
        .with_context(|| format!("Failed to read transcript: {}", transcript.display()))?;
    Ok(analyzer(&records, &spec))
}
