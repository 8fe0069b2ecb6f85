use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tracelint")]
#[command(about = "Validate agent transcripts against orchestration checklists", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a skill-routing transcript
    Skill {
        /// Path to the JSONL transcript
        transcript: PathBuf,

        /// Check specification as a JSON object literal
        checks: String,
    },

    /// Check a team-orchestration transcript
    Team {
        /// Path to the JSONL transcript
        transcript: PathBuf,

        /// Check specification as a JSON object literal
        checks: String,
    },
}
