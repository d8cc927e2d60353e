//! Format and find commands - Reviewer assignment comments

use std::path::PathBuf;

use clap::Args;
use herald_core::{find_assignment, format_assignment, AssignmentComment};
use serde::Serialize;

/// Arguments for the format command
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Login of the assigned reviewer
    #[arg(required = true)]
    pub reviewer: String,
}

impl FormatArgs {
    /// Execute the format command
    pub fn execute(&self) {
        print!("{}", format_assignment(&self.reviewer));
    }
}

/// Arguments for the find command
#[derive(Args, Debug)]
pub struct FindArgs {
    /// JSON array of PR comments fetched from the hosting API
    #[arg(short, long)]
    pub comments: PathBuf,
}

/// Result printed by the find command
#[derive(Debug, Serialize, PartialEq, Eq)]
struct FindOutput {
    reviewer: Option<String>,
    comment_id: Option<u64>,
}

impl FindArgs {
    /// Execute the find command
    pub fn execute(&self) -> anyhow::Result<()> {
        let contents = std::fs::read_to_string(&self.comments)?;
        let output = find_in(&contents)?;
        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}

fn find_in(contents: &str) -> anyhow::Result<FindOutput> {
    let comments: Vec<AssignmentComment> = serde_json::from_str(contents)?;

    tracing::debug!(count = comments.len(), "Scanning comments");

    let found = find_assignment(&comments);
    Ok(FindOutput {
        reviewer: found.as_ref().map(|f| f.reviewer.clone()),
        comment_id: found.as_ref().map(|f| f.comment_id()),
    })
}
