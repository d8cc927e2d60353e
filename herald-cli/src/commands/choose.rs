//! Choose command - Decide which core reviewers to request on a pull request

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use clap::Args;
use herald_core::{
    find_assignment, format_assignment, previous_reviewers, Config, CoreReviewerChooser,
    PullRequestSnapshot,
};
use serde::Serialize;

/// Arguments for the choose command
#[derive(Args, Debug)]
pub struct ChooseArgs {
    /// Pull request snapshot (JSON) fetched from the hosting API
    #[arg(short, long)]
    pub snapshot: PathBuf,

    /// Team whose reviewer pool to use (defaults to the default pool)
    #[arg(short, long)]
    pub team: Option<String>,

    /// Day used to apply vacations, as YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

/// Decision printed by the choose command
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChooseOutput {
    /// PR number
    pub number: u64,
    /// Reviewers to request, in order
    pub reviewers_to_request: Vec<String>,
    /// Newly chosen primary reviewer
    pub primary_reviewer: Option<String>,
    /// Assignment comment to post for the new primary reviewer
    pub comment_body: Option<String>,
    /// Reviewer named by the latest existing assignment comment
    pub assigned_reviewer: Option<String>,
    /// ID of that comment
    pub assignment_comment_id: Option<u64>,
}

impl ChooseArgs {
    /// Execute the choose command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        config.validate()?;

        let snapshot = PullRequestSnapshot::load(&self.snapshot)?;
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());

        tracing::info!(
            number = snapshot.number,
            team = ?self.team,
            %date,
            "Choosing core reviewers"
        );

        let output = decide(config, &snapshot, self.team.clone(), date);
        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}

fn decide(
    config: &Config,
    snapshot: &PullRequestSnapshot,
    team: Option<String>,
    date: NaiveDate,
) -> ChooseOutput {
    let pool = config.pool.on(date);
    let requested = snapshot.requested_logins();
    let previous = previous_reviewers(&snapshot.reviews);

    let choice = CoreReviewerChooser::new(&pool)
        .with_team(team)
        .with_author(snapshot.author().map(String::from))
        .with_selection(config.assignment.selection)
        .with_seed(snapshot.number)
        .choose(&requested, &previous);

    let existing = find_assignment(&snapshot.comments);

    ChooseOutput {
        number: snapshot.number,
        comment_body: choice.primary_reviewer.as_deref().map(format_assignment),
        reviewers_to_request: choice.reviewers_to_request,
        primary_reviewer: choice.primary_reviewer,
        assigned_reviewer: existing.as_ref().map(|f| f.reviewer.clone()),
        assignment_comment_id: existing.as_ref().map(|f| f.comment_id()),
    }
}
