//! Pool command - List reviewers available for assignment

use chrono::{NaiveDate, Utc};
use clap::Args;
use herald_core::{Config, PoolProvider};

/// Arguments for the pool command
#[derive(Args, Debug)]
pub struct PoolArgs {
    /// Team whose pool to list (defaults to the default pool)
    #[arg(short, long)]
    pub team: Option<String>,

    /// Day used to apply vacations, as YYYY-MM-DD (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl PoolArgs {
    /// Execute the pool command
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        config.validate()?;

        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        for login in available(config, self.team.as_deref(), date) {
            println!("{}", login);
        }

        Ok(())
    }
}

fn available(config: &Config, team: Option<&str>, date: NaiveDate) -> Vec<String> {
    config.pool.on(date).available_reviewers(team)
}
