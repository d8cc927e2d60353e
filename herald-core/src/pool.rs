//! Core reviewer pools
//!
//! A pool is the ordered list of reviewers eligible to be chosen as the
//! primary reviewer of a pull request. Pools are keyed by team; a missing or
//! unknown team falls back to the default pool.

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{Error, Result};

/// Source of core reviewers
///
/// The assignment policy takes the pool through this trait instead of reading
/// a global list, so callers can supply configured pools, dated views of them,
/// or fixed lists in tests.
pub trait PoolProvider {
    /// Everyone in the pool for `context`, in pool order
    ///
    /// Decides who counts as an already requested or previously involved
    /// core reviewer. `None` selects the default pool.
    fn pool_members(&self, context: Option<&str>) -> Vec<String>;

    /// Pool members who can take a new assignment, in pool order
    fn available_reviewers(&self, context: Option<&str>) -> Vec<String> {
        self.pool_members(context)
    }
}

impl PoolProvider for [String] {
    fn pool_members(&self, _context: Option<&str>) -> Vec<String> {
        self.to_vec()
    }
}

impl PoolProvider for Vec<String> {
    fn pool_members(&self, context: Option<&str>) -> Vec<String> {
        self.as_slice().pool_members(context)
    }
}

/// A period during which a reviewer is not assigned new pull requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationWindow {
    /// Reviewer login
    pub login: String,
    /// First day away
    pub start: NaiveDate,
    /// Last day away
    pub end: NaiveDate,
}

impl VacationWindow {
    /// Create a vacation window covering `start..=end`
    pub fn new(login: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            login: login.into(),
            start,
            end,
        }
    }

    /// Check if `login` is away on `date`
    pub fn covers(&self, login: &str, date: NaiveDate) -> bool {
        self.login == login && self.start <= date && date <= self.end
    }
}

/// Configured reviewer pools
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReviewerPool {
    /// Pool used when no team is given or the team is unknown
    pub default: Vec<String>,

    /// Per-team pools
    pub teams: BTreeMap<String, Vec<String>>,

    /// Scheduled absences
    pub vacations: Vec<VacationWindow>,
}

impl ReviewerPool {
    /// Create a pool with the given default members
    pub fn new<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default: members.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a team pool
    pub fn with_team<I, S>(mut self, team: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.teams
            .insert(team.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Add a vacation window
    pub fn with_vacation(mut self, vacation: VacationWindow) -> Self {
        self.vacations.push(vacation);
        self
    }

    /// Members of the pool for `team`, ignoring vacations
    pub fn members(&self, team: Option<&str>) -> &[String] {
        team.and_then(|t| self.teams.get(t))
            .unwrap_or(&self.default)
    }

    /// Check if `login` is on vacation on `date`
    pub fn is_away(&self, login: &str, date: NaiveDate) -> bool {
        self.vacations.iter().any(|v| v.covers(login, date))
    }

    /// View of the pool as of `date`
    ///
    /// Reviewers on vacation stay pool members but are not offered for new
    /// assignments.
    pub fn on(&self, date: NaiveDate) -> DatedPool<'_> {
        DatedPool { pool: self, date }
    }

    /// Check that every pool is usable
    ///
    /// The assignment policy assumes a non-empty, duplicate-free pool; an
    /// empty one is a configuration error reported here rather than at
    /// assignment time.
    pub fn validate(&self) -> Result<()> {
        validate_members("default", &self.default)?;
        for (team, members) in &self.teams {
            validate_members(team, members)?;
        }

        for vacation in &self.vacations {
            if vacation.start > vacation.end {
                return Err(Error::Config(format!(
                    "Vacation for {} ends ({}) before it starts ({})",
                    vacation.login, vacation.end, vacation.start
                )));
            }
        }

        Ok(())
    }
}

impl PoolProvider for ReviewerPool {
    fn pool_members(&self, context: Option<&str>) -> Vec<String> {
        self.members(context).to_vec()
    }
}

fn validate_members(name: &str, members: &[String]) -> Result<()> {
    if members.is_empty() {
        return Err(Error::Config(format!("Reviewer pool '{}' is empty", name)));
    }

    let mut seen = HashSet::new();
    for member in members {
        if member.trim().is_empty() {
            return Err(Error::Config(format!(
                "Reviewer pool '{}' contains a blank login",
                name
            )));
        }
        if !seen.insert(member.as_str()) {
            return Err(Error::Config(format!(
                "Reviewer pool '{}' lists {} more than once",
                name, member
            )));
        }
    }

    Ok(())
}

/// A reviewer pool as of a given day
#[derive(Debug, Clone, Copy)]
pub struct DatedPool<'a> {
    pool: &'a ReviewerPool,
    date: NaiveDate,
}

impl PoolProvider for DatedPool<'_> {
    fn pool_members(&self, context: Option<&str>) -> Vec<String> {
        self.pool.members(context).to_vec()
    }

    /// Pool members not on vacation
    ///
    /// If everyone is away the full pool is returned, so assignment still
    /// has someone to pick.
    fn available_reviewers(&self, context: Option<&str>) -> Vec<String> {
        let members = self.pool.members(context);
        let available: Vec<String> = members
            .iter()
            .filter(|m| !self.pool.is_away(m, self.date))
            .cloned()
            .collect();

        if available.is_empty() && !members.is_empty() {
            warn!(
                team = ?context,
                date = %self.date,
                "Every reviewer in the pool is on vacation, ignoring vacations"
            );
            return members.to_vec();
        }

        available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pool() -> ReviewerPool {
        ReviewerPool::new(["trodge", "c2thorn", "melinath"])
            .with_team("storage", ["alice", "bob"])
    }

    #[test]
    fn test_default_pool() {
        let pool = pool();
        assert_eq!(
            pool.available_reviewers(None),
            vec!["trodge", "c2thorn", "melinath"]
        );
    }

    #[test]
    fn test_team_pool() {
        let pool = pool();
        assert_eq!(pool.available_reviewers(Some("storage")), vec!["alice", "bob"]);
    }

    #[test]
    fn test_unknown_team_falls_back_to_default() {
        let pool = pool();
        assert_eq!(pool.available_reviewers(Some("compute")), pool.default);
    }

    #[test]
    fn test_vacation_excludes_reviewer() {
        let pool = pool().with_vacation(VacationWindow::new(
            "c2thorn",
            date(2026, 12, 20),
            date(2027, 1, 4),
        ));

        let during = pool.on(date(2026, 12, 20));
        assert_eq!(during.available_reviewers(None), vec!["trodge", "melinath"]);

        let last_day = pool.on(date(2027, 1, 4));
        assert_eq!(last_day.available_reviewers(None), vec!["trodge", "melinath"]);

        let after = pool.on(date(2027, 1, 5));
        assert_eq!(after.available_reviewers(None), pool.default);
    }

    #[test]
    fn test_vacation_keeps_pool_membership() {
        let pool = pool().with_vacation(VacationWindow::new(
            "c2thorn",
            date(2026, 12, 20),
            date(2027, 1, 4),
        ));

        let during = pool.on(date(2026, 12, 24));
        assert_eq!(during.pool_members(None), vec!["trodge", "c2thorn", "melinath"]);
        assert_eq!(during.available_reviewers(None), vec!["trodge", "melinath"]);
    }

    #[test]
    fn test_everyone_away_returns_full_pool() {
        let pool = pool()
            .with_vacation(VacationWindow::new("alice", date(2026, 7, 1), date(2026, 7, 31)))
            .with_vacation(VacationWindow::new("bob", date(2026, 7, 10), date(2026, 7, 20)));

        let view = pool.on(date(2026, 7, 15));
        assert_eq!(view.available_reviewers(Some("storage")), vec!["alice", "bob"]);
    }

    #[test]
    fn test_undated_pool_ignores_vacations() {
        let pool = pool().with_vacation(VacationWindow::new(
            "trodge",
            date(2026, 1, 1),
            date(2026, 12, 31),
        ));
        assert_eq!(pool.available_reviewers(None).len(), 3);
    }

    #[test]
    fn test_validate_ok() {
        assert!(pool().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_default() {
        let err = ReviewerPool::default().validate().unwrap_err();
        assert!(err.to_string().contains("'default' is empty"));
    }

    #[test]
    fn test_validate_empty_team() {
        let pool = pool().with_team("empty", Vec::<String>::new());
        assert!(matches!(pool.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_duplicate_member() {
        let err = ReviewerPool::new(["a", "b", "a"]).validate().unwrap_err();
        assert!(err.to_string().contains("lists a more than once"));
    }

    #[test]
    fn test_validate_backwards_vacation() {
        let pool = pool().with_vacation(VacationWindow::new(
            "trodge",
            date(2026, 2, 1),
            date(2026, 1, 1),
        ));
        assert!(matches!(pool.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
default = ["alice", "bob"]

[teams]
storage = ["carol"]

[[vacations]]
login = "bob"
start = "2026-12-20"
end = "2027-01-04"
"#;
        let pool: ReviewerPool = toml::from_str(toml).unwrap();
        assert_eq!(pool.default, vec!["alice", "bob"]);
        assert_eq!(pool.members(Some("storage")), ["carol".to_string()]);
        assert!(pool.is_away("bob", date(2026, 12, 25)));
    }
}
