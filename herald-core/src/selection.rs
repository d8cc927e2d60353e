//! Core reviewer selection
//!
//! Decides who should review a pull request. Pool members who already
//! reviewed are re-requested; if none did and no pool member has been
//! requested yet, a new primary reviewer is picked from the pool.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::PullReview;
use crate::pool::PoolProvider;
use crate::Error;

/// How a new primary reviewer is picked from the pool
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    /// Always the first eligible pool member
    First,
    /// Eligible member at `seed % len`, spreading pull requests over the pool
    #[default]
    Rotate,
}

impl Selection {
    fn pick<'a>(&self, candidates: &'a [&'a str], seed: u64) -> Option<&'a str> {
        if candidates.is_empty() {
            return None;
        }

        let index = match self {
            Selection::First => 0,
            Selection::Rotate => (seed % candidates.len() as u64) as usize,
        };
        Some(candidates[index])
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::First => write!(f, "first"),
            Selection::Rotate => write!(f, "rotate"),
        }
    }
}

impl FromStr for Selection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(Selection::First),
            "rotate" => Ok(Selection::Rotate),
            other => Err(Error::Config(format!(
                "Unknown selection '{}', expected 'first' or 'rotate'",
                other
            ))),
        }
    }
}

/// Outcome of core reviewer selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreReviewerChoice {
    /// Reviewers to request, in order
    pub reviewers_to_request: Vec<String>,
    /// Newly chosen primary reviewer, if one had to be picked
    pub primary_reviewer: Option<String>,
}

impl CoreReviewerChoice {
    /// Check if nothing needs to be requested
    pub fn is_empty(&self) -> bool {
        self.reviewers_to_request.is_empty() && self.primary_reviewer.is_none()
    }
}

/// Chooses core reviewers for a pull request from a pool
#[derive(Debug, Clone)]
pub struct CoreReviewerChooser<'a, P: PoolProvider + ?Sized> {
    pool: &'a P,
    team: Option<String>,
    author: Option<String>,
    selection: Selection,
    seed: u64,
}

impl<'a, P: PoolProvider + ?Sized> CoreReviewerChooser<'a, P> {
    /// Create a chooser over the default pool of `pool`
    pub fn new(pool: &'a P) -> Self {
        Self {
            pool,
            team: None,
            author: None,
            selection: Selection::default(),
            seed: 0,
        }
    }

    /// Use the pool of a specific team
    pub fn with_team(mut self, team: Option<String>) -> Self {
        self.team = team;
        self
    }

    /// Set the pull request author, who is never assigned their own PR
    pub fn with_author(mut self, author: Option<String>) -> Self {
        self.author = author;
        self
    }

    /// Set the primary reviewer selection policy
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Set the seed for rotating selection (usually the PR number)
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Choose which core reviewers to request
    ///
    /// # Arguments
    /// * `requested` - Reviewers currently requested on the PR
    /// * `previous` - Reviewers who already reviewed, oldest first
    ///
    /// Reviewers outside the pool are ignored. Previously involved pool
    /// members that are not currently requested are returned for
    /// re-request; otherwise, if no pool member is requested, one is picked
    /// as the primary reviewer. Only the primary pick is limited to
    /// available reviewers; membership checks use the whole pool.
    pub fn choose(&self, requested: &[String], previous: &[String]) -> CoreReviewerChoice {
        let pool = self.pool.pool_members(self.team.as_deref());
        let members: HashSet<&str> = pool.iter().map(String::as_str).collect();
        let requested: HashSet<&str> = requested.iter().map(String::as_str).collect();
        let author = self.author.as_deref();

        let already_requested = requested.iter().any(|r| members.contains(r));

        let mut reviewers_to_request: Vec<String> = Vec::new();
        for login in previous {
            let login = login.as_str();
            if members.contains(login)
                && !requested.contains(login)
                && Some(login) != author
                && !reviewers_to_request.iter().any(|r| r == login)
            {
                reviewers_to_request.push(login.to_string());
            }
        }

        if !reviewers_to_request.is_empty() {
            debug!(
                reviewers = ?reviewers_to_request,
                "Re-requesting previously involved core reviewers"
            );
            return CoreReviewerChoice {
                reviewers_to_request,
                primary_reviewer: None,
            };
        }

        if already_requested {
            debug!("A core reviewer is already requested");
            return CoreReviewerChoice::default();
        }

        let available = self.pool.available_reviewers(self.team.as_deref());
        let candidates: Vec<&str> = available
            .iter()
            .map(String::as_str)
            .filter(|m| Some(*m) != author)
            .collect();

        match self.selection.pick(&candidates, self.seed) {
            Some(primary) => {
                info!(
                    primary = %primary,
                    selection = %self.selection,
                    team = ?self.team,
                    "Chose primary reviewer"
                );
                CoreReviewerChoice {
                    reviewers_to_request: vec![primary.to_string()],
                    primary_reviewer: Some(primary.to_string()),
                }
            }
            None => {
                warn!(team = ?self.team, "No eligible core reviewer in pool");
                CoreReviewerChoice::default()
            }
        }
    }
}

/// Logins of review authors, in submission order
///
/// Reviews without a submission time (pending) keep their relative order and
/// come last. Duplicates are kept; selection deduplicates.
pub fn previous_reviewers(reviews: &[PullReview]) -> Vec<String> {
    let mut ordered: Vec<&PullReview> = reviews.iter().collect();
    ordered.sort_by_key(|r| (r.submitted_at.is_none(), r.submitted_at));
    ordered.into_iter().map(|r| r.author().to_string()).collect()
}
