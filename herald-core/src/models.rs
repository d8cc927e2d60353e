//! Pull request records consumed from the hosting API
//!
//! Only the fields the assignment policy looks at are modelled here. Field
//! names follow the GitHub REST payloads so fetched JSON can be fed in as is;
//! unknown fields are ignored.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A user record, of which only the login matters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Login name
    pub login: String,
}

/// An issue comment on a pull request that may carry a reviewer assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentComment {
    /// Comment ID
    pub id: u64,
    /// Comment body/text
    #[serde(default)]
    pub body: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl AssignmentComment {
    /// Create a comment record
    pub fn new(id: u64, body: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            body: body.into(),
            created_at,
        }
    }
}

/// A submitted pull request review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullReview {
    /// Review author
    pub user: User,
    /// When the review was submitted (pending reviews have none)
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl PullReview {
    /// Create a review record
    pub fn new(author: impl Into<String>, submitted_at: Option<DateTime<Utc>>) -> Self {
        Self {
            user: User {
                login: author.into(),
            },
            submitted_at,
        }
    }

    /// Login of the review author
    pub fn author(&self) -> &str {
        &self.user.login
    }
}

/// Everything the bot needs to know about a pull request to assign a reviewer
///
/// CI scripts fetch this from the hosting API and hand it over as JSON:
///
/// ```json
/// {
///   "number": 1234,
///   "user": { "login": "contributor" },
///   "requested_reviewers": [{ "login": "alice" }],
///   "reviews": [{ "user": { "login": "bob" }, "submitted_at": "2026-12-01T10:00:00Z" }],
///   "comments": []
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestSnapshot {
    /// PR number
    pub number: u64,
    /// PR author
    #[serde(default)]
    pub user: Option<User>,
    /// Reviewers currently requested
    #[serde(default)]
    pub requested_reviewers: Vec<User>,
    /// Reviews submitted so far
    #[serde(default)]
    pub reviews: Vec<PullReview>,
    /// Issue comments on the PR
    #[serde(default)]
    pub comments: Vec<AssignmentComment>,
}

impl PullRequestSnapshot {
    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Login of the PR author, if known
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }

    /// Logins of the currently requested reviewers
    pub fn requested_logins(&self) -> Vec<String> {
        self.requested_reviewers
            .iter()
            .map(|u| u.login.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let json = r#"{
            "number": 42,
            "title": "ignored",
            "user": { "login": "contributor", "id": 7 },
            "requested_reviewers": [{ "login": "alice" }],
            "reviews": [
                { "user": { "login": "bob" }, "submitted_at": "2026-12-01T10:00:00Z", "state": "COMMENTED" },
                { "user": { "login": "carol" } }
            ],
            "comments": [
                { "id": 9, "body": "hello", "created_at": "2026-12-02T10:00:00Z" }
            ]
        }"#;

        let snapshot: PullRequestSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.number, 42);
        assert_eq!(snapshot.author(), Some("contributor"));
        assert_eq!(snapshot.requested_logins(), vec!["alice".to_string()]);
        assert_eq!(snapshot.reviews[0].author(), "bob");
        assert!(snapshot.reviews[0].submitted_at.is_some());
        assert!(snapshot.reviews[1].submitted_at.is_none());
        assert_eq!(snapshot.comments[0].id, 9);
    }

    #[test]
    fn test_parse_minimal_snapshot() {
        let snapshot: PullRequestSnapshot = serde_json::from_str(r#"{ "number": 1 }"#).unwrap();
        assert!(snapshot.author().is_none());
        assert!(snapshot.requested_reviewers.is_empty());
        assert!(snapshot.reviews.is_empty());
        assert!(snapshot.comments.is_empty());
    }

    #[test]
    fn test_comment_without_body() {
        let comment: AssignmentComment =
            serde_json::from_str(r#"{ "id": 3, "created_at": "2026-12-01T00:00:00Z" }"#).unwrap();
        assert_eq!(comment.body, "");
    }

    #[test]
    fn test_load_snapshot_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr.json");
        std::fs::write(&path, r#"{ "number": 7, "user": { "login": "dev" } }"#).unwrap();

        let snapshot = PullRequestSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.number, 7);
        assert_eq!(snapshot.author(), Some("dev"));
    }

    #[test]
    fn test_load_snapshot_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            PullRequestSnapshot::load(&path),
            Err(crate::Error::Json(_))
        ));
    }
}
