//! Reviewer assignment comments
//!
//! When a primary reviewer is chosen the bot posts a comment naming them. The
//! comment is the only record of the choice, so later runs read it back to
//! learn who was assigned. Each comment carries a hidden marker:
//!
//! ```markdown
//! <!-- herald:reviewer-assignment {"reviewer":"octocat"} -->
//! ```
//!
//! followed by the human readable notice mentioning `@octocat`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::AssignmentComment;

const MARKER_START: &str = "<!-- herald:reviewer-assignment";
const MARKER_END: &str = "-->";

/// Visible assignment sentence, matched for comments without a usable marker
static ASSIGNMENT_SENTENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^@([^,\s]+), a repository maintainer, has been assigned to review your changes\.",
    )
    .expect("valid regex")
});

#[derive(Debug, Serialize, Deserialize)]
struct AssignmentMarker {
    reviewer: String,
}

/// The most recent assignment comment and the reviewer it names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundAssignment<'a> {
    /// The matching comment
    pub comment: &'a AssignmentComment,
    /// Reviewer named in the comment
    pub reviewer: String,
}

impl FoundAssignment<'_> {
    /// ID of the matching comment
    pub fn comment_id(&self) -> u64 {
        self.comment.id
    }
}

/// Render the assignment comment body for `reviewer`
pub fn format_assignment(reviewer: &str) -> String {
    let marker = AssignmentMarker {
        reviewer: reviewer.to_string(),
    };
    // '>' only occurs inside the string value; escaping it keeps the marker
    // from closing the HTML comment early.
    let json = serde_json::to_string(&marker)
        .unwrap_or_default()
        .replace('>', "\\u003e");

    format!(
        "{MARKER_START} {json} {MARKER_END}\n\
         Hello! I am a robot. Tests will require approval from a repository maintainer to run.\n\
         \n\
         @{reviewer}, a repository maintainer, has been assigned to review your changes. \
         If you have not received review feedback within 2 business days, please leave a \
         comment on this PR asking them to take a look.\n\
         \n\
         You can help make sure that review is quick by doing a self-review and by running \
         impacted tests locally.\n"
    )
}

/// Extract the assigned reviewer from a comment body
///
/// Returns `None` for bodies that are not assignment comments.
pub fn parse_assignment(body: &str) -> Option<String> {
    if let Some(reviewer) = parse_marker(body) {
        return Some(reviewer);
    }

    ASSIGNMENT_SENTENCE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_marker(body: &str) -> Option<String> {
    let start = body.find(MARKER_START)? + MARKER_START.len();
    let end = body[start..].find(MARKER_END)?;
    let json = body[start..start + end].trim();

    match serde_json::from_str::<AssignmentMarker>(json) {
        Ok(marker) if !marker.reviewer.is_empty() => Some(marker.reviewer),
        Ok(_) => {
            debug!("Assignment marker names no reviewer");
            None
        }
        Err(e) => {
            warn!(?e, marker = %json, "Failed to parse assignment marker");
            None
        }
    }
}

/// Find the most recent assignment comment
///
/// Among comments that name a reviewer, the one with the latest creation
/// time wins; on equal times the later comment in `comments` wins.
pub fn find_assignment(comments: &[AssignmentComment]) -> Option<FoundAssignment<'_>> {
    let found = comments
        .iter()
        .filter_map(|comment| {
            parse_assignment(&comment.body).map(|reviewer| FoundAssignment { comment, reviewer })
        })
        .max_by_key(|found| found.comment.created_at);

    if let Some(found) = &found {
        debug!(
            comment_id = found.comment.id,
            reviewer = %found.reviewer,
            "Found reviewer assignment comment"
        );
    }

    found
}
