//! Herald Core - reviewer assignment policy for the Herald CI bot
//!
//! This crate decides which core reviewers a pull request should be assigned
//! to, and reads back the assignment comment the bot leaves on the pull
//! request so later runs know a reviewer was already chosen.

pub mod comment;
pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod selection;

pub use comment::{find_assignment, format_assignment, FoundAssignment};
pub use config::{AssignmentConfig, Config};
pub use error::{Error, Result};
pub use models::{AssignmentComment, PullRequestSnapshot, PullReview};
pub use pool::{DatedPool, PoolProvider, ReviewerPool, VacationWindow};
pub use selection::{previous_reviewers, CoreReviewerChoice, CoreReviewerChooser, Selection};
