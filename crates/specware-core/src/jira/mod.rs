//! Read-only Jira issue lookup.

mod client;
mod format;
mod types;

pub use client::{validate_issue_key, JiraClient, JiraConfig, DEFAULT_TIMEOUT};
pub use format::format_issue;
pub use types::{Issue, IssueFields, IssueType, Named, Priority, Status, User};

use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JiraError {
    #[error("invalid issue key format '{0}'. Expected format: PROJECT-123")]
    InvalidKey(String),

    #[error("{0} environment variable is required")]
    MissingEnv(&'static str),

    #[error("invalid JIRA_URL format: {0}")]
    InvalidUrl(String),

    #[error("authentication failed. Check JIRA_API_TOKEN environment variable")]
    Authentication,

    #[error("access denied to issue '{0}'. Verify you have permission to view this issue")]
    PermissionDenied(String),

    #[error("issue '{0}' not found. Verify the issue key exists and you have permission to view it")]
    NotFound(String),

    #[error("Jira server error. Try again later or contact your Jira administrator")]
    Server,

    #[error("unexpected response status: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("network timeout after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, JiraError>;
