//! Issue tracker client port.

use crate::tracker::domain::{
    AccountEmail, BoardId, FieldMap, Issue, IssueDraft, IssueKey, Sprint, SprintState,
    TransitionId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Read and write access to the remote issue store.
///
/// Every call is a single request; implementations do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches an issue with all of its fields.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when the key does not resolve.
    async fn get_issue(&self, key: &IssueKey) -> TrackerResult<Issue>;

    /// Lists the keys of the direct children of an issue.
    ///
    /// Returns an empty list when the issue has no children.
    async fn get_children(&self, key: &IssueKey) -> TrackerResult<Vec<IssueKey>>;

    /// Overwrites the given fields on an issue.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Update`] when the tracker rejects the write
    /// and [`TrackerError::NotFound`] when the key does not resolve.
    async fn update_fields(&self, key: &IssueKey, fields: &FieldMap) -> TrackerResult<()>;

    /// Runs a JQL search and returns at most `limit` issues.
    async fn search_issues(&self, jql: &str, limit: usize) -> TrackerResult<Vec<Issue>>;

    /// Creates an issue and returns its key.
    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<IssueKey>;

    /// Assigns an issue to the account registered with `email`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::NotFound`] when no account matches.
    async fn assign_issue(&self, key: &IssueKey, email: &AccountEmail) -> TrackerResult<()>;

    /// Adds a plain-text comment to an issue.
    async fn add_comment(&self, key: &IssueKey, body: &str) -> TrackerResult<()>;

    /// Applies a workflow transition to an issue.
    async fn transition_issue(
        &self,
        key: &IssueKey,
        transition: &TransitionId,
    ) -> TrackerResult<()>;

    /// Lists the sprints of a board in any of the given states.
    async fn list_sprints(
        &self,
        board: BoardId,
        states: &[SprintState],
    ) -> TrackerResult<Vec<Sprint>>;
}

/// Errors returned by issue tracker implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The tracker rejected a write.
    #[error("update of {target} rejected with status {status}: {reason}")]
    Update {
        /// Resource the write was aimed at.
        target: String,
        /// HTTP status returned by the tracker.
        status: u16,
        /// Reason reported by the tracker.
        reason: String,
    },

    /// Network or protocol failure.
    #[error("transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The tracker answered with a payload that could not be interpreted.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl TrackerError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Builds a not-found error for an issue key.
    #[must_use]
    pub fn issue_not_found(key: &IssueKey) -> Self {
        Self::NotFound(format!("issue {key}"))
    }

    /// Builds an update rejection for an issue key.
    #[must_use]
    pub fn update_rejected(key: &IssueKey, status: u16, reason: impl Into<String>) -> Self {
        Self::Update {
            target: format!("issue {key}"),
            status,
            reason: reason.into(),
        }
    }

    /// Returns `true` when the error reports a missing resource.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
