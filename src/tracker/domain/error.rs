//! Error types for tracker domain validation.

use thiserror::Error;

/// Errors returned while constructing tracker domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The issue key is empty after trimming.
    #[error("issue key must not be empty")]
    EmptyIssueKey,

    /// The issue key contains whitespace.
    #[error("invalid issue key '{0}', keys must not contain whitespace")]
    InvalidIssueKey(String),

    /// The field name is empty after trimming.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// The email address has no `@` separator.
    #[error("invalid account email '{0}'")]
    InvalidEmail(String),

    /// The transition identifier is empty after trimming.
    #[error("transition identifier must not be empty")]
    EmptyTransition,

    /// The sprint state value is not one the tracker reports.
    #[error("unknown sprint state: {0}")]
    UnknownSprintState(String),
}
