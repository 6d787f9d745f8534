//! Identifier types for the tracker domain.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque issue identifier, for example `PROJ-123`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueKey(String);

impl IssueKey {
    /// Creates a validated issue key.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyIssueKey`] when the key is blank
    /// and [`TrackerDomainError::InvalidIssueKey`] when it contains
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyIssueKey);
        }
        if normalized.chars().any(char::is_whitespace) {
            return Err(TrackerDomainError::InvalidIssueKey(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for IssueKey {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric identifier of an agile board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(u64);

impl BoardId {
    /// Wraps a board identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Numeric identifier of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SprintId(u64);

impl SprintId {
    /// Wraps a sprint identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SprintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a workflow transition, for example `61` for "Done".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(String);

impl TransitionId {
    /// Creates a validated transition identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyTransition`] when the value is
    /// blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyTransition);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Email address used to look up an assignee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountEmail(String);

impl AccountEmail {
    /// Creates a validated email address.
    ///
    /// Only the presence of a local part and a domain is checked; the
    /// tracker resolves the account.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidEmail`] when the value has no
    /// `@` separator or either side of it is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        match normalized.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(normalized.to_owned()))
            }
            _ => Err(TrackerDomainError::InvalidEmail(raw)),
        }
    }

    /// Returns the address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
