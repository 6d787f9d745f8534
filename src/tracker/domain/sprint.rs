//! Agile sprints.

use super::{SprintId, TrackerDomainError};
use chrono::{DateTime, Utc};
use std::fmt;

/// Lifecycle state of a sprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SprintState {
    /// The sprint is running.
    Active,
    /// The sprint is planned.
    Future,
    /// The sprint has ended.
    Closed,
}

impl SprintState {
    /// Returns the state name used by the tracker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Future => "future",
            Self::Closed => "closed",
        }
    }
}

impl TryFrom<&str> for SprintState {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "future" => Ok(Self::Future),
            "closed" => Ok(Self::Closed),
            _ => Err(TrackerDomainError::UnknownSprintState(value.to_owned())),
        }
    }
}

impl fmt::Display for SprintState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sprint on an agile board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprint {
    id: SprintId,
    name: String,
    state: SprintState,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl Sprint {
    /// Creates a sprint without dates.
    #[must_use]
    pub fn new(id: SprintId, name: impl Into<String>, state: SprintState) -> Self {
        Self {
            id,
            name: name.into(),
            state,
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the sprint start.
    #[must_use]
    pub const fn with_start_date(mut self, start: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self
    }

    /// Sets the sprint end.
    #[must_use]
    pub const fn with_end_date(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn id(&self) -> SprintId {
        self.id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sprint state.
    #[must_use]
    pub const fn state(&self) -> SprintState {
        self.state
    }

    /// Returns the sprint start, if scheduled.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the sprint end, if scheduled.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }
}
