//! Sweep inputs and the texts derived from them.

use crate::tracker::domain::TransitionId;
use thiserror::Error;

/// Errors returned while building a sweep.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SweepDomainError {
    /// The project key is blank.
    #[error("project key must not be empty")]
    EmptyProjectKey,

    /// Zero days would close everything.
    #[error("stale days must be greater than zero")]
    ZeroStaleDays,
}

/// One stale issue sweep over a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSweep {
    project_key: String,
    stale_days: u32,
    transition: TransitionId,
    dry_run: bool,
}

impl StaleSweep {
    /// Most issues a single sweep processes.
    pub const MAX_ISSUES: usize = 500;

    /// Creates a sweep that applies `transition` to matching issues.
    ///
    /// # Errors
    ///
    /// Returns [`SweepDomainError`] for a blank project key or zero days.
    pub fn new(
        project_key: impl Into<String>,
        stale_days: u32,
        transition: TransitionId,
    ) -> Result<Self, SweepDomainError> {
        let raw_project = project_key.into();
        let project = raw_project.trim();
        if project.is_empty() {
            return Err(SweepDomainError::EmptyProjectKey);
        }
        if stale_days == 0 {
            return Err(SweepDomainError::ZeroStaleDays);
        }
        Ok(Self {
            project_key: project.to_owned(),
            stale_days,
            transition,
            dry_run: false,
        })
    }

    /// Lists matching issues instead of closing them.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the project key.
    #[must_use]
    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// Returns the number of days without update after which an issue is
    /// stale.
    #[must_use]
    pub const fn stale_days(&self) -> u32 {
        self.stale_days
    }

    /// Returns the transition applied to stale issues.
    #[must_use]
    pub const fn transition(&self) -> &TransitionId {
        &self.transition
    }

    /// Returns `true` when nothing should be changed.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the JQL selecting stale parentless issues, newest first.
    #[must_use]
    pub fn jql(&self) -> String {
        format!(
            "project = \"{}\" AND type IN (Task, Story, Bug, Epic) \
             AND status NOT IN (Done, Rejected) AND parent is null \
             AND updated <= -{}d ORDER BY created DESC",
            self.project_key, self.stale_days
        )
    }

    /// Returns the comment explaining the closure.
    #[must_use]
    pub fn comment(&self) -> String {
        format!(
            "Issue will be closed because it does not have a parent \
             and it has not been updated for {} days",
            self.stale_days
        )
    }
}
