//! Outcome of a stale issue sweep.

use crate::tracker::domain::{Issue, IssueKey};
use std::fmt;

/// An issue the sweep could not close.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepFailure {
    key: IssueKey,
    reason: String,
}

impl SweepFailure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(key: IssueKey, reason: impl Into<String>) -> Self {
        Self {
            key,
            reason: reason.into(),
        }
    }

    /// Returns the issue key.
    #[must_use]
    pub const fn key(&self) -> &IssueKey {
        &self.key
    }

    /// Returns the tracker's reason.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Matched, closed and failed issues of one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepReport {
    comment: String,
    dry_run: bool,
    matched: Vec<Issue>,
    closed: Vec<IssueKey>,
    failures: Vec<SweepFailure>,
}

impl SweepReport {
    /// Creates a report for the matched issues.
    #[must_use]
    pub const fn new(comment: String, dry_run: bool, matched: Vec<Issue>) -> Self {
        Self {
            comment,
            dry_run,
            matched,
            closed: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Records a closed issue.
    pub fn record_closed(&mut self, key: IssueKey) {
        self.closed.push(key);
    }

    /// Records an issue that could not be closed.
    pub fn record_failure(&mut self, failure: SweepFailure) {
        self.failures.push(failure);
    }

    /// Returns the issues the search matched.
    #[must_use]
    pub fn matched(&self) -> &[Issue] {
        &self.matched
    }

    /// Returns the closed issues.
    #[must_use]
    pub fn closed(&self) -> &[IssueKey] {
        &self.closed
    }

    /// Returns the issues that could not be closed.
    #[must_use]
    pub fn failures(&self) -> &[SweepFailure] {
        &self.failures
    }

    /// Returns `true` when every matched issue was handled.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would reject" } else { "Rejecting" };
        writeln!(f, "{verb} {} issues with comment:", self.matched.len())?;
        writeln!(f, " {}", self.comment)?;
        for issue in &self.matched {
            writeln!(
                f,
                " {} | {} | {}",
                issue.key(),
                issue.issue_type().unwrap_or("-"),
                issue.summary().unwrap_or("")
            )?;
        }
        if !self.dry_run {
            writeln!(
                f,
                "Closed {} issues, {} failures",
                self.closed.len(),
                self.failures.len()
            )?;
        }
        for failure in &self.failures {
            writeln!(f, " ! {}: {}", failure.key(), failure.reason())?;
        }
        Ok(())
    }
}
