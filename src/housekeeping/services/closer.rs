//! Comments on and transitions stale parentless issues.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::housekeeping::domain::{StaleSweep, SweepFailure, SweepReport};
use crate::tracker::{
    domain::Issue,
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// Service-level errors for sweeps.
#[derive(Debug, Error)]
pub enum SweepError {
    /// The search for stale issues failed.
    #[error("searching stale issues failed: {0}")]
    Search(#[source] TrackerError),
}

/// Result type for sweeps.
pub type SweepResult<T> = Result<T, SweepError>;

/// Closes stale issues that have no parent.
#[derive(Clone)]
pub struct StaleIssueCloser<T>
where
    T: IssueTracker,
{
    tracker: Arc<T>,
}

impl<T> StaleIssueCloser<T>
where
    T: IssueTracker,
{
    /// Creates a closer over a tracker client.
    #[must_use]
    pub const fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Runs a sweep.
    ///
    /// Each matched issue is commented on and transitioned independently; a
    /// failure is recorded in the report and the sweep moves on.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Search`] when the stale issues cannot be
    /// listed.
    pub async fn sweep(&self, sweep: &StaleSweep) -> SweepResult<SweepReport> {
        let matched = self
            .tracker
            .search_issues(&sweep.jql(), StaleSweep::MAX_ISSUES)
            .await
            .map_err(SweepError::Search)?;
        info!(
            project = sweep.project_key(),
            matched = matched.len(),
            dry_run = sweep.is_dry_run(),
            "found stale issues without parent"
        );

        let comment = sweep.comment();
        let mut report = SweepReport::new(comment.clone(), sweep.is_dry_run(), matched.clone());
        if sweep.is_dry_run() {
            return Ok(report);
        }

        for issue in &matched {
            match self.close(issue, sweep, &comment).await {
                Ok(()) => {
                    info!(issue = %issue.key(), "closed stale issue");
                    report.record_closed(issue.key().clone());
                }
                Err(err) => {
                    warn!(issue = %issue.key(), error = %err, "could not close stale issue");
                    report.record_failure(SweepFailure::new(issue.key().clone(), err.to_string()));
                }
            }
        }
        Ok(report)
    }

    async fn close(&self, issue: &Issue, sweep: &StaleSweep, comment: &str) -> TrackerResult<()> {
        self.tracker.add_comment(issue.key(), comment).await?;
        self.tracker
            .transition_issue(issue.key(), sweep.transition())
            .await
    }
}
