//! Breadth-first propagation of root field values to descendants.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::propagation::domain::{
    FailurePolicy, FailureStage, FieldSnapshot, NodeFailure, PlannedChange, PropagationDomainError,
    PropagationJob, PropagationReport,
};
use crate::tracker::{
    domain::IssueKey,
    ports::{IssueTracker, TrackerError},
};

/// Run-level errors for propagation.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// Input validation failed, including fields missing on the root.
    #[error(transparent)]
    Domain(#[from] PropagationDomainError),

    /// The root issue key does not resolve.
    #[error("root issue {0} not found")]
    RootNotFound(IssueKey),

    /// The root's children could not be listed.
    #[error("could not list children of root issue {key}: {source}")]
    RootChildren {
        /// Root issue key.
        key: IssueKey,
        /// Tracker failure.
        #[source]
        source: TrackerError,
    },

    /// A descendant failed under the fail-fast policy.
    #[error("aborted at {failure}")]
    Aborted {
        /// The failure that stopped the run.
        failure: NodeFailure,
        /// Work completed before the failure.
        report: Box<PropagationReport>,
    },

    /// Reading the root failed for a reason other than a missing key.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Result type for propagation runs.
pub type PropagationResult<T> = Result<T, PropagationError>;

/// Copies captured root field values onto every descendant of the root.
///
/// Traversal is iterative: pending keys are appended to a work list and
/// consumed through a cursor, and a visited set guarantees a single write
/// per issue even when the remote data is not a tree. Calls to the tracker
/// are issued one after another.
#[derive(Clone)]
pub struct ChildPropagator<T>
where
    T: IssueTracker,
{
    tracker: Arc<T>,
}

impl<T> ChildPropagator<T>
where
    T: IssueTracker,
{
    /// Creates a propagator over a tracker client.
    #[must_use]
    pub const fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Runs a propagation job.
    ///
    /// Per-issue failures are handled according to the job's
    /// [`FailurePolicy`] and listed in the returned report.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationError::RootNotFound`] or
    /// [`PropagationError::Domain`] before any write when the root does not
    /// resolve or lacks a requested field,
    /// [`PropagationError::RootChildren`] when the root's children cannot
    /// be listed, and [`PropagationError::Aborted`] on the first failure of
    /// a fail-fast run.
    pub async fn propagate(&self, job: &PropagationJob) -> PropagationResult<PropagationReport> {
        let root_key = job.root();
        let root = match self.tracker.get_issue(root_key).await {
            Ok(issue) => issue,
            Err(err) if err.is_not_found() => {
                return Err(PropagationError::RootNotFound(root_key.clone()));
            }
            Err(err) => return Err(err.into()),
        };
        let snapshot = FieldSnapshot::capture(&root, job.fields())?;
        info!(
            root = %root_key,
            fields = %job.fields(),
            policy = %job.policy(),
            dry_run = job.is_dry_run(),
            "propagating fields to descendants"
        );

        let mut report = PropagationReport::new(root_key.clone(), job.is_dry_run());
        let mut visited: HashSet<IssueKey> = HashSet::from([root_key.clone()]);
        let mut pending = self.tracker.get_children(root_key).await.map_err(|source| {
            PropagationError::RootChildren {
                key: root_key.clone(),
                source,
            }
        })?;
        let mut cursor = 0;

        while let Some(key) = pending.get(cursor).cloned() {
            cursor += 1;
            if !visited.insert(key.clone()) {
                debug!(issue = %key, "already visited, skipping");
                report.record_revisit();
                continue;
            }

            match self
                .visit(&key, &snapshot, job.is_dry_run(), &mut report)
                .await
            {
                Ok(children) => pending.extend(children),
                Err(failure) => {
                    warn!(
                        issue = %failure.key(),
                        stage = %failure.stage(),
                        reason = failure.reason(),
                        "could not propagate to issue"
                    );
                    report.record_failure(failure.clone());
                    if job.policy() == FailurePolicy::FailFast {
                        return Err(PropagationError::Aborted {
                            failure,
                            report: Box::new(report),
                        });
                    }
                }
            }
        }

        info!(
            root = %root_key,
            updated = report.updated_count(),
            planned = report.planned().len(),
            failures = report.failures().len(),
            "propagation finished"
        );
        Ok(report)
    }

    /// Writes the target values onto one descendant and returns its
    /// children.
    async fn visit(
        &self,
        key: &IssueKey,
        snapshot: &FieldSnapshot,
        dry_run: bool,
        report: &mut PropagationReport,
    ) -> Result<Vec<IssueKey>, NodeFailure> {
        let failure = |stage: FailureStage, err: &TrackerError| {
            NodeFailure::new(key.clone(), snapshot.names(), stage, err.to_string())
        };

        let current = if dry_run || snapshot.needs_current() {
            let issue = self
                .tracker
                .get_issue(key)
                .await
                .map_err(|err| failure(FailureStage::Read, &err))?;
            Some(issue)
        } else {
            None
        };
        let target = snapshot.target_for(current.as_ref());

        match current {
            Some(issue) if dry_run => {
                debug!(issue = %key, "dry run, not writing");
                report.record_planned(PlannedChange::new(
                    key.clone(),
                    issue.summary().map(str::to_owned),
                    snapshot.current_values(&issue),
                    target,
                ));
            }
            _ => {
                self.tracker
                    .update_fields(key, &target)
                    .await
                    .map_err(|err| failure(FailureStage::Write, &err))?;
                info!(issue = %key, "updated issue");
                report.record_update(key.clone());
            }
        }

        self.tracker
            .get_children(key)
            .await
            .map_err(|err| failure(FailureStage::Children, &err))
    }
}
