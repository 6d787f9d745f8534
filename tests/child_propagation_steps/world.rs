//! Shared world state for child propagation BDD scenarios.

use std::sync::Arc;

use jira_helpers::propagation::{
    domain::PropagationReport,
    services::{ChildPropagator, PropagationError},
};
use jira_helpers::tracker::adapters::memory::InMemoryIssueTracker;
use rstest::fixture;

/// Scenario world for child propagation behaviour tests.
pub struct PropagationWorld {
    pub tracker: Arc<InMemoryIssueTracker>,
    pub propagator: ChildPropagator<InMemoryIssueTracker>,
    pub last_result: Option<Result<PropagationReport, PropagationError>>,
}

impl PropagationWorld {
    /// Creates a world over an empty in-memory tracker.
    #[must_use]
    pub fn new() -> Self {
        let tracker = Arc::new(InMemoryIssueTracker::new());
        Self {
            propagator: ChildPropagator::new(Arc::clone(&tracker)),
            tracker,
            last_result: None,
        }
    }

    /// Returns the report of the last run, failing when it did not finish.
    pub fn report(&self) -> Result<&PropagationReport, eyre::Report> {
        self.last_result
            .as_ref()
            .ok_or_else(|| eyre::eyre!("no propagation has run in this scenario"))?
            .as_ref()
            .map_err(|err| eyre::eyre!("propagation failed: {err}"))
    }
}

impl Default for PropagationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PropagationWorld {
    PropagationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
