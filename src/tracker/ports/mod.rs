//! Port contracts for issue tracker access.
//!
//! Services depend on these traits only; the Jira REST client and the
//! in-memory tracker implement them.

pub mod tracker;

#[cfg(test)]
pub use tracker::MockIssueTracker;
pub use tracker::{IssueTracker, TrackerError, TrackerResult};
