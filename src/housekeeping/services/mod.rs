//! Application services for stale issue sweeps.

mod closer;

pub use closer::{StaleIssueCloser, SweepError, SweepResult};
