//! Domain model for stale issue sweeps.

mod report;
mod sweep;

pub use report::{SweepFailure, SweepReport};
pub use sweep::{StaleSweep, SweepDomainError};
