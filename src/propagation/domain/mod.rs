//! Domain model for child field propagation.

mod error;
mod field_set;
mod job;
mod report;
mod snapshot;

pub use error::PropagationDomainError;
pub use field_set::{FieldSet, MergeMode};
pub use job::{FailurePolicy, PropagationJob};
pub use report::{FailureStage, NodeFailure, PlannedChange, PropagationReport};
pub use snapshot::FieldSnapshot;
