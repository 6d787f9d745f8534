//! Error types for propagation domain validation.

use crate::tracker::domain::{FieldName, IssueKey};
use thiserror::Error;

/// Errors returned while building propagation inputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PropagationDomainError {
    /// No field was requested.
    #[error("at least one field must be propagated")]
    EmptyFieldSet,

    /// The root issue does not carry a requested field.
    #[error("root issue {issue} has no field '{field}'")]
    MissingField {
        /// Root issue key.
        issue: IssueKey,
        /// Field that is absent on the root.
        field: FieldName,
    },
}
