//! Domain model for the remote issue store.
//!
//! Values here are validated on construction and carry no transport
//! concerns; adapters translate them to and from wire payloads.

mod error;
mod field;
mod ids;
mod issue;
mod sprint;

pub use error::TrackerDomainError;
pub use field::{FieldMap, FieldName, FieldValue};
pub use ids::{AccountEmail, BoardId, IssueKey, SprintId, TransitionId};
pub use issue::{Issue, IssueDraft};
pub use sprint::{Sprint, SprintState};
