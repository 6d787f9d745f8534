//! Domain model for rotation scheduling.

mod error;
mod kind;
mod report;
mod request;
mod slot;
mod template;

pub use error::RotationDomainError;
pub use kind::RotationKind;
pub use report::RotationReport;
pub use request::RotationRequest;
pub use slot::{RotationSlot, sprint_number, week_in_sprint, week_start};
pub use template::{IssueTemplates, SlotContext, SprintNameTemplate};
