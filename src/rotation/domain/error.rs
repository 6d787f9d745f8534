//! Error types for rotation domain validation.

use thiserror::Error;

/// Errors returned while building rotation inputs or rendering texts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RotationDomainError {
    /// Nobody is queued for the rotation.
    #[error("the people queue must not be empty")]
    EmptyPeopleQueue,

    /// The project key is blank.
    #[error("project key must not be empty")]
    EmptyProjectKey,

    /// The sprint name template does not depend on the sprint number.
    #[error("sprint template '{0}' must contain {{{{ sprint_number }}}}")]
    MissingSprintNumber(String),

    /// The sprint number of a slot is past the largest representable one.
    #[error("sprint number overflows for slot {index} after first sprint {first}")]
    SprintNumberOverflow {
        /// First sprint number.
        first: u64,
        /// Slot index.
        index: u64,
    },

    /// A template failed to render.
    #[error("failed to render {template} template: {reason}")]
    TemplateRender {
        /// Which template failed.
        template: &'static str,
        /// Renderer error message.
        reason: String,
    },
}
