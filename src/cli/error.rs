//! Command failures and their exit codes.

use std::sync::Arc;
use thiserror::Error;

use crate::config::ConfigError;
use crate::housekeeping::services::SweepError;
use crate::propagation::services::PropagationError;
use crate::rotation::services::RotationError;
use crate::tracker::ports::TrackerError;

/// Any failure of a command run.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings are missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The tracker client could not be set up.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// `update-children` failed as a whole.
    #[error(transparent)]
    Propagation(#[from] PropagationError),

    /// A rotation could not be scheduled.
    #[error(transparent)]
    Rotation(#[from] RotationError),

    /// A stale issue sweep could not run.
    #[error(transparent)]
    Sweep(#[from] SweepError),

    /// The run finished but some issues could not be processed.
    #[error("{failures} issues could not be processed")]
    Incomplete {
        /// Number of failed issues.
        failures: usize,
    },

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(Arc<std::io::Error>),

    /// The summary could not be written.
    #[error("failed to write output: {0}")]
    Output(Arc<std::io::Error>),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(Arc::new(err))
    }
}

/// Exit code of tracker failures that are not specific to a command.
const TRACKER_FAILURE: u8 = 10;

impl CliError {
    /// Returns the process exit code for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Tracker(_)
            | Self::Propagation(
                PropagationError::Tracker(_) | PropagationError::RootChildren { .. },
            )
            | Self::Rotation(RotationError::Tracker(_))
            | Self::Sweep(SweepError::Search(_)) => TRACKER_FAILURE,
            Self::Rotation(RotationError::EpicNotFound(_)) => 2,
            Self::Rotation(RotationError::NotEnoughSprints { .. }) => 3,
            Self::Rotation(RotationError::SprintNotCurrent(_)) => 4,
            Self::Rotation(RotationError::DuplicateRotation { .. }) => 5,
            Self::Rotation(
                RotationError::SprintMissing(_) | RotationError::SprintWithoutStartDate(_),
            ) => 6,
            Self::Config(_)
            | Self::Propagation(_)
            | Self::Rotation(RotationError::Domain(_))
            | Self::Incomplete { .. }
            | Self::Runtime(_)
            | Self::Output(_) => 1,
        }
    }
}
