//! Application services for rotation scheduling.

mod scheduler;

pub use scheduler::{RotationError, RotationResult, RotationScheduler};
