//! Application services for child field propagation.

mod propagator;

pub use propagator::{ChildPropagator, PropagationError, PropagationResult};
