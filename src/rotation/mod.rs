//! Recurring duty tickets assigned from a people queue.
//!
//! Each person in the queue gets one ticket for one sprint week, two weeks
//! per sprint, created under an epic and placed in the matching sprint.
//! Support vanguard and show-and-tell rotations share the scheduling and
//! differ only in their ticket texts.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
