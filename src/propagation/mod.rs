//! Propagation of field values from a root issue to its descendants.
//!
//! A run captures the requested field values from the root once, walks
//! every issue reachable through parent-child links and writes the captured
//! values onto each of them. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Orchestration in [`services`]
//!
//! The tracker port it depends on lives in [`crate::tracker::ports`].

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
