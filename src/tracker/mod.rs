//! Issue tracker access for the helper commands.
//!
//! The tracker context models the remote issue store the commands operate
//! on. It follows the same hexagonal split as the rest of the crate:
//!
//! - Domain types in [`domain`]
//! - The client port in [`ports`]
//! - Jira REST and in-memory implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
