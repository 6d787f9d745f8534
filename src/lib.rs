//! Jira helpers: command-line chores for a Jira instance.
//!
//! The central chore copies field values from an issue onto every issue
//! below it. Two more keep rotating duty tickets filled and close stale
//! parentless issues.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (Jira REST, in-memory)
//!
//! # Modules
//!
//! - [`tracker`]: Issue tracker model, port and adapters
//! - [`propagation`]: Copying root field values to all descendants
//! - [`rotation`]: Support vanguard and show-and-tell ticket scheduling
//! - [`housekeeping`]: Closing stale issues without a parent
//! - [`config`]: Layered run configuration
//! - [`cli`]: Command-line surface and exit codes

pub mod cli;
pub mod config;
pub mod housekeeping;
pub mod propagation;
pub mod rotation;
pub mod telemetry;
pub mod tracker;
