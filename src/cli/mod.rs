//! Command-line surface of the `jira-helpers` binary.
//!
//! Argument parsing lives in [`args`], the mapping of failures to exit
//! codes in [`error`], and command dispatch in [`run`]. Dispatch is generic
//! over the tracker so commands can be exercised against the in-memory
//! tracker.

pub mod args;
pub mod error;
pub mod run;

pub use args::{Cli, CloseStaleArgs, Command, RotationArgs, UpdateChildrenArgs};
pub use error::CliError;
pub use run::{run, run_command};

#[cfg(test)]
mod tests;
