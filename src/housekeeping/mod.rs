//! Closing of stale issues that were never put under a parent.
//!
//! A sweep finds open tasks, stories, bugs and epics without a parent that
//! have not been updated for a number of days, explains the closure in a
//! comment and transitions them.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
