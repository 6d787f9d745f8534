//! Adapter implementations for the issue tracker port.

pub mod jira;
pub mod memory;
