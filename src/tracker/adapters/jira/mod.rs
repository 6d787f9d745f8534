//! Jira REST adapter.
//!
//! Talks to the Jira platform API (`/rest/api/2`) for issues, comments,
//! transitions and assignment, and to the agile API (`/rest/agile/1.0`) for
//! sprints. Authentication is HTTP basic auth with a username and API token.

mod client;
mod models;

pub use client::{JiraClient, JiraConnection};
