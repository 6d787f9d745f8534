//! Run configuration.
//!
//! Settings are assembled once at start-up from three layers, each
//! overriding the previous one:
//!
//! 1. a YAML file (by default `<command>.yaml` in the working directory),
//! 2. environment variables prefixed with `JIRA_`, for example
//!    `JIRA_API_TOKEN` or `JIRA_PEOPLE_QUEUE=a@example.com,b@example.com`,
//! 3. command-line arguments.
//!
//! The resulting [`Settings`] value is passed by reference to whatever needs
//! it; nothing reads configuration from global state.

mod env;
mod error;
mod layer;
mod settings;

pub use env::{EnvSource, ProcessEnv};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use settings::Settings;

#[cfg(test)]
mod tests;
