//! Logging set-up for the binary.
//!
//! Logs go to standard error so summaries on standard output stay clean.
//! `RUST_LOG` takes precedence over the verbosity flag.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "jira_helpers=info";

/// Filter used when `RUST_LOG` is unset and debug output is requested.
const VERBOSE_FILTER: &str = "jira_helpers=debug";

/// Failure to install the global subscriber.
#[derive(Debug, Error)]
#[error("failed to initialise logging: {0}")]
pub struct TelemetryError(String);

/// Returns the filter directives for a run.
#[must_use]
pub fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    })
}

/// Installs the global `tracing` subscriber.
///
/// # Errors
///
/// Returns [`TelemetryError`] when a subscriber is already installed.
pub fn init(verbose: bool) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| TelemetryError(err.to_string()))
}
