//! Command dispatch.

use std::io::Write;
use std::sync::Arc;

use tracing::info;

use super::{CliError, Command};
use crate::config::Settings;
use crate::housekeeping::services::StaleIssueCloser;
use crate::propagation::services::{ChildPropagator, PropagationError};
use crate::rotation::domain::RotationKind;
use crate::rotation::services::RotationScheduler;
use crate::tracker::adapters::jira::JiraClient;
use crate::tracker::ports::IssueTracker;

/// Runs `command` against the Jira instance named in `settings`.
///
/// # Errors
///
/// Returns [`CliError`] when the connection settings are incomplete or the
/// command fails.
pub async fn run(
    command: &Command,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let client = JiraClient::new(settings.connection()?)?;
    run_command(command, settings, Arc::new(client), out).await
}

/// Runs `command` against `tracker` and writes its summary to `out`.
///
/// Runs that finish with per-issue failures still print their summary and
/// then return [`CliError::Incomplete`].
///
/// # Errors
///
/// Returns [`CliError`] when the settings do not fit the command, the
/// command fails, or some issues could not be processed.
pub async fn run_command<T>(
    command: &Command,
    settings: &Settings,
    tracker: Arc<T>,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    T: IssueTracker,
{
    match command {
        Command::UpdateChildren(_) => {
            let job = settings.propagation_job()?;
            info!(root = %job.root(), fields = %job.fields(), "updating children");
            let report = match ChildPropagator::new(tracker).propagate(&job).await {
                Ok(report) => report,
                Err(PropagationError::Aborted { failure, report }) => {
                    write!(out, "{report}")?;
                    return Err(PropagationError::Aborted { failure, report }.into());
                }
                Err(err) => return Err(err.into()),
            };
            write!(out, "{report}")?;
            incomplete(report.failures().len())
        }
        Command::SupportVanguard(_) => {
            rotate(RotationKind::SupportVanguard, settings, tracker, out).await
        }
        Command::ShowAndTell(_) => rotate(RotationKind::ShowAndTell, settings, tracker, out).await,
        Command::CloseStale(_) => {
            let sweep = settings.stale_sweep()?;
            let report = StaleIssueCloser::new(tracker).sweep(&sweep).await?;
            write!(out, "{report}")?;
            incomplete(report.failures().len())
        }
    }
}

async fn rotate<T>(
    kind: RotationKind,
    settings: &Settings,
    tracker: Arc<T>,
    out: &mut dyn Write,
) -> Result<(), CliError>
where
    T: IssueTracker,
{
    let request = settings.rotation_request(kind)?;
    let report = RotationScheduler::new(tracker).schedule(&request).await?;
    write!(out, "{report}")?;
    Ok(())
}

const fn incomplete(failures: usize) -> Result<(), CliError> {
    if failures == 0 {
        Ok(())
    } else {
        Err(CliError::Incomplete { failures })
    }
}
