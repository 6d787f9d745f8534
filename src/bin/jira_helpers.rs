//! Runs one Jira chore and exits.
//!
//! Usage:
//!
//! ```text
//! jira-helpers [--config FILE] [--dry-run] <command> [options]
//! ```
//!
//! Settings come from `<command>.yaml` (or `--config`), `JIRA_*`
//! environment variables and the command line, in increasing precedence.
//! The summary is printed on standard output; the exit code is 0 on full
//! success.

use clap::Parser;
use jira_helpers::cli::{Cli, CliError, run};
use jira_helpers::config::ProcessEnv;
use jira_helpers::telemetry;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Builder;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::from(err.exit_code())
        }
    }
}

fn execute(cli: &Cli) -> Result<(), CliError> {
    let settings = cli.load_settings(&ProcessEnv)?;
    if let Err(err) = telemetry::init(settings.verbose()) {
        report(&err);
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| CliError::Runtime(Arc::new(err)))?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    runtime.block_on(run(&cli.command, &settings, &mut out))
}

fn report(err: &dyn std::error::Error) {
    let mut stderr = io::stderr().lock();
    // A closed standard error leaves nowhere to report to.
    drop(writeln!(stderr, "error: {err}"));
}
