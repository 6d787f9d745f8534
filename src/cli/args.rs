//! Command-line arguments.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigError, ConfigLayer, EnvSource, Settings};

/// Recurring Jira chores.
#[derive(Debug, Parser)]
#[command(name = "jira-helpers", version, about)]
pub struct Cli {
    /// YAML config file; defaults to the command's file in the working
    /// directory when present.
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// The URL of your Jira instance.
    #[arg(short = 'b', long, global = true)]
    pub base_url: Option<String>,

    /// The username to log in to Jira.
    #[arg(short = 'u', long, global = true)]
    pub username: Option<String>,

    /// The Jira API token, can also be set as JIRA_API_TOKEN.
    #[arg(long, global = true)]
    pub api_token: Option<String>,

    /// Do not change anything, only report what would be done.
    #[arg(long, global = true, conflicts_with = "no_dry_run")]
    pub dry_run: bool,

    /// Override a dry run setting from the config file.
    #[arg(long, global = true)]
    pub no_dry_run: bool,

    /// Show debug logging output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Chore to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available chores.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Copy fields of an issue to all of its descendants.
    UpdateChildren(UpdateChildrenArgs),
    /// Create support vanguard tickets for the people queue.
    SupportVanguard(RotationArgs),
    /// Create show and tell tickets for the people queue.
    ShowAndTell(RotationArgs),
    /// Close stale issues without a parent.
    CloseStale(CloseStaleArgs),
}

impl Command {
    /// Returns the config file read when `--config` is not given.
    #[must_use]
    pub fn default_config_file(&self) -> &'static Utf8Path {
        let name = match self {
            Self::UpdateChildren(_) => "update_children.yaml",
            Self::SupportVanguard(_) => "support_vanguard.yaml",
            Self::ShowAndTell(_) => "showntell.yaml",
            Self::CloseStale(_) => "close_without_parent.yaml",
        };
        Utf8Path::new(name)
    }
}

/// Arguments of `update-children`.
#[derive(Debug, Clone, Default, Args)]
pub struct UpdateChildrenArgs {
    /// The key of the issue to process.
    #[arg(short = 'i', long)]
    pub issue: Option<String>,

    /// Fields to copy exactly from the issue; takes precedence over
    /// `--append`.
    #[arg(short = 'o', long, num_args = 1.., value_delimiter = ',')]
    pub overwrite: Vec<String>,

    /// Fields whose list values are added to the children's own values.
    #[arg(short = 'a', long, num_args = 1.., value_delimiter = ',')]
    pub append: Vec<String>,

    /// Stop at the first issue that cannot be updated.
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments of the rotation commands.
#[derive(Debug, Clone, Default, Args)]
pub struct RotationArgs {
    /// The Jira project key.
    #[arg(short = 'p', long)]
    pub project_key: Option<String>,

    /// The board whose sprints receive the tickets.
    #[arg(long)]
    pub board_id: Option<u64>,

    /// The epic to create tickets under.
    #[arg(short = 'e', long)]
    pub epic_key: Option<String>,

    /// Sprint name template containing `{{ sprint_number }}`.
    #[arg(long)]
    pub sprint_template: Option<String>,

    /// Number of the first sprint to fill.
    #[arg(long)]
    pub sprint_starting_number: Option<u64>,

    /// Emails of the people to assign, in order.
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub people_queue: Vec<String>,
}

/// Arguments of `close-stale`.
#[derive(Debug, Clone, Default, Args)]
pub struct CloseStaleArgs {
    /// The Jira project key.
    #[arg(short = 'p', long)]
    pub project_key: Option<String>,

    /// Days without update after which an issue is stale.
    #[arg(short = 's', long)]
    pub stale_days: Option<u32>,

    /// Transition to apply, for example 71 for "Rejected".
    #[arg(short = 't', long)]
    pub transition_to: Option<String>,
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl Cli {
    /// Returns the values given on the command line as a config layer.
    #[must_use]
    pub fn config_layer(&self) -> ConfigLayer {
        let dry_run = if self.dry_run {
            Some(true)
        } else if self.no_dry_run {
            Some(false)
        } else {
            None
        };
        let mut layer = ConfigLayer {
            base_url: self.base_url.clone(),
            username: self.username.clone(),
            api_token: self.api_token.clone(),
            dry_run,
            verbose: self.verbose.then_some(true),
            ..ConfigLayer::default()
        };

        match &self.command {
            Command::UpdateChildren(args) => {
                layer.issue.clone_from(&args.issue);
                layer.overwrite = non_empty(&args.overwrite);
                layer.append = non_empty(&args.append);
                layer.fail_fast = args.fail_fast.then_some(true);
            }
            Command::SupportVanguard(args) | Command::ShowAndTell(args) => {
                layer.project_key.clone_from(&args.project_key);
                layer.board_id = args.board_id;
                layer.epic_key.clone_from(&args.epic_key);
                layer.sprint_template.clone_from(&args.sprint_template);
                layer.sprint_starting_number = args.sprint_starting_number;
                layer.people_queue = non_empty(&args.people_queue);
            }
            Command::CloseStale(args) => {
                layer.project_key.clone_from(&args.project_key);
                layer.stale_days = args.stale_days;
                layer.transition_to.clone_from(&args.transition_to);
            }
        }
        layer
    }

    /// Loads the settings of this invocation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the config path is not UTF-8 or any
    /// layer fails to load.
    pub fn load_settings(&self, env: &dyn EnvSource) -> Result<Settings, ConfigError> {
        let explicit = self
            .config
            .clone()
            .map(Utf8PathBuf::from_path_buf)
            .transpose()
            .map_err(|path| {
                ConfigError::invalid("config", format!("{} is not valid UTF-8", path.display()))
            })?;
        Settings::load(
            explicit.as_deref(),
            self.command.default_config_file(),
            env,
            self.config_layer(),
        )
    }
}
