//! Sources of optional settings and their layering.

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::{Config, Environment, File, FileFormat, FileSourceString};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::sync::Arc;

use super::{ConfigError, EnvSource};

const ENV_PREFIX: &str = "JIRA";

/// Settings read from the environment as comma separated lists.
const LIST_KEYS: [&str; 3] = ["overwrite", "append", "people_queue"];

/// Returns the environment variable that provides setting `key`.
pub(super) fn env_var_name(key: &str) -> String {
    format!("{ENV_PREFIX}_{}", key.to_ascii_uppercase())
}

/// Settings keyed as in the YAML file; unset values are `None`.
///
/// Unknown keys are ignored so one file can be shared between commands.
/// Unset values are left out when a layer is serialized, so a command-line
/// layer only overrides what was actually given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigLayer {
    /// URL of the Jira instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Login name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// API token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// HTTP request timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Report planned changes without writing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    /// Enable debug logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,

    /// Root issue of a propagation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    /// Fields copied exactly from the root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite: Option<Vec<String>>,
    /// Fields whose array values are merged into the children's.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<Vec<String>>,
    /// Abort propagation at the first failing issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_fast: Option<bool>,

    /// Jira project key.
    #[serde(alias = "project")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    /// Agile board holding the sprints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<u64>,
    /// Epic rotation tickets are created under.
    #[serde(alias = "vanguard_epic_key")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_key: Option<String>,
    /// Sprint name template, for example `Pulse {{ sprint_number }}`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_template: Option<String>,
    /// Number of the first sprint to fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_starting_number: Option<u64>,
    /// Emails of the people to assign, in order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_queue: Option<Vec<String>>,
    /// Field holding an issue's sprint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint_field: Option<String>,
    /// Status of untouched rotation tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_status: Option<String>,
    /// Issue type of rotation tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    /// Summary template of rotation tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_template: Option<String>,
    /// Description template of rotation tickets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_template: Option<String>,

    /// Days without update after which a parentless issue is stale.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_days: Option<u32>,
    /// Transition applied to stale issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition_to: Option<String>,
}

impl ConfigLayer {
    /// Merges a YAML file, `JIRA_*` environment variables and this layer,
    /// in increasing precedence.
    ///
    /// Environment lists are comma separated; booleans accept
    /// `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] when the file is not valid YAML or a
    /// value has the wrong type.
    pub fn layered_over(
        self,
        file: Option<File<FileSourceString, FileFormat>>,
        env: &dyn EnvSource,
    ) -> Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(file);
        }
        let overrides = Config::try_from(&self).map_err(ConfigError::load)?;
        let merged = builder
            .add_source(environment(env))
            .add_source(overrides)
            .build()
            .map_err(ConfigError::load)?;
        merged.try_deserialize().map_err(ConfigError::load)
    }
}

/// Reads a YAML settings file as a config source.
///
/// Returns `Ok(None)` when the file does not exist and `required` is
/// `false`.
///
/// # Errors
///
/// Returns [`ConfigError::Read`] when the file cannot be read, including a
/// missing required file.
pub fn yaml_file(
    path: &Utf8Path,
    required: bool,
) -> Result<Option<File<FileSourceString, FileFormat>>, ConfigError> {
    let read_error = |source: std::io::Error| ConfigError::Read {
        path: path.to_owned(),
        source: Arc::new(source),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            ErrorKind::InvalidInput,
            "path must include a file name",
        ))
    })?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir.to_owned(),
        _ => Utf8PathBuf::from("."),
    };

    let contents = Dir::open_ambient_dir(&parent, ambient_authority())
        .and_then(|dir| dir.read_to_string(file_name));
    match contents {
        Ok(text) if text.trim().is_empty() => Ok(None),
        Ok(text) => Ok(Some(File::from_str(&text, FileFormat::Yaml))),
        Err(err) if err.kind() == ErrorKind::NotFound && !required => Ok(None),
        Err(err) => Err(read_error(err)),
    }
}

fn environment(env: &dyn EnvSource) -> Environment {
    LIST_KEYS
        .iter()
        .fold(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true)
                .ignore_empty(true)
                .list_separator(","),
            |environment, key| environment.with_list_parse_key(key),
        )
        .source(env.variables())
}
