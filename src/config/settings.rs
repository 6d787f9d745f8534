//! Resolved settings and their translation into command inputs.

use camino::Utf8Path;
use std::time::Duration;

use super::layer::yaml_file;
use super::{ConfigError, ConfigLayer, EnvSource};
use crate::housekeeping::domain::{StaleSweep, SweepDomainError};
use crate::propagation::domain::{FailurePolicy, FieldSet, PropagationJob};
use crate::rotation::domain::{
    IssueTemplates, RotationDomainError, RotationKind, RotationRequest, SprintNameTemplate,
};
use crate::tracker::adapters::jira::JiraConnection;
use crate::tracker::domain::{AccountEmail, BoardId, FieldName, IssueKey, TransitionId};

/// Placeholder used by older sprint templates.
const LEGACY_SPRINT_PLACEHOLDER: &str = "${sprint_number}";

/// Configuration of one run, merged from all layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: ConfigLayer,
}

impl Settings {
    /// Loads settings from a config file, the environment and command-line
    /// values, in increasing precedence.
    ///
    /// When `explicit_file` is given it must exist; otherwise
    /// `default_file` is read if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when a file cannot be read and
    /// [`ConfigError::Load`] when a layer holds malformed values.
    pub fn load(
        explicit_file: Option<&Utf8Path>,
        default_file: &Utf8Path,
        env: &dyn EnvSource,
        cli: ConfigLayer,
    ) -> Result<Self, ConfigError> {
        let file = match explicit_file {
            Some(path) => yaml_file(path, true)?,
            None => yaml_file(default_file, false)?,
        };
        Ok(Self::from_layer(cli.layered_over(file, env)?))
    }

    /// Wraps an already merged layer.
    #[must_use]
    pub const fn from_layer(values: ConfigLayer) -> Self {
        Self { values }
    }

    /// Returns the raw merged values.
    #[must_use]
    pub const fn values(&self) -> &ConfigLayer {
        &self.values
    }

    /// Returns `true` when changes should only be reported.
    #[must_use]
    pub fn dry_run(&self) -> bool {
        self.values.dry_run.unwrap_or(false)
    }

    /// Returns `true` when debug logging is requested.
    #[must_use]
    pub fn verbose(&self) -> bool {
        self.values.verbose.unwrap_or(false)
    }

    /// Returns the Jira connection parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the URL, username or token is
    /// unset.
    pub fn connection(&self) -> Result<JiraConnection, ConfigError> {
        let base_url = required(self.values.base_url.as_ref(), "base_url")?;
        let username = required(self.values.username.as_ref(), "username")?;
        let api_token = required(self.values.api_token.as_ref(), "api_token")?;
        let mut connection = JiraConnection::new(base_url, username, api_token);
        if let Some(seconds) = self.values.timeout_secs {
            connection = connection.with_timeout(Duration::from_secs(seconds));
        }
        Ok(connection)
    }

    /// Builds the propagation job for `update-children`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the root issue is unset, a key or field
    /// name is invalid, or no field is requested.
    pub fn propagation_job(&self) -> Result<PropagationJob, ConfigError> {
        let root = IssueKey::new(required(self.values.issue.as_ref(), "issue")?)
            .map_err(|err| ConfigError::invalid("issue", err))?;
        let overwrite = field_names(self.values.overwrite.as_deref(), "overwrite")?;
        let append = field_names(self.values.append.as_deref(), "append")?;
        let fields = FieldSet::new(overwrite, append)
            .map_err(|err| ConfigError::invalid("overwrite", err))?;
        let policy = if self.values.fail_fast.unwrap_or(false) {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::SkipSubtree
        };
        Ok(PropagationJob::new(root, fields)
            .with_policy(policy)
            .with_dry_run(self.dry_run()))
    }

    /// Builds the rotation request for `support-vanguard` or
    /// `show-and-tell`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required rotation setting is unset or
    /// invalid.
    pub fn rotation_request(&self, kind: RotationKind) -> Result<RotationRequest, ConfigError> {
        let values = &self.values;
        let project_key = required(values.project_key.as_ref(), "project_key")?;
        let board = BoardId::new(values.board_id.ok_or_else(|| ConfigError::missing("board_id"))?);
        let epic = IssueKey::new(required(values.epic_key.as_ref(), "epic_key")?)
            .map_err(|err| ConfigError::invalid("epic_key", err))?;
        let template_source =
            required(values.sprint_template.as_ref(), "sprint_template")?.replace(
                LEGACY_SPRINT_PLACEHOLDER,
                "{{ sprint_number }}",
            );
        let sprint_template = SprintNameTemplate::new(template_source)
            .map_err(|err| ConfigError::invalid("sprint_template", err))?;
        let first_sprint_number = values
            .sprint_starting_number
            .ok_or_else(|| ConfigError::missing("sprint_starting_number"))?;
        let people = values
            .people_queue
            .as_deref()
            .ok_or_else(|| ConfigError::missing("people_queue"))?
            .iter()
            .filter(|email| !email.trim().is_empty())
            .map(|email| {
                AccountEmail::new(email.as_str())
                    .map_err(|err| ConfigError::invalid("people_queue", err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut request = RotationRequest::new(
            kind,
            project_key,
            board,
            epic,
            sprint_template,
            first_sprint_number,
            people,
        )
        .map_err(|err| {
            let key = match err {
                RotationDomainError::EmptyProjectKey => "project_key",
                _ => "people_queue",
            };
            ConfigError::invalid(key, err)
        })?
        .with_dry_run(self.dry_run());

        if values.summary_template.is_some() || values.description_template.is_some() {
            request = request.with_templates(IssueTemplates::new(
                values
                    .summary_template
                    .clone()
                    .unwrap_or_else(|| kind.default_summary_template().to_owned()),
                values
                    .description_template
                    .clone()
                    .unwrap_or_else(|| kind.default_description_template().to_owned()),
            ));
        }
        if let Some(field) = values.sprint_field.as_deref() {
            request = request.with_sprint_field(
                FieldName::new(field).map_err(|err| ConfigError::invalid("sprint_field", err))?,
            );
        }
        if let Some(status) = values.open_status.as_deref() {
            request = request.with_open_status(status);
        }
        if let Some(issue_type) = values.issue_type.as_deref() {
            request = request.with_issue_type(issue_type);
        }
        Ok(request)
    }

    /// Builds the sweep for `close-stale`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the project, stale days or transition is
    /// unset or invalid.
    pub fn stale_sweep(&self) -> Result<StaleSweep, ConfigError> {
        let values = &self.values;
        let project_key = required(values.project_key.as_ref(), "project_key")?;
        let stale_days = values
            .stale_days
            .ok_or_else(|| ConfigError::missing("stale_days"))?;
        let transition = TransitionId::new(required(
            values.transition_to.as_ref(),
            "transition_to",
        )?)
        .map_err(|err| ConfigError::invalid("transition_to", err))?;
        Ok(StaleSweep::new(project_key, stale_days, transition)
            .map_err(|err| {
                let key = match err {
                    SweepDomainError::EmptyProjectKey => "project_key",
                    SweepDomainError::ZeroStaleDays => "stale_days",
                };
                ConfigError::invalid(key, err)
            })?
            .with_dry_run(self.dry_run()))
    }
}

fn required<'a>(value: Option<&'a String>, key: &'static str) -> Result<&'a str, ConfigError> {
    value
        .map(String::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| ConfigError::missing(key))
}

fn field_names(names: Option<&[String]>, key: &'static str) -> Result<Vec<FieldName>, ConfigError> {
    names
        .unwrap_or_default()
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| FieldName::new(name.as_str()).map_err(|err| ConfigError::invalid(key, err)))
        .collect()
}
