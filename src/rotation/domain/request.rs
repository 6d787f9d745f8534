//! Inputs of a rotation run.

use super::{IssueTemplates, RotationDomainError, RotationKind, SprintNameTemplate};
use crate::tracker::domain::{AccountEmail, BoardId, FieldName, IssueKey, SprintId};

/// Everything needed to schedule one rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationRequest {
    kind: RotationKind,
    project_key: String,
    board: BoardId,
    epic: IssueKey,
    sprint_template: SprintNameTemplate,
    first_sprint_number: u64,
    people: Vec<AccountEmail>,
    templates: IssueTemplates,
    sprint_field: FieldName,
    open_status: String,
    issue_type: String,
    dry_run: bool,
}

impl RotationRequest {
    /// Field holding the sprint of an issue on Jira Cloud.
    pub const DEFAULT_SPRINT_FIELD: &'static str = "customfield_10020";
    /// Status of freshly created, untouched rotation tickets.
    pub const DEFAULT_OPEN_STATUS: &'static str = "Untriaged";
    /// Issue type of rotation tickets.
    pub const DEFAULT_ISSUE_TYPE: &'static str = "Task";

    /// Creates a request with default templates, sprint field, status and
    /// issue type.
    ///
    /// # Errors
    ///
    /// Returns [`RotationDomainError::EmptyProjectKey`] for a blank project
    /// and [`RotationDomainError::EmptyPeopleQueue`] when nobody is queued.
    pub fn new(
        kind: RotationKind,
        project_key: impl Into<String>,
        board: BoardId,
        epic: IssueKey,
        sprint_template: SprintNameTemplate,
        first_sprint_number: u64,
        people: Vec<AccountEmail>,
    ) -> Result<Self, RotationDomainError> {
        let raw_project = project_key.into();
        let project = raw_project.trim();
        if project.is_empty() {
            return Err(RotationDomainError::EmptyProjectKey);
        }
        if people.is_empty() {
            return Err(RotationDomainError::EmptyPeopleQueue);
        }
        Ok(Self {
            kind,
            project_key: project.to_owned(),
            board,
            epic,
            sprint_template,
            first_sprint_number,
            people,
            templates: IssueTemplates::for_kind(kind),
            sprint_field: FieldName::from_static(Self::DEFAULT_SPRINT_FIELD),
            open_status: Self::DEFAULT_OPEN_STATUS.to_owned(),
            issue_type: Self::DEFAULT_ISSUE_TYPE.to_owned(),
            dry_run: false,
        })
    }

    /// Replaces the ticket templates.
    #[must_use]
    pub fn with_templates(mut self, templates: IssueTemplates) -> Self {
        self.templates = templates;
        self
    }

    /// Sets the field that holds an issue's sprint.
    #[must_use]
    pub fn with_sprint_field(mut self, field: FieldName) -> Self {
        self.sprint_field = field;
        self
    }

    /// Sets the status that identifies existing, untouched tickets.
    #[must_use]
    pub fn with_open_status(mut self, status: impl Into<String>) -> Self {
        self.open_status = status.into();
        self
    }

    /// Sets the issue type of created tickets.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Reports the plan instead of creating tickets.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the rotation kind.
    #[must_use]
    pub const fn kind(&self) -> RotationKind {
        self.kind
    }

    /// Returns the project key.
    #[must_use]
    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// Returns the board whose sprints are used.
    #[must_use]
    pub const fn board(&self) -> BoardId {
        self.board
    }

    /// Returns the epic tickets are created under.
    #[must_use]
    pub const fn epic(&self) -> &IssueKey {
        &self.epic
    }

    /// Returns the sprint name template.
    #[must_use]
    pub const fn sprint_template(&self) -> &SprintNameTemplate {
        &self.sprint_template
    }

    /// Returns the number of the first sprint to fill.
    #[must_use]
    pub const fn first_sprint_number(&self) -> u64 {
        self.first_sprint_number
    }

    /// Returns the queued people in order.
    #[must_use]
    pub fn people(&self) -> &[AccountEmail] {
        &self.people
    }

    /// Returns the ticket templates.
    #[must_use]
    pub const fn templates(&self) -> &IssueTemplates {
        &self.templates
    }

    /// Returns the sprint field name.
    #[must_use]
    pub const fn sprint_field(&self) -> &FieldName {
        &self.sprint_field
    }

    /// Returns the status of untouched tickets.
    #[must_use]
    pub fn open_status(&self) -> &str {
        &self.open_status
    }

    /// Returns the issue type of created tickets.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }

    /// Returns `true` when nothing should be created.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the JQL finding untouched tickets of this rotation in a
    /// sprint.
    #[must_use]
    pub fn existing_tickets_jql(&self, sprint: SprintId) -> String {
        format!(
            "project = \"{}\" AND sprint = {} AND parent = {} AND status = \"{}\"",
            self.project_key, sprint, self.epic, self.open_status
        )
    }
}
