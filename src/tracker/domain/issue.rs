//! Issue snapshots read from the tracker and drafts written to it.

use super::{FieldMap, FieldName, FieldValue, IssueKey};

/// An issue as read from the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    key: IssueKey,
    summary: Option<String>,
    issue_type: Option<String>,
    fields: FieldMap,
}

impl Issue {
    /// Creates an issue with no fields.
    #[must_use]
    pub const fn new(key: IssueKey) -> Self {
        Self {
            key,
            summary: None,
            issue_type: None,
            fields: FieldMap::new(),
        }
    }

    /// Sets the issue summary.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        let value = summary.into();
        let normalized = value.trim();
        self.summary = (!normalized.is_empty()).then(|| normalized.to_owned());
        self
    }

    /// Sets the issue type name.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        let value = issue_type.into();
        let normalized = value.trim();
        self.issue_type = (!normalized.is_empty()).then(|| normalized.to_owned());
        self
    }

    /// Sets a single field value, replacing any previous value.
    #[must_use]
    pub fn with_field(mut self, name: FieldName, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name, value.into());
        self
    }

    /// Replaces all field values.
    #[must_use]
    pub fn with_fields(mut self, fields: FieldMap) -> Self {
        self.fields = fields;
        self
    }

    /// Returns the issue key.
    #[must_use]
    pub const fn key(&self) -> &IssueKey {
        &self.key
    }

    /// Returns the issue summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Returns the issue type name.
    #[must_use]
    pub fn issue_type(&self) -> Option<&str> {
        self.issue_type.as_deref()
    }

    /// Returns the value of a field, `None` when the issue has no such field.
    #[must_use]
    pub fn field(&self, name: &FieldName) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Returns all field values.
    #[must_use]
    pub const fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Applies written field values on top of the current ones.
    pub fn apply_fields(&mut self, fields: &FieldMap) {
        for (name, value) in fields {
            self.fields.insert(name.clone(), value.clone());
        }
    }
}

/// Payload for creating a new issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    project_key: String,
    summary: String,
    description: Option<String>,
    issue_type: String,
    parent: Option<IssueKey>,
}

impl IssueDraft {
    /// Creates a draft with the required project, summary and issue type.
    #[must_use]
    pub fn new(
        project_key: impl Into<String>,
        summary: impl Into<String>,
        issue_type: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            summary: summary.into(),
            description: None,
            issue_type: issue_type.into(),
            parent: None,
        }
    }

    /// Sets the issue description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Nests the issue under a parent issue.
    #[must_use]
    pub fn with_parent(mut self, parent: IssueKey) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Returns the project key.
    #[must_use]
    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// Returns the summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the issue type name.
    #[must_use]
    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }

    /// Returns the parent issue key.
    #[must_use]
    pub const fn parent(&self) -> Option<&IssueKey> {
        self.parent.as_ref()
    }
}
