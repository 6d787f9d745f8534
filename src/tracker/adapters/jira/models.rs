//! Wire payloads exchanged with the Jira REST API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::tracker::domain::{
    FieldMap, FieldName, FieldValue, Issue, IssueDraft, IssueKey, Sprint, SprintId, SprintState,
    TrackerDomainError,
};

#[derive(Debug, Deserialize)]
pub(super) struct IssuePayload {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl IssuePayload {
    pub(super) fn into_issue(self) -> Result<Issue, TrackerDomainError> {
        let key = IssueKey::new(self.key)?;
        let summary = self
            .fields
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let issue_type = self
            .fields
            .get("issuetype")
            .and_then(|value| value.get("name"))
            .and_then(Value::as_str)
            .map(str::to_owned);

        let fields: FieldMap = self
            .fields
            .into_iter()
            // Jira reports unset fields as null.
            .filter(|(_, value)| !value.is_null())
            .filter_map(|(name, value)| {
                FieldName::new(name)
                    .ok()
                    .map(|field| (field, FieldValue::new(value)))
            })
            .collect();

        let mut issue = Issue::new(key).with_fields(fields);
        if let Some(text) = summary {
            issue = issue.with_summary(text);
        }
        if let Some(name) = issue_type {
            issue = issue.with_issue_type(name);
        }
        Ok(issue)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SearchPage {
    #[serde(default)]
    pub issues: Vec<IssuePayload>,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default = "last_page")]
    pub is_last: bool,
}

const fn last_page() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub(super) struct UpdateRequest<'a> {
    pub fields: &'a FieldMap,
}

#[derive(Debug, Serialize)]
pub(super) struct CreateRequest {
    pub fields: Map<String, Value>,
}

impl CreateRequest {
    pub(super) fn from_draft(draft: &IssueDraft) -> Self {
        let mut fields = Map::new();
        fields.insert(
            "project".to_owned(),
            serde_json::json!({ "key": draft.project_key() }),
        );
        fields.insert(
            "summary".to_owned(),
            Value::String(draft.summary().to_owned()),
        );
        if let Some(description) = draft.description() {
            fields.insert(
                "description".to_owned(),
                Value::String(description.to_owned()),
            );
        }
        fields.insert(
            "issuetype".to_owned(),
            serde_json::json!({ "name": draft.issue_type() }),
        );
        if let Some(parent) = draft.parent() {
            fields.insert(
                "parent".to_owned(),
                serde_json::json!({ "key": parent.as_str() }),
            );
        }
        Self { fields }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedIssue {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserPayload {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

#[derive(Debug, Serialize)]
pub(super) struct AssigneeRequest<'a> {
    #[serde(rename = "accountId")]
    pub account_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct CommentRequest<'a> {
    pub body: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct TransitionRequest<'a> {
    pub transition: TransitionRef<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct TransitionRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct SprintPage {
    #[serde(default)]
    pub values: Vec<SprintPayload>,
    #[serde(rename = "isLast", default = "last_page")]
    pub is_last: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct SprintPayload {
    pub id: u64,
    pub name: String,
    pub state: String,
    #[serde(rename = "startDate", default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(rename = "endDate", default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl SprintPayload {
    pub(super) fn into_sprint(self) -> Result<Sprint, TrackerDomainError> {
        let state = SprintState::try_from(self.state.as_str())?;
        let mut sprint = Sprint::new(SprintId::new(self.id), self.name, state);
        if let Some(start) = self.start_date {
            sprint = sprint.with_start_date(start);
        }
        if let Some(end) = self.end_date {
            sprint = sprint.with_end_date(end);
        }
        Ok(sprint)
    }
}

/// Error body returned by Jira on rejected requests.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(rename = "errorMessages", default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorBody {
    pub(super) fn reason(&self, fallback: &str) -> String {
        let mut parts = self.error_messages.clone();
        parts.extend(
            self.errors
                .iter()
                .map(|(field, message)| format!("{field}: {message}")),
        );
        if parts.is_empty() {
            fallback.to_owned()
        } else {
            parts.join("; ")
        }
    }
}
