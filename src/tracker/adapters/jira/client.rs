//! HTTP client implementing [`IssueTracker`] against Jira.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use super::models::{
    AssigneeRequest, CommentRequest, CreateRequest, CreatedIssue, ErrorBody, IssuePayload,
    SearchPage, SprintPage, TransitionRef, TransitionRequest, UpdateRequest, UserPayload,
};
use crate::tracker::{
    domain::{
        AccountEmail, BoardId, FieldMap, Issue, IssueDraft, IssueKey, Sprint, SprintState,
        TransitionId,
    },
    ports::{IssueTracker, TrackerError, TrackerResult},
};

const SEARCH_PAGE_SIZE: usize = 100;

/// Field selector returning every field shown in issue navigators.
const NAVIGABLE_FIELDS: &str = "*navigable";

const SPRINT_PAGE_SIZE: usize = 50;

/// Connection parameters for a Jira instance.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConnection {
    base_url: String,
    username: String,
    api_token: String,
    timeout: Duration,
}

impl JiraConnection {
    /// Creates connection parameters with a 30 second request timeout.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        let raw_url = base_url.into();
        Self {
            base_url: raw_url.trim().trim_end_matches('/').to_owned(),
            username: username.into(),
            api_token: api_token.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl fmt::Debug for JiraConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConnection")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Whether a request reads or writes, which decides how rejections map to
/// [`TrackerError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Read,
    Write,
}

/// Jira REST client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    connection: JiraConnection,
}

impl JiraClient {
    /// Builds a client for the given connection.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Transport`] when the HTTP client cannot be
    /// initialised.
    pub fn new(connection: JiraConnection) -> TrackerResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(connection.timeout)
            .build()
            .map_err(TrackerError::transport)?;
        debug!(
            base_url = connection.base_url(),
            username = connection.username(),
            "created Jira client"
        );
        Ok(Self { http, connection })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.connection.base_url);
        debug!(method = method.as_str(), url = url.as_str(), "jira request");
        self.http
            .request(method, url)
            .basic_auth(&self.connection.username, Some(&self.connection.api_token))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        access: Access,
        target: &str,
    ) -> TrackerResult<Response> {
        let response = request.send().await.map_err(TrackerError::transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let fallback = status.canonical_reason().unwrap_or("request rejected");
        let reason = serde_json::from_str::<ErrorBody>(&body)
            .unwrap_or_default()
            .reason(fallback);
        Err(rejection(status, access, target, reason))
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        access: Access,
        target: &str,
    ) -> TrackerResult<T> {
        let response = self.send(request, access, target).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| TrackerError::UnexpectedResponse(format!("{target}: {err}")))
    }

    /// Runs an enhanced JQL search, following `nextPageToken` until the
    /// last page or `limit` issues.
    async fn search(
        &self,
        jql: &str,
        limit: usize,
        fields: &str,
    ) -> TrackerResult<Vec<IssuePayload>> {
        let mut collected: Vec<IssuePayload> = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let remaining = limit.saturating_sub(collected.len());
            if remaining == 0 {
                break;
            }
            let max_results = remaining.min(SEARCH_PAGE_SIZE).to_string();
            let mut query = vec![
                ("jql", jql),
                ("maxResults", max_results.as_str()),
                ("fields", fields),
            ];
            if let Some(token) = page_token.as_deref() {
                query.push(("nextPageToken", token));
            }
            let request = self
                .request(Method::GET, "/rest/api/2/search/jql")
                .query(&query);
            let page: SearchPage = self.read_json(request, Access::Read, "search").await?;

            let page_len = page.issues.len();
            collected.extend(page.issues);
            match page.next_page_token {
                Some(token) if !page.is_last && page_len > 0 => page_token = Some(token),
                _ => break,
            }
        }
        collected.truncate(limit);
        Ok(collected)
    }

    async fn find_account_id(&self, email: &AccountEmail) -> TrackerResult<String> {
        let request = self
            .request(Method::GET, "/rest/api/2/user/search")
            .query(&[("query", email.as_str())]);
        let users: Vec<UserPayload> = self
            .read_json(request, Access::Read, "user search")
            .await?;
        users
            .into_iter()
            .next()
            .map(|user| user.account_id)
            .ok_or_else(|| TrackerError::NotFound(format!("account {email}")))
    }
}

fn rejection(status: StatusCode, access: Access, target: &str, reason: String) -> TrackerError {
    if status == StatusCode::NOT_FOUND {
        return TrackerError::NotFound(target.to_owned());
    }
    match access {
        Access::Write => TrackerError::Update {
            target: target.to_owned(),
            status: status.as_u16(),
            reason,
        },
        Access::Read => {
            TrackerError::UnexpectedResponse(format!("{target}: status {status}: {reason}"))
        }
    }
}

fn decode_issue(payload: IssuePayload) -> TrackerResult<Issue> {
    payload
        .into_issue()
        .map_err(|err| TrackerError::UnexpectedResponse(err.to_string()))
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn get_issue(&self, key: &IssueKey) -> TrackerResult<Issue> {
        let target = format!("issue {key}");
        let request = self.request(Method::GET, &format!("/rest/api/2/issue/{key}"));
        let payload: IssuePayload = self.read_json(request, Access::Read, &target).await?;
        decode_issue(payload)
    }

    async fn get_children(&self, key: &IssueKey) -> TrackerResult<Vec<IssueKey>> {
        let jql = format!("parent = {key}");
        let payloads = self.search(&jql, usize::MAX, "summary").await?;
        payloads
            .into_iter()
            .map(|payload| {
                IssueKey::new(payload.key)
                    .map_err(|err| TrackerError::UnexpectedResponse(err.to_string()))
            })
            .collect()
    }

    async fn update_fields(&self, key: &IssueKey, fields: &FieldMap) -> TrackerResult<()> {
        let target = format!("issue {key}");
        let request = self
            .request(Method::PUT, &format!("/rest/api/2/issue/{key}"))
            .json(&UpdateRequest { fields });
        self.send(request, Access::Write, &target).await?;
        Ok(())
    }

    async fn search_issues(&self, jql: &str, limit: usize) -> TrackerResult<Vec<Issue>> {
        self.search(jql, limit, NAVIGABLE_FIELDS)
            .await?
            .into_iter()
            .map(decode_issue)
            .collect()
    }

    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<IssueKey> {
        let target = format!("new issue in {}", draft.project_key());
        let request = self
            .request(Method::POST, "/rest/api/2/issue")
            .json(&CreateRequest::from_draft(draft));
        let created: CreatedIssue = self.read_json(request, Access::Write, &target).await?;
        IssueKey::new(created.key)
            .map_err(|err| TrackerError::UnexpectedResponse(err.to_string()))
    }

    async fn assign_issue(&self, key: &IssueKey, email: &AccountEmail) -> TrackerResult<()> {
        let account_id = self.find_account_id(email).await?;
        let target = format!("assignee of {key}");
        let request = self
            .request(Method::PUT, &format!("/rest/api/2/issue/{key}/assignee"))
            .json(&AssigneeRequest {
                account_id: &account_id,
            });
        self.send(request, Access::Write, &target).await?;
        Ok(())
    }

    async fn add_comment(&self, key: &IssueKey, body: &str) -> TrackerResult<()> {
        let target = format!("comments of {key}");
        let request = self
            .request(Method::POST, &format!("/rest/api/2/issue/{key}/comment"))
            .json(&CommentRequest { body });
        self.send(request, Access::Write, &target).await?;
        Ok(())
    }

    async fn transition_issue(
        &self,
        key: &IssueKey,
        transition: &TransitionId,
    ) -> TrackerResult<()> {
        let target = format!("transition {transition} of {key}");
        let request = self
            .request(Method::POST, &format!("/rest/api/2/issue/{key}/transitions"))
            .json(&TransitionRequest {
                transition: TransitionRef {
                    id: transition.as_str(),
                },
            });
        self.send(request, Access::Write, &target).await?;
        Ok(())
    }

    async fn list_sprints(
        &self,
        board: BoardId,
        states: &[SprintState],
    ) -> TrackerResult<Vec<Sprint>> {
        let target = format!("board {board}");
        let state_filter = states
            .iter()
            .map(|state| state.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let page_size = SPRINT_PAGE_SIZE.to_string();
        let mut sprints = Vec::new();
        loop {
            let start_at = sprints.len().to_string();
            let request = self
                .request(
                    Method::GET,
                    &format!("/rest/agile/1.0/board/{board}/sprint"),
                )
                .query(&[
                    ("state", state_filter.as_str()),
                    ("startAt", start_at.as_str()),
                    ("maxResults", page_size.as_str()),
                ]);
            let page: SprintPage = self.read_json(request, Access::Read, &target).await?;
            let page_len = page.values.len();
            for payload in page.values {
                sprints.push(
                    payload
                        .into_sprint()
                        .map_err(|err| TrackerError::UnexpectedResponse(err.to_string()))?,
                );
            }
            if page.is_last || page_len == 0 {
                break;
            }
        }
        Ok(sprints)
    }
}
