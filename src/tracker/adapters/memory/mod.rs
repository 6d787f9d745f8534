//! In-memory issue tracker for tests and dry experiments.
//!
//! JQL is not evaluated: searches return whatever was registered for the
//! exact query string with [`InMemoryIssueTracker::set_search_result`].

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::tracker::{
    domain::{
        AccountEmail, BoardId, FieldMap, FieldName, Issue, IssueDraft, IssueKey, Sprint,
        SprintState, TransitionId,
    },
    ports::{IssueTracker, TrackerError, TrackerResult},
};

/// Thread-safe in-memory issue tracker.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIssueTracker {
    state: Arc<Mutex<InMemoryTrackerState>>,
}

#[derive(Debug, Default)]
struct InMemoryTrackerState {
    issues: BTreeMap<IssueKey, Issue>,
    children: HashMap<IssueKey, Vec<IssueKey>>,
    rejected_updates: HashMap<IssueKey, String>,
    failing_children: HashMap<IssueKey, String>,
    search_results: HashMap<String, Vec<IssueKey>>,
    sprints: HashMap<BoardId, Vec<Sprint>>,
    update_log: Vec<(IssueKey, FieldMap)>,
    created: Vec<(IssueKey, IssueDraft)>,
    assignments: Vec<(IssueKey, AccountEmail)>,
    comments: Vec<(IssueKey, String)>,
    transitions: Vec<(IssueKey, TransitionId)>,
    next_number: u64,
}

impl InMemoryIssueTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, InMemoryTrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores an issue, replacing any issue with the same key.
    pub fn insert_issue(&self, issue: Issue) {
        self.state().issues.insert(issue.key().clone(), issue);
    }

    /// Records `child` as a direct child of `parent`.
    pub fn link_child(&self, parent: &IssueKey, child: &IssueKey) {
        self.state()
            .children
            .entry(parent.clone())
            .or_default()
            .push(child.clone());
    }

    /// Makes every update of `key` fail with a validation error.
    pub fn reject_updates_for(&self, key: &IssueKey, reason: impl Into<String>) {
        self.state()
            .rejected_updates
            .insert(key.clone(), reason.into());
    }

    /// Makes listing the children of `key` fail with a transport error.
    pub fn fail_children_for(&self, key: &IssueKey, reason: impl Into<String>) {
        self.state()
            .failing_children
            .insert(key.clone(), reason.into());
    }

    /// Registers the issues returned for an exact JQL query.
    pub fn set_search_result(&self, jql: impl Into<String>, keys: Vec<IssueKey>) {
        self.state().search_results.insert(jql.into(), keys);
    }

    /// Replaces the sprints of a board.
    pub fn set_sprints(&self, board: BoardId, sprints: Vec<Sprint>) {
        self.state().sprints.insert(board, sprints);
    }

    /// Returns a stored issue.
    #[must_use]
    pub fn issue(&self, key: &IssueKey) -> Option<Issue> {
        self.state().issues.get(key).cloned()
    }

    /// Returns every successful field update in call order.
    #[must_use]
    pub fn update_log(&self) -> Vec<(IssueKey, FieldMap)> {
        self.state().update_log.clone()
    }

    /// Returns every created issue with its draft in call order.
    #[must_use]
    pub fn created(&self) -> Vec<(IssueKey, IssueDraft)> {
        self.state().created.clone()
    }

    /// Returns every assignment in call order.
    #[must_use]
    pub fn assignments(&self) -> Vec<(IssueKey, AccountEmail)> {
        self.state().assignments.clone()
    }

    /// Returns every comment in call order.
    #[must_use]
    pub fn comments(&self) -> Vec<(IssueKey, String)> {
        self.state().comments.clone()
    }

    /// Returns every applied transition in call order.
    #[must_use]
    pub fn transitions(&self) -> Vec<(IssueKey, TransitionId)> {
        self.state().transitions.clone()
    }
}

fn require_issue(state: &InMemoryTrackerState, key: &IssueKey) -> TrackerResult<()> {
    if state.issues.contains_key(key) {
        Ok(())
    } else {
        Err(TrackerError::issue_not_found(key))
    }
}

#[async_trait]
impl IssueTracker for InMemoryIssueTracker {
    async fn get_issue(&self, key: &IssueKey) -> TrackerResult<Issue> {
        self.state()
            .issues
            .get(key)
            .cloned()
            .ok_or_else(|| TrackerError::issue_not_found(key))
    }

    async fn get_children(&self, key: &IssueKey) -> TrackerResult<Vec<IssueKey>> {
        let state = self.state();
        if let Some(reason) = state.failing_children.get(key) {
            return Err(TrackerError::transport(std::io::Error::other(
                reason.clone(),
            )));
        }
        require_issue(&state, key)?;
        Ok(state.children.get(key).cloned().unwrap_or_default())
    }

    async fn update_fields(&self, key: &IssueKey, fields: &FieldMap) -> TrackerResult<()> {
        let mut state = self.state();
        if let Some(reason) = state.rejected_updates.get(key) {
            return Err(TrackerError::update_rejected(key, 400, reason.clone()));
        }
        let issue = state
            .issues
            .get_mut(key)
            .ok_or_else(|| TrackerError::issue_not_found(key))?;
        issue.apply_fields(fields);
        state.update_log.push((key.clone(), fields.clone()));
        Ok(())
    }

    async fn search_issues(&self, jql: &str, limit: usize) -> TrackerResult<Vec<Issue>> {
        let state = self.state();
        let keys = state.search_results.get(jql).cloned().unwrap_or_default();
        Ok(keys
            .iter()
            .filter_map(|key| state.issues.get(key).cloned())
            .take(limit)
            .collect())
    }

    async fn create_issue(&self, draft: &IssueDraft) -> TrackerResult<IssueKey> {
        let mut state = self.state();
        if let Some(parent) = draft.parent() {
            require_issue(&state, parent)?;
        }
        state.next_number += 1;
        let key = IssueKey::new(format!("{}-{}", draft.project_key(), state.next_number))
            .map_err(|err| TrackerError::UnexpectedResponse(err.to_string()))?;

        let mut issue = Issue::new(key.clone())
            .with_summary(draft.summary())
            .with_issue_type(draft.issue_type());
        if let Some(description) = draft.description() {
            issue = issue.with_field(FieldName::from_static("description"), description);
        }
        state.issues.insert(key.clone(), issue);
        if let Some(parent) = draft.parent() {
            state
                .children
                .entry(parent.clone())
                .or_default()
                .push(key.clone());
        }
        state.created.push((key.clone(), draft.clone()));
        Ok(key)
    }

    async fn assign_issue(&self, key: &IssueKey, email: &AccountEmail) -> TrackerResult<()> {
        let mut state = self.state();
        require_issue(&state, key)?;
        state.assignments.push((key.clone(), email.clone()));
        Ok(())
    }

    async fn add_comment(&self, key: &IssueKey, body: &str) -> TrackerResult<()> {
        let mut state = self.state();
        require_issue(&state, key)?;
        state.comments.push((key.clone(), body.to_owned()));
        Ok(())
    }

    async fn transition_issue(
        &self,
        key: &IssueKey,
        transition: &TransitionId,
    ) -> TrackerResult<()> {
        let mut state = self.state();
        require_issue(&state, key)?;
        state.transitions.push((key.clone(), transition.clone()));
        Ok(())
    }

    async fn list_sprints(
        &self,
        board: BoardId,
        states: &[SprintState],
    ) -> TrackerResult<Vec<Sprint>> {
        let state = self.state();
        let sprints = state
            .sprints
            .get(&board)
            .ok_or_else(|| TrackerError::NotFound(format!("board {board}")))?;
        Ok(sprints
            .iter()
            .filter(|sprint| states.contains(&sprint.state()))
            .cloned()
            .collect())
    }
}
