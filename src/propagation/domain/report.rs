//! Outcome of a propagation run.

use crate::tracker::domain::{FieldMap, FieldName, IssueKey};
use std::fmt;

/// Step at which processing a descendant failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureStage {
    /// Reading the descendant's current values.
    Read,
    /// Writing the propagated values.
    Write,
    /// Listing the descendant's own children.
    Children,
}

impl FailureStage {
    /// Returns the stage name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Children => "children",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A descendant that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFailure {
    key: IssueKey,
    fields: Vec<FieldName>,
    stage: FailureStage,
    reason: String,
}

impl NodeFailure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(
        key: IssueKey,
        fields: Vec<FieldName>,
        stage: FailureStage,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            key,
            fields,
            stage,
            reason: reason.into(),
        }
    }

    /// Returns the failed issue key.
    #[must_use]
    pub const fn key(&self) -> &IssueKey {
        &self.key
    }

    /// Returns the fields that were being propagated.
    #[must_use]
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// Returns the step that failed.
    #[must_use]
    pub const fn stage(&self) -> FailureStage {
        self.stage
    }

    /// Returns the reason reported by the tracker.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for NodeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields.iter().map(FieldName::as_str).collect();
        write!(
            f,
            "{} [{}] ({}): {}",
            self.key,
            self.stage,
            fields.join(", "),
            self.reason
        )
    }
}

/// Change a dry run would have written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChange {
    key: IssueKey,
    summary: Option<String>,
    as_is: FieldMap,
    to_be: FieldMap,
}

impl PlannedChange {
    /// Creates a planned change.
    #[must_use]
    pub const fn new(
        key: IssueKey,
        summary: Option<String>,
        as_is: FieldMap,
        to_be: FieldMap,
    ) -> Self {
        Self {
            key,
            summary,
            as_is,
            to_be,
        }
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

    /// Returns the values currently on the issue.
    #[must_use]
    pub const fn as_is(&self) -> &FieldMap {
        &self.as_is
    }

    /// Returns the values that would be written.
    #[must_use]
    pub const fn to_be(&self) -> &FieldMap {
        &self.to_be
    }
}

impl fmt::Display for PlannedChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.key, self.summary.as_deref().unwrap_or(""))?;
        for (name, value) in &self.to_be {
            let current = self
                .as_is
                .get(name)
                .map_or_else(|| "<unset>".to_owned(), ToString::to_string);
            writeln!(f, " - {name} as is : {current}")?;
            writeln!(f, " - {name} to be : {value}")?;
        }
        Ok(())
    }
}

/// Summary of a propagation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    root: IssueKey,
    dry_run: bool,
    updated: Vec<IssueKey>,
    planned: Vec<PlannedChange>,
    failures: Vec<NodeFailure>,
    revisits: usize,
}

impl PropagationReport {
    /// Creates an empty report for a run rooted at `root`.
    #[must_use]
    pub const fn new(root: IssueKey, dry_run: bool) -> Self {
        Self {
            root,
            dry_run,
            updated: Vec::new(),
            planned: Vec::new(),
            failures: Vec::new(),
            revisits: 0,
        }
    }

    /// Records a successful write.
    pub fn record_update(&mut self, key: IssueKey) {
        self.updated.push(key);
    }

    /// Records a change a dry run would have made.
    pub fn record_planned(&mut self, change: PlannedChange) {
        self.planned.push(change);
    }

    /// Records a descendant that could not be processed.
    pub fn record_failure(&mut self, failure: NodeFailure) {
        self.failures.push(failure);
    }

    /// Records an issue reached again through another parent.
    pub const fn record_revisit(&mut self) {
        self.revisits += 1;
    }

    /// Returns the root issue key.
    #[must_use]
    pub const fn root(&self) -> &IssueKey {
        &self.root
    }

    /// Returns `true` when the run made no writes.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Returns the updated issues in write order; the root is never listed.
    #[must_use]
    pub fn updated(&self) -> &[IssueKey] {
        &self.updated
    }

    /// Returns the number of updated issues.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.updated.len()
    }

    /// Returns the changes a dry run would have written.
    #[must_use]
    pub fn planned(&self) -> &[PlannedChange] {
        &self.planned
    }

    /// Returns the failed descendants.
    #[must_use]
    pub fn failures(&self) -> &[NodeFailure] {
        &self.failures
    }

    /// Returns how many times an already visited issue was reached again.
    #[must_use]
    pub const fn revisits(&self) -> usize {
        self.revisits
    }

    /// Returns `true` when no descendant failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for PropagationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            for change in &self.planned {
                writeln!(f, "{change}")?;
            }
            writeln!(
                f,
                "Dry run below {}: {} issues would be updated, {} failures",
                self.root,
                self.planned.len(),
                self.failures.len()
            )?;
        } else {
            writeln!(
                f,
                "Updated {} issues below {}, {} failures",
                self.updated.len(),
                self.root,
                self.failures.len()
            )?;
        }
        for failure in &self.failures {
            writeln!(f, " ! {failure}")?;
        }
        Ok(())
    }
}
