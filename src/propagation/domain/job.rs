//! Propagation job inputs.

use super::FieldSet;
use crate::tracker::domain::IssueKey;
use std::fmt;

/// What a run does when a single descendant cannot be processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// Record the failure, skip the failed issue's descendants and carry on
    /// with the remaining branches.
    #[default]
    SkipSubtree,
    /// Abort the run at the first failure.
    FailFast,
}

impl FailurePolicy {
    /// Returns the policy name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SkipSubtree => "skip-subtree",
            Self::FailFast => "fail-fast",
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single propagation run: root issue, fields and run options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationJob {
    root: IssueKey,
    fields: FieldSet,
    policy: FailurePolicy,
    dry_run: bool,
}

impl PropagationJob {
    /// Creates a job with the default failure policy that writes changes.
    #[must_use]
    pub fn new(root: IssueKey, fields: FieldSet) -> Self {
        Self {
            root,
            fields,
            policy: FailurePolicy::default(),
            dry_run: false,
        }
    }

    /// Sets the failure policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reports planned changes instead of writing them.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns the root issue key.
    #[must_use]
    pub const fn root(&self) -> &IssueKey {
        &self.root
    }

    /// Returns the fields to propagate.
    #[must_use]
    pub const fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Returns the failure policy.
    #[must_use]
    pub const fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Returns `true` when no writes should be made.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}
