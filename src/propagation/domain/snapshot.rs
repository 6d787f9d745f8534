//! Root field values captured at the start of a run.

use super::{FieldSet, MergeMode, PropagationDomainError};
use crate::tracker::domain::{FieldMap, FieldName, FieldValue, Issue, IssueKey};

/// Field values read from the root issue once per run.
///
/// Values are stored in their writable form and never re-read, so edits to
/// the root made while a run is in progress do not reach later writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    root: IssueKey,
    values: Vec<(FieldName, MergeMode, FieldValue)>,
}

impl FieldSnapshot {
    /// Captures the values of `fields` from `root`.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationDomainError::MissingField`] naming the first
    /// requested field the root does not carry.
    pub fn capture(root: &Issue, fields: &FieldSet) -> Result<Self, PropagationDomainError> {
        let mut values = Vec::with_capacity(fields.len());
        for (name, mode) in fields.iter() {
            let value = root
                .field(name)
                .ok_or_else(|| PropagationDomainError::MissingField {
                    issue: root.key().clone(),
                    field: name.clone(),
                })?;
            values.push((name.clone(), mode, value.writable()));
        }
        Ok(Self {
            root: root.key().clone(),
            values,
        })
    }

    /// Returns the key of the issue the values were read from.
    #[must_use]
    pub const fn root(&self) -> &IssueKey {
        &self.root
    }

    /// Returns the captured field names in order.
    #[must_use]
    pub fn names(&self) -> Vec<FieldName> {
        self.values.iter().map(|(name, _, _)| name.clone()).collect()
    }

    /// Returns the captured value of a field.
    #[must_use]
    pub fn value(&self, name: &FieldName) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(existing, _, _)| existing == name)
            .map(|(_, _, value)| value)
    }

    /// Returns `true` when computing a target needs the descendant's
    /// current values.
    #[must_use]
    pub fn needs_current(&self) -> bool {
        self.values
            .iter()
            .any(|(_, mode, _)| *mode == MergeMode::Append)
    }

    /// Computes the values to write onto a descendant.
    ///
    /// `current` is the descendant as read from the tracker; without it,
    /// appended fields fall back to the captured root value.
    #[must_use]
    pub fn target_for(&self, current: Option<&Issue>) -> FieldMap {
        self.values
            .iter()
            .map(|(name, mode, value)| {
                let existing = current.and_then(|issue| issue.field(name));
                let target = match (mode, existing) {
                    (MergeMode::Append, Some(existing_value)) => {
                        value.appended(&existing_value.writable())
                    }
                    _ => value.clone(),
                };
                (name.clone(), target)
            })
            .collect()
    }

    /// Returns the current values of the captured fields on `issue`.
    #[must_use]
    pub fn current_values(&self, issue: &Issue) -> FieldMap {
        self.values
            .iter()
            .filter_map(|(name, _, _)| {
                issue
                    .field(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }
}
