//! Ordered set of fields to propagate.

use super::PropagationDomainError;
use crate::tracker::domain::FieldName;
use std::fmt;

/// How a propagated value combines with the value already on a descendant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeMode {
    /// The descendant receives exactly the root value.
    Overwrite,
    /// Array values are merged: root items first, then the descendant's own
    /// items that are not already present. Other values are overwritten.
    Append,
}

impl MergeMode {
    /// Returns the mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty, duplicate-free, ordered set of fields with their merge modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    entries: Vec<(FieldName, MergeMode)>,
}

impl FieldSet {
    /// Builds a field set from fields to overwrite and fields to append.
    ///
    /// Overwritten fields come first in the given order, followed by the
    /// appended ones. A field named in both lists is overwritten; repeated
    /// names are kept once.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationDomainError::EmptyFieldSet`] when both lists are
    /// empty.
    pub fn new(
        overwrite: impl IntoIterator<Item = FieldName>,
        append: impl IntoIterator<Item = FieldName>,
    ) -> Result<Self, PropagationDomainError> {
        let mut entries: Vec<(FieldName, MergeMode)> = Vec::new();
        let tagged = overwrite
            .into_iter()
            .map(|name| (name, MergeMode::Overwrite))
            .chain(append.into_iter().map(|name| (name, MergeMode::Append)));
        for (name, mode) in tagged {
            if entries.iter().all(|(existing, _)| *existing != name) {
                entries.push((name, mode));
            }
        }
        if entries.is_empty() {
            return Err(PropagationDomainError::EmptyFieldSet);
        }
        Ok(Self { entries })
    }

    /// Builds a field set that overwrites every named field.
    ///
    /// # Errors
    ///
    /// Returns [`PropagationDomainError::EmptyFieldSet`] when no field is
    /// given.
    pub fn overwrite(
        fields: impl IntoIterator<Item = FieldName>,
    ) -> Result<Self, PropagationDomainError> {
        Self::new(fields, Vec::new())
    }

    /// Iterates over fields and their merge modes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, MergeMode)> {
        self.entries.iter().map(|(name, mode)| (name, *mode))
    }

    /// Returns the field names in order.
    #[must_use]
    pub fn names(&self) -> Vec<FieldName> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Returns the merge mode of a field, if it is part of the set.
    #[must_use]
    pub fn mode_of(&self, name: &FieldName) -> Option<MergeMode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, mode)| *mode)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the set holds no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .iter()
            .map(|(name, mode)| format!("{name} ({mode})"))
            .collect();
        f.write_str(&rendered.join(", "))
    }
}
