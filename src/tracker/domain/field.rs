//! Field names and values as exchanged with the tracker.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Mapping from field name to value, ordered by name for stable output.
pub type FieldMap = BTreeMap<FieldName, FieldValue>;

/// Name of an issue field, for example `labels` or `customfield_10020`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Creates a validated field name.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyFieldName`] when the name is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TrackerDomainError::EmptyFieldName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Wraps a field name known at compile time; the literal must not be
    /// blank.
    pub(crate) fn from_static(name: &'static str) -> Self {
        Self(name.to_owned())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for FieldName {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value of an issue field.
///
/// Values are kept as JSON because the tracker mixes scalars, text, objects
/// (priority, components) and arrays of those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValue(Value);

impl FieldValue {
    /// Wraps a JSON value.
    #[must_use]
    pub const fn new(value: Value) -> Self {
        Self(value)
    }

    /// Returns the wrapped JSON value.
    #[must_use]
    pub const fn as_json(&self) -> &Value {
        &self.0
    }

    /// Consumes the field value and returns the JSON value.
    #[must_use]
    pub fn into_json(self) -> Value {
        self.0
    }

    /// Returns the value in the shape the tracker accepts on writes.
    ///
    /// Objects returned by the tracker (components, versions, priorities)
    /// carry `self` links and display data that update requests reject, so
    /// any object with an `id` is reduced to `{"id": ...}`. Arrays are
    /// reduced element-wise; everything else is kept as is.
    #[must_use]
    pub fn writable(&self) -> Self {
        Self(writable_json(&self.0))
    }

    /// Returns this value with the items of `existing` appended.
    ///
    /// When both values are arrays the result holds every item of `self`
    /// followed by the items of `existing` that are not already present.
    /// Any other combination yields `self` unchanged.
    #[must_use]
    pub fn appended(&self, existing: &Self) -> Self {
        match (&self.0, &existing.0) {
            (Value::Array(ours), Value::Array(theirs)) => {
                let mut merged = ours.clone();
                for item in theirs {
                    if !merged.contains(item) {
                        merged.push(item.clone());
                    }
                }
                Self(Value::Array(merged))
            }
            _ => self.clone(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_owned()))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn writable_json(value: &Value) -> Value {
    match value {
        Value::Object(object) => object.get("id").map_or_else(
            || Value::Object(object.clone()),
            |id| {
                let mut reference = Map::new();
                reference.insert("id".to_owned(), id.clone());
                Value::Object(reference)
            },
        ),
        Value::Array(items) => Value::Array(items.iter().map(writable_json).collect()),
        other => other.clone(),
    }
}
