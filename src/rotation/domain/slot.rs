//! Planned rotation tickets.

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::RotationDomainError;
use crate::tracker::domain::{AccountEmail, IssueDraft, SprintId};

/// Returns the week within its sprint, `1` or `2`, of slot `index`.
#[must_use]
pub const fn week_in_sprint(index: u64) -> u8 {
    if index.rem_euclid(2) == 1 { 2 } else { 1 }
}

/// Returns the number of the sprint holding slot `index` when the first
/// slot falls in sprint `first`. Two slots share each sprint.
///
/// # Errors
///
/// Returns [`RotationDomainError::SprintNumberOverflow`] when the number
/// does not fit in a `u64`.
pub const fn sprint_number(first: u64, index: u64) -> Result<u64, RotationDomainError> {
    match first.checked_add(index.div_euclid(2)) {
        Some(number) => Ok(number),
        None => Err(RotationDomainError::SprintNumberOverflow { first, index }),
    }
}

/// Returns the first day of the rotation week with slot index `index`.
///
/// Sprints start at midnight on the Sunday before the working week, so even
/// slots start one day after the sprint start and odd slots eight days
/// after it. Returns `None` on calendar overflow.
#[must_use]
pub fn week_start(sprint_start: DateTime<Utc>, index: u64) -> Option<NaiveDate> {
    let offset = if week_in_sprint(index) == 2 { 8 } else { 1 };
    sprint_start
        .date_naive()
        .checked_add_days(Days::new(offset))
}

/// One planned ticket: a person, a sprint week and the draft to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationSlot {
    index: u64,
    assignee: AccountEmail,
    sprint_id: SprintId,
    sprint_name: String,
    week: u8,
    start_date: NaiveDate,
    draft: IssueDraft,
}

impl RotationSlot {
    /// Creates a planned slot.
    #[must_use]
    pub const fn new(
        index: u64,
        assignee: AccountEmail,
        sprint_id: SprintId,
        sprint_name: String,
        start_date: NaiveDate,
        draft: IssueDraft,
    ) -> Self {
        Self {
            index,
            assignee,
            sprint_id,
            sprint_name,
            week: week_in_sprint(index),
            start_date,
            draft,
        }
    }

    /// Returns the slot index counted from the first week of the first
    /// sprint.
    #[must_use]
    pub const fn index(&self) -> u64 {
        self.index
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> &AccountEmail {
        &self.assignee
    }

    /// Returns the sprint identifier.
    #[must_use]
    pub const fn sprint_id(&self) -> SprintId {
        self.sprint_id
    }

    /// Returns the sprint name.
    #[must_use]
    pub fn sprint_name(&self) -> &str {
        &self.sprint_name
    }

    /// Returns the week within the sprint, `1` or `2`.
    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }

    /// Returns the first day of the week.
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the issue draft.
    #[must_use]
    pub const fn draft(&self) -> &IssueDraft {
        &self.draft
    }
}
