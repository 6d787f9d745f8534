//! Outcome of a rotation run.

use super::{RotationKind, RotationSlot};
use crate::tracker::domain::IssueKey;
use std::fmt;

/// Planned slots and, unless dry, the tickets created for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    kind: RotationKind,
    epic: IssueKey,
    dry_run: bool,
    slots: Vec<RotationSlot>,
    created: Vec<IssueKey>,
}

impl RotationReport {
    /// Creates a report for a planned rotation.
    #[must_use]
    pub const fn new(
        kind: RotationKind,
        epic: IssueKey,
        dry_run: bool,
        slots: Vec<RotationSlot>,
    ) -> Self {
        Self {
            kind,
            epic,
            dry_run,
            slots,
            created: Vec::new(),
        }
    }

    /// Records a created ticket.
    pub fn record_created(&mut self, key: IssueKey) {
        self.created.push(key);
    }

    /// Returns the rotation kind.
    #[must_use]
    pub const fn kind(&self) -> RotationKind {
        self.kind
    }

    /// Returns the planned slots in queue order.
    #[must_use]
    pub fn slots(&self) -> &[RotationSlot] {
        &self.slots
    }

    /// Returns the created tickets in creation order.
    #[must_use]
    pub fn created(&self) -> &[IssueKey] {
        &self.created
    }

    /// Returns `true` when nothing was created on purpose.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl fmt::Display for RotationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.dry_run { "Would create" } else { "Created" };
        writeln!(
            f,
            "{verb} {} {} tickets under {}",
            self.slots.len(),
            self.kind,
            self.epic
        )?;
        for (position, slot) in self.slots.iter().enumerate() {
            let key = self
                .created
                .get(position)
                .map_or_else(|| "-".to_owned(), ToString::to_string);
            writeln!(
                f,
                " {key} | {} | {} week {} ({}) | {}",
                slot.assignee(),
                slot.sprint_name(),
                slot.week(),
                slot.start_date().format("%Y-%m-%d"),
                slot.draft().summary()
            )?;
        }
        Ok(())
    }
}
