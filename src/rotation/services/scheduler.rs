//! Plans rotation tickets over the board's sprints and creates them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::rotation::domain::{
    RotationDomainError, RotationReport, RotationRequest, RotationSlot, SlotContext,
    sprint_number, week_in_sprint, week_start,
};
use crate::tracker::{
    domain::{FieldMap, FieldValue, IssueDraft, IssueKey, Sprint, SprintState},
    ports::{IssueTracker, TrackerError},
};

/// Upper bound on existing tickets fetched for the duplicate check.
const EXISTING_TICKETS_LIMIT: usize = 50;

/// Service-level errors for rotation scheduling.
#[derive(Debug, Error)]
pub enum RotationError {
    /// Input validation or template rendering failed.
    #[error(transparent)]
    Domain(#[from] RotationDomainError),

    /// The epic to nest tickets under does not exist.
    #[error("epic {0} to create issues under not found")]
    EpicNotFound(IssueKey),

    /// The board has too few open sprints for the queue.
    #[error(
        "there are only {available} sprints for {people} people, at least {required} are needed"
    )]
    NotEnoughSprints {
        /// Active and future sprints on the board.
        available: usize,
        /// Sprints needed for the queue.
        required: usize,
        /// Length of the people queue.
        people: usize,
    },

    /// The first sprint is neither active nor planned.
    #[error("sprint {0} is not a current or future sprint")]
    SprintNotCurrent(String),

    /// The first sprint already holds both weeks' tickets.
    #[error("found {found} open rotation tickets in sprint {sprint}, expected at most one")]
    DuplicateRotation {
        /// Sprint name.
        sprint: String,
        /// Tickets found.
        found: usize,
    },

    /// A later sprint needed by the queue does not exist yet.
    #[error("sprint {0} not found, create the sprints first")]
    SprintMissing(String),

    /// A sprint needed by the queue has no start date.
    #[error("sprint {0} has no start date")]
    SprintWithoutStartDate(String),

    /// The tracker failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Result type for rotation scheduling.
pub type RotationResult<T> = Result<T, RotationError>;

/// Schedules rotation tickets.
#[derive(Clone)]
pub struct RotationScheduler<T>
where
    T: IssueTracker,
{
    tracker: Arc<T>,
}

impl<T> RotationScheduler<T>
where
    T: IssueTracker,
{
    /// Creates a scheduler over a tracker client.
    #[must_use]
    pub const fn new(tracker: Arc<T>) -> Self {
        Self { tracker }
    }

    /// Plans every slot of the queue and, unless dry, creates, assigns and
    /// schedules one ticket per slot.
    ///
    /// Nothing is written until the whole queue has been planned.
    ///
    /// # Errors
    ///
    /// Returns a [`RotationError`] describing the first check that failed;
    /// tracker failures while creating tickets abort the run.
    pub async fn schedule(&self, request: &RotationRequest) -> RotationResult<RotationReport> {
        let epic = match self.tracker.get_issue(request.epic()).await {
            Ok(issue) => issue,
            Err(err) if err.is_not_found() => {
                return Err(RotationError::EpicNotFound(request.epic().clone()));
            }
            Err(err) => return Err(err.into()),
        };

        let sprints = self
            .tracker
            .list_sprints(request.board(), &[SprintState::Active, SprintState::Future])
            .await?;
        let people = request.people().len();
        let required = people.div_ceil(2) + 1;
        if sprints.len() < required {
            return Err(RotationError::NotEnoughSprints {
                available: sprints.len(),
                required,
                people,
            });
        }

        let first_name = request
            .sprint_template()
            .render(request.first_sprint_number())?;
        let first_sprint = find_sprint(&sprints, &first_name)
            .ok_or_else(|| RotationError::SprintNotCurrent(first_name.clone()))?;

        let existing = self
            .tracker
            .search_issues(
                &request.existing_tickets_jql(first_sprint.id()),
                EXISTING_TICKETS_LIMIT,
            )
            .await?;
        let start_index = match existing.len() {
            0 => {
                info!(sprint = %first_name, "no rotation tickets yet, starting with week 1");
                0
            }
            1 => {
                info!(sprint = %first_name, "week 1 already taken, starting with week 2");
                1
            }
            found => {
                return Err(RotationError::DuplicateRotation {
                    sprint: first_name,
                    found,
                });
            }
        };

        let slots = plan_slots(request, epic.key(), &sprints, start_index)?;
        let mut report = RotationReport::new(
            request.kind(),
            epic.key().clone(),
            request.is_dry_run(),
            slots.clone(),
        );
        if request.is_dry_run() {
            for slot in &slots {
                info!(
                    assignee = %slot.assignee(),
                    sprint = %slot.sprint_id(),
                    summary = slot.draft().summary(),
                    "dry run, would create rotation ticket"
                );
            }
            return Ok(report);
        }

        for slot in &slots {
            let key = self.create_ticket(request, slot).await?;
            report.record_created(key);
        }
        Ok(report)
    }

    async fn create_ticket(
        &self,
        request: &RotationRequest,
        slot: &RotationSlot,
    ) -> RotationResult<IssueKey> {
        let key = self.tracker.create_issue(slot.draft()).await?;
        self.tracker.assign_issue(&key, slot.assignee()).await?;

        let mut sprint_fields = FieldMap::new();
        sprint_fields.insert(
            request.sprint_field().clone(),
            FieldValue::new(Value::from(slot.sprint_id().value())),
        );
        self.tracker.update_fields(&key, &sprint_fields).await?;
        info!(
            issue = %key,
            assignee = %slot.assignee(),
            sprint = %slot.sprint_id(),
            "created rotation ticket"
        );
        Ok(key)
    }
}

fn find_sprint<'a>(sprints: &'a [Sprint], name: &str) -> Option<&'a Sprint> {
    sprints.iter().find(|sprint| sprint.name() == name)
}

fn plan_slots(
    request: &RotationRequest,
    epic: &IssueKey,
    sprints: &[Sprint],
    start_index: u64,
) -> RotationResult<Vec<RotationSlot>> {
    let mut sprint_names: BTreeMap<u64, String> = BTreeMap::new();
    let mut slots = Vec::with_capacity(request.people().len());

    for (index, person) in (start_index..).zip(request.people()) {
        let number = sprint_number(request.first_sprint_number(), index)?;
        let sprint_name = match sprint_names.get(&number) {
            Some(name) => name.clone(),
            None => {
                let rendered = request.sprint_template().render(number)?;
                sprint_names.insert(number, rendered.clone());
                rendered
            }
        };
        debug!(assignee = %person, sprint = %sprint_name, index, "planning rotation slot");

        let sprint = find_sprint(sprints, &sprint_name)
            .ok_or_else(|| RotationError::SprintMissing(sprint_name.clone()))?;
        let start_date = sprint
            .start_date()
            .and_then(|start| week_start(start, index))
            .ok_or_else(|| RotationError::SprintWithoutStartDate(sprint_name.clone()))?;

        let context = SlotContext {
            sprint_name: sprint_name.clone(),
            week: week_in_sprint(index),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            assignee: person.to_string(),
        };
        let templates = request.templates();
        let draft = IssueDraft::new(
            request.project_key(),
            templates.summary(&context)?,
            request.issue_type(),
        )
        .with_description(templates.description(&context)?)
        .with_parent(epic.clone());

        slots.push(RotationSlot::new(
            index,
            person.clone(),
            sprint.id(),
            sprint_name,
            start_date,
            draft,
        ));
    }
    Ok(slots)
}
