//! Tests for sprint names, ticket texts and week arithmetic.

use crate::rotation::domain::{
    IssueTemplates, RotationDomainError, RotationKind, SlotContext, SprintNameTemplate,
    sprint_number, week_in_sprint, week_start,
};
use chrono::{DateTime, NaiveDate, Utc};
use rstest::{fixture, rstest};

#[fixture]
fn context() -> SlotContext {
    SlotContext {
        sprint_name: "Pulse 10".to_owned(),
        week: 2,
        start_date: "2024-03-12".to_owned(),
        assignee: "alice@example.com".to_owned(),
    }
}

#[rstest]
fn sprint_template_renders_number() {
    let template = SprintNameTemplate::new("Pulse {{ sprint_number }}").expect("valid template");
    assert_eq!(template.render(42), Ok("Pulse 42".to_owned()));
}

#[rstest]
fn sprint_template_requires_number_placeholder() {
    assert_eq!(
        SprintNameTemplate::new("Pulse"),
        Err(RotationDomainError::MissingSprintNumber("Pulse".to_owned()))
    );
}

#[rstest]
fn sprint_template_rejects_unknown_variables() {
    let result = SprintNameTemplate::new("Pulse {{ sprint }}");
    assert!(matches!(
        result,
        Err(RotationDomainError::TemplateRender {
            template: "sprint name",
            ..
        })
    ));
}

#[rstest]
fn default_support_vanguard_texts(context: SlotContext) {
    let templates = IssueTemplates::for_kind(RotationKind::SupportVanguard);

    assert_eq!(
        templates.summary(&context),
        Ok("Support Vanguard for Pulse 10 week 2 (2024-03-12)".to_owned())
    );
    let description = templates.description(&context).expect("renders");
    assert!(description.starts_with("Provide support Vanguard for the week from 2024-03-12."));
}

#[rstest]
fn default_show_and_tell_summary(context: SlotContext) {
    let templates = IssueTemplates::for_kind(RotationKind::ShowAndTell);
    assert_eq!(
        templates.summary(&context),
        Ok("Show and Tell for Pulse 10 week 2 (2024-03-12)".to_owned())
    );
}

#[rstest]
fn custom_templates_can_use_the_assignee(context: SlotContext) {
    let templates = IssueTemplates::new("{{ assignee }} on duty", "Week {{ week }}");
    assert_eq!(
        templates.summary(&context),
        Ok("alice@example.com on duty".to_owned())
    );
    assert_eq!(templates.description(&context), Ok("Week 2".to_owned()));
}

#[rstest]
#[case(0, 1)]
#[case(1, 2)]
#[case(2, 1)]
#[case(7, 2)]
fn slots_alternate_between_sprint_weeks(#[case] index: u64, #[case] week: u8) {
    assert_eq!(week_in_sprint(index), week);
}

#[rstest]
#[case(0, "2024-03-04")]
#[case(1, "2024-03-11")]
fn week_start_follows_the_sprint_start(#[case] index: u64, #[case] expected: &str) {
    let sprint_start: DateTime<Utc> = "2024-03-03T00:00:00Z".parse().expect("valid timestamp");
    let expected_date: NaiveDate = expected.parse().expect("valid date");
    assert_eq!(week_start(sprint_start, index), Some(expected_date));
}

#[rstest]
#[case(10, 0, 10)]
#[case(10, 1, 10)]
#[case(10, 2, 11)]
#[case(u64::MAX, 1, u64::MAX)]
fn two_slots_share_each_sprint(#[case] first: u64, #[case] index: u64, #[case] expected: u64) {
    assert_eq!(sprint_number(first, index), Ok(expected));
}

#[rstest]
fn sprint_number_past_u64_max_is_rejected() {
    assert_eq!(
        sprint_number(u64::MAX, 2),
        Err(RotationDomainError::SprintNumberOverflow {
            first: u64::MAX,
            index: 2,
        })
    );
}
