//! Service orchestration tests for child propagation.

use std::sync::Arc;

use crate::propagation::{
    domain::{FailurePolicy, FailureStage, FieldSet, PropagationDomainError, PropagationJob},
    services::{ChildPropagator, PropagationError},
};
use crate::tracker::{
    adapters::memory::InMemoryIssueTracker,
    domain::{FieldName, FieldValue, Issue, IssueKey},
};
use rstest::{fixture, rstest};
use serde_json::json;

type TestPropagator = ChildPropagator<InMemoryIssueTracker>;

fn key(raw: &str) -> IssueKey {
    IssueKey::new(raw).expect("valid key")
}

fn field(name: &str) -> FieldName {
    FieldName::new(name).expect("valid field name")
}

fn labels_job() -> PropagationJob {
    let fields = FieldSet::overwrite(vec![field("labels")]).expect("valid field set");
    PropagationJob::new(key("PROJ-100"), fields)
}

/// `PROJ-100` with children `PROJ-101` and `PROJ-102`; `PROJ-101` has
/// child `PROJ-103`.
#[fixture]
fn tracker() -> Arc<InMemoryIssueTracker> {
    let tracker = InMemoryIssueTracker::new();
    tracker.insert_issue(
        Issue::new(key("PROJ-100"))
            .with_summary("Platform epic")
            .with_field(field("labels"), json!(["x"])),
    );
    for (child, summary) in [
        ("PROJ-101", "API story"),
        ("PROJ-102", "UI story"),
        ("PROJ-103", "API sub-task"),
    ] {
        tracker.insert_issue(
            Issue::new(key(child))
                .with_summary(summary)
                .with_field(field("labels"), json!(["old"])),
        );
    }
    tracker.link_child(&key("PROJ-100"), &key("PROJ-101"));
    tracker.link_child(&key("PROJ-100"), &key("PROJ-102"));
    tracker.link_child(&key("PROJ-101"), &key("PROJ-103"));
    Arc::new(tracker)
}

fn labels_of(tracker: &InMemoryIssueTracker, raw: &str) -> Option<FieldValue> {
    tracker
        .issue(&key(raw))
        .and_then(|issue| issue.field(&field("labels")).cloned())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn propagates_root_values_to_every_descendant(tracker: Arc<InMemoryIssueTracker>) {
    let propagator: TestPropagator = ChildPropagator::new(Arc::clone(&tracker));

    let report = propagator
        .propagate(&labels_job())
        .await
        .expect("propagation should succeed");

    assert_eq!(report.updated_count(), 3);
    assert_eq!(
        report.updated(),
        &[key("PROJ-101"), key("PROJ-102"), key("PROJ-103")]
    );
    for child in ["PROJ-101", "PROJ-102", "PROJ-103"] {
        assert_eq!(
            labels_of(&tracker, child),
            Some(FieldValue::new(json!(["x"])))
        );
    }
    assert!(report.is_success());
    assert_eq!(report.to_string(), "Updated 3 issues below PROJ-100, 0 failures\n");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn root_without_children_updates_nothing() {
    let tracker = Arc::new(InMemoryIssueTracker::new());
    tracker.insert_issue(Issue::new(key("PROJ-100")).with_field(field("labels"), json!(["x"])));
    let propagator = ChildPropagator::new(Arc::clone(&tracker));

    let report = propagator
        .propagate(&labels_job())
        .await
        .expect("propagation should succeed");

    assert_eq!(report.updated_count(), 0);
    assert!(tracker.update_log().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn field_missing_on_root_fails_before_any_write(tracker: Arc<InMemoryIssueTracker>) {
    let fields = FieldSet::overwrite(vec![field("labels"), field("fixVersions")])
        .expect("valid field set");
    let job = PropagationJob::new(key("PROJ-100"), fields);

    let result = ChildPropagator::new(Arc::clone(&tracker)).propagate(&job).await;

    assert!(matches!(
        result,
        Err(PropagationError::Domain(PropagationDomainError::MissingField {
            field: ref name,
            ..
        })) if name.as_str() == "fixVersions"
    ));
    assert!(tracker.update_log().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_root_is_reported(tracker: Arc<InMemoryIssueTracker>) {
    let fields = FieldSet::overwrite(vec![field("labels")]).expect("valid field set");
    let job = PropagationJob::new(key("PROJ-999"), fields);

    let result = ChildPropagator::new(tracker).propagate(&job).await;

    assert!(matches!(
        result,
        Err(PropagationError::RootNotFound(ref missing)) if missing.as_str() == "PROJ-999"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_root_children_listing_is_fatal(tracker: Arc<InMemoryIssueTracker>) {
    tracker.fail_children_for(&key("PROJ-100"), "connection reset");

    let result = ChildPropagator::new(Arc::clone(&tracker))
        .propagate(&labels_job())
        .await;

    assert!(matches!(result, Err(PropagationError::RootChildren { .. })));
    assert!(tracker.update_log().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn shared_descendants_and_cycles_are_written_once(tracker: Arc<InMemoryIssueTracker>) {
    tracker.link_child(&key("PROJ-102"), &key("PROJ-103"));
    tracker.link_child(&key("PROJ-103"), &key("PROJ-100"));

    let report = ChildPropagator::new(Arc::clone(&tracker))
        .propagate(&labels_job())
        .await
        .expect("propagation should terminate");

    let written: Vec<IssueKey> = tracker.update_log().into_iter().map(|(k, _)| k).collect();
    assert_eq!(written, vec![key("PROJ-101"), key("PROJ-102"), key("PROJ-103")]);
    assert_eq!(report.revisits(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_run_leaves_state_unchanged(tracker: Arc<InMemoryIssueTracker>) {
    let propagator = ChildPropagator::new(Arc::clone(&tracker));
    propagator
        .propagate(&labels_job())
        .await
        .expect("first run should succeed");
    let after_first: Vec<Option<FieldValue>> = ["PROJ-101", "PROJ-102", "PROJ-103"]
        .iter()
        .map(|raw| labels_of(&tracker, raw))
        .collect();

    propagator
        .propagate(&labels_job())
        .await
        .expect("second run should succeed");
    let after_second: Vec<Option<FieldValue>> = ["PROJ-101", "PROJ-102", "PROJ-103"]
        .iter()
        .map(|raw| labels_of(&tracker, raw))
        .collect();

    assert_eq!(after_first, after_second);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_write_skips_only_that_subtree(tracker: Arc<InMemoryIssueTracker>) {
    tracker.reject_updates_for(&key("PROJ-101"), "Field 'labels' cannot be set");

    let report = ChildPropagator::new(Arc::clone(&tracker))
        .propagate(&labels_job())
        .await
        .expect("skip-subtree run should complete");

    assert_eq!(report.updated(), &[key("PROJ-102")]);
    assert_eq!(report.failures().len(), 1);
    let failure = report.failures().first().expect("one failure");
    assert_eq!(failure.key(), &key("PROJ-101"));
    assert_eq!(failure.stage(), FailureStage::Write);
    assert_eq!(failure.fields(), &[field("labels")]);
    assert!(failure.reason().contains("cannot be set"));
    assert_eq!(labels_of(&tracker, "PROJ-103"), Some(FieldValue::new(json!(["old"]))));
    assert!(!report.is_success());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn fail_fast_aborts_with_partial_report(tracker: Arc<InMemoryIssueTracker>) {
    tracker.reject_updates_for(&key("PROJ-102"), "Issue is closed");
    let job = labels_job().with_policy(FailurePolicy::FailFast);

    let result = ChildPropagator::new(Arc::clone(&tracker)).propagate(&job).await;

    assert!(matches!(result, Err(PropagationError::Aborted { .. })));
    let Err(PropagationError::Aborted { failure, report }) = result else {
        return;
    };
    assert_eq!(failure.key(), &key("PROJ-102"));
    assert_eq!(report.updated(), &[key("PROJ-101")]);
    assert_eq!(labels_of(&tracker, "PROJ-103"), Some(FieldValue::new(json!(["old"]))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dry_run_plans_changes_without_writing(tracker: Arc<InMemoryIssueTracker>) {
    let job = labels_job().with_dry_run(true);

    let report = ChildPropagator::new(Arc::clone(&tracker))
        .propagate(&job)
        .await
        .expect("dry run should succeed");

    assert!(tracker.update_log().is_empty());
    assert_eq!(report.updated_count(), 0);
    assert_eq!(report.planned().len(), 3);
    let first = report.planned().first().expect("planned change");
    assert_eq!(first.key(), &key("PROJ-101"));
    assert_eq!(first.summary(), Some("API story"));
    assert_eq!(
        first.as_is().get(&field("labels")),
        Some(&FieldValue::new(json!(["old"])))
    );
    assert_eq!(
        first.to_be().get(&field("labels")),
        Some(&FieldValue::new(json!(["x"])))
    );
    assert!(report.to_string().contains(" - labels as is : [\"old\"]"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_mode_keeps_child_items(tracker: Arc<InMemoryIssueTracker>) {
    let fields = FieldSet::new(Vec::new(), vec![field("labels")]).expect("valid field set");
    let job = PropagationJob::new(key("PROJ-100"), fields);

    ChildPropagator::new(Arc::clone(&tracker))
        .propagate(&job)
        .await
        .expect("propagation should succeed");

    assert_eq!(
        labels_of(&tracker, "PROJ-103"),
        Some(FieldValue::new(json!(["x", "old"])))
    );
}
