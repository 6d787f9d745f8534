//! Given steps for child propagation BDD scenarios.

use super::world::PropagationWorld;
use eyre::WrapErr;
use jira_helpers::tracker::domain::{FieldName, Issue, IssueKey};
use rstest_bdd_macros::given;
use serde_json::json;

fn labels() -> Result<FieldName, eyre::Report> {
    FieldName::new("labels").wrap_err("build labels field name")
}

#[given(r#"a root issue "{key}" with label "{label}""#)]
fn root_with_label(
    world: &mut PropagationWorld,
    key: String,
    label: String,
) -> Result<(), eyre::Report> {
    let root = IssueKey::new(key).wrap_err("parse root key")?;
    world
        .tracker
        .insert_issue(Issue::new(root).with_field(labels()?, json!([label])));
    Ok(())
}

#[given(r#"a root issue "{key}" without labels"#)]
fn root_without_labels(world: &mut PropagationWorld, key: String) -> Result<(), eyre::Report> {
    let root = IssueKey::new(key).wrap_err("parse root key")?;
    world.tracker.insert_issue(Issue::new(root));
    Ok(())
}

#[given(r#"issue "{child}" is a child of "{parent}""#)]
fn child_of(
    world: &mut PropagationWorld,
    child: String,
    parent: String,
) -> Result<(), eyre::Report> {
    let child_key = IssueKey::new(child).wrap_err("parse child key")?;
    let parent_key = IssueKey::new(parent).wrap_err("parse parent key")?;
    world.tracker.insert_issue(
        Issue::new(child_key.clone())
            .with_summary(format!("Child of {parent_key}"))
            .with_field(labels()?, json!(["old"])),
    );
    world.tracker.link_child(&parent_key, &child_key);
    Ok(())
}

#[given(r#"the tracker rejects updates to "{key}""#)]
fn tracker_rejects_updates(world: &mut PropagationWorld, key: String) -> Result<(), eyre::Report> {
    let rejected = IssueKey::new(key).wrap_err("parse rejected key")?;
    world
        .tracker
        .reject_updates_for(&rejected, "Field 'labels' cannot be set");
    Ok(())
}
