//! When steps for child propagation BDD scenarios.

use super::world::{PropagationWorld, run_async};
use eyre::WrapErr;
use jira_helpers::propagation::domain::{FieldSet, PropagationJob};
use jira_helpers::tracker::domain::{FieldName, IssueKey};
use rstest_bdd_macros::when;

fn labels_job(key: String) -> Result<PropagationJob, eyre::Report> {
    let root = IssueKey::new(key).wrap_err("parse root key")?;
    let labels = FieldName::new("labels").wrap_err("build labels field name")?;
    let fields = FieldSet::overwrite(vec![labels]).wrap_err("build field set")?;
    Ok(PropagationJob::new(root, fields))
}

#[when(r#"the labels of "{key}" are propagated"#)]
fn labels_propagated(world: &mut PropagationWorld, key: String) -> Result<(), eyre::Report> {
    let job = labels_job(key)?;
    world.last_result = Some(run_async(world.propagator.propagate(&job)));
    Ok(())
}

#[when(r#"the labels of "{key}" are previewed"#)]
fn labels_previewed(world: &mut PropagationWorld, key: String) -> Result<(), eyre::Report> {
    let job = labels_job(key)?.with_dry_run(true);
    world.last_result = Some(run_async(world.propagator.propagate(&job)));
    Ok(())
}
