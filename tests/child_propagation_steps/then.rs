//! Then steps for child propagation BDD scenarios.

use super::world::PropagationWorld;
use eyre::WrapErr;
use jira_helpers::propagation::{domain::PropagationDomainError, services::PropagationError};
use jira_helpers::tracker::domain::{FieldName, FieldValue, IssueKey};
use rstest_bdd_macros::then;
use serde_json::json;

#[then("{count:usize} issues are updated")]
fn issues_updated(world: &PropagationWorld, count: usize) -> Result<(), eyre::Report> {
    let updated = world.report()?.updated_count();
    if updated != count {
        return Err(eyre::eyre!("expected {count} updated issues, found {updated}"));
    }
    Ok(())
}

#[then(r#"issue "{key}" has label "{label}""#)]
fn issue_has_label(
    world: &PropagationWorld,
    key: String,
    label: String,
) -> Result<(), eyre::Report> {
    let issue_key = IssueKey::new(key).wrap_err("parse issue key")?;
    let labels = FieldName::new("labels").wrap_err("build labels field name")?;
    let issue = world
        .tracker
        .issue(&issue_key)
        .ok_or_else(|| eyre::eyre!("issue {issue_key} is not in the tracker"))?;
    let expected = FieldValue::new(json!([label]));
    match issue.field(&labels) {
        Some(value) if *value == expected => Ok(()),
        other => Err(eyre::eyre!("expected labels {expected} on {issue_key}, found {other:?}")),
    }
}

#[then(r#"the run fails naming the field "{field}""#)]
fn run_fails_naming_field(world: &PropagationWorld, field: String) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Err(PropagationError::Domain(PropagationDomainError::MissingField {
            field: missing,
            ..
        }))) if missing.as_str() == field => Ok(()),
        other => Err(eyre::eyre!("expected a missing field '{field}' error, found {other:?}")),
    }
}

#[then("no issue is updated")]
fn no_issue_updated(world: &PropagationWorld) -> Result<(), eyre::Report> {
    let writes = world.tracker.update_log();
    if !writes.is_empty() {
        return Err(eyre::eyre!("expected no writes, found {}", writes.len()));
    }
    Ok(())
}

#[then(r#"issue "{key}" is reported as failed"#)]
fn issue_reported_failed(world: &PropagationWorld, key: String) -> Result<(), eyre::Report> {
    let report = world.report()?;
    if report
        .failures()
        .iter()
        .any(|failure| failure.key().as_str() == key)
    {
        Ok(())
    } else {
        Err(eyre::eyre!("expected {key} among failures of {report}"))
    }
}

#[then("{count:usize} changes are planned")]
fn changes_planned(world: &PropagationWorld, count: usize) -> Result<(), eyre::Report> {
    let planned = world.report()?.planned().len();
    if planned != count {
        return Err(eyre::eyre!("expected {count} planned changes, found {planned}"));
    }
    Ok(())
}
