//! Tests for resolving settings into command inputs.

use std::collections::HashMap;

use camino::Utf8Path;
use rstest::{fixture, rstest};

use crate::config::{ConfigError, ConfigLayer, Settings};
use crate::propagation::domain::{FailurePolicy, MergeMode};
use crate::rotation::domain::RotationKind;
use crate::tracker::domain::FieldName;

fn list(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|item| (*item).to_owned()).collect())
}

#[fixture]
fn rotation_layer() -> ConfigLayer {
    ConfigLayer {
        project_key: Some("MAAS".to_owned()),
        board_id: Some(7),
        epic_key: Some("MAAS-100".to_owned()),
        sprint_template: Some("Pulse ${sprint_number}".to_owned()),
        sprint_starting_number: Some(10),
        people_queue: list(&["alice@example.com"]),
        ..ConfigLayer::default()
    }
}

#[rstest]
fn environment_overrides_file_and_cli_overrides_environment() {
    let env: HashMap<String, String> = [
        ("JIRA_USERNAME".to_owned(), "env-user".to_owned()),
        ("JIRA_API_TOKEN".to_owned(), "env-token".to_owned()),
        ("JIRA_BASE_URL".to_owned(), "https://env.example.com".to_owned()),
    ]
    .into_iter()
    .collect();
    let cli = ConfigLayer {
        base_url: Some("https://cli.example.com/".to_owned()),
        ..ConfigLayer::default()
    };

    let settings = Settings::load(
        None,
        Utf8Path::new("no-such-default-config.yaml"),
        &env,
        cli,
    )
    .expect("settings load");
    let connection = settings.connection().expect("complete connection");

    assert_eq!(connection.base_url(), "https://cli.example.com");
    assert_eq!(connection.username(), "env-user");
}

#[rstest]
fn missing_token_names_its_variable() {
    let settings = Settings::from_layer(ConfigLayer {
        base_url: Some("https://jira.example.com".to_owned()),
        username: Some("me".to_owned()),
        ..ConfigLayer::default()
    });

    let err = settings.connection().expect_err("token is missing");

    assert!(matches!(
        err,
        ConfigError::Missing { key: "api_token", ref env } if env == "JIRA_API_TOKEN"
    ));
}

#[rstest]
fn propagation_job_combines_field_modes() {
    let settings = Settings::from_layer(ConfigLayer {
        issue: Some("PROJ-100".to_owned()),
        overwrite: list(&["labels"]),
        append: list(&["components", "labels"]),
        fail_fast: Some(true),
        dry_run: Some(true),
        ..ConfigLayer::default()
    });

    let job = settings.propagation_job().expect("valid job");
    let labels = FieldName::new("labels").expect("valid field");
    let components = FieldName::new("components").expect("valid field");

    assert_eq!(job.root().as_str(), "PROJ-100");
    assert_eq!(job.fields().mode_of(&labels), Some(MergeMode::Overwrite));
    assert_eq!(job.fields().mode_of(&components), Some(MergeMode::Append));
    assert_eq!(job.policy(), FailurePolicy::FailFast);
    assert!(job.is_dry_run());
}

#[rstest]
fn propagation_job_defaults_to_skipping_subtrees() {
    let settings = Settings::from_layer(ConfigLayer {
        issue: Some("PROJ-100".to_owned()),
        overwrite: list(&["labels"]),
        ..ConfigLayer::default()
    });

    let job = settings.propagation_job().expect("valid job");

    assert_eq!(job.policy(), FailurePolicy::SkipSubtree);
    assert!(!job.is_dry_run());
}

#[rstest]
fn propagation_job_requires_fields() {
    let settings = Settings::from_layer(ConfigLayer {
        issue: Some("PROJ-100".to_owned()),
        ..ConfigLayer::default()
    });

    assert!(matches!(
        settings.propagation_job(),
        Err(ConfigError::Invalid { key: "overwrite", .. })
    ));
}

#[rstest]
fn rotation_request_accepts_legacy_sprint_placeholder(rotation_layer: ConfigLayer) {
    let settings = Settings::from_layer(rotation_layer);

    let request = settings
        .rotation_request(RotationKind::ShowAndTell)
        .expect("valid request");

    assert_eq!(request.sprint_template().render(12), Ok("Pulse 12".to_owned()));
    assert_eq!(request.kind(), RotationKind::ShowAndTell);
    assert_eq!(request.board().value(), 7);
}

#[rstest]
fn rotation_request_reports_bad_emails(mut rotation_layer: ConfigLayer) {
    rotation_layer.people_queue = list(&["alice@example.com", "bob"]);
    let settings = Settings::from_layer(rotation_layer);

    assert!(matches!(
        settings.rotation_request(RotationKind::SupportVanguard),
        Err(ConfigError::Invalid { key: "people_queue", .. })
    ));
}

#[rstest]
fn stale_sweep_requires_a_transition() {
    let settings = Settings::from_layer(ConfigLayer {
        project_key: Some("MAAS".to_owned()),
        stale_days: Some(30),
        ..ConfigLayer::default()
    });

    assert!(matches!(
        settings.stale_sweep(),
        Err(ConfigError::Missing { key: "transition_to", .. })
    ));
}

#[rstest]
fn stale_sweep_maps_zero_days_to_its_key() {
    let settings = Settings::from_layer(ConfigLayer {
        project_key: Some("MAAS".to_owned()),
        stale_days: Some(0),
        transition_to: Some("71".to_owned()),
        ..ConfigLayer::default()
    });

    assert!(matches!(
        settings.stale_sweep(),
        Err(ConfigError::Invalid { key: "stale_days", .. })
    ));
}
