//! Tests for reading and layering configuration sources.

use std::collections::HashMap;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::rstest;

use crate::config::layer::yaml_file;
use crate::config::{ConfigError, ConfigLayer};

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect()
}

/// Writes `contents` to a file unique to `name` in the temp directory.
fn temp_config(name: &str, contents: &str) -> Utf8PathBuf {
    let dir_path = Utf8PathBuf::from_path_buf(std::env::temp_dir()).expect("UTF-8 temp dir");
    let file_name = format!("jira-helpers-{}-{name}.yaml", std::process::id());
    let dir = Dir::open_ambient_dir(&dir_path, ambient_authority()).expect("open temp dir");
    dir.write(&file_name, contents).expect("write config");
    dir_path.join(file_name)
}

fn load_file(name: &str, contents: &str) -> Result<ConfigLayer, ConfigError> {
    let path = temp_config(name, contents);
    let file = yaml_file(&path, true)?;
    ConfigLayer::default().layered_over(file, &HashMap::<String, String>::new())
}

#[rstest]
fn yaml_file_reads_known_keys_and_aliases() {
    let yaml = "\
base_url: https://jira.example.com
project: MAAS
vanguard_epic_key: MAAS-100
people_queue:
  - alice@example.com
  - bob@example.com
unrelated_key: ignored
";
    let layer = load_file("aliases", yaml).expect("valid file");

    assert_eq!(layer.base_url.as_deref(), Some("https://jira.example.com"));
    assert_eq!(layer.project_key.as_deref(), Some("MAAS"));
    assert_eq!(layer.epic_key.as_deref(), Some("MAAS-100"));
    assert_eq!(
        layer.people_queue,
        Some(vec!["alice@example.com".to_owned(), "bob@example.com".to_owned()])
    );
}

#[rstest]
fn empty_file_is_an_empty_layer() {
    let layer = load_file("empty", "  \n").expect("valid file");
    assert_eq!(layer, ConfigLayer::default());
}

#[rstest]
fn malformed_yaml_fails_to_load() {
    let result = load_file("broken", "board_id: [\n");
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[rstest]
fn missing_optional_file_is_skipped() {
    let path = Utf8Path::new("definitely-not-here-update_children.yaml");
    assert!(matches!(yaml_file(path, false), Ok(None)));
    assert!(matches!(
        yaml_file(path, true),
        Err(ConfigError::Read { .. })
    ));
}

#[rstest]
fn environment_parses_lists_numbers_and_flags() {
    let vars = env(&[
        ("JIRA_API_TOKEN", "secret"),
        ("JIRA_BOARD_ID", "42"),
        ("JIRA_PEOPLE_QUEUE", "a@example.com,b@example.com"),
        ("JIRA_DRY_RUN", "yes"),
        ("JIRA_FAIL_FAST", "0"),
        ("OTHER_BOARD_ID", "99"),
    ]);

    let layer = ConfigLayer::default()
        .layered_over(None, &vars)
        .expect("valid environment");

    assert_eq!(layer.api_token.as_deref(), Some("secret"));
    assert_eq!(layer.board_id, Some(42));
    assert_eq!(
        layer.people_queue,
        Some(vec!["a@example.com".to_owned(), "b@example.com".to_owned()])
    );
    assert_eq!(layer.dry_run, Some(true));
    assert_eq!(layer.fail_fast, Some(false));
}

#[rstest]
#[case("JIRA_STALE_DAYS", "thirty")]
#[case("JIRA_VERBOSE", "maybe")]
fn environment_rejects_malformed_values(#[case] var: &str, #[case] value: &str) {
    let result = ConfigLayer::default().layered_over(None, &env(&[(var, value)]));
    assert!(matches!(result, Err(ConfigError::Load(_))));
}

#[rstest]
fn file_then_environment_then_command_line() {
    let path = temp_config(
        "precedence",
        "base_url: https://file.example.com\nusername: file-user\nissue: PROJ-1\n",
    );
    let file = yaml_file(&path, true).expect("readable");
    let vars = env(&[("JIRA_USERNAME", "env-user"), ("JIRA_ISSUE", "PROJ-2")]);
    let cli = ConfigLayer {
        issue: Some("PROJ-3".to_owned()),
        ..ConfigLayer::default()
    };

    let merged = cli.layered_over(file, &vars).expect("valid layers");

    assert_eq!(merged.base_url.as_deref(), Some("https://file.example.com"));
    assert_eq!(merged.username.as_deref(), Some("env-user"));
    assert_eq!(merged.issue.as_deref(), Some("PROJ-3"));
}

#[rstest]
fn unset_command_line_values_keep_lower_layers() {
    let vars = env(&[("JIRA_DRY_RUN", "true"), ("JIRA_OVERWRITE", "labels,priority")]);

    let merged = ConfigLayer::default()
        .layered_over(None, &vars)
        .expect("valid layers");

    assert_eq!(merged.dry_run, Some(true));
    assert_eq!(
        merged.overwrite,
        Some(vec!["labels".to_owned(), "priority".to_owned()])
    );
}
