//! Integration tests for Settings loading with an explicit config file.
//!
//! These tests only assert on fields the local file sets, so a global
//! config on the test machine cannot change their outcome.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use coursenav::application::ApplicationError;
use coursenav::config::Settings;

#[test]
fn given_local_config_when_load_then_overrides_paths_and_order() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("coursenav.toml");
    let config = r#"
catalog_path = "/srv/courses/catalog.toml"
selection_path = "/srv/courses/selection.toml"
category_order = ["Major/Required", "Liberal Arts"]
"#;
    fs::write(&config_path, config).unwrap();

    // Act
    let settings = Settings::load(Some(&config_path)).expect("load settings");

    // Assert
    assert_eq!(settings.catalog_path, PathBuf::from("/srv/courses/catalog.toml"));
    assert_eq!(settings.selection_path, PathBuf::from("/srv/courses/selection.toml"));
    assert_eq!(
        settings.category_order,
        vec!["Major/Required".to_string(), "Liberal Arts".to_string()]
    );
}

#[test]
fn given_tilde_in_local_config_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("coursenav.toml");
    fs::write(&config_path, "catalog_path = \"~/courses/catalog.toml\"\n").unwrap();

    let settings = Settings::load(Some(&config_path)).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert!(settings.catalog_path.starts_with(&home));
    assert!(settings.catalog_path.ends_with("courses/catalog.toml"));
}

#[test]
fn given_missing_local_config_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();

    let result = Settings::load(Some(&dir.path().join("absent.toml")));

    match result {
        Err(ApplicationError::Config { message }) => assert!(message.contains("absent.toml")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("coursenav.toml");
    fs::write(&config_path, "catalog_path = [unterminated").unwrap();

    let result = Settings::load(Some(&config_path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_template_when_parsed_then_valid_toml() {
    let template = Settings::template();

    let parsed: Result<toml::Table, _> = toml::from_str(&template);

    assert!(parsed.is_ok(), "template must be valid TOML");
    assert!(template.contains("category_order"));
}
