//! Integration tests for catalog and selection file services

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tempfile::TempDir;

use coursenav::application::services::{CatalogService, SelectionService};
use coursenav::application::ApplicationError;
use coursenav::domain::{CourseTag, DomainError, SelectionMap, TabTreeBuilder};
use coursenav::infrastructure::RealFileSystem;
use coursenav::util::testing::init_test_setup;

const CATALOG_TOML: &str = r#"
[layout]
categories = ["Liberal Arts", "Major/Required"]

[[courses]]
code = "GB101"
name = "Programming Basics"
category = ["Major", "Required"]
credits = 2.0

[[courses]]
code = "GB102"
name = "Data Structures"
category = ["Major", "Required"]
prerequisites = ["GB101"]
credits = 2.0

[[courses]]
code = "LA100"
name = "Writing"
category = ["Liberal Arts"]
"#;

fn catalog_service() -> CatalogService {
    init_test_setup();
    CatalogService::new(Arc::new(RealFileSystem))
}

fn selection_service() -> SelectionService {
    init_test_setup();
    SelectionService::new(Arc::new(RealFileSystem))
}

fn root_names(catalog: &coursenav::domain::Catalog) -> Vec<String> {
    TabTreeBuilder::new()
        .build(catalog, &SelectionMap::new())
        .shape()
        .into_iter()
        .map(|s| s.name)
        .collect()
}

// ============================================================
// CatalogService
// ============================================================

#[test]
fn given_catalog_file_when_loading_then_courses_and_layout_parsed() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG_TOML).unwrap();

    // Act
    let catalog = catalog_service().load(&path, &[]).unwrap();

    // Assert
    assert_eq!(catalog.len(), 3);
    let gb102 = catalog.get("GB102").unwrap();
    assert_eq!(gb102.name, "Data Structures");
    assert_eq!(gb102.prerequisites, vec!["GB101".to_string()]);
    assert_eq!(catalog.get("LA100").unwrap().credits, 0.0);
    assert_eq!(root_names(&catalog), ["Liberal Arts", "Major"]);
}

#[test]
fn given_category_order_when_loading_then_overrides_file_layout() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.toml");
    fs::write(&path, CATALOG_TOML).unwrap();

    let order = vec!["Major".to_string(), "Liberal Arts".to_string()];
    let catalog = catalog_service().load(&path, &order).unwrap();

    assert_eq!(root_names(&catalog), ["Major", "Liberal Arts"]);
}

#[test]
fn given_missing_catalog_when_loading_then_operation_failed() {
    let dir = TempDir::new().unwrap();

    let result = catalog_service().load(&dir.path().join("nope.toml"), &[]);

    assert!(matches!(result, Err(ApplicationError::OperationFailed { .. })));
}

#[test]
fn given_malformed_toml_when_parsing_then_invalid_file() {
    let result = CatalogService::parse("[[courses]\ncode =", Path::new("bad.toml"), &[]);

    match result {
        Err(ApplicationError::InvalidFile { path, .. }) => assert_eq!(path, Path::new("bad.toml")),
        other => panic!("expected InvalidFile, got {other:?}"),
    }
}

#[test]
fn given_duplicate_codes_when_parsing_then_domain_error() {
    let content = r#"
[[courses]]
code = "A100"
name = "One"
category = ["Math"]

[[courses]]
code = "A100"
name = "Two"
category = ["Science"]
"#;

    let err = CatalogService::parse(content, Path::new("dup.toml"), &[]).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::DuplicateCode(ref code)) if code == "A100"
    ));
}

// ============================================================
// SelectionService
// ============================================================

#[test]
fn given_no_selection_file_when_loading_then_empty() {
    let dir = TempDir::new().unwrap();

    let selection = selection_service()
        .load(&dir.path().join("selection.toml"))
        .unwrap();

    assert!(selection.is_empty());
}

#[test]
fn given_selection_when_saving_then_nested_dirs_created_and_reloadable() {
    // Arrange
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("nested").join("selection.toml");
    let selection = SelectionMap::new()
        .with_tag("GB101", CourseTag::Completed)
        .with_tag("GB102", CourseTag::Planned);
    let service = selection_service();

    // Act
    service.save(&path, &selection).unwrap();
    let loaded = service.load(&path).unwrap();

    // Assert
    assert_eq!(loaded, selection);
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[selection]"));
    assert!(written.contains(r#"GB101 = "completed""#));
}

#[test]
fn given_unknown_tag_in_file_when_loading_then_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("selection.toml");
    fs::write(&path, "[selection]\nGB101 = \"maybe\"\n").unwrap();

    let result = selection_service().load(&path);

    assert!(matches!(result, Err(ApplicationError::InvalidFile { .. })));
}
