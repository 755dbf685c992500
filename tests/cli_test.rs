//! End-to-end tests for command dispatch against temporary catalog files

use std::fs;
use std::path::{Path, PathBuf};

use clap::error::ErrorKind;
use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;

use coursenav::cli::args::Cli;
use coursenav::cli::commands::execute_command;
use coursenav::exitcode;
use coursenav::util::testing::init_test_setup;

const CATALOG_TOML: &str = r#"
[[courses]]
code = "GB101"
name = "Programming Basics"
category = ["Major", "Required"]
credits = 2.0

[[courses]]
code = "LA100"
name = "Writing"
category = ["Liberal Arts"]
"#;

struct Workspace {
    _dir: TempDir,
    catalog: PathBuf,
    selection: PathBuf,
}

fn workspace() -> Workspace {
    init_test_setup();
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("catalog.toml");
    fs::write(&catalog, CATALOG_TOML).unwrap();
    let selection = dir.path().join("state").join("selection.toml");
    Workspace {
        _dir: dir,
        catalog,
        selection,
    }
}

fn cli(ws: &Workspace, args: &[&str]) -> Cli {
    let mut argv = vec![
        "coursenav".to_string(),
        "--catalog".to_string(),
        path_arg(&ws.catalog),
        "--selection".to_string(),
        path_arg(&ws.selection),
    ];
    argv.extend(args.iter().map(|a| a.to_string()));
    Cli::try_parse_from(argv).expect("arguments should parse")
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn given_eligible_course_when_select_then_selection_file_written() {
    // Arrange
    let ws = workspace();

    // Act
    execute_command(&cli(&ws, &["select", "GB101", "completed"])).unwrap();

    // Assert
    let written = fs::read_to_string(&ws.selection).unwrap();
    assert!(written.contains(r#"GB101 = "completed""#));
}

#[test]
fn given_selected_course_when_clear_then_entry_removed() {
    let ws = workspace();
    execute_command(&cli(&ws, &["select", "LA100", "planned"])).unwrap();

    execute_command(&cli(&ws, &["clear", "LA100"])).unwrap();

    let written = fs::read_to_string(&ws.selection).unwrap();
    assert!(!written.contains("LA100"));
}

#[rstest]
#[case("eligible")]
#[case("ineligible")]
#[case("maybe")]
fn given_computed_or_unknown_tag_when_parsing_select_then_rejected(#[case] tag: &str) {
    let result = Cli::try_parse_from(["coursenav", "select", "GB101", tag]);

    let err = result.expect_err("only planned and completed are assignable");
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn given_unknown_code_when_locate_then_noinput() {
    let ws = workspace();

    let err = execute_command(&cli(&ws, &["locate", "ZZ999"])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}

#[test]
fn given_missing_catalog_when_tree_then_ioerr() {
    let ws = workspace();
    fs::remove_file(&ws.catalog).unwrap();

    let err = execute_command(&cli(&ws, &["tree"])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::IOERR);
}

#[test]
fn given_catalog_when_read_only_commands_then_succeed() {
    let ws = workspace();

    execute_command(&cli(&ws, &["tree"])).unwrap();
    execute_command(&cli(&ws, &["search", "gb"])).unwrap();
    execute_command(&cli(&ws, &["locate", "LA100"])).unwrap();
    execute_command(&cli(&ws, &["summary"])).unwrap();

    assert!(!ws.selection.exists(), "read-only commands must not write");
}

#[test]
fn given_no_subcommand_when_executing_then_usage_error() {
    let ws = workspace();

    let err = execute_command(&cli(&ws, &[])).unwrap_err();

    assert_eq!(err.exit_code(), exitcode::USAGE);
}
