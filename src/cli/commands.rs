//! Command dispatch: each subcommand drives a course view session.

use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, CourseViewSession, ViewEvent};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::CourseTag;
use crate::infrastructure::di::ServiceContainer;
use crate::tree_traits::{TabTreeView, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, run with --help for usage".into(),
        ));
    };
    let container = || load_settings(cli).map(ServiceContainer::new);
    match command {
        Commands::Tree => cmd_tree(&container()?),
        Commands::Search { query } => cmd_search(&container()?, query),
        Commands::Locate { code } => cmd_locate(&container()?, code),
        Commands::Select { code, tag } => cmd_select(&container()?, code, (*tag).into()),
        Commands::Clear { code } => cmd_clear(&container()?, code),
        Commands::Summary => cmd_summary(&container()?),
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Layered settings with CLI path flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = &cli.catalog {
        settings.catalog_path = catalog.clone();
    }
    if let Some(selection) = &cli.selection {
        settings.selection_path = selection.clone();
    }
    debug!(
        "settings: catalog={} selection={}",
        settings.catalog_path.display(),
        settings.selection_path.display()
    );
    Ok(settings)
}

fn open_session(container: &ServiceContainer) -> CliResult<CourseViewSession> {
    let settings = &container.settings;
    let catalog = container
        .catalog
        .load(&settings.catalog_path, &settings.category_order)?;
    let selection = container.selection.load(&settings.selection_path)?;
    Ok(CourseViewSession::new(catalog, selection))
}

fn require_course(session: &CourseViewSession, code: &str) -> CliResult<()> {
    match session.catalog().get(code) {
        Some(_) => Ok(()),
        None => Err(ApplicationError::UnknownCourse(code.to_string()).into()),
    }
}

fn save_selection(container: &ServiceContainer, session: &CourseViewSession) -> CliResult<()> {
    container
        .selection
        .save(&container.settings.selection_path, session.selection())?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let session = open_session(container)?;
    let tree = session.tree();
    let active = session.active_path();
    let view = TabTreeView::new(&tree).with_active(&active);
    output::info(&view.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_search(container: &ServiceContainer, query: &str) -> CliResult<()> {
    let mut session = open_session(container)?;
    session.dispatch(ViewEvent::QueryChanged(query.to_string()));

    let results = session.search().visible_results();
    if results.is_empty() {
        output::warning(&format!("no course code contains '{}'", query.trim()));
        return Ok(());
    }
    for code in results {
        if let Some(course) = session.catalog().get(code) {
            output::info(&format!("{}  {}", course.code, course.name));
            output::detail(&course.category_label());
        }
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_locate(container: &ServiceContainer, code: &str) -> CliResult<()> {
    let mut session = open_session(container)?;
    require_course(&session, code)?;

    let outcome = session.dispatch(ViewEvent::ResultSelected(code.to_string()));
    if outcome.armed.is_none() {
        output::warning(&format!("{code} is not listed on any tab"));
        return Ok(());
    }

    let tree = session.tree();
    let active = session.active_path();
    output::action("Path", &active);
    let view = TabTreeView::new(&tree)
        .with_active(&active)
        .with_highlight(session.highlighted_course());
    output::info(&view.to_tree_string());
    Ok(())
}

#[instrument(skip(container))]
fn cmd_select(container: &ServiceContainer, code: &str, tag: CourseTag) -> CliResult<()> {
    let mut session = open_session(container)?;
    require_course(&session, code)?;

    let outcome = session.dispatch(ViewEvent::CourseClicked {
        code: code.to_string(),
        tag,
    });
    if !outcome.selection_changed {
        output::info(&format!("{code} is already {tag}"));
        return Ok(());
    }

    save_selection(container, &session)?;
    output::success(&format!("{code} tagged {}", output::tag(tag)));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_clear(container: &ServiceContainer, code: &str) -> CliResult<()> {
    let mut session = open_session(container)?;
    let outcome = session.dispatch(ViewEvent::CourseCleared(code.to_string()));
    if !outcome.selection_changed {
        output::info(&format!("{code} has no tag"));
        return Ok(());
    }
    save_selection(container, &session)?;
    output::success(&format!("{code} cleared"));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_summary(container: &ServiceContainer) -> CliResult<()> {
    let session = open_session(container)?;
    let summary = session.summary();

    output::header("Selection");
    for tag in [CourseTag::Completed, CourseTag::Planned] {
        output::detail(&format!("{:<10} {}", output::tag(tag), summary.count(tag)));
    }
    output::header("Credits");
    output::detail(&format!("completed  {:.1}", summary.completed_credits));
    output::detail(&format!("planned    {:.1}", summary.planned_credits));
    output::detail(&format!("total      {:.1}", summary.total_credits()));
    for code in &summary.unknown_codes {
        output::warning(&format!("selected course not in catalog: {code}"));
    }
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no config directory available on this platform"),
        },
        ConfigCommands::Template => output::info(&Settings::template()),
    }
    Ok(())
}
