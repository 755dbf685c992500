//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::CourseTag;

/// Course catalog navigator: category tabs, lookup by code, and selection tagging
#[derive(Parser, Debug)]
#[command(name = "coursenav")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more: -d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Explicit config file, applied over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Course catalog file (overrides config)
    #[arg(short, long, global = true, env = "COURSENAV_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    /// Selection store file (overrides config)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub selection: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the category tab tree with course tags
    Tree,

    /// Find courses whose code contains the query
    Search {
        /// Part of a course code (case-insensitive)
        query: String,
    },

    /// Show the tab path to a course, as a search jump would open it
    Locate {
        /// Course code
        code: String,
    },

    /// Tag a course as planned or completed
    Select {
        /// Course code
        code: String,
        /// New tag; eligible and ineligible are computed, use `clear` to return to them
        #[arg(value_enum)]
        tag: AssignableTag,
    },

    /// Remove a course's tag
    Clear {
        /// Course code
        code: String,
    },

    /// Summarize the current selection
    Summary,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Tags a user may store; the other two are derived from prerequisites.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignableTag {
    Planned,
    Completed,
}

impl From<AssignableTag> for CourseTag {
    fn from(tag: AssignableTag) -> Self {
        match tag {
            AssignableTag::Planned => CourseTag::Planned,
            AssignableTag::Completed => CourseTag::Completed,
        }
    }
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show the global config file location
    Path,
    /// Print a commented config template
    Template,
}
