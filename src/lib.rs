//! coursenav: hierarchical course-tab navigation and course lookup.
//!
//! The domain layer builds the category tab tree, resolves course codes to
//! tab paths, matches search queries, and applies gated selection updates.
//! The application layer adds the navigation state machine with its
//! transient highlight, and a single-threaded view session that feeds UI
//! events through both.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
