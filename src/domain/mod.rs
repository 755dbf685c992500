//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod entities;
pub mod error;
pub mod resolver;
pub mod search;
pub mod selection;
pub mod summary;

pub use arena::{CourseViewItem, TabNode, TabShape, TabTree};
pub use builder::{Eligibility, PrerequisiteEligibility, TabTreeBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use resolver::resolve;
pub use search::{match_courses, SEARCH_RESULT_LIMIT};
pub use selection::{clear_course, on_course_click};
pub use summary::SelectionSummary;
