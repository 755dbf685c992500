//! Application layer: navigation state, view session, and services
//!
//! This layer drives the domain core and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod navigation;
pub mod search_box;
pub mod services;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::PathContextExt;
pub use navigation::{HighlightTimer, Navigator, HIGHLIGHT_DURATION};
pub use search_box::SearchBox;
pub use session::{CourseViewSession, DispatchOutcome, ViewEvent};
