//! Course lookup by code.

use tracing::{instrument, trace};

use crate::domain::entities::Course;

/// Upper bound on search candidates; bounds rendering cost of the dropdown.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Courses whose code contains `query`, case-insensitively.
///
/// The query is trimmed first; an empty or whitespace-only query matches
/// nothing. Matches keep catalog order and are capped at
/// [`SEARCH_RESULT_LIMIT`].
#[instrument(level = "debug", skip(courses))]
pub fn match_courses<'a>(query: &str, courses: &'a [Course]) -> Vec<&'a Course> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let folded = query.to_lowercase();

    let matches: Vec<&Course> = courses
        .iter()
        .filter(|course| course.code.to_lowercase().contains(&folded))
        .take(SEARCH_RESULT_LIMIT)
        .collect();
    trace!(count = matches.len(), "search matches");
    matches
}
