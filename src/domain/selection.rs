//! Gated, copy-on-write updates of the selection map.

use tracing::debug;

use crate::domain::entities::{Course, CourseTag, SelectionMap};

/// Apply a course click carrying `proposed` as the new tag.
///
/// Returns None when the click is rejected: an `Ineligible` tag can never be
/// assigned through a click. Otherwise returns a new map with only
/// `course.code` changed; `selection` itself is left as is.
pub fn on_course_click(
    selection: &SelectionMap,
    course: &Course,
    proposed: CourseTag,
) -> Option<SelectionMap> {
    if proposed == CourseTag::Ineligible {
        debug!(code = %course.code, "rejected click on ineligible course");
        return None;
    }
    debug!(code = %course.code, tag = %proposed, "selection updated");
    Some(selection.with_tag(&course.code, proposed))
}

/// New map without a stored tag for `code`, returning it to its computed default.
pub fn clear_course(selection: &SelectionMap, code: &str) -> SelectionMap {
    selection.without(code)
}
