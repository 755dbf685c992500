//! Running summary of the current selection.

use std::collections::BTreeMap;

use crate::domain::entities::{Catalog, CourseTag, SelectionMap};

/// Tally of selected courses per tag, with credit totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSummary {
    pub counts: BTreeMap<CourseTag, usize>,
    pub planned_credits: f64,
    pub completed_credits: f64,
    /// Selected codes that the catalog does not know about
    pub unknown_codes: Vec<String>,
}

impl SelectionSummary {
    pub fn from_selection(catalog: &Catalog, selection: &SelectionMap) -> Self {
        let mut summary = Self::default();
        for (code, tag) in selection.iter() {
            *summary.counts.entry(tag).or_default() += 1;
            let Some(course) = catalog.get(code) else {
                summary.unknown_codes.push(code.to_string());
                continue;
            };
            match tag {
                CourseTag::Planned => summary.planned_credits += course.credits,
                CourseTag::Completed => summary.completed_credits += course.credits,
                CourseTag::Eligible | CourseTag::Ineligible => {}
            }
        }
        summary
    }

    pub fn count(&self, tag: CourseTag) -> usize {
        self.counts.get(&tag).copied().unwrap_or(0)
    }

    pub fn total_credits(&self) -> f64 {
        self.planned_credits + self.completed_credits
    }
}
