//! Search input state: query, dropdown visibility, and candidate list.

use crate::domain::{match_courses, Catalog};

/// State behind the course search dropdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchBox {
    query: String,
    is_open: bool,
    /// Codes of the current candidates, in catalog order
    results: Vec<String>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// Candidates to show: empty while the dropdown is closed.
    pub fn visible_results(&self) -> &[String] {
        if self.is_open {
            &self.results
        } else {
            &[]
        }
    }

    /// Store the new query and recompute candidates; opens on non-blank input.
    pub fn set_query(&mut self, query: impl Into<String>, catalog: &Catalog) {
        self.query = query.into();
        self.results = match_courses(&self.query, catalog.courses())
            .into_iter()
            .map(|course| course.code.clone())
            .collect();
        self.is_open = !self.query.trim().is_empty();
    }

    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() {
            self.is_open = true;
        }
    }

    pub fn blur(&mut self) {
        self.is_open = false;
    }

    /// Pick a candidate: resets the box and hands back the chosen code.
    pub fn select(&mut self, code: &str) -> String {
        self.query.clear();
        self.results.clear();
        self.is_open = false;
        code.to_string()
    }
}
