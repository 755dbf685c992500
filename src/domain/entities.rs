//! Domain entities: core data structures

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// Separator used when a category path is written as a single string,
/// e.g. `"Major/Required"`.
pub const CATEGORY_SEPARATOR: &str = "/";

/// A course record from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique, stable course code (e.g. "GB10234")
    pub code: String,
    /// Display name
    pub name: String,
    /// Category path from the top-level tab down to the tab listing this course
    pub category: Vec<String>,
    /// Codes of courses that must be planned or completed first
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub credits: f64,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>, category: Vec<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            prerequisites: Vec::new(),
            credits: 0.0,
        }
    }

    pub fn with_prerequisites(mut self, prerequisites: Vec<String>) -> Self {
        self.prerequisites = prerequisites;
        self
    }

    pub fn with_credits(mut self, credits: f64) -> Self {
        self.credits = credits;
        self
    }

    /// Category path joined with [`CATEGORY_SEPARATOR`].
    pub fn category_label(&self) -> String {
        self.category.join(CATEGORY_SEPARATOR)
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.name)
    }
}

/// Selection status attached to a course.
///
/// `Planned` and `Completed` are assigned by the user. `Eligible` and
/// `Ineligible` are the computed defaults for courses without a stored tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseTag {
    Planned,
    Completed,
    Eligible,
    Ineligible,
}

impl CourseTag {
    pub const ALL: [CourseTag; 4] = [
        CourseTag::Planned,
        CourseTag::Completed,
        CourseTag::Eligible,
        CourseTag::Ineligible,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseTag::Planned => "planned",
            CourseTag::Completed => "completed",
            CourseTag::Eligible => "eligible",
            CourseTag::Ineligible => "ineligible",
        }
    }

    /// Anything but `Ineligible` counts as selectable tab content.
    pub fn is_selectable(&self) -> bool {
        *self != CourseTag::Ineligible
    }

    /// Whether this tag satisfies a prerequisite of another course.
    pub fn satisfies_prerequisite(&self) -> bool {
        matches!(self, CourseTag::Planned | CourseTag::Completed)
    }
}

impl fmt::Display for CourseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CourseTag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = s.trim().to_lowercase();
        CourseTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == folded)
            .ok_or_else(|| DomainError::UnknownTag(s.to_string()))
    }
}

/// Mapping from course code to its assigned tag. Absent means unselected.
///
/// A value type: updates produce a new map and never touch the original,
/// so holders of an older snapshot keep seeing a consistent map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionMap(BTreeMap<String, CourseTag>);

impl SelectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, code: &str) -> Option<CourseTag> {
        self.0.get(code).copied()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, CourseTag)> {
        self.0.iter().map(|(code, tag)| (code.as_str(), *tag))
    }

    /// Copy of this map with `code` mapped to `tag`.
    pub fn with_tag(&self, code: &str, tag: CourseTag) -> Self {
        let mut next = self.0.clone();
        next.insert(code.to_string(), tag);
        Self(next)
    }

    /// Copy of this map without an entry for `code`.
    pub fn without(&self, code: &str) -> Self {
        let mut next = self.0.clone();
        next.remove(code);
        Self(next)
    }
}

impl FromIterator<(String, CourseTag)> for SelectionMap {
    fn from_iter<I: IntoIterator<Item = (String, CourseTag)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Ordered list of tab names from a root tab down to a leaf tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TabPath(Vec<String>);

impl TabPath {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for TabPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(" > "))
    }
}

impl<S: Into<String>> FromIterator<S> for TabPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Declared category skeleton: the fixed tab hierarchy and its sibling order.
///
/// Declared categories appear as tabs even when no course lives in them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLayout {
    paths: Vec<Vec<String>>,
}

impl CategoryLayout {
    pub fn new(paths: Vec<Vec<String>>) -> Self {
        let paths = paths.into_iter().filter(|p| !p.is_empty()).collect();
        Self { paths }
    }

    /// Parse entries of the form `"Major/Required"`.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Self {
        let paths = entries
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .split(CATEGORY_SEPARATOR)
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self::new(paths)
    }

    pub fn paths(&self) -> &[Vec<String>] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// The loaded course catalog, validated once and read-only afterwards.
///
/// Invariants checked by [`Catalog::new`]:
/// - course codes are unique
/// - every course has a non-empty category path
/// - no category both lists courses and contains sub-categories
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    courses: Vec<Course>,
    layout: CategoryLayout,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> DomainResult<Self> {
        Self::with_layout(courses, CategoryLayout::default())
    }

    pub fn with_layout(courses: Vec<Course>, layout: CategoryLayout) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(courses.len());
        for (position, course) in courses.iter().enumerate() {
            if course.category.is_empty() {
                return Err(DomainError::EmptyCategory(course.code.clone()));
            }
            if index.insert(course.code.clone(), position).is_some() {
                return Err(DomainError::DuplicateCode(course.code.clone()));
            }
        }

        // A course list must sit on a leaf: its path may not prefix any other path.
        let branches: HashSet<&[String]> = courses
            .iter()
            .map(|c| c.category.as_slice())
            .chain(layout.paths().iter().map(Vec::as_slice))
            .flat_map(|path| (1..path.len()).map(move |len| &path[..len]))
            .collect();
        if let Some(course) = courses
            .iter()
            .find(|c| branches.contains(c.category.as_slice()))
        {
            return Err(DomainError::MixedCategory(course.category_label()));
        }

        Ok(Self {
            courses,
            layout,
            index,
        })
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn layout(&self) -> &CategoryLayout {
        &self.layout
    }

    pub fn get(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&position| &self.courses[position])
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, category: &[&str]) -> Course {
        Course::new(code, code, category.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn given_duplicate_codes_when_creating_catalog_then_errors() {
        let result = Catalog::new(vec![course("A100", &["Math"]), course("A100", &["Science"])]);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateCode("A100".into()));
    }

    #[test]
    fn given_course_without_category_when_creating_catalog_then_errors() {
        let result = Catalog::new(vec![course("A100", &[])]);
        assert_eq!(result.unwrap_err(), DomainError::EmptyCategory("A100".into()));
    }

    #[test]
    fn given_course_on_branch_category_when_creating_catalog_then_errors() {
        let result = Catalog::new(vec![
            course("A100", &["Math"]),
            course("A200", &["Math", "Algebra"]),
        ]);
        assert_eq!(result.unwrap_err(), DomainError::MixedCategory("Math".into()));
    }

    #[test]
    fn given_layout_branch_over_course_list_when_creating_catalog_then_errors() {
        let layout = CategoryLayout::parse(&["Math/Algebra"]);
        let result = Catalog::with_layout(vec![course("A100", &["Math"])], layout);
        assert!(matches!(result, Err(DomainError::MixedCategory(_))));
    }

    #[test]
    fn given_tag_names_when_parsing_then_case_folds() {
        assert_eq!("Planned".parse::<CourseTag>().unwrap(), CourseTag::Planned);
        assert_eq!(" completed ".parse::<CourseTag>().unwrap(), CourseTag::Completed);
        assert!("done".parse::<CourseTag>().is_err());
    }

    #[test]
    fn given_layout_entries_when_parsing_then_drops_empty_segments() {
        let layout = CategoryLayout::parse(&["Major / Required", "", "/Elective/"]);
        assert_eq!(
            layout.paths(),
            &[
                vec!["Major".to_string(), "Required".to_string()],
                vec!["Elective".to_string()],
            ]
        );
    }

    #[test]
    fn given_selection_when_updating_then_original_is_untouched() {
        let original = SelectionMap::new().with_tag("A100", CourseTag::Planned);
        let updated = original.with_tag("B200", CourseTag::Completed);

        assert_eq!(original.len(), 1);
        assert_eq!(updated.get("B200"), Some(CourseTag::Completed));
        assert_eq!(updated.without("A100").get("A100"), None);
        assert_eq!(updated.get("A100"), Some(CourseTag::Planned));
    }
}
