//! Tab tree builder: buckets catalog courses into the nested category tabs.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{CourseViewItem, TabTree};
use crate::domain::entities::{Catalog, Course, CourseTag, SelectionMap};

/// Decides whether an unselected course can currently be taken.
pub trait Eligibility {
    fn is_eligible(&self, course: &Course, selection: &SelectionMap) -> bool;
}

impl<F> Eligibility for F
where
    F: Fn(&Course, &SelectionMap) -> bool,
{
    fn is_eligible(&self, course: &Course, selection: &SelectionMap) -> bool {
        self(course, selection)
    }
}

/// Eligible once every prerequisite is planned or completed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrerequisiteEligibility;

impl Eligibility for PrerequisiteEligibility {
    fn is_eligible(&self, course: &Course, selection: &SelectionMap) -> bool {
        course.prerequisites.iter().all(|code| {
            selection
                .get(code)
                .is_some_and(|tag| tag.satisfies_prerequisite())
        })
    }
}

/// Constructs the tab tree from a catalog and a selection snapshot.
///
/// The output is a pure function of its inputs: same catalog and selection,
/// same tree shape, same sibling and item order.
pub struct TabTreeBuilder {
    eligibility: Box<dyn Eligibility>,
}

impl Default for TabTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TabTreeBuilder {
    pub fn new() -> Self {
        Self::with_eligibility(PrerequisiteEligibility)
    }

    pub fn with_eligibility(eligibility: impl Eligibility + 'static) -> Self {
        Self {
            eligibility: Box::new(eligibility),
        }
    }

    /// Build the full tab tree.
    ///
    /// Declared layout categories come first in declaration order, then
    /// undeclared categories in order of first appearance in the catalog.
    #[instrument(
        level = "debug",
        skip_all,
        fields(courses = catalog.len(), selected = selection.len())
    )]
    pub fn build(&self, catalog: &Catalog, selection: &SelectionMap) -> TabTree {
        let mut tree = TabTree::new();

        for path in catalog.layout().paths() {
            Self::ensure_path(&mut tree, path);
        }

        for course in catalog.courses() {
            let tag = self.tag_for(course, selection);
            let Some(leaf) = Self::ensure_path(&mut tree, &course.category) else {
                continue;
            };
            if let Some(node) = tree.get_node_mut(leaf) {
                trace!(code = %course.code, %tag, tab = %node.name, "bucketing course");
                node.items.push(CourseViewItem {
                    course: course.clone(),
                    tag,
                });
            }
        }

        Self::mark_disabled(&mut tree);
        debug!(
            roots = tree.roots().len(),
            items = tree.item_count(),
            "built tab tree"
        );
        tree
    }

    /// Stored tag when the course is selected, otherwise the computed default.
    pub fn tag_for(&self, course: &Course, selection: &SelectionMap) -> CourseTag {
        match selection.get(&course.code) {
            Some(tag) => tag,
            None if self.eligibility.is_eligible(course, selection) => CourseTag::Eligible,
            None => CourseTag::Ineligible,
        }
    }

    fn ensure_path(tree: &mut TabTree, path: &[String]) -> Option<Index> {
        let mut parent = None;
        for name in path {
            let idx = match tree.child_named(parent, name) {
                Some(existing) => existing,
                None => tree.insert_node(name.clone(), parent),
            };
            parent = Some(idx);
        }
        parent
    }

    /// Leaves are disabled without a selectable item; branches when every child is.
    fn mark_disabled(tree: &mut TabTree) {
        let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let disabled = match tree.get_node(idx) {
                Some(node) if node.is_leaf() => {
                    !node.items.iter().any(|item| item.tag.is_selectable())
                }
                Some(node) => node.children.iter().all(|&child| {
                    tree.get_node(child).map_or(true, |child| child.is_disabled)
                }),
                None => continue,
            };
            if let Some(node) = tree.get_node_mut(idx) {
                node.is_disabled = disabled;
            }
        }
    }
}
