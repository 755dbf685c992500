use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::domain::entities::{Course, CourseTag, TabPath};

/// A course listed on a leaf tab together with its display tag.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseViewItem {
    pub course: Course,
    pub tag: CourseTag,
}

impl fmt::Display for CourseViewItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.course, self.tag)
    }
}

/// Tab node in the arena-based tab hierarchy.
///
/// A node either has children (a category tab) or is a leaf listing
/// courses. An empty leaf is still a leaf.
#[derive(Debug)]
pub struct TabNode {
    /// Tab label, unique among siblings and stable across rebuilds
    pub name: String,
    /// True when nothing below this tab is selectable
    pub is_disabled: bool,
    /// Index of parent node in the arena, None for root tabs
    pub parent: Option<Index>,
    /// Indices of child tabs in the arena, in display order
    pub children: Vec<Index>,
    /// Courses listed on this tab, populated only for leaves
    pub items: Vec<CourseViewItem>,
}

impl TabNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn contains_course(&self, code: &str) -> bool {
        self.items.iter().any(|item| item.course.code == code)
    }
}

/// Structural snapshot of a tab subtree, used to compare builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabShape {
    pub name: String,
    pub is_disabled: bool,
    pub children: Vec<TabShape>,
    pub items: Vec<(String, CourseTag)>,
}

/// Arena-based tab tree holding every root tab of one build.
///
/// Built fresh per catalog/selection change and never patched afterwards.
#[derive(Debug)]
pub struct TabTree {
    /// Arena storage for all tab nodes
    arena: Arena<TabNode>,
    /// Root tabs in display order
    roots: Vec<Index>,
}

impl Default for TabTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TabTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: String, parent: Option<Index>) -> Index {
        let node = TabNode {
            name,
            is_disabled: false,
            parent,
            children: Vec::new(),
            items: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.roots.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TabNode> {
        self.arena.get(idx)
    }

    pub(crate) fn get_node_mut(&mut self, idx: Index) -> Option<&mut TabNode> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Children of `parent`, or the root tabs when `parent` is None.
    pub fn children(&self, parent: Option<Index>) -> &[Index] {
        match parent {
            None => &self.roots,
            Some(idx) => self
                .get_node(idx)
                .map(|node| node.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    pub fn child_named(&self, parent: Option<Index>, name: &str) -> Option<Index> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&idx| self.get_node(idx).is_some_and(|node| node.name == name))
    }

    /// First sibling under `parent` that is not disabled.
    pub fn first_enabled_child(&self, parent: Option<Index>) -> Option<Index> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&idx| self.get_node(idx).is_some_and(|node| !node.is_disabled))
    }

    /// Follow `names` from the roots; None as soon as a name is missing.
    pub fn locate(&self, names: &[String]) -> Option<Index> {
        let mut current = None;
        for name in names {
            current = Some(self.child_named(current, name)?);
        }
        current
    }

    /// Names from the root tab down to `idx`, inclusive.
    pub fn path_of(&self, idx: Index) -> TabPath {
        let mut names = Vec::new();
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            match self.get_node(node_idx) {
                Some(node) => {
                    names.push(node.name.clone());
                    current = node.parent;
                }
                None => break,
            }
        }
        names.reverse();
        TabPath::new(names)
    }

    pub fn iter(&self) -> TreeIterator {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator {
        PostOrderIterator::new(self)
    }

    /// Total number of course items across all leaves.
    pub fn item_count(&self) -> usize {
        self.iter().map(|(_, node)| node.items.len()).sum()
    }

    pub fn shape(&self) -> Vec<TabShape> {
        self.roots
            .iter()
            .filter_map(|&root| self.shape_of(root))
            .collect()
    }

    fn shape_of(&self, idx: Index) -> Option<TabShape> {
        let node = self.get_node(idx)?;
        Some(TabShape {
            name: node.name.clone(),
            is_disabled: node.is_disabled,
            children: node
                .children
                .iter()
                .filter_map(|&child| self.shape_of(child))
                .collect(),
            items: node
                .items
                .iter()
                .map(|item| (item.course.code.clone(), item.tag))
                .collect(),
        })
    }
}

/// Pre-order traversal across all root tabs, left to right.
pub struct TreeIterator<'a> {
    tree: &'a TabTree,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a TabTree) -> Self {
        let stack = tree.roots().iter().rev().copied().collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TabNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order traversal: every child is yielded before its parent.
pub struct PostOrderIterator<'a> {
    tree: &'a TabTree,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a TabTree) -> Self {
        let stack = tree.roots().iter().rev().map(|&idx| (idx, false)).collect();
        Self { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TabNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
