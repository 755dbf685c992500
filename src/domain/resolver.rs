//! Course code to tab path resolution.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TabTree;
use crate::domain::entities::TabPath;

/// Resolve the tab path leading to the leaf that lists `code`.
///
/// Depth-first over the roots in display order; the first leaf listing the
/// code wins (codes are unique within a catalog). Returns None when the code
/// is not in the tree; callers treat that as a no-op.
#[instrument(level = "debug", skip(tree))]
pub fn resolve(code: &str, tree: &TabTree) -> Option<TabPath> {
    let found = tree
        .roots()
        .iter()
        .find_map(|&root| find_leaf(tree, root, code))
        .map(|leaf| tree.path_of(leaf));
    if found.is_none() {
        debug!("course not present in tab tree");
    }
    found
}

fn find_leaf(tree: &TabTree, idx: Index, code: &str) -> Option<Index> {
    let node = tree.get_node(idx)?;
    if node.is_leaf() {
        return node.contains_course(code).then_some(idx);
    }
    node.children
        .iter()
        .find_map(|&child| find_leaf(tree, child, code))
}
