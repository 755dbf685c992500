/*
Text rendering of tab trees via termtree.

The arena stores children as indices, so conversion walks the arena
recursively and builds an owned Tree<String> per tab.
 */
use generational_arena::Index;
use termtree::Tree;

use crate::domain::{TabPath, TabTree};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Tab tree plus the navigation state to mark while rendering.
pub struct TabTreeView<'a> {
    pub tree: &'a TabTree,
    pub active: Option<&'a TabPath>,
    pub highlighted: Option<&'a str>,
}

impl<'a> TabTreeView<'a> {
    pub fn new(tree: &'a TabTree) -> Self {
        Self {
            tree,
            active: None,
            highlighted: None,
        }
    }

    pub fn with_active(mut self, active: &'a TabPath) -> Self {
        self.active = Some(active);
        self
    }

    pub fn with_highlight(mut self, code: Option<&'a str>) -> Self {
        self.highlighted = code;
        self
    }

    fn build(&self, idx: Index, depth: usize, on_active_path: bool) -> Option<Tree<String>> {
        let node = self.tree.get_node(idx)?;
        let is_active = on_active_path
            && self
                .active
                .and_then(|path| path.as_slice().get(depth))
                .is_some_and(|name| *name == node.name);

        let mut label = node.name.clone();
        if is_active {
            label.push_str(" *");
        }
        if node.is_disabled {
            label.push_str(" (disabled)");
        }

        let mut tree = Tree::new(label);
        for &child in &node.children {
            if let Some(child_tree) = self.build(child, depth + 1, is_active) {
                tree.push(child_tree);
            }
        }
        for item in &node.items {
            let marker = if self.highlighted == Some(item.course.code.as_str()) {
                " <<"
            } else {
                ""
            };
            tree.push(Tree::new(format!("{item}{marker}")));
        }
        Some(tree)
    }
}

impl TreeNodeConvert for TabTreeView<'_> {
    fn to_tree_string(&self) -> Tree<String> {
        let mut root = Tree::new("courses".to_string());
        for &idx in self.tree.roots() {
            if let Some(tab) = self.build(idx, 0, true) {
                root.push(tab);
            }
        }
        root
    }
}
