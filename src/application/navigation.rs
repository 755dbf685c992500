//! Navigation state: the active tab at every depth plus a transient highlight.
//!
//! Only explicitly navigated depths are stored. Every other depth resolves to
//! the first enabled sibling when asked, so the default follows the current
//! tree instead of going stale across rebuilds.
//!
//! The highlight set by a search jump carries a generation number. Expiry
//! tokens from an older generation are ignored, so a stale timer can never
//! clear a newer highlight.

use std::time::{Duration, Instant};

use tracing::{debug, instrument};

use crate::domain::{resolve, TabPath, TabTree};

/// How long a search-jump highlight stays visible.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(3000);

/// Token for one armed highlight expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTimer {
    pub generation: u64,
    pub deadline: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Highlight {
    code: String,
    timer: HighlightTimer,
}

/// Owns the active tab path and the highlighted course.
///
/// All operations are total: unknown tabs, unresolvable courses and stale
/// timers leave the state unchanged.
#[derive(Debug, Default)]
pub struct Navigator {
    active_path: Vec<String>,
    highlight: Option<Highlight>,
    generation: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Explicitly navigated names, one per depth; may be shorter than the tree.
    pub fn stored_path(&self) -> &[String] {
        &self.active_path
    }

    pub fn highlighted_course(&self) -> Option<&str> {
        self.highlight.as_ref().map(|h| h.code.as_str())
    }

    pub fn highlight_timer(&self) -> Option<HighlightTimer> {
        self.highlight.as_ref().map(|h| h.timer)
    }

    /// Concrete active tab name per depth against `tree`.
    ///
    /// A stored name wins while it still exists among its siblings. The first
    /// depth that falls back to the default (first enabled sibling) ignores
    /// all deeper stored names, since they belonged to a different parent.
    /// Resolution stops at a depth with no enabled sibling.
    pub fn active_path(&self, tree: &TabTree) -> TabPath {
        let mut resolved = Vec::new();
        let mut parent = None;
        let mut follow_stored = true;

        for depth in 0.. {
            if tree.children(parent).is_empty() {
                break;
            }
            let stored = if follow_stored {
                self.active_path
                    .get(depth)
                    .and_then(|name| tree.child_named(parent, name))
            } else {
                None
            };
            let chosen = match stored {
                Some(idx) => idx,
                None => {
                    follow_stored = false;
                    match tree.first_enabled_child(parent) {
                        Some(idx) => idx,
                        None => break,
                    }
                }
            };
            match tree.get_node(chosen) {
                Some(node) => resolved.push(node.name.clone()),
                None => break,
            }
            parent = Some(chosen);
        }

        TabPath::new(resolved)
    }

    /// Manual tab change at `depth`.
    ///
    /// Depths above `depth` are pinned to what is currently shown; everything
    /// below is dropped and falls back to defaults. Clicks on unknown or
    /// disabled tabs are ignored, and so is a click on the tab already shown
    /// at `depth`.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn select_tab(&mut self, depth: usize, name: &str, tree: &TabTree) {
        let current = self.active_path(tree);
        if depth > current.len() {
            debug!(shown = current.len(), "tab depth not on screen, ignoring");
            return;
        }
        if current.as_slice().get(depth).is_some_and(|shown| shown == name) {
            debug!("tab already active, keeping deeper tabs");
            return;
        }
        let shown_above = &current.as_slice()[..depth];
        let parent = if depth == 0 {
            None
        } else {
            match tree.locate(shown_above) {
                Some(idx) => Some(idx),
                None => return,
            }
        };
        let Some(idx) = tree.child_named(parent, name) else {
            debug!("no such tab, ignoring");
            return;
        };
        if tree.get_node(idx).is_some_and(|node| node.is_disabled) {
            debug!("tab is disabled, ignoring");
            return;
        }

        let mut next = shown_above.to_vec();
        next.push(name.to_string());
        self.active_path = next;
        self.check_divergence(tree);
    }

    /// Search-driven jump: activate the whole path to `code` and highlight it.
    ///
    /// Returns the armed expiry token, or None (and no change) when the code
    /// is not in the tree.
    #[instrument(level = "debug", skip(self, tree, now))]
    pub fn jump_to(&mut self, code: &str, tree: &TabTree, now: Instant) -> Option<HighlightTimer> {
        let path = resolve(code, tree)?;
        self.active_path = path.into_vec();
        self.generation += 1;
        let timer = HighlightTimer {
            generation: self.generation,
            deadline: now + HIGHLIGHT_DURATION,
        };
        self.highlight = Some(Highlight {
            code: code.to_string(),
            timer,
        });
        debug!(generation = timer.generation, path = ?self.active_path, "jumped to course");
        Some(timer)
    }

    /// Expiry callback for `timer`; returns true if it cleared the highlight.
    pub fn expire(&mut self, timer: HighlightTimer) -> bool {
        match &self.highlight {
            Some(h) if h.timer.generation == timer.generation => {
                debug!(code = %h.code, "highlight expired");
                self.clear_highlight();
                true
            }
            _ => {
                debug!(generation = timer.generation, "stale highlight timer ignored");
                false
            }
        }
    }

    /// Clear the highlight if its deadline has passed at `now`.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.highlight_timer() {
            Some(timer) if now >= timer.deadline => self.expire(timer),
            _ => false,
        }
    }

    pub fn clear_highlight(&mut self) {
        self.highlight = None;
    }

    /// Reconcile with a freshly built tree.
    ///
    /// Stored names that no longer exist at their depth are pruned together
    /// with everything below them, then the divergence check runs.
    pub fn on_tree_rebuilt(&mut self, tree: &TabTree) {
        let mut parent = None;
        let mut valid = 0;
        for name in &self.active_path {
            match tree.child_named(parent, name) {
                Some(idx) => {
                    parent = Some(idx);
                    valid += 1;
                }
                None => break,
            }
        }
        if valid < self.active_path.len() {
            debug!(kept = valid, dropped = self.active_path.len() - valid, "pruned active path");
            self.active_path.truncate(valid);
        }
        self.check_divergence(tree);
    }

    /// Drop the highlight when its course no longer lives under the active root.
    ///
    /// Returns true if the highlight was cleared.
    pub fn check_divergence(&mut self, tree: &TabTree) -> bool {
        let Some(code) = self.highlighted_course() else {
            return false;
        };
        let active = self.active_path(tree);
        let diverged = match resolve(code, tree) {
            Some(path) => path.root() != active.root(),
            None => true,
        };
        if diverged {
            debug!(%code, active_root = ?active.root(), "highlight diverged from active tab");
            self.clear_highlight();
        }
        diverged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, Course, SelectionMap, TabTreeBuilder};

    fn course(code: &str, category: &[&str]) -> Course {
        Course::new(code, code, category.iter().map(|s| s.to_string()).collect())
    }

    fn tree_of(courses: Vec<Course>) -> TabTree {
        let catalog = Catalog::new(courses).unwrap();
        TabTreeBuilder::new().build(&catalog, &SelectionMap::new())
    }

    #[test]
    fn given_fresh_navigator_when_resolving_then_first_enabled_defaults() {
        let tree = tree_of(vec![
            course("X100", &["Locked"]).with_prerequisites(vec!["NOPE".into()]),
            course("A100", &["Math", "Algebra"]),
            course("A200", &["Math", "Geometry"]),
        ]);
        let nav = Navigator::new();

        assert_eq!(nav.active_path(&tree).as_slice(), ["Math", "Algebra"]);
        assert!(nav.stored_path().is_empty());
    }

    #[test]
    fn given_root_changed_when_resolving_then_nested_falls_back_to_default() {
        let tree = tree_of(vec![
            course("A100", &["Math", "Algebra"]),
            course("A200", &["Math", "Geometry"]),
            course("B100", &["Science", "Physics"]),
            course("B200", &["Science", "Biology"]),
        ]);
        let mut nav = Navigator::new();
        nav.jump_to("A200", &tree, Instant::now());

        nav.select_tab(0, "Science", &tree);

        assert_eq!(nav.active_path(&tree).as_slice(), ["Science", "Physics"]);
        assert_eq!(nav.stored_path(), ["Science"]);
    }

    #[test]
    fn given_nested_click_when_selecting_then_pins_shown_ancestors() {
        let tree = tree_of(vec![
            course("A100", &["Math", "Algebra"]),
            course("A200", &["Math", "Geometry"]),
        ]);
        let mut nav = Navigator::new();

        nav.select_tab(1, "Geometry", &tree);

        assert_eq!(nav.stored_path(), ["Math", "Geometry"]);
    }

    #[test]
    fn given_jump_to_nested_course_when_reclicking_its_root_then_path_kept() {
        let tree = tree_of(vec![
            course("A100", &["Math", "Algebra"]),
            course("A200", &["Math", "Geometry"]),
            course("B100", &["Science"]),
        ]);
        let mut nav = Navigator::new();
        nav.jump_to("A200", &tree, Instant::now());

        nav.select_tab(0, "Math", &tree);

        assert_eq!(nav.active_path(&tree).as_slice(), ["Math", "Geometry"]);
        assert_eq!(nav.highlighted_course(), Some("A200"));
    }

    #[test]
    fn given_invalid_clicks_when_selecting_then_state_unchanged() {
        let tree = tree_of(vec![
            course("A100", &["Math"]),
            course("X100", &["Locked"]).with_prerequisites(vec!["NOPE".into()]),
        ]);
        let mut nav = Navigator::new();

        nav.select_tab(0, "Nope", &tree);
        nav.select_tab(0, "Locked", &tree);
        nav.select_tab(5, "Math", &tree);

        assert!(nav.stored_path().is_empty());
    }

    #[test]
    fn given_second_jump_when_first_timer_fires_then_ignored() {
        let tree = tree_of(vec![course("A100", &["Math"]), course("A200", &["Math"])]);
        let mut nav = Navigator::new();
        let now = Instant::now();

        let first = nav.jump_to("A100", &tree, now).unwrap();
        let second = nav.jump_to("A200", &tree, now + Duration::from_millis(1000)).unwrap();

        assert!(!nav.expire(first));
        assert_eq!(nav.highlighted_course(), Some("A200"));
        assert!(nav.expire(second));
        assert_eq!(nav.highlighted_course(), None);
    }

    #[test]
    fn given_deadline_when_ticking_then_clears_only_after_it() {
        let tree = tree_of(vec![course("A100", &["Math"])]);
        let mut nav = Navigator::new();
        let now = Instant::now();
        nav.jump_to("A100", &tree, now);

        assert!(!nav.tick(now + Duration::from_millis(2999)));
        assert!(nav.tick(now + HIGHLIGHT_DURATION));
        assert_eq!(nav.highlighted_course(), None);
    }

    #[test]
    fn given_unknown_course_when_jumping_then_no_op() {
        let tree = tree_of(vec![course("A100", &["Math"]), course("B200", &["Science"])]);
        let mut nav = Navigator::new();
        nav.select_tab(0, "Science", &tree);

        assert!(nav.jump_to("Z999", &tree, Instant::now()).is_none());
        assert_eq!(nav.stored_path(), ["Science"]);
        assert_eq!(nav.highlighted_course(), None);
    }

    #[test]
    fn given_removed_tab_when_rebuilt_then_prunes_and_clears_highlight() {
        let before = tree_of(vec![
            course("A100", &["Math", "Algebra"]),
            course("B200", &["Science"]),
        ]);
        let after = tree_of(vec![course("B200", &["Science"])]);
        let mut nav = Navigator::new();
        nav.jump_to("A100", &before, Instant::now());

        nav.on_tree_rebuilt(&after);

        assert!(nav.stored_path().is_empty());
        assert_eq!(nav.highlighted_course(), None);
        assert_eq!(nav.active_path(&after).as_slice(), ["Science"]);
    }
}
