//! Course view session: single-threaded event loop over the navigation core.
//!
//! Events are applied strictly in arrival order. The tab tree is derived
//! from (catalog, selection) and rebuilt only when that key changes; every
//! rebuild is reconciled with the navigator before the next event runs.

use std::rc::Rc;

use tracing::{debug, instrument};

use crate::application::navigation::{HighlightTimer, Navigator};
use crate::application::search_box::SearchBox;
use crate::domain::{
    clear_course, on_course_click, Catalog, CourseTag, SelectionMap, SelectionSummary, TabPath,
    TabTree, TabTreeBuilder,
};
use crate::infrastructure::traits::{Clock, SystemClock};

/// Inputs the rendering layer feeds back into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// User clicked the tab `name` at `depth` (0 = top level)
    TabSelected { depth: usize, name: String },
    QueryChanged(String),
    SearchFocused,
    SearchBlurred,
    /// User picked a search candidate
    ResultSelected(String),
    /// User clicked a course row proposing `tag`
    CourseClicked { code: String, tag: CourseTag },
    /// User removed a course's stored tag
    CourseCleared(String),
    TimerFired(HighlightTimer),
    Tick,
}

/// What a dispatched event changed, for the host to act on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Expiry to schedule as a later `ViewEvent::TimerFired`
    pub armed: Option<HighlightTimer>,
    pub selection_changed: bool,
}

/// Memoized tab tree keyed on catalog identity and selection snapshot.
struct TreeCache {
    catalog: Rc<Catalog>,
    selection: SelectionMap,
    tree: Rc<TabTree>,
}

impl TreeCache {
    fn is_fresh(&self, catalog: &Rc<Catalog>, selection: &SelectionMap) -> bool {
        Rc::ptr_eq(&self.catalog, catalog) && self.selection == *selection
    }
}

pub struct CourseViewSession<C: Clock = SystemClock> {
    catalog: Rc<Catalog>,
    builder: TabTreeBuilder,
    selection: SelectionMap,
    cache: TreeCache,
    navigator: Navigator,
    search: SearchBox,
    clock: C,
}

impl CourseViewSession<SystemClock> {
    pub fn new(catalog: Catalog, selection: SelectionMap) -> Self {
        Self::with_parts(catalog, selection, TabTreeBuilder::new(), SystemClock)
    }
}

impl<C: Clock> CourseViewSession<C> {
    /// Create a session with custom dependencies (for testing).
    pub fn with_parts(
        catalog: Catalog,
        selection: SelectionMap,
        builder: TabTreeBuilder,
        clock: C,
    ) -> Self {
        let catalog = Rc::new(catalog);
        let tree = Rc::new(builder.build(&catalog, &selection));
        let cache = TreeCache {
            catalog: Rc::clone(&catalog),
            selection: selection.clone(),
            tree,
        };
        Self {
            catalog,
            builder,
            selection,
            cache,
            navigator: Navigator::new(),
            search: SearchBox::new(),
            clock,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionMap {
        &self.selection
    }

    /// Current tab tree snapshot.
    pub fn tree(&self) -> Rc<TabTree> {
        Rc::clone(&self.cache.tree)
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn search(&self) -> &SearchBox {
        &self.search
    }

    /// Default-resolved active tab per depth.
    pub fn active_path(&self) -> TabPath {
        self.navigator.active_path(&self.cache.tree)
    }

    pub fn highlighted_course(&self) -> Option<&str> {
        self.navigator.highlighted_course()
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary::from_selection(&self.catalog, &self.selection)
    }

    /// Swap in a selection changed by an outside collaborator.
    pub fn replace_selection(&mut self, selection: SelectionMap) {
        self.selection = selection;
        self.refresh();
    }

    #[instrument(level = "debug", skip(self))]
    pub fn dispatch(&mut self, event: ViewEvent) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        match event {
            ViewEvent::TabSelected { depth, name } => {
                self.navigator.select_tab(depth, &name, &self.cache.tree);
            }
            ViewEvent::QueryChanged(query) => {
                self.search.set_query(query, &self.catalog);
            }
            ViewEvent::SearchFocused => self.search.focus(),
            ViewEvent::SearchBlurred => self.search.blur(),
            ViewEvent::ResultSelected(code) => {
                let code = self.search.select(&code);
                let now = self.clock.now();
                outcome.armed = self.navigator.jump_to(&code, &self.cache.tree, now);
            }
            ViewEvent::CourseClicked { code, tag } => {
                let updated = self
                    .catalog
                    .get(&code)
                    .and_then(|course| on_course_click(&self.selection, course, tag));
                if let Some(selection) = updated {
                    outcome.selection_changed = selection != self.selection;
                    self.replace_selection(selection);
                }
            }
            ViewEvent::CourseCleared(code) => {
                if self.selection.contains(&code) {
                    let selection = clear_course(&self.selection, &code);
                    self.replace_selection(selection);
                    outcome.selection_changed = true;
                }
            }
            ViewEvent::TimerFired(timer) => {
                self.navigator.expire(timer);
            }
            ViewEvent::Tick => {
                self.navigator.tick(self.clock.now());
            }
        }
        outcome
    }

    /// Rebuild the tree if (catalog, selection) changed since the last build.
    fn refresh(&mut self) {
        if self.cache.is_fresh(&self.catalog, &self.selection) {
            return;
        }
        debug!("selection changed, rebuilding tab tree");
        let tree = Rc::new(self.builder.build(&self.catalog, &self.selection));
        self.cache = TreeCache {
            catalog: Rc::clone(&self.catalog),
            selection: self.selection.clone(),
            tree,
        };
        self.navigator.on_tree_rebuilt(&self.cache.tree);
    }
}
