//! Widget tree - flat registry with parent links and ancestor traversal.
//!
//! The tree is the single owner of every widget. Nodes carry id-based
//! parent back-references; lookups are linear scans over the append-order
//! registry. Ids come from a per-tree monotonic counter and are never
//! reused, even after removal.

use super::widget::{Widget, WidgetId, WidgetModel};

/// Flat registry of widgets with parent links.
///
/// Construct one per scene; trees are independent of each other and of any
/// event bus.
#[derive(Default)]
pub struct WidgetTree {
    /// Creation-order registry. Removal compacts the vec but never disturbs
    /// the relative order of survivors.
    widgets: Vec<Widget>,
    next_id: u64,
}

impl WidgetTree {
    /// Create an empty tree. Ids start at 0.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Create a root widget.
    pub fn create(&mut self, name: &str, model: WidgetModel) -> WidgetId {
        self.insert(name, model, None)
    }

    /// Create a widget parented under `parent`.
    ///
    /// An unknown parent id is ignored and the widget becomes a root; the
    /// parent link is fixed at creation and never reassigned.
    pub fn create_child(&mut self, name: &str, model: WidgetModel, parent: WidgetId) -> WidgetId {
        if self.get(parent).is_none() {
            log::debug!("parent {parent:?} not in registry; creating '{name}' as root");
            return self.insert(name, model, None);
        }
        self.insert(name, model, Some(parent))
    }

    fn insert(&mut self, name: &str, model: WidgetModel, parent: Option<WidgetId>) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;

        log::debug!("create {:?} '{}' kind={}", id, name, model.kind());
        self.widgets.push(Widget {
            id,
            name: name.to_string(),
            model,
            parent,
        });
        id
    }

    // =========================================================================
    // Removal
    // =========================================================================

    /// Remove a widget and, recursively, every widget parented under it.
    ///
    /// Subsequent lookups no longer find the removed widgets. Removing an
    /// unknown id is a no-op. Freed ids are never reused.
    pub fn remove(&mut self, id: WidgetId) {
        if self.get(id).is_none() {
            return;
        }

        // Collect the subtree first so the registry is not mutated while it
        // is being walked.
        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            doomed.extend(self.children(parent));
            cursor += 1;
        }

        log::debug!("remove {:?} ({} node(s) incl. descendants)", id, doomed.len());
        self.widgets.retain(|widget| !doomed.contains(&widget.id));
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Visit each strict ancestor of `id`, nearest first, stopping at the
    /// root.
    ///
    /// The widget itself is never visited; a root (or an unknown id) gets
    /// zero visits.
    pub fn climb<F>(&self, id: WidgetId, mut visit: F)
    where
        F: FnMut(&Widget),
    {
        let mut current = self.get(id).and_then(|widget| widget.parent);
        while let Some(ancestor_id) = current {
            let Some(ancestor) = self.get(ancestor_id) else {
                break;
            };
            visit(ancestor);
            current = ancestor.parent;
        }
    }

    /// Ids of the widgets directly parented under `id`, in creation order.
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|widget| widget.parent == Some(id))
            .map(|widget| widget.id)
            .collect()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Find a widget by id. Linear scan over the registry.
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|widget| widget.id == id)
    }

    /// Every widget with the given name, in creation order.
    pub fn find_by_name(&self, name: &str) -> Vec<&Widget> {
        self.widgets
            .iter()
            .filter(|widget| widget.name == name)
            .collect()
    }

    /// Iterate the registry in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
