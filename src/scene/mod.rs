//! Scene graph - widgets and the tree that owns them.
//!
//! Widgets are plain records; all structure (parent links, traversal,
//! lookups, removal) lives on [`WidgetTree`], which owns every node and
//! hands out ids instead of references.

mod tree;
mod widget;

pub use tree::WidgetTree;
pub use widget::{Widget, WidgetId, WidgetModel};
