//! # easel
//!
//! Minimal scene graph and event dispatch for 2D drawing surfaces.
//!
//! easel sits on top of any canvas-like drawing target: callers build a
//! tree of named, typed widgets, subscribe throttled/limited callbacks to
//! named events, and ask the render dispatcher to paint each widget through
//! a [`View`].
//!
//! ## Architecture
//!
//! Three independent pieces, wired together by the caller:
//!
//! ```text
//! EventBus    named buckets of throttled/expiring handlers, sync dispatch
//! WidgetTree  flat registry with parent links and ancestor traversal
//! render()    WidgetModel variant -> drawing routine -> DrawingSurface
//! ```
//!
//! The event bus and the widget tree know nothing about each other; the
//! render dispatcher reads a widget (data) and writes to a view (sink).
//! Everything is synchronous and single-threaded; construct one bus and
//! one tree per scene instead of sharing globals.
//!
//! The concrete drawing surface is external: implement [`DrawingSurface`]
//! for your target and hand it to a [`View`] through a resolver.
//!
//! ## Modules
//!
//! - [`types`] - Points, text placement, font/pen descriptors
//! - [`event`] - Event bus and handler records
//! - [`scene`] - Widgets and the tree that owns them
//! - [`view`] - Surface trait, lazy binding, input hooks
//! - [`render`] - Dispatcher and drawing routines

pub mod event;
pub mod render;
pub mod scene;
pub mod types;
pub mod view;

// Re-export commonly used items
pub use types::{Font, Pen, Point, TextAlign, TextBaseline, font, pen};

pub use event::{EventBus, HandlerId};

pub use scene::{Widget, WidgetId, WidgetModel, WidgetTree};

pub use view::{
    DrawingSurface, InputHooks, KeyHook, MouseHook, SurfaceBounds, SurfaceResolver, View,
};

pub use render::{
    MAX_GLYPH_STEP, circle, circle_text, rect, render, text, text_size, triangle,
};
