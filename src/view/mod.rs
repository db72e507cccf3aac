//! View - binding between the core and a concrete drawing surface.
//!
//! The surface itself is external; the core consumes it through the
//! [`DrawingSurface`] trait. A [`View`] resolves its surface lazily through
//! a caller-supplied resolver, caches it after the first resolution, maps
//! raw window coordinates into surface-local space, and carries the raw
//! input hook slots.

use std::rc::Rc;

use crate::types::{Point, TextAlign, TextBaseline};

// =============================================================================
// Drawing surface
// =============================================================================

/// Physical placement of a surface inside its window, in raw window
/// coordinates. Used only by the input coordinate transform.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// A stateful 2D drawing target.
///
/// Mirrors the primitive set the drawing routines consume: attribute
/// save/restore, path construction, stroke/fill, text painting and
/// measurement, and the affine transforms used for per-glyph placement.
/// Styles are opaque strings handed through verbatim.
pub trait DrawingSurface {
    /// Logical width in surface pixels.
    fn width(&self) -> f32;
    /// Logical height in surface pixels.
    fn height(&self) -> f32;
    /// Physical placement inside the window, for input mapping.
    fn physical_bounds(&self) -> SurfaceBounds;

    fn save(&mut self);
    fn restore(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn close_path(&mut self);
    /// Circular arc around `center` from `start_angle` to `stop_angle`
    /// (radians), counter-clockwise when `ccw` is set.
    fn arc(&mut self, center: Point, radius: f32, start_angle: f32, stop_angle: f32, ccw: bool);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn set_line_width(&mut self, width: f32);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_text(&mut self, text: &str, p: Point);
    fn stroke_text(&mut self, text: &str, p: Point);
    /// Width of `text` under the current font.
    fn measure_text(&mut self, text: &str) -> f32;

    fn translate(&mut self, offset: Point);
    fn rotate(&mut self, radians: f32);
}

// =============================================================================
// Input hooks
// =============================================================================

/// Mouse hook, invoked with surface-local coordinates.
pub type MouseHook = Rc<dyn Fn(Point)>;

/// Key hook, invoked with the key name.
pub type KeyHook = Rc<dyn Fn(&str)>;

/// Raw input hook slots.
///
/// All slots start unset; dispatching through an unset slot is a silent
/// no-op. Higher layers typically forward these into an event bus.
#[derive(Default)]
pub struct InputHooks {
    pub on_mouse_move: Option<MouseHook>,
    pub on_mouse_down: Option<MouseHook>,
    pub on_mouse_up: Option<MouseHook>,
    pub on_key_down: Option<KeyHook>,
    pub on_key_up: Option<KeyHook>,
    pub on_key_press: Option<KeyHook>,
}

// =============================================================================
// View
// =============================================================================

/// Resolver that looks up the concrete surface for a target name.
pub type SurfaceResolver<S> = Box<dyn FnMut(&str) -> Option<S>>;

/// Lazily bound drawing target plus input hook slots.
///
/// The resolver runs at most once per view on first surface access; a
/// resolved surface is cached for the view's lifetime, an unresolvable one
/// is retried on the next access.
pub struct View<S: DrawingSurface> {
    target: String,
    surface: Option<S>,
    resolver: SurfaceResolver<S>,
    pub input: InputHooks,
}

impl<S: DrawingSurface> View<S> {
    /// Create a view bound to `target`, resolved through `resolver`.
    pub fn new(target: &str, resolver: impl FnMut(&str) -> Option<S> + 'static) -> Self {
        Self {
            target: target.to_string(),
            surface: None,
            resolver: Box::new(resolver),
            input: InputHooks::default(),
        }
    }

    /// Name of the target this view binds to.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The drawing surface, resolving and caching it on first access.
    ///
    /// Returns `None` while the target cannot be resolved; drawing against
    /// such a view is a no-op.
    pub fn surface(&mut self) -> Option<&mut S> {
        if self.surface.is_none() {
            self.surface = (self.resolver)(&self.target);
            if self.surface.is_none() {
                log::debug!("surface '{}' not resolvable yet", self.target);
            }
        }
        self.surface.as_mut()
    }

    /// Map raw window coordinates to surface-local coordinates, accounting
    /// for scaling between the surface's logical and physical size.
    ///
    /// Returns `None` while the surface is unresolved.
    pub fn window_to_view(&mut self, x: f32, y: f32) -> Option<Point> {
        let surface = self.surface()?;
        let bounds = surface.physical_bounds();
        Some(Point {
            x: x - bounds.left * (surface.width() / bounds.width),
            y: y - bounds.top * (surface.height() / bounds.height),
        })
    }

    // =========================================================================
    // Input dispatch
    // =========================================================================

    /// Forward a raw mouse-move to the hook, in surface-local coordinates.
    pub fn dispatch_mouse_move(&mut self, x: f32, y: f32) {
        self.dispatch_mouse(x, y, |input| input.on_mouse_move.clone());
    }

    /// Forward a raw mouse-down to the hook, in surface-local coordinates.
    pub fn dispatch_mouse_down(&mut self, x: f32, y: f32) {
        self.dispatch_mouse(x, y, |input| input.on_mouse_down.clone());
    }

    /// Forward a raw mouse-up to the hook, in surface-local coordinates.
    pub fn dispatch_mouse_up(&mut self, x: f32, y: f32) {
        self.dispatch_mouse(x, y, |input| input.on_mouse_up.clone());
    }

    fn dispatch_mouse(&mut self, x: f32, y: f32, slot: impl Fn(&InputHooks) -> Option<MouseHook>) {
        let Some(hook) = slot(&self.input) else {
            return;
        };
        if let Some(coords) = self.window_to_view(x, y) {
            hook(coords);
        }
    }

    /// Forward a key-down to the hook, if set.
    pub fn dispatch_key_down(&mut self, key: &str) {
        if let Some(hook) = self.input.on_key_down.clone() {
            hook(key);
        }
    }

    /// Forward a key-up to the hook, if set.
    pub fn dispatch_key_up(&mut self, key: &str) {
        if let Some(hook) = self.input.on_key_up.clone() {
            hook(key);
        }
    }

    /// Forward a key-press to the hook, if set.
    pub fn dispatch_key_press(&mut self, key: &str) {
        if let Some(hook) = self.input.on_key_press.clone() {
            hook(key);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
