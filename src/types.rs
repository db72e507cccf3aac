//! Core types for easel.
//!
//! These types define the foundation that everything builds on.
//! Points flow through the scene graph and drawing routines; the font and
//! pen descriptors carry the style state the render dispatcher pushes onto
//! a drawing surface.

// =============================================================================
// Geometry
// =============================================================================

/// A point in surface-local coordinates.
///
/// Surfaces address logical pixels as `f32`; input dispatch converts raw
/// window coordinates into this space before anything else sees them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// Text placement
// =============================================================================

/// Horizontal text alignment applied by the surface when painting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text baseline applied by the surface when painting text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

// =============================================================================
// Style descriptors
// =============================================================================

/// Font descriptor consumed by the text drawing routines.
///
/// `font` is the surface's font specification string (e.g. `"12pt serif"`);
/// the fill and stroke styles are opaque to the core and handed to the
/// surface verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub font: String,
    pub fill_style: String,
    pub stroke_style: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

/// Build a font descriptor from a family name and point size.
///
/// Alignment defaults to `Left` and baseline to `Top` when not given.
pub fn font(
    name: &str,
    size: f32,
    fill_style: &str,
    stroke_style: &str,
    align: Option<TextAlign>,
    baseline: Option<TextBaseline>,
) -> Font {
    Font {
        font: format!("{size}pt {name}"),
        fill_style: fill_style.to_string(),
        stroke_style: stroke_style.to_string(),
        text_align: align.unwrap_or_default(),
        text_baseline: baseline.unwrap_or_default(),
    }
}

/// Pen descriptor consumed by the shape drawing routines.
///
/// A pen with no fill style strokes only; the stroke style is always
/// applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    pub line_width: f32,
    pub fill_style: Option<String>,
    pub stroke_style: String,
}

/// Build a pen descriptor.
///
/// `fill_style: None` means shapes drawn with this pen are not filled.
/// The stroke style defaults to `"black"` when not given.
pub fn pen(line_width: f32, fill_style: Option<&str>, stroke_style: Option<&str>) -> Pen {
    Pen {
        line_width,
        fill_style: fill_style.map(str::to_string),
        stroke_style: stroke_style.unwrap_or("black").to_string(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
