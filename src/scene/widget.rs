//! Widget - one node in the scene graph.

use crate::types::{Font, Pen, Point};

/// Identifies one widget in a tree.
///
/// Ids are assigned from the tree's monotonically increasing counter and
/// are never reused, even after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(pub(crate) u64);

/// The drawing payload carried by a widget, one variant per drawing
/// routine.
///
/// The render dispatcher matches on this exhaustively; adding a widget kind
/// means adding a variant here and a match arm there. [`WidgetModel::Group`]
/// is the non-drawing variant used for pure containers.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetModel {
    /// Draws nothing; groups children.
    Group,
    /// Plain text at a position.
    Text {
        text: String,
        font: Font,
        position: Point,
    },
    /// Text laid out glyph-by-glyph along a circular arc.
    CircleText {
        text: String,
        font: Font,
        position: Point,
        radius: f32,
        start_angle: f32,
        stop_angle: f32,
    },
    /// Circle outline, optionally filled.
    Circle {
        pen: Pen,
        position: Point,
        radius: f32,
    },
    /// Axis-aligned rectangle.
    Rect {
        pen: Pen,
        top_left: Point,
        bottom_right: Point,
    },
    /// Triangle through three points.
    Triangle {
        pen: Pen,
        a: Point,
        b: Point,
        c: Point,
    },
}

impl WidgetModel {
    /// Tag naming the variant, for logging and name-style lookups.
    pub fn kind(&self) -> &'static str {
        match self {
            WidgetModel::Group => "group",
            WidgetModel::Text { .. } => "text",
            WidgetModel::CircleText { .. } => "circle_text",
            WidgetModel::Circle { .. } => "circle",
            WidgetModel::Rect { .. } => "rect",
            WidgetModel::Triangle { .. } => "triangle",
        }
    }
}

/// A node in the scene graph.
///
/// `parent` is a back-reference by id, fixed at creation; the tree owns
/// every widget and the parent chain always terminates because a widget can
/// only be parented to an already-existing widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: WidgetId,
    /// Caller-supplied label; not required to be unique.
    pub name: String,
    pub model: WidgetModel,
    pub parent: Option<WidgetId>,
}

impl Widget {
    /// Tag of this widget's model variant.
    pub fn kind(&self) -> &'static str {
        self.model.kind()
    }
}
