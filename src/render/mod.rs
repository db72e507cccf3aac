//! Render dispatcher and drawing routines.
//!
//! [`render`] selects a routine from the widget's model variant and issues
//! the corresponding primitive calls against the view's drawing surface.
//! The match is exhaustive; adding a widget kind means adding a
//! [`WidgetModel`](crate::scene::WidgetModel) variant and an arm here.
//!
//! All routines are plain functions over a view, usable without the scene
//! graph. Every routine resolves the surface first and silently does
//! nothing while the view's target cannot be resolved; drawn state is
//! always bracketed in `save`/`restore` so no routine leaks surface
//! attributes into the next.

use std::f32::consts::FRAC_PI_2;

use unicode_segmentation::UnicodeSegmentation;

use crate::scene::{Widget, WidgetModel};
use crate::types::{Font, Pen, Point, TextAlign, TextBaseline};
use crate::view::{DrawingSurface, View};

/// Cap on the per-glyph angular step in [`circle_text`], in radians.
///
/// Dense text on a small arc would otherwise overlap; sparse text on a wide
/// arc is clamped to this step instead of spreading across the whole arc.
pub const MAX_GLYPH_STEP: f32 = 0.4;

/// Draw one widget according to its model variant.
///
/// `Group` widgets draw nothing. Render order across widgets is the
/// caller's; this function imposes none.
pub fn render<S: DrawingSurface>(view: &mut View<S>, widget: &Widget) {
    log::trace!("render {:?} kind={}", widget.id, widget.kind());

    match &widget.model {
        WidgetModel::Group => {}
        WidgetModel::Text {
            text: content,
            font,
            position,
        } => text(view, content, font, *position),
        WidgetModel::CircleText {
            text: content,
            font,
            position,
            radius,
            start_angle,
            stop_angle,
        } => circle_text(
            view,
            content,
            font,
            *position,
            *radius,
            *start_angle,
            *stop_angle,
        ),
        WidgetModel::Circle {
            pen,
            position,
            radius,
        } => circle(view, pen, *position, *radius),
        WidgetModel::Rect {
            pen,
            top_left,
            bottom_right,
        } => rect(view, pen, *top_left, *bottom_right),
        WidgetModel::Triangle { pen, a, b, c } => triangle(view, pen, *a, *b, *c),
    }
}

// =============================================================================
// Text
// =============================================================================

/// Measure the width of `text` under `font_string`.
///
/// Measurement happens inside a save/restore so the surface's current font
/// is untouched. Returns `None` while the surface is unresolved.
pub fn text_size<S: DrawingSurface>(view: &mut View<S>, font_string: &str, text: &str) -> Option<f32> {
    let surface = view.surface()?;

    surface.save();
    surface.set_font(font_string);
    let width = surface.measure_text(text);
    surface.restore();

    Some(width)
}

/// Draw `content` at `position` with the font descriptor's styles.
pub fn text<S: DrawingSurface>(view: &mut View<S>, content: &str, font: &Font, position: Point) {
    let Some(surface) = view.surface() else {
        return;
    };

    surface.save();

    surface.set_font(&font.font);
    surface.set_fill_style(&font.fill_style);
    surface.set_stroke_style(&font.stroke_style);
    surface.set_text_align(font.text_align);
    surface.set_text_baseline(font.text_baseline);

    surface.fill_text(content, position);
    surface.stroke_text(content, position);

    surface.restore();
}

/// Lay out `content` glyph-by-glyph along a circular arc around `position`.
///
/// Glyphs are placed from `start_angle` down to `stop_angle` (radians,
/// counter-clockwise-positive, y up), each translated onto the arc and
/// rotated to face outward. The per-glyph angular step is
/// `(start_angle - stop_angle) / (glyphs - 1)` clamped to
/// [`MAX_GLYPH_STEP`]; a single glyph sits at `start_angle`.
pub fn circle_text<S: DrawingSurface>(
    view: &mut View<S>,
    content: &str,
    font: &Font,
    position: Point,
    radius: f32,
    start_angle: f32,
    stop_angle: f32,
) {
    let glyphs: Vec<&str> = content.graphemes(true).collect();
    if glyphs.is_empty() {
        return;
    }

    let Some(surface) = view.surface() else {
        return;
    };

    // (glyphs - 1) is zero for a single glyph; the division saturates and
    // the clamp takes over.
    let step = ((start_angle - stop_angle) / (glyphs.len() as f32 - 1.0)).min(MAX_GLYPH_STEP);

    surface.save();

    surface.set_font(&font.font);
    surface.set_fill_style(&font.fill_style);
    surface.set_stroke_style(&font.stroke_style);

    // Glyphs are centered on their arc point regardless of the descriptor.
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);

    let mut angle = start_angle;
    for glyph in glyphs {
        surface.save();
        surface.begin_path();

        surface.translate(Point {
            x: position.x + angle.cos() * radius,
            y: position.y - angle.sin() * radius,
        });
        surface.rotate(FRAC_PI_2 - angle);

        surface.fill_text(glyph, Point::new(0.0, 0.0));
        surface.stroke_text(glyph, Point::new(0.0, 0.0));

        surface.restore();

        angle -= step;
    }

    surface.restore();
}

// =============================================================================
// Shapes
// =============================================================================

/// Push a pen's attributes onto the surface. Fill style only when present;
/// stroke style always.
fn apply_pen<S: DrawingSurface>(surface: &mut S, pen: &Pen) {
    surface.set_line_width(pen.line_width);
    if let Some(fill) = &pen.fill_style {
        surface.set_fill_style(fill);
    }
    surface.set_stroke_style(&pen.stroke_style);
}

/// Stroke the current path, and fill it when the pen has a fill style.
fn finish_path<S: DrawingSurface>(surface: &mut S, pen: &Pen) {
    surface.stroke();
    if pen.fill_style.is_some() {
        surface.fill();
    }
}

/// Draw a full circle around `position`.
pub fn circle<S: DrawingSurface>(view: &mut View<S>, pen: &Pen, position: Point, radius: f32) {
    let Some(surface) = view.surface() else {
        return;
    };

    surface.save();
    apply_pen(surface, pen);

    surface.begin_path();
    surface.arc(position, radius, 0.0, std::f32::consts::TAU, true);
    finish_path(surface, pen);

    surface.restore();
}

/// Draw an axis-aligned rectangle between two corners.
pub fn rect<S: DrawingSurface>(view: &mut View<S>, pen: &Pen, top_left: Point, bottom_right: Point) {
    let Some(surface) = view.surface() else {
        return;
    };

    surface.save();
    apply_pen(surface, pen);

    surface.begin_path();
    surface.move_to(top_left);
    surface.line_to(Point::new(bottom_right.x, top_left.y));
    surface.line_to(bottom_right);
    surface.line_to(Point::new(top_left.x, bottom_right.y));
    surface.close_path();

    finish_path(surface, pen);

    surface.restore();
}

/// Draw a triangle through three points.
pub fn triangle<S: DrawingSurface>(view: &mut View<S>, pen: &Pen, a: Point, b: Point, c: Point) {
    let Some(surface) = view.surface() else {
        return;
    };

    surface.save();
    apply_pen(surface, pen);

    surface.begin_path();
    surface.move_to(a);
    surface.line_to(b);
    surface.line_to(c);
    surface.close_path();

    finish_path(surface, pen);

    surface.restore();
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::WidgetTree;
    use crate::types::{font, pen};
    use crate::view::SurfaceBounds;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::f32::consts::PI;
    use std::rc::Rc;

    /// Every primitive call a routine can issue, in issue order.
    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Save,
        Restore,
        BeginPath,
        MoveTo(Point),
        LineTo(Point),
        ClosePath,
        Arc(Point, f32, f32, f32, bool),
        Stroke,
        Fill,
        LineWidth(f32),
        FillStyle(String),
        StrokeStyle(String),
        SetFont(String),
        Align(TextAlign),
        Baseline(TextBaseline),
        FillText(String, Point),
        StrokeText(String, Point),
        Translate(Point),
        Rotate(f32),
    }

    /// Surface that records every primitive call into a shared log.
    struct RecordingSurface {
        ops: Rc<RefCell<Vec<Op>>>,
    }

    impl DrawingSurface for RecordingSurface {
        fn width(&self) -> f32 {
            100.0
        }
        fn height(&self) -> f32 {
            100.0
        }
        fn physical_bounds(&self) -> SurfaceBounds {
            SurfaceBounds {
                left: 0.0,
                top: 0.0,
                width: 100.0,
                height: 100.0,
            }
        }
        fn save(&mut self) {
            self.ops.borrow_mut().push(Op::Save);
        }
        fn restore(&mut self) {
            self.ops.borrow_mut().push(Op::Restore);
        }
        fn begin_path(&mut self) {
            self.ops.borrow_mut().push(Op::BeginPath);
        }
        fn move_to(&mut self, p: Point) {
            self.ops.borrow_mut().push(Op::MoveTo(p));
        }
        fn line_to(&mut self, p: Point) {
            self.ops.borrow_mut().push(Op::LineTo(p));
        }
        fn close_path(&mut self) {
            self.ops.borrow_mut().push(Op::ClosePath);
        }
        fn arc(&mut self, center: Point, radius: f32, start: f32, stop: f32, ccw: bool) {
            self.ops
                .borrow_mut()
                .push(Op::Arc(center, radius, start, stop, ccw));
        }
        fn stroke(&mut self) {
            self.ops.borrow_mut().push(Op::Stroke);
        }
        fn fill(&mut self) {
            self.ops.borrow_mut().push(Op::Fill);
        }
        fn set_line_width(&mut self, width: f32) {
            self.ops.borrow_mut().push(Op::LineWidth(width));
        }
        fn set_fill_style(&mut self, style: &str) {
            self.ops.borrow_mut().push(Op::FillStyle(style.to_string()));
        }
        fn set_stroke_style(&mut self, style: &str) {
            self.ops
                .borrow_mut()
                .push(Op::StrokeStyle(style.to_string()));
        }
        fn set_font(&mut self, spec: &str) {
            self.ops.borrow_mut().push(Op::SetFont(spec.to_string()));
        }
        fn set_text_align(&mut self, align: TextAlign) {
            self.ops.borrow_mut().push(Op::Align(align));
        }
        fn set_text_baseline(&mut self, baseline: TextBaseline) {
            self.ops.borrow_mut().push(Op::Baseline(baseline));
        }
        fn fill_text(&mut self, content: &str, p: Point) {
            self.ops
                .borrow_mut()
                .push(Op::FillText(content.to_string(), p));
        }
        fn stroke_text(&mut self, content: &str, p: Point) {
            self.ops
                .borrow_mut()
                .push(Op::StrokeText(content.to_string(), p));
        }
        fn measure_text(&mut self, content: &str) -> f32 {
            content.graphemes(true).count() as f32 * 10.0
        }
        fn translate(&mut self, offset: Point) {
            self.ops.borrow_mut().push(Op::Translate(offset));
        }
        fn rotate(&mut self, radians: f32) {
            self.ops.borrow_mut().push(Op::Rotate(radians));
        }
    }

    fn recording_view() -> (View<RecordingSurface>, Rc<RefCell<Vec<Op>>>) {
        let ops = Rc::new(RefCell::new(Vec::new()));
        let ops_clone = ops.clone();
        let view = View::new("main", move |_| {
            Some(RecordingSurface {
                ops: ops_clone.clone(),
            })
        });
        (view, ops)
    }

    fn test_font() -> Font {
        font("serif", 12.0, "white", "black", None, None)
    }

    #[test]
    fn test_render_text_widget_uses_model_fields() {
        let (mut view, ops) = recording_view();

        let mut tree = WidgetTree::new();
        let id = tree.create(
            "label",
            WidgetModel::Text {
                text: "hello".to_string(),
                font: test_font(),
                position: Point::new(10.0, 20.0),
            },
        );

        render(&mut view, tree.get(id).unwrap());

        let ops = ops.borrow();
        assert_eq!(
            *ops,
            vec![
                Op::Save,
                Op::SetFont("12pt serif".to_string()),
                Op::FillStyle("white".to_string()),
                Op::StrokeStyle("black".to_string()),
                Op::Align(TextAlign::Left),
                Op::Baseline(TextBaseline::Top),
                Op::FillText("hello".to_string(), Point::new(10.0, 20.0)),
                Op::StrokeText("hello".to_string(), Point::new(10.0, 20.0)),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_render_group_is_noop() {
        let (mut view, ops) = recording_view();

        let mut tree = WidgetTree::new();
        let id = tree.create("container", WidgetModel::Group);

        render(&mut view, tree.get(id).unwrap());
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn test_unresolved_surface_is_noop() {
        let mut view: View<RecordingSurface> = View::new("missing", |_| None);

        text(&mut view, "x", &test_font(), Point::new(0.0, 0.0));
        circle(&mut view, &pen(1.0, None, None), Point::new(0.0, 0.0), 5.0);
        assert_eq!(text_size(&mut view, "12pt serif", "x"), None);
    }

    #[test]
    fn test_text_size_measures_under_save_restore() {
        let (mut view, ops) = recording_view();

        let width = text_size(&mut view, "12pt serif", "abc");
        assert_eq!(width, Some(30.0));
        assert_eq!(
            *ops.borrow(),
            vec![
                Op::Save,
                Op::SetFont("12pt serif".to_string()),
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_circle_strokes_then_fills_when_pen_fills() {
        let (mut view, ops) = recording_view();

        circle(
            &mut view,
            &pen(2.0, Some("red"), Some("blue")),
            Point::new(5.0, 6.0),
            7.0,
        );

        let ops = ops.borrow();
        assert_eq!(
            *ops,
            vec![
                Op::Save,
                Op::LineWidth(2.0),
                Op::FillStyle("red".to_string()),
                Op::StrokeStyle("blue".to_string()),
                Op::BeginPath,
                Op::Arc(Point::new(5.0, 6.0), 7.0, 0.0, std::f32::consts::TAU, true),
                Op::Stroke,
                Op::Fill,
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_fill_skipped_without_fill_style() {
        let (mut view, ops) = recording_view();

        circle(&mut view, &pen(1.0, None, None), Point::new(0.0, 0.0), 3.0);

        let ops = ops.borrow();
        assert!(ops.contains(&Op::Stroke));
        assert!(!ops.contains(&Op::Fill));
        assert!(!ops.iter().any(|op| matches!(op, Op::FillStyle(_))));
    }

    #[test]
    fn test_rect_path_corners_and_stroke() {
        let (mut view, ops) = recording_view();

        rect(
            &mut view,
            &pen(1.0, Some("gray"), None),
            Point::new(1.0, 2.0),
            Point::new(11.0, 22.0),
        );

        let ops = ops.borrow();
        assert_eq!(
            *ops,
            vec![
                Op::Save,
                Op::LineWidth(1.0),
                Op::FillStyle("gray".to_string()),
                Op::StrokeStyle("black".to_string()),
                Op::BeginPath,
                Op::MoveTo(Point::new(1.0, 2.0)),
                Op::LineTo(Point::new(11.0, 2.0)),
                Op::LineTo(Point::new(11.0, 22.0)),
                Op::LineTo(Point::new(1.0, 22.0)),
                Op::ClosePath,
                Op::Stroke,
                Op::Fill,
                Op::Restore,
            ]
        );
    }

    #[test]
    fn test_triangle_path_and_stroke() {
        let (mut view, ops) = recording_view();

        let (a, b, c) = (
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 8.0),
        );
        triangle(&mut view, &pen(1.0, None, None), a, b, c);

        let ops = ops.borrow();
        assert_eq!(
            ops.iter()
                .filter(|op| matches!(op, Op::MoveTo(_) | Op::LineTo(_)))
                .cloned()
                .collect::<Vec<_>>(),
            vec![Op::MoveTo(a), Op::LineTo(b), Op::LineTo(c)]
        );
        assert!(ops.contains(&Op::ClosePath));
        assert!(ops.contains(&Op::Stroke));
        assert!(!ops.contains(&Op::Fill));
    }

    fn rotations(ops: &[Op]) -> Vec<f32> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Rotate(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_circle_text_step_clamped_to_cap() {
        let (mut view, ops) = recording_view();

        // Five glyphs from pi to 0: raw step pi/4 exceeds the 0.4 cap.
        circle_text(
            &mut view,
            "abcde",
            &test_font(),
            Point::new(0.0, 0.0),
            10.0,
            PI,
            0.0,
        );

        let ops = ops.borrow();
        let drawn: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, Op::FillText(..)))
            .collect();
        assert_eq!(drawn.len(), 5);

        // Rotation is pi/2 - angle, so successive rotations differ by the
        // clamped step.
        let rotations = rotations(&ops);
        assert_eq!(rotations.len(), 5);
        assert_relative_eq!(rotations[0], FRAC_PI_2 - PI, epsilon = 1e-6);
        for pair in rotations.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], MAX_GLYPH_STEP, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_circle_text_uses_raw_step_when_under_cap() {
        let (mut view, ops) = recording_view();

        // Five glyphs over one radian: raw step 0.25 is below the cap.
        circle_text(
            &mut view,
            "abcde",
            &test_font(),
            Point::new(0.0, 0.0),
            10.0,
            1.0,
            0.0,
        );

        let rotations = rotations(&ops.borrow());
        for pair in rotations.windows(2) {
            assert_relative_eq!(pair[1] - pair[0], 0.25, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_circle_text_glyph_placement_on_arc() {
        let (mut view, ops) = recording_view();

        let center = Point::new(50.0, 40.0);
        circle_text(&mut view, "ab", &test_font(), center, 10.0, PI, 0.0);

        let ops = ops.borrow();
        let translates: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::Translate(p) => Some(*p),
                _ => None,
            })
            .collect();
        assert_eq!(translates.len(), 2);

        // First glyph at angle pi: (x + cos(pi)*r, y - sin(pi)*r).
        assert_relative_eq!(translates[0].x, center.x - 10.0, epsilon = 1e-4);
        assert_relative_eq!(translates[0].y, center.y, epsilon = 1e-4);

        // Glyphs are centered on the arc point.
        assert!(ops.contains(&Op::Align(TextAlign::Center)));
        assert!(ops.contains(&Op::Baseline(TextBaseline::Middle)));
    }

    #[test]
    fn test_circle_text_single_glyph_clamps_step() {
        let (mut view, ops) = recording_view();

        // One glyph divides by zero glyph gaps; the cap absorbs it.
        circle_text(
            &mut view,
            "a",
            &test_font(),
            Point::new(0.0, 0.0),
            5.0,
            PI,
            0.0,
        );

        let ops = ops.borrow();
        let drawn: Vec<_> = ops
            .iter()
            .filter(|op| matches!(op, Op::FillText(..)))
            .collect();
        assert_eq!(drawn.len(), 1);

        let rotations = rotations(&ops);
        assert_relative_eq!(rotations[0], FRAC_PI_2 - PI, epsilon = 1e-6);
    }

    #[test]
    fn test_circle_text_empty_is_noop() {
        let (mut view, ops) = recording_view();

        circle_text(
            &mut view,
            "",
            &test_font(),
            Point::new(0.0, 0.0),
            5.0,
            PI,
            0.0,
        );
        assert!(ops.borrow().is_empty());
    }

    #[test]
    fn test_circle_text_iterates_grapheme_clusters() {
        let (mut view, ops) = recording_view();

        // Two grapheme clusters, more than two chars.
        circle_text(
            &mut view,
            "e\u{301}a",
            &test_font(),
            Point::new(0.0, 0.0),
            5.0,
            1.0,
            0.0,
        );

        let ops = ops.borrow();
        let drawn: Vec<_> = ops
            .iter()
            .filter_map(|op| match op {
                Op::FillText(glyph, _) => Some(glyph.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(drawn, vec!["e\u{301}".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_render_dispatches_every_shape_variant() {
        let mut tree = WidgetTree::new();
        let shape_pen = pen(1.0, None, None);

        let circle_id = tree.create(
            "c",
            WidgetModel::Circle {
                pen: shape_pen.clone(),
                position: Point::new(1.0, 1.0),
                radius: 2.0,
            },
        );
        let rect_id = tree.create(
            "r",
            WidgetModel::Rect {
                pen: shape_pen.clone(),
                top_left: Point::new(0.0, 0.0),
                bottom_right: Point::new(4.0, 4.0),
            },
        );
        let tri_id = tree.create(
            "t",
            WidgetModel::Triangle {
                pen: shape_pen,
                a: Point::new(0.0, 0.0),
                b: Point::new(1.0, 0.0),
                c: Point::new(0.0, 1.0),
            },
        );

        let (mut view, ops) = recording_view();
        render(&mut view, tree.get(circle_id).unwrap());
        assert!(ops.borrow().iter().any(|op| matches!(op, Op::Arc(..))));

        ops.borrow_mut().clear();
        render(&mut view, tree.get(rect_id).unwrap());
        assert_eq!(
            ops.borrow()
                .iter()
                .filter(|op| matches!(op, Op::LineTo(_)))
                .count(),
            3
        );

        ops.borrow_mut().clear();
        render(&mut view, tree.get(tri_id).unwrap());
        assert!(ops.borrow().contains(&Op::ClosePath));
    }
}
