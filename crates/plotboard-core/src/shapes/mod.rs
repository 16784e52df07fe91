//! Drawable shape value types.

mod polygon;

pub use polygon::Polygon;

use kurbo::{Circle, Line, Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::transform::{self, ScaleAnchor, TransformOp};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties applied when drawing an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in virtual units.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl ItemStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    /// Set the stroke color from a peniko Color.
    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    /// Set the fill color from a peniko Color.
    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }
}

impl Default for ItemStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            fill_color: None,
        }
    }
}

/// A drawable shape.
///
/// Transform support is capability-based and varies by kind: everything
/// moves, segments cannot be scaled through the handle box, and the
/// axis-aligned rectangle and circle cannot represent a rotation. Callers
/// check `supports_*` before offering the matching gesture; applying an
/// unsupported transform is a silent no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line(Line),
    Rect(Rect),
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    /// Bounding rectangle in virtual coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Line(line) => geometry::segment_bounds(*line),
            Shape::Rect(rect) => *rect,
            Shape::Circle(circle) => geometry::circle_bounds(*circle),
            Shape::Polygon(polygon) => polygon.bounds(),
        }
    }

    /// Test whether a point (in virtual coordinates) hits this shape.
    ///
    /// Filled kinds hit anywhere inside (boundary inclusive); a segment
    /// hits within `tolerance` of itself.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Line(line) => geometry::point_to_segment_dist(point, *line) <= tolerance,
            Shape::Rect(rect) => geometry::point_in_rect(point, rect.inflate(tolerance, tolerance)),
            Shape::Circle(circle) => geometry::point_in_circle(
                point,
                Circle::new(circle.center, circle.radius + tolerance),
            ),
            Shape::Polygon(polygon) => {
                polygon.contains(point)
                    || polygon
                        .edges()
                        .any(|e| geometry::point_to_segment_dist(point, e) <= tolerance)
            }
        }
    }

    /// Test whether this shape overlaps another.
    pub fn intersects(&self, other: &Shape) -> bool {
        use Shape::*;
        match (self, other) {
            (Line(a), Line(b)) => geometry::segments_intersect(*a, *b),
            (Line(l), Rect(r)) | (Rect(r), Line(l)) => geometry::segment_intersects_rect(*l, *r),
            (Line(l), Circle(c)) | (Circle(c), Line(l)) => {
                geometry::point_in_circle(l.p0, *c)
                    || geometry::point_in_circle(l.p1, *c)
                    || geometry::circle_intersects_segment(*c, *l)
            }
            (Line(l), Polygon(p)) | (Polygon(p), Line(l)) => {
                p.contains(l.p0)
                    || p.contains(l.p1)
                    || p.edges().any(|e| geometry::segments_intersect(*l, e))
            }
            (Rect(a), Rect(b)) => geometry::rect_intersects_rect(*a, *b),
            (Rect(r), Circle(c)) | (Circle(c), Rect(r)) => geometry::rect_intersects_circle(*r, *c),
            (Rect(r), Polygon(p)) | (Polygon(p), Rect(r)) => {
                geometry::rect_intersects_polygon(*r, p)
            }
            (Circle(a), Circle(b)) => geometry::circle_intersects_circle(*a, *b),
            (Circle(c), Polygon(p)) | (Polygon(p), Circle(c)) => {
                geometry::circle_intersects_polygon(*c, p)
            }
            (Polygon(a), Polygon(b)) => geometry::polygon_intersects_polygon(a, b),
        }
    }

    /// Whether this shape can be translated.
    pub fn supports_move(&self) -> bool {
        true
    }

    /// Whether this shape can be scaled through the handle box.
    pub fn supports_scale(&self) -> bool {
        !matches!(self, Shape::Line(_))
    }

    /// Whether this shape can represent a rotation.
    pub fn supports_rotation(&self) -> bool {
        matches!(self, Shape::Line(_) | Shape::Polygon(_))
    }

    /// Translate by a delta.
    pub fn apply_move(&mut self, delta: Vec2) {
        match self {
            Shape::Line(line) => *line = transform::translate_line(*line, delta),
            Shape::Rect(rect) => *rect = transform::translate_rect(*rect, delta),
            Shape::Circle(circle) => *circle = transform::translate_circle(*circle, delta),
            Shape::Polygon(polygon) => *polygon = polygon.translated(delta),
        }
    }

    /// Scale about an anchor. No-op for kinds without scale support.
    pub fn apply_scale(&mut self, factor: Vec2, anchor: ScaleAnchor) {
        match self {
            Shape::Rect(rect) => *rect = transform::scale_rect(*rect, factor, anchor),
            Shape::Circle(circle) => *circle = transform::scale_circle(*circle, factor, anchor),
            Shape::Polygon(polygon) => *polygon = transform::scale_polygon(polygon, factor, anchor),
            Shape::Line(_) => {}
        }
    }

    /// Rotate around the shape's own center. No-op for kinds without
    /// rotation support.
    pub fn apply_rotation(&mut self, angle: f64) {
        let pivot = self.bounds().center();
        match self {
            Shape::Line(line) => {
                *line = Line::new(
                    geometry::rotate_about(line.p0, pivot, angle),
                    geometry::rotate_about(line.p1, pivot, angle),
                );
            }
            Shape::Polygon(polygon) => *polygon = polygon.rotated_about(pivot, angle),
            Shape::Rect(_) | Shape::Circle(_) => {}
        }
    }

    /// Apply one committed transform operation through the capability
    /// methods. Unsupported operations are silently skipped.
    pub fn apply_op(&mut self, op: TransformOp) {
        match op {
            TransformOp::Move { delta } => {
                if self.supports_move() {
                    self.apply_move(delta);
                }
            }
            TransformOp::Scale { anchor, factor } => {
                if self.supports_scale() {
                    self.apply_scale(factor, anchor);
                }
            }
            TransformOp::Rotate { angle } => {
                if self.supports_rotation() {
                    self.apply_rotation(angle);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_per_kind() {
        let line = Shape::Line(Line::new(Point::new(5.0, 1.0), Point::new(-2.0, 4.0)));
        assert_eq!(line.bounds(), Rect::new(-2.0, 1.0, 5.0, 4.0));

        let circle = Shape::Circle(Circle::new(Point::new(0.0, 0.0), 2.0));
        assert_eq!(circle.bounds(), Rect::new(-2.0, -2.0, 2.0, 2.0));
    }

    #[test]
    fn test_hit_test_line_tolerance() {
        let line = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        assert!(line.hit_test(Point::new(5.0, 2.0), 3.0));
        assert!(!line.hit_test(Point::new(5.0, 4.0), 3.0));
    }

    #[test]
    fn test_capabilities() {
        let line = Shape::Line(Line::new(Point::ZERO, Point::new(1.0, 1.0)));
        assert!(line.supports_move());
        assert!(!line.supports_scale());
        assert!(line.supports_rotation());

        let rect = Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(rect.supports_scale());
        assert!(!rect.supports_rotation());

        let circle = Shape::Circle(Circle::new(Point::ZERO, 1.0));
        assert!(circle.supports_scale());
        assert!(!circle.supports_rotation());
    }

    #[test]
    fn test_apply_move() {
        let mut shape = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        shape.apply_move(Vec2::new(5.0, -5.0));
        assert_eq!(shape.bounds(), Rect::new(5.0, -5.0, 15.0, 5.0));
    }

    #[test]
    fn test_unsupported_scale_is_skipped() {
        let mut shape = Shape::Line(Line::new(Point::ZERO, Point::new(10.0, 0.0)));
        let before = shape.clone();
        shape.apply_op(TransformOp::Scale {
            anchor: ScaleAnchor::BottomRight,
            factor: Vec2::new(2.0, 2.0),
        });
        assert_eq!(shape, before);
    }

    #[test]
    fn test_rotate_line_about_midpoint() {
        let mut shape = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        shape.apply_rotation(std::f64::consts::PI);
        let Shape::Line(line) = shape else {
            panic!("shape changed kind");
        };
        assert!((line.p0.x - 10.0).abs() < 1e-9);
        assert!((line.p1.x).abs() < 1e-9);
    }

    #[test]
    fn test_intersects_dispatch() {
        let rect = Shape::Rect(Rect::new(0.0, 0.0, 10.0, 10.0));
        let circle = Shape::Circle(Circle::new(Point::new(5.0, 5.0), 1.0));
        assert!(rect.intersects(&circle));
        assert!(circle.intersects(&rect));

        let far = Shape::Circle(Circle::new(Point::new(100.0, 100.0), 1.0));
        assert!(!rect.intersects(&far));
    }

    #[test]
    fn test_style_defaults() {
        let style = ItemStyle::default();
        assert_eq!(style.stroke_color, SerializableColor::black());
        assert!((style.stroke_width - 1.0).abs() < f64::EPSILON);
        assert!(style.fill_color.is_none());
    }
}
