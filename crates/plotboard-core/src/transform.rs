//! Scale-about-anchor and translate operations for shapes.
//!
//! Every function returns a new value and never mutates its input, so a
//! drag preview can be recomputed from the original shape on every pointer
//! move and undo inverses stay trivial to reason about.

use kurbo::{Circle, Line, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::shapes::Polygon;

/// One of the eight scale-handle identities on a bounding rectangle: four
/// corners plus four edge midpoints. During a scale the point diametrically
/// opposite the anchor stays fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleAnchor {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl ScaleAnchor {
    /// All eight anchors, in clockwise order from the top-left corner.
    pub const ALL: [ScaleAnchor; 8] = [
        ScaleAnchor::TopLeft,
        ScaleAnchor::Top,
        ScaleAnchor::TopRight,
        ScaleAnchor::Right,
        ScaleAnchor::BottomRight,
        ScaleAnchor::Bottom,
        ScaleAnchor::BottomLeft,
        ScaleAnchor::Left,
    ];

    /// The anchor's position on the unit square, `(0,0)` = top-left.
    pub fn unit(self) -> (f64, f64) {
        match self {
            ScaleAnchor::TopLeft => (0.0, 0.0),
            ScaleAnchor::Top => (0.5, 0.0),
            ScaleAnchor::TopRight => (1.0, 0.0),
            ScaleAnchor::Right => (1.0, 0.5),
            ScaleAnchor::BottomRight => (1.0, 1.0),
            ScaleAnchor::Bottom => (0.5, 1.0),
            ScaleAnchor::BottomLeft => (0.0, 1.0),
            ScaleAnchor::Left => (0.0, 0.5),
        }
    }

    /// The diametrically opposed anchor — the fixed point of a scale.
    pub fn opposite(self) -> ScaleAnchor {
        match self {
            ScaleAnchor::TopLeft => ScaleAnchor::BottomRight,
            ScaleAnchor::Top => ScaleAnchor::Bottom,
            ScaleAnchor::TopRight => ScaleAnchor::BottomLeft,
            ScaleAnchor::Right => ScaleAnchor::Left,
            ScaleAnchor::BottomRight => ScaleAnchor::TopLeft,
            ScaleAnchor::Bottom => ScaleAnchor::Top,
            ScaleAnchor::BottomLeft => ScaleAnchor::TopRight,
            ScaleAnchor::Left => ScaleAnchor::Right,
        }
    }

    /// Whether dragging this anchor changes the horizontal extent.
    pub fn scales_x(self) -> bool {
        !matches!(self, ScaleAnchor::Top | ScaleAnchor::Bottom)
    }

    /// Whether dragging this anchor changes the vertical extent.
    pub fn scales_y(self) -> bool {
        !matches!(self, ScaleAnchor::Left | ScaleAnchor::Right)
    }

    /// This anchor's position on a rectangle.
    pub fn position_on(self, rect: Rect) -> Point {
        let (u, v) = self.unit();
        Point::new(
            rect.x0 + u * (rect.x1 - rect.x0),
            rect.y0 + v * (rect.y1 - rect.y0),
        )
    }
}

/// One discrete, committable edit to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformOp {
    /// Translate by a delta in virtual units.
    Move { delta: Vec2 },
    /// Scale by a per-axis factor, anchored at one of the eight handles.
    Scale { anchor: ScaleAnchor, factor: Vec2 },
    /// Rotate by an angle in radians around the item's center.
    Rotate { angle: f64 },
}

impl TransformOp {
    /// The operation that exactly reverses this one.
    ///
    /// A zero scale factor cannot be inverted by reciprocal; it degrades to
    /// zero so the inverse stays finite (the item collapses either way).
    pub fn inverse(self) -> TransformOp {
        match self {
            TransformOp::Move { delta } => TransformOp::Move { delta: -delta },
            TransformOp::Scale { anchor, factor } => {
                let invert = |f: f64| if f == 0.0 { 0.0 } else { 1.0 / f };
                TransformOp::Scale {
                    anchor,
                    factor: Vec2::new(invert(factor.x), invert(factor.y)),
                }
            }
            TransformOp::Rotate { angle } => TransformOp::Rotate { angle: -angle },
        }
    }
}

/// Scale a rectangle about an anchor.
///
/// The point diametrically opposite the anchor is held fixed; the new
/// origin falls out of the anchor identity and the scaled extents. A factor
/// of `(1, 1)` returns the input unchanged for every anchor.
pub fn scale_rect(rect: Rect, factor: Vec2, anchor: ScaleAnchor) -> Rect {
    let new_w = rect.width() * factor.x;
    let new_h = rect.height() * factor.y;
    let (u, v) = anchor.unit();
    let fixed = anchor.opposite().position_on(rect);
    // The scaled rect's own opposite-anchor point must coincide with the
    // fixed point.
    let x0 = fixed.x - (1.0 - u) * new_w;
    let y0 = fixed.y - (1.0 - v) * new_h;
    Rect::new(x0, y0, x0 + new_w, y0 + new_h)
}

/// Scale a circle about an anchor, staying a perfect circle.
///
/// The circle's enclosing square is scaled like a rectangle, then center and
/// radius are recomputed from the result. `min(width, height) / 2` keeps the
/// aspect locked, and taking absolute extents corrects the sign when an
/// inverted drag pushes a dimension negative.
pub fn scale_circle(circle: Circle, factor: Vec2, anchor: ScaleAnchor) -> Circle {
    let square = Rect::new(
        circle.center.x - circle.radius,
        circle.center.y - circle.radius,
        circle.center.x + circle.radius,
        circle.center.y + circle.radius,
    );
    let scaled = scale_rect(square, factor, anchor);
    let center = Point::new((scaled.x0 + scaled.x1) / 2.0, (scaled.y0 + scaled.y1) / 2.0);
    let radius = (scaled.x1 - scaled.x0)
        .abs()
        .min((scaled.y1 - scaled.y0).abs())
        / 2.0;
    Circle::new(center, radius)
}

/// Scale a polygon about an anchor.
///
/// Every vertex is mapped by the same per-axis factor relative to the
/// bounding box origin, then re-anchored at the scaled box's origin. No
/// aspect lock.
pub fn scale_polygon(polygon: &Polygon, factor: Vec2, anchor: ScaleAnchor) -> Polygon {
    let bounds = polygon.bounds();
    let scaled = scale_rect(bounds, factor, anchor);
    let mapped = polygon
        .points()
        .iter()
        .map(|&p| {
            Point::new(
                scaled.x0 + (p.x - bounds.x0) * factor.x,
                scaled.y0 + (p.y - bounds.y0) * factor.y,
            )
        })
        .collect();
    Polygon::new(mapped)
}

/// Translate a rectangle by a delta.
pub fn translate_rect(rect: Rect, delta: Vec2) -> Rect {
    Rect::new(
        rect.x0 + delta.x,
        rect.y0 + delta.y,
        rect.x1 + delta.x,
        rect.y1 + delta.y,
    )
}

/// Translate a circle by a delta.
pub fn translate_circle(circle: Circle, delta: Vec2) -> Circle {
    Circle::new(circle.center + delta, circle.radius)
}

/// Translate a line segment by a delta.
pub fn translate_line(line: Line, delta: Vec2) -> Line {
    Line::new(line.p0 + delta, line.p1 + delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_scale_for_every_anchor() {
        let rect = Rect::new(3.0, -2.0, 15.0, 9.0);
        for anchor in ScaleAnchor::ALL {
            let scaled = scale_rect(rect, Vec2::new(1.0, 1.0), anchor);
            assert!((scaled.x0 - rect.x0).abs() < 1e-12, "{anchor:?}");
            assert!((scaled.y0 - rect.y0).abs() < 1e-12, "{anchor:?}");
            assert!((scaled.x1 - rect.x1).abs() < 1e-12, "{anchor:?}");
            assert!((scaled.y1 - rect.y1).abs() < 1e-12, "{anchor:?}");
        }
    }

    #[test]
    fn test_scale_rect_top_left_anchor() {
        // Anchored top-left, the bottom-right corner stays fixed: doubling
        // the width pushes the origin left of zero.
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scaled = scale_rect(rect, Vec2::new(2.0, 1.0), ScaleAnchor::TopLeft);
        assert!((scaled.x0 + 10.0).abs() < 1e-12);
        assert!((scaled.y0).abs() < 1e-12);
        assert!((scaled.width() - 20.0).abs() < 1e-12);
        assert!((scaled.height() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_rect_bottom_right_anchor() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scaled = scale_rect(rect, Vec2::new(2.0, 3.0), ScaleAnchor::BottomRight);
        // Top-left stays fixed.
        assert!((scaled.x0).abs() < 1e-12);
        assert!((scaled.y0).abs() < 1e-12);
        assert!((scaled.width() - 20.0).abs() < 1e-12);
        assert!((scaled.height() - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_rect_edge_anchor_keeps_center_axis() {
        // Dragging the bottom edge keeps the top edge fixed and the
        // horizontal center in place.
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let scaled = scale_rect(rect, Vec2::new(1.0, 2.0), ScaleAnchor::Bottom);
        assert!((scaled.y0).abs() < 1e-12);
        assert!((scaled.height() - 20.0).abs() < 1e-12);
        assert!((scaled.x0).abs() < 1e-12);
        assert!((scaled.x1 - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_circle_roundtrip() {
        let circle = Circle::new(Point::new(5.0, 5.0), 4.0);
        let factor = Vec2::new(2.0, 2.0);
        let grown = scale_circle(circle, factor, ScaleAnchor::BottomRight);
        let back = scale_circle(grown, Vec2::new(1.0 / factor.x, 1.0 / factor.y), ScaleAnchor::BottomRight);
        assert!((back.center.x - circle.center.x).abs() < 1e-9);
        assert!((back.center.y - circle.center.y).abs() < 1e-9);
        assert!((back.radius - circle.radius).abs() < 1e-9);
    }

    #[test]
    fn test_scale_circle_aspect_lock() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let scaled = scale_circle(circle, Vec2::new(3.0, 1.0), ScaleAnchor::Right);
        // The smaller extent wins so the result stays a circle.
        assert!((scaled.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_scale_circle_inverted_drag() {
        let circle = Circle::new(Point::new(0.0, 0.0), 5.0);
        let scaled = scale_circle(circle, Vec2::new(-1.0, 1.0), ScaleAnchor::Right);
        assert!(scaled.radius > 0.0);
    }

    #[test]
    fn test_scale_polygon_vertices() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]);
        let scaled = scale_polygon(&poly, Vec2::new(2.0, 1.0), ScaleAnchor::BottomRight);
        assert_eq!(scaled.points()[0], Point::new(0.0, 0.0));
        assert_eq!(scaled.points()[1], Point::new(20.0, 0.0));
        assert_eq!(scaled.points()[2], Point::new(20.0, 10.0));
    }

    #[test]
    fn test_move_inverse_negates_delta() {
        let op = TransformOp::Move {
            delta: Vec2::new(4.0, -7.0),
        };
        let TransformOp::Move { delta } = op.inverse() else {
            panic!("inverse changed the variant");
        };
        assert_eq!(delta, Vec2::new(-4.0, 7.0));
    }

    #[test]
    fn test_scale_inverse_reciprocal_with_zero_guard() {
        let op = TransformOp::Scale {
            anchor: ScaleAnchor::Top,
            factor: Vec2::new(2.0, 0.0),
        };
        let TransformOp::Scale { anchor, factor } = op.inverse() else {
            panic!("inverse changed the variant");
        };
        assert_eq!(anchor, ScaleAnchor::Top);
        assert!((factor.x - 0.5).abs() < 1e-12);
        assert_eq!(factor.y, 0.0);
    }

    #[test]
    fn test_rotate_inverse_negates_angle() {
        let op = TransformOp::Rotate { angle: 1.25 };
        let TransformOp::Rotate { angle } = op.inverse() else {
            panic!("inverse changed the variant");
        };
        assert!((angle + 1.25).abs() < 1e-12);
    }
}
