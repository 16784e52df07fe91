//! Pure geometry and collision queries over points, segments, rectangles,
//! circles and polygons.
//!
//! Every function here is deterministic and side-effect-free, and must stay
//! panic-free on degenerate input: parallel segments, zero-length edges and
//! zero-radius circles all degrade to a defined boolean or numeric result.
//! Boundaries are inclusive throughout (a point exactly on an edge counts as
//! contained).

use crate::shapes::Polygon;
use kurbo::{Circle, Line, Point, Rect, Vec2};

/// Tolerance for "exactly on a line/edge" tests.
pub const ON_EDGE_EPSILON: f64 = 1e-9;

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

/// Squared Euclidean distance between two points.
pub fn distance_squared(a: Point, b: Point) -> f64 {
    (b - a).hypot2()
}

/// Distance from a point to a line segment.
pub fn point_to_segment_dist(point: Point, seg: Line) -> f64 {
    let dir = seg.p1 - seg.p0;
    let pv = point - seg.p0;
    let len_sq = dir.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(dir) / len_sq).clamp(0.0, 1.0);
    let proj = seg.p0 + dir * t;
    (point - proj).hypot()
}

/// Test whether two line segments intersect.
///
/// Solves the two-segment parametric system and accepts only intersections
/// where both interpolation parameters lie in `[0, 1]`. Parallel or
/// zero-length segments make the denominator zero; the resulting NaN
/// parameters fail the range check, so the function returns `false` instead
/// of panicking.
pub fn segments_intersect(a: Line, b: Line) -> bool {
    let d1 = a.p1 - a.p0;
    let d2 = b.p1 - b.p0;
    let denom = d1.x * d2.y - d1.y * d2.x;
    let offset = b.p0 - a.p0;
    let t = (offset.x * d2.y - offset.y * d2.x) / denom;
    let u = (offset.x * d1.y - offset.y * d1.x) / denom;
    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Test whether a point lies inside a rectangle. The boundary counts.
pub fn point_in_rect(point: Point, rect: Rect) -> bool {
    let (x0, x1) = (rect.x0.min(rect.x1), rect.x0.max(rect.x1));
    let (y0, y1) = (rect.y0.min(rect.y1), rect.y0.max(rect.y1));
    point.x >= x0 && point.x <= x1 && point.y >= y0 && point.y <= y1
}

/// Test whether a point lies inside a circle. The boundary counts.
///
/// Compares squared distances so the test is exact for points on the rim.
pub fn point_in_circle(point: Point, circle: Circle) -> bool {
    distance_squared(point, circle.center) <= circle.radius * circle.radius
}

/// Test whether a point lies on a line segment.
///
/// Vertical segments (undefined slope) are handled as a special case;
/// otherwise the point must satisfy the line equation within tolerance and
/// fall inside the bounding box of the two endpoints.
pub fn point_on_segment(point: Point, seg: Line) -> bool {
    let bounds = segment_bounds(seg);
    if !point_in_rect(point, bounds.inflate(ON_EDGE_EPSILON, ON_EDGE_EPSILON)) {
        return false;
    }
    let dx = seg.p1.x - seg.p0.x;
    if dx.abs() < ON_EDGE_EPSILON {
        // Vertical: the bounding-box check already constrained y.
        return (point.x - seg.p0.x).abs() <= ON_EDGE_EPSILON;
    }
    let slope = (seg.p1.y - seg.p0.y) / dx;
    let expected_y = seg.p0.y + slope * (point.x - seg.p0.x);
    (point.y - expected_y).abs() <= ON_EDGE_EPSILON * (1.0 + slope.abs())
}

/// Test whether a point lies inside a polygon, by ray casting.
///
/// Conceptually a horizontal ray is cast from strictly left of the polygon's
/// bounding box through the test point and crossings with each edge are
/// counted; an odd count means inside. A crossing through a shared vertex is
/// attributed only to the edge whose far endpoint lies above the ray, so it
/// is never double-counted. Points coincident with a vertex or lying on an
/// edge are always inside (the boundary is inclusive).
pub fn point_in_polygon(point: Point, polygon: &Polygon) -> bool {
    let verts = polygon.points();
    if verts.len() < 3 {
        return false;
    }
    // Boundary first: vertices and edges count as inside.
    for edge in polygon.edges() {
        if point_on_segment(point, edge) {
            return true;
        }
    }
    let mut inside = false;
    let mut j = verts.len() - 1;
    for i in 0..verts.len() {
        let vi = verts[i];
        let vj = verts[j];
        // Strict comparison attributes a vertex exactly on the ray to the
        // edge whose far endpoint is above it.
        if (vi.y > point.y) != (vj.y > point.y) {
            let x_cross = vi.x + (point.y - vi.y) / (vj.y - vi.y) * (vj.x - vi.x);
            if point.x > x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Solve `a*x^2 + b*x + c = 0`.
///
/// Returns the two real roots (equal for a zero discriminant), or `None`
/// when the discriminant is negative or the equation is not quadratic.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    if a.abs() < f64::EPSILON {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sqrt_disc = disc.sqrt();
    Some(((-b - sqrt_disc) / (2.0 * a), (-b + sqrt_disc) / (2.0 * a)))
}

/// Test whether a circle's rim crosses a line segment.
///
/// Substitutes the segment's line equation into the circle equation and
/// solves the resulting quadratic; an intersection exists when either root
/// falls within the segment's span. Vertical segments are solved in `y`
/// instead of `x`.
pub fn circle_intersects_segment(circle: Circle, seg: Line) -> bool {
    let (cx, cy, r) = (circle.center.x, circle.center.y, circle.radius);
    let dx = seg.p1.x - seg.p0.x;

    if dx.abs() < ON_EDGE_EPSILON {
        // Vertical: x is fixed, solve (y - cy)^2 = r^2 - (x - cx)^2.
        let x = seg.p0.x;
        let a = 1.0;
        let b = -2.0 * cy;
        let c = cy * cy + (x - cx) * (x - cx) - r * r;
        let Some((y1, y2)) = solve_quadratic(a, b, c) else {
            return false;
        };
        let (lo, hi) = (seg.p0.y.min(seg.p1.y), seg.p0.y.max(seg.p1.y));
        return (y1 >= lo && y1 <= hi) || (y2 >= lo && y2 <= hi);
    }

    let slope = (seg.p1.y - seg.p0.y) / dx;
    let intercept = seg.p0.y - slope * seg.p0.x;
    // (x - cx)^2 + (slope*x + intercept - cy)^2 = r^2
    let k = intercept - cy;
    let a = 1.0 + slope * slope;
    let b = 2.0 * (slope * k - cx);
    let c = cx * cx + k * k - r * r;
    let Some((x1, x2)) = solve_quadratic(a, b, c) else {
        return false;
    };
    let (lo, hi) = (seg.p0.x.min(seg.p1.x), seg.p0.x.max(seg.p1.x));
    (x1 >= lo && x1 <= hi) || (x2 >= lo && x2 <= hi)
}

/// The four edges of a rectangle, in drawing order.
pub fn rect_edges(rect: Rect) -> [Line; 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [
        Line::new(tl, tr),
        Line::new(tr, br),
        Line::new(br, bl),
        Line::new(bl, tl),
    ]
}

/// The four corners of a rectangle.
pub fn rect_corners(rect: Rect) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
}

/// Test whether two rectangles overlap. Touching edges count.
pub fn rect_intersects_rect(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}

/// Test whether two circles overlap. Touching rims count.
pub fn circle_intersects_circle(a: Circle, b: Circle) -> bool {
    let r = a.radius + b.radius;
    distance_squared(a.center, b.center) <= r * r
}

/// Test whether a rectangle and a circle overlap.
///
/// Composed from rim-vs-edge intersection plus containment both directions,
/// which also covers one shape fully inside the other with no boundary
/// crossing.
pub fn rect_intersects_circle(rect: Rect, circle: Circle) -> bool {
    if point_in_rect(circle.center, rect) {
        return true;
    }
    if rect_corners(rect).iter().any(|&c| point_in_circle(c, circle)) {
        return true;
    }
    rect_edges(rect)
        .iter()
        .any(|&edge| circle_intersects_segment(circle, edge))
}

/// Test whether a rectangle and a polygon overlap.
pub fn rect_intersects_polygon(rect: Rect, polygon: &Polygon) -> bool {
    if polygon.points().iter().any(|&v| point_in_rect(v, rect)) {
        return true;
    }
    if rect_corners(rect).iter().any(|&c| point_in_polygon(c, polygon)) {
        return true;
    }
    rect_edges(rect)
        .iter()
        .any(|&edge| polygon.edges().any(|pe| segments_intersect(edge, pe)))
}

/// Test whether a circle and a polygon overlap.
pub fn circle_intersects_polygon(circle: Circle, polygon: &Polygon) -> bool {
    if point_in_polygon(circle.center, polygon) {
        return true;
    }
    if polygon.points().iter().any(|&v| point_in_circle(v, circle)) {
        return true;
    }
    polygon
        .edges()
        .any(|edge| circle_intersects_segment(circle, edge))
}

/// Test whether two polygons overlap.
pub fn polygon_intersects_polygon(a: &Polygon, b: &Polygon) -> bool {
    if a.points().iter().any(|&v| point_in_polygon(v, b)) {
        return true;
    }
    if b.points().iter().any(|&v| point_in_polygon(v, a)) {
        return true;
    }
    a.edges()
        .any(|ea| b.edges().any(|eb| segments_intersect(ea, eb)))
}

/// Test whether a line segment and a rectangle overlap.
pub fn segment_intersects_rect(seg: Line, rect: Rect) -> bool {
    if point_in_rect(seg.p0, rect) || point_in_rect(seg.p1, rect) {
        return true;
    }
    rect_edges(rect)
        .iter()
        .any(|&edge| segments_intersect(seg, edge))
}

/// Bounding rectangle of a line segment.
pub fn segment_bounds(seg: Line) -> Rect {
    Rect::new(
        seg.p0.x.min(seg.p1.x),
        seg.p0.y.min(seg.p1.y),
        seg.p0.x.max(seg.p1.x),
        seg.p0.y.max(seg.p1.y),
    )
}

/// Bounding rectangle of a circle: center ± radius on both axes.
pub fn circle_bounds(circle: Circle) -> Rect {
    Rect::new(
        circle.center.x - circle.radius,
        circle.center.y - circle.radius,
        circle.center.x + circle.radius,
        circle.center.y + circle.radius,
    )
}

/// Bounding rectangle of a point set. Zero rect for an empty set.
pub fn points_bounds(points: &[Point]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::ZERO;
    };
    let mut bounds = Rect::new(first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        bounds.x0 = bounds.x0.min(p.x);
        bounds.y0 = bounds.y0.min(p.y);
        bounds.x1 = bounds.x1.max(p.x);
        bounds.y1 = bounds.y1.max(p.y);
    }
    bounds
}

/// Rotate a point around a pivot by an angle in radians.
pub fn rotate_about(point: Point, pivot: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let rel = point - pivot;
    pivot + Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos)
}
