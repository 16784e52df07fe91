//! Closed polygon value type.

use kurbo::{Line, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// A closed polygon described by an ordered vertex ring.
///
/// The last vertex is implicitly connected back to the first; vertices are
/// stored in drawing order. Fewer than three vertices is a degenerate
/// polygon that contains nothing and has point-like bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    /// Create a polygon from an ordered vertex ring.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// The vertex ring.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the edges, including the closing edge back to the first
    /// vertex.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.points.len();
        let count = if n >= 2 { n } else { 0 };
        (0..count).map(move |i| Line::new(self.points[i], self.points[(i + 1) % n]))
    }

    /// Bounding rectangle (min/max projection of the vertices).
    pub fn bounds(&self) -> Rect {
        geometry::points_bounds(&self.points)
    }

    /// Test containment. Boundary-inclusive ray cast.
    pub fn contains(&self, point: Point) -> bool {
        geometry::point_in_polygon(point, self)
    }

    /// Return a copy translated by `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|&p| p + delta).collect(),
        }
    }

    /// Return a copy rotated by `angle` radians around `pivot`.
    pub fn rotated_about(&self, pivot: Point, angle: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|&p| geometry::rotate_about(p, pivot, angle))
                .collect(),
        }
    }
}
