//! Shape-creation tools.

use kurbo::{Circle, Line, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::geometry;
use crate::shapes::{ItemStyle, Polygon, Shape};

/// Smallest extent a drag must cover to produce a shape.
const MIN_SHAPE_EXTENT: f64 = 1.0;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Rect,
    Circle,
    Polygon,
}

/// State of a drag-to-create interaction.
#[derive(Debug, Clone, Copy, Default)]
pub enum ToolState {
    /// Tool is idle, waiting for interaction.
    #[default]
    Idle,
    /// Tool is actively being used.
    Active {
        /// Starting point of the interaction, in virtual coordinates.
        start: Point,
        /// Current point of the interaction.
        current: Point,
    },
}

/// Manages the current tool, its drag state, and the style context applied
/// to new shapes.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current drag state.
    pub state: ToolState,
    /// Style applied to newly created shapes.
    pub style: ItemStyle,
    /// Accumulated vertices for the polygon tool (click to add, finish to
    /// close the ring).
    polygon_draft: Vec<Point>,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: ToolState::default(),
            style: ItemStyle::default(),
            polygon_draft: Vec::new(),
        }
    }
}

impl ToolManager {
    /// Create a tool manager with the select tool active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch tools, abandoning any in-progress interaction.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
        self.polygon_draft.clear();
    }

    /// Whether the active tool creates shapes (anything but select).
    pub fn is_creation_tool(&self) -> bool {
        self.current_tool != ToolKind::Select
    }

    /// Begin an interaction at a virtual-space point.
    pub fn begin(&mut self, point: Point) {
        match self.current_tool {
            ToolKind::Select => {}
            ToolKind::Polygon => self.polygon_draft.push(point),
            _ => {
                self.state = ToolState::Active {
                    start: point,
                    current: point,
                };
            }
        }
    }

    /// Update the current point of an active interaction.
    pub fn update(&mut self, point: Point) {
        if let ToolState::Active { current, .. } = &mut self.state {
            *current = point;
        }
    }

    /// The shape currently being drawn, for preview rendering.
    pub fn preview(&self) -> Option<Shape> {
        match self.current_tool {
            ToolKind::Polygon if self.polygon_draft.len() >= 2 => {
                Some(Shape::Polygon(Polygon::new(self.polygon_draft.clone())))
            }
            _ => {
                let ToolState::Active { start, current } = self.state else {
                    return None;
                };
                self.build(start, current)
            }
        }
    }

    /// Finish a drag interaction, producing the final shape. Returns `None`
    /// for the select/polygon tools and for degenerate drags.
    pub fn finish(&mut self, point: Point) -> Option<Shape> {
        let ToolState::Active { start, .. } = self.state else {
            return None;
        };
        self.state = ToolState::Idle;
        if geometry::distance(start, point) < MIN_SHAPE_EXTENT {
            return None;
        }
        self.build(start, point)
    }

    /// Close the polygon draft into a shape. Needs at least three vertices.
    pub fn finish_polygon(&mut self) -> Option<Shape> {
        if self.polygon_draft.len() < 3 {
            self.polygon_draft.clear();
            return None;
        }
        let points = std::mem::take(&mut self.polygon_draft);
        Some(Shape::Polygon(Polygon::new(points)))
    }

    fn build(&self, start: Point, end: Point) -> Option<Shape> {
        match self.current_tool {
            ToolKind::Line => Some(Shape::Line(Line::new(start, end))),
            ToolKind::Rect => Some(Shape::Rect(Rect::new(
                start.x.min(end.x),
                start.y.min(end.y),
                start.x.max(end.x),
                start.y.max(end.y),
            ))),
            ToolKind::Circle => Some(Shape::Circle(Circle::new(
                start,
                geometry::distance(start, end),
            ))),
            ToolKind::Select | ToolKind::Polygon => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_tool_normalizes_corners() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rect);
        tools.begin(Point::new(50.0, 50.0));
        tools.update(Point::new(10.0, 20.0));
        let shape = tools.finish(Point::new(10.0, 20.0)).unwrap();
        assert_eq!(shape.bounds(), Rect::new(10.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn test_circle_tool_radius_from_drag() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Circle);
        tools.begin(Point::new(0.0, 0.0));
        let shape = tools.finish(Point::new(3.0, 4.0)).unwrap();
        let Shape::Circle(circle) = shape else {
            panic!("expected circle");
        };
        assert!((circle.radius - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_drag_produces_nothing() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Line);
        tools.begin(Point::new(5.0, 5.0));
        assert!(tools.finish(Point::new(5.2, 5.0)).is_none());
        assert!(matches!(tools.state, ToolState::Idle));
    }

    #[test]
    fn test_polygon_tool_collects_clicks() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Polygon);
        tools.begin(Point::new(0.0, 0.0));
        tools.begin(Point::new(10.0, 0.0));
        assert!(tools.finish_polygon().is_none()); // two vertices: discarded

        tools.begin(Point::new(0.0, 0.0));
        tools.begin(Point::new(10.0, 0.0));
        tools.begin(Point::new(10.0, 10.0));
        let shape = tools.finish_polygon().unwrap();
        let Shape::Polygon(polygon) = shape else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn test_switching_tools_clears_draft() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Polygon);
        tools.begin(Point::new(0.0, 0.0));
        tools.set_tool(ToolKind::Line);
        tools.set_tool(ToolKind::Polygon);
        tools.begin(Point::new(1.0, 1.0));
        tools.begin(Point::new(2.0, 1.0));
        tools.begin(Point::new(2.0, 2.0));
        let Some(Shape::Polygon(polygon)) = tools.finish_polygon() else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.points()[0], Point::new(1.0, 1.0));
    }
}
