//! Selection handle geometry and cursor hints.
//!
//! Handles live in screen space: their size, hit radius and the rotate
//! handle's offset are fixed pixel constants, so they stay the same size on
//! screen no matter the zoom. Callers convert the selection's bounding
//! rectangle to screen coordinates before laying handles out.

use kurbo::{Point, Rect};

use crate::config::SceneConfig;
use crate::transform::ScaleAnchor;

/// What a handle does when dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// One of the eight scale handles.
    Scale(ScaleAnchor),
    /// The rotate handle above the top-center edge.
    Rotate,
}

/// A handle with its screen position.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub kind: HandleKind,
    /// Center position in screen coordinates.
    pub position: Point,
}

impl Handle {
    pub fn new(kind: HandleKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// Check whether a screen point is within `tolerance` of this handle.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        (point - self.position).hypot2() <= tolerance * tolerance
    }
}

/// Advisory cursor shape reported while hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    /// Directional resize cursor for one of the eight scale handles.
    Resize(ScaleAnchor),
    /// Move cursor inside the selection bounds.
    Move,
    /// Crosshair over the rotate handle.
    Crosshair,
}

/// Position of the rotate handle for a selection box in screen coordinates.
pub fn rotate_handle_position(bounds_screen: Rect, config: &SceneConfig) -> Point {
    Point::new(
        bounds_screen.center().x,
        bounds_screen.y0 - config.rotate_handle_offset,
    )
}

/// Lay out the handles for a selection box in screen coordinates.
///
/// Eight square scale handles sit on the corners and edge midpoints when
/// scaling is available; the circular rotate handle floats above the
/// top-center edge when rotation is available.
pub fn layout_handles(
    bounds_screen: Rect,
    can_scale: bool,
    can_rotate: bool,
    config: &SceneConfig,
) -> Vec<Handle> {
    let mut handles = Vec::new();
    if can_scale {
        for anchor in ScaleAnchor::ALL {
            handles.push(Handle::new(
                HandleKind::Scale(anchor),
                anchor.position_on(bounds_screen),
            ));
        }
    }
    if can_rotate {
        handles.push(Handle::new(
            HandleKind::Rotate,
            rotate_handle_position(bounds_screen, config),
        ));
    }
    handles
}

/// Find the handle under a screen point. Scale handles win over the rotate
/// handle because they are listed first.
pub fn hit_test_handles(
    handles: &[Handle],
    point: Point,
    config: &SceneConfig,
) -> Option<HandleKind> {
    handles
        .iter()
        .find(|h| h.hit_test(point, config.handle_hit_tolerance))
        .map(|h| h.kind)
}

/// The cursor to advertise for a handle.
pub fn cursor_for(kind: HandleKind) -> CursorHint {
    match kind {
        HandleKind::Scale(anchor) => CursorHint::Resize(anchor),
        HandleKind::Rotate => CursorHint::Crosshair,
    }
}
