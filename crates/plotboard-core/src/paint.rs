//! Draw-primitive interface the core renders through.
//!
//! The scene never issues raster draw calls itself; it describes lines,
//! rectangles, circles and polygons in screen coordinates and lets the host
//! backend rasterize them. Cursor feedback travels the same way as a purely
//! advisory call.

use kurbo::{Circle, Line, Point, Rect};

use crate::handles::CursorHint;
use crate::shapes::{ItemStyle, SerializableColor};

/// Rendering backend capability.
///
/// All coordinates are screen pixels; the scene applies the camera
/// transform before calling in.
pub trait PaintSurface {
    fn draw_line(&mut self, line: Line, style: &ItemStyle);
    fn draw_rect(&mut self, rect: Rect, style: &ItemStyle);
    fn draw_circle(&mut self, circle: Circle, style: &ItemStyle);
    fn draw_polygon(&mut self, points: &[Point], style: &ItemStyle);
    fn set_cursor_hint(&mut self, hint: CursorHint);
}

/// Accent style used for selection chrome (outline, handles, guide line).
pub fn chrome_style() -> ItemStyle {
    ItemStyle {
        stroke_color: SerializableColor::new(0, 122, 255, 255),
        stroke_width: 1.0,
        fill_color: Some(SerializableColor::white()),
    }
}
