//! Camera: the pan/zoom view transform between screen pixels and virtual
//! scene units.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Default minimum zoom factor.
pub const DEFAULT_MIN_ZOOM: f64 = 0.2;
/// Default maximum zoom factor.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// View transform state.
///
/// The pan offset is kept in virtual units and split in two parts: the
/// committed total, and the live delta of an in-progress pan drag. The live
/// part is folded into the total exactly once when the gesture ends, so a
/// conversion during the drag and a conversion after it agree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Committed pan offset in virtual units.
    pub pan: Vec2,
    /// Uncommitted pan delta of an in-progress drag, in virtual units.
    pub live_pan: Vec2,
    /// Current zoom factor (screen pixels per virtual unit).
    pub zoom: f64,
    /// Minimum allowed zoom factor.
    pub min_zoom: f64,
    /// Maximum allowed zoom factor.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            live_pan: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl Camera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera with custom zoom bounds.
    pub fn with_zoom_bounds(min_zoom: f64, max_zoom: f64) -> Self {
        Self {
            min_zoom,
            max_zoom,
            ..Self::default()
        }
    }

    /// Total effective pan, committed plus live.
    pub fn total_pan(&self) -> Vec2 {
        self.pan + self.live_pan
    }

    /// Convert a screen point to virtual coordinates:
    /// `virtual = screen / zoom + pan + live`.
    pub fn screen_to_virtual(&self, screen: Point) -> Point {
        let pan = self.total_pan();
        Point::new(screen.x / self.zoom + pan.x, screen.y / self.zoom + pan.y)
    }

    /// Convert a virtual point to screen coordinates (inverse of
    /// `screen_to_virtual`), used when rendering handles.
    pub fn virtual_to_screen(&self, point: Point) -> Point {
        let pan = self.total_pan();
        Point::new((point.x - pan.x) * self.zoom, (point.y - pan.y) * self.zoom)
    }

    /// Convert a rectangle to screen coordinates.
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let tl = self.virtual_to_screen(Point::new(rect.x0, rect.y0));
        let br = self.virtual_to_screen(Point::new(rect.x1, rect.y1));
        Rect::new(tl.x, tl.y, br.x, br.y)
    }

    /// Update the live pan delta from a drag measured in screen pixels.
    /// Dragging right moves the viewport left over the scene.
    pub fn set_live_pan(&mut self, screen_delta: Vec2) {
        self.live_pan = Vec2::new(-screen_delta.x / self.zoom, -screen_delta.y / self.zoom);
    }

    /// Fold the live pan delta into the committed total and clear it.
    pub fn commit_pan(&mut self) {
        self.pan += self.live_pan;
        self.live_pan = Vec2::ZERO;
    }

    /// Multiply the zoom by `factor`, clamped to the configured bounds.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
    }

    /// Reset to the origin at 1:1 zoom.
    pub fn reset(&mut self) {
        self.pan = Vec2::ZERO;
        self.live_pan = Vec2::ZERO;
        self.zoom = 1.0;
    }

    /// Fit the view so `bounds` fills the viewport with `padding` pixels of
    /// margin.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            self.reset();
            return;
        }
        let padded = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.zoom = scale_x.min(scale_y).clamp(self.min_zoom, self.max_zoom);
        self.live_pan = Vec2::ZERO;

        // Position the bounds center at the viewport center.
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        let center = bounds.center();
        self.pan = Vec2::new(
            center.x - viewport_center.x / self.zoom,
            center.y - viewport_center.y / self.zoom,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conversion() {
        let camera = Camera::new();
        let p = Point::new(123.0, 456.0);
        assert_eq!(camera.screen_to_virtual(p), p);
    }

    #[test]
    fn test_conversion_with_pan_and_zoom() {
        let mut camera = Camera::new();
        camera.pan = Vec2::new(50.0, 100.0);
        camera.zoom = 2.0;
        let world = camera.screen_to_virtual(Point::new(100.0, 200.0));
        assert!((world.x - 100.0).abs() < f64::EPSILON);
        assert!((world.y - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut camera = Camera::new();
        camera.pan = Vec2::new(30.0, -20.0);
        camera.zoom = 1.5;
        let original = Point::new(123.0, 456.0);
        let back = camera.virtual_to_screen(camera.screen_to_virtual(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_pan_commits_exactly_once() {
        let mut camera = Camera::new();
        let before = camera.screen_to_virtual(Point::new(10.0, 10.0));

        camera.set_live_pan(Vec2::new(40.0, 25.0));
        let during = camera.screen_to_virtual(Point::new(10.0, 10.0));
        camera.commit_pan();
        let after = camera.screen_to_virtual(Point::new(10.0, 10.0));

        // The drag is visible mid-gesture and unchanged by the commit.
        assert!((during.x - after.x).abs() < 1e-12);
        assert!((during.y - after.y).abs() < 1e-12);
        assert!((after.x - (before.x - 40.0)).abs() < 1e-12);
        assert!((after.y - (before.y - 25.0)).abs() < 1e-12);
        assert_eq!(camera.live_pan, Vec2::ZERO);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::new();
        camera.zoom_by(0.001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);

        camera.zoom = 1.0;
        camera.zoom_by(1000.0);
        assert!((camera.zoom - camera.max_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_live_pan_respects_zoom() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.set_live_pan(Vec2::new(10.0, 0.0));
        assert!((camera.live_pan.x + 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_bounds_centers_content() {
        let mut camera = Camera::new();
        camera.max_zoom = 10.0;
        let bounds = Rect::new(0.0, 0.0, 100.0, 100.0);
        camera.fit_to_bounds(bounds, Size::new(800.0, 600.0), 50.0);

        let screen_center = camera.virtual_to_screen(bounds.center());
        assert!((screen_center.x - 400.0).abs() < 1e-9);
        assert!((screen_center.y - 300.0).abs() < 1e-9);
    }
}
