//! Numeric constants supplied at scene construction.

use crate::camera::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::input::DEFAULT_ZOOM_STEP;

/// Tunable constants for a scene.
///
/// Handle sizes and offsets are screen-space pixels and deliberately do not
/// scale with zoom, so handles keep a constant on-screen size.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Minimum zoom factor.
    pub min_zoom: f64,
    /// Maximum zoom factor.
    pub max_zoom: f64,
    /// Multiplicative zoom step per wheel notch.
    pub zoom_step: f64,
    /// Side length of a square scale handle, in screen pixels.
    pub handle_size: f64,
    /// Hit-test radius around a handle center, in screen pixels.
    pub handle_hit_tolerance: f64,
    /// Distance from the top edge to the rotate handle, in screen pixels.
    pub rotate_handle_offset: f64,
    /// Hit-test tolerance for item selection, in virtual units.
    pub hit_tolerance: f64,
    /// Maximum number of undoable actions kept in history.
    pub history_depth: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            zoom_step: DEFAULT_ZOOM_STEP,
            handle_size: 8.0,
            handle_hit_tolerance: 6.0,
            rotate_handle_offset: 25.0,
            hit_tolerance: 3.0,
            history_depth: 50,
        }
    }
}
