//! Input state and event routing.
//!
//! Raw platform events arrive in screen pixels; `InputState::route` turns
//! them into scene events carrying virtual-space coordinates, and owns the
//! system gestures (pan drag, wheel zoom). While a pan gesture is active,
//! ordinary pointer events are swallowed so no downstream consumer observes
//! a partially-updated pointer state from the gesture itself.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::camera::Camera;

/// Key that turns a pointer drag into a pan and a wheel into a zoom.
pub const PAN_KEY: &str = "Space";

/// Screen-pixel movement beyond which a press counts as a drag rather than
/// a click.
pub const DRAG_THRESHOLD: f64 = 2.0;

/// Default multiplicative zoom step per wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Raw pointer event in screen coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    Wheel { position: Point, delta: Vec2 },
}

/// Raw keyboard event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Filtered event in virtual coordinates, delivered to the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    PointerDown {
        position: Point,
        modifiers: Modifiers,
    },
    PointerMove {
        position: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        position: Point,
        modifiers: Modifiers,
        /// Whether the pointer travelled past the drag threshold since the
        /// matching down event. A drag cancels click-selection semantics.
        dragged: bool,
    },
    KeyPressed(String),
    KeyReleased(String),
}

/// Tracks pointer/key state across events and owns the pan/zoom gestures.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Current pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Whether the pointer is over the canvas (gates wheel zoom).
    pub pointer_over: bool,
    /// Current modifier keys state.
    pub modifiers: Modifiers,
    /// Multiplicative zoom step per wheel notch.
    pub zoom_step: f64,
    pressed_buttons: HashSet<MouseButton>,
    pressed_keys: HashSet<String>,
    drag_start: Option<Point>,
    dragged: bool,
    /// Screen anchor of an active pan gesture.
    pan_anchor: Option<Point>,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            pointer_position: Point::ZERO,
            pointer_over: true,
            modifiers: Modifiers::default(),
            zoom_step: DEFAULT_ZOOM_STEP,
            pressed_buttons: HashSet::new(),
            pressed_keys: HashSet::new(),
            drag_start: None,
            dragged: false,
            pan_anchor: None,
        }
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pan gesture is in progress. While true, ordinary pointer
    /// events are suppressed.
    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// Whether any button is held.
    pub fn is_pointer_down(&self) -> bool {
        !self.pressed_buttons.is_empty()
    }

    /// Whether a key is currently held.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    /// Update modifier keys state.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    /// Update the mouse-in flag.
    pub fn set_pointer_over(&mut self, over: bool) {
        self.pointer_over = over;
    }

    /// The pointer position in virtual coordinates.
    pub fn pointer_virtual(&self, camera: &Camera) -> Point {
        camera.screen_to_virtual(self.pointer_position)
    }

    /// Route a raw pointer event.
    ///
    /// Returns the filtered scene event, or `None` when the event was
    /// consumed by a system gesture (pan drag, wheel zoom) or carries no
    /// scene-level meaning.
    pub fn route(&mut self, event: PointerEvent, camera: &mut Camera) -> Option<SceneEvent> {
        match event {
            PointerEvent::Down { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.insert(button);
                if self.is_key_pressed(PAN_KEY) {
                    log::trace!("pan gesture started at {position:?}");
                    self.pan_anchor = Some(position);
                    return None;
                }
                self.drag_start = Some(position);
                self.dragged = false;
                Some(SceneEvent::PointerDown {
                    position: camera.screen_to_virtual(position),
                    modifiers: self.modifiers,
                })
            }
            PointerEvent::Up { position, button } => {
                self.pointer_position = position;
                self.pressed_buttons.remove(&button);
                if let Some(anchor) = self.pan_anchor.take() {
                    camera.set_live_pan(position - anchor);
                    camera.commit_pan();
                    log::trace!("pan gesture committed, pan = {:?}", camera.pan);
                    return None;
                }
                let dragged = self.dragged;
                self.drag_start = None;
                self.dragged = false;
                Some(SceneEvent::PointerUp {
                    position: camera.screen_to_virtual(position),
                    modifiers: self.modifiers,
                    dragged,
                })
            }
            PointerEvent::Move { position } => {
                self.pointer_position = position;
                if let Some(anchor) = self.pan_anchor {
                    camera.set_live_pan(position - anchor);
                    return None;
                }
                if let Some(start) = self.drag_start {
                    if (position - start).hypot() > DRAG_THRESHOLD {
                        self.dragged = true;
                    }
                }
                Some(SceneEvent::PointerMove {
                    position: camera.screen_to_virtual(position),
                    modifiers: self.modifiers,
                })
            }
            PointerEvent::Wheel { position, delta } => {
                self.pointer_position = position;
                if self.is_key_pressed(PAN_KEY) && self.pointer_over {
                    let factor = if delta.y < 0.0 {
                        self.zoom_step
                    } else {
                        1.0 / self.zoom_step
                    };
                    camera.zoom_by(factor);
                    log::trace!("wheel zoom, zoom = {}", camera.zoom);
                }
                None
            }
        }
    }

    /// Route a raw keyboard event. Key state is tracked either way; the
    /// event is passed through for scene-level shortcuts.
    pub fn route_key(&mut self, event: KeyEvent) -> Option<SceneEvent> {
        match event {
            KeyEvent::Pressed(key) => {
                self.pressed_keys.insert(key.clone());
                Some(SceneEvent::KeyPressed(key))
            }
            KeyEvent::Released(key) => {
                self.pressed_keys.remove(&key);
                Some(SceneEvent::KeyReleased(key))
            }
        }
    }
}
