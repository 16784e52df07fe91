//! Handle-based transform state machine.
//!
//! A drag against the selection is either a move (grab inside the bounds),
//! a scale (grab one of the eight handles) or a rotation (grab the rotate
//! handle). While the drag is live only a preview rectangle/angle is
//! recomputed from the original bounds; item state is untouched until
//! pointer release, when the final operation is applied through each item's
//! capability methods and handed back for history recording.

use kurbo::{Circle, Line, Point, Rect, Vec2};

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::geometry;
use crate::handles::{self, CursorHint, HandleKind};
use crate::item::{ItemId, SceneItem};
use crate::paint::{chrome_style, PaintSurface};
use crate::selection::Selection;
use crate::transform::{scale_rect, ScaleAnchor, TransformOp};

/// Union of the bounding rectangles of the given items.
pub fn selection_bounds(items: &[SceneItem], ids: &[ItemId]) -> Option<Rect> {
    let mut bounds: Option<Rect> = None;
    for &id in ids {
        let item = items.iter().find(|item| item.id == id)?;
        let b = item.bounds();
        bounds = Some(match bounds {
            Some(acc) => acc.union(b),
            None => b,
        });
    }
    bounds
}

/// Which gesture a drag performs.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragKind {
    Move,
    Scale(ScaleAnchor),
    Rotate,
}

/// An in-progress drag. All points are in virtual coordinates.
#[derive(Debug, Clone)]
struct Drag {
    kind: DragKind,
    start: Point,
    current: Point,
    /// Selection bounds at drag start; previews derive from this.
    origin_bounds: Rect,
    /// Rotate handle position at drag start (rotation only).
    reference: Point,
}

/// The transform state machine: `Idle` (no drag) or `Dragging`.
#[derive(Debug, Default)]
pub struct Manipulator {
    drag: Option<Drag>,
}

impl Manipulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Try to start a drag at a virtual-space pointer position.
    ///
    /// Hit priority: scale handle, then rotate handle, then anywhere inside
    /// the selection bounds. Each stage is gated on the matching selection
    /// capability. Returns `true` when the pointer was captured.
    pub fn pointer_down(
        &mut self,
        position: Point,
        items: &[SceneItem],
        selection: &Selection,
        camera: &Camera,
        config: &SceneConfig,
    ) -> bool {
        let Some(bounds) = selection_bounds(items, selection.ids()) else {
            return false;
        };
        let bounds_screen = camera.rect_to_screen(bounds);
        let screen = camera.virtual_to_screen(position);
        let handle_set = handles::layout_handles(
            bounds_screen,
            selection.can_scale(items),
            selection.can_rotate(items),
            config,
        );

        let kind = match handles::hit_test_handles(&handle_set, screen, config) {
            Some(HandleKind::Scale(anchor)) => Some(DragKind::Scale(anchor)),
            Some(HandleKind::Rotate) => Some(DragKind::Rotate),
            None => {
                if selection.can_move(items) && geometry::point_in_rect(position, bounds) {
                    Some(DragKind::Move)
                } else {
                    None
                }
            }
        };
        let Some(kind) = kind else {
            return false;
        };

        let reference =
            camera.screen_to_virtual(handles::rotate_handle_position(bounds_screen, config));
        log::trace!("drag started: {kind:?}");
        self.drag = Some(Drag {
            kind,
            start: position,
            current: position,
            origin_bounds: bounds,
            reference,
        });
        true
    }

    /// Update the live pointer position of an active drag.
    pub fn pointer_move(&mut self, position: Point) {
        if let Some(drag) = &mut self.drag {
            drag.current = position;
        }
    }

    /// The live preview rectangle, derived from the drag-start bounds
    /// without touching item state.
    pub fn preview_bounds(&self) -> Option<Rect> {
        let drag = self.drag.as_ref()?;
        Some(match drag.kind {
            DragKind::Move => {
                let delta = drag.current - drag.start;
                Rect::new(
                    drag.origin_bounds.x0 + delta.x,
                    drag.origin_bounds.y0 + delta.y,
                    drag.origin_bounds.x1 + delta.x,
                    drag.origin_bounds.y1 + delta.y,
                )
            }
            DragKind::Scale(anchor) => {
                scale_rect(drag.origin_bounds, scale_factor(drag, anchor), anchor)
            }
            DragKind::Rotate => drag.origin_bounds,
        })
    }

    /// The live preview rotation angle in radians, for rotate drags.
    pub fn preview_angle(&self) -> Option<f64> {
        let drag = self.drag.as_ref()?;
        match drag.kind {
            DragKind::Rotate => Some(rotation_angle(drag)),
            _ => None,
        }
    }

    /// Abandon the drag without committing (a click, not a drag).
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    /// Finish the drag: apply the final operation to every selected item
    /// through its capability methods (items lacking the capability are
    /// silently skipped), clear the preview, and return the committed
    /// operation for history recording.
    pub fn pointer_up(
        &mut self,
        position: Point,
        items: &mut [SceneItem],
        selection: &Selection,
    ) -> Option<TransformOp> {
        let mut drag = self.drag.take()?;
        drag.current = position;

        let op = match drag.kind {
            DragKind::Move => TransformOp::Move {
                delta: drag.current - drag.start,
            },
            DragKind::Scale(anchor) => TransformOp::Scale {
                anchor,
                factor: scale_factor(&drag, anchor),
            },
            DragKind::Rotate => TransformOp::Rotate {
                angle: rotation_angle(&drag),
            },
        };

        for &id in selection.ids() {
            if let Some(item) = items.iter_mut().find(|item| item.id == id) {
                item.shape.apply_op(op);
            }
        }
        log::debug!("committed transform {op:?} on {} item(s)", selection.len());
        Some(op)
    }

    /// The cursor to advertise for the current pointer position. Purely
    /// advisory; never changes state.
    pub fn cursor_hint(
        &self,
        position: Point,
        items: &[SceneItem],
        selection: &Selection,
        camera: &Camera,
        config: &SceneConfig,
    ) -> CursorHint {
        if let Some(drag) = &self.drag {
            return match drag.kind {
                DragKind::Move => CursorHint::Move,
                DragKind::Scale(anchor) => CursorHint::Resize(anchor),
                DragKind::Rotate => CursorHint::Crosshair,
            };
        }
        let Some(bounds) = selection_bounds(items, selection.ids()) else {
            return CursorHint::Default;
        };
        let handle_set = handles::layout_handles(
            camera.rect_to_screen(bounds),
            selection.can_scale(items),
            selection.can_rotate(items),
            config,
        );
        let screen = camera.virtual_to_screen(position);
        if let Some(kind) = handles::hit_test_handles(&handle_set, screen, config) {
            return handles::cursor_for(kind);
        }
        if selection.can_move(items) && geometry::point_in_rect(position, bounds) {
            return CursorHint::Move;
        }
        CursorHint::Default
    }

    /// Draw the selection chrome: bounds outline (the live preview while
    /// dragging), scale handles, and the rotate handle with its guide line.
    pub fn render(
        &self,
        surface: &mut dyn PaintSurface,
        items: &[SceneItem],
        selection: &Selection,
        camera: &Camera,
        config: &SceneConfig,
    ) {
        let bounds = match self.preview_bounds() {
            Some(b) => b,
            None => match selection_bounds(items, selection.ids()) {
                Some(b) => b,
                None => return,
            },
        };
        let style = chrome_style();
        let screen = camera.rect_to_screen(bounds);
        surface.draw_rect(screen, &style);

        let handle_set = handles::layout_handles(
            screen,
            selection.can_scale(items),
            selection.can_rotate(items),
            config,
        );
        let half = config.handle_size / 2.0;
        for handle in &handle_set {
            match handle.kind {
                HandleKind::Scale(_) => {
                    surface.draw_rect(
                        Rect::new(
                            handle.position.x - half,
                            handle.position.y - half,
                            handle.position.x + half,
                            handle.position.y + half,
                        ),
                        &style,
                    );
                }
                HandleKind::Rotate => {
                    // Guide line from the top-center edge up to the handle.
                    surface.draw_line(
                        Line::new(Point::new(screen.center().x, screen.y0), handle.position),
                        &style,
                    );
                    surface.draw_circle(Circle::new(handle.position, half), &style);
                }
            }
        }
    }
}

/// Per-axis scale factor of a scale drag: new extent over original extent,
/// both measured from the fixed point. Axes the anchor does not scale stay
/// at 1, as does an axis whose original extent is degenerate.
fn scale_factor(drag: &Drag, anchor: ScaleAnchor) -> Vec2 {
    let fixed = anchor.opposite().position_on(drag.origin_bounds);
    let grip = anchor.position_on(drag.origin_bounds);
    let axis = |scales: bool, orig: f64, new: f64| -> f64 {
        if !scales || orig == 0.0 {
            1.0
        } else {
            new / orig
        }
    };
    Vec2::new(
        axis(
            anchor.scales_x(),
            grip.x - fixed.x,
            drag.current.x - fixed.x,
        ),
        axis(
            anchor.scales_y(),
            grip.y - fixed.y,
            drag.current.y - fixed.y,
        ),
    )
}

/// Rotation angle of a rotate drag, in radians over the full 0–2π range.
///
/// The angle at the pivot (the bounds center) is recovered with the law of
/// cosines from the triangle pivot / reference (the rotate handle's rest
/// position) / pointer. `acos` alone only covers 0–π; a pointer left of the
/// pivot flips to the reflex angle.
fn rotation_angle(drag: &Drag) -> f64 {
    let pivot = drag.origin_bounds.center();
    let a = geometry::distance(pivot, drag.reference);
    let b = geometry::distance(pivot, drag.current);
    if a < f64::EPSILON || b < f64::EPSILON {
        return 0.0;
    }
    let c = geometry::distance(drag.reference, drag.current);
    let cos = ((a * a + b * b - c * c) / (2.0 * a * b)).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if drag.current.x < pivot.x {
        std::f64::consts::TAU - angle
    } else {
        angle
    }
}
