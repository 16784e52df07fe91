//! Scene orchestrator: owns the item list, wires input to selection and
//! manipulation, records every committed mutation in history, and renders
//! through the paint capability.

use kurbo::{Circle, Line, Point, Vec2};

use crate::camera::Camera;
use crate::config::SceneConfig;
use crate::handles::CursorHint;
use crate::history::{Action, History};
use crate::input::{InputState, KeyEvent, PointerEvent, SceneEvent};
use crate::item::{ItemId, SceneItem};
use crate::manipulation::Manipulator;
use crate::paint::PaintSurface;
use crate::selection::Selection;
use crate::shapes::{ItemStyle, Shape};
use crate::snapshot::SceneSnapshot;
use crate::tools::{ToolKind, ToolManager};

/// Callback invoked from `tick` after the scene changed.
pub type SceneObserver = Box<dyn FnMut()>;

/// The scene: a mutable, ordered collection of drawable items in virtual
/// space, plus the interaction state operating on them.
///
/// Items are kept in draw order, bottom-most first. All mutations flow
/// through methods that record an invertible action in history; `undo` and
/// `redo` fetch the record to apply and this type applies it.
pub struct Scene {
    items: Vec<SceneItem>,
    next_id: ItemId,
    pub camera: Camera,
    pub input: InputState,
    pub selection: Selection,
    pub manipulator: Manipulator,
    pub history: History,
    pub tools: ToolManager,
    config: SceneConfig,
    observers: Vec<SceneObserver>,
    dirty: bool,
    /// Last pointer position in virtual coordinates, for cursor feedback.
    last_pointer: Point,
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("items", &self.items.len())
            .field("next_id", &self.next_id)
            .field("selection", &self.selection)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene with default configuration.
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create an empty scene with custom configuration.
    pub fn with_config(config: SceneConfig) -> Self {
        let mut input = InputState::new();
        input.zoom_step = config.zoom_step;
        Self {
            items: Vec::new(),
            next_id: 1,
            camera: Camera::with_zoom_bounds(config.min_zoom, config.max_zoom),
            input,
            selection: Selection::new(),
            manipulator: Manipulator::new(),
            history: History::new(config.history_depth),
            tools: ToolManager::new(),
            config,
            observers: Vec::new(),
            dirty: false,
            last_pointer: Point::ZERO,
        }
    }

    /// The items in draw order, bottom-most first.
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    /// Look up an item by id.
    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of items in the scene.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the scene has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The current draw order as ids.
    pub fn order(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id).collect()
    }

    /// Register a scene-change observer, invoked from `tick`.
    pub fn add_observer(&mut self, observer: SceneObserver) {
        self.observers.push(observer);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Per-frame update entry, invoked by the host's scheduler. Flushes
    /// pending change notifications; returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.dirty = false;
        for observer in &mut self.observers {
            observer();
        }
        true
    }

    fn alloc_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a shape styled with the current style context. Records the add
    /// and returns the new item's id.
    pub fn add_shape(&mut self, shape: Shape) -> ItemId {
        let id = self.alloc_id();
        let item = SceneItem::new(id, shape, self.tools.style.clone());
        log::debug!("add item {id}");
        self.items.push(item.clone());
        self.history.record_add(vec![item]);
        self.mark_dirty();
        id
    }

    /// Clone the selected items with fresh ids, offset by `delta`. Records
    /// one add for the whole batch and selects the clones.
    pub fn duplicate_selected(&mut self, delta: Vec2) -> Vec<ItemId> {
        let mut clones = Vec::new();
        for &id in self.selection.ids() {
            let Some(item) = self.items.iter().find(|item| item.id == id) else {
                continue;
            };
            let mut clone = item.clone();
            clone.id = self.next_id;
            self.next_id += 1;
            clone.locked = false;
            clone.shape.apply_move(delta);
            clones.push(clone);
        }
        if clones.is_empty() {
            return Vec::new();
        }
        let ids: Vec<ItemId> = clones.iter().map(|item| item.id).collect();
        self.items.extend(clones.iter().cloned());
        self.history.record_add(clones);
        self.selection.set_selected(ids.clone());
        self.mark_dirty();
        ids
    }

    /// Delete the selected items, recording the full instances so undo can
    /// restore them with identical ids.
    pub fn delete_selected(&mut self) {
        let ids: Vec<ItemId> = self.selection.ids().to_vec();
        let removed: Vec<SceneItem> = self
            .items
            .iter()
            .filter(|item| ids.contains(&item.id))
            .cloned()
            .collect();
        if removed.is_empty() {
            return;
        }
        log::debug!("delete {} item(s)", removed.len());
        self.items.retain(|item| !ids.contains(&item.id));
        self.history.record_delete(removed);
        self.selection.deselect();
        self.mark_dirty();
    }

    /// Lock the selected items. Undoing a lock unconditionally unlocks the
    /// same ids; any earlier locked flag is not restored.
    pub fn lock_selected(&mut self) {
        let ids: Vec<ItemId> = self.selection.ids().to_vec();
        if ids.is_empty() {
            return;
        }
        self.set_locked(&ids, true);
        self.history.record_lock(ids);
        self.mark_dirty();
    }

    /// Unlock the selected items.
    pub fn unlock_selected(&mut self) {
        let ids: Vec<ItemId> = self.selection.ids().to_vec();
        if ids.is_empty() {
            return;
        }
        self.set_locked(&ids, false);
        self.history.record_unlock(ids);
        self.mark_dirty();
    }

    fn set_locked(&mut self, ids: &[ItemId], locked: bool) {
        for item in &mut self.items {
            if ids.contains(&item.id) {
                item.locked = locked;
            }
        }
    }

    /// Move an item to the top of the draw order.
    pub fn bring_to_front(&mut self, id: ItemId) -> bool {
        self.rearrange(id, |items, pos| {
            if pos + 1 == items.len() {
                return false;
            }
            let item = items.remove(pos);
            items.push(item);
            true
        })
    }

    /// Move an item to the bottom of the draw order.
    pub fn send_to_back(&mut self, id: ItemId) -> bool {
        self.rearrange(id, |items, pos| {
            if pos == 0 {
                return false;
            }
            let item = items.remove(pos);
            items.insert(0, item);
            true
        })
    }

    /// Move an item one layer towards the front.
    pub fn bring_forward(&mut self, id: ItemId) -> bool {
        self.rearrange(id, |items, pos| {
            if pos + 1 == items.len() {
                return false;
            }
            items.swap(pos, pos + 1);
            true
        })
    }

    /// Move an item one layer towards the back.
    pub fn send_backward(&mut self, id: ItemId) -> bool {
        self.rearrange(id, |items, pos| {
            if pos == 0 {
                return false;
            }
            items.swap(pos, pos - 1);
            true
        })
    }

    fn rearrange<F>(&mut self, id: ItemId, mutate: F) -> bool
    where
        F: FnOnce(&mut Vec<SceneItem>, usize) -> bool,
    {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };
        let before = self.order();
        if !mutate(&mut self.items, pos) {
            return false;
        }
        self.history.record_rearrange(before, self.order());
        self.mark_dirty();
        true
    }

    /// Undo the most recent action. Returns false when nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.history.undo() else {
            return false;
        };
        self.apply_action(action);
        self.selection.retain_existing(&self.items);
        self.mark_dirty();
        true
    }

    /// Redo the most recently undone action. Returns false when nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.history.redo() else {
            return false;
        };
        self.apply_action(action);
        self.selection.retain_existing(&self.items);
        self.mark_dirty();
        true
    }

    /// Apply a history record to the item list.
    fn apply_action(&mut self, action: Action) {
        match action {
            Action::AddItems(items) => {
                for item in items {
                    self.next_id = self.next_id.max(item.id + 1);
                    self.items.push(item);
                }
            }
            Action::DeleteItems(items) => {
                let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
                self.items.retain(|item| !ids.contains(&item.id));
            }
            Action::TransformItems { ids, op } => {
                for id in ids {
                    if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                        item.shape.apply_op(op);
                    }
                }
            }
            Action::LockItems(ids) => self.set_locked(&ids, true),
            Action::UnlockItems(ids) => self.set_locked(&ids, false),
            Action::Rearrange { after, .. } => {
                let position = |id: ItemId| {
                    after
                        .iter()
                        .position(|&o| o == id)
                        .unwrap_or(after.len())
                };
                self.items.sort_by_key(|item| position(item.id));
            }
        }
    }

    /// Feed a raw pointer event through the interaction layer. Events
    /// consumed by a pan/zoom gesture never reach selection or
    /// manipulation.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        if let Some(scene_event) = self.input.route(event, &mut self.camera) {
            self.dispatch(scene_event);
        }
    }

    /// Feed a raw keyboard event through the interaction layer.
    pub fn handle_key_event(&mut self, event: KeyEvent) {
        if let Some(scene_event) = self.input.route_key(event) {
            self.dispatch(scene_event);
        }
    }

    fn dispatch(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::PointerDown { position, .. } => {
                self.last_pointer = position;
                if self.tools.is_creation_tool() {
                    self.tools.begin(position);
                } else {
                    self.manipulator.pointer_down(
                        position,
                        &self.items,
                        &self.selection,
                        &self.camera,
                        &self.config,
                    );
                }
            }
            SceneEvent::PointerMove { position, .. } => {
                self.last_pointer = position;
                if self.manipulator.is_dragging() {
                    self.manipulator.pointer_move(position);
                } else {
                    self.tools.update(position);
                }
            }
            SceneEvent::PointerUp {
                position,
                modifiers,
                dragged,
            } => {
                self.last_pointer = position;
                if self.manipulator.is_dragging() {
                    if dragged {
                        if let Some(op) = self.manipulator.pointer_up(
                            position,
                            &mut self.items,
                            &self.selection,
                        ) {
                            self.history
                                .record_transform(self.selection.ids().to_vec(), op);
                            self.mark_dirty();
                        }
                    } else {
                        // A press without a drag is a click: cycle the
                        // selection instead of committing a no-op move.
                        self.manipulator.cancel();
                        self.selection.handle_click(
                            position,
                            &self.items,
                            modifiers.shift,
                            modifiers.alt,
                            self.config.hit_tolerance,
                        );
                    }
                } else if self.tools.is_creation_tool() {
                    if let Some(shape) = self.tools.finish(position) {
                        let id = self.add_shape(shape);
                        self.selection.set_selected(vec![id]);
                    }
                } else if !dragged {
                    self.selection.handle_click(
                        position,
                        &self.items,
                        modifiers.shift,
                        modifiers.alt,
                        self.config.hit_tolerance,
                    );
                }
            }
            SceneEvent::KeyPressed(key) => self.handle_shortcut(&key),
            SceneEvent::KeyReleased(_) => {}
        }
    }

    fn handle_shortcut(&mut self, key: &str) {
        match key {
            "Delete" | "Backspace" => self.delete_selected(),
            "Escape" => {
                self.selection.deselect();
                let tool = self.tools.current_tool;
                self.tools.set_tool(tool);
            }
            "Enter" => {
                if self.tools.current_tool == ToolKind::Polygon {
                    if let Some(shape) = self.tools.finish_polygon() {
                        let id = self.add_shape(shape);
                        self.selection.set_selected(vec![id]);
                    }
                }
            }
            _ => {}
        }
    }

    /// Draw the scene: every item in draw order, the active tool's preview,
    /// the selection chrome, and the advisory cursor hint.
    pub fn render(&self, surface: &mut dyn PaintSurface) {
        for item in &self.items {
            self.draw_shape(surface, &item.shape, &item.style);
        }
        if let Some(preview) = self.tools.preview() {
            self.draw_shape(surface, &preview, &self.tools.style);
        }
        self.manipulator.render(
            surface,
            &self.items,
            &self.selection,
            &self.camera,
            &self.config,
        );

        let hint = if self.input.is_panning() {
            CursorHint::Default
        } else {
            self.manipulator.cursor_hint(
                self.last_pointer,
                &self.items,
                &self.selection,
                &self.camera,
                &self.config,
            )
        };
        surface.set_cursor_hint(hint);
    }

    fn draw_shape(&self, surface: &mut dyn PaintSurface, shape: &Shape, style: &ItemStyle) {
        let style = ItemStyle {
            stroke_width: style.stroke_width * self.camera.zoom,
            ..style.clone()
        };
        match shape {
            Shape::Line(line) => surface.draw_line(
                Line::new(
                    self.camera.virtual_to_screen(line.p0),
                    self.camera.virtual_to_screen(line.p1),
                ),
                &style,
            ),
            Shape::Rect(rect) => surface.draw_rect(self.camera.rect_to_screen(*rect), &style),
            Shape::Circle(circle) => surface.draw_circle(
                Circle::new(
                    self.camera.virtual_to_screen(circle.center),
                    circle.radius * self.camera.zoom,
                ),
                &style,
            ),
            Shape::Polygon(polygon) => {
                let points: Vec<Point> = polygon
                    .points()
                    .iter()
                    .map(|&p| self.camera.virtual_to_screen(p))
                    .collect();
                surface.draw_polygon(&points, &style);
            }
        }
    }

    /// Snapshot the persistent scene state.
    pub fn to_snapshot(&self) -> SceneSnapshot {
        SceneSnapshot::new(self.items.clone(), self.next_id)
    }

    /// Replace the scene contents from a snapshot. Selection and history
    /// are reset; the id watermark is advanced past every restored item.
    pub fn load_snapshot(&mut self, snapshot: SceneSnapshot) {
        self.next_id = snapshot
            .items
            .iter()
            .map(|item| item.id + 1)
            .fold(snapshot.next_id, ItemId::max);
        self.items = snapshot.items;
        self.selection.deselect();
        self.manipulator.cancel();
        self.history = History::new(self.config.history_depth);
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{KeyEvent, Modifiers, MouseButton, PAN_KEY};
    use crate::paint::recording::{PaintCall, RecordingSurface};
    use kurbo::Rect;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press(scene: &mut Scene, x: f64, y: f64) {
        scene.handle_pointer_event(PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn drag_to(scene: &mut Scene, x: f64, y: f64) {
        scene.handle_pointer_event(PointerEvent::Move {
            position: Point::new(x, y),
        });
    }

    fn release(scene: &mut Scene, x: f64, y: f64) {
        scene.handle_pointer_event(PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        });
    }

    fn click(scene: &mut Scene, x: f64, y: f64) {
        press(scene, x, y);
        release(scene, x, y);
    }

    fn add_rect(scene: &mut Scene, x0: f64, y0: f64, x1: f64, y1: f64) -> ItemId {
        scene.add_shape(Shape::Rect(Rect::new(x0, y0, x1, y1)))
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut scene = Scene::new();
        let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let b = add_rect(&mut scene, 20.0, 0.0, 30.0, 10.0);
        assert!(b > a);

        scene.selection.set_selected(vec![b]);
        scene.delete_selected();
        let c = add_rect(&mut scene, 40.0, 0.0, 50.0, 10.0);
        assert!(c > b);
    }

    #[test]
    fn test_undo_add_removes_by_id_redo_restores_same_id() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        assert!(scene.item(id).is_some());

        assert!(scene.undo());
        assert!(scene.item(id).is_none());
        assert!(scene.is_empty());

        assert!(scene.redo());
        assert!(scene.item(id).is_some());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_undo_delete_restores_items() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        scene.selection.set_selected(vec![id]);
        scene.delete_selected();
        assert!(scene.is_empty());

        assert!(scene.undo());
        assert_eq!(scene.item(id).unwrap().bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_history_depth_bound_via_config() {
        let config = SceneConfig {
            history_depth: 2,
            ..SceneConfig::default()
        };
        let mut scene = Scene::with_config(config);
        add_rect(&mut scene, 0.0, 0.0, 1.0, 1.0);
        add_rect(&mut scene, 0.0, 0.0, 2.0, 2.0);
        add_rect(&mut scene, 0.0, 0.0, 3.0, 3.0);

        assert!(scene.undo());
        assert!(scene.undo());
        // The first add fell off the bounded stack.
        assert!(!scene.undo());
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn test_create_rect_via_pointer_events() {
        let mut scene = Scene::new();
        scene.tools.set_tool(ToolKind::Rect);

        press(&mut scene, 10.0, 10.0);
        drag_to(&mut scene, 60.0, 40.0);
        release(&mut scene, 60.0, 40.0);

        assert_eq!(scene.len(), 1);
        let item = &scene.items()[0];
        assert_eq!(item.bounds(), Rect::new(10.0, 10.0, 60.0, 40.0));
        assert!(scene.selection.is_selected(item.id));

        // The creation is undoable.
        assert!(scene.undo());
        assert!(scene.is_empty());
    }

    #[test]
    fn test_click_selects_then_drag_moves_and_undo_restores() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);

        click(&mut scene, 50.0, 50.0);
        assert!(scene.selection.is_selected(id));

        // Drag inside the selection: commits a move.
        press(&mut scene, 50.0, 50.0);
        drag_to(&mut scene, 80.0, 70.0);
        release(&mut scene, 80.0, 70.0);
        assert_eq!(scene.item(id).unwrap().bounds(), Rect::new(30.0, 20.0, 130.0, 120.0));

        assert!(scene.undo());
        assert_eq!(scene.item(id).unwrap().bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));

        assert!(scene.redo());
        assert_eq!(scene.item(id).unwrap().bounds(), Rect::new(30.0, 20.0, 130.0, 120.0));
    }

    #[test]
    fn test_scale_commit_undo_roundtrip() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
        click(&mut scene, 50.0, 50.0);

        // Grab the bottom-right handle and double the width.
        press(&mut scene, 100.0, 100.0);
        drag_to(&mut scene, 200.0, 100.0);
        release(&mut scene, 200.0, 100.0);
        assert_eq!(scene.item(id).unwrap().bounds(), Rect::new(0.0, 0.0, 200.0, 100.0));

        assert!(scene.undo());
        let bounds = scene.item(id).unwrap().bounds();
        assert!((bounds.x1 - 100.0).abs() < 1e-9);
        assert!((bounds.y1 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pan_gesture_never_reaches_selection() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);

        scene.handle_key_event(KeyEvent::Pressed(PAN_KEY.to_string()));
        press(&mut scene, 50.0, 50.0);
        drag_to(&mut scene, 90.0, 90.0);
        release(&mut scene, 90.0, 90.0);

        // The click landed on the item but was consumed by the pan.
        assert!(!scene.selection.is_selected(id));
        assert!((scene.camera.pan.x + 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_lock_blocks_interaction_and_undoes_asymmetrically() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
        scene.selection.set_selected(vec![id]);
        scene.lock_selected();
        assert!(scene.item(id).unwrap().locked);
        assert!(!scene.selection.can_move(scene.items()));

        // A plain click skips the locked item entirely.
        scene.selection.deselect();
        click(&mut scene, 50.0, 50.0);
        assert!(scene.selection.is_empty());

        // Undoing the lock unlocks, whatever the flag was before.
        assert!(scene.undo());
        assert!(!scene.item(id).unwrap().locked);
    }

    #[test]
    fn test_alt_click_selects_locked_item() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
        scene.selection.set_selected(vec![id]);
        scene.lock_selected();
        scene.selection.deselect();

        scene.input.set_modifiers(Modifiers {
            alt: true,
            ..Modifiers::default()
        });
        click(&mut scene, 50.0, 50.0);
        assert!(scene.selection.is_selected(id));
    }

    #[test]
    fn test_rearrange_records_and_undoes_order() {
        let mut scene = Scene::new();
        let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let b = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        let c = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        assert_eq!(scene.order(), vec![a, b, c]);

        assert!(scene.bring_to_front(a));
        assert_eq!(scene.order(), vec![b, c, a]);

        assert!(scene.undo());
        assert_eq!(scene.order(), vec![a, b, c]);

        assert!(scene.redo());
        assert_eq!(scene.order(), vec![b, c, a]);

        // No-op rearranges are not recorded.
        assert!(!scene.bring_to_front(a));
        assert!(scene.send_backward(a));
        assert_eq!(scene.order(), vec![b, a, c]);
    }

    #[test]
    fn test_duplicate_gets_fresh_ids() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        scene.selection.set_selected(vec![id]);

        let clones = scene.duplicate_selected(Vec2::new(5.0, 5.0));
        assert_eq!(clones.len(), 1);
        assert_ne!(clones[0], id);
        assert_eq!(scene.len(), 2);
        assert_eq!(
            scene.item(clones[0]).unwrap().bounds(),
            Rect::new(5.0, 5.0, 15.0, 15.0)
        );
        assert!(scene.selection.is_selected(clones[0]));

        // Undo removes only the clones.
        assert!(scene.undo());
        assert_eq!(scene.len(), 1);
        assert!(scene.item(id).is_some());
    }

    #[test]
    fn test_delete_key_shortcut() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        scene.selection.set_selected(vec![id]);
        scene.handle_key_event(KeyEvent::Pressed("Delete".to_string()));
        assert!(scene.is_empty());
    }

    #[test]
    fn test_polygon_tool_closed_with_enter() {
        let mut scene = Scene::new();
        scene.tools.set_tool(ToolKind::Polygon);
        click(&mut scene, 0.0, 0.0);
        click(&mut scene, 20.0, 0.0);
        click(&mut scene, 20.0, 20.0);
        scene.handle_key_event(KeyEvent::Pressed("Enter".to_string()));

        assert_eq!(scene.len(), 1);
        let Shape::Polygon(polygon) = &scene.items()[0].shape else {
            panic!("expected polygon");
        };
        assert_eq!(polygon.len(), 3);
    }

    #[test]
    fn test_tick_notifies_once_per_change_batch() {
        let count = Rc::new(RefCell::new(0usize));
        let seen = count.clone();
        let mut scene = Scene::new();
        scene.add_observer(Box::new(move || *seen.borrow_mut() += 1));

        assert!(!scene.tick());
        add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        add_rect(&mut scene, 0.0, 0.0, 20.0, 20.0);
        assert!(scene.tick());
        assert_eq!(*count.borrow(), 1);
        assert!(!scene.tick());
    }

    #[test]
    fn test_render_draws_items_chrome_and_cursor() {
        let mut scene = Scene::new();
        let id = add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
        scene.selection.set_selected(vec![id]);

        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);

        // Item + outline + 8 handles.
        assert_eq!(surface.count(|c| matches!(c, PaintCall::Rect(_))), 10);
        assert_eq!(surface.count(|c| matches!(c, PaintCall::Cursor(_))), 1);
    }

    #[test]
    fn test_render_applies_camera_transform() {
        let mut scene = Scene::new();
        add_rect(&mut scene, 0.0, 0.0, 100.0, 100.0);
        scene.camera.zoom = 2.0;

        let mut surface = RecordingSurface::new();
        scene.render(&mut surface);
        let Some(PaintCall::Rect(rect)) = surface.calls.first() else {
            panic!("expected a rect");
        };
        assert_eq!(*rect, Rect::new(0.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_items_and_watermark() {
        let mut scene = Scene::new();
        let a = add_rect(&mut scene, 0.0, 0.0, 10.0, 10.0);
        add_rect(&mut scene, 5.0, 5.0, 15.0, 15.0);

        let json = scene.to_snapshot().to_json().unwrap();
        let snapshot = SceneSnapshot::from_json(&json).unwrap();

        let mut restored = Scene::new();
        restored.load_snapshot(snapshot);
        assert_eq!(restored.len(), 2);
        assert!(restored.item(a).is_some());

        // New ids continue past the restored ones.
        let c = restored.add_shape(Shape::Rect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert!(c > a + 1);
    }
}
