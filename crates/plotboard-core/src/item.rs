//! Scene item instances.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

use crate::shapes::{ItemStyle, Shape};

/// Stable identity of a scene item.
///
/// Assigned by the scene monotonically, unique for the lifetime of the
/// scene and never reused — undo/redo and lock toggling address items by
/// id so array reordering can never retarget a record.
pub type ItemId = u64;

/// A drawable item placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneItem {
    /// Stable identity, assigned at add time.
    pub id: ItemId,
    /// The drawable shape.
    pub shape: Shape,
    /// Style applied when drawing.
    pub style: ItemStyle,
    /// Locked items are skipped by hit-testing and transforms.
    pub locked: bool,
}

impl SceneItem {
    /// Create an item. Ids come from the scene; see `Scene::add_shape`.
    pub fn new(id: ItemId, shape: Shape, style: ItemStyle) -> Self {
        Self {
            id,
            shape,
            style,
            locked: false,
        }
    }

    /// Bounding rectangle in virtual coordinates.
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Test whether a point (in virtual coordinates) hits this item,
    /// using the shape's own containment test widened by the stroke.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.shape
            .hit_test(point, tolerance + self.style.stroke_width / 2.0)
    }
}
