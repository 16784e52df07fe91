//! Plotboard Core Library
//!
//! Platform-agnostic geometry, interaction and history logic for the
//! Plotboard 2D scene editor. Rendering, windowing and UI live in host
//! crates; this crate consumes events and a draw-primitive capability.

pub mod camera;
pub mod config;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod input;
pub mod item;
pub mod manipulation;
pub mod paint;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod snapshot;
pub mod tools;
pub mod transform;

pub use camera::Camera;
pub use config::SceneConfig;
pub use handles::{CursorHint, Handle, HandleKind};
pub use history::{Action, History};
pub use input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent, SceneEvent};
pub use item::{ItemId, SceneItem};
pub use manipulation::Manipulator;
pub use paint::PaintSurface;
pub use scene::Scene;
pub use selection::Selection;
pub use shapes::{ItemStyle, Polygon, SerializableColor, Shape};
pub use snapshot::{SceneSnapshot, SnapshotError};
pub use tools::{ToolKind, ToolManager};
pub use transform::{ScaleAnchor, TransformOp};
