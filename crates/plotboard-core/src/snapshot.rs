//! Plain serializable scene snapshot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::item::{ItemId, SceneItem};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// A serializable snapshot of the scene's persistent state: the items in
/// draw order plus the id watermark, so restored scenes keep assigning
/// fresh ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Format version for forward-compatibility checks.
    pub version: u32,
    /// All items, bottom-most first.
    pub items: Vec<SceneItem>,
    /// Next id the scene will assign.
    pub next_id: ItemId,
}

impl SceneSnapshot {
    /// Build a snapshot from scene state.
    pub fn new(items: Vec<SceneItem>, next_id: ItemId) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            items,
            next_id,
        }
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON, rejecting unknown versions.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: SceneSnapshot = serde_json::from_str(json)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}
