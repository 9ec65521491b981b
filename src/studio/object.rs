//! Placed Objects
//!
//! A library model instantiated in the room. Its pose lives in the scene
//! arena; this payload keeps what placement needs to know about the asset.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::placement::HalfExtents;

/// Payload of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    /// The room box; parent of every placed object.
    Room,
    Furniture(PlacedObject),
}

impl SceneItem {
    pub fn as_object(&self) -> Option<&PlacedObject> {
        match self {
            SceneItem::Furniture(obj) => Some(obj),
            SceneItem::Room => None,
        }
    }
}

/// A model dropped into the room.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedObject {
    /// Library id of the model
    pub asset_id: String,
    /// Half extents of the model geometry at scale 1
    pub base_extents: HalfExtents,
}

impl PlacedObject {
    pub fn new(asset_id: impl Into<String>, base_extents: HalfExtents) -> Self {
        Self {
            asset_id: asset_id.into(),
            base_extents,
        }
    }

    /// Footprint at the given scale. Rotation is not taken into account.
    pub fn footprint(&self, scale: f32) -> HalfExtents {
        self.base_extents.scaled(scale)
    }
}

/// Owned view of a placed object's current state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectState {
    pub asset_id: String,
    /// Room-local position
    pub position: Vec3,
    /// Euler angles (radians)
    pub rotation: Vec3,
    pub scale: f32,
    pub footprint: HalfExtents,
}
