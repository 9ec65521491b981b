//! Layout Files
//!
//! Save and restore a furnished room as JSON: every placed object's pose
//! plus the textures applied to each surface.
//!
//! Restored objects go through the same classify and constrain step as a
//! drag, so a hand-edited file can never put furniture outside the room.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::editor::{StudioEditor, StudioError};
use super::textures::SurfaceTextures;
use crate::scene::NodeId;
use crate::world::RoomDimensions;

#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to access layout file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid layout json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("layout references unknown model '{0}'")]
    UnknownModel(String),
    #[error("layout references unknown texture '{0}'")]
    UnknownTexture(String),
    #[error(transparent)]
    Studio(#[from] StudioError),
}

fn default_scale() -> f32 {
    1.0
}

/// One object as stored on disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedObject {
    pub asset_id: String,
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    /// Room the layout was made in
    #[serde(default)]
    pub room: RoomDimensions,
    #[serde(default)]
    pub objects: Vec<SavedObject>,
    #[serde(default)]
    pub textures: SurfaceTextures,
}

impl Layout {
    pub fn from_json_str(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, LayoutError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let json = std::fs::read_to_string(path)?;
        let layout = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            objects = layout.objects.len(),
            "loaded layout"
        );
        Ok(layout)
    }

    pub fn save(&self, path: &Path) -> Result<(), LayoutError> {
        std::fs::write(path, self.to_json_string()?)?;
        tracing::info!(path = %path.display(), objects = self.objects.len(), "saved layout");
        Ok(())
    }
}

impl StudioEditor {
    /// Capture the current room contents.
    pub fn layout(&self) -> Layout {
        let objects = self
            .object_ids()
            .into_iter()
            .filter_map(|id| self.object(id))
            .map(|state| SavedObject {
                asset_id: state.asset_id,
                position: state.position,
                rotation: state.rotation,
                scale: state.scale,
            })
            .collect();

        Layout {
            room: (*self.room()).into(),
            objects,
            textures: self.textures().clone(),
        }
    }

    /// Replace the room contents with `layout`.
    ///
    /// Every id is checked against the library before anything changes.
    /// Objects are re-placed in this editor's room, which may differ from
    /// the room the layout was saved in.
    pub fn apply_layout(&mut self, layout: &Layout) -> Result<Vec<NodeId>, LayoutError> {
        if let Some(missing) = layout
            .objects
            .iter()
            .find(|o| self.library().model(&o.asset_id).is_none())
        {
            return Err(LayoutError::UnknownModel(missing.asset_id.clone()));
        }
        if let Some((_, missing)) = layout
            .textures
            .iter()
            .find(|(_, t)| self.library().texture(t).is_none())
        {
            return Err(LayoutError::UnknownTexture(missing.to_string()));
        }
        if RoomDimensions::from(*self.room()) != layout.room {
            tracing::warn!(saved = ?layout.room, "layout was saved in a different room");
        }

        self.end_drag();
        self.clear_objects();
        *self.textures_mut() = layout.textures.clone();

        let mut ids = Vec::with_capacity(layout.objects.len());
        for saved in &layout.objects {
            let scale = if saved.scale.is_finite() && saved.scale > 0.0 {
                saved.scale
            } else {
                default_scale()
            };
            let id = self.add_object(&saved.asset_id, saved.position)?;
            self.set_transform(id, saved.rotation, scale)?;
            // re-fit with the scaled footprint
            self.set_position(id, saved.position)?;
            ids.push(id);
        }
        self.select(None);
        Ok(ids)
    }
}
