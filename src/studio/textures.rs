//! Surface Textures
//!
//! Dragging a texture from the library onto a room surface: the texture is
//! held as pending, the surface under the pointer is highlighted, and the
//! drop applies it, replacing whatever that surface had before.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::events::StudioEvent;
use super::library::AssetLibrary;
use crate::placement::Surface;

/// Texture id applied to each surface. Surfaces without an entry are plain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceTextures {
    applied: BTreeMap<Surface, String>,
}

impl SurfaceTextures {
    pub fn get(&self, surface: Surface) -> Option<&str> {
        self.applied.get(&surface).map(String::as_str)
    }

    /// Apply a texture, returning the one it replaced.
    pub fn apply(&mut self, surface: Surface, texture_id: impl Into<String>) -> Option<String> {
        self.applied.insert(surface, texture_id.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Surface, &str)> {
        self.applied.iter().map(|(s, t)| (*s, t.as_str()))
    }

    pub fn len(&self) -> usize {
        self.applied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Texture drag-and-drop state.
#[derive(Clone, Debug, Default)]
pub struct TexturePainter {
    /// Texture picked up from the library, waiting for a drop
    pending: Option<String>,
    /// Surface currently under the pointer
    highlighted: Option<Surface>,
    pub textures: SurfaceTextures,
}

impl TexturePainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn highlighted(&self) -> Option<Surface> {
        self.highlighted
    }

    /// Pick a texture up from the library.
    pub fn pick(&mut self, texture_id: impl Into<String>) {
        self.pending = Some(texture_id.into());
    }

    pub fn pointer_over(&mut self, surface: Surface) {
        self.highlighted = Some(surface);
    }

    /// Clear the highlight, but only if it belongs to `surface`.
    pub fn pointer_out(&mut self, surface: Surface) {
        if self.highlighted == Some(surface) {
            self.highlighted = None;
        }
    }

    /// Drop on `surface`. Applies the pending texture, if any, and always
    /// clears the highlight.
    pub fn drop_on(&mut self, surface: Surface, library: &AssetLibrary) -> Option<StudioEvent> {
        self.highlighted = None;
        let texture_id = self.pending.take()?;

        let name = library
            .texture(&texture_id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| texture_id.clone());

        let replaced = self.textures.apply(surface, texture_id.clone());
        tracing::info!(
            surface = surface.id(),
            texture = %texture_id,
            replaced = ?replaced,
            "applied surface texture"
        );

        Some(StudioEvent::TextureApplied {
            surface,
            texture_id,
            message: format!("{name} applied to {}", surface.display_name()),
        })
    }
}
