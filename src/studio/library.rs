//! Asset Library
//!
//! Catalog of furniture models and surface textures the user can drag into
//! the room. Ships with a built-in catalog; a JSON index can replace it.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::placement::HalfExtents;

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("failed to access library: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid library json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },
}

// ============================================================================
// ENTRIES
// ============================================================================

/// A furniture model available for placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Unique identifier
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Category, e.g. "furniture" or "plant"
    pub category: String,
    /// Location of the model file (loaded by the renderer, not here)
    pub url: String,
    /// Short glyph shown in the library grid
    #[serde(default)]
    pub thumbnail: String,
    /// Bounding box size of the model geometry at scale 1
    pub bounds_size: Vec3,
}

impl ModelEntry {
    /// Footprint of this model at scale 1.
    pub fn half_extents(&self) -> HalfExtents {
        HalfExtents::from_size(self.bounds_size)
    }
}

/// A texture that can be applied to a room surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub url: String,
    /// Short glyph shown in the library grid
    #[serde(default)]
    pub thumbnail: String,
    /// CSS-style preview color, e.g. "#deb887"
    #[serde(default)]
    pub preview_color: String,
}

// ============================================================================
// LIBRARY
// ============================================================================

/// Models and textures indexed by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetLibrary {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
    #[serde(default)]
    pub textures: Vec<TextureEntry>,
}

const ASSET_HOST: &str = "https://furnouserdatabase.s3.ap-south-1.amazonaws.com/users";

fn model(id: &str, name: &str, category: &str, file: &str, thumbnail: &str, size: Vec3) -> ModelEntry {
    ModelEntry {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        url: format!("{ASSET_HOST}/{file}"),
        thumbnail: thumbnail.to_string(),
        bounds_size: size,
    }
}

fn texture(
    id: &str,
    name: &str,
    category: &str,
    file: &str,
    thumbnail: &str,
    preview_color: &str,
) -> TextureEntry {
    TextureEntry {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        url: format!("{ASSET_HOST}/{file}"),
        thumbnail: thumbnail.to_string(),
        preview_color: preview_color.to_string(),
    }
}

impl AssetLibrary {
    /// The catalog the studio ships with.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                model(
                    "indoor-plant",
                    "Indoor Plant",
                    "plant",
                    "user_760309/scene_a2052295/model_2489754749.glb",
                    "🌿",
                    Vec3::new(0.6, 1.2, 0.6),
                ),
                model(
                    "chair",
                    "Modern Chair",
                    "furniture",
                    "user_760309/scene_a2052295/model_0243514227.glb",
                    "🪑",
                    Vec3::new(0.6, 0.9, 0.6),
                ),
                model(
                    "bed",
                    "Bed",
                    "furniture",
                    "user_12345/scene_2c7c66d5/model_6984096452.glb",
                    "🛏️",
                    Vec3::new(1.6, 0.6, 2.1),
                ),
                model(
                    "sofa",
                    "Sofa",
                    "furniture",
                    "user_12345/scene_2c7c66d5/model_6019256313.glb",
                    "🛋️",
                    Vec3::new(2.0, 0.9, 0.9),
                ),
                model(
                    "wardrobe",
                    "Wardrobe",
                    "furniture",
                    "user_12345/scene_2c7c66d5/model_0134865573.glb",
                    "🚪",
                    Vec3::new(1.2, 2.0, 0.6),
                ),
                model(
                    "tv",
                    "TV",
                    "furniture",
                    "user_12345/scene_2c7c66d5/model_1834376564.glb",
                    "📺",
                    Vec3::new(1.2, 0.7, 0.1),
                ),
            ],
            textures: vec![
                texture(
                    "wood-oak",
                    "Oak Wood",
                    "wood",
                    "user_760309/scene_a2052295/texture_3446355027.png",
                    "🪵",
                    "#deb887",
                ),
                texture(
                    "marble-white",
                    "White Marble",
                    "marble",
                    "user_760309/scene_a2052295/texture_9397327790.png",
                    "🧱",
                    "#f8f8ff",
                ),
            ],
        }
    }

    /// Parse a library index and reject duplicate ids.
    pub fn from_json_str(json: &str) -> Result<Self, LibraryError> {
        let library: AssetLibrary = serde_json::from_str(json)?;
        library.check_unique()?;
        Ok(library)
    }

    /// Load a library index from disk.
    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let json = std::fs::read_to_string(path)?;
        let library = Self::from_json_str(&json)?;
        tracing::info!(
            path = %path.display(),
            models = library.models.len(),
            textures = library.textures.len(),
            "loaded asset library"
        );
        Ok(library)
    }

    /// Persist the library index.
    pub fn save(&self, path: &Path) -> Result<(), LibraryError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn check_unique(&self) -> Result<(), LibraryError> {
        let mut seen = HashSet::new();
        for m in &self.models {
            if !seen.insert(m.id.as_str()) {
                return Err(LibraryError::DuplicateId {
                    kind: "model",
                    id: m.id.clone(),
                });
            }
        }
        seen.clear();
        for t in &self.textures {
            if !seen.insert(t.id.as_str()) {
                return Err(LibraryError::DuplicateId {
                    kind: "texture",
                    id: t.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn model(&self, id: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn texture(&self, id: &str) -> Option<&TextureEntry> {
        self.textures.iter().find(|t| t.id == id)
    }

    /// Add or replace a model (deduplicates by id).
    pub fn add_model(&mut self, entry: ModelEntry) {
        self.models.retain(|m| m.id != entry.id);
        self.models.push(entry);
    }

    pub fn models_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ModelEntry> {
        self.models.iter().filter(move |m| m.category == category)
    }
}
