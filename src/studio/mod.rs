//! Studio Module
//!
//! The room editor built on top of the placement engine: asset library,
//! drag sessions, keyboard edits, surface textures and layout files.

pub mod commands;
pub mod config;
pub mod editor;
pub mod events;
pub mod layout;
pub mod library;
pub mod object;
pub mod session;
pub mod textures;

pub use commands::{EditCommand, rescaled, rotated};
pub use config::{ConfigError, EditConfig, StudioConfig};
pub use editor::{InputEvent, StudioEditor, StudioError};
pub use events::StudioEvent;
pub use layout::{Layout, LayoutError, SavedObject};
pub use library::{AssetLibrary, LibraryError, ModelEntry, TextureEntry};
pub use object::{ObjectState, PlacedObject, SceneItem};
pub use session::{DragSession, DragState};
pub use textures::{SurfaceTextures, TexturePainter};
