//! Furnish Engine Library
//!
//! Surface-constrained placement of furniture inside a box-shaped room.
//! Objects attach to one of the six room surfaces and can only slide along
//! it; every committed position keeps the object's footprint inside the room.
//!
//! # Modules
//!
//! - [`world`] - Room dimensions and bounds
//! - [`placement`] - Surface classification, footprints and position constraints
//! - [`camera`] - Pointer rays and ray/plane intersection
//! - [`scene`] - Generational scene arena and per-frame render snapshots
//! - [`studio`] - The room editor: library, dragging, keyboard edits, textures
//!
//! # Example
//!
//! ```ignore
//! use furnish_engine::camera::Ray;
//! use furnish_engine::studio::{AssetLibrary, StudioConfig, StudioEditor};
//! use glam::Vec3;
//!
//! let mut editor = StudioEditor::new(StudioConfig::default(), AssetLibrary::builtin())?;
//! let chair = editor.drop_model("chair", (0.5, 0.5))?;
//!
//! // Grab the chair from above and slide it toward the back wall
//! let ray = Ray::new(Vec3::new(0.0, 4.0, 0.0), Vec3::NEG_Y);
//! editor.begin_drag(chair, &ray)?;
//! editor.drag_to(&Ray::new(Vec3::new(0.0, 4.0, -9.0), Vec3::NEG_Y));
//! editor.end_drag();
//!
//! let snapshot = editor.frame();
//! ```

pub mod camera;
pub mod placement;
pub mod scene;
pub mod world;

// Editor built on the engine (located in src/studio/ directory)
#[path = "../../src/studio/mod.rs"]
pub mod studio;

pub use placement::{HalfExtents, Surface, classify_surface, constrain_position};
pub use world::Room;
