//! Placement Module
//!
//! Surface-constrained placement of objects inside a room:
//! - [`surface`] - which of the six room surfaces an object rests on
//! - [`constraint`] - glue a proposed position to a surface and keep it in bounds
//! - [`footprint`] - object half-extents and bounding boxes

pub mod constraint;
pub mod footprint;
pub mod surface;

pub use constraint::{clamp_or_midpoint, constrain_position, free_axis_range};
pub use footprint::{Aabb, HalfExtents};
pub use surface::{Axis, DEFAULT_SURFACE_THRESHOLD, Surface, classify_surface};
