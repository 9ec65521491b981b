//! Camera Module
//!
//! Pointer raycasting against the room. Window-system agnostic - it only
//! deals with rays, planes and camera math.

pub mod raycast;

pub use raycast::{
    Ray, RaycastConfig, SurfaceHit, get_ray_direction, intersect_axis_plane, pick_surface,
    raycast_to_surface,
};
