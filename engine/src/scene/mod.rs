//! Scene Module
//!
//! Transform-node arena and the per-frame snapshot the renderer reads.

pub mod arena;
pub mod snapshot;

pub use arena::{NodeId, SceneError, SceneGraph, Transform};
pub use snapshot::{
    INSTANCE_FLAG_DRAGGING, INSTANCE_FLAG_SELECTED, ObjectInstance, RenderSnapshot, SurfaceView,
};
