//! Studio Events
//!
//! Notifications emitted by the editor for the surrounding application
//! (state stores, toasts, renderer resync). Drained once per frame.

use glam::Vec3;

use crate::placement::Surface;
use crate::scene::NodeId;

#[derive(Debug, Clone, PartialEq)]
pub enum StudioEvent {
    /// A library model was dropped into the room
    ObjectAdded {
        id: NodeId,
        asset_id: String,
        position: Vec3,
    },
    /// An object's committed position changed
    PositionUpdated { id: NodeId, position: Vec3 },
    /// Rotation or scale changed from a keyboard command
    ObjectTransformed { id: NodeId, rotation: Vec3, scale: f32 },
    ObjectRemoved { id: NodeId },
    SelectionChanged { selected: Option<NodeId> },
    DragStarted { id: NodeId, surface: Surface },
    DragEnded { id: NodeId },
    /// A texture was applied to a room surface
    TextureApplied {
        surface: Surface,
        texture_id: String,
        /// Ready-to-show notification, e.g. "Oak Wood applied to Back Wall"
        message: String,
    },
}

impl StudioEvent {
    /// Object the event concerns, if any.
    pub fn object(&self) -> Option<NodeId> {
        match self {
            StudioEvent::ObjectAdded { id, .. }
            | StudioEvent::PositionUpdated { id, .. }
            | StudioEvent::ObjectTransformed { id, .. }
            | StudioEvent::ObjectRemoved { id }
            | StudioEvent::DragStarted { id, .. }
            | StudioEvent::DragEnded { id } => Some(*id),
            StudioEvent::SelectionChanged { selected } => *selected,
            StudioEvent::TextureApplied { .. } => None,
        }
    }
}
