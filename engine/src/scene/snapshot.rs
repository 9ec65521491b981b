//! Render Snapshot
//!
//! Read-only copy of the scene handed to the renderer once per frame. The
//! renderer never touches editor state; it only reads the last snapshot.

use glam::Mat4;

use super::arena::NodeId;
use crate::placement::Surface;
use crate::world::Room;

/// Instance flag: object is the current selection
pub const INSTANCE_FLAG_SELECTED: u32 = 1 << 0;
/// Instance flag: object is being dragged this frame
pub const INSTANCE_FLAG_DRAGGING: u32 = 1 << 1;

/// GPU instance record for one placed object.
///
/// Layout (80 bytes total, 16-byte aligned for GPU compatibility):
/// - model:           mat4x4<f32> (64 bytes) - Local-to-world matrix, column major
/// - node_index:      u32 (4 bytes) - Arena slot of the source node
/// - node_generation: u32 (4 bytes) - Arena generation of the source node
/// - asset_slot:      u32 (4 bytes) - Index into `RenderSnapshot::asset_ids`
/// - flags:           u32 (4 bytes) - INSTANCE_FLAG_* bits
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectInstance {
    pub model: [[f32; 4]; 4],
    pub node_index: u32,
    pub node_generation: u32,
    pub asset_slot: u32,
    pub flags: u32,
}

static_assertions::assert_eq_size!(ObjectInstance, [u8; 80]);

impl ObjectInstance {
    pub fn node_id_matches(&self, id: NodeId) -> bool {
        self.node_index == id.index() && self.node_generation == id.generation()
    }

    pub fn is_selected(&self) -> bool {
        self.flags & INSTANCE_FLAG_SELECTED != 0
    }

    pub fn is_dragging(&self) -> bool {
        self.flags & INSTANCE_FLAG_DRAGGING != 0
    }
}

/// Appearance of one room surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub surface: Surface,
    /// Applied texture id, if any
    pub texture: Option<String>,
    /// Pointer is hovering this surface with a texture in hand
    pub highlighted: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    /// Monotonic frame counter
    pub frame: u64,
    pub room: Room,
    /// Room-to-world matrix
    pub room_matrix: Mat4,
    pub instances: Vec<ObjectInstance>,
    /// Asset ids referenced by `ObjectInstance::asset_slot`
    pub asset_ids: Vec<String>,
    pub surfaces: Vec<SurfaceView>,
}

impl RenderSnapshot {
    pub fn new(frame: u64, room: Room, room_matrix: Mat4) -> Self {
        Self {
            frame,
            room,
            room_matrix,
            instances: Vec::new(),
            asset_ids: Vec::new(),
            surfaces: Vec::new(),
        }
    }

    /// Record an object, interning its asset id.
    pub fn push_instance(&mut self, id: NodeId, model: Mat4, asset_id: &str, flags: u32) {
        let asset_slot = match self.asset_ids.iter().position(|a| a == asset_id) {
            Some(slot) => slot,
            None => {
                self.asset_ids.push(asset_id.to_string());
                self.asset_ids.len() - 1
            }
        };

        self.instances.push(ObjectInstance {
            model: model.to_cols_array_2d(),
            node_index: id.index(),
            node_generation: id.generation(),
            asset_slot: asset_slot as u32,
            flags,
        });
    }

    /// Raw instance buffer contents.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instance(&self, id: NodeId) -> Option<&ObjectInstance> {
        self.instances.iter().find(|i| i.node_id_matches(id))
    }

    pub fn asset_of(&self, instance: &ObjectInstance) -> Option<&str> {
        self.asset_ids
            .get(instance.asset_slot as usize)
            .map(String::as_str)
    }

    pub fn surface(&self, surface: Surface) -> Option<&SurfaceView> {
        self.surfaces.iter().find(|s| s.surface == surface)
    }
}
