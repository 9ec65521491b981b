//! Studio Editor
//!
//! Single owner of all studio state: the scene arena, selection, the active
//! drag session, surface textures and the outgoing event queue.
//!
//! Each frame runs in two phases. [`StudioEditor::frame`] first drains the
//! queued input and computes the next state (classification, then
//! constraint, then commit), and only then builds the read-only
//! [`RenderSnapshot`] the renderer draws from.

use std::collections::VecDeque;

use glam::{Mat4, Vec3};

use super::commands::{EditCommand, rescaled, rotated};
use super::config::{ConfigError, StudioConfig};
use super::events::StudioEvent;
use super::library::AssetLibrary;
use super::object::{ObjectState, PlacedObject, SceneItem};
use super::session::{DragSession, DragState};
use super::textures::{SurfaceTextures, TexturePainter};
use crate::camera::{Ray, pick_surface};
use crate::placement::{Aabb, HalfExtents, Surface, classify_surface, constrain_position};
use crate::scene::{
    INSTANCE_FLAG_DRAGGING, INSTANCE_FLAG_SELECTED, NodeId, RenderSnapshot, SceneError,
    SceneGraph, SurfaceView, Transform,
};
use crate::world::Room;

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("no placed object {0}")]
    UnknownObject(NodeId),
    #[error("object {0} must be selected before it can be dragged")]
    NotSelected(NodeId),
    #[error("no model '{0}' in the library")]
    UnknownModel(String),
    #[error("no texture '{0}' in the library")]
    UnknownTexture(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Input queued for the next frame. Rays are in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown { ray: Ray },
    PointerMove { ray: Ray },
    PointerUp,
    /// Pointer capture lost; ends the drag like a release
    PointerCancel,
    /// Key name, e.g. "r", "+", "Delete"
    Key(String),
    /// Library model released over the viewport at normalized `uv`
    /// ((0,0) top-left, (1,1) bottom-right)
    DropModel { asset_id: String, uv: (f32, f32) },
    /// Library texture picked up
    PickTexture { texture_id: String },
    /// Pointer moved while carrying a texture
    TextureHover { ray: Ray },
    /// Texture released
    DropTexture { ray: Ray },
}

pub struct StudioEditor {
    config: StudioConfig,
    room: Room,
    library: AssetLibrary,
    scene: SceneGraph<SceneItem>,
    room_node: NodeId,
    selected: Option<NodeId>,
    drag: DragState,
    painter: TexturePainter,
    input: VecDeque<InputEvent>,
    events: Vec<StudioEvent>,
    frame: u64,
}

impl Default for StudioEditor {
    fn default() -> Self {
        Self::assemble(StudioConfig::default(), Room::default(), AssetLibrary::builtin())
    }
}

impl StudioEditor {
    /// Build an editor from a configuration and a model/texture library.
    pub fn new(config: StudioConfig, library: AssetLibrary) -> Result<Self, StudioError> {
        config.validate()?;
        let room = config.room().map_err(ConfigError::from)?;
        Ok(Self::assemble(config, room, library))
    }

    fn assemble(config: StudioConfig, room: Room, library: AssetLibrary) -> Self {
        let mut scene = SceneGraph::new();
        let room_node = scene.insert_root(
            SceneItem::Room,
            Transform::from_translation(config.room_origin),
        );
        Self {
            config,
            room,
            library,
            scene,
            room_node,
            selected: None,
            drag: DragState::Idle,
            painter: TexturePainter::new(),
            input: VecDeque::new(),
            events: Vec::new(),
            frame: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn textures(&self) -> &SurfaceTextures {
        &self.painter.textures
    }

    pub fn painter(&self) -> &TexturePainter {
        &self.painter
    }

    pub fn object_count(&self) -> usize {
        self.object_ids().len()
    }

    /// Ids of every placed object, in arena order.
    pub fn object_ids(&self) -> Vec<NodeId> {
        self.scene
            .iter()
            .filter(|(_, item)| item.as_object().is_some())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn object(&self, id: NodeId) -> Option<ObjectState> {
        let placed = self.scene.get(id)?.as_object()?;
        let local = self.scene.local(id)?;
        Some(ObjectState {
            asset_id: placed.asset_id.clone(),
            position: local.translation,
            rotation: local.rotation,
            scale: local.scale,
            footprint: placed.footprint(local.scale),
        })
    }

    /// Surface the object is attached to right now.
    pub fn surface_of(&self, id: NodeId) -> Option<Surface> {
        let position = self.scene.local(id)?.translation;
        self.scene.get(id)?.as_object()?;
        Some(classify_surface(position, &self.room, self.config.surface_threshold))
    }

    /// Events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<StudioEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // FRAME LOOP
    // ========================================================================

    pub fn queue_input(&mut self, event: InputEvent) {
        self.input.push_back(event);
    }

    /// Run one frame: apply queued input in arrival order, then snapshot.
    pub fn frame(&mut self) -> RenderSnapshot {
        while let Some(event) = self.input.pop_front() {
            if let Err(err) = self.handle_input(event) {
                tracing::warn!(%err, "ignored studio input");
            }
        }
        self.frame += 1;
        self.snapshot()
    }

    /// Apply one input event immediately.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<(), StudioError> {
        match event {
            InputEvent::PointerDown { ray } => {
                self.pointer_down(&ray)?;
            }
            InputEvent::PointerMove { ray } => {
                self.drag_to(&ray);
            }
            InputEvent::PointerUp | InputEvent::PointerCancel => {
                self.end_drag();
            }
            InputEvent::Key(key) => {
                self.handle_key(&key)?;
            }
            InputEvent::DropModel { asset_id, uv } => {
                self.drop_model(&asset_id, uv)?;
            }
            InputEvent::PickTexture { texture_id } => {
                self.pick_texture(&texture_id)?;
            }
            InputEvent::TextureHover { ray } => {
                self.hover_texture(&ray);
            }
            InputEvent::DropTexture { ray } => {
                self.drop_texture(&ray);
            }
        }
        Ok(())
    }

    /// Build the renderer's view of the current state.
    pub fn snapshot(&self) -> RenderSnapshot {
        let room_matrix = self.room_matrix();
        let mut snapshot = RenderSnapshot::new(self.frame, self.room, room_matrix);
        let dragging = self.drag.session().map(|s| s.object);

        for (id, item) in self.scene.iter() {
            let Some(placed) = item.as_object() else {
                continue;
            };
            let Some(model) = self.scene.world_matrix(id) else {
                continue;
            };
            let mut flags = 0;
            if self.selected == Some(id) {
                flags |= INSTANCE_FLAG_SELECTED;
            }
            if dragging == Some(id) {
                flags |= INSTANCE_FLAG_DRAGGING;
            }
            snapshot.push_instance(id, model, &placed.asset_id, flags);
        }

        snapshot.surfaces = Surface::ALL
            .into_iter()
            .map(|surface| SurfaceView {
                surface,
                texture: self.painter.textures.get(surface).map(str::to_string),
                highlighted: self.painter.highlighted() == Some(surface),
            })
            .collect();
        snapshot
    }

    fn room_matrix(&self) -> Mat4 {
        self.scene
            .world_matrix(self.room_node)
            .unwrap_or(Mat4::IDENTITY)
    }

    /// World-space ray expressed in room space.
    pub fn ray_to_room(&self, ray: &Ray) -> Ray {
        ray.transformed(&self.room_matrix().inverse())
    }

    // ========================================================================
    // OBJECT LIFECYCLE
    // ========================================================================

    /// Drop a library model at normalized viewport coordinates. The model
    /// lands on the floor under the drop point and becomes the selection.
    pub fn drop_model(&mut self, asset_id: &str, uv: (f32, f32)) -> Result<NodeId, StudioError> {
        let position = Vec3::new(
            uv.0 * self.room.width() - self.room.half_width(),
            0.0,
            self.room.half_depth() - uv.1 * self.room.depth(),
        );
        self.insert_object(asset_id, position, Surface::Floor)
    }

    /// Place a library model at a room-space position, snapped onto the
    /// surface it is closest to.
    pub fn add_object(&mut self, asset_id: &str, position: Vec3) -> Result<NodeId, StudioError> {
        let surface = classify_surface(position, &self.room, self.config.surface_threshold);
        self.insert_object(asset_id, position, surface)
    }

    fn insert_object(
        &mut self,
        asset_id: &str,
        position: Vec3,
        surface: Surface,
    ) -> Result<NodeId, StudioError> {
        let entry = self
            .library
            .model(asset_id)
            .ok_or_else(|| StudioError::UnknownModel(asset_id.to_string()))?;
        let placed = PlacedObject::new(asset_id, entry.half_extents());
        let position = constrain_position(position, surface, &self.room, placed.footprint(1.0));

        let id = self.scene.insert(
            SceneItem::Furniture(placed),
            Transform::from_translation(position),
            Some(self.room_node),
        )?;
        tracing::info!(%id, asset = asset_id, ?position, ?surface, "placed object");

        self.events.push(StudioEvent::ObjectAdded {
            id,
            asset_id: asset_id.to_string(),
            position,
        });
        self.select(Some(id));
        Ok(id)
    }

    /// Reposition an object from outside a drag (e.g. programmatically).
    /// The position is re-classified and constrained before it is committed.
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> Result<Vec3, StudioError> {
        let footprint = self.footprint(id)?;
        let surface = classify_surface(position, &self.room, self.config.surface_threshold);
        let position = constrain_position(position, surface, &self.room, footprint);
        self.commit_position(id, position)?;
        Ok(position)
    }

    fn footprint(&self, id: NodeId) -> Result<HalfExtents, StudioError> {
        self.object(id)
            .map(|o| o.footprint)
            .ok_or(StudioError::UnknownObject(id))
    }

    fn commit_position(&mut self, id: NodeId, position: Vec3) -> Result<(), StudioError> {
        let local = self
            .scene
            .local_mut(id)
            .ok_or(StudioError::UnknownObject(id))?;
        local.translation = position;
        self.events.push(StudioEvent::PositionUpdated { id, position });
        Ok(())
    }

    /// Delete an object. An active drag on it is discarded and a selection
    /// of it is cleared.
    pub fn remove_object(&mut self, id: NodeId) -> Result<(), StudioError> {
        if self.scene.get(id).and_then(SceneItem::as_object).is_none() {
            return Err(StudioError::UnknownObject(id));
        }
        if self.drag.discard_object(id) {
            tracing::debug!(%id, "discarded drag of deleted object");
        }
        if self.selected == Some(id) {
            self.select(None);
        }
        self.scene.remove_subtree(id);
        tracing::info!(%id, "removed object");
        self.events.push(StudioEvent::ObjectRemoved { id });
        Ok(())
    }

    /// Remove every placed object, keeping textures and the room.
    pub fn clear_objects(&mut self) {
        for id in self.object_ids() {
            // ids come straight from the arena
            let _ = self.remove_object(id);
        }
    }

    // ========================================================================
    // SELECTION AND KEYBOARD
    // ========================================================================

    pub fn select(&mut self, id: Option<NodeId>) {
        if self.selected != id {
            self.selected = id;
            self.events.push(StudioEvent::SelectionChanged { selected: id });
        }
    }

    /// Nearest object whose footprint box the world-space ray hits.
    pub fn pick_object(&self, ray: &Ray) -> Option<NodeId> {
        let local_ray = self.ray_to_room(ray);
        self.object_ids()
            .into_iter()
            .filter_map(|id| {
                let state = self.object(id)?;
                let aabb = Aabb::from_center(state.position, state.footprint);
                aabb.intersect_ray(&local_ray).map(|t| (id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Handle a key press. Returns whether the key did anything.
    pub fn handle_key(&mut self, key: &str) -> Result<bool, StudioError> {
        match EditCommand::from_key(key) {
            Some(command) => self.apply_command(command),
            None => Ok(false),
        }
    }

    /// Apply an edit to the selected object. Without a selection nothing happens.
    pub fn apply_command(&mut self, command: EditCommand) -> Result<bool, StudioError> {
        let Some(id) = self.selected else {
            return Ok(false);
        };

        if command == EditCommand::Delete {
            self.remove_object(id)?;
            return Ok(true);
        }

        let edit = self.config.edit;
        let local = self
            .scene
            .local_mut(id)
            .ok_or(StudioError::UnknownObject(id))?;
        local.rotation = rotated(local.rotation, command, &edit);
        local.scale = rescaled(local.scale, command, &edit);
        let (rotation, scale) = (local.rotation, local.scale);

        tracing::debug!(%id, ?command, ?rotation, scale, "edited object");
        self.events.push(StudioEvent::ObjectTransformed {
            id,
            rotation,
            scale,
        });
        if matches!(command, EditCommand::ScaleUp | EditCommand::ScaleDown) {
            self.refit(id)?;
        }
        Ok(true)
    }

    /// Pull an object back inside the room after its footprint changed.
    fn refit(&mut self, id: NodeId) -> Result<(), StudioError> {
        let state = self.object(id).ok_or(StudioError::UnknownObject(id))?;
        let surface = classify_surface(state.position, &self.room, self.config.surface_threshold);
        let position = constrain_position(state.position, surface, &self.room, state.footprint);
        if position != state.position {
            tracing::debug!(%id, ?position, ?surface, "refit after scale");
            self.commit_position(id, position)?;
        }
        Ok(())
    }

    // ========================================================================
    // DRAGGING
    // ========================================================================

    /// Pointer pressed on the object under the ray. A click on an
    /// unselected object only selects it; pressing on the selected object
    /// starts a drag.
    pub fn pointer_down(&mut self, ray: &Ray) -> Result<Option<Surface>, StudioError> {
        match self.pick_object(ray) {
            Some(id) if self.selected == Some(id) => self.begin_drag(id, ray).map(Some),
            Some(id) => {
                self.select(Some(id));
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Start dragging the selected object `id`, locking the surface it is on.
    pub fn begin_drag(&mut self, id: NodeId, ray: &Ray) -> Result<Surface, StudioError> {
        let origin = self
            .object(id)
            .ok_or(StudioError::UnknownObject(id))?
            .position;
        if self.selected != Some(id) {
            return Err(StudioError::NotSelected(id));
        }

        let local_ray = self.ray_to_room(ray);
        let session = DragSession::begin(
            id,
            origin,
            &local_ray,
            &self.room,
            self.config.surface_threshold,
        );
        if let Some(previous) = self.drag.begin(session) {
            self.events.push(StudioEvent::DragEnded {
                id: previous.object,
            });
        }
        tracing::debug!(%id, surface = ?session.surface, "drag started");
        self.events.push(StudioEvent::DragStarted {
            id,
            surface: session.surface,
        });
        Ok(session.surface)
    }

    /// Pointer moved. Commits and returns the new position of the dragged
    /// object, or `None` when idle or the ray misses the locked plane.
    pub fn drag_to(&mut self, ray: &Ray) -> Option<Vec3> {
        let session = *self.drag.session()?;
        let Some(state) = self.object(session.object) else {
            // object vanished under the drag
            self.drag.discard_object(session.object);
            return None;
        };

        let local_ray = self.ray_to_room(ray);
        let position = session.resolve(&local_ray, &self.room, state.footprint)?;
        tracing::debug!(id = %session.object, ?position, surface = ?session.surface, "drag");
        self.commit_position(session.object, position).ok()?;
        Some(position)
    }

    /// Pointer released or capture lost.
    pub fn end_drag(&mut self) -> Option<NodeId> {
        let session = self.drag.end()?;
        tracing::debug!(id = %session.object, "drag ended");
        self.events.push(StudioEvent::DragEnded {
            id: session.object,
        });
        Some(session.object)
    }

    // ========================================================================
    // TEXTURES
    // ========================================================================

    pub fn pick_texture(&mut self, texture_id: &str) -> Result<(), StudioError> {
        if self.library.texture(texture_id).is_none() {
            return Err(StudioError::UnknownTexture(texture_id.to_string()));
        }
        self.painter.pick(texture_id);
        Ok(())
    }

    /// Highlight the surface under the pointer.
    pub fn hover_texture(&mut self, ray: &Ray) -> Option<Surface> {
        let local_ray = self.ray_to_room(ray);
        match pick_surface(&local_ray, &self.room) {
            Some(hit) => {
                self.painter.pointer_over(hit.surface);
                Some(hit.surface)
            }
            None => {
                if let Some(current) = self.painter.highlighted() {
                    self.painter.pointer_out(current);
                }
                None
            }
        }
    }

    /// Drop the pending texture on the surface under the pointer.
    pub fn drop_texture(&mut self, ray: &Ray) -> Option<Surface> {
        let local_ray = self.ray_to_room(ray);
        let Some(hit) = pick_surface(&local_ray, &self.room) else {
            // released over nothing: keep the texture in hand
            if let Some(current) = self.painter.highlighted() {
                self.painter.pointer_out(current);
            }
            return None;
        };
        let event = self.painter.drop_on(hit.surface, &self.library)?;
        self.events.push(event);
        Some(hit.surface)
    }

    /// Apply a texture to a surface directly.
    pub fn apply_texture(&mut self, surface: Surface, texture_id: &str) -> Result<(), StudioError> {
        self.pick_texture(texture_id)?;
        if let Some(event) = self.painter.drop_on(surface, &self.library) {
            self.events.push(event);
        }
        Ok(())
    }

    pub(crate) fn textures_mut(&mut self) -> &mut SurfaceTextures {
        &mut self.painter.textures
    }

    pub(crate) fn set_transform(&mut self, id: NodeId, rotation: Vec3, scale: f32) -> Result<(), StudioError> {
        let local = self
            .scene
            .local_mut(id)
            .ok_or(StudioError::UnknownObject(id))?;
        local.rotation = rotation;
        local.scale = scale;
        Ok(())
    }
}
