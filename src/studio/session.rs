//! Drag Sessions
//!
//! `Idle -> Dragging -> Idle`. The surface is classified once when the drag
//! starts and stays locked until the pointer is released; every move is
//! resolved against that surface only.

use glam::Vec3;

use crate::camera::{Ray, raycast_to_surface};
use crate::placement::{HalfExtents, Surface, classify_surface, constrain_position};
use crate::scene::NodeId;
use crate::world::Room;

/// State of one active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Object being dragged
    pub object: NodeId,
    /// Surface locked in at drag start
    pub surface: Surface,
    /// Drag anchor minus object origin, both on the locked plane
    pub offset: Vec3,
}

impl DragSession {
    /// Start a drag on an object at `origin` (room space).
    ///
    /// The anchor is where the pointer ray meets the locked surface plane.
    /// If the ray misses that plane the anchor is the origin itself.
    pub fn begin(object: NodeId, origin: Vec3, ray: &Ray, room: &Room, threshold: f32) -> Self {
        let surface = classify_surface(origin, room, threshold);
        let anchor = raycast_to_surface(ray, surface, room).unwrap_or(origin);
        Self {
            object,
            surface,
            offset: anchor - origin,
        }
    }

    /// Unconstrained position under the pointer, or `None` when the ray
    /// does not reach the locked plane.
    pub fn propose(&self, ray: &Ray, room: &Room) -> Option<Vec3> {
        raycast_to_surface(ray, self.surface, room).map(|hit| hit - self.offset)
    }

    /// Constrained position for this pointer ray.
    pub fn resolve(&self, ray: &Ray, room: &Room, footprint: HalfExtents) -> Option<Vec3> {
        self.propose(ray, room)
            .map(|proposed| constrain_position(proposed, self.surface, room, footprint))
    }
}

/// Drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Enter `Dragging`, replacing any session still open.
    pub fn begin(&mut self, session: DragSession) -> Option<DragSession> {
        let previous = self.end();
        *self = DragState::Dragging(session);
        previous
    }

    /// Return to `Idle`, handing back the finished session.
    pub fn end(&mut self) -> Option<DragSession> {
        match std::mem::take(self) {
            DragState::Dragging(session) => Some(session),
            DragState::Idle => None,
        }
    }

    /// Drop the session if it is dragging `object`. Returns whether it did.
    pub fn discard_object(&mut self, object: NodeId) -> bool {
        if self.session().is_some_and(|s| s.object == object) {
            *self = DragState::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{SceneGraph, Transform};

    fn node() -> NodeId {
        let mut graph = SceneGraph::new();
        graph.insert((), Transform::IDENTITY, None).unwrap()
    }

    fn looking_down(at: Vec3) -> Ray {
        Ray::new(at + Vec3::new(0.0, 4.0, 0.0), Vec3::NEG_Y)
    }

    #[test]
    fn test_begin_locks_surface_and_offset() {
        let room = Room::default();
        let origin = Vec3::new(1.0, 0.0, 1.0);
        let session = DragSession::begin(node(), origin, &looking_down(Vec3::new(1.5, 0.0, 0.5)), &room, 0.3);
        assert_eq!(session.surface, Surface::Floor);
        assert!(session.offset.abs_diff_eq(Vec3::new(0.5, 0.0, -0.5), 1e-5));
    }

    #[test]
    fn test_resolve_keeps_grab_point_under_pointer() {
        let room = Room::default();
        let origin = Vec3::new(1.0, 0.0, 1.0);
        let session = DragSession::begin(node(), origin, &looking_down(Vec3::new(1.5, 0.0, 0.5)), &room, 0.3);

        let moved = session
            .resolve(&looking_down(Vec3::new(2.5, 0.0, 0.5)), &room, HalfExtents::uniform(0.5))
            .unwrap();
        assert!(moved.abs_diff_eq(Vec3::new(2.0, 0.0, 1.0), 1e-5));
    }

    #[test]
    fn test_resolve_clamps_to_surface() {
        let room = Room::default();
        let origin = Vec3::new(0.0, 2.0, -5.0);
        let toward_back = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z);
        let session = DragSession::begin(node(), origin, &toward_back, &room, 0.3);
        assert_eq!(session.surface, Surface::Back);

        // pointer far up and to the right on the back wall plane
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(2.0, 1.0, -1.0));
        let out = session.resolve(&ray, &room, HalfExtents::uniform(0.5)).unwrap();
        assert_eq!(out.z, -5.0);
        assert!((out.x - 4.5).abs() < 1e-5);
        assert!((out.y - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_ray_proposes_nothing() {
        let room = Room::default();
        let session = DragSession::begin(node(), Vec3::ZERO, &looking_down(Vec3::ZERO), &room, 0.3);
        let flat = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(session.propose(&flat, &room).is_none());
    }

    #[test]
    fn test_state_machine() {
        let room = Room::default();
        let id = node();
        let mut state = DragState::default();
        assert!(!state.is_dragging());
        assert!(state.end().is_none());

        state.begin(DragSession::begin(id, Vec3::ZERO, &looking_down(Vec3::ZERO), &room, 0.3));
        assert!(state.is_dragging());
        assert_eq!(state.session().unwrap().object, id);

        let done = state.end().unwrap();
        assert_eq!(done.object, id);
        assert_eq!(state, DragState::Idle);
    }

    #[test]
    fn test_discard_only_matching_object() {
        let room = Room::default();
        let mut graph = SceneGraph::new();
        let a = graph.insert((), Transform::IDENTITY, None).unwrap();
        let b = graph.insert((), Transform::IDENTITY, None).unwrap();

        let mut state = DragState::default();
        state.begin(DragSession::begin(a, Vec3::ZERO, &looking_down(Vec3::ZERO), &room, 0.3));
        assert!(!state.discard_object(b));
        assert!(state.is_dragging());
        assert!(state.discard_object(a));
        assert!(!state.is_dragging());
    }
}
