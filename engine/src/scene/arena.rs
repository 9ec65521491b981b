//! Scene Arena
//!
//! A tree of transform nodes stored in a generational arena. Nodes refer to
//! their parent by [`NodeId`]; there are no back-references from children,
//! so selection and drag state can hold ids without borrowing the scene.

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Stable handle to a scene node.
///
/// The generation changes every time a slot is reused, so an id held past
/// the removal of its node never resolves to a different node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Parent-relative pose of a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Uniform scale
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.translation)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("scene node {0} does not exist")]
    MissingNode(NodeId),
}

#[derive(Debug, Clone)]
struct Node<T> {
    parent: Option<NodeId>,
    local: Transform,
    data: T,
}

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied { generation: u32, node: Node<T> },
    Vacant { generation: u32, next_free: Option<u32> },
}

/// Generational arena of transform nodes carrying a payload `T`.
#[derive(Debug, Clone)]
pub struct SceneGraph<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    len: usize,
}

impl<T> Default for SceneGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SceneGraph<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a node under `parent` (or at the root when `None`).
    pub fn insert(
        &mut self,
        data: T,
        local: Transform,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if let Some(p) = parent {
            if !self.contains(p) {
                return Err(SceneError::MissingNode(p));
            }
        }
        Ok(self.alloc(Node {
            parent,
            local,
            data,
        }))
    }

    /// Insert a parentless node.
    pub fn insert_root(&mut self, data: T, local: Transform) -> NodeId {
        self.alloc(Node {
            parent: None,
            local,
            data,
        })
    }

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        let id = match self.free_head {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                let (generation, next_free) = match *slot {
                    Slot::Vacant {
                        generation,
                        next_free,
                    } => (generation, next_free),
                    // Free list only ever links vacant slots
                    Slot::Occupied { .. } => unreachable!("free list points at occupied slot"),
                };
                *slot = Slot::Occupied { generation, node };
                self.free_head = next_free;
                NodeId { index, generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot::Occupied {
                    generation: 0,
                    node,
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };
        self.len += 1;
        id
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: NodeId) -> Option<&Node<T>> {
        match self.slots.get(id.index as usize)? {
            Slot::Occupied { generation, node } if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        match self.slots.get_mut(id.index as usize)? {
            Slot::Occupied { generation, node } if *generation == id.generation => Some(node),
            _ => None,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|n| &n.data)
    }

    pub fn local(&self, id: NodeId) -> Option<&Transform> {
        self.node(id).map(|n| &n.local)
    }

    pub fn local_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.node_mut(id).map(|n| &mut n.local)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Direct children of `id`, in slot order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|(child, _)| self.parent(*child) == Some(id))
            .map(|(child, _)| child)
            .collect()
    }

    /// Local-to-world matrix, composed up the parent chain.
    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut matrix = node.local.matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            matrix = node.local.matrix() * matrix;
        }
        Some(matrix)
    }

    /// Remove a node and all of its descendants, returning their payloads
    /// with the removed node first. Stale ids remove nothing.
    pub fn remove_subtree(&mut self, id: NodeId) -> Vec<(NodeId, T)> {
        if !self.contains(id) {
            return Vec::new();
        }

        let mut doomed = vec![id];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let current = doomed[cursor];
            doomed.extend(self.children(current));
            cursor += 1;
        }

        doomed
            .into_iter()
            .filter_map(|victim| self.vacate(victim).map(|data| (victim, data)))
            .collect()
    }

    fn vacate(&mut self, id: NodeId) -> Option<T> {
        let slot = self.slots.get_mut(id.index as usize)?;
        match slot {
            Slot::Occupied { generation, .. } if *generation == id.generation => {
                let vacant = Slot::Vacant {
                    generation: generation.wrapping_add(1),
                    next_free: self.free_head,
                };
                let Slot::Occupied { node, .. } = std::mem::replace(slot, vacant) else {
                    return None;
                };
                self.free_head = Some(id.index);
                self.len -= 1;
                Some(node.data)
            }
            _ => None,
        }
    }

    /// Iterate live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied { generation, node } => Some((
                    NodeId {
                        index: index as u32,
                        generation: *generation,
                    },
                    &node.data,
                )),
                Slot::Vacant { .. } => None,
            })
    }

    /// Drop every node. Ids handed out before remain stale forever.
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.iter().map(|(id, _)| id).collect();
        for id in ids {
            self.vacate(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_get_remove() {
        let mut graph = SceneGraph::new();
        let a = graph.insert("a", Transform::IDENTITY, None).unwrap();
        let b = graph.insert("b", Transform::IDENTITY, None).unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get(a), Some(&"a"));

        let removed = graph.remove_subtree(a);
        assert_eq!(removed, vec![(a, "a")]);
        assert!(!graph.contains(a));
        assert_eq!(graph.get(b), Some(&"b"));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_stale_id_after_slot_reuse() {
        let mut graph = SceneGraph::new();
        let old = graph.insert(1, Transform::IDENTITY, None).unwrap();
        graph.remove_subtree(old);
        let new = graph.insert(2, Transform::IDENTITY, None).unwrap();

        assert_eq!(old.index(), new.index());
        assert_ne!(old.generation(), new.generation());
        assert_eq!(graph.get(old), None);
        assert_eq!(graph.get(new), Some(&2));
        assert!(graph.remove_subtree(old).is_empty());
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut graph = SceneGraph::new();
        let p = graph.insert((), Transform::IDENTITY, None).unwrap();
        graph.remove_subtree(p);
        let err = graph.insert((), Transform::IDENTITY, Some(p)).unwrap_err();
        assert_eq!(err, SceneError::MissingNode(p));
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut graph = SceneGraph::new();
        let room = graph.insert_root("room", Transform::from_translation(Vec3::new(0.0, 0.01, 0.0)));
        let chair = graph
            .insert(
                "chair",
                Transform {
                    translation: Vec3::new(1.0, 0.0, 2.0),
                    rotation: Vec3::ZERO,
                    scale: 2.0,
                },
                Some(room),
            )
            .unwrap();

        let world = graph.world_matrix(chair).unwrap();
        let origin = world.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(1.0, 0.01, 2.0), 1e-6));
        let unit = world.transform_vector3(Vec3::X);
        assert!(unit.abs_diff_eq(Vec3::new(2.0, 0.0, 0.0), 1e-6));
    }

    #[test]
    fn test_remove_subtree_takes_descendants() {
        let mut graph = SceneGraph::new();
        let root = graph.insert("root", Transform::IDENTITY, None).unwrap();
        let child = graph.insert("child", Transform::IDENTITY, Some(root)).unwrap();
        let grandchild = graph
            .insert("grandchild", Transform::IDENTITY, Some(child))
            .unwrap();
        let other = graph.insert("other", Transform::IDENTITY, None).unwrap();

        assert_eq!(graph.children(root), vec![child]);

        let removed = graph.remove_subtree(root);
        let names: Vec<&str> = removed.iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["root", "child", "grandchild"]);
        assert!(!graph.contains(grandchild));
        assert!(graph.contains(other));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut graph = SceneGraph::new();
        let a = graph.insert(0u8, Transform::IDENTITY, None).unwrap();
        graph.clear();
        assert!(graph.is_empty());
        assert!(!graph.contains(a));
        let b = graph.insert(1u8, Transform::IDENTITY, None).unwrap();
        assert_ne!(a, b);
    }
}
