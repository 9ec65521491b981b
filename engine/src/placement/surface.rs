//! Room Surfaces
//!
//! The six planar surfaces an object can rest on, and the classifier that
//! decides which one a position belongs to.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::world::Room;

/// Proximity tolerance used by the studio when classifying positions.
pub const DEFAULT_SURFACE_THRESHOLD: f32 = 0.3;

/// A coordinate axis of the room frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component index into a `Vec3`.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// One of the six room surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// y = 0
    Floor,
    /// y = height
    Ceiling,
    /// z = -depth/2
    Back,
    /// z = +depth/2
    Front,
    /// x = -width/2
    Left,
    /// x = +width/2
    Right,
}

impl Surface {
    /// All surfaces in classifier priority order.
    pub const ALL: [Surface; 6] = [
        Surface::Floor,
        Surface::Ceiling,
        Surface::Back,
        Surface::Front,
        Surface::Left,
        Surface::Right,
    ];

    /// Stable lowercase identifier, matching the serialized form.
    pub fn id(self) -> &'static str {
        match self {
            Surface::Floor => "floor",
            Surface::Ceiling => "ceiling",
            Surface::Back => "back",
            Surface::Front => "front",
            Surface::Left => "left",
            Surface::Right => "right",
        }
    }

    /// Human-readable name for notifications.
    pub fn display_name(self) -> &'static str {
        match self {
            Surface::Floor => "Floor",
            Surface::Ceiling => "Ceiling",
            Surface::Back => "Back Wall",
            Surface::Front => "Front Wall",
            Surface::Left => "Left Wall",
            Surface::Right => "Right Wall",
        }
    }

    /// Parse a lowercase surface id.
    pub fn from_id(id: &str) -> Option<Surface> {
        Surface::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Axis held constant while an object is attached to this surface.
    pub fn locked_axis(self) -> Axis {
        match self {
            Surface::Floor | Surface::Ceiling => Axis::Y,
            Surface::Back | Surface::Front => Axis::Z,
            Surface::Left | Surface::Right => Axis::X,
        }
    }

    /// The two axes an object may move along on this surface.
    pub fn free_axes(self) -> (Axis, Axis) {
        match self {
            Surface::Floor | Surface::Ceiling => (Axis::X, Axis::Z),
            Surface::Back | Surface::Front => (Axis::X, Axis::Y),
            Surface::Left | Surface::Right => (Axis::Z, Axis::Y),
        }
    }

    /// Coordinate of this surface's plane along its locked axis.
    pub fn plane_coordinate(self, room: &Room) -> f32 {
        match self {
            Surface::Floor => 0.0,
            Surface::Ceiling => room.height(),
            Surface::Back => -room.half_depth(),
            Surface::Front => room.half_depth(),
            Surface::Left => -room.half_width(),
            Surface::Right => room.half_width(),
        }
    }

    /// Unit normal pointing into the room.
    pub fn inward_normal(self) -> Vec3 {
        match self {
            Surface::Floor => Vec3::Y,
            Surface::Ceiling => Vec3::NEG_Y,
            Surface::Back => Vec3::Z,
            Surface::Front => Vec3::NEG_Z,
            Surface::Left => Vec3::X,
            Surface::Right => Vec3::NEG_X,
        }
    }
}

impl std::fmt::Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Decide which surface an object at `position` is attached to.
///
/// First match wins: floor, ceiling, back, front, left, right. A position
/// not within `threshold` of any surface falls back to the floor, so an
/// object near a floor/wall corner always reports `Floor`.
pub fn classify_surface(position: Vec3, room: &Room, threshold: f32) -> Surface {
    let half_width = room.half_width();
    let half_depth = room.half_depth();

    if position.y < threshold {
        Surface::Floor
    } else if position.y > room.height() - threshold {
        Surface::Ceiling
    } else if (position.z + half_depth).abs() < threshold {
        Surface::Back
    } else if (position.z - half_depth).abs() < threshold {
        Surface::Front
    } else if (position.x + half_width).abs() < threshold {
        Surface::Left
    } else if (position.x - half_width).abs() < threshold {
        Surface::Right
    } else {
        Surface::Floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(10.0, 5.0, 10.0).unwrap()
    }

    #[test]
    fn test_near_ceiling_is_ceiling() {
        let s = classify_surface(Vec3::new(0.0, 4.9, 0.0), &room(), 0.3);
        assert_eq!(s, Surface::Ceiling);
    }

    #[test]
    fn test_walls() {
        let r = room();
        assert_eq!(classify_surface(Vec3::new(0.0, 2.0, -4.9), &r, 0.3), Surface::Back);
        assert_eq!(classify_surface(Vec3::new(0.0, 2.0, 5.1), &r, 0.3), Surface::Front);
        assert_eq!(classify_surface(Vec3::new(-5.0, 2.0, 1.0), &r, 0.3), Surface::Left);
        assert_eq!(classify_surface(Vec3::new(4.8, 2.0, 1.0), &r, 0.3), Surface::Right);
    }

    #[test]
    fn test_interior_falls_back_to_floor() {
        let s = classify_surface(Vec3::new(1.0, 2.5, -1.0), &room(), 0.3);
        assert_eq!(s, Surface::Floor);
    }

    #[test]
    fn test_corner_priority() {
        let r = room();
        // floor/back corner: floor wins
        assert_eq!(classify_surface(Vec3::new(0.0, 0.1, -5.0), &r, 0.3), Surface::Floor);
        // back/left corner: back wins
        assert_eq!(classify_surface(Vec3::new(-5.0, 2.0, -5.0), &r, 0.3), Surface::Back);
        // ceiling/right corner: ceiling wins
        assert_eq!(classify_surface(Vec3::new(5.0, 5.0, 0.0), &r, 0.3), Surface::Ceiling);
    }

    #[test]
    fn test_threshold_is_strict() {
        let r = room();
        // exactly at the threshold is not "near"
        assert_eq!(classify_surface(Vec3::new(0.0, 2.0, -4.75), &r, 0.25), Surface::Floor);
    }

    #[test]
    fn test_plane_coordinates() {
        let r = room();
        assert_eq!(Surface::Floor.plane_coordinate(&r), 0.0);
        assert_eq!(Surface::Ceiling.plane_coordinate(&r), 5.0);
        assert_eq!(Surface::Back.plane_coordinate(&r), -5.0);
        assert_eq!(Surface::Front.plane_coordinate(&r), 5.0);
        assert_eq!(Surface::Left.plane_coordinate(&r), -5.0);
        assert_eq!(Surface::Right.plane_coordinate(&r), 5.0);
    }

    #[test]
    fn test_normals_match_locked_axis() {
        for s in Surface::ALL {
            let n = s.inward_normal();
            assert_eq!(n.abs(), s.locked_axis().unit(), "{s:?}");
        }
    }

    #[test]
    fn test_ids_roundtrip_and_serde() {
        for s in Surface::ALL {
            assert_eq!(Surface::from_id(s.id()), Some(s));
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.id()));
        }
        assert_eq!(Surface::from_id("attic"), None);
        assert_eq!(Surface::Back.to_string(), "Back Wall");
    }
}
