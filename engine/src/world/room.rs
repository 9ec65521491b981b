//! Room Bounds
//!
//! The studio room is an axis-aligned box centered on the X/Z origin with
//! its floor at Y=0. All placement math works in this room-local frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Default studio room width (meters)
pub const DEFAULT_ROOM_WIDTH: f32 = 10.0;
/// Default studio room height (meters)
pub const DEFAULT_ROOM_HEIGHT: f32 = 5.0;
/// Default studio room depth (meters)
pub const DEFAULT_ROOM_DEPTH: f32 = 10.0;

/// Rejected room dimensions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomError {
    #[error("room {axis} must be positive and finite, got {value}")]
    InvalidDimension { axis: &'static str, value: f32 },
}

/// Axis-aligned room box.
///
/// Fields are private so that every `Room` in circulation has positive,
/// finite dimensions. Use [`Room::new`] to build one from untrusted values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RoomDimensions", into = "RoomDimensions")]
pub struct Room {
    width: f32,
    height: f32,
    depth: f32,
}

/// Plain serialized form of a [`Room`]. Missing fields take the studio defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Room::default().into()
    }
}

impl Default for Room {
    fn default() -> Self {
        Self {
            width: DEFAULT_ROOM_WIDTH,
            height: DEFAULT_ROOM_HEIGHT,
            depth: DEFAULT_ROOM_DEPTH,
        }
    }
}

impl Room {
    /// Create a room, rejecting zero, negative, NaN or infinite dimensions.
    pub fn new(width: f32, height: f32, depth: f32) -> Result<Self, RoomError> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        check_dimension("depth", depth)?;
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    #[inline]
    pub fn half_depth(&self) -> f32 {
        self.depth * 0.5
    }

    /// Minimum corner in room-local space.
    pub fn min_corner(&self) -> Vec3 {
        Vec3::new(-self.half_width(), 0.0, -self.half_depth())
    }

    /// Maximum corner in room-local space.
    pub fn max_corner(&self) -> Vec3 {
        Vec3::new(self.half_width(), self.height, self.half_depth())
    }

    /// Center of the room volume.
    pub fn center(&self) -> Vec3 {
        Vec3::new(0.0, self.height * 0.5, 0.0)
    }

    /// Whether a room-local point lies inside or on the boundary of the box.
    pub fn contains(&self, point: Vec3) -> bool {
        let min = self.min_corner();
        let max = self.max_corner();
        point.cmpge(min).all() && point.cmple(max).all()
    }
}

fn check_dimension(axis: &'static str, value: f32) -> Result<(), RoomError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RoomError::InvalidDimension { axis, value })
    }
}

impl TryFrom<RoomDimensions> for Room {
    type Error = RoomError;

    fn try_from(dims: RoomDimensions) -> Result<Self, Self::Error> {
        Room::new(dims.width, dims.height, dims.depth)
    }
}

impl From<Room> for RoomDimensions {
    fn from(room: Room) -> Self {
        Self {
            width: room.width,
            height: room.height,
            depth: room.depth,
        }
    }
}
