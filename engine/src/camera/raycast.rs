//! Raycast Module
//!
//! Pointer rays for object placement: screen UV to world ray, and ray
//! intersection with the axis-aligned planes of the room.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::placement::{Axis, Surface};
use crate::world::Room;

/// Rays closer to parallel than this are treated as missing a plane.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Slack when testing whether a plane hit lies on a room face.
const FACE_EPSILON: f32 = 1e-4;

/// A ray with a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Ray from a camera through a screen point.
    ///
    /// # Arguments
    /// * `camera_pos` - Camera position in world space
    /// * `camera_target` - Point the camera is looking at
    /// * `uv` - Normalized screen coordinates (0-1, 0-1) where (0,0) is bottom-left
    /// * `aspect_ratio` - Screen aspect ratio (width / height)
    /// * `fov` - Vertical field of view in radians
    pub fn from_camera(
        camera_pos: Vec3,
        camera_target: Vec3,
        uv: (f32, f32),
        aspect_ratio: f32,
        fov: f32,
    ) -> Self {
        Self::new(
            camera_pos,
            get_ray_direction(camera_pos, camera_target, uv, aspect_ratio, fov),
        )
    }

    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Move the ray into another frame (e.g. world space to room space).
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self::new(
            matrix.transform_point3(self.origin),
            matrix.transform_vector3(self.direction),
        )
    }
}

/// Calculate ray direction from screen UV coordinates
///
/// The center of the screen maps to the direction from `camera_pos` to
/// `camera_target`. Falls back to world X as the right vector when looking
/// straight up or down.
pub fn get_ray_direction(
    camera_pos: Vec3,
    camera_target: Vec3,
    uv: (f32, f32),
    aspect_ratio: f32,
    fov: f32,
) -> Vec3 {
    let ndc = (uv.0 * 2.0 - 1.0, uv.1 * 2.0 - 1.0);
    let half_fov = (fov * 0.5_f32).tan();

    let forward = (camera_target - camera_pos).normalize_or(Vec3::NEG_Z);

    let (right, up) = if forward.y.abs() > 0.99 {
        let right = Vec3::X;
        let up = right.cross(forward).normalize();
        (right, up)
    } else {
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    };

    (forward + right * ndc.0 * aspect_ratio * half_fov + up * ndc.1 * half_fov).normalize()
}

/// Intersect a ray with the plane `axis = coordinate`.
///
/// # Returns
/// * `Some(Vec3)` - The hit point, with the plane axis set exactly to `coordinate`
/// * `None` - If the ray is parallel to the plane or the plane is behind the origin
pub fn intersect_axis_plane(ray: &Ray, axis: Axis, coordinate: f32) -> Option<Vec3> {
    let i = axis.index();
    let denom = ray.direction[i];
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let t = (coordinate - ray.origin[i]) / denom;
    if t < 0.0 {
        return None;
    }

    let mut hit = ray.point_at(t);
    hit[i] = coordinate;
    Some(hit)
}

/// Intersect a room-space ray with the plane of `surface`.
pub fn raycast_to_surface(ray: &Ray, surface: Surface, room: &Room) -> Option<Vec3> {
    intersect_axis_plane(ray, surface.locked_axis(), surface.plane_coordinate(room))
}

/// A room face under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub surface: Surface,
    pub point: Vec3,
    pub distance: f32,
}

/// Find the nearest room face hit by a room-space ray.
///
/// Works from inside the room (the usual studio camera) and from outside,
/// where the far faces are only reachable through the open near ones.
pub fn pick_surface(ray: &Ray, room: &Room) -> Option<SurfaceHit> {
    let min = room.min_corner() - Vec3::splat(FACE_EPSILON);
    let max = room.max_corner() + Vec3::splat(FACE_EPSILON);

    let mut best: Option<SurfaceHit> = None;
    for surface in Surface::ALL {
        let Some(point) = raycast_to_surface(ray, surface, room) else {
            continue;
        };
        if !(point.cmpge(min).all() && point.cmple(max).all()) {
            continue;
        }
        let distance = (point - ray.origin).length();
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(SurfaceHit {
                surface,
                point,
                distance,
            });
        }
    }
    best
}

/// Raycast configuration for convenience
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Screen aspect ratio (width / height)
    pub aspect_ratio: f32,
    /// Field of view in radians
    pub fov: f32,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            fov: 1.2, // ~69 degrees
        }
    }
}

impl RaycastConfig {
    /// Create a new raycast config with the given aspect ratio
    pub fn with_aspect(aspect_ratio: f32) -> Self {
        Self {
            aspect_ratio,
            ..Default::default()
        }
    }

    /// Build a pointer ray using this config
    pub fn ray(&self, camera_pos: Vec3, camera_target: Vec3, uv: (f32, f32)) -> Ray {
        Ray::from_camera(camera_pos, camera_target, uv, self.aspect_ratio, self.fov)
    }
}
