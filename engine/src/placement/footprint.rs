//! Object Footprint
//!
//! Half-extents of a placed object and the bounding boxes they come from.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::raycast::Ray;

/// Half sizes of an object along X (fw), Y (fh) and Z (fd).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HalfExtents {
    pub fw: f32,
    pub fh: f32,
    pub fd: f32,
}

impl HalfExtents {
    /// Create half extents. Negative or NaN inputs are treated as zero.
    pub fn new(fw: f32, fh: f32, fd: f32) -> Self {
        Self {
            fw: sanitize(fw),
            fh: sanitize(fh),
            fd: sanitize(fd),
        }
    }

    /// Same half-extent on every axis.
    pub fn uniform(half: f32) -> Self {
        Self::new(half, half, half)
    }

    /// Half extents of a box with the given full size.
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size.x * 0.5, size.y * 0.5, size.z * 0.5)
    }

    /// Footprint after uniform scaling.
    pub fn scaled(self, scale: f32) -> Self {
        Self::new(self.fw * scale, self.fh * scale, self.fd * scale)
    }

    pub fn as_vec3(self) -> Vec3 {
        Vec3::new(self.fw, self.fh, self.fd)
    }
}

/// Negative and NaN extents collapse to zero; infinite ones saturate.
fn sanitize(v: f32) -> f32 {
    if v > 0.0 { v.min(f32::MAX) } else { 0.0 }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box around `center` reaching `half` along each axis.
    pub fn from_center(center: Vec3, half: HalfExtents) -> Self {
        let h = half.as_vec3();
        Self::new(center - h, center + h)
    }

    /// Bounds of a vertex cloud. An empty cloud yields a zero box at the origin.
    pub fn from_vertices(vertices: &[[f32; 3]]) -> Self {
        let Some(first) = vertices.first() else {
            return Self::new(Vec3::ZERO, Vec3::ZERO);
        };
        let mut min = Vec3::from_array(*first);
        let mut max = min;
        for v in &vertices[1..] {
            let p = Vec3::from_array(*v);
            min = min.min(p);
            max = max.max(p);
        }
        Self::new(min, max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> HalfExtents {
        HalfExtents::from_size(self.size())
    }

    /// Slab test. Returns the distance along the ray to the first hit, or
    /// the exit distance when the ray starts inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv_dir = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv_dir;
        let t1 = (self.max - ray.origin) * inv_dir;

        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_extents_sanitized() {
        let h = HalfExtents::new(-1.0, f32::NAN, 0.5);
        assert_eq!(h, HalfExtents::new(0.0, 0.0, 0.5));

        let inf = HalfExtents::new(f32::INFINITY, f32::NEG_INFINITY, 1.0);
        assert_eq!(inf, HalfExtents::new(f32::MAX, 0.0, 1.0));
    }

    #[test]
    fn test_scaled_footprint() {
        let h = HalfExtents::from_size(Vec3::new(1.0, 2.0, 0.5)).scaled(2.0);
        assert_eq!(h, HalfExtents::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_aabb_from_vertices() {
        let aabb = Aabb::from_vertices(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [-1.0, -2.0, -1.0]]);
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -1.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(aabb.half_extents(), HalfExtents::new(1.0, 1.5, 1.0));
        assert_eq!(Aabb::from_vertices(&[]).size(), Vec3::ZERO);
    }

    #[test]
    fn test_ray_aabb_intersection() {
        let aabb = Aabb::from_center(Vec3::ZERO, HalfExtents::uniform(1.0));

        let hit = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        let t = aabb.intersect_ray(&hit).unwrap();
        assert!((t - 4.0).abs() < 1e-5);

        let miss = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&behind).is_none());

        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        let t = aabb.intersect_ray(&inside).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }
}
