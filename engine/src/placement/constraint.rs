//! Placement Constraint Solver
//!
//! Glues a proposed position onto the plane of a locked surface and keeps
//! the object's footprint inside that surface's rectangle.

use glam::Vec3;

use super::footprint::HalfExtents;
use super::surface::{Axis, Surface};
use crate::world::Room;

/// Constrain `proposed` to `surface`.
///
/// The locked axis is set to the surface plane coordinate. Each free axis is
/// clamped so the footprint stays within the surface bounds:
///
/// | Surface       | Locked | Free axis 1              | Free axis 2       |
/// |---------------|--------|--------------------------|-------------------|
/// | Floor/Ceiling | y      | x in [-W/2+fw, W/2-fw]   | z in [-D/2+fd, D/2-fd] |
/// | Back/Front    | z      | x in [-W/2+fw, W/2-fw]   | y in [fh, H-fh]   |
/// | Left/Right    | x      | z in [-D/2+fd, D/2-fd]   | y in [fh, H-fh]   |
///
/// When the object is larger than the room along a free axis the range
/// inverts; the axis is then placed at the range midpoint.
pub fn constrain_position(
    proposed: Vec3,
    surface: Surface,
    room: &Room,
    footprint: HalfExtents,
) -> Vec3 {
    let mut out = proposed;
    out[surface.locked_axis().index()] = surface.plane_coordinate(room);

    let (a, b) = surface.free_axes();
    for axis in [a, b] {
        let (min, max) = free_axis_range(axis, room, footprint);
        let i = axis.index();
        out[i] = clamp_or_midpoint(out[i], min, max);
    }
    out
}

/// Allowed range for an object's origin along a free axis.
pub fn free_axis_range(axis: Axis, room: &Room, footprint: HalfExtents) -> (f32, f32) {
    match axis {
        Axis::X => (
            -room.half_width() + footprint.fw,
            room.half_width() - footprint.fw,
        ),
        Axis::Y => (footprint.fh, room.height() - footprint.fh),
        Axis::Z => (
            -room.half_depth() + footprint.fd,
            room.half_depth() - footprint.fd,
        ),
    }
}

/// Clamp into `[min, max]`, or return the midpoint when the range is
/// inverted or the value is not a number.
#[inline]
pub fn clamp_or_midpoint(value: f32, min: f32, max: f32) -> f32 {
    if min > max || !value.is_finite() {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room::new(10.0, 5.0, 10.0).unwrap()
    }

    #[test]
    fn test_floor_clamps_x() {
        let out = constrain_position(
            Vec3::new(6.0, 0.0, 0.0),
            Surface::Floor,
            &room(),
            HalfExtents::uniform(0.5),
        );
        assert_eq!(out, Vec3::new(4.5, 0.0, 0.0));
    }

    #[test]
    fn test_left_locks_x_to_wall() {
        let out = constrain_position(
            Vec3::new(-10.0, 2.0, 3.0),
            Surface::Left,
            &room(),
            HalfExtents::uniform(0.5),
        );
        assert_eq!(out, Vec3::new(-5.0, 2.0, 3.0));
    }

    #[test]
    fn test_ceiling_locks_y() {
        let out = constrain_position(
            Vec3::new(0.0, 3.3, -7.0),
            Surface::Ceiling,
            &room(),
            HalfExtents::new(0.5, 0.5, 1.0),
        );
        assert_eq!(out, Vec3::new(0.0, 5.0, -4.0));
    }

    #[test]
    fn test_back_wall_clamps_height() {
        let out = constrain_position(
            Vec3::new(0.0, 0.1, -2.0),
            Surface::Back,
            &room(),
            HalfExtents::new(0.5, 0.75, 0.5),
        );
        assert_eq!(out, Vec3::new(0.0, 0.75, -5.0));
    }

    #[test]
    fn test_inverted_range_uses_midpoint() {
        let narrow = Room::new(0.5, 5.0, 10.0).unwrap();
        let out = constrain_position(
            Vec3::new(3.0, 0.0, 1.0),
            Surface::Floor,
            &narrow,
            HalfExtents::new(1.0, 0.5, 0.5),
        );
        assert_eq!(out.x, 0.0);
        assert_eq!(out.z, 1.0);

        // Object taller than the room on a wall
        let low = Room::new(10.0, 1.0, 10.0).unwrap();
        let out = constrain_position(
            Vec3::new(0.0, 0.9, 0.0),
            Surface::Right,
            &low,
            HalfExtents::new(0.5, 2.0, 0.5),
        );
        assert_eq!(out.y, 0.5);
        assert_eq!(out.x, 5.0);
    }

    #[test]
    fn test_overflowing_footprint_uses_midpoint() {
        let huge = HalfExtents::new(1.0, 1.0, 1.0).scaled(f32::MAX * 2.0);
        assert_eq!(huge, HalfExtents::uniform(f32::MAX));

        let out = constrain_position(Vec3::new(3.0, 0.0, -2.0), Surface::Floor, &room(), huge);
        assert_eq!(out, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_nan_free_axis_resolves_to_midpoint() {
        let out = constrain_position(
            Vec3::new(f32::NAN, 0.0, 2.0),
            Surface::Floor,
            &room(),
            HalfExtents::uniform(0.5),
        );
        assert_eq!(out, Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_idempotent() {
        let r = room();
        let fp = HalfExtents::new(0.4, 0.9, 0.3);
        for surface in Surface::ALL {
            let once = constrain_position(Vec3::new(7.0, -3.0, 2.5), surface, &r, fp);
            let twice = constrain_position(once, surface, &r, fp);
            assert_eq!(once, twice, "{surface:?}");
        }
    }
}
