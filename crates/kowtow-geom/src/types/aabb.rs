// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use kowtow_math::{Fx, Vec3};

use super::pose::Pose;
use super::shape::Shape;

/// Axis-aligned bounding box in world coordinates.
///
/// Stored as its two extreme corners so that bounds derived from points are
/// exact; [`Aabb::position`] and [`Aabb::size`] give the center/extent view.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Builds a box from its center and full size; negative sizes are taken
    /// by magnitude.
    pub fn new(position: Vec3, size: Vec3) -> Self {
        let half = size.abs() * Fx::HALF;
        Self {
            min: position - half,
            max: position + half,
        }
    }

    /// Builds a box from two corners, in any order.
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// World bounds of `shape` placed at `pose`.
    ///
    /// Boxes and cylinders bound the 8 rotated corners of their local hull;
    /// spheres are rotation-invariant and only move their center.
    pub fn from_shape(shape: &Shape, pose: &Pose) -> Self {
        let center = shape.center();
        let half = shape.hull_half_extents();
        if let Shape::Sphere(_) = shape {
            return Self::new(pose.transform_point(center), half * Fx::TWO);
        }
        let mut min = Vec3::new(Fx::MAX, Fx::MAX, Fx::MAX);
        let mut max = Vec3::new(Fx::MIN, Fx::MIN, Fx::MIN);
        for sx in [-half.x, half.x] {
            for sy in [-half.y, half.y] {
                for sz in [-half.z, half.z] {
                    let p = pose.transform_point(center + Vec3::new(sx, sy, sz));
                    min = min.min(p);
                    max = max.max(p);
                }
            }
        }
        Self { min, max }
    }

    /// Bounds of the segment `start..end`.
    pub fn from_segment(start: Vec3, end: Vec3) -> Self {
        Self::from_min_max(start, end)
    }

    /// Minimum corner.
    pub const fn min(&self) -> Vec3 {
        self.min
    }

    /// Maximum corner.
    pub const fn max(&self) -> Vec3 {
        self.max
    }

    /// Center point.
    pub fn position(&self) -> Vec3 {
        (self.min + self.max) * Fx::HALF
    }

    /// Full extent along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half of [`Aabb::size`].
    pub fn half_extents(&self) -> Vec3 {
        self.size() * Fx::HALF
    }

    /// Strict overlap: touching faces do not count.
    ///
    /// Used as the fast reject in front of the narrow phase.
    pub fn overlaps(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] < other.max[i] && other.min[i] < self.max[i])
    }

    /// Inclusive overlap: touching faces count.
    pub fn overlaps_inclusive(&self, other: &Self) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && other.min[i] <= self.max[i])
    }

    /// `true` when `self` lies entirely within `outer` (faces may touch).
    pub fn is_inside(&self, outer: &Self) -> bool {
        (0..3).all(|i| self.min[i] >= outer.min[i] && self.max[i] <= outer.max[i])
    }

    /// `true` when `p` lies within the box or on its boundary.
    pub fn contains_point(&self, p: Vec3) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Grows the box by `margin` on every side.
    #[must_use]
    pub fn inflate(&self, margin: Fx) -> Self {
        let delta = Vec3::new(margin, margin, margin);
        Self {
            min: self.min - delta,
            max: self.max + delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::shape::{BoxShape, CylinderShape, SphereShape};
    use kowtow_math::Quat;

    #[test]
    fn axis_aligned_box_has_exact_size() {
        let shape = Shape::Box(BoxShape::from_size(Vec3::from_ints(100, 1, 100)));
        let aabb = Aabb::from_shape(&shape, &Pose::IDENTITY);
        assert_eq!(aabb.size(), Vec3::from_ints(100, 1, 100));
        assert_eq!(aabb.position(), Vec3::ZERO);
    }

    #[test]
    fn sphere_size_ignores_rotation() {
        let shape = Shape::Sphere(SphereShape::new(Fx::HALF).with_center(Vec3::UNIT_X));
        let pose = Pose::new(
            Vec3::from_ints(0, 10, 0),
            Quat::from_axis_angle(Vec3::UNIT_Z, Fx::FRAC_PI_2),
        );
        let aabb = Aabb::from_shape(&shape, &pose);
        assert_eq!(aabb.size(), Vec3::ONE);
        // Center offset (1,0,0) rotated a quarter turn about Z lands on +Y.
        assert!((aabb.position() - Vec3::from_ints(0, 11, 0)).is_nearly_zero());
    }

    #[test]
    fn cylinder_hull_uses_radius_and_half_height() {
        let shape = Shape::Cylinder(CylinderShape::new(Fx::from_int(4), Fx::ONE));
        let aabb = Aabb::from_shape(&shape, &Pose::IDENTITY);
        assert_eq!(aabb.min(), Vec3::from_ints(-1, -2, -1));
        assert_eq!(aabb.max(), Vec3::from_ints(1, 2, 1));
    }

    #[test]
    fn touching_faces_are_not_strict_overlap() {
        let a = Aabb::new(Vec3::ZERO, Vec3::from_ints(2, 2, 2));
        let b = Aabb::new(Vec3::from_ints(2, 0, 0), Vec3::from_ints(2, 2, 2));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps_inclusive(&b));
    }

    #[test]
    fn inside_is_inclusive() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::from_ints(4, 4, 4));
        let inner = Aabb::from_min_max(Vec3::ZERO, Vec3::from_ints(2, 2, 2));
        assert!(inner.is_inside(&outer));
        assert!(outer.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
    }
}
