// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use kowtow_math::{Fx, Vec3};

use super::pose::Pose;

/// Oriented box described by its half extents.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoxShape {
    /// Offset of the box center from the owning body's origin (body frame).
    pub center: Vec3,
    /// Half of the edge length along each local axis.
    pub half_extents: Vec3,
}

impl BoxShape {
    /// Box centered on the body origin with the given half extents.
    pub const fn new(half_extents: Vec3) -> Self {
        Self {
            center: Vec3::ZERO,
            half_extents,
        }
    }

    /// Box centered on the body origin with the given full edge lengths.
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size * Fx::HALF)
    }

    /// Moves the box center relative to the body origin.
    #[must_use]
    pub const fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }
}

/// Sphere described by its radius.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SphereShape {
    /// Offset of the sphere center from the owning body's origin (body frame).
    pub center: Vec3,
    /// Sphere radius.
    pub radius: Fx,
}

impl SphereShape {
    /// Sphere centered on the body origin.
    pub const fn new(radius: Fx) -> Self {
        Self {
            center: Vec3::ZERO,
            radius,
        }
    }

    /// Moves the sphere center relative to the body origin.
    #[must_use]
    pub const fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }
}

/// Capped cylinder whose axis is the local Y axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CylinderShape {
    /// Offset of the cylinder center from the owning body's origin (body frame).
    pub center: Vec3,
    /// Full height along local Y.
    pub height: Fx,
    /// Radius of the circular cross-section.
    pub radius: Fx,
}

impl CylinderShape {
    /// Cylinder centered on the body origin.
    pub const fn new(height: Fx, radius: Fx) -> Self {
        Self {
            center: Vec3::ZERO,
            height,
            radius,
        }
    }

    /// Moves the cylinder center relative to the body origin.
    #[must_use]
    pub const fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Half of the height.
    pub fn half_height(&self) -> Fx {
        self.height * Fx::HALF
    }

    /// World-space cap centers `(bottom, top)` along the local Y axis.
    pub fn segment(&self, pose: &Pose) -> (Vec3, Vec3) {
        let c = pose.transform_point(self.center);
        let up = pose.transform_direction(Vec3::UNIT_Y) * self.half_height();
        (c - up, c + up)
    }
}

/// Discriminant of a [`Shape`], used for logging and pair dispatch tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShapeKind {
    /// [`Shape::Box`].
    Box,
    /// [`Shape::Sphere`].
    Sphere,
    /// [`Shape::Cylinder`].
    Cylinder,
}

/// Closed set of convex collision shapes.
///
/// Shapes are immutable once attached to a body; every geometric query takes
/// the body's [`Pose`] explicitly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Oriented box.
    Box(BoxShape),
    /// Sphere.
    Sphere(SphereShape),
    /// Y-axis cylinder.
    Cylinder(CylinderShape),
}

impl From<BoxShape> for Shape {
    fn from(value: BoxShape) -> Self {
        Self::Box(value)
    }
}

impl From<SphereShape> for Shape {
    fn from(value: SphereShape) -> Self {
        Self::Sphere(value)
    }
}

impl From<CylinderShape> for Shape {
    fn from(value: CylinderShape) -> Self {
        Self::Cylinder(value)
    }
}

impl Shape {
    /// Variant tag.
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Box(_) => ShapeKind::Box,
            Self::Sphere(_) => ShapeKind::Sphere,
            Self::Cylinder(_) => ShapeKind::Cylinder,
        }
    }

    /// Local offset of the shape center from the body origin.
    pub const fn center(&self) -> Vec3 {
        match self {
            Self::Box(b) => b.center,
            Self::Sphere(s) => s.center,
            Self::Cylinder(c) => c.center,
        }
    }

    /// World-space center of the shape under `pose`.
    pub fn world_center(&self, pose: &Pose) -> Vec3 {
        pose.transform_point(self.center())
    }

    /// Half extents of the local bounding hull (before rotation).
    pub fn hull_half_extents(&self) -> Vec3 {
        match self {
            Self::Box(b) => b.half_extents,
            Self::Sphere(s) => Vec3::new(s.radius, s.radius, s.radius),
            Self::Cylinder(c) => Vec3::new(c.radius, c.half_height(), c.radius),
        }
    }

    /// Farthest point of the shape along `direction`, relative to the shape
    /// center in the shape's local frame.
    ///
    /// - Box: the corner selected by the signs of `direction`.
    /// - Sphere: `direction` scaled to the radius.
    /// - Cylinder: the rim point in the XZ plane at the signed half height.
    pub fn support(&self, direction: Vec3) -> Vec3 {
        match self {
            Self::Box(b) => Vec3::new(
                sign_or_one(direction.x) * b.half_extents.x,
                sign_or_one(direction.y) * b.half_extents.y,
                sign_or_one(direction.z) * b.half_extents.z,
            ),
            Self::Sphere(s) => direction.normalize() * s.radius,
            Self::Cylinder(c) => {
                let y = sign_or_one(direction.y) * c.half_height();
                let radial = Vec3::new(direction.x, Fx::ZERO, direction.z).normalize();
                Vec3::new(radial.x * c.radius, y, radial.z * c.radius)
            }
        }
    }

    /// Smallest sphere around the shape center that encloses the shape.
    pub fn bounding_sphere(&self, pose: &Pose) -> BoundingSphere {
        let radius = match self {
            Self::Box(b) => b.half_extents.magnitude(),
            Self::Sphere(s) => s.radius,
            Self::Cylinder(c) => Vec3::new(c.radius, c.half_height(), Fx::ZERO).magnitude(),
        };
        BoundingSphere {
            center: self.world_center(pose),
            radius,
        }
    }
}

/// `-1` for negative components, `+1` otherwise (zero picks the positive side).
fn sign_or_one(v: Fx) -> Fx {
    if v.is_negative() {
        -Fx::ONE
    } else {
        Fx::ONE
    }
}

/// World-space sphere bounding a shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BoundingSphere {
    /// Sphere center.
    pub center: Vec3,
    /// Sphere radius.
    pub radius: Fx,
}

impl BoundingSphere {
    /// `true` when the spheres touch or overlap (inclusive).
    pub fn intersects(&self, other: &Self) -> bool {
        self.center.distance(other.center) <= self.radius + other.radius
    }
}
