// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::Mul;

use crate::{Fx, Mat3, Vec3};

/// Rotation quaternion stored as `(x, y, z, w)` in fixed point.
///
/// * All angles are expressed in radians.
/// * `w` is the scalar part.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Quat {
    /// Vector part, X.
    pub x: Fx,
    /// Vector part, Y.
    pub y: Fx,
    /// Vector part, Z.
    pub z: Fx,
    /// Scalar part.
    pub w: Fx,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The identity rotation.
    pub const IDENTITY: Self = Self::new(Fx::ZERO, Fx::ZERO, Fx::ZERO, Fx::ONE);

    /// Creates a quaternion from raw components (not normalized).
    pub const fn new(x: Fx, y: Fx, z: Fx, w: Fx) -> Self {
        Self { x, y, z, w }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// Returns the identity when the axis is too short to carry a direction.
    pub fn from_axis_angle(axis: Vec3, angle: Fx) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let (sin_half, cos_half) = (angle * Fx::HALF).sin_cos();
        let v = axis * sin_half;
        Self::new(v.x, v.y, v.z, cos_half)
    }

    /// Builds a rotation from Euler angles in radians.
    ///
    /// The rotation applies `z` (roll) first, then `x` (pitch), then `y`
    /// (yaw): `q = yaw * pitch * roll`.
    pub fn from_euler(x: Fx, y: Fx, z: Fx) -> Self {
        let pitch = Self::from_axis_angle(Vec3::UNIT_X, x);
        let yaw = Self::from_axis_angle(Vec3::UNIT_Y, y);
        let roll = Self::from_axis_angle(Vec3::UNIT_Z, z);
        yaw * pitch * roll
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// The result rotates by `other` first and then by `self`.
    #[must_use]
    pub fn multiply(self, other: Self) -> Self {
        let (ax, ay, az, aw) = (self.x, self.y, self.z, self.w);
        let (bx, by, bz, bw) = (other.x, other.y, other.z, other.w);
        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Norm of the four components.
    pub fn magnitude(self) -> Fx {
        (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt()
    }

    /// Normalises the quaternion; returns identity when the norm is ~0.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        if len <= Fx::EPSILON {
            return Self::IDENTITY;
        }
        Self::new(self.x / len, self.y / len, self.z / len, self.w / len)
    }

    /// Conjugate `(-x, -y, -z, w)`.
    #[must_use]
    pub fn conjugate(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Inverse rotation. Equal to the conjugate for unit quaternions.
    #[must_use]
    pub fn inverse(self) -> Self {
        let n = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        if n <= Fx::EPSILON {
            return Self::IDENTITY;
        }
        let c = self.conjugate();
        Self::new(c.x / n, c.y / n, c.z / n, c.w / n)
    }

    /// Rotates `v` by this quaternion (assumed unit length).
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let t = u.cross(v) * Fx::TWO;
        v + t * self.w + u.cross(t)
    }

    /// Rotation matrix equivalent to this quaternion.
    pub fn to_mat3(self) -> Mat3 {
        Mat3::from_quat(self)
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.rotate(rhs)
    }
}
