// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::{Add, AddAssign, Div, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::Fx;

/// Below this raw magnitude a vector is treated as having no direction.
const NORMALIZE_FLOOR_RAW: i64 = 1 << 8;

/// Deterministic 3D vector used throughout the engine.
///
/// * Components encode world-space metres and may represent either points or
///   directions depending on the calling context.
/// * Arithmetic is Q32.32 fixed point, so every platform rounds identically.
/// * Use [`crate::Quat::rotate`] or [`crate::Mat3::mul_vec`] to change frames.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec3 {
    /// X component.
    pub x: Fx,
    /// Y component.
    pub y: Fx,
    /// Z component.
    pub z: Fx,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(Fx::ZERO, Fx::ZERO, Fx::ZERO);

    /// `(1, 1, 1)`.
    pub const ONE: Self = Self::new(Fx::ONE, Fx::ONE, Fx::ONE);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(Fx::ONE, Fx::ZERO, Fx::ZERO);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(Fx::ZERO, Fx::ONE, Fx::ZERO);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(Fx::ZERO, Fx::ZERO, Fx::ONE);

    /// Creates a vector from components.
    pub const fn new(x: Fx, y: Fx, z: Fx) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector from whole-number components.
    pub const fn from_ints(x: i64, y: i64, z: i64) -> Self {
        Self::new(Fx::from_int(x), Fx::from_int(y), Fx::from_int(z))
    }

    /// Converts an `f32` triple through [`Fx::from_f32`].
    pub fn from_f32(value: [f32; 3]) -> Self {
        Self::new(
            Fx::from_f32(value[0]),
            Fx::from_f32(value[1]),
            Fx::from_f32(value[2]),
        )
    }

    /// Lossy `f32` view for diagnostics.
    pub fn to_f32(self) -> [f32; 3] {
        [self.x.to_f32(), self.y.to_f32(), self.z.to_f32()]
    }

    /// Raw Q32.32 components, used for hashing and canonical ordering.
    pub const fn to_raw(self) -> [i64; 3] {
        [self.x.raw(), self.y.raw(), self.z.raw()]
    }

    /// Dot product with another vector.
    pub fn dot(self, other: Self) -> Fx {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another vector.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length.
    ///
    /// Computed from the exact sum of squared raw components, so it does not
    /// underflow for short vectors the way `dot(self).sqrt()` would.
    pub fn magnitude(self) -> Fx {
        Fx::hypot3(self.x, self.y, self.z)
    }

    /// Squared length.
    pub fn sqr_magnitude(self) -> Fx {
        self.dot(self)
    }

    /// Unit vector in the same direction, or [`Vec3::ZERO`] for vectors too
    /// short to carry a direction.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        if len.raw() < NORMALIZE_FLOOR_RAW {
            return Self::ZERO;
        }
        self / len
    }

    /// `true` when the length is at most [`Fx::EPSILON`].
    pub fn is_nearly_zero(self) -> bool {
        self.magnitude() <= Fx::EPSILON
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component-wise product.
    #[must_use]
    pub fn scale_by(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> Fx {
        (self - other).magnitude()
    }
}

impl Index<usize> for Vec3 {
    type Output = Fx;

    /// Component by axis index; indices above 2 clamp to `z`.
    fn index(&self, axis: usize) -> &Fx {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => &self.z,
        }
    }
}

impl From<[Fx; 3]> for Vec3 {
    fn from(value: [Fx; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Fx> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: Fx) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for Fx {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl Div<Fx> for Vec3 {
    type Output = Self;
    fn div(self, rhs: Fx) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<Fx> for Vec3 {
    fn mul_assign(&mut self, rhs: Fx) {
        *self = *self * rhs;
    }
}
