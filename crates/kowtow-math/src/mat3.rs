// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::ops::Mul;

use crate::{Fx, Quat, Vec3};

/// Row-major 3×3 matrix.
///
/// For rotation matrices the columns are the rotated basis vectors, so
/// [`Mat3::axis`] yields the local X/Y/Z axes of an oriented frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Mat3 {
    rows: [Vec3; 3],
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        rows: [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z],
    };

    /// Creates a matrix from three rows.
    pub const fn from_rows(rows: [Vec3; 3]) -> Self {
        Self { rows }
    }

    /// Rotation matrix for a unit quaternion.
    pub fn from_quat(q: Quat) -> Self {
        let two = Fx::TWO;
        let (x, y, z, w) = (q.x, q.y, q.z, q.w);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Self::from_rows([
            Vec3::new(
                Fx::ONE - two * (yy + zz),
                two * (xy - wz),
                two * (xz + wy),
            ),
            Vec3::new(
                two * (xy + wz),
                Fx::ONE - two * (xx + zz),
                two * (yz - wx),
            ),
            Vec3::new(
                two * (xz - wy),
                two * (yz + wx),
                Fx::ONE - two * (xx + yy),
            ),
        ])
    }

    /// Row `i` (clamped to `0..3`).
    pub fn row(&self, i: usize) -> Vec3 {
        self.rows[i.min(2)]
    }

    /// Column `i` (clamped to `0..3`); for rotations, the local axis `i`.
    pub fn axis(&self, i: usize) -> Vec3 {
        let i = i.min(2);
        Vec3::new(self.rows[0][i], self.rows[1][i], self.rows[2][i])
    }

    /// Transposed matrix; the inverse of a rotation.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self::from_rows([self.axis(0), self.axis(1), self.axis(2)])
    }

    /// Matrix × column vector.
    pub fn mul_vec(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.rows[0].dot(v), self.rows[1].dot(v), self.rows[2].dot(v))
    }
}

impl Mul for Mat3 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let cols = [rhs.axis(0), rhs.axis(1), rhs.axis(2)];
        let row = |r: Vec3| Vec3::new(r.dot(cols[0]), r.dot(cols[1]), r.dot(cols[2]));
        Self::from_rows([row(self.rows[0]), row(self.rows[1]), row(self.rows[2])])
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec(rhs)
    }
}
