// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use kowtow_math::{Mat3, Quat, Vec3};

/// Rigid placement of a body: translation plus rotation, no scale.
///
/// Conventions:
/// - `position` in meters (world space).
/// - `rotation` as a unit quaternion; local points map to world space as
///   `position + rotation * p`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Pose {
    /// World-space translation.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Pose {
    /// Identity pose (origin, no rotation).
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a pose from components.
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose at `position` with no rotation.
    pub const fn at(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Rotation as a matrix whose columns are the local axes.
    pub fn to_mat3(&self) -> Mat3 {
        self.rotation.to_mat3()
    }

    /// Maps a local point to world space.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.position + self.rotation.rotate(p)
    }

    /// Maps a local direction to world space (translation ignored).
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d)
    }
}
