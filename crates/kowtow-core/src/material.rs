// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use kowtow_math::Fx;

use crate::body::BodyError;

/// Surface response of a body.
///
/// Pair rules used by contact resolution:
/// - restitution is `min(bounciness_a, bounciness_b)`;
/// - friction scales with `friction_a * friction_b`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Material {
    friction: Fx,
    bounciness: Fx,
}

impl Material {
    /// Frictionless and perfectly inelastic.
    pub const INERT: Self = Self {
        friction: Fx::ZERO,
        bounciness: Fx::ZERO,
    };

    /// Creates a material; both coefficients must be non-negative.
    pub fn new(friction: Fx, bounciness: Fx) -> Result<Self, BodyError> {
        if friction.is_negative() {
            return Err(BodyError::NegativeFriction(friction));
        }
        if bounciness.is_negative() {
            return Err(BodyError::NegativeBounciness(bounciness));
        }
        Ok(Self {
            friction,
            bounciness,
        })
    }

    /// Friction coefficient.
    pub const fn friction(&self) -> Fx {
        self.friction
    }

    /// Bounciness (restitution) coefficient.
    pub const fn bounciness(&self) -> Fx {
        self.bounciness
    }

    /// Restitution applied when `self` meets `other`.
    pub fn combined_bounciness(&self, other: &Self) -> Fx {
        self.bounciness.min(other.bounciness)
    }

    /// Friction scale applied when `self` meets `other`.
    pub fn combined_friction(&self, other: &Self) -> Fx {
        self.friction * other.friction
    }
}
