// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Narrow phase: exact pairwise intersection tests and segment casts.
//!
//! Normal convention: every [`Contact`] returned by [`detect`] carries a unit
//! normal pointing from shape 2 toward shape 1, i.e. the direction in which
//! shape 1 must move to separate. Calling with the arguments swapped yields
//! the same collision verdict, the same penetration and the opposite normal.

mod ray;
mod sat;
mod sphere;

use kowtow_math::{Fx, Vec3};

pub use ray::{detect_line_shape, LineHit};

use crate::types::pose::Pose;
use crate::types::shape::Shape;

/// Single-point contact between two shapes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    /// Approximate world-space contact point.
    pub point: Vec3,
    /// Unit normal from shape 2 toward shape 1.
    pub normal: Vec3,
    /// Overlap depth along `normal`; never negative.
    pub penetration: Fx,
}

impl Contact {
    /// Same contact seen from the other shape.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }
}

/// Tests `shape1` at `pose1` against `shape2` at `pose2`.
///
/// Returns `None` when the shapes are separated (touching within
/// [`Fx::EPSILON`] counts as separated for the SAT-based pairs).
pub fn detect(shape1: &Shape, pose1: &Pose, shape2: &Shape, pose2: &Pose) -> Option<Contact> {
    use Shape::{Box, Cylinder, Sphere};
    match (shape1, shape2) {
        (Sphere(a), Sphere(b)) => sphere::sphere_sphere(a, pose1, b, pose2),
        (Box(_) | Cylinder(_), Box(_) | Cylinder(_)) => {
            let h1 = sat::Hull::new(shape1, pose1)?;
            let h2 = sat::Hull::new(shape2, pose2)?;
            sat::hull_hull(&h1, &h2)
        }
        // Box-native routine orients box → sphere; shape 1 is the box here.
        (Box(b), Sphere(s)) => sat::box_sphere(b, pose1, s, pose2).map(Contact::flipped),
        (Sphere(s), Box(b)) => sat::box_sphere(b, pose2, s, pose1),
        // Cylinder-native routine orients cylinder → sphere.
        (Sphere(s), Cylinder(c)) => sphere::sphere_cylinder(s, pose1, c, pose2),
        (Cylinder(c), Sphere(s)) => {
            sphere::sphere_cylinder(s, pose2, c, pose1).map(Contact::flipped)
        }
    }
}
