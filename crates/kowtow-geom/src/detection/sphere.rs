// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Distance-based tests for pairs involving a sphere.

use kowtow_math::{Fx, Vec3};

use super::Contact;
use crate::types::pose::Pose;
use crate::types::shape::{CylinderShape, SphereShape};

/// Unit direction from `from` to `to`; coincident points fall back to +X.
fn direction_or_x(from: Vec3, to: Vec3) -> Vec3 {
    let d = (to - from).normalize();
    if d == Vec3::ZERO {
        Vec3::UNIT_X
    } else {
        d
    }
}

/// Closest point to `p` on the segment `a..b`.
pub(crate) fn closest_on_segment(p: Vec3, a: Vec3, b: Vec3) -> Vec3 {
    let ab = b - a;
    let len_sq = ab.sqr_magnitude();
    if len_sq.is_zero() {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(Fx::ZERO, Fx::ONE);
    a + ab * t
}

/// Two spheres collide iff the distance between centers is at most the sum
/// of radii. The normal points from sphere 2 toward sphere 1.
pub(crate) fn sphere_sphere(
    s1: &SphereShape,
    pose1: &Pose,
    s2: &SphereShape,
    pose2: &Pose,
) -> Option<Contact> {
    let c1 = pose1.transform_point(s1.center);
    let c2 = pose2.transform_point(s2.center);
    let dist = c1.distance(c2);
    let reach = s1.radius + s2.radius;
    if dist > reach {
        return None;
    }
    let normal = direction_or_x(c2, c1);
    Some(Contact {
        point: c2 + normal * s2.radius,
        normal,
        penetration: reach - dist,
    })
}

/// Sphere against the cylinder's central segment widened by both radii.
///
/// The normal points from the cylinder toward the sphere.
pub(crate) fn sphere_cylinder(
    s: &SphereShape,
    sphere_pose: &Pose,
    c: &CylinderShape,
    cylinder_pose: &Pose,
) -> Option<Contact> {
    let cs = sphere_pose.transform_point(s.center);
    let (a, b) = c.segment(cylinder_pose);
    let on_axis = closest_on_segment(cs, a, b);
    let dist = cs.distance(on_axis);
    let reach = s.radius + c.radius;
    if dist > reach {
        return None;
    }
    let normal = direction_or_x(on_axis, cs);
    Some(Contact {
        point: on_axis + normal * c.radius,
        normal,
        penetration: reach - dist,
    })
}
