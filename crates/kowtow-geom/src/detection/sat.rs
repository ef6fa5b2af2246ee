// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Separating-axis tests for boxes and cylinders.

use kowtow_math::{Fx, Vec3};

use super::Contact;
use crate::types::pose::Pose;
use crate::types::shape::{BoxShape, Shape, SphereShape};

/// World-space convex hull of a box or cylinder, ready for projection.
pub(crate) enum Hull {
    Box {
        center: Vec3,
        axes: [Vec3; 3],
        vertices: [Vec3; 8],
    },
    Cylinder {
        center: Vec3,
        up: [Vec3; 1],
        caps: (Vec3, Vec3),
        radius: Fx,
    },
}

impl Hull {
    /// `None` for spheres, which have no finite axis set.
    pub(crate) fn new(shape: &Shape, pose: &Pose) -> Option<Self> {
        match shape {
            Shape::Box(b) => {
                let m = pose.to_mat3();
                let h = b.half_extents;
                let mut vertices = [Vec3::ZERO; 8];
                for (i, v) in vertices.iter_mut().enumerate() {
                    let corner = Vec3::new(
                        if i & 1 == 0 { -h.x } else { h.x },
                        if i & 2 == 0 { -h.y } else { h.y },
                        if i & 4 == 0 { -h.z } else { h.z },
                    );
                    *v = pose.transform_point(b.center + corner);
                }
                Some(Self::Box {
                    center: pose.transform_point(b.center),
                    axes: [m.axis(0), m.axis(1), m.axis(2)],
                    vertices,
                })
            }
            Shape::Cylinder(c) => Some(Self::Cylinder {
                center: pose.transform_point(c.center),
                up: [pose.transform_direction(Vec3::UNIT_Y)],
                caps: c.segment(pose),
                radius: c.radius,
            }),
            Shape::Sphere(_) => None,
        }
    }

    fn center(&self) -> Vec3 {
        match self {
            Self::Box { center, .. } | Self::Cylinder { center, .. } => *center,
        }
    }

    /// Face normals and edge directions (they coincide for both hulls).
    fn axes(&self) -> &[Vec3] {
        match self {
            Self::Box { axes, .. } => axes,
            Self::Cylinder { up, .. } => up,
        }
    }

    /// Interval covered by the hull along the unit `axis`.
    fn project(&self, axis: Vec3) -> (Fx, Fx) {
        match self {
            Self::Box { vertices, .. } => {
                let mut lo = Fx::MAX;
                let mut hi = Fx::MIN;
                for v in vertices {
                    let d = v.dot(axis);
                    lo = lo.min(d);
                    hi = hi.max(d);
                }
                (lo, hi)
            }
            Self::Cylinder {
                up, caps, radius, ..
            } => {
                // A cap disc spans radius * |sin θ| around its center.
                let rim = *radius * up[0].cross(axis).magnitude();
                let (a, b) = (caps.0.dot(axis), caps.1.dot(axis));
                (a.min(b) - rim, a.max(b) + rim)
            }
        }
    }

    /// Radial direction from the cylinder axis toward `target`, if any.
    fn radial_axis(&self, target: Vec3) -> Option<Vec3> {
        match self {
            Self::Box { .. } => None,
            Self::Cylinder { center, up, .. } => {
                let d = target - *center;
                let radial = d - up[0] * d.dot(up[0]);
                (!radial.is_nearly_zero()).then(|| radial.normalize())
            }
        }
    }
}

/// Flips `axis` so that its first non-zero component is positive.
fn canonical(axis: Vec3) -> Vec3 {
    let first = [axis.x, axis.y, axis.z]
        .into_iter()
        .find(|c| !c.is_zero())
        .unwrap_or(Fx::ZERO);
    if first.is_negative() {
        -axis
    } else {
        axis
    }
}

fn candidate_axes(h1: &Hull, h2: &Hull) -> Vec<Vec3> {
    let mut out: Vec<Vec3> = h1.axes().iter().chain(h2.axes()).copied().collect();
    for e1 in h1.axes() {
        for e2 in h2.axes() {
            let c = e1.cross(*e2);
            // Parallel edges produce no usable axis.
            if c.magnitude() > Fx::EPSILON {
                out.push(c.normalize());
            }
        }
    }
    out.extend(h1.radial_axis(h2.center()));
    out.extend(h2.radial_axis(h1.center()));
    out.into_iter().map(canonical).collect()
}

/// SAT over the combined axis set of two hulls.
///
/// The minimum-overlap axis becomes the normal; ties go to the
/// lexicographically smallest axis so argument order never changes the pick.
pub(crate) fn hull_hull(h1: &Hull, h2: &Hull) -> Option<Contact> {
    let mut best: Option<(Fx, Vec3)> = None;
    for axis in candidate_axes(h1, h2) {
        let (min1, max1) = h1.project(axis);
        let (min2, max2) = h2.project(axis);
        let overlap = max1.min(max2) - min1.max(min2);
        if overlap <= Fx::EPSILON {
            return None;
        }
        let better = match best {
            None => true,
            Some((o, a)) => overlap < o || (overlap == o && axis.to_raw() < a.to_raw()),
        };
        if better {
            best = Some((overlap, axis));
        }
    }
    let (penetration, axis) = best?;
    let (c1, c2) = (h1.center(), h2.center());
    let side = (c1 - c2).dot(axis);
    let flip = side.is_negative() || (side.is_zero() && c1 < c2);
    let normal = if flip { -axis } else { axis };
    Some(Contact {
        point: (c1 + c2) * Fx::HALF + normal * (penetration * Fx::HALF),
        normal,
        penetration,
    })
}

/// SAT restricted to the box's three axes, plus a closest-point reject for
/// spheres sitting off an edge or corner.
///
/// The normal points from the box toward the sphere.
pub(crate) fn box_sphere(
    b: &BoxShape,
    box_pose: &Pose,
    s: &SphereShape,
    sphere_pose: &Pose,
) -> Option<Contact> {
    let m = box_pose.to_mat3();
    let cb = box_pose.transform_point(b.center);
    let cs = sphere_pose.transform_point(s.center);
    let delta = cs - cb;
    let r = s.radius;

    let mut best: Option<(Fx, Vec3)> = None;
    let mut clamped = [Fx::ZERO; 3];
    for (i, slot) in clamped.iter_mut().enumerate() {
        let axis = m.axis(i);
        let h = b.half_extents[i];
        let pc = delta.dot(axis);
        let overlap = h.min(pc + r) - (-h).max(pc - r);
        if overlap <= Fx::EPSILON {
            return None;
        }
        *slot = pc.clamp(-h, h);
        if best.is_none_or(|(o, _)| overlap < o) {
            let oriented = if pc.is_negative() { -axis } else { axis };
            best = Some((overlap, oriented));
        }
    }

    let closest = cb + m.axis(0) * clamped[0] + m.axis(1) * clamped[1] + m.axis(2) * clamped[2];
    if closest.distance(cs) > r {
        return None;
    }

    let (penetration, normal) = best?;
    Some(Contact {
        point: cs - normal * r,
        normal,
        penetration,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::types::shape::CylinderShape;
    use kowtow_math::Quat;

    fn unit_box() -> Shape {
        Shape::Box(BoxShape::new(Vec3::ONE))
    }

    fn hull(shape: &Shape, pose: &Pose) -> Hull {
        Hull::new(shape, pose).expect("boxes and cylinders have hulls")
    }

    #[test]
    fn parallel_box_edges_are_skipped() {
        let h1 = hull(&unit_box(), &Pose::IDENTITY);
        let h2 = hull(&unit_box(), &Pose::at(Vec3::UNIT_X));
        // 6 face axes plus the 6 crosses of distinct basis vectors.
        assert_eq!(candidate_axes(&h1, &h2).len(), 12);
    }

    #[test]
    fn sphere_has_no_hull() {
        assert!(Hull::new(&Shape::Sphere(SphereShape::new(Fx::ONE)), &Pose::IDENTITY).is_none());
    }

    #[test]
    fn cylinder_projection_uses_true_disc_extent() {
        let shape = Shape::Cylinder(CylinderShape::new(Fx::TWO, Fx::ONE));
        let h = hull(&shape, &Pose::IDENTITY);
        assert_eq!(h.project(Vec3::UNIT_Y), (-Fx::ONE, Fx::ONE));
        assert_eq!(h.project(Vec3::UNIT_X), (-Fx::ONE, Fx::ONE));
    }

    #[test]
    fn canonical_axis_is_sign_independent() {
        let v = Vec3::new(Fx::ZERO, -Fx::HALF, Fx::ONE);
        assert_eq!(canonical(v), canonical(-v));
        assert!(canonical(v).y.is_positive());
    }

    #[test]
    fn tilted_box_edge_dipping_into_ground() {
        let ground = Shape::Box(BoxShape::new(Vec3::new(
            Fx::from_int(10),
            Fx::HALF,
            Fx::from_int(10),
        )));
        let tilted = Pose::new(
            Vec3::new(Fx::ZERO, Fx::from_ratio(19, 10), Fx::ZERO),
            Quat::from_axis_angle(Vec3::UNIT_Z, Fx::PI / Fx::from_int(4)),
        );
        let g = hull(&ground, &Pose::IDENTITY);
        let b = hull(&unit_box(), &tilted);
        let contact = hull_hull(&b, &g).expect("lower edge is below the ground top");
        assert_eq!(contact.normal, Vec3::UNIT_Y);
        assert!(contact.penetration > Fx::from_ratio(1, 100));
    }
}
