// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Segment casts against single shapes.

use kowtow_math::{Fx, Vec3};

use crate::types::aabb::Aabb;
use crate::types::pose::Pose;
use crate::types::shape::{BoxShape, CylinderShape, Shape, SphereShape};

/// First intersection of a segment with a shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LineHit {
    /// World-space hit point.
    pub point: Vec3,
    /// Outward surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the segment start to `point`.
    pub distance: Fx,
}

/// Unit ray `origin + dir * t` for `t ∈ [0, len]`.
#[derive(Copy, Clone)]
struct Ray {
    origin: Vec3,
    dir: Vec3,
    len: Fx,
}

impl Ray {
    fn at(&self, t: Fx) -> Vec3 {
        self.origin + self.dir * t
    }

    fn hit(&self, t: Fx, normal: Vec3) -> LineHit {
        LineHit {
            point: self.at(t),
            normal,
            distance: t,
        }
    }
}

/// Casts the segment `start..end` against `shape` at `pose`.
///
/// The segment's own bounding box is tested against the shape's AABB first.
/// Zero-length segments never hit. A segment starting inside any shape
/// reports a hit at distance zero.
pub fn detect_line_shape(shape: &Shape, pose: &Pose, start: Vec3, end: Vec3) -> Option<LineHit> {
    if !Aabb::from_segment(start, end).overlaps_inclusive(&Aabb::from_shape(shape, pose)) {
        return None;
    }
    let dir = (end - start).normalize();
    if dir == Vec3::ZERO {
        return None;
    }
    let ray = Ray {
        origin: start,
        dir,
        len: start.distance(end),
    };
    match shape {
        Shape::Box(b) => line_box(&ray, b, pose),
        Shape::Sphere(s) => line_sphere(&ray, s, pose),
        Shape::Cylinder(c) => line_cylinder(&ray, c, pose),
    }
}

/// Slab test: intersect each of the six face planes in the box frame and
/// keep the nearest hit that lies within the other two extents. An origin
/// inside the box is a hit at its start, facing back along the ray.
fn line_box(ray: &Ray, b: &BoxShape, pose: &Pose) -> Option<LineHit> {
    let m = pose.to_mat3();
    let rel = ray.origin - pose.transform_point(b.center);
    let axes = [m.axis(0), m.axis(1), m.axis(2)];
    let o = axes.map(|a| rel.dot(a));
    let d = axes.map(|a| ray.dir.dot(a));
    let h = b.half_extents;
    if (0..3).all(|i| o[i].abs() <= h[i]) {
        return Some(ray.hit(Fx::ZERO, -ray.dir));
    }

    let mut best: Option<(Fx, Vec3)> = None;
    for i in 0..3 {
        if d[i].is_zero() {
            continue;
        }
        for side in [-Fx::ONE, Fx::ONE] {
            let t = (h[i] * side - o[i]) / d[i];
            if t.is_negative() || t > ray.len {
                continue;
            }
            let within = (0..3)
                .filter(|&j| j != i)
                .all(|j| (o[j] + d[j] * t).abs() <= h[j]);
            if within && best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, axes[i] * side));
            }
        }
    }
    best.map(|(t, normal)| ray.hit(t, normal))
}

fn outward(from: Vec3, point: Vec3, ray: &Ray) -> Vec3 {
    let n = (point - from).normalize();
    if n == Vec3::ZERO {
        -ray.dir
    } else {
        n
    }
}

/// Projects the sphere center onto the ray and compares the perpendicular
/// distance with the radius.
fn line_sphere(ray: &Ray, s: &SphereShape, pose: &Pose) -> Option<LineHit> {
    let c = pose.transform_point(s.center);
    let r = s.radius;
    if ray.origin.distance(c) <= r {
        return Some(ray.hit(Fx::ZERO, outward(c, ray.origin, ray)));
    }
    let tc = (c - ray.origin).dot(ray.dir);
    if tc.is_negative() {
        return None;
    }
    let perp = c.distance(ray.at(tc));
    if perp > r {
        return None;
    }
    let t = (tc - (r * r - perp * perp).sqrt()).max(Fx::ZERO);
    if t > ray.len {
        return None;
    }
    let point = ray.at(t);
    Some(ray.hit(t, outward(c, point, ray)))
}

/// Closest approach between the ray and the central axis segment, then a
/// step back along the ray to the lateral surface (or cap plane for rays
/// running along the axis).
fn line_cylinder(ray: &Ray, c: &CylinderShape, pose: &Pose) -> Option<LineHit> {
    let (base, _) = c.segment(pose);
    let u = pose.transform_direction(Vec3::UNIT_Y);
    let height = c.height;
    let r = ray.origin - base;
    let b = ray.dir.dot(u);
    let cr = ray.dir.dot(r);
    let f = u.dot(r);
    let radial_speed = (ray.dir - u * b).magnitude();

    if radial_speed <= Fx::EPSILON {
        // Parallel to the axis: the only way in is through a cap.
        let s = f.clamp(Fx::ZERO, height);
        if (r - u * f).magnitude() > c.radius {
            return None;
        }
        let t = if s == f { Fx::ZERO } else { (s - f) / b };
        if t.is_negative() || t > ray.len {
            return None;
        }
        let normal = if f < Fx::ZERO { -u } else { u };
        return Some(ray.hit(t, if s == f { -ray.dir } else { normal }));
    }

    let denom = Fx::ONE - b * b;
    let t0 = ((b * f - cr) / denom).clamp(Fx::ZERO, ray.len);
    let s = (f + b * t0).clamp(Fx::ZERO, height);
    let t = (s * b - cr).clamp(Fx::ZERO, ray.len);
    let gap = ray.at(t).distance(base + u * s);
    if gap > c.radius {
        return None;
    }

    let back = (c.radius * c.radius - gap * gap).sqrt() / radial_speed;
    let t_hit = (t - back).max(Fx::ZERO);
    let point = ray.at(t_hit);
    let along = (point - base).dot(u);
    let normal = if along.is_negative() {
        -u
    } else if along > height {
        u
    } else {
        outward(base + u * along, point, ray)
    };
    Some(ray.hit(t_hit, normal))
}
