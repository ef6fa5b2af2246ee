// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry for Kowtow.

This crate provides:
- Collision shapes (`Shape`: box, sphere, Y-axis cylinder) with support
  mappings and bounding spheres.
- Axis-aligned bounding boxes (`Aabb`) and rigid poses (`Pose`).
- An octree spatial index (`Octree`) behind the `SpatialIndex` trait.
- The narrow phase (`detect`) and segment casts (`detect_line_shape`).

Design notes:
- Deterministic: fixed-point math only; candidate lists are sorted by
  `BodyHandle`; no hash map is ever iterated.
- Pair routines are total over valid shapes. Degenerate geometry (coincident
  centers, parallel edges) takes an epsilon-guarded fallback, never an error.
"]

/// Broad phase: spatial index trait and octree.
pub mod broad;
/// Narrow phase: pairwise contacts and segment casts.
pub mod detection;
/// Foundational geometric types.
pub mod types;

pub use broad::octree::Octree;
pub use broad::{SpatialIndex, SpatialIndexError};
pub use detection::{detect, detect_line_shape, Contact, LineHit};
pub use types::aabb::Aabb;
pub use types::handle::BodyHandle;
pub use types::pose::Pose;
pub use types::shape::{
    BoundingSphere, BoxShape, CylinderShape, Shape, ShapeKind, SphereShape,
};
