// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and the octree spatial index.
//!
//! Determinism contract (applies to all implementations used here):
//! - Every candidate list is strictly sorted by [`BodyHandle`].
//! - Queries over-approximate: a body whose AABB strictly overlaps the
//!   queried body's AABB is always returned; extra candidates are allowed.
//! - Internal hash maps are lookup-only and never iterated, so hashing never
//!   influences output order.

#[doc = "Loose octree keyed by body handle."]
pub mod octree;

use thiserror::Error;

use crate::types::aabb::Aabb;
use crate::types::handle::BodyHandle;

/// Invariant violations reported by a spatial index.
///
/// These indicate a bookkeeping bug in the caller or the index; they are
/// surfaced immediately and never repaired.
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum SpatialIndexError {
    /// The handle is already registered.
    #[error("{0} is already registered in the spatial index")]
    Duplicate(BodyHandle),
    /// The handle is not registered (or its association was lost).
    #[error("{0} is not registered in the spatial index")]
    Missing(BodyHandle),
}

/// Spatial index mapping body handles to their world bounds.
pub trait SpatialIndex {
    /// Registers `handle` with bounds `aabb`.
    fn insert(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), SpatialIndexError>;

    /// Detaches `handle`, returning the bounds it was stored with.
    fn remove(&mut self, handle: BodyHandle) -> Result<Aabb, SpatialIndexError>;

    /// Records new bounds for `handle`; returns `true` when the body had to
    /// be relocated to another node.
    fn update(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<bool, SpatialIndexError>;

    /// Potential collision partners of `handle`, excluding itself, sorted.
    fn query(&self, handle: BodyHandle) -> Result<Vec<BodyHandle>, SpatialIndexError>;

    /// Handles whose stored bounds may touch `aabb`, sorted.
    fn query_aabb(&self, aabb: &Aabb) -> Vec<BodyHandle>;
}
