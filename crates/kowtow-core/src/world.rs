// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use kowtow_geom::{
    detect, detect_line_shape, Aabb, BodyHandle, Octree, Shape, SpatialIndex, SpatialIndexError,
};
use kowtow_math::{Fx, Vec3};
use thiserror::Error;
use tracing::debug_span;

use crate::body::{BodyError, Partner, Rigidbody};
use crate::config::{ConfigError, WorldConfig};
use crate::events::{Collider, ContactEvent};
use crate::exec::fan_out;
use crate::layer::LayerMask;
use crate::material::Material;
use crate::telemetry::{self, TickReport};

/// Errors returned by [`World`] operations.
///
/// Every variant is a caller contract violation or an index invariant
/// failure; the world never retries or repairs.
#[derive(Debug, Error)]
pub enum WorldError {
    /// The handle does not name a live body of this world.
    #[error("{0} is not a live body of this world")]
    UnknownBody(BodyHandle),
    /// Body parameters were rejected.
    #[error("invalid body: {0}")]
    InvalidBody(#[from] BodyError),
    /// The spatial index lost track of a body.
    #[error("spatial index: {0}")]
    Index(#[from] SpatialIndexError),
    /// Configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// `update` was called with a negative time step.
    #[error("time step must not be negative, got {0}")]
    NegativeTimeStep(Fx),
    /// No more body slots can be addressed.
    #[error("body storage is full")]
    Full,
}

/// Nearest body hit by [`World::raycast`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RayHit {
    /// Body that was hit.
    pub body: BodyHandle,
    /// World-space hit point.
    pub point: Vec3,
    /// Outward surface normal at the hit point.
    pub normal: Vec3,
    /// Distance from the segment start.
    pub distance: Fx,
}

#[derive(Debug, Clone)]
struct Slot {
    /// Handle currently issued for this slot; its generation is bumped on removal.
    handle: BodyHandle,
    body: Option<Rigidbody>,
}

const fn slot_of(handle: BodyHandle) -> usize {
    handle.index() as usize
}

/// Owns the bodies and the spatial index and advances the simulation.
///
/// Bodies are addressed by [`BodyHandle`]; a removed body's handle never
/// resolves again, even after its slot is reused. Every output that lists
/// bodies (collider lists, drained events, digests) is in handle order.
#[derive(Debug)]
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    index: Octree,
    gravity: Vec3,
    workers: usize,
    tick: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl World {
    /// Creates a world with the default configuration and `gravity`.
    pub fn new(gravity: Vec3) -> Self {
        let config = WorldConfig::default();
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: config.index.build(),
            gravity,
            workers: config.workers,
            tick: 0,
        }
    }

    /// Creates a world from a validated configuration.
    pub fn with_config(config: &WorldConfig) -> Result<Self, WorldError> {
        config.validate().inspect_err(telemetry::violation)?;
        Ok(Self {
            slots: Vec::new(),
            free: Vec::new(),
            index: config.index.build(),
            gravity: config.gravity(),
            workers: config.workers,
            tick: 0,
        })
    }

    /// Gravity acceleration.
    pub const fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Replaces the gravity acceleration.
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Threads used by the parallel phases.
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Sets the worker count. Results do not depend on it.
    pub fn set_workers(&mut self, workers: usize) -> Result<(), WorldError> {
        if workers == 0 {
            let err = ConfigError::Invalid("workers must be at least 1".into());
            telemetry::violation(&err);
            return Err(err.into());
        }
        self.workers = workers;
        Ok(())
    }

    /// Number of completed ticks.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// `true` when the world holds no body.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The broad-phase index.
    pub const fn index(&self) -> &Octree {
        &self.index
    }

    /// Live handles in canonical order.
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.slots
            .iter()
            .filter(|s| s.body.is_some())
            .map(|s| s.handle)
            .collect()
    }

    /// Live bodies in canonical order.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &Rigidbody)> + '_ {
        self.slots
            .iter()
            .filter_map(|s| s.body.as_ref().map(|b| (s.handle, b)))
    }

    /// `true` when `handle` names a live body.
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.body(handle).is_some()
    }

    /// Body behind `handle`.
    pub fn body(&self, handle: BodyHandle) -> Option<&Rigidbody> {
        self.slots
            .get(slot_of(handle))
            .filter(|s| s.handle == handle)
            .and_then(|s| s.body.as_ref())
    }

    /// Mutable body behind `handle`.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Rigidbody> {
        self.slots
            .get_mut(slot_of(handle))
            .filter(|s| s.handle == handle)
            .and_then(|s| s.body.as_mut())
    }

    /// Creates a static body at the origin and registers it in the index.
    pub fn add_rigidbody(
        &mut self,
        shape: impl Into<Shape>,
        mass: Fx,
        material: Material,
    ) -> Result<BodyHandle, WorldError> {
        let body = Rigidbody::new(shape, mass, material).inspect_err(telemetry::violation)?;
        let handle = match self.free.pop() {
            Some(index) => self.slots[index as usize].handle,
            None => {
                let index = u32::try_from(self.slots.len()).map_err(|_| WorldError::Full)?;
                let handle = BodyHandle::new(index, 0);
                self.slots.push(Slot { handle, body: None });
                handle
            }
        };
        if let Err(err) = self.index.insert(handle, body.aabb()) {
            telemetry::violation(&err);
            self.free.push(handle.index());
            return Err(err.into());
        }
        telemetry::body_added(handle, body.shape().kind());
        self.slots[slot_of(handle)].body = Some(body);
        Ok(handle)
    }

    /// Detaches the body from the index, then from the world.
    pub fn remove_rigidbody(&mut self, handle: BodyHandle) -> Result<Rigidbody, WorldError> {
        if !self.contains(handle) {
            let err = WorldError::UnknownBody(handle);
            telemetry::violation(&err);
            return Err(err);
        }
        self.index
            .remove(handle)
            .inspect_err(telemetry::violation)?;
        let slot = &mut self.slots[slot_of(handle)];
        let body = slot.body.take().ok_or(WorldError::UnknownBody(handle))?;
        slot.handle = BodyHandle::new(handle.index(), handle.generation().wrapping_add(1));
        self.free.push(handle.index());
        telemetry::body_removed(handle);
        Ok(body)
    }

    /// Advances the simulation by `dt`.
    ///
    /// Phases, each joined before the next starts:
    /// 1. bounds of moved bodies are recomputed (parallel) and written to
    ///    the index (serial);
    /// 2. every body queries the index and runs the narrow phase against
    ///    layer-compatible candidates, producing only its own collider list
    ///    (parallel, read-only);
    /// 3. collider lists are rotated and events queued (serial);
    /// 4. dynamic bodies integrate against a snapshot of their partners
    ///    (parallel), the results are applied and bounds refreshed again.
    ///
    /// A zero `dt` returns immediately without touching state.
    pub fn update(&mut self, dt: Fx) -> Result<TickReport, WorldError> {
        if dt.is_negative() {
            let err = WorldError::NegativeTimeStep(dt);
            telemetry::violation(&err);
            return Err(err);
        }
        if dt.is_zero() {
            return Ok(TickReport {
                tick: self.tick,
                bodies: self.len(),
                ..TickReport::default()
            });
        }

        self.tick += 1;
        let tick = self.tick;
        let span = debug_span!("world_step", tick, dt = %dt);
        let _enter = span.enter();

        let live = self.handles();
        let mut report = TickReport {
            tick,
            bodies: live.len(),
            ..TickReport::default()
        };

        report.relocations += self.refresh_bounds(&live)?;

        let world = &*self;
        let found = fan_out(&live, self.workers, |&h| world.detect_body(h));
        let mut lists = Vec::with_capacity(found.len());
        for result in found {
            let (colliders, tested) = result.inspect_err(telemetry::violation)?;
            report.candidates += tested;
            report.contacts += colliders.len();
            lists.push(colliders);
        }
        telemetry::phase("detect", tick, report.contacts);

        for (&handle, colliders) in live.iter().zip(lists) {
            if let Some(body) = self.body_mut(handle) {
                report.events += body.record_contacts(colliders);
            }
        }
        telemetry::phase("notify", tick, report.events);

        let snapshot: Vec<Option<(BodyHandle, Partner)>> = self
            .slots
            .iter()
            .map(|s| s.body.as_ref().map(|b| (s.handle, b.partner())))
            .collect();
        let partner = |other: BodyHandle| {
            snapshot
                .get(slot_of(other))
                .copied()
                .flatten()
                .filter(|(h, _)| *h == other)
                .map(|(_, p)| p)
        };
        let gravity = self.gravity;
        let world = &*self;
        let motions = fan_out(&live, self.workers, |&h| {
            world
                .body(h)
                .and_then(|b| b.integrate(gravity, dt, &partner))
        });
        let mut moved = 0;
        for (&handle, motion) in live.iter().zip(motions) {
            if let (Some(motion), Some(body)) = (motion, self.body_mut(handle)) {
                body.apply_motion(motion);
                moved += 1;
            }
        }
        telemetry::phase("integrate", tick, moved);

        report.relocations += self.refresh_bounds(&live)?;
        telemetry::summary(&report);
        Ok(report)
    }

    /// Recomputes bounds of flagged bodies and moves them in the index.
    /// Returns the number of node relocations.
    fn refresh_bounds(&mut self, live: &[BodyHandle]) -> Result<usize, WorldError> {
        let dirty: Vec<BodyHandle> = live
            .iter()
            .copied()
            .filter(|&h| self.body(h).is_some_and(Rigidbody::is_dirty))
            .collect();
        if dirty.is_empty() {
            return Ok(0);
        }
        let world = &*self;
        let bounds = fan_out(&dirty, self.workers, |&h| {
            world.body(h).map(Rigidbody::compute_aabb)
        });
        let mut relocations = 0;
        for (handle, aabb) in dirty.into_iter().zip(bounds) {
            let Some(aabb) = aabb else {
                continue;
            };
            if self
                .index
                .update(handle, aabb)
                .inspect_err(telemetry::violation)?
            {
                relocations += 1;
            }
            if let Some(body) = self.body_mut(handle) {
                body.store_aabb(aabb);
            }
        }
        Ok(relocations)
    }

    /// Narrow phase for one body against its broad-phase candidates.
    /// Returns the collider list and the number of candidates examined.
    fn detect_body(&self, handle: BodyHandle) -> Result<(Vec<Collider>, usize), SpatialIndexError> {
        let Some(me) = self.body(handle) else {
            return Ok((Vec::new(), 0));
        };
        let candidates = self.index.query(handle)?;
        let pose = me.pose();
        let bounds = me.aabb();
        let mut colliders = Vec::new();
        for &other_handle in &candidates {
            let Some(other) = self.body(other_handle) else {
                continue;
            };
            if !me.layer().query(other.layer()) || !bounds.overlaps(&other.aabb()) {
                continue;
            }
            if let Some(contact) = detect(me.shape(), &pose, other.shape(), &other.pose()) {
                colliders.push(Collider::from_contact(other_handle, contact));
            }
        }
        Ok((colliders, candidates.len()))
    }

    /// Nearest body crossed by the segment `start → end` whose layer
    /// matches `mask`. Equal distances resolve to the lower handle.
    ///
    /// Bodies moved since the last update are tested at their new pose.
    pub fn raycast(&self, start: Vec3, end: Vec3, mask: LayerMask) -> Option<RayHit> {
        let mut candidates = self.index.query_aabb(&Aabb::from_segment(start, end));
        candidates.extend(
            self.slots
                .iter()
                .filter(|s| s.body.as_ref().is_some_and(Rigidbody::is_dirty))
                .map(|s| s.handle),
        );
        candidates.sort_unstable();
        candidates.dedup();

        let mut best: Option<RayHit> = None;
        for handle in candidates {
            let Some(body) = self.body(handle) else {
                continue;
            };
            if !mask.query(body.layer()) {
                continue;
            }
            let Some(hit) = detect_line_shape(body.shape(), &body.pose(), start, end) else {
                continue;
            };
            if best.is_none_or(|b| hit.distance < b.distance) {
                best = Some(RayHit {
                    body: handle,
                    point: hit.point,
                    normal: hit.normal,
                    distance: hit.distance,
                });
            }
        }
        best
    }

    /// Takes every queued event, grouped by body in handle order.
    pub fn drain_events(&mut self) -> Vec<(BodyHandle, ContactEvent)> {
        let mut out = Vec::new();
        for slot in &mut self.slots {
            let handle = slot.handle;
            if let Some(body) = slot.body.as_mut() {
                out.extend(body.drain_events().into_iter().map(|e| (handle, e)));
            }
        }
        out
    }

    /// BLAKE3 digest of every live body's handle, position, rotation and
    /// velocity, little-endian, in handle order.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        for (handle, body) in self.bodies() {
            hasher.update(&handle.to_le_bytes());
            let r = body.rotation();
            let words = body
                .position()
                .to_raw()
                .into_iter()
                .chain([r.x.raw(), r.y.raw(), r.z.raw(), r.w.raw()])
                .chain(body.velocity().to_raw());
            for word in words {
                hasher.update(&word.to_le_bytes());
            }
        }
        *hasher.finalize().as_bytes()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    use kowtow_geom::SphereShape;

    use super::*;

    fn world_with_ball() -> (World, BodyHandle) {
        let mut world = World::default();
        let h = world
            .add_rigidbody(SphereShape::new(Fx::ONE), Fx::ONE, Material::INERT)
            .expect("add ball");
        (world, h)
    }

    #[test]
    fn slots_are_reused_with_a_new_generation() {
        let (mut world, first) = world_with_ball();
        world.remove_rigidbody(first).expect("remove ball");
        assert!(world.body(first).is_none());
        let second = world
            .add_rigidbody(SphereShape::new(Fx::ONE), Fx::ONE, Material::INERT)
            .expect("add ball");
        assert_eq!(second.index(), first.index());
        assert_eq!(second.generation(), first.generation() + 1);
        assert!(world.body(first).is_none());
        assert!(world.body(second).is_some());
        assert!(matches!(
            world.remove_rigidbody(first),
            Err(WorldError::UnknownBody(h)) if h == first
        ));
    }

    #[test]
    fn moved_bodies_are_reindexed_before_detection() {
        let (mut world, h) = world_with_ball();
        world
            .body_mut(h)
            .expect("live body")
            .set_position(Vec3::from_ints(300, 0, 0));
        world.update(Fx::ONE).expect("tick");
        let stored = world.index().aabb_of(h).expect("indexed");
        assert_eq!(stored.position(), Vec3::from_ints(300, 0, 0));
        assert!(!world.body(h).expect("live body").is_dirty());
    }

    #[test]
    fn zero_and_negative_time_steps() {
        let (mut world, _) = world_with_ball();
        let report = world.update(Fx::ZERO).expect("zero dt is a no-op");
        assert_eq!(report.tick, 0);
        assert_eq!(world.tick(), 0);
        assert!(matches!(
            world.update(-Fx::ONE),
            Err(WorldError::NegativeTimeStep(_))
        ));
        assert!(world.set_workers(0).is_err());
        assert_eq!(world.workers(), 1);
    }
}
