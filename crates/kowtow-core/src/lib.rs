// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! kowtow-core: rigidbodies and the deterministic world stepper.
//!
//! A [`World`] owns its bodies by [`BodyHandle`] and an octree over their
//! bounds. Each [`World::update`] runs detection and integration as
//! fork/join phases over all bodies; every phase either only reads shared
//! state or writes one body's own state, and all merges happen in handle
//! order. The results, and [`World::state_hash`], are therefore identical
//! for any worker count.
//!
//! Contacts are reported through per-body event queues rather than
//! callbacks; see [`Rigidbody::drain_events`] and [`World::drain_events`].

mod body;
mod config;
mod events;
mod exec;
mod layer;
mod material;
mod telemetry;
mod world;

pub use body::{BodyError, BodyKind, DetectionMode, Rigidbody};
pub use config::{ConfigError, IndexConfig, WorldConfig, MAX_INDEX_DEPTH};
pub use events::{Collider, ContactEvent, EventKind};
pub use exec::{fan_out, NUM_SHARDS};
pub use layer::LayerMask;
pub use material::Material;
pub use telemetry::TickReport;
pub use world::{RayHit, World, WorldError};

pub use kowtow_geom::{
    Aabb, BodyHandle, BoxShape, CylinderShape, Pose, Shape, ShapeKind, SphereShape,
};
pub use kowtow_math::{Fx, Quat, Vec3};
