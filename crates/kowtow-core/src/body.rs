// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use kowtow_geom::{Aabb, BodyHandle, Pose, Shape};
use kowtow_math::{Fx, Quat, Vec3};
use thiserror::Error;

use crate::events::{Collider, ContactEvent, EventKind};
use crate::layer::LayerMask;
use crate::material::Material;

/// Whether a body is moved by the simulation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Integrated every tick and pushed around by contacts.
    Dynamic,
    /// Never integrated and never written by contact resolution; still a
    /// collision target.
    #[default]
    Static,
}

/// Collision detection mode.
///
/// Stored and reported only; every body is detected discretely.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DetectionMode {
    /// Test poses at tick boundaries.
    #[default]
    Discrete,
    /// Requested swept detection.
    Continuous,
}

/// Invalid body or material parameters.
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub enum BodyError {
    /// Mass must be strictly positive.
    #[error("mass must be positive, got {0}")]
    NonPositiveMass(Fx),
    /// Friction must be non-negative.
    #[error("friction must be non-negative, got {0}")]
    NegativeFriction(Fx),
    /// Bounciness must be non-negative.
    #[error("bounciness must be non-negative, got {0}")]
    NegativeBounciness(Fx),
}

/// Read-only view of a contact partner taken before integration.
#[derive(Debug, Copy, Clone)]
pub(crate) struct Partner {
    pub(crate) velocity: Vec3,
    pub(crate) inverse_mass: Fx,
    pub(crate) material: Material,
    pub(crate) trigger: bool,
}

/// Result of integrating one body for one tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Motion {
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    pub(crate) force: Vec3,
}

/// A rigid body owned by a [`crate::World`].
///
/// Setters that move the body (`set_position`, `set_rotation`) flag its
/// bounds as stale; the world recomputes them before the next detection
/// pass.
#[derive(Debug, Clone)]
pub struct Rigidbody {
    layer: LayerMask,
    kind: BodyKind,
    trigger: bool,
    detection: DetectionMode,
    shape: Shape,
    aabb: Aabb,
    mass: Fx,
    material: Material,
    gravity_scale: Fx,
    position: Vec3,
    rotation: Quat,
    force: Vec3,
    drag: Fx,
    velocity: Vec3,
    colliders: Vec<Collider>,
    last_colliders: Vec<Collider>,
    events: Vec<ContactEvent>,
    dirty: bool,
}

impl Rigidbody {
    /// Creates a static body at the origin.
    pub fn new(shape: impl Into<Shape>, mass: Fx, material: Material) -> Result<Self, BodyError> {
        if !mass.is_positive() {
            return Err(BodyError::NonPositiveMass(mass));
        }
        let shape = shape.into();
        Ok(Self {
            layer: LayerMask::DEFAULT,
            kind: BodyKind::Static,
            trigger: false,
            detection: DetectionMode::Discrete,
            aabb: Aabb::from_shape(&shape, &Pose::IDENTITY),
            shape,
            mass,
            material,
            gravity_scale: Fx::ONE,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            force: Vec3::ZERO,
            drag: Fx::ZERO,
            velocity: Vec3::ZERO,
            colliders: Vec::new(),
            last_colliders: Vec::new(),
            events: Vec::new(),
            dirty: false,
        })
    }

    /// Accumulates `force` until the next integration. No-op for static bodies.
    pub fn apply_force(&mut self, force: Vec3) {
        if self.kind == BodyKind::Static {
            return;
        }
        self.force += force;
    }

    /// Changes velocity by `impulse / mass` immediately. No-op for static bodies.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.kind == BodyKind::Static {
            return;
        }
        self.velocity += impulse * self.inverse_mass();
    }

    /// Contacts found in the most recent tick, ordered by partner handle.
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Events queued since the last drain.
    pub fn events(&self) -> &[ContactEvent] {
        &self.events
    }

    /// Takes the queued events, oldest first.
    pub fn drain_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    /// Attached shape.
    pub const fn shape(&self) -> &Shape {
        &self.shape
    }

    /// World bounds as of the last refresh.
    pub const fn aabb(&self) -> Aabb {
        self.aabb
    }

    /// Current pose.
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.rotation)
    }

    /// World position of the body origin.
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the body.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty = true;
    }

    /// Orientation.
    pub const fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Rotates the body.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty = true;
    }

    /// Linear velocity.
    pub const fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Sets the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Force accumulated for the next tick.
    pub const fn force(&self) -> Vec3 {
        self.force
    }

    /// Dynamic or static.
    pub const fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Switches between dynamic and static.
    pub fn set_kind(&mut self, kind: BodyKind) {
        self.kind = kind;
    }

    /// Trigger bodies report overlaps but receive no contact response.
    pub const fn is_trigger(&self) -> bool {
        self.trigger
    }

    /// Marks the body as a trigger.
    pub fn set_trigger(&mut self, trigger: bool) {
        self.trigger = trigger;
    }

    /// Collision layer.
    pub const fn layer(&self) -> LayerMask {
        self.layer
    }

    /// Moves the body to another layer.
    pub fn set_layer(&mut self, layer: LayerMask) {
        self.layer = layer;
    }

    /// Detection mode flag.
    pub const fn detection(&self) -> DetectionMode {
        self.detection
    }

    /// Sets the detection mode flag.
    pub fn set_detection(&mut self, detection: DetectionMode) {
        self.detection = detection;
    }

    /// Gravity multiplier.
    pub const fn gravity_scale(&self) -> Fx {
        self.gravity_scale
    }

    /// Sets the gravity multiplier.
    pub fn set_gravity_scale(&mut self, scale: Fx) {
        self.gravity_scale = scale;
    }

    /// Linear drag coefficient.
    pub const fn drag(&self) -> Fx {
        self.drag
    }

    /// Sets the linear drag coefficient.
    pub fn set_drag(&mut self, drag: Fx) {
        self.drag = drag;
    }

    /// Mass.
    pub const fn mass(&self) -> Fx {
        self.mass
    }

    /// Changes the mass; it must stay strictly positive.
    pub fn set_mass(&mut self, mass: Fx) -> Result<(), BodyError> {
        if !mass.is_positive() {
            return Err(BodyError::NonPositiveMass(mass));
        }
        self.mass = mass;
        Ok(())
    }

    /// `1 / mass` for dynamic bodies, zero for static ones.
    pub fn inverse_mass(&self) -> Fx {
        match self.kind {
            BodyKind::Dynamic => Fx::ONE / self.mass,
            BodyKind::Static => Fx::ZERO,
        }
    }

    /// Surface material.
    pub const fn material(&self) -> Material {
        self.material
    }

    /// Replaces the surface material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
    }

    pub(crate) const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn compute_aabb(&self) -> Aabb {
        Aabb::from_shape(&self.shape, &self.pose())
    }

    pub(crate) fn store_aabb(&mut self, aabb: Aabb) {
        self.aabb = aabb;
        self.dirty = false;
    }

    pub(crate) fn partner(&self) -> Partner {
        Partner {
            velocity: self.velocity,
            inverse_mass: self.inverse_mass(),
            material: self.material,
            trigger: self.trigger,
        }
    }

    /// Rotates the collider lists and queues Enter/Stay/Exit events.
    ///
    /// Records are paired by partner handle. Returns the number of events
    /// queued.
    pub(crate) fn record_contacts(&mut self, colliders: Vec<Collider>) -> usize {
        self.last_colliders = std::mem::replace(&mut self.colliders, colliders);
        let queued = self.events.len();
        let trigger = self.trigger;
        for current in &self.colliders {
            let continuing = self.last_colliders.iter().any(|c| c.body == current.body);
            let kind = if continuing {
                EventKind::stay(trigger)
            } else {
                EventKind::enter(trigger)
            };
            self.events.push(ContactEvent {
                kind,
                collider: *current,
            });
        }
        for previous in &self.last_colliders {
            if !self.colliders.iter().any(|c| c.body == previous.body) {
                self.events.push(ContactEvent {
                    kind: EventKind::exit(trigger),
                    collider: *previous,
                });
            }
        }
        self.events.len() - queued
    }

    /// Semi-implicit Euler step plus contact response.
    ///
    /// Gravity enters as a force. Each non-trigger contact that is not
    /// already separating gets a restitution impulse, a friction force for
    /// the next tick and a full positional correction along its normal.
    /// Returns `None` for static bodies.
    pub(crate) fn integrate<F>(&self, gravity: Vec3, dt: Fx, partner: F) -> Option<Motion>
    where
        F: Fn(BodyHandle) -> Option<Partner>,
    {
        if self.kind == BodyKind::Static {
            return None;
        }
        let inverse_mass = self.inverse_mass();
        let force = self.force + gravity * self.gravity_scale;
        let mut velocity = self.velocity + force * inverse_mass * dt;
        velocity *= Fx::ONE - self.drag * dt;
        let mut position = self.position + velocity * dt;
        let mut next_force = Vec3::ZERO;

        if !self.trigger {
            for collider in &self.colliders {
                let Some(other) = partner(collider.body) else {
                    continue;
                };
                if other.trigger {
                    continue;
                }
                let relative = velocity - other.velocity;
                let along_normal = relative.dot(collider.normal);
                if along_normal.is_positive() {
                    continue;
                }
                let restitution = self.material.combined_bounciness(&other.material);
                let magnitude = -(Fx::ONE + restitution) * along_normal
                    / (inverse_mass + other.inverse_mass);
                velocity += collider.normal * magnitude * inverse_mass;

                let tangent = relative - collider.normal * along_normal;
                let friction = tangent.magnitude() * self.material.combined_friction(&other.material);
                if friction.is_positive() {
                    next_force -= tangent.normalize() * friction;
                }

                position += collider.normal * collider.penetration;
            }
        }

        Some(Motion {
            position,
            velocity,
            force: next_force,
        })
    }

    pub(crate) fn apply_motion(&mut self, motion: Motion) {
        if motion.position != self.position {
            self.dirty = true;
        }
        self.position = motion.position;
        self.velocity = motion.velocity;
        self.force = motion.force;
    }
}
