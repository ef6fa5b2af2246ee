// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Collision records and the edge-triggered events derived from them.

use kowtow_geom::{BodyHandle, Contact};
use kowtow_math::{Fx, Vec3};

/// One contact seen from the body that owns the record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Collider {
    /// The other body.
    pub body: BodyHandle,
    /// Approximate world-space contact point.
    pub point: Vec3,
    /// Unit normal from the other body toward the owner.
    pub normal: Vec3,
    /// Overlap depth along `normal`.
    pub penetration: Fx,
}

impl Collider {
    /// Record against `body` built from a narrow-phase contact.
    pub const fn from_contact(body: BodyHandle, contact: Contact) -> Self {
        Self {
            body,
            point: contact.point,
            normal: contact.normal,
            penetration: contact.penetration,
        }
    }
}

/// What happened to a contact between two consecutive ticks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    /// Solid contact began this tick.
    CollisionEnter,
    /// Solid contact continues from the previous tick.
    CollisionStay,
    /// Solid contact ended this tick.
    CollisionExit,
    /// Trigger overlap began this tick.
    TriggerEnter,
    /// Trigger overlap continues from the previous tick.
    TriggerStay,
    /// Trigger overlap ended this tick.
    TriggerExit,
}

impl EventKind {
    pub(crate) const fn enter(trigger: bool) -> Self {
        if trigger {
            Self::TriggerEnter
        } else {
            Self::CollisionEnter
        }
    }

    pub(crate) const fn stay(trigger: bool) -> Self {
        if trigger {
            Self::TriggerStay
        } else {
            Self::CollisionStay
        }
    }

    pub(crate) const fn exit(trigger: bool) -> Self {
        if trigger {
            Self::TriggerExit
        } else {
            Self::CollisionExit
        }
    }

    /// `true` for the three trigger kinds.
    pub const fn is_trigger(self) -> bool {
        matches!(
            self,
            Self::TriggerEnter | Self::TriggerStay | Self::TriggerExit
        )
    }
}

/// Queued notification for one body.
///
/// Exit events carry the last record seen for the pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ContactEvent {
    /// Transition kind.
    pub kind: EventKind,
    /// Contact the event refers to.
    pub collider: Collider,
}
