// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-tick counters and their structured log records.
//!
//! Nothing here installs a subscriber; hosts decide where records go.

use kowtow_geom::BodyHandle;
use serde::Serialize;
use tracing::{debug, trace, warn};

/// Counters for one call to [`crate::World::update`].
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TickReport {
    /// Tick number after the update; unchanged by a zero time step.
    pub tick: u64,
    /// Live bodies processed.
    pub bodies: usize,
    /// Candidate pairs returned by the broad phase (each direction counted).
    pub candidates: usize,
    /// Collider records produced by the narrow phase.
    pub contacts: usize,
    /// Bodies moved to another octree node.
    pub relocations: usize,
    /// Events queued during notification.
    pub events: usize,
}

impl TickReport {
    /// Single-line JSON form for log shipping.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub(crate) fn phase(name: &'static str, tick: u64, count: usize) {
    trace!(target: "kowtow::telemetry", tick, phase = name, count);
}

pub(crate) fn summary(report: &TickReport) {
    debug!(
        target: "kowtow::telemetry",
        tick = report.tick,
        bodies = report.bodies,
        candidates = report.candidates,
        contacts = report.contacts,
        relocations = report.relocations,
        events = report.events,
        "tick complete"
    );
}

pub(crate) fn violation<E: core::fmt::Display + ?Sized>(what: &E) {
    warn!(target: "kowtow::telemetry", "contract violation: {what}");
}

pub(crate) fn body_added(handle: BodyHandle, kind: kowtow_geom::ShapeKind) {
    debug!(target: "kowtow::telemetry", body = %handle, ?kind, "body added");
}

pub(crate) fn body_removed(handle: BodyHandle) {
    debug!(target: "kowtow::telemetry", body = %handle, "body removed");
}
