// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

/// Stable identity of a body owned by a world.
///
/// `index` addresses a storage slot; `generation` is bumped every time that
/// slot is reused, so a handle to a removed body never aliases its successor.
/// Ordering is `(index, generation)` and is the canonical order for every
/// deterministic output in the engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Creates a handle from its slot index and generation.
    pub const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Storage slot index.
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation at the time the handle was issued.
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Canonical little-endian encoding used by state digests.
    pub fn to_le_bytes(self) -> [u8; 8] {
        let mut out = [0_u8; 8];
        out[..4].copy_from_slice(&self.index.to_le_bytes());
        out[4..].copy_from_slice(&self.generation.to_le_bytes());
        out
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}v{}", self.index, self.generation)
    }
}
