// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use core::fmt;
use core::ops::{BitAnd, BitOr};

/// Collision layer bitmask.
///
/// Two bodies are tested against each other only when their masks share at
/// least one bit ([`LayerMask::query`]). The filter runs before any
/// narrow-phase work.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerMask(u32);

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl LayerMask {
    /// Matches nothing.
    pub const NONE: Self = Self(0);
    /// Layer assigned to new bodies.
    pub const DEFAULT: Self = Self(1);
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Mask from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask with only bit `layer` set; `None` when `layer >= 32`.
    pub const fn layer(layer: u32) -> Option<Self> {
        if layer < u32::BITS {
            Some(Self(1 << layer))
        } else {
            None
        }
    }

    /// Raw bits.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// `true` when the two masks share a bit.
    pub const fn query(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
