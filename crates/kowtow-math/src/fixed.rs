// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic fixed-point scalar with Q32.32 encoding stored in an `i64`.
//!
//! The underlying integer stores the value scaled by `2^32`:
//!
//! ```text
//! real_value = raw / 2^32
//! ```
//!
//! # Determinism contract
//!
//! - All arithmetic is performed in integer space with saturating overflow.
//! - Multiplication/division use round-to-nearest, ties-to-even semantics.
//! - `sqrt` is the floor integer square root of the widened raw value.
//! - `sin`/`cos` are evaluated by a fixed-point polynomial; no platform
//!   transcendentals are involved.
//! - `f32` conversions exist only for configuration and diagnostics and are
//!   themselves deterministic (power-of-two scaling plus ties-to-even).

use core::fmt;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::trig;

/// Number of fractional bits in the Q32.32 encoding.
pub const FRAC_BITS: u32 = 32;

const ONE_RAW: i64 = 1_i64 << FRAC_BITS;

/// `2^32` as an `f32`; multiplying or dividing by it is exact.
const SCALE_F32: f32 = 4_294_967_296.0;

#[allow(clippy::cast_possible_truncation)]
const fn saturate(value: i128) -> i64 {
    if value > i64::MAX as i128 {
        i64::MAX
    } else if value < i64::MIN as i128 {
        i64::MIN
    } else {
        value as i64
    }
}

/// Unsigned division rounding to nearest, ties to even.
const fn div_round_even(num: u128, den: u128) -> u128 {
    let q = num / den;
    let r = num % den;
    let twice = r << 1;
    if twice > den || (twice == den && (q & 1) == 1) {
        q + 1
    } else {
        q
    }
}

#[allow(clippy::cast_possible_wrap)]
const fn apply_sign(magnitude: u128, negative: bool) -> i64 {
    // Magnitudes above i128::MAX cannot occur: callers shift at most 95 bits.
    let signed = magnitude as i128;
    saturate(if negative { -signed } else { signed })
}

const fn mul_raw(a: i64, b: i64) -> i64 {
    let prod = (a as i128) * (b as i128);
    let rounded = div_round_even(prod.unsigned_abs(), 1_u128 << FRAC_BITS);
    apply_sign(rounded, prod < 0)
}

const fn div_raw(a: i64, b: i64) -> i64 {
    if b == 0 {
        // 0/0 → 0, x/0 saturates toward the sign of x.
        return if a == 0 {
            0
        } else if a < 0 {
            i64::MIN
        } else {
            i64::MAX
        };
    }
    let num = (a.unsigned_abs() as u128) << FRAC_BITS;
    let den = b.unsigned_abs() as u128;
    apply_sign(div_round_even(num, den), (a < 0) != (b < 0))
}

/// Q32.32 fixed-point scalar.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fx {
    raw: i64,
}

impl Fx {
    /// The fixed-point zero value.
    pub const ZERO: Self = Self { raw: 0 };

    /// The fixed-point one value.
    pub const ONE: Self = Self { raw: ONE_RAW };

    /// `0.5`.
    pub const HALF: Self = Self { raw: ONE_RAW >> 1 };

    /// `2.0`.
    pub const TWO: Self = Self { raw: ONE_RAW << 1 };

    /// Largest representable value (≈ 2.1e9).
    pub const MAX: Self = Self { raw: i64::MAX };

    /// Smallest representable value.
    pub const MIN: Self = Self { raw: i64::MIN };

    /// Geometric tolerance (≈ `1e-3`) used to guard near-zero overlaps and
    /// near-parallel axes.
    pub const EPSILON: Self = Self { raw: 4_294_967 };

    /// π rounded to Q32.32.
    pub const PI: Self = Self {
        raw: 13_493_037_705,
    };

    /// π/2 rounded to Q32.32.
    pub const FRAC_PI_2: Self = Self { raw: 6_746_518_852 };

    /// 2π rounded to Q32.32.
    pub const TAU: Self = Self {
        raw: 26_986_075_409,
    };

    /// Constructs a value from its raw Q32.32 integer (exact).
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw }
    }

    /// Returns the raw Q32.32 storage value.
    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Converts an integer, saturating outside `±2^31`.
    #[must_use]
    pub const fn from_int(n: i64) -> Self {
        Self {
            raw: saturate((n as i128) << FRAC_BITS),
        }
    }

    /// Builds the exact quotient `num / den` (rounded to nearest, ties to even).
    ///
    /// Usable in `const` context for literals such as `Fx::from_ratio(-98, 10)`.
    #[must_use]
    pub const fn from_ratio(num: i64, den: i64) -> Self {
        Self {
            raw: div_raw(Self::from_int(num).raw, Self::from_int(den).raw),
        }
    }

    /// Deterministically converts an `f32`.
    ///
    /// - `NaN` maps to zero.
    /// - `±∞` and out-of-range values saturate.
    /// - Values are rounded to nearest with ties-to-even at the Q32.32 boundary.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f32(value: f32) -> Self {
        // Scaling by a power of two is exact in IEEE-754; the float→int cast
        // saturates and maps NaN to zero.
        Self {
            raw: (value * SCALE_F32).round_ties_even() as i64,
        }
    }

    /// Converts to `f32` for diagnostics (rounds to nearest, ties to even).
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f32(self) -> f32 {
        self.raw as f32 / SCALE_F32
    }

    /// Largest integer not greater than `self`.
    pub const fn floor_int(self) -> i64 {
        self.raw >> FRAC_BITS
    }

    /// Returns `true` for exactly zero.
    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Returns `true` for values strictly below zero.
    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    /// Returns `true` for values strictly above zero.
    pub const fn is_positive(self) -> bool {
        self.raw > 0
    }

    /// Absolute value (saturating at `MAX` for `MIN`).
    #[must_use]
    pub const fn abs(self) -> Self {
        Self {
            raw: self.raw.saturating_abs(),
        }
    }

    /// `-1`, `0` or `1` according to the sign of `self`.
    #[must_use]
    pub const fn signum(self) -> Self {
        Self::from_int(self.raw.signum())
    }

    /// Restricts `self` to `[lo, hi]`; a reversed range collapses to `lo`.
    #[must_use]
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        if self < lo {
            lo
        } else if self > hi {
            hi.max(lo)
        } else {
            self
        }
    }

    /// Square root; negative inputs yield zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn sqrt(self) -> Self {
        if self.raw <= 0 {
            return Self::ZERO;
        }
        // sqrt(raw / 2^32) * 2^32 == sqrt(raw * 2^32); the root is < 2^48.
        let root = ((self.raw as u128) << FRAC_BITS).isqrt();
        Self { raw: root as i64 }
    }

    /// Sine of `self` (radians).
    #[must_use]
    pub fn sin(self) -> Self {
        trig::sin(self)
    }

    /// Cosine of `self` (radians).
    #[must_use]
    pub fn cos(self) -> Self {
        trig::cos(self)
    }

    /// Sine and cosine of `self` (radians).
    pub fn sin_cos(self) -> (Self, Self) {
        (trig::sin(self), trig::cos(self))
    }

    /// Root of the sum of squared raw components, computed without the
    /// intermediate rounding of `x*x`; used by vector magnitudes.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub(crate) fn hypot3(x: Self, y: Self, z: Self) -> Self {
        let sq = |v: Self| {
            let a = u128::from(v.raw.unsigned_abs());
            a * a
        };
        let sum = sq(x).saturating_add(sq(y)).saturating_add(sq(z));
        Self {
            raw: saturate(sum.isqrt() as i128),
        }
    }
}

impl fmt::Display for Fx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.raw.unsigned_abs();
        let int = magnitude >> FRAC_BITS;
        let frac = magnitude & (u64::MAX >> (64 - FRAC_BITS));
        let micros = (u128::from(frac) * 1_000_000) >> FRAC_BITS;
        let sign = if self.raw < 0 { "-" } else { "" };
        write!(f, "{sign}{int}.{micros:06}")
    }
}

impl From<i32> for Fx {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl Add for Fx {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            raw: self.raw.saturating_add(rhs.raw),
        }
    }
}

impl Sub for Fx {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            raw: self.raw.saturating_sub(rhs.raw),
        }
    }
}

impl Mul for Fx {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self {
            raw: mul_raw(self.raw, rhs.raw),
        }
    }
}

impl Div for Fx {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self {
            raw: div_raw(self.raw, rhs.raw),
        }
    }
}

impl Neg for Fx {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            raw: self.raw.saturating_neg(),
        }
    }
}

impl AddAssign for Fx {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Fx {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Fx {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Fx {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}
