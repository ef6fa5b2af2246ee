// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic trigonometry for [`Fx`].
//!
//! Angles are reduced modulo 2π in raw integer space, folded into
//! `[-π/2, π/2]` and evaluated with a degree-11 odd Taylor polynomial in
//! Horner form. Every step is integer arithmetic, so results are identical on
//! all targets.

use crate::Fx;

const INV_6: Fx = Fx::from_ratio(1, 6);
const INV_20: Fx = Fx::from_ratio(1, 20);
const INV_42: Fx = Fx::from_ratio(1, 42);
const INV_72: Fx = Fx::from_ratio(1, 72);
const INV_110: Fx = Fx::from_ratio(1, 110);

/// Wraps `angle` into `(-π, π]`.
fn reduce(angle: Fx) -> Fx {
    let tau = Fx::TAU.raw();
    let mut r = angle.raw().rem_euclid(tau);
    if r > Fx::PI.raw() {
        r -= tau;
    }
    Fx::from_raw(r)
}

/// Folds `x ∈ (-π, π]` into `[-π/2, π/2]` preserving `sin`.
fn fold(x: Fx) -> Fx {
    if x > Fx::FRAC_PI_2 {
        Fx::PI - x
    } else if x < -Fx::FRAC_PI_2 {
        -Fx::PI - x
    } else {
        x
    }
}

/// Sine of `angle` in radians.
pub(crate) fn sin(angle: Fx) -> Fx {
    let x = fold(reduce(angle));
    if x == Fx::FRAC_PI_2 {
        return Fx::ONE;
    }
    if x == -Fx::FRAC_PI_2 {
        return -Fx::ONE;
    }
    let x2 = x * x;
    let mut acc = Fx::ONE - x2 * INV_110;
    acc = Fx::ONE - x2 * INV_72 * acc;
    acc = Fx::ONE - x2 * INV_42 * acc;
    acc = Fx::ONE - x2 * INV_20 * acc;
    acc = Fx::ONE - x2 * INV_6 * acc;
    (x * acc).clamp(-Fx::ONE, Fx::ONE)
}

/// Cosine of `angle` in radians.
pub(crate) fn cos(angle: Fx) -> Fx {
    sin(reduce(angle) + Fx::FRAC_PI_2)
}
