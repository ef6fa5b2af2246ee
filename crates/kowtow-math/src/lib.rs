// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Deterministic numeric layer for Kowtow.
//!
//! Every quantity on the simulation path is a Q32.32 fixed-point [`Fx`]:
//! the same inputs produce bit-identical outputs on every platform, compiler
//! and thread schedule. `f32` appears only at the configuration and
//! diagnostics boundary.
//!
//! * [`Fx`]: scalar with saturating arithmetic, `sqrt`, `sin`/`cos`.
//! * [`Vec3`]: points and directions.
//! * [`Quat`]: rotations, with Euler and axis-angle constructors.
//! * [`Mat3`]: row-major rotation/linear matrix.

mod fixed;
mod mat3;
mod quat;
mod trig;
mod vec3;

pub use fixed::{Fx, FRAC_BITS};
pub use mat3::Mat3;
pub use quat::Quat;
pub use vec3::Vec3;
