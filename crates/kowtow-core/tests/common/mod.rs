// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(dead_code, clippy::expect_used)]

use kowtow_core::{
    BodyHandle, BodyKind, BoxShape, CylinderShape, Fx, Material, Quat, Shape, SphereShape, Vec3,
    World,
};

/// Worker counts every invariance test sweeps.
pub const WORKER_COUNTS: [usize; 4] = [1, 2, 4, 8];

/// Earth-like gravity, `(0, -9.8, 0)`.
pub fn earth_gravity() -> Vec3 {
    Vec3::new(Fx::ZERO, Fx::from_ratio(-49, 5), Fx::ZERO)
}

/// One sixtieth of a second.
pub fn sixtieth() -> Fx {
    Fx::from_ratio(1, 60)
}

/// Tenths: `tenths(15) == 1.5`.
pub fn tenths(n: i64) -> Fx {
    Fx::from_ratio(n, 10)
}

/// Routes `tracing` output to the test harness; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

/// Static `100 × 1 × 100` box centered on the origin.
pub fn add_ground(world: &mut World) -> BodyHandle {
    world
        .add_rigidbody(
            BoxShape::from_size(Vec3::from_ints(100, 1, 100)),
            Fx::ONE,
            Material::INERT,
        )
        .expect("ground is valid")
}

/// Adds a unit-mass body of `kind` at `position`.
pub fn add_body(
    world: &mut World,
    shape: impl Into<Shape>,
    material: Material,
    kind: BodyKind,
    position: Vec3,
) -> BodyHandle {
    let handle = world
        .add_rigidbody(shape, Fx::ONE, material)
        .expect("body is valid");
    let body = world.body_mut(handle).expect("just added");
    body.set_kind(kind);
    body.set_position(position);
    handle
}

/// xorshift64* generator for reproducible scene layouts.
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform integer in `lo..hi`.
    pub fn range(&mut self, lo: i64, hi: i64) -> i64 {
        let span = u64::try_from(hi - lo).expect("non-empty range");
        lo + i64::try_from(self.next_u64() % span).expect("span fits i64")
    }
}

/// Ground plus `count` mixed dynamic bodies dropped in a loose pile.
///
/// Shapes cycle box, sphere, cylinder; positions and tilts come from `seed`.
pub fn pile(seed: u64, count: usize) -> World {
    let mut rng = XorShift64::new(seed);
    let mut world = World::new(earth_gravity());
    add_ground(&mut world);
    let material = Material::new(Fx::HALF, Fx::from_ratio(1, 4)).expect("valid material");
    for i in 0..count {
        let shape: Shape = match i % 3 {
            0 => BoxShape::new(Vec3::new(tenths(4), tenths(3), tenths(5))).into(),
            1 => SphereShape::new(tenths(5)).into(),
            _ => CylinderShape::new(Fx::ONE, tenths(4)).into(),
        };
        let position = Vec3::new(
            tenths(rng.range(-30, 30)),
            tenths(rng.range(10, 60)),
            tenths(rng.range(-30, 30)),
        );
        let handle = add_body(&mut world, shape, material, BodyKind::Dynamic, position);
        let tilt = Quat::from_euler(
            tenths(rng.range(-15, 15)),
            tenths(rng.range(-31, 31)),
            tenths(rng.range(-15, 15)),
        );
        world.body_mut(handle).expect("just added").set_rotation(tilt);
    }
    world
}
