// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(dead_code)]

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use kowtow_geom::{BoxShape, CylinderShape, Pose, Shape, SphereShape};
use kowtow_math::{Fx, Quat, Vec3};

/// Runner with a committed seed so failures reproduce on every machine.
pub fn pinned_runner(tag: u8) -> TestRunner {
    let mut seed = [0_u8; 32];
    seed[0] = 0x4b;
    seed[1] = tag;
    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &seed);
    TestRunner::new_with_rng(PropConfig::default(), rng)
}

/// Tenths: `tenths(15) == 1.5`.
pub fn tenths(n: i64) -> Fx {
    Fx::from_ratio(n, 10)
}

pub fn shape_strategy() -> impl Strategy<Value = Shape> {
    let dim = 2_i64..30;
    prop_oneof![
        prop::array::uniform3(dim.clone())
            .prop_map(|[x, y, z]| Shape::Box(BoxShape::new(Vec3::new(tenths(x), tenths(y), tenths(z))))),
        dim.clone()
            .prop_map(|r| Shape::Sphere(SphereShape::new(tenths(r)))),
        (dim.clone(), dim)
            .prop_map(|(h, r)| Shape::Cylinder(CylinderShape::new(tenths(h), tenths(r)))),
    ]
}

pub fn rotation_strategy() -> impl Strategy<Value = Quat> {
    prop::array::uniform3(-31_i64..=31)
        .prop_map(|[x, y, z]| Quat::from_euler(tenths(x), tenths(y), tenths(z)))
}

pub fn pose_strategy(spread: i64) -> impl Strategy<Value = Pose> {
    (prop::array::uniform3(-spread..=spread), rotation_strategy())
        .prop_map(|([x, y, z], q)| Pose::new(Vec3::new(tenths(x), tenths(y), tenths(z)), q))
}
