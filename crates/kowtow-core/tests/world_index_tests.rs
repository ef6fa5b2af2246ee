// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Broad-phase placement as seen through the world: bodies added at the
//! origin must move down the octree once they are positioned.

mod common;

use common::{add_body, init_tracing, pile, WORKER_COUNTS};
use kowtow_core::{BodyHandle, BodyKind, Fx, Material, SphereShape, Vec3, World};
use kowtow_geom::SpatialIndex;

fn spread(world: &mut World) -> Vec<BodyHandle> {
    [
        Vec3::from_ints(100, 100, 100),
        Vec3::from_ints(-150, -100, -100),
        Vec3::from_ints(100, -100, 100),
        Vec3::from_ints(-100, 100, -100),
    ]
    .into_iter()
    .map(|at| {
        add_body(
            world,
            SphereShape::new(Fx::ONE),
            Material::INERT,
            BodyKind::Static,
            at,
        )
    })
    .collect()
}

#[test]
fn positioned_bodies_leave_the_root() {
    init_tracing();
    let mut world = World::default();
    let bodies = spread(&mut world);
    for &h in &bodies {
        assert_eq!(world.index().depth_of(h), Some(0), "{h} starts at the origin");
    }

    let report = world.update(Fx::ONE).expect("tick");
    assert_eq!(report.relocations, bodies.len());
    assert_eq!(report.candidates, 0);
    assert_eq!(report.contacts, 0);
    assert!(world.index().node_count() > 1);
    for &h in &bodies {
        let depth = world.index().depth_of(h).expect("indexed");
        assert!(depth > 0, "{h} stuck at the root");
        assert_eq!(world.index().query(h), Ok(Vec::new()), "{h} sees far bodies");
    }

    let settled = world.update(Fx::ONE).expect("tick");
    assert_eq!(settled.relocations, 0);
}

#[test]
fn neighbours_in_one_octant_still_meet() {
    let mut world = World::default();
    let far = spread(&mut world);
    let a = add_body(
        &mut world,
        SphereShape::new(Fx::ONE),
        Material::INERT,
        BodyKind::Static,
        Vec3::from_ints(200, 200, 200),
    );
    let b = add_body(
        &mut world,
        SphereShape::new(Fx::ONE),
        Material::INERT,
        BodyKind::Static,
        Vec3::from_ints(201, 200, 200),
    );

    let report = world.update(Fx::ONE).expect("tick");
    assert_eq!(report.candidates, 2);
    assert_eq!(report.contacts, 2);
    assert_eq!(world.index().query(a), Ok(vec![b]));
    assert_eq!(world.index().query(b), Ok(vec![a]));
    for &h in &far {
        assert!(world.body(h).expect("live").colliders().is_empty());
    }
    let colliders = world.body(a).expect("live").colliders();
    assert_eq!(colliders.len(), 1);
    assert_eq!(colliders[0].body, b);
}

#[test]
fn moving_body_follows_its_octant() {
    let mut world = World::default();
    let bodies = spread(&mut world);
    world.update(Fx::ONE).expect("tick");

    let mover = bodies[0];
    world
        .body_mut(mover)
        .expect("live")
        .set_position(Vec3::from_ints(-101, 100, -100));
    let report = world.update(Fx::ONE).expect("tick");
    assert_eq!(report.relocations, 1);
    assert_eq!(world.index().query(mover), Ok(vec![bodies[3]]));
    assert_eq!(report.contacts, 2);
}

#[test]
fn pile_spreads_below_the_root_for_every_worker_count() {
    for workers in WORKER_COUNTS {
        let mut world = pile(7, 24);
        world.set_workers(workers).expect("workers");
        let report = world.update(Fx::from_ratio(1, 60)).expect("tick");
        assert!(report.relocations > 0, "workers={workers}");
        let deep = world
            .handles()
            .into_iter()
            .filter(|&h| world.index().depth_of(h).is_some_and(|d| d > 0))
            .count();
        assert!(deep > 0, "workers={workers}");
    }
}
