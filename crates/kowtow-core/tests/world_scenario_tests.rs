// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! End-to-end world scenarios: resting contact, layer filtering, ray casts.

mod common;

use common::{add_body, add_ground, earth_gravity, init_tracing, sixtieth, tenths};
use kowtow_core::{BodyKind, Fx, LayerMask, Material, SphereShape, Vec3, World};

#[test]
fn sphere_comes_to_rest_on_static_ground() {
    init_tracing();
    let mut world = World::new(earth_gravity());
    let ground = add_ground(&mut world);
    let ball = add_body(
        &mut world,
        SphereShape::new(Fx::HALF),
        Material::INERT,
        BodyKind::Dynamic,
        Vec3::from_ints(0, 10, 0),
    );

    let mut touched = false;
    for _ in 0..200 {
        let report = world.update(sixtieth()).expect("tick");
        touched |= report.contacts > 0;
    }
    assert!(touched);

    let ball_body = world.body(ball).expect("ball is live");
    let ground_body = world.body(ground).expect("ground is live");
    let gap = ball_body.aabb().min().y - ground_body.aabb().max().y;
    assert!(gap.abs() <= Fx::from_ratio(1, 100), "gap {gap}");
    assert_eq!(ball_body.velocity(), Vec3::ZERO);
    assert_eq!(ground_body.position(), Vec3::ZERO);
    assert_eq!(ball_body.colliders().len(), 1);
    assert_eq!(ball_body.colliders()[0].body, ground);
    assert_eq!(ball_body.colliders()[0].normal, Vec3::UNIT_Y);

    // Steady state: another tick leaves the ball where it is.
    let before = ball_body.position();
    world.update(sixtieth()).expect("tick");
    assert_eq!(world.body(ball).expect("ball is live").position(), before);
}

#[test]
fn layer_filter_runs_before_narrow_phase() {
    let mut world = World::default();
    let a = add_body(
        &mut world,
        SphereShape::new(Fx::ONE),
        Material::INERT,
        BodyKind::Dynamic,
        Vec3::ZERO,
    );
    let b = add_body(
        &mut world,
        SphereShape::new(Fx::ONE),
        Material::INERT,
        BodyKind::Dynamic,
        Vec3::new(Fx::HALF, Fx::ZERO, Fx::ZERO),
    );
    world.body_mut(a).expect("live").set_layer(LayerMask::from_bits(0b01));
    world.body_mut(b).expect("live").set_layer(LayerMask::from_bits(0b10));

    let report = world.update(sixtieth()).expect("tick");
    assert!(world.body(a).expect("live").aabb().overlaps(&world.body(b).expect("live").aabb()));
    assert_eq!(report.contacts, 0);
    assert!(world.body(a).expect("live").colliders().is_empty());
    assert!(world.body(b).expect("live").colliders().is_empty());
    assert_eq!(world.body(a).expect("live").position(), Vec3::ZERO);

    world.body_mut(b).expect("live").set_layer(LayerMask::from_bits(0b11));
    let report = world.update(sixtieth()).expect("tick");
    assert_eq!(report.contacts, 2);
    assert_eq!(world.body(a).expect("live").colliders()[0].body, b);
    assert_eq!(world.body(b).expect("live").colliders()[0].body, a);
}

#[test]
fn raycast_returns_nearest_matching_body() {
    let mut world = World::new(earth_gravity());
    let ground = add_ground(&mut world);
    let ball = add_body(
        &mut world,
        SphereShape::new(Fx::ONE),
        Material::INERT,
        BodyKind::Static,
        Vec3::from_ints(0, 5, 0),
    );
    let start = Vec3::from_ints(0, 10, 0);
    let end = Vec3::from_ints(0, -10, 0);

    // The ball was moved after insertion and is found before any update.
    let hit = world.raycast(start, end, LayerMask::ALL).expect("hits the ball");
    assert_eq!(hit.body, ball);
    assert_eq!(hit.normal, Vec3::UNIT_Y);
    assert!((hit.distance - Fx::from_int(4)).abs() <= Fx::EPSILON);
    assert!((hit.point.y - Fx::from_int(6)).abs() <= Fx::EPSILON);

    world
        .body_mut(ball)
        .expect("live")
        .set_layer(LayerMask::from_bits(0b10));
    world.update(sixtieth()).expect("tick");
    let hit = world
        .raycast(start, end, LayerMask::DEFAULT)
        .expect("hits the ground");
    assert_eq!(hit.body, ground);
    assert!((hit.distance - tenths(95)).abs() <= Fx::EPSILON);

    let far = Vec3::from_ints(60, 10, 0);
    assert!(world
        .raycast(far, Vec3::from_ints(60, -10, 0), LayerMask::ALL)
        .is_none());
    assert!(world.raycast(start, end, LayerMask::NONE).is_none());
}
