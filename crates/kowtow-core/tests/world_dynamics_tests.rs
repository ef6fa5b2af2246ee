// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Contact response and body lifecycle through the world API.

mod common;

use common::{add_body, add_ground, earth_gravity, sixtieth, tenths};
use kowtow_core::{
    BodyError, BodyKind, DetectionMode, Fx, Material, SphereShape, Vec3, World, WorldError,
};

fn speed_sum(world: &World, handles: &[kowtow_core::BodyHandle]) -> Fx {
    handles
        .iter()
        .map(|&h| world.body(h).expect("live").velocity().magnitude())
        .fold(Fx::ZERO, |acc, v| acc + v)
}

#[test]
fn head_on_collision_does_not_inject_energy() {
    let mut world = World::default();
    let bouncy = Material::new(Fx::ZERO, Fx::ONE).expect("valid material");
    let dead = Material::new(Fx::ZERO, Fx::ZERO).expect("valid material");
    let a = add_body(
        &mut world,
        SphereShape::new(Fx::HALF),
        bouncy,
        BodyKind::Dynamic,
        Vec3::ZERO,
    );
    let b = add_body(
        &mut world,
        SphereShape::new(Fx::HALF),
        dead,
        BodyKind::Dynamic,
        Vec3::new(tenths(9), Fx::ZERO, Fx::ZERO),
    );
    world
        .body_mut(a)
        .expect("live")
        .set_velocity(Vec3::from_ints(2, 0, 0));

    let before = speed_sum(&world, &[a, b]);
    let energy_before = Fx::from_int(4);
    world.update(sixtieth()).expect("tick");
    let after = speed_sum(&world, &[a, b]);
    assert!(after <= before, "speed grew from {before} to {after}");

    let va = world.body(a).expect("live").velocity();
    let vb = world.body(b).expect("live").velocity();
    // Restitution is min(1, 0): the pair ends up moving together.
    assert_eq!(va, Vec3::UNIT_X);
    assert_eq!(vb, Vec3::UNIT_X);
    assert!(va.sqr_magnitude() + vb.sqr_magnitude() <= energy_before);
}

#[test]
fn static_bodies_are_never_written() {
    let mut world = World::new(earth_gravity());
    let ground = add_ground(&mut world);
    let ball = add_body(
        &mut world,
        SphereShape::new(Fx::HALF),
        Material::INERT,
        BodyKind::Dynamic,
        Vec3::new(Fx::ZERO, tenths(8), Fx::ZERO),
    );
    world
        .body_mut(ball)
        .expect("live")
        .set_velocity(Vec3::from_ints(0, -20, 0));
    {
        let g = world.body_mut(ground).expect("live");
        g.apply_force(Vec3::from_ints(0, 100, 0));
        g.apply_impulse(Vec3::from_ints(0, 100, 0));
    }
    for _ in 0..30 {
        world.update(sixtieth()).expect("tick");
    }
    let g = world.body(ground).expect("live");
    assert_eq!(g.position(), Vec3::ZERO);
    assert_eq!(g.velocity(), Vec3::ZERO);
    assert_eq!(g.force(), Vec3::ZERO);
    assert!(world.body(ball).expect("live").position().y > Fx::HALF);
}

#[test]
fn friction_slows_a_sliding_body() {
    let mut world = World::new(earth_gravity());
    let rough = Material::new(Fx::ONE, Fx::ZERO).expect("valid material");
    let ground = add_ground(&mut world);
    world.body_mut(ground).expect("live").set_material(rough);
    let puck = add_body(
        &mut world,
        SphereShape::new(Fx::HALF),
        rough,
        BodyKind::Dynamic,
        Vec3::new(Fx::ZERO, tenths(10), Fx::ZERO),
    );
    world
        .body_mut(puck)
        .expect("live")
        .set_velocity(Vec3::from_ints(3, 0, 0));
    for _ in 0..30 {
        world.update(sixtieth()).expect("tick");
    }
    let vx = world.body(puck).expect("live").velocity().x;
    assert!(vx < Fx::from_int(3));
    assert!(!vx.is_negative());
}

#[test]
fn invalid_bodies_are_rejected() {
    let mut world = World::default();
    let err = world
        .add_rigidbody(SphereShape::new(Fx::ONE), Fx::ZERO, Material::INERT)
        .expect_err("zero mass");
    assert!(matches!(
        err,
        WorldError::InvalidBody(BodyError::NonPositiveMass(m)) if m == Fx::ZERO
    ));
    let err = world
        .add_rigidbody(SphereShape::new(Fx::ONE), -Fx::ONE, Material::INERT)
        .expect_err("negative mass");
    assert!(matches!(err, WorldError::InvalidBody(_)));
    assert!(world.is_empty());
    assert!(Material::new(-Fx::ONE, Fx::ZERO).is_err());
}

#[test]
fn removing_unknown_or_stale_handles_fails() {
    let mut world = World::default();
    let h = world
        .add_rigidbody(SphereShape::new(Fx::ONE), Fx::ONE, Material::INERT)
        .expect("add");
    let removed = world.remove_rigidbody(h).expect("first removal");
    assert_eq!(removed.mass(), Fx::ONE);
    assert!(!world.index().contains(h));
    assert!(matches!(
        world.remove_rigidbody(h),
        Err(WorldError::UnknownBody(x)) if x == h
    ));
    assert!(world.update(sixtieth()).is_ok());
    assert_eq!(world.len(), 0);
}

#[test]
fn body_properties_round_trip() {
    let mut world = World::default();
    let h = world
        .add_rigidbody(SphereShape::new(Fx::ONE), Fx::TWO, Material::INERT)
        .expect("add");
    let body = world.body_mut(h).expect("live");
    assert_eq!(body.kind(), BodyKind::Static);
    assert_eq!(body.detection(), DetectionMode::Discrete);
    body.set_detection(DetectionMode::Continuous);
    body.set_gravity_scale(Fx::HALF);
    body.set_drag(tenths(1));
    assert_eq!(body.detection(), DetectionMode::Continuous);
    assert_eq!(body.gravity_scale(), Fx::HALF);
    assert_eq!(body.drag(), tenths(1));
    assert_eq!(body.mass(), Fx::TWO);
}
