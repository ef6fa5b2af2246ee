// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
//! Integration tests for the octree broad phase.

mod common;

use common::{pinned_runner, pose_strategy, shape_strategy};
use proptest::prelude::*;

use kowtow_geom::{detect, Aabb, BodyHandle, Octree, Pose, Shape, SpatialIndex};
use kowtow_math::Vec3;

fn handle(i: usize) -> BodyHandle {
    BodyHandle::new(u32::try_from(i).unwrap_or(u32::MAX), 0)
}

fn assert_no_false_negatives(tree: &Octree, bodies: &[(Shape, Pose)]) -> Result<(), TestCaseError> {
    for (i, (sa, pa)) in bodies.iter().enumerate() {
        let ha = handle(i);
        let candidates = tree.query(ha).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (j, (sb, pb)) in bodies.iter().enumerate() {
            if i == j {
                continue;
            }
            let strict = Aabb::from_shape(sa, pa).overlaps(&Aabb::from_shape(sb, pb));
            if strict && detect(sa, pa, sb, pb).is_some() {
                let hb = handle(j);
                prop_assert!(candidates.binary_search(&hb).is_ok(), "{hb} missing from {ha}'s candidates");
            }
        }
    }
    Ok(())
}

#[test]
fn query_never_prunes_a_true_contact() {
    let mut runner = pinned_runner(4);
    let strategy = (
        prop::collection::vec((shape_strategy(), pose_strategy(120)), 2..24),
        prop::collection::vec(pose_strategy(120), 24),
    );
    runner
        .run(&strategy, |(bodies, moves)| {
            let mut tree = Octree::new(Aabb::new(Vec3::ZERO, Vec3::from_ints(32, 32, 32)), 5);
            for (i, (shape, pose)) in bodies.iter().enumerate() {
                tree.insert(handle(i), Aabb::from_shape(shape, pose))
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
            assert_no_false_negatives(&tree, &bodies)?;

            // Move every body and re-check after incremental updates.
            let moved: Vec<(Shape, Pose)> = bodies
                .iter()
                .zip(&moves)
                .map(|((shape, _), pose)| (*shape, *pose))
                .collect();
            for (i, (shape, pose)) in moved.iter().enumerate() {
                tree.update(handle(i), Aabb::from_shape(shape, pose))
                    .map_err(|e| TestCaseError::fail(e.to_string()))?;
            }
            prop_assert_eq!(tree.len(), bodies.len());
            assert_no_false_negatives(&tree, &moved)
        })
        .expect("proptest with pinned seed should complete");
}

#[test]
fn candidate_lists_are_sorted_and_exclude_self() {
    let mut tree = Octree::default();
    let shapes: Vec<Aabb> = (0..10)
        .map(|i| Aabb::new(Vec3::from_ints(i, 0, 0), Vec3::from_ints(3, 3, 3)))
        .collect();
    // Insert in reverse to show order comes from handles, not insertion.
    for (i, aabb) in shapes.iter().enumerate().rev() {
        tree.insert(handle(i), *aabb).expect("insert");
    }
    for i in 0..10_u32 {
        let got = tree.query(BodyHandle::new(i, 0)).expect("query");
        assert!(got.windows(2).all(|w| w[0] < w[1]));
        assert!(!got.contains(&BodyHandle::new(i, 0)));
    }
}
