// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#[doc = "Axis-aligned bounding boxes (center + full size)."]
pub mod aabb;
#[doc = "Stable generational body handles."]
pub mod handle;
#[doc = "Rigid poses (translation + rotation)."]
pub mod pose;
#[doc = "Collision shapes and their support mappings."]
pub mod shape;
