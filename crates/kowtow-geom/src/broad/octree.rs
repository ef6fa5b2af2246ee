// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use kowtow_math::{Fx, Vec3};
use rustc_hash::FxHashMap;

use super::{SpatialIndex, SpatialIndexError};
use crate::types::aabb::Aabb;
use crate::types::handle::BodyHandle;

const ROOT: usize = 0;

/// Default subdivision limit.
pub const DEFAULT_MAX_DEPTH: u8 = 8;

#[derive(Debug, Clone)]
struct Node {
    region: Aabb,
    depth: u8,
    parent: Option<usize>,
    /// Index of the first of eight contiguous children.
    children: Option<usize>,
    entries: Vec<(BodyHandle, Aabb)>,
}

impl Node {
    fn new(region: Aabb, depth: u8, parent: Option<usize>) -> Self {
        Self {
            region,
            depth,
            parent,
            children: None,
            entries: Vec::new(),
        }
    }
}

/// Region of child `octant` (bit 0 = +X half, bit 1 = +Y, bit 2 = +Z).
fn octant_region(region: &Aabb, octant: usize) -> Aabb {
    let (lo, hi) = (region.min(), region.max());
    let mid = (lo + hi) * Fx::HALF;
    let pick = |bit: usize, l: Fx, m: Fx, h: Fx| {
        if octant & bit == 0 {
            (l, m)
        } else {
            (m, h)
        }
    };
    let (x0, x1) = pick(1, lo.x, mid.x, hi.x);
    let (y0, y1) = pick(2, lo.y, mid.y, hi.y);
    let (z0, z1) = pick(4, lo.z, mid.z, hi.z);
    Aabb::from_min_max(Vec3::new(x0, y0, z0), Vec3::new(x1, y1, z1))
}

/// Octree spatial index.
///
/// Each body is stored at the deepest node whose region fully contains its
/// AABB (inclusive), so a body straddling an octant boundary stays at the
/// parent. Nodes live in a flat arena and refer to each other by index;
/// children are created lazily eight at a time. When all eight of a node's
/// children become empty leaves, the block is detached and reused by the
/// next split, so the arena size tracks the occupied part of the tree.
///
/// The root accepts bodies that lie partly or wholly outside its region,
/// so the index never rejects a body for being out of bounds.
#[derive(Debug, Clone)]
pub struct Octree {
    nodes: Vec<Node>,
    locations: FxHashMap<BodyHandle, usize>,
    /// First indices of detached eight-node blocks.
    free_blocks: Vec<usize>,
    max_depth: u8,
}

impl Default for Octree {
    fn default() -> Self {
        Self::new(
            Aabb::new(Vec3::ZERO, Vec3::from_ints(2048, 2048, 2048)),
            DEFAULT_MAX_DEPTH,
        )
    }
}

impl Octree {
    /// Creates an empty index covering `region`, subdividing at most
    /// `max_depth` levels below the root.
    pub fn new(region: Aabb, max_depth: u8) -> Self {
        Self {
            nodes: vec![Node::new(region, 0, None)],
            locations: FxHashMap::default(),
            free_blocks: Vec::new(),
            max_depth,
        }
    }

    /// Region covered by the root node.
    pub fn region(&self) -> Aabb {
        self.nodes[ROOT].region
    }

    /// Number of registered bodies.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// `true` when no body is registered.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// `true` when `handle` is registered.
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.locations.contains_key(&handle)
    }

    /// Bounds stored for `handle`.
    pub fn aabb_of(&self, handle: BodyHandle) -> Option<Aabb> {
        let at = *self.locations.get(&handle)?;
        self.nodes[at]
            .entries
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, aabb)| *aabb)
    }

    /// Depth of the node holding `handle` (root is 0).
    pub fn depth_of(&self, handle: BodyHandle) -> Option<u8> {
        self.locations.get(&handle).map(|&at| self.nodes[at].depth)
    }

    /// Nodes currently attached to the tree, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free_blocks.len() * 8
    }

    fn split(&mut self, at: usize) -> usize {
        let region = self.nodes[at].region;
        let depth = self.nodes[at].depth + 1;
        let fresh = (0..8).map(|octant| Node::new(octant_region(&region, octant), depth, Some(at)));
        let first = self.free_blocks.pop().unwrap_or(self.nodes.len());
        if first == self.nodes.len() {
            self.nodes.extend(fresh);
        } else {
            for (slot, node) in self.nodes[first..first + 8].iter_mut().zip(fresh) {
                *slot = node;
            }
        }
        self.nodes[at].children = Some(first);
        first
    }

    /// `true` when `aabb` fits one of the octants of `at`, i.e. placing it
    /// again would store it deeper.
    fn fits_below(&self, at: usize, aabb: &Aabb) -> bool {
        let node = &self.nodes[at];
        node.depth < self.max_depth
            && aabb.is_inside(&node.region)
            && (0..8).any(|o| aabb.is_inside(&octant_region(&node.region, o)))
    }

    fn is_empty_leaf(&self, at: usize) -> bool {
        let node = &self.nodes[at];
        node.entries.is_empty() && node.children.is_none()
    }

    /// Walks up from `at`, detaching child blocks that hold nothing.
    fn prune(&mut self, mut at: usize) {
        while let Some(parent) = self.nodes[at].parent {
            let Some(first) = self.nodes[parent].children else {
                break;
            };
            if !(first..first + 8).all(|n| self.is_empty_leaf(n)) {
                break;
            }
            self.nodes[parent].children = None;
            self.free_blocks.push(first);
            at = parent;
        }
    }

    fn detach(&mut self, handle: BodyHandle) -> Result<Aabb, SpatialIndexError> {
        let at = self
            .locations
            .remove(&handle)
            .ok_or(SpatialIndexError::Missing(handle))?;
        let entries = &mut self.nodes[at].entries;
        let pos = entries
            .iter()
            .position(|(h, _)| *h == handle)
            .ok_or(SpatialIndexError::Missing(handle))?;
        let (_, aabb) = entries.remove(pos);
        self.prune(at);
        Ok(aabb)
    }

    fn place(&mut self, handle: BodyHandle, aabb: Aabb) {
        let mut at = ROOT;
        loop {
            let node = &self.nodes[at];
            if node.depth >= self.max_depth || !aabb.is_inside(&node.region) {
                break;
            }
            let region = node.region;
            let children = node.children;
            let Some(octant) = (0..8).find(|&o| aabb.is_inside(&octant_region(&region, o))) else {
                break;
            };
            let first = match children {
                Some(first) => first,
                None => self.split(at),
            };
            at = first + octant;
        }
        self.nodes[at].entries.push((handle, aabb));
        self.locations.insert(handle, at);
    }

    fn collect(&self, at: usize, out: &mut Vec<BodyHandle>) {
        out.extend(self.nodes[at].entries.iter().map(|(h, _)| *h));
    }
}

impl SpatialIndex for Octree {
    fn insert(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<(), SpatialIndexError> {
        if self.locations.contains_key(&handle) {
            return Err(SpatialIndexError::Duplicate(handle));
        }
        self.place(handle, aabb);
        Ok(())
    }

    fn remove(&mut self, handle: BodyHandle) -> Result<Aabb, SpatialIndexError> {
        self.detach(handle)
    }

    fn update(&mut self, handle: BodyHandle, aabb: Aabb) -> Result<bool, SpatialIndexError> {
        let at = *self
            .locations
            .get(&handle)
            .ok_or(SpatialIndexError::Missing(handle))?;
        let stays = (at == ROOT || aabb.is_inside(&self.nodes[at].region))
            && !self.fits_below(at, &aabb);
        if stays {
            let slot = self.nodes[at]
                .entries
                .iter_mut()
                .find(|(h, _)| *h == handle)
                .ok_or(SpatialIndexError::Missing(handle))?;
            slot.1 = aabb;
            return Ok(false);
        }
        self.detach(handle)?;
        self.place(handle, aabb);
        Ok(true)
    }

    fn query(&self, handle: BodyHandle) -> Result<Vec<BodyHandle>, SpatialIndexError> {
        let at = *self
            .locations
            .get(&handle)
            .ok_or(SpatialIndexError::Missing(handle))?;
        let mut out = Vec::new();
        let mut up = self.nodes[at].parent;
        while let Some(p) = up {
            self.collect(p, &mut out);
            up = self.nodes[p].parent;
        }
        let mut stack = vec![at];
        while let Some(n) = stack.pop() {
            self.collect(n, &mut out);
            if let Some(first) = self.nodes[n].children {
                stack.extend(first..first + 8);
            }
        }
        out.retain(|h| *h != handle);
        out.sort_unstable();
        Ok(out)
    }

    /// Conservative region query: visits every node whose region touches
    /// `aabb` (the root always) and keeps entries whose stored bounds touch it.
    fn query_aabb(&self, aabb: &Aabb) -> Vec<BodyHandle> {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(n) = stack.pop() {
            let node = &self.nodes[n];
            if n != ROOT && !node.region.overlaps_inclusive(aabb) {
                continue;
            }
            out.extend(
                node.entries
                    .iter()
                    .filter(|(_, stored)| stored.overlaps_inclusive(aabb))
                    .map(|(h, _)| *h),
            );
            if let Some(first) = node.children {
                stack.extend(first..first + 8);
            }
        }
        out.sort_unstable();
        out
    }
}
