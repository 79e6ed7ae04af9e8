//! Spatial Index Module
//!
//! R-tree over block rectangles. The drag controller uses it to find which
//! block the pointer is hovering and to measure that block's geometry; a
//! block with no entry counts as not mounted.

use rstar::{RTree, RTreeObject, AABB};
use std::collections::HashMap;

use crate::input::{GeometrySource, Rect};
use crate::types::{Block, BlockId};

/// A block's bounding box plus its z-order at the time it was indexed.
#[derive(Debug, Clone)]
pub struct SpatialEntry {
    pub block_id: BlockId,
    pub rect: Rect,
    pub z: usize,
}

impl SpatialEntry {
    pub fn new(block_id: BlockId, rect: Rect, z: usize) -> Self {
        Self { block_id, rect, z }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.rect.x, self.rect.y],
            [self.rect.right(), self.rect.bottom()],
        )
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.block_id == other.block_id
    }
}

/// Spatial index for canvas blocks using an R-tree.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<BlockId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for a block.
    pub fn insert(&mut self, block_id: BlockId, rect: Rect, z: usize) {
        if let Some(old_entry) = self.entries.remove(&block_id) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(block_id.clone(), rect, z);
        self.tree.insert(entry.clone());
        self.entries.insert(block_id, entry);
    }

    /// Move an indexed block's rectangle, keeping its z-order.
    pub fn update_rect(&mut self, block_id: &str, rect: Rect) {
        if let Some(z) = self.entries.get(block_id).map(|entry| entry.z) {
            self.insert(BlockId::from(block_id), rect, z);
        }
    }

    /// All blocks containing the point, topmost first.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<BlockId> {
        let point_envelope = AABB::from_point([x, y]);

        let mut hits: Vec<&SpatialEntry> = self
            .tree
            .locate_in_envelope_intersecting(&point_envelope)
            .filter(|entry| entry.rect.contains(x, y))
            .collect();
        hits.sort_by(|a, b| b.z.cmp(&a.z));
        hits.into_iter().map(|entry| entry.block_id.clone()).collect()
    }

    /// The topmost block under the point, if any.
    pub fn topmost_at(&self, x: f64, y: f64) -> Option<BlockId> {
        self.query_point(x, y).into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild(&mut self, blocks: &[Block]) {
        let entries: Vec<SpatialEntry> = blocks
            .iter()
            .enumerate()
            .map(|(z, block)| SpatialEntry::new(block.id.clone(), Rect::from_block(block), z))
            .collect();

        self.entries = entries
            .iter()
            .map(|entry| (entry.block_id.clone(), entry.clone()))
            .collect();
        self.tree = RTree::bulk_load(entries);
    }
}

impl GeometrySource for SpatialIndex {
    fn measure(&self, block_id: &str) -> Option<Rect> {
        self.entries.get(block_id).map(|entry| entry.rect)
    }
}
