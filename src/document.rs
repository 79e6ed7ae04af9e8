//! The layout document: an ordered block collection plus selection.
//!
//! Order is z-order: later blocks render on top. The document never
//! records history itself; [`crate::session::EditorSession`] decides which
//! mutations are discrete actions and snapshots them.
//!
//! ## Unknown ids
//!
//! Every id-addressed mutation resolves its target through
//! [`LayoutDocument::lookup`], which applies the document's
//! [`MissingBlockPolicy`]. The default policy turns an unknown id into a
//! logged no-op so a stale reference cannot interrupt editing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::error::{DocumentError, DocumentResult};
use crate::patch::{BlockPatch, PatchRejection};
use crate::types::{Block, BlockId, Position};

/// What a mutation does when its target id is not in the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBlockPolicy {
    /// Log and do nothing
    #[default]
    Ignore,
    /// Return [`DocumentError::BlockNotFound`]
    Strict,
}

#[derive(Clone, Debug, Default)]
pub struct LayoutDocument {
    blocks: Vec<Block>,
    selected: Option<BlockId>,
    policy: MissingBlockPolicy,
}

impl LayoutDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MissingBlockPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    // ==================== Queries ====================

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn policy(&self) -> MissingBlockPolicy {
        self.policy
    }

    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Index of the block in z-order
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|block| block.id == id)
    }

    pub fn selected_block_id(&self) -> Option<&BlockId> {
        self.selected.as_ref()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.selected.as_ref().and_then(|id| self.get(id.as_str()))
    }

    /// Deep copy of the block sequence, e.g. for a history snapshot or a save
    pub fn snapshot(&self) -> Vec<Block> {
        self.blocks.clone()
    }

    // ==================== Mutations ====================

    /// Append a block and select it.
    ///
    /// A duplicate id is always rejected regardless of policy.
    pub fn add_block(&mut self, block: Block) -> DocumentResult<()> {
        if self.contains(block.id.as_str()) {
            warn!(id = %block.id, "Rejected block with duplicate id");
            return Err(DocumentError::DuplicateId(block.id));
        }
        check_geometry(&block)?;

        debug!(id = %block.id, block_type = %block.block_type(), "Adding block");
        self.selected = Some(block.id.clone());
        self.blocks.push(block);
        Ok(())
    }

    /// Merge `patch` into the block with `id`.
    ///
    /// Returns whether a block was changed. A patch of the wrong content
    /// kind follows the missing-block policy: ignored, or
    /// [`DocumentError::TypeMismatch`] when strict. Invalid geometry is
    /// always an error.
    pub fn update_block(&mut self, id: &str, patch: &BlockPatch) -> DocumentResult<bool> {
        let Some(index) = self.lookup(id)? else {
            return Ok(false);
        };
        let policy = self.policy;
        let block = &mut self.blocks[index];

        match patch.apply(block) {
            Ok(()) => {
                debug!(id, "Updated block");
                Ok(true)
            }
            Err(PatchRejection::TypeMismatch { expected, found }) => {
                warn!(id, %expected, %found, "Patch kind does not match block");
                match policy {
                    MissingBlockPolicy::Ignore => Ok(false),
                    MissingBlockPolicy::Strict => Err(DocumentError::TypeMismatch {
                        id: block.id.clone(),
                        expected,
                        found,
                    }),
                }
            }
            Err(PatchRejection::InvalidSize(size)) => Err(DocumentError::InvalidSize {
                id: block.id.clone(),
                size,
            }),
            Err(PatchRejection::InvalidPosition(position)) => Err(DocumentError::InvalidPosition {
                id: block.id.clone(),
                position,
            }),
        }
    }

    /// Remove the block with `id`, clearing the selection if it pointed at it.
    pub fn remove_block(&mut self, id: &str) -> DocumentResult<Option<Block>> {
        let Some(index) = self.lookup(id)? else {
            return Ok(None);
        };
        let removed = self.blocks.remove(index);
        if self.selected.as_ref() == Some(&removed.id) {
            self.selected = None;
        }
        debug!(id, "Removed block");
        Ok(Some(removed))
    }

    /// Select a block, or clear the selection with `None`.
    ///
    /// An id that does not name a block clamps to `None`. Returns whether a
    /// block is selected afterwards.
    pub fn select_block(&mut self, id: Option<&str>) -> bool {
        self.selected = match id {
            Some(id) if self.contains(id) => Some(BlockId::from(id)),
            Some(id) => {
                debug!(id, "Selection of unknown block cleared");
                None
            }
            None => None,
        };
        self.selected.is_some()
    }

    /// Set a block's position directly. No clamping: blocks may sit at
    /// negative or off-canvas coordinates.
    pub fn move_block(&mut self, id: &str, position: Position) -> DocumentResult<bool> {
        let Some(index) = self.lookup(id)? else {
            return Ok(false);
        };
        let block = &mut self.blocks[index];
        if !position.is_finite() {
            return Err(DocumentError::InvalidPosition {
                id: block.id.clone(),
                position,
            });
        }
        block.position = position;
        Ok(true)
    }

    /// Replace every block and clear the selection.
    ///
    /// Every block is checked before anything is replaced, with the same
    /// geometry rules as [`Self::add_block`].
    pub fn load_layout(&mut self, blocks: Vec<Block>) -> DocumentResult<()> {
        let mut seen = HashSet::with_capacity(blocks.len());
        for block in &blocks {
            if !seen.insert(block.id.as_str()) {
                return Err(DocumentError::DuplicateId(block.id.clone()));
            }
            check_geometry(block)?;
        }

        debug!(count = blocks.len(), "Loading layout");
        self.blocks = blocks;
        self.selected = None;
        Ok(())
    }

    /// Remove every block and clear the selection.
    pub fn clear_layout(&mut self) {
        debug!(count = self.blocks.len(), "Clearing layout");
        self.blocks.clear();
        self.selected = None;
    }

    /// Replace the blocks with a history snapshot. Selection never survives
    /// a history jump.
    pub(crate) fn restore(&mut self, blocks: &[Block]) {
        self.blocks = blocks.to_vec();
        self.selected = None;
    }

    // ==================== Lookup ====================

    /// Resolve `id` to an index, or apply the missing-block policy.
    ///
    /// This is the only place unknown ids are handled.
    fn lookup(&self, id: &str) -> DocumentResult<Option<usize>> {
        match self.index_of(id) {
            Some(index) => Ok(Some(index)),
            None => match self.policy {
                MissingBlockPolicy::Ignore => {
                    debug!(id, "Ignoring mutation of unknown block");
                    Ok(None)
                }
                MissingBlockPolicy::Strict => Err(DocumentError::BlockNotFound(id.to_string())),
            },
        }
    }

    /// Panics if a document invariant is broken. Used after mutations in
    /// debug builds.
    pub fn assert_invariants(&self) {
        let mut seen = HashSet::with_capacity(self.blocks.len());
        for block in &self.blocks {
            assert!(seen.insert(block.id.as_str()), "duplicate block id {}", block.id);
        }
        if let Some(selected) = &self.selected {
            assert!(
                seen.contains(selected.as_str()),
                "selection {selected} names no block"
            );
        }
    }
}

/// Sizes must be finite and positive, positions finite.
fn check_geometry(block: &Block) -> DocumentResult<()> {
    if !block.size.is_valid() {
        warn!(id = %block.id, size = ?block.size, "Rejected block with invalid size");
        return Err(DocumentError::InvalidSize {
            id: block.id.clone(),
            size: block.size,
        });
    }
    if !block.position.is_finite() {
        warn!(id = %block.id, position = ?block.position, "Rejected block with invalid position");
        return Err(DocumentError::InvalidPosition {
            id: block.id.clone(),
            position: block.position,
        });
    }
    Ok(())
}
