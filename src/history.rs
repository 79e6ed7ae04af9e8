//! Bounded undo/redo history of block snapshots.
//!
//! ## Model
//!
//! `snapshots[index]` always equals the document's current blocks after a
//! discrete action. A push truncates any redo branch, appends, and keeps the
//! stack within `limit` entries by evicting the oldest snapshot *after* the
//! baseline. The baseline (the empty document, or a freshly opened layout)
//! is the floor of the undo stack and is never evicted.
//!
//! ```text
//! push:  [B, s1, s2, s3]  index=3      (limit 4)
//! push:  [B, s2, s3, s4]  index=3      s1 evicted, B pinned
//! undo:  [B, s2, s3, s4]  index=2
//! push:  [B, s2, s3, s5]  index=3      s4 (redo branch) discarded
//! ```
//!
//! Invariant violations are programming defects and panic.

use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::constants::{MAX_HISTORY_STATES, MIN_HISTORY_STATES};
use crate::document::LayoutDocument;
use crate::profile_scope;
use crate::types::Block;

/// Immutable copy of a document's blocks.
pub type Snapshot = Arc<[Block]>;

#[derive(Clone, Debug)]
pub struct HistoryManager {
    snapshots: VecDeque<Snapshot>,
    index: usize,
    limit: usize,
}

impl Default for HistoryManager {
    fn default() -> Self {
        Self::new(MAX_HISTORY_STATES)
    }
}

impl HistoryManager {
    /// History with an empty-document baseline.
    ///
    /// # Panics
    /// If `limit` is below [`MIN_HISTORY_STATES`].
    pub fn new(limit: usize) -> Self {
        Self::with_baseline(limit, &[])
    }

    /// History whose floor is `blocks`, e.g. a freshly opened composition.
    pub fn with_baseline(limit: usize, blocks: &[Block]) -> Self {
        assert!(
            limit >= MIN_HISTORY_STATES,
            "history limit {limit} below minimum {MIN_HISTORY_STATES}"
        );
        let mut snapshots = VecDeque::with_capacity(limit);
        snapshots.push_back(Snapshot::from(blocks));
        Self {
            snapshots,
            index: 0,
            limit,
        }
    }

    /// Record a discrete action.
    pub fn push_snapshot(&mut self, blocks: &[Block]) {
        profile_scope!("history_push");

        self.snapshots.truncate(self.index + 1);
        self.snapshots.push_back(Snapshot::from(blocks));

        while self.snapshots.len() > self.limit {
            // Index 0 is the pinned baseline
            self.snapshots.remove(1);
        }
        self.index = (self.snapshots.len() - 1).min(self.limit - 1);

        trace!(index = self.index, len = self.snapshots.len(), "Pushed snapshot");
        self.assert_invariants();
    }

    /// Step back one snapshot and restore it into `document`.
    ///
    /// Returns false at the baseline.
    pub fn undo(&mut self, document: &mut LayoutDocument) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.index -= 1;
        document.restore(&self.snapshots[self.index]);
        debug!(index = self.index, "Undo");
        true
    }

    /// Step forward one snapshot and restore it into `document`.
    ///
    /// Returns false when there is nothing to redo.
    pub fn redo(&mut self, document: &mut LayoutDocument) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.index += 1;
        document.restore(&self.snapshots[self.index]);
        debug!(index = self.index, "Redo");
        true
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index < self.snapshots.len() - 1
    }

    /// Drop all history and start over with `blocks` as the only snapshot.
    pub fn reset(&mut self, blocks: &[Block]) {
        self.snapshots.clear();
        self.snapshots.push_back(Snapshot::from(blocks));
        self.index = 0;
        debug!(blocks = blocks.len(), "History reset to new baseline");
    }

    pub fn current(&self) -> &Snapshot {
        &self.snapshots[self.index]
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.snapshots[0]
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true; a baseline always exists.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn assert_invariants(&self) {
        assert!(!self.snapshots.is_empty(), "history lost its baseline");
        assert!(
            self.snapshots.len() <= self.limit,
            "history holds {} snapshots, limit {}",
            self.snapshots.len(),
            self.limit
        );
        assert!(
            self.index < self.snapshots.len(),
            "history index {} out of bounds ({})",
            self.index,
            self.snapshots.len()
        );
    }
}
