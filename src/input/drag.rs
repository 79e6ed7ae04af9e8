//! Drag interaction - turns hover events into block moves.
//!
//! ## Phases
//!
//! `begin_drag` records the dragged block and its origin. Each
//! `update_drag` measures the hovered target, computes
//! `position + (pointer - target.center())` and applies it with
//! [`LayoutDocument::move_block`]. `end_drag` reports what happened and the
//! caller decides whether to commit a history snapshot.
//!
//! The controller never touches history. Updates are applied as they
//! arrive, so only the latest computed position is ever visible; there is
//! no backlog to drain.
//!
//! ## Performance Notes
//!
//! Hover events arrive at pointer rate. Guards run before any document
//! access and the update path is wrapped in `profile_scope!`.

use tracing::{debug, trace, warn};

use super::geometry::GeometrySource;
use super::state::DragState;
use crate::constants::SLOW_DRAG_UPDATE_MS;
use crate::document::LayoutDocument;
use crate::profile_scope;
use crate::types::{BlockId, Position};

/// Why a hover event did not move anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No drag in progress
    NotDragging,
    /// The pointer is not over any block
    NoTarget,
    /// Hovering the dragged block itself
    SelfTarget,
    /// The target has no measurable geometry
    Unmeasured,
    /// The dragged block is gone from the document
    BlockMissing,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DragUpdate {
    Moved(Position),
    Ignored(IgnoreReason),
}

impl DragUpdate {
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Summary of a finished drag, returned by `end_drag`.
#[derive(Clone, Debug, PartialEq)]
pub struct DragOutcome {
    pub block_id: BlockId,
    pub origin: Position,
    pub final_position: Position,
    pub moves: u32,
}

impl DragOutcome {
    /// Whether the drag left the block somewhere else. A drag that moved
    /// and came back counts as unmoved.
    pub fn moved(&self) -> bool {
        self.final_position != self.origin
    }
}

#[derive(Debug, Default)]
pub struct DragInteractionController {
    state: DragState,
}

impl DragInteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn dragged_block_id(&self) -> Option<&BlockId> {
        self.state.dragged_block_id()
    }

    /// Start dragging `block_id`. Returns false if the block is not in the
    /// document. A drag already in progress is replaced.
    pub fn begin_drag(&mut self, document: &LayoutDocument, block_id: &str) -> bool {
        let Some(block) = document.get(block_id) else {
            debug!(block_id, "Drag start on unknown block ignored");
            return false;
        };
        if let Some(previous) = self.state.dragged_block_id() {
            warn!(previous = %previous, block_id, "Drag replaced before it ended");
        }

        self.state.start(block.id.clone(), block.position);
        debug!(block_id, x = block.position.x, y = block.position.y, "Drag started");
        true
    }

    /// Apply one hover event.
    ///
    /// `target_id` is the block under the pointer, `pointer` is in canvas
    /// coordinates and `geometry` measures the target.
    pub fn update_drag<G>(
        &mut self,
        document: &mut LayoutDocument,
        geometry: &G,
        target_id: Option<&str>,
        pointer: Position,
    ) -> DragUpdate
    where
        G: GeometrySource + ?Sized,
    {
        profile_scope!("drag_update", SLOW_DRAG_UPDATE_MS);

        let Some(dragged) = self.state.dragged_block_id() else {
            return DragUpdate::Ignored(IgnoreReason::NotDragging);
        };
        let Some(target_id) = target_id else {
            return DragUpdate::Ignored(IgnoreReason::NoTarget);
        };
        if dragged == target_id {
            return DragUpdate::Ignored(IgnoreReason::SelfTarget);
        }
        let Some(target) = geometry.measure(target_id).filter(|rect| rect.is_measurable()) else {
            trace!(target_id, "Hover target not measurable");
            return DragUpdate::Ignored(IgnoreReason::Unmeasured);
        };
        if !pointer.is_finite() {
            return DragUpdate::Ignored(IgnoreReason::Unmeasured);
        }
        let Some(current) = document.get(dragged.as_str()).map(|block| block.position) else {
            return DragUpdate::Ignored(IgnoreReason::BlockMissing);
        };

        let next = current + target.offset_from_center(pointer);
        match document.move_block(dragged.as_str(), next) {
            Ok(true) => {
                self.state.record_move();
                trace!(x = next.x, y = next.y, "Drag moved block");
                DragUpdate::Moved(next)
            }
            Ok(false) => DragUpdate::Ignored(IgnoreReason::BlockMissing),
            Err(err) => {
                // Strict policy errors stay inside the drag
                debug!(error = %err, "Drag move rejected");
                DragUpdate::Ignored(IgnoreReason::BlockMissing)
            }
        }
    }

    /// Finish the drag. Returns `None` if no drag was in progress.
    pub fn end_drag(&mut self, document: &LayoutDocument) -> Option<DragOutcome> {
        let DragState::Dragging {
            block_id,
            origin,
            moves,
        } = self.state.reset()
        else {
            return None;
        };

        let final_position = document
            .get(block_id.as_str())
            .map_or(origin, |block| block.position);
        let outcome = DragOutcome {
            block_id,
            origin,
            final_position,
            moves,
        };
        debug!(
            block_id = %outcome.block_id,
            moves = outcome.moves,
            moved = outcome.moved(),
            "Drag ended"
        );
        Some(outcome)
    }

    /// Abort the drag and put the block back at its origin. Returns whether
    /// a drag was in progress.
    pub fn cancel_drag(&mut self, document: &mut LayoutDocument) -> bool {
        let DragState::Dragging { block_id, origin, .. } = self.state.reset() else {
            return false;
        };
        if let Err(err) = document.move_block(block_id.as_str(), origin) {
            debug!(error = %err, "Cancelled drag could not restore origin");
        }
        debug!(block_id = %block_id, "Drag cancelled");
        true
    }

    /// Forget the drag without touching the document, e.g. after undo
    /// replaced the blocks under it.
    pub fn abandon(&mut self) {
        if let DragState::Dragging { block_id, .. } = self.state.reset() {
            debug!(block_id = %block_id, "Drag abandoned");
        }
    }
}
