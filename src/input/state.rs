//! Drag state machine.
//!
//! A single enum instead of an `Option<BlockId>` plus side flags, so a drag
//! without an origin cannot be represented.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging        (begin_drag on a block in the document)
//! Dragging -> Dragging    (begin_drag again replaces the drag)
//! Dragging -> Idle        (end_drag or cancel_drag)
//! ```

use crate::types::{BlockId, Position};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress
    #[default]
    Idle,

    /// A block is being dragged
    Dragging {
        block_id: BlockId,
        /// Block position when the drag began, used by cancel and to decide
        /// whether the drag moved anything
        origin: Position,
        /// Number of applied position updates
        moves: u32,
    },
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Get the block ID being dragged, if any
    pub fn dragged_block_id(&self) -> Option<&BlockId> {
        match self {
            Self::Dragging { block_id, .. } => Some(block_id),
            Self::Idle => None,
        }
    }

    pub fn origin(&self) -> Option<Position> {
        match self {
            Self::Dragging { origin, .. } => Some(*origin),
            Self::Idle => None,
        }
    }

    pub fn moves(&self) -> u32 {
        match self {
            Self::Dragging { moves, .. } => *moves,
            Self::Idle => 0,
        }
    }

    pub fn start(&mut self, block_id: BlockId, origin: Position) {
        *self = Self::Dragging {
            block_id,
            origin,
            moves: 0,
        };
    }

    pub(crate) fn record_move(&mut self) {
        if let Self::Dragging { moves, .. } = self {
            *moves = moves.saturating_add(1);
        }
    }

    /// Return to Idle, handing back the previous state
    pub fn reset(&mut self) -> DragState {
        std::mem::take(self)
    }
}
