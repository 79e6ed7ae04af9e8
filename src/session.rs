//! Editor session - the single owner of one composition being edited.
//!
//! Every discrete action goes through [`EditorSession`] and records exactly
//! one history snapshot when it succeeds. A failed action records nothing
//! and leaves the document as it was. Selection and drag motion are not
//! history events; a drag becomes one snapshot when it ends somewhere new.
//!
//! ## Snapshot rules
//!
//! | action | snapshot |
//! |---|---|
//! | add, update, remove, load, clear | one, on success (also for an unknown-id no-op) |
//! | select, move | none |
//! | drag updates | none |
//! | `end_drag` | one, if the block ended away from its origin |
//! | `open_layout`, `open_portfolio` | history reset to a new baseline |

use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;
use tracing::{debug, info};

use crate::block_factory::BlockFactory;
use crate::codec::encode_layout;
use crate::config::EditorConfig;
use crate::constants::DEFAULT_TITLE;
use crate::document::LayoutDocument;
use crate::error::{DocumentResult, LayoutResult};
use crate::history::HistoryManager;
use crate::input::{DragInteractionController, DragOutcome, DragUpdate, GeometrySource, Rect};
use crate::patch::BlockPatch;
use crate::persistence::{Portfolio, PortfolioStore, SaveRequest};
use crate::service::{ApiError, ApiResult, PortfolioService};
use crate::spatial_index::SpatialIndex;
use crate::types::{Block, BlockId, BlockType, Position};

pub struct EditorSession {
    document: LayoutDocument,
    history: HistoryManager,
    drag: DragInteractionController,
    factory: BlockFactory,
    spatial: SpatialIndex,
    title: String,
    portfolio_id: Option<String>,
    /// Bumped on every change to blocks or title
    revision: u64,
    saved_revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::with_config(&EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Panics
    /// If `config.history_limit` is below the minimum. Validate configs
    /// with [`EditorConfig::validate`] first.
    pub fn with_config(config: &EditorConfig) -> Self {
        Self {
            document: LayoutDocument::with_policy(config.missing_block_policy),
            history: HistoryManager::new(config.history_limit),
            drag: DragInteractionController::new(),
            factory: BlockFactory::new(config.default_position, config.default_size),
            spatial: SpatialIndex::new(),
            title: DEFAULT_TITLE.to_string(),
            portfolio_id: None,
            revision: 0,
            saved_revision: 0,
        }
    }

    // ==================== Queries ====================

    pub fn document(&self) -> &LayoutDocument {
        &self.document
    }

    pub fn blocks(&self) -> &[Block] {
        self.document.blocks()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn spatial_index(&self) -> &SpatialIndex {
        &self.spatial
    }

    pub fn selected_block_id(&self) -> Option<&BlockId> {
        self.document.selected_block_id()
    }

    pub fn selected_block(&self) -> Option<&Block> {
        self.document.selected_block()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Id of the stored portfolio this session was opened from or last
    /// saved to.
    pub fn portfolio_id(&self) -> Option<&str> {
        self.portfolio_id.as_deref()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether anything changed since the last successful save or open.
    pub fn is_dirty(&self) -> bool {
        self.revision != self.saved_revision
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    // ==================== Discrete actions ====================

    pub fn add_block(&mut self, block: Block) -> DocumentResult<()> {
        self.document.add_block(block)?;
        self.record("add_block");
        Ok(())
    }

    /// Create a block of `block_type` with default content and add it.
    pub fn add_block_of_type(&mut self, block_type: BlockType) -> DocumentResult<BlockId> {
        let document = &self.document;
        let block = self
            .factory
            .create_unique(block_type, |id| document.contains(id));
        let id = block.id.clone();
        self.add_block(block)?;
        Ok(id)
    }

    pub fn update_block(&mut self, id: &str, patch: &BlockPatch) -> DocumentResult<bool> {
        let changed = self.document.update_block(id, patch)?;
        self.record("update_block");
        Ok(changed)
    }

    pub fn remove_block(&mut self, id: &str) -> DocumentResult<Option<Block>> {
        if self.drag.dragged_block_id().is_some_and(|dragged| dragged == id) {
            self.drag.abandon();
        }
        let removed = self.document.remove_block(id)?;
        self.record("remove_block");
        Ok(removed)
    }

    /// Replace all blocks as one undoable action.
    pub fn load_layout(&mut self, blocks: Vec<Block>) -> DocumentResult<()> {
        self.drag.abandon();
        self.document.load_layout(blocks)?;
        self.record("load_layout");
        Ok(())
    }

    pub fn clear_layout(&mut self) {
        self.drag.abandon();
        self.document.clear_layout();
        self.record("clear_layout");
    }

    /// Snapshot the current blocks, e.g. after a series of `move_block`
    /// calls that should undo as one step.
    pub fn commit(&mut self) {
        self.record("commit");
    }

    fn record(&mut self, action: &'static str) {
        self.history.push_snapshot(self.document.blocks());
        self.spatial.rebuild(self.document.blocks());
        self.revision += 1;
        debug!(
            action,
            blocks = self.document.len(),
            history_index = self.history.current_index(),
            "Recorded action"
        );
        #[cfg(debug_assertions)]
        self.document.assert_invariants();
    }

    // ==================== Non-history actions ====================

    pub fn select_block(&mut self, id: Option<&str>) -> bool {
        self.document.select_block(id)
    }

    /// Set a position without recording history.
    pub fn move_block(&mut self, id: &str, position: Position) -> DocumentResult<bool> {
        let moved = self.document.move_block(id, position)?;
        if moved {
            self.refresh_rect(id);
            self.revision += 1;
        }
        Ok(moved)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.revision += 1;
    }

    // ==================== History ====================

    pub fn undo(&mut self) -> bool {
        self.drag.abandon();
        let jumped = self.history.undo(&mut self.document);
        if jumped {
            self.after_history_jump();
        }
        jumped
    }

    pub fn redo(&mut self) -> bool {
        self.drag.abandon();
        let jumped = self.history.redo(&mut self.document);
        if jumped {
            self.after_history_jump();
        }
        jumped
    }

    fn after_history_jump(&mut self) {
        self.spatial.rebuild(self.document.blocks());
        self.revision += 1;
    }

    // ==================== Drag ====================

    pub fn begin_drag(&mut self, block_id: &str) -> bool {
        self.drag.begin_drag(&self.document, block_id)
    }

    /// Hover at `pointer`; the target is the topmost indexed block under it.
    pub fn update_drag(&mut self, pointer: Position) -> DragUpdate {
        let target = self.spatial.topmost_at(pointer.x, pointer.y);
        let update = self.drag.update_drag(
            &mut self.document,
            &self.spatial,
            target.as_ref().map(BlockId::as_str),
            pointer,
        );
        self.after_drag_update(&update);
        update
    }

    /// Hover over an explicit target measured by an external geometry source,
    /// e.g. a renderer's layout boxes.
    pub fn update_drag_over<G>(&mut self, geometry: &G, target_id: &str, pointer: Position) -> DragUpdate
    where
        G: GeometrySource + ?Sized,
    {
        let update = self
            .drag
            .update_drag(&mut self.document, geometry, Some(target_id), pointer);
        self.after_drag_update(&update);
        update
    }

    fn after_drag_update(&mut self, update: &DragUpdate) {
        if update.is_moved() {
            if let Some(dragged) = self.drag.dragged_block_id().cloned() {
                self.refresh_rect(dragged.as_str());
            }
            self.revision += 1;
        }
    }

    /// Finish the drag, recording one snapshot if the block moved.
    pub fn end_drag(&mut self) -> Option<DragOutcome> {
        let outcome = self.drag.end_drag(&self.document)?;
        if outcome.moved() {
            self.record("drag");
        }
        Some(outcome)
    }

    /// Abort the drag and put the block back. Records nothing.
    pub fn cancel_drag(&mut self) -> bool {
        let dragged = self.drag.dragged_block_id().cloned();
        let cancelled = self.drag.cancel_drag(&mut self.document);
        if let Some(dragged) = dragged {
            self.refresh_rect(dragged.as_str());
        }
        cancelled
    }

    fn refresh_rect(&mut self, id: &str) {
        if let Some(block) = self.document.get(id) {
            self.spatial.update_rect(id, Rect::from_block(block));
        }
    }

    // ==================== Open & save ====================

    /// Replace the document with `blocks` and start history over from them.
    pub fn open_layout(&mut self, blocks: Vec<Block>) -> DocumentResult<()> {
        self.drag.abandon();
        self.document.load_layout(blocks)?;
        self.history.reset(self.document.blocks());
        self.spatial.rebuild(self.document.blocks());
        self.revision += 1;
        self.saved_revision = self.revision;
        Ok(())
    }

    /// Open a stored composition. A record without `blocks` opens empty.
    pub fn open_portfolio(&mut self, portfolio: &Portfolio) -> LayoutResult<()> {
        let blocks = portfolio.blocks()?;
        self.open_layout(blocks)?;
        self.title = portfolio.title.clone();
        self.portfolio_id = Some(portfolio.id.clone());
        info!(id = %portfolio.id, blocks = self.document.len(), "Opened portfolio");
        Ok(())
    }

    /// A deep copy of the current composition ready to hand to storage.
    /// Later edits do not affect the returned request.
    pub fn save_request(&self, user_id: &str) -> LayoutResult<SaveRequest> {
        Ok(SaveRequest::new(
            user_id,
            self.title.clone(),
            encode_layout(self.document.blocks())?,
        ))
    }

    /// Record a successful save of the state at `revision`. Edits made
    /// after that revision keep the session dirty.
    pub fn mark_saved(&mut self, portfolio: &Portfolio, revision: u64) {
        self.portfolio_id = Some(portfolio.id.clone());
        self.saved_revision = revision.min(self.revision);
    }

    /// Save through `service`. A failed save leaves the session untouched.
    pub fn save<S: PortfolioStore>(
        &mut self,
        service: &PortfolioService<S>,
        user_id: &str,
    ) -> ApiResult<Portfolio> {
        let revision = self.revision;
        let request = self
            .save_request(user_id)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        let portfolio = service.save(&request)?;
        self.mark_saved(&portfolio, revision);
        Ok(portfolio)
    }
}

// ============================================================================
// Shared Session
// ============================================================================

/// A session shared across threads. One writer at a time; saves copy the
/// composition under the lock and talk to storage without holding it.
#[derive(Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<EditorSession>>,
}

impl SharedSession {
    pub fn new(session: EditorSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, EditorSession> {
        self.inner.lock()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut EditorSession) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// A point-in-time save payload and the revision it captures.
    pub fn snapshot_for_save(&self, user_id: &str) -> LayoutResult<(SaveRequest, u64)> {
        let session = self.inner.lock();
        Ok((session.save_request(user_id)?, session.revision()))
    }

    /// Save without holding the lock during storage I/O.
    pub fn save<S: PortfolioStore>(
        &self,
        service: &PortfolioService<S>,
        user_id: &str,
    ) -> ApiResult<Portfolio> {
        let (request, revision) = self
            .snapshot_for_save(user_id)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        let portfolio = service.save(&request)?;
        self.inner.lock().mark_saved(&portfolio, revision);
        Ok(portfolio)
    }
}
