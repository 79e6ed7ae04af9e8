//! Folioboard - layout document model for block-based page composition.
//!
//! Users place typed blocks (text, image, button, grid) on a free-form
//! canvas, move them by dragging, undo and redo their edits, and save the
//! composition as JSON.
//!
//! ## Modules
//!
//! - `types` - Blocks, content records and geometry
//! - `document` - The block collection, selection and mutation rules
//! - `history` - Bounded undo/redo snapshots
//! - `input` - Drag state machine and hover arithmetic
//! - `session` - `EditorSession`, the owner of all of the above
//! - `codec` - JSON wire format
//! - `persistence` / `service` - Portfolio storage and its API surface

pub mod block_factory;
pub mod codec;
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod history;
pub mod input;
pub mod logging;
pub mod patch;
pub mod perf;
pub mod persistence;
pub mod service;
pub mod session;
pub mod spatial_index;
pub mod types;

pub use block_factory::BlockFactory;
pub use codec::LayoutJson;
pub use config::EditorConfig;
pub use document::{LayoutDocument, MissingBlockPolicy};
pub use error::{DocumentError, LayoutError};
pub use history::HistoryManager;
pub use input::{DragInteractionController, DragOutcome, DragUpdate, IgnoreReason};
pub use patch::{BlockPatch, ContentPatch};
pub use persistence::{Portfolio, PortfolioStore, SaveRequest};
pub use service::{ApiError, ApiResponse, PortfolioService};
pub use session::{EditorSession, SharedSession};
pub use types::{Block, BlockContent, BlockId, BlockType, Position, Size};
