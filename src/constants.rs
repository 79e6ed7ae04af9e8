//! Editor-wide constants.
//!
//! Centralizes default block content, geometry and history limits so the
//! factory, the session and the config layer agree on the same values.

use crate::types::{Position, Size};

// ============================================================================
// History
// ============================================================================

/// Maximum undo history states to keep (baseline included)
pub const MAX_HISTORY_STATES: usize = 50;

/// Smallest usable history: the pinned baseline plus one entry
pub const MIN_HISTORY_STATES: usize = 2;

// ============================================================================
// Block Geometry Defaults
// ============================================================================

/// Where freshly created blocks land on the canvas
pub const DEFAULT_BLOCK_POSITION: Position = Position { x: 100.0, y: 100.0 };

/// Size of freshly created blocks
pub const DEFAULT_BLOCK_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};

// ============================================================================
// Text Block Defaults
// ============================================================================

pub const DEFAULT_TEXT: &str = "Your text here";

/// Default font size for text blocks
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

pub const DEFAULT_FONT_WEIGHT: &str = "normal";

/// Default text color (black)
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

// ============================================================================
// Image Block Defaults
// ============================================================================

pub const DEFAULT_OBJECT_FIT: &str = "cover";

pub const DEFAULT_IMAGE_RADIUS: f64 = 0.0;

// ============================================================================
// Button Block Defaults
// ============================================================================

pub const DEFAULT_BUTTON_TEXT: &str = "Click me";

/// Default button fill (blue)
pub const DEFAULT_BUTTON_BACKGROUND: &str = "#3B82F6";

/// Default button label color (white)
pub const DEFAULT_BUTTON_TEXT_COLOR: &str = "#FFFFFF";

pub const DEFAULT_BUTTON_RADIUS: f64 = 6.0;

/// Horizontal and vertical button padding
pub const DEFAULT_BUTTON_PADDING: (f64, f64) = (16.0, 8.0);

// ============================================================================
// Grid Block Defaults
// ============================================================================

pub const DEFAULT_GRID_COLUMNS: u32 = 2;

pub const DEFAULT_GRID_GAP: f64 = 16.0;

// ============================================================================
// Session & Persistence
// ============================================================================

/// Title given to a composition before the user renames it
pub const DEFAULT_TITLE: &str = "Untitled Portfolio";

/// Directory name used under the platform config/data dirs
pub const APP_DIR_NAME: &str = "folioboard";

// ============================================================================
// Logging & Profiling
// ============================================================================

/// Environment variable consulted first for the log filter
pub const LOG_ENV_VAR: &str = "FOLIOBOARD_LOG";

/// Filter used when neither `FOLIOBOARD_LOG` nor `RUST_LOG` is set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Drag updates slower than this are reported (one 60 FPS frame)
pub const SLOW_DRAG_UPDATE_MS: f64 = 16.67;
