//! Pointer input for the layout canvas.
//!
//! ## Architecture
//!
//! Dragging is an explicit state machine (`DragState`) driven by
//! [`DragInteractionController`]. The controller mutates block positions
//! directly and never records history; the session decides on commit.
//!
//! ## Modules
//!
//! - `state` - Drag state machine enum and helper methods
//! - `geometry` - Rectangles and the `GeometrySource` measurement seam
//! - `drag` - Hover-driven position updates

mod drag;
mod geometry;
mod state;

pub use drag::{DragInteractionController, DragOutcome, DragUpdate, IgnoreReason};
pub use geometry::{GeometrySource, Rect};
pub use state::DragState;
