//! Integration tests for Folioboard.

mod drag_tests;
mod undo_redo_tests;
