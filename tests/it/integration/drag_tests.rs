//! Drag Interaction Integration Tests
//!
//! Blocks from `with_n_texts(2)`: `text-0` at (0, 0) and `text-1` at
//! (300, 0), both 200 x 100, so `text-1` is centered on (400, 50).

use crate::helpers::{FixedGeometry, TestSessionBuilder, assert_position, pos};
use folioboard::input::Rect;
use folioboard::{DragUpdate, EditorSession, IgnoreReason};

fn two_blocks() -> EditorSession {
    TestSessionBuilder::new().with_n_texts(2).build()
}

fn geometry() -> FixedGeometry {
    FixedGeometry::new()
        .with("text-0", Rect::new(0.0, 0.0, 200.0, 100.0))
        .with("text-1", Rect::new(300.0, 0.0, 200.0, 100.0))
}

#[test]
fn test_hover_moves_by_offset_from_target_center() {
    let mut session = two_blocks();
    assert!(session.begin_drag("text-0"));

    let update = session.update_drag_over(&geometry(), "text-1", pos(410.0, 60.0));
    assert_eq!(update, DragUpdate::Moved(pos(10.0, 10.0)));
    assert_position(&session, "text-0", pos(10.0, 10.0));
}

#[test]
fn test_many_moves_make_one_history_entry() {
    let mut session = two_blocks();
    let geometry = geometry();
    session.begin_drag("text-0");
    for _ in 0..25 {
        session.update_drag_over(&geometry, "text-1", pos(401.0, 52.0));
    }
    assert!(!session.can_undo());

    let outcome = session.end_drag().unwrap();
    assert_eq!(outcome.moves, 25);
    assert_eq!(outcome.origin, pos(0.0, 0.0));
    assert_eq!(outcome.final_position, pos(25.0, 50.0));
    assert_eq!(session.history().len(), 2);

    assert!(session.undo());
    assert_position(&session, "text-0", pos(0.0, 0.0));
    assert!(session.redo());
    assert_position(&session, "text-0", pos(25.0, 50.0));
}

#[test]
fn test_drag_back_to_origin_records_nothing() {
    let mut session = two_blocks();
    let geometry = geometry();
    session.begin_drag("text-0");
    session.update_drag_over(&geometry, "text-1", pos(410.0, 50.0));
    session.update_drag_over(&geometry, "text-1", pos(390.0, 50.0));

    let outcome = session.end_drag().unwrap();
    assert!(!outcome.moved());
    assert!(!session.can_undo());
}

#[test]
fn test_self_and_unmeasured_targets_ignored() {
    let mut session = two_blocks();
    session.begin_drag("text-0");

    assert_eq!(
        session.update_drag_over(&geometry(), "text-0", pos(50.0, 50.0)),
        DragUpdate::Ignored(IgnoreReason::SelfTarget)
    );
    assert_eq!(
        session.update_drag_over(&FixedGeometry::new(), "text-1", pos(400.0, 50.0)),
        DragUpdate::Ignored(IgnoreReason::Unmeasured)
    );
    let broken = FixedGeometry::new().with("text-1", Rect::new(300.0, 0.0, f64::NAN, 100.0));
    assert_eq!(
        session.update_drag_over(&broken, "text-1", pos(400.0, 50.0)),
        DragUpdate::Ignored(IgnoreReason::Unmeasured)
    );
    assert_position(&session, "text-0", pos(0.0, 0.0));
}

#[test]
fn test_hover_without_drag_ignored() {
    let mut session = two_blocks();
    assert_eq!(
        session.update_drag_over(&geometry(), "text-1", pos(400.0, 50.0)),
        DragUpdate::Ignored(IgnoreReason::NotDragging)
    );
    assert!(session.end_drag().is_none());
}

#[test]
fn test_begin_drag_on_unknown_block() {
    let mut session = two_blocks();
    assert!(!session.begin_drag("ghost"));
    assert!(!session.is_dragging());
}

#[test]
fn test_cancel_restores_origin() {
    let mut session = two_blocks();
    session.begin_drag("text-0");
    session.update_drag_over(&geometry(), "text-1", pos(500.0, 90.0));
    assert_position(&session, "text-0", pos(100.0, 40.0));

    assert!(session.cancel_drag());
    assert_position(&session, "text-0", pos(0.0, 0.0));
    assert!(!session.is_dragging());
    assert!(!session.can_undo());
}

#[test]
fn test_pointer_hit_testing_through_spatial_index() {
    let mut session = two_blocks();
    session.begin_drag("text-0");

    // Over text-1, 20 right of its center
    assert_eq!(session.update_drag(pos(420.0, 50.0)), DragUpdate::Moved(pos(20.0, 0.0)));

    // Over the dragged block's new rect
    assert_eq!(
        session.update_drag(pos(100.0, 50.0)),
        DragUpdate::Ignored(IgnoreReason::SelfTarget)
    );

    // Empty canvas
    assert_eq!(
        session.update_drag(pos(1000.0, 1000.0)),
        DragUpdate::Ignored(IgnoreReason::NoTarget)
    );
}

#[test]
fn test_undo_mid_drag_abandons_drag() {
    let mut session = two_blocks();
    session.remove_block("text-1").unwrap();
    session.begin_drag("text-0");

    assert!(session.undo());
    assert!(!session.is_dragging());
    assert_eq!(session.blocks().len(), 2);
}

#[test]
fn test_removing_dragged_block_ends_drag() {
    let mut session = two_blocks();
    session.begin_drag("text-0");
    session.remove_block("text-0").unwrap();

    assert!(!session.is_dragging());
    assert!(session.end_drag().is_none());
}
