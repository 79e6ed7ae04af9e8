//! Undo/Redo Integration Tests
//!
//! Drives history through `EditorSession` the way an editor UI would.

use crate::helpers::{
    TestSessionBuilder, assert_block_count, assert_ids, assert_position, assert_text, pos,
    text_block, text_patch,
};
use folioboard::{DocumentError, EditorSession, MissingBlockPolicy, Size};

#[test]
fn test_add_update_remove_then_undo_to_empty() {
    let mut session = EditorSession::new();
    session.add_block(text_block("text-1", "Your text here")).unwrap();
    session.update_block("text-1", &text_patch("Hi")).unwrap();
    session.remove_block("text-1").unwrap();
    assert_block_count(&session, 0);

    assert!(session.undo());
    assert_text(&session, "text-1", "Hi");
    assert!(session.undo());
    assert_text(&session, "text-1", "Your text here");
    assert!(session.undo());
    assert_block_count(&session, 0);
    assert!(!session.can_undo());
    assert!(!session.undo());
}

#[test]
fn test_undo_then_redo_restores_exact_state() {
    let mut session = EditorSession::new();
    session.add_block(text_block("text-1", "One")).unwrap();
    session.add_block(text_block("text-2", "Two")).unwrap();
    session.update_block("text-2", &text_patch("Deux")).unwrap();
    let before = session.document().snapshot();

    assert!(session.undo());
    assert_text(&session, "text-2", "Two");
    assert!(session.redo());
    assert_eq!(session.blocks(), before.as_slice());
    assert!(!session.can_redo());
}

#[test]
fn test_new_action_discards_redo() {
    let mut session = EditorSession::new();
    session.add_block(text_block("text-1", "One")).unwrap();
    session.add_block(text_block("text-2", "Two")).unwrap();
    session.undo();
    assert!(session.can_redo());

    session.add_block(text_block("text-3", "Three")).unwrap();
    assert!(!session.can_redo());
    assert_ids(&session, &["text-1", "text-3"]);
}

#[test]
fn test_history_cap_keeps_empty_baseline() {
    let mut session = EditorSession::new();
    session.add_block(text_block("text-1", "start")).unwrap();
    for i in 1..=60 {
        session
            .update_block("text-1", &text_patch(&format!("v{i}")))
            .unwrap();
    }
    assert_eq!(session.history().len(), 50);

    let mut undos = 0;
    while session.blocks().len() == 1 && session.undo() {
        undos += 1;
        if undos == 48 {
            // Oldest surviving entry after the baseline
            assert_text(&session, "text-1", "v12");
        }
    }
    assert_eq!(undos, 49);
    assert_block_count(&session, 0);
    assert!(!session.undo());
}

#[test]
fn test_undo_load_restores_previous_layout() {
    let mut session = EditorSession::new();
    session
        .load_layout(vec![text_block("x-1", "X"), text_block("x-2", "X2")])
        .unwrap();
    session.load_layout(vec![text_block("y-1", "Y")]).unwrap();

    assert!(session.undo());
    assert_ids(&session, &["x-1", "x-2"]);
}

#[test]
fn test_clear_is_undoable() {
    let mut session = TestSessionBuilder::new().with_n_texts(3).build();
    session.clear_layout();
    assert_block_count(&session, 0);

    assert!(session.undo());
    assert_block_count(&session, 3);
    assert!(!session.can_undo());
}

#[test]
fn test_undo_clears_selection() {
    let mut session = EditorSession::new();
    session.add_block(text_block("text-1", "One")).unwrap();
    session.add_block(text_block("text-2", "Two")).unwrap();
    assert!(session.selected_block_id().is_some());

    session.undo();
    assert!(session.selected_block_id().is_none());
}

#[test]
fn test_remove_selected_block_clears_selection() {
    let mut session = TestSessionBuilder::new().with_n_texts(2).build();
    session.select_block(Some("text-1"));

    session.remove_block("text-1").unwrap();
    assert!(session.selected_block_id().is_none());
    assert_ids(&session, &["text-0"]);
}

#[test]
fn test_remove_unknown_id_changes_nothing() {
    let mut session = TestSessionBuilder::new().with_n_texts(2).build();
    let before = session.document().snapshot();

    assert_eq!(session.remove_block("ghost"), Ok(None));
    assert_eq!(session.blocks(), before.as_slice());
}

#[test]
fn test_strict_session_failure_records_nothing() {
    let mut session = TestSessionBuilder::new()
        .with_n_texts(1)
        .with_policy(MissingBlockPolicy::Strict)
        .build();

    assert!(session.remove_block("ghost").is_err());
    assert!(session.update_block("ghost", &text_patch("x")).is_err());
    assert!(!session.can_undo());
    assert!(!session.is_dirty());
}

#[test]
fn test_commit_groups_direct_moves() {
    let mut session = TestSessionBuilder::new().with_n_texts(2).build();
    session.move_block("text-0", pos(10.0, 10.0)).unwrap();
    session.move_block("text-1", pos(20.0, 20.0)).unwrap();
    assert!(!session.can_undo());

    session.commit();
    assert!(session.undo());
    assert_position(&session, "text-0", pos(0.0, 0.0));
    assert_position(&session, "text-1", pos(300.0, 0.0));
}

#[test]
fn test_small_history_limit() {
    let mut session = TestSessionBuilder::new().with_history_limit(2).build();
    session.add_block(text_block("text-1", "a")).unwrap();
    session.add_block(text_block("text-2", "b")).unwrap();

    assert!(session.undo());
    assert_block_count(&session, 0);
    assert!(!session.undo());
}

#[test]
fn test_load_with_invalid_size_records_nothing() {
    let mut session = TestSessionBuilder::new().with_n_texts(2).build();
    let mut flat = text_block("flat", "Flat");
    flat.size = Size::new(0.0, -5.0);

    let err = session.load_layout(vec![flat.clone()]).unwrap_err();
    assert!(matches!(err, DocumentError::InvalidSize { .. }));
    assert!(session.open_layout(vec![flat.clone()]).is_err());
    assert!(session.add_block(flat).is_err());

    assert_ids(&session, &["text-0", "text-1"]);
    assert!(!session.can_undo());
    assert!(!session.is_dirty());
}
