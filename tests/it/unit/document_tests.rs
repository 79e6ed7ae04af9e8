//! Unit tests for document mutations and the missing-block policy.

use crate::helpers::{button_block, grid_block, image_block, pos, text_block, text_patch};
use folioboard::patch::{ButtonPatch, ContentPatch, GridPatch};
use folioboard::types::{BlockContent, GridItem, Size};
use folioboard::{BlockPatch, BlockType, DocumentError, LayoutDocument, MissingBlockPolicy};

fn document(policy: MissingBlockPolicy) -> LayoutDocument {
    let mut doc = LayoutDocument::with_policy(policy);
    doc.add_block(text_block("text-1", "Hello")).unwrap();
    doc.add_block(button_block("button-1", "https://example.com")).unwrap();
    doc
}

#[test]
fn test_update_merges_only_given_fields() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    let patch = BlockPatch::content(ContentPatch::Button(ButtonPatch {
        text: Some("Contact".to_string()),
        ..ButtonPatch::default()
    }));

    assert_eq!(doc.update_block("button-1", &patch), Ok(true));
    let BlockContent::Button(button) = &doc.get("button-1").unwrap().content else {
        panic!("expected a button");
    };
    assert_eq!(button.text, "Contact");
    assert_eq!(button.href, "https://example.com");
}

#[test]
fn test_update_geometry() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    let patch = BlockPatch::default()
        .with_position(pos(-10.0, 5.0))
        .with_size(Size::new(50.0, 60.0));

    assert_eq!(doc.update_block("text-1", &patch), Ok(true));
    let block = doc.get("text-1").unwrap();
    assert_eq!(block.position, pos(-10.0, 5.0));
    assert_eq!(block.size, Size::new(50.0, 60.0));
}

#[test]
fn test_wrong_patch_kind_ignored_by_default() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    let before = doc.snapshot();

    assert_eq!(doc.update_block("button-1", &text_patch("nope")), Ok(false));
    assert_eq!(doc.blocks(), before.as_slice());
}

#[test]
fn test_wrong_patch_kind_errors_when_strict() {
    let mut doc = document(MissingBlockPolicy::Strict);
    let result = doc.update_block("button-1", &text_patch("nope"));
    assert!(matches!(
        result,
        Err(DocumentError::TypeMismatch {
            expected: BlockType::Button,
            found: BlockType::Text,
            ..
        })
    ));
}

#[test]
fn test_invalid_size_rejects_whole_patch() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    let patch = text_patch("changed").with_size(Size::new(0.0, 10.0));

    assert!(matches!(
        doc.update_block("text-1", &patch),
        Err(DocumentError::InvalidSize { .. })
    ));
    let BlockContent::Text(text) = &doc.get("text-1").unwrap().content else {
        panic!("expected text");
    };
    assert_eq!(text.text, "Hello");
}

#[test]
fn test_add_rejects_invalid_size() {
    let mut doc = LayoutDocument::new();
    let mut block = image_block("image-1", "https://example.com/a.png");
    block.size = Size::new(-1.0, 10.0);

    assert!(doc.add_block(block).is_err());
    assert!(doc.is_empty());
    assert!(doc.selected_block_id().is_none());
}

#[test]
fn test_grid_items_replaced_wholesale() {
    let mut doc = LayoutDocument::new();
    doc.add_block(grid_block("grid-1", &["A", "B", "C"])).unwrap();
    let patch = BlockPatch::content(ContentPatch::Grid(GridPatch {
        items: Some(vec![GridItem::new("Only")]),
        ..GridPatch::default()
    }));

    doc.update_block("grid-1", &patch).unwrap();
    let BlockContent::Grid(grid) = &doc.get("grid-1").unwrap().content else {
        panic!("expected grid");
    };
    assert_eq!(grid.items, vec![GridItem::new("Only")]);
    assert_eq!(grid.columns, 3);
}

#[test]
fn test_remove_selected_clears_selection() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    assert!(doc.select_block(Some("text-1")));

    let removed = doc.remove_block("text-1").unwrap();
    assert_eq!(removed.map(|block| block.id.to_string()), Some("text-1".to_string()));
    assert!(doc.selected_block().is_none());
    doc.assert_invariants();
}

#[test]
fn test_remove_other_keeps_selection() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    doc.select_block(Some("text-1"));
    doc.remove_block("button-1").unwrap();
    assert_eq!(doc.selected_block().map(|block| block.id.as_str()), Some("text-1"));
}

#[test]
fn test_strict_policy_covers_every_mutation() {
    let mut doc = document(MissingBlockPolicy::Strict);
    let missing = || DocumentError::BlockNotFound("ghost".to_string());

    assert_eq!(doc.update_block("ghost", &text_patch("x")), Err(missing()));
    assert_eq!(doc.move_block("ghost", pos(1.0, 1.0)), Err(missing()));
    assert_eq!(doc.remove_block("ghost"), Err(missing()));
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_move_rejects_non_finite_position() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    assert!(matches!(
        doc.move_block("text-1", pos(f64::NAN, 0.0)),
        Err(DocumentError::InvalidPosition { .. })
    ));
    assert_eq!(doc.get("text-1").unwrap().position, pos(0.0, 0.0));
}

#[test]
fn test_load_and_clear_reset_selection() {
    let mut doc = document(MissingBlockPolicy::Ignore);
    assert!(doc.selected_block_id().is_some());

    doc.load_layout(vec![text_block("text-9", "Loaded")]).unwrap();
    assert!(doc.selected_block_id().is_none());
    assert_eq!(doc.len(), 1);

    doc.select_block(Some("text-9"));
    doc.clear_layout();
    assert!(doc.is_empty());
    assert!(doc.selected_block_id().is_none());
}
