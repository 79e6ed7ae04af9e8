//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestSessionBuilder` - Builder for sessions opened with known blocks
//! - Block constructors with fixed ids like `text_block("text-1", ...)`
//! - `FixedGeometry` - A `GeometrySource` with hand-placed rectangles
//! - Assertion helpers

#![allow(dead_code)]

use folioboard::input::{GeometrySource, Rect};
use folioboard::patch::{BlockPatch, ContentPatch, TextPatch};
use folioboard::types::{
    Block, BlockContent, ButtonContent, GridContent, GridItem, ImageContent, Position, Size,
    TextContent,
};
use folioboard::{EditorConfig, EditorSession, MissingBlockPolicy};
use std::collections::HashMap;

// ============================================================================
// TestSessionBuilder
// ============================================================================

/// Builder for sessions that start from a known layout.
///
/// The blocks become the history baseline, as if a stored composition had
/// just been opened.
///
/// # Example
/// ```ignore
/// let session = TestSessionBuilder::new()
///     .with_text("text-1", "Hello", (0.0, 0.0))
///     .with_policy(MissingBlockPolicy::Strict)
///     .build();
/// ```
pub struct TestSessionBuilder {
    blocks: Vec<Block>,
    config: EditorConfig,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            config: EditorConfig::default(),
        }
    }

    pub fn with_text(mut self, id: &str, text: &str, pos: (f64, f64)) -> Self {
        self.blocks.push(text_block_at(id, text, pos));
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Add N text blocks `text-0`, `text-1`, ... spaced 300 apart on x.
    pub fn with_n_texts(mut self, count: usize) -> Self {
        for i in 0..count {
            self.blocks.push(text_block_at(
                &format!("text-{i}"),
                &format!("Item {i}"),
                (i as f64 * 300.0, 0.0),
            ));
        }
        self
    }

    pub fn with_policy(mut self, policy: MissingBlockPolicy) -> Self {
        self.config.missing_block_policy = policy;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub fn build(self) -> EditorSession {
        let mut session = EditorSession::with_config(&self.config);
        session
            .open_layout(self.blocks)
            .expect("test layout has unique ids");
        session
    }
}

// ============================================================================
// Block constructors
// ============================================================================

const TEST_SIZE: Size = Size {
    width: 200.0,
    height: 100.0,
};

pub fn text_block(id: &str, text: &str) -> Block {
    text_block_at(id, text, (0.0, 0.0))
}

pub fn text_block_at(id: &str, text: &str, pos: (f64, f64)) -> Block {
    Block::new(
        id,
        BlockContent::Text(TextContent {
            text: text.to_string(),
            ..TextContent::default()
        }),
        Position::new(pos.0, pos.1),
        TEST_SIZE,
    )
}

pub fn image_block(id: &str, src: &str) -> Block {
    Block::new(
        id,
        BlockContent::Image(ImageContent {
            src: src.to_string(),
            alt: "Portrait".to_string(),
            ..ImageContent::default()
        }),
        Position::new(10.0, 20.0),
        Size::new(320.0, 240.0),
    )
}

pub fn button_block(id: &str, href: &str) -> Block {
    Block::new(
        id,
        BlockContent::Button(ButtonContent {
            href: href.to_string(),
            ..ButtonContent::default()
        }),
        Position::new(-40.0, 300.5),
        Size::new(120.0, 44.0),
    )
}

pub fn grid_block(id: &str, items: &[&str]) -> Block {
    Block::new(
        id,
        BlockContent::Grid(GridContent {
            columns: 3,
            items: items.iter().map(|item| GridItem::new(*item)).collect(),
            ..GridContent::default()
        }),
        Position::new(0.0, 500.0),
        Size::new(600.0, 400.0),
    )
}

pub fn text_patch(text: &str) -> BlockPatch {
    BlockPatch::content(ContentPatch::Text(TextPatch::text(text)))
}

pub fn pos(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

// ============================================================================
// Geometry
// ============================================================================

/// Geometry source with explicitly placed rectangles. Ids not added are
/// not mounted.
#[derive(Default)]
pub struct FixedGeometry {
    rects: HashMap<String, Rect>,
}

impl FixedGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, rect: Rect) -> Self {
        self.rects.insert(id.to_string(), rect);
        self
    }
}

impl GeometrySource for FixedGeometry {
    fn measure(&self, block_id: &str) -> Option<Rect> {
        self.rects.get(block_id).copied()
    }
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert that a session has a specific number of blocks.
pub fn assert_block_count(session: &EditorSession, expected: usize) {
    assert_eq!(
        session.blocks().len(),
        expected,
        "Expected {} blocks, found {}",
        expected,
        session.blocks().len()
    );
}

/// Assert that a text block exists with specific text.
pub fn assert_text(session: &EditorSession, id: &str, expected_text: &str) {
    let block = session.document().get(id);
    assert!(block.is_some(), "Block {} not found", id);
    match &block.unwrap().content {
        BlockContent::Text(text) => assert_eq!(text.text, expected_text, "Block {} has wrong text", id),
        other => panic!("Block {} is not a text block: {:?}", id, other),
    }
}

pub fn assert_position(session: &EditorSession, id: &str, expected: Position) {
    let block = session.document().get(id);
    assert!(block.is_some(), "Block {} not found", id);
    assert_eq!(block.unwrap().position, expected, "Block {} is misplaced", id);
}

/// Assert the ids in z-order.
pub fn assert_ids(session: &EditorSession, expected: &[&str]) {
    let ids: Vec<&str> = session.blocks().iter().map(|block| block.id.as_str()).collect();
    assert_eq!(ids, expected);
}
