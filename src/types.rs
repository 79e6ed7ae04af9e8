//! Core types for the folioboard layout model.
//!
//! A composition is an ordered list of [`Block`]s. Each block carries a
//! [`BlockContent`] whose shape is fixed by its [`BlockType`]; matches over
//! the content are exhaustive everywhere a block is mutated or encoded.

use serde::{Deserialize, Deserializer, Serialize, de};
use std::borrow::Borrow;
use std::fmt;
use std::ops::{Add, Sub};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::{
    DEFAULT_BUTTON_BACKGROUND, DEFAULT_BUTTON_PADDING, DEFAULT_BUTTON_RADIUS, DEFAULT_BUTTON_TEXT,
    DEFAULT_BUTTON_TEXT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_FONT_WEIGHT, DEFAULT_GRID_COLUMNS,
    DEFAULT_GRID_GAP, DEFAULT_IMAGE_RADIUS, DEFAULT_OBJECT_FIT, DEFAULT_TEXT, DEFAULT_TEXT_COLOR,
};

// ============================================================================
// Geometry
// ============================================================================

/// A point in canvas coordinates. Origin top-left, unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Position) -> Position {
        Position::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Position) -> Position {
        Position::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of a block in canvas units. Both must be positive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Finite and strictly positive in both dimensions
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

// ============================================================================
// Block Identity
// ============================================================================

/// Identifier of a block, unique within one document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for BlockId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for BlockId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for BlockId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BlockId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// Block Types
// ============================================================================

/// The closed set of block kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Image,
    Button,
    Grid,
}

impl BlockType {
    /// Wire tag, also used as the block id prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Image => "image",
            BlockType::Button => "button",
            BlockType::Grid => "grid",
        }
    }

    pub fn all() -> &'static [BlockType] {
        &[
            BlockType::Text,
            BlockType::Image,
            BlockType::Button,
            BlockType::Grid,
        ]
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Content Records
// ============================================================================

/// Horizontal alignment of a text block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    pub text: String,
    pub font_size: f64,
    pub font_weight: String,
    /// Hex color string, e.g. "#000000"
    pub color: String,
    pub text_align: TextAlign,
}

impl Default for TextContent {
    fn default() -> Self {
        Self {
            text: DEFAULT_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            color: DEFAULT_TEXT_COLOR.to_string(),
            text_align: TextAlign::Left,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageContent {
    /// Image URL; empty until the user picks one
    pub src: String,
    pub alt: String,
    pub object_fit: String,
    pub border_radius: f64,
}

impl Default for ImageContent {
    fn default() -> Self {
        Self {
            src: String::new(),
            alt: String::new(),
            object_fit: DEFAULT_OBJECT_FIT.to_string(),
            border_radius: DEFAULT_IMAGE_RADIUS,
        }
    }
}

/// Inner spacing of a button, horizontal and vertical
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonContent {
    pub text: String,
    /// Link target; an empty href renders a plain, non-link button
    pub href: String,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: f64,
    pub padding: Padding,
}

impl ButtonContent {
    pub fn is_link(&self) -> bool {
        !self.href.is_empty()
    }
}

impl Default for ButtonContent {
    fn default() -> Self {
        Self {
            text: DEFAULT_BUTTON_TEXT.to_string(),
            href: String::new(),
            background_color: DEFAULT_BUTTON_BACKGROUND.to_string(),
            text_color: DEFAULT_BUTTON_TEXT_COLOR.to_string(),
            border_radius: DEFAULT_BUTTON_RADIUS,
            padding: Padding {
                x: DEFAULT_BUTTON_PADDING.0,
                y: DEFAULT_BUTTON_PADDING.1,
            },
        }
    }
}

/// One cell of a grid block
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    pub content: String,
}

impl GridItem {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridContent {
    #[serde(deserialize_with = "deserialize_columns")]
    pub columns: u32,
    pub gap: f64,
    pub items: Vec<GridItem>,
}

impl Default for GridContent {
    fn default() -> Self {
        Self {
            columns: DEFAULT_GRID_COLUMNS,
            gap: DEFAULT_GRID_GAP,
            items: Vec::new(),
        }
    }
}

/// `3` and `3.0` both decode; `2.5` and `-1` do not.
pub(crate) fn whole_columns(value: f64) -> Option<u32> {
    let whole = value.is_finite() && value.fract() == 0.0;
    (whole && (0.0..=f64::from(u32::MAX)).contains(&value)).then_some(value as u32)
}

fn deserialize_columns<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64::deserialize(deserializer)?;
    whole_columns(value)
        .ok_or_else(|| de::Error::custom(format!("columns must be a whole number, got {value}")))
}

/// The type-specific payload of a block.
///
/// The variant *is* the block type; there is no separate tag to keep in sync.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockContent {
    Text(TextContent),
    Image(ImageContent),
    Button(ButtonContent),
    Grid(GridContent),
}

impl BlockContent {
    /// Complete default content for a block type.
    ///
    /// Every field a renderer reads is present; renderers apply no defaults.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Text => BlockContent::Text(TextContent::default()),
            BlockType::Image => BlockContent::Image(ImageContent::default()),
            BlockType::Button => BlockContent::Button(ButtonContent::default()),
            BlockType::Grid => BlockContent::Grid(GridContent::default()),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockContent::Text(_) => BlockType::Text,
            BlockContent::Image(_) => BlockType::Image,
            BlockContent::Button(_) => BlockType::Button,
            BlockContent::Grid(_) => BlockType::Grid,
        }
    }
}

// ============================================================================
// Block
// ============================================================================

/// One positioned, typed element of a composition.
///
/// Serialization goes through [`crate::codec`], which validates the content
/// against the `type` tag on decode.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub content: BlockContent,
    pub position: Position,
    pub size: Size,
}

impl Block {
    pub fn new(
        id: impl Into<BlockId>,
        content: BlockContent,
        position: Position,
        size: Size,
    ) -> Self {
        Self {
            id: id.into(),
            content,
            position,
            size,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.content.block_type()
    }
}

// ============================================================================
// Time
// ============================================================================

/// Current unix time in milliseconds. Used for block id discriminators and
/// portfolio timestamps.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
