//! JSON wire format for layouts.
//!
//! A stored composition is `{ "blocks": [Block, ...] }` where each block is
//! `{id, type, content, position, size}`. Content is decoded against the
//! schema selected by `type`; every content field is required and no
//! defaults are filled in on decode.

use std::collections::HashSet;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{LayoutError, LayoutResult};
use crate::patch::{BlockPatch, ButtonPatch, ContentPatch, GridPatch, ImagePatch, TextPatch};
use crate::types::{Block, BlockContent, BlockId, BlockType, Position, Size};

// ============================================================================
// Block <-> JSON
// ============================================================================

/// Block as it appears on the wire, before content is checked against `type`.
#[derive(Deserialize)]
struct WireBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    content: Value,
    position: Position,
    size: Size,
}

impl TryFrom<WireBlock> for Block {
    type Error = LayoutError;

    fn try_from(wire: WireBlock) -> LayoutResult<Self> {
        let WireBlock {
            id,
            block_type,
            content,
            position,
            size,
        } = wire;

        let content = decode_content(&id, block_type, content)?;
        let block = Block {
            id,
            content,
            position,
            size,
        };
        validate_block(&block)?;
        Ok(block)
    }
}

fn decode_content(id: &BlockId, block_type: BlockType, content: Value) -> LayoutResult<BlockContent> {
    let wrap = |source: serde_json::Error| LayoutError::Content {
        id: id.clone(),
        block_type,
        source,
    };
    let content = match block_type {
        BlockType::Text => BlockContent::Text(serde_json::from_value(content).map_err(wrap)?),
        BlockType::Image => BlockContent::Image(serde_json::from_value(content).map_err(wrap)?),
        BlockType::Button => BlockContent::Button(serde_json::from_value(content).map_err(wrap)?),
        BlockType::Grid => BlockContent::Grid(serde_json::from_value(content).map_err(wrap)?),
    };
    Ok(content)
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Block", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.block_type())?;
        match &self.content {
            BlockContent::Text(content) => state.serialize_field("content", content)?,
            BlockContent::Image(content) => state.serialize_field("content", content)?,
            BlockContent::Button(content) => state.serialize_field("content", content)?,
            BlockContent::Grid(content) => state.serialize_field("content", content)?,
        }
        state.serialize_field("position", &self.position)?;
        state.serialize_field("size", &self.size)?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireBlock::deserialize(deserializer)?;
        Block::try_from(wire).map_err(D::Error::custom)
    }
}

// ============================================================================
// Layout <-> JSON
// ============================================================================

/// The persisted document shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutJson {
    pub blocks: Vec<Block>,
}

impl LayoutJson {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

/// Encode blocks into the `{ "blocks": [...] }` value sent to storage.
pub fn encode_layout(blocks: &[Block]) -> LayoutResult<Value> {
    let mut value = serde_json::Map::new();
    value.insert("blocks".to_string(), serde_json::to_value(blocks)?);
    Ok(Value::Object(value))
}

pub fn encode_layout_string(blocks: &[Block], pretty: bool) -> LayoutResult<String> {
    let value = encode_layout(blocks)?;
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

/// Strictly decode a layout string. Every block is validated and ids must
/// be unique.
///
/// Per-block validation failures surface as [`LayoutError::Json`] because
/// they pass through `Block`'s `Deserialize` impl.
pub fn decode_layout(json: &str) -> LayoutResult<Vec<Block>> {
    let layout: LayoutJson = serde_json::from_str(json)?;
    validate_unique_ids(&layout.blocks)?;
    Ok(layout.blocks)
}

/// Strictly decode an already parsed layout value.
pub fn decode_layout_value(value: &Value) -> LayoutResult<Vec<Block>> {
    let layout = LayoutJson::deserialize(value)?;
    validate_unique_ids(&layout.blocks)?;
    Ok(layout.blocks)
}

/// Decode the `layout_json` of a stored composition.
///
/// Older records may lack the `blocks` key or carry `null`; both open as an
/// empty layout. Anything that is present must still be valid.
pub fn blocks_from_stored(layout_json: &Value) -> LayoutResult<Vec<Block>> {
    match layout_json {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => match map.get("blocks") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(blocks) => {
                let blocks = Vec::<Block>::deserialize(blocks)?;
                validate_unique_ids(&blocks)?;
                Ok(blocks)
            }
        },
        other => Err(LayoutError::InvalidLayout(format!(
            "expected an object, found {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Check geometry of a single block.
pub fn validate_block(block: &Block) -> LayoutResult<()> {
    if !block.size.is_valid() {
        return Err(LayoutError::InvalidSize {
            id: block.id.clone(),
            width: block.size.width,
            height: block.size.height,
        });
    }
    if !block.position.is_finite() {
        return Err(LayoutError::InvalidPosition {
            id: block.id.clone(),
        });
    }
    Ok(())
}

/// Check that no two blocks share an id.
pub fn validate_unique_ids(blocks: &[Block]) -> LayoutResult<()> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        if !seen.insert(block.id.as_str()) {
            return Err(LayoutError::DuplicateId(block.id.clone()));
        }
    }
    Ok(())
}

// ============================================================================
// Patches
// ============================================================================

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WirePatch {
    content: Option<Value>,
    position: Option<Position>,
    size: Option<Size>,
}

/// Decode a JSON partial update such as `{"content": {"text": "Hi"}}` for a
/// block of the given type.
pub fn decode_patch(id: &BlockId, block_type: BlockType, value: &Value) -> LayoutResult<BlockPatch> {
    let wire = WirePatch::deserialize(value)?;
    let wrap = |source: serde_json::Error| LayoutError::Content {
        id: id.clone(),
        block_type,
        source,
    };
    let content = match wire.content {
        None => None,
        Some(content) => Some(match block_type {
            BlockType::Text => {
                ContentPatch::Text(serde_json::from_value::<TextPatch>(content).map_err(wrap)?)
            }
            BlockType::Image => {
                ContentPatch::Image(serde_json::from_value::<ImagePatch>(content).map_err(wrap)?)
            }
            BlockType::Button => {
                ContentPatch::Button(serde_json::from_value::<ButtonPatch>(content).map_err(wrap)?)
            }
            BlockType::Grid => {
                ContentPatch::Grid(serde_json::from_value::<GridPatch>(content).map_err(wrap)?)
            }
        }),
    };
    Ok(BlockPatch {
        content,
        position: wire.position,
        size: wire.size,
    })
}
