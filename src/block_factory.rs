//! Creates new blocks with complete default content.
//!
//! Ids are `<type>-<discriminator>` where the discriminator is the current
//! unix time in milliseconds, bumped past the previous one when two blocks
//! are created within the same millisecond. Ids from one factory are
//! therefore strictly increasing and never repeat.

use tracing::debug;

use crate::constants::{DEFAULT_BLOCK_POSITION, DEFAULT_BLOCK_SIZE};
use crate::types::{Block, BlockContent, BlockId, BlockType, Position, Size, now_millis};

#[derive(Clone, Debug)]
pub struct BlockFactory {
    last_discriminator: u64,
    default_position: Position,
    default_size: Size,
}

impl Default for BlockFactory {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_POSITION, DEFAULT_BLOCK_SIZE)
    }
}

impl BlockFactory {
    pub fn new(default_position: Position, default_size: Size) -> Self {
        Self {
            last_discriminator: 0,
            default_position,
            default_size,
        }
    }

    pub fn default_position(&self) -> Position {
        self.default_position
    }

    pub fn default_size(&self) -> Size {
        self.default_size
    }

    /// A new block of `block_type` at the default position and size.
    pub fn create(&mut self, block_type: BlockType) -> Block {
        let id = self.next_id(block_type);
        debug!(id = %id, "Created block");
        Block::new(
            id,
            BlockContent::default_for(block_type),
            self.default_position,
            self.default_size,
        )
    }

    /// Like [`create`](Self::create), skipping ids for which `taken`
    /// returns true. Used when a loaded layout already holds time-based ids.
    pub fn create_unique(&mut self, block_type: BlockType, taken: impl Fn(&str) -> bool) -> Block {
        let mut block = self.create(block_type);
        while taken(block.id.as_str()) {
            block.id = self.next_id(block_type);
        }
        block
    }

    fn next_id(&mut self, block_type: BlockType) -> BlockId {
        let now = now_millis();
        self.last_discriminator = now.max(self.last_discriminator + 1);
        BlockId::new(format!("{}-{}", block_type.as_str(), self.last_discriminator))
    }
}
