//! Error types for the layout model.
//!
//! Document mutations and layout decoding each get their own enum so
//! callers can tell an editing mistake from a malformed stored payload.
//! Persistence boundary errors live in [`crate::persistence`] and
//! [`crate::service`].

use thiserror::Error;

use crate::types::{BlockId, BlockType, Position, Size};

/// Errors raised by [`crate::document::LayoutDocument`] mutations.
///
/// Unknown ids only surface as errors under
/// [`crate::document::MissingBlockPolicy::Strict`]; the default policy
/// treats them as no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// A block with this id is already in the document
    #[error("duplicate block id: {0}")]
    DuplicateId(BlockId),

    /// No block with this id exists
    #[error("block not found: {0}")]
    BlockNotFound(String),

    /// Content patch kind does not match the block kind
    #[error("cannot apply {found} patch to {expected} block {id}")]
    TypeMismatch {
        id: BlockId,
        expected: BlockType,
        found: BlockType,
    },

    /// Width or height is zero, negative or non-finite
    #[error("invalid size for block {id}: {size:?}")]
    InvalidSize { id: BlockId, size: Size },

    /// Position has a NaN or infinite coordinate
    #[error("invalid position for block {id}: {position:?}")]
    InvalidPosition { id: BlockId, position: Position },
}

/// Result type alias for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors produced while decoding or validating a serialized layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Malformed JSON or a wrong top-level shape
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content does not match the schema of its block type
    #[error("invalid {block_type} content for block {id}: {source}")]
    Content {
        id: BlockId,
        block_type: BlockType,
        #[source]
        source: serde_json::Error,
    },

    /// Width or height is zero, negative or non-finite
    #[error("invalid size for block {id}: {width} x {height}")]
    InvalidSize { id: BlockId, width: f64, height: f64 },

    /// Position has a NaN or infinite coordinate
    #[error("invalid position for block {id}")]
    InvalidPosition { id: BlockId },

    /// Two blocks share an id
    #[error("duplicate block id: {0}")]
    DuplicateId(BlockId),

    /// The payload is not shaped like `{ "blocks": [...] }`
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result type alias for layout codec operations
pub type LayoutResult<T> = Result<T, LayoutError>;

impl From<DocumentError> for LayoutError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::DuplicateId(id) => LayoutError::DuplicateId(id),
            other => LayoutError::InvalidLayout(other.to_string()),
        }
    }
}
