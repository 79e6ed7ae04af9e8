//! Partial updates for `update_block`.
//!
//! A [`BlockPatch`] carries only the fields being changed. Content patches
//! are typed per block kind, so a text patch cannot silently land on an
//! image block.

use serde::{Deserialize, Deserializer, de};

use crate::types::{
    Block, BlockContent, BlockType, GridItem, Padding, Position, Size, TextAlign, whole_columns,
};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextPatch {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_weight: Option<String>,
    pub color: Option<String>,
    pub text_align: Option<TextAlign>,
}

impl TextPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ImagePatch {
    pub src: Option<String>,
    pub alt: Option<String>,
    pub object_fit: Option<String>,
    pub border_radius: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ButtonPatch {
    pub text: Option<String>,
    pub href: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_radius: Option<f64>,
    pub padding: Option<Padding>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GridPatch {
    #[serde(default, deserialize_with = "deserialize_optional_columns")]
    pub columns: Option<u32>,
    pub gap: Option<f64>,
    pub items: Option<Vec<GridItem>>,
}

fn deserialize_optional_columns<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    match Option::<f64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => whole_columns(value).map(Some).ok_or_else(|| {
            de::Error::custom(format!("columns must be a whole number, got {value}"))
        }),
    }
}

/// Content fields to merge into a block of the matching type.
#[derive(Clone, Debug, PartialEq)]
pub enum ContentPatch {
    Text(TextPatch),
    Image(ImagePatch),
    Button(ButtonPatch),
    Grid(GridPatch),
}

impl ContentPatch {
    pub fn block_type(&self) -> BlockType {
        match self {
            ContentPatch::Text(_) => BlockType::Text,
            ContentPatch::Image(_) => BlockType::Image,
            ContentPatch::Button(_) => BlockType::Button,
            ContentPatch::Grid(_) => BlockType::Grid,
        }
    }

    /// Merge into `content`. Returns the content's type on a kind mismatch
    /// and leaves the content untouched.
    pub fn apply(&self, content: &mut BlockContent) -> Result<(), BlockType> {
        match (self, content) {
            (ContentPatch::Text(patch), BlockContent::Text(text)) => {
                merge(&mut text.text, &patch.text);
                merge(&mut text.font_size, &patch.font_size);
                merge(&mut text.font_weight, &patch.font_weight);
                merge(&mut text.color, &patch.color);
                merge(&mut text.text_align, &patch.text_align);
                Ok(())
            }
            (ContentPatch::Image(patch), BlockContent::Image(image)) => {
                merge(&mut image.src, &patch.src);
                merge(&mut image.alt, &patch.alt);
                merge(&mut image.object_fit, &patch.object_fit);
                merge(&mut image.border_radius, &patch.border_radius);
                Ok(())
            }
            (ContentPatch::Button(patch), BlockContent::Button(button)) => {
                merge(&mut button.text, &patch.text);
                merge(&mut button.href, &patch.href);
                merge(&mut button.background_color, &patch.background_color);
                merge(&mut button.text_color, &patch.text_color);
                merge(&mut button.border_radius, &patch.border_radius);
                merge(&mut button.padding, &patch.padding);
                Ok(())
            }
            (ContentPatch::Grid(patch), BlockContent::Grid(grid)) => {
                merge(&mut grid.columns, &patch.columns);
                merge(&mut grid.gap, &patch.gap);
                merge(&mut grid.items, &patch.items);
                Ok(())
            }
            (_, content) => Err(content.block_type()),
        }
    }
}

fn merge<T: Clone>(field: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *field = value.clone();
    }
}

/// Why a patch could not be applied
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PatchRejection {
    /// Content patch kind differs from the block's kind
    TypeMismatch { expected: BlockType, found: BlockType },
    /// Size patch is zero, negative or non-finite
    InvalidSize(Size),
    /// Position patch is NaN or infinite
    InvalidPosition(Position),
}

/// Fields to merge into an existing block. The id is never patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockPatch {
    pub content: Option<ContentPatch>,
    pub position: Option<Position>,
    pub size: Option<Size>,
}

impl BlockPatch {
    pub fn content(content: ContentPatch) -> Self {
        Self {
            content: Some(content),
            ..Default::default()
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.position.is_none() && self.size.is_none()
    }

    /// Apply every field or none of them.
    pub fn apply(&self, block: &mut Block) -> Result<(), PatchRejection> {
        if let Some(size) = self.size {
            if !size.is_valid() {
                return Err(PatchRejection::InvalidSize(size));
            }
        }
        if let Some(position) = self.position {
            if !position.is_finite() {
                return Err(PatchRejection::InvalidPosition(position));
            }
        }
        if let Some(content) = &self.content {
            content
                .apply(&mut block.content)
                .map_err(|expected| PatchRejection::TypeMismatch {
                    expected,
                    found: content.block_type(),
                })?;
        }
        if let Some(position) = self.position {
            block.position = position;
        }
        if let Some(size) = self.size {
            block.size = size;
        }
        Ok(())
    }
}
