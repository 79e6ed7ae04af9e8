//! Measured block geometry.
//!
//! The drag arithmetic works on rendered rectangles, not on stored block
//! fields, so the source of measurements is a trait. The session measures
//! through its [`crate::spatial_index::SpatialIndex`]; a renderer can
//! supply its own layout boxes.

use crate::types::{Block, Position};

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_block(block: &Block) -> Self {
        Self::new(
            block.position.x,
            block.position.y,
            block.size.width,
            block.size.height,
        )
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Position {
        Position::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Edges inclusive
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Offset of `pointer` from the center of this rectangle.
    pub fn offset_from_center(&self, pointer: Position) -> Position {
        pointer - self.center()
    }

    /// A rectangle with NaN, infinite or negative extents cannot be used
    /// for drag arithmetic.
    pub fn is_measurable(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Supplies the rendered rectangle of a block.
///
/// `None` means the block is not mounted (not rendered yet, or already
/// gone), and drag updates targeting it are ignored.
pub trait GeometrySource {
    fn measure(&self, block_id: &str) -> Option<Rect>;
}

impl<F> GeometrySource for F
where
    F: Fn(&str) -> Option<Rect>,
{
    fn measure(&self, block_id: &str) -> Option<Rect> {
        self(block_id)
    }
}
