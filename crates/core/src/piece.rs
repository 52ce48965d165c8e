//! Piece module - the movable four-block aggregate
//!
//! A piece never checks legality: it always applies a move or rotation and trusts the
//! engine to apply the inverse when the result overlaps the grid or leaves it.

use std::fmt;

use arrayvec::ArrayVec;

use crate::block::Block;
use crate::rng::{random_color, random_kind, random_orientation, RandomSource};
use crate::shapes::{get_layout, get_offsets};
use crate::types::{BlockColor, Orientation, ShapeKind};

/// A falling or preview piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    color: BlockColor,
    orientation: Orientation,
    column: i8,
    row: i8,
    blocks: [Block; 4],
}

impl Piece {
    /// Build a piece with its four blocks laid out around the anchor
    pub fn new(
        kind: ShapeKind,
        column: i8,
        row: i8,
        color: BlockColor,
        orientation: Orientation,
    ) -> Self {
        let offsets = get_offsets(kind, orientation);
        let blocks = offsets.map(|(dc, dr)| Block::new(column + dc, row + dr, color));
        Self {
            kind,
            color,
            orientation,
            column,
            row,
            blocks,
        }
    }

    /// Build a piece with kind, color and orientation drawn (in that order) from `rng`
    pub fn random(column: i8, row: i8, rng: &mut impl RandomSource) -> Self {
        let kind = random_kind(rng);
        let color = random_color(rng);
        let orientation = random_orientation(rng);
        Self::new(kind, column, row, color, orientation)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn column(&self) -> i8 {
        self.column
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    /// The four blocks in stable index order
    pub fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    /// Hand the blocks out, ending the piece
    pub fn into_blocks(self) -> [Block; 4] {
        self.blocks
    }

    /// Bottom blocks for the current orientation, at their absolute positions
    pub fn bottom_blocks(&self) -> ArrayVec<Block, 4> {
        get_layout(self.kind, self.orientation)
            .bottom
            .iter()
            .map(|&i| self.blocks[i])
            .collect()
    }

    /// Re-derive every block position from the anchor at `orientation`
    fn rotate_blocks(&mut self, orientation: Orientation) {
        let offsets = get_offsets(self.kind, orientation);
        for (block, (dc, dr)) in self.blocks.iter_mut().zip(offsets) {
            block.column = self.column + dc;
            block.row = self.row + dr;
        }
        self.orientation = orientation;
    }

    pub fn rotate_clockwise(&mut self) {
        self.rotate_blocks(self.orientation.rotate_cw());
    }

    pub fn rotate_counter_clockwise(&mut self) {
        self.rotate_blocks(self.orientation.rotate_ccw());
    }

    pub fn rotate(&mut self, clockwise: bool) {
        self.rotate_blocks(self.orientation.rotate(clockwise));
    }

    /// Translate the anchor and all four blocks
    pub fn shift_by(&mut self, columns: i8, rows: i8) {
        self.column += columns;
        self.row += rows;
        for block in &mut self.blocks {
            block.column += columns;
            block.row += rows;
        }
    }

    pub fn lower_by_one_row(&mut self) {
        self.shift_by(0, 1);
    }

    pub fn raise_by_one_row(&mut self) {
        self.shift_by(0, -1);
    }

    pub fn shift_left_by_one_column(&mut self) {
        self.shift_by(-1, 0);
    }

    pub fn shift_right_by_one_column(&mut self) {
        self.shift_by(1, 0);
    }

    /// Put the anchor at an absolute position, keeping the orientation
    pub fn move_to(&mut self, column: i8, row: i8) {
        self.column = column;
        self.row = row;
        self.rotate_blocks(self.orientation);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = &self.blocks;
        write!(
            f,
            "{} {} facing {}: {}, {}, {}, {}",
            self.color, self.kind, self.orientation, a, b, c, d
        )
    }
}
