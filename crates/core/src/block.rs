//! Block module - a single occupied square
//!
//! A block belongs either to a piece (while it falls) or to the grid (once settled).
//! Its color never changes; its position follows whoever owns it.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::types::BlockColor;

/// Opaque handle a presentation layer can attach to a block (sprite id, node key, ...).
///
/// The engine never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u64);

/// One occupied square
#[derive(Debug, Clone, Copy)]
pub struct Block {
    color: BlockColor,
    pub column: i8,
    pub row: i8,
    pub sprite: Option<SpriteHandle>,
}

impl Block {
    pub fn new(column: i8, row: i8, color: BlockColor) -> Self {
        Self {
            color,
            column,
            row,
            sprite: None,
        }
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn position(&self) -> (i8, i8) {
        (self.column, self.row)
    }

    pub fn sprite_name(&self) -> &'static str {
        self.color.sprite_name()
    }
}

// Identity is position + color; the sprite handle is presentation state.
impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.column == other.column && self.row == other.row && self.color == other.color
    }
}

impl Eq for Block {}

impl Hash for Block {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.column.hash(state);
        self.row.hash(state);
        self.color.hash(state);
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [{}, {}]", self.color, self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equality_ignores_sprite() {
        let a = Block::new(3, 7, BlockColor::Teal);
        let mut b = a;
        b.sprite = Some(SpriteHandle(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_uses_color() {
        let a = Block::new(3, 7, BlockColor::Teal);
        let b = Block::new(3, 7, BlockColor::Red);
        assert_ne!(a, b);
    }

    #[test]
    fn test_swapped_coordinates_are_distinct() {
        let mut set = HashSet::new();
        set.insert(Block::new(2, 5, BlockColor::Blue));
        set.insert(Block::new(5, 2, BlockColor::Blue));
        set.insert(Block::new(2, 5, BlockColor::Yellow));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_display() {
        let block = Block::new(8, 3, BlockColor::Blue);
        assert_eq!(block.to_string(), "blue: [8, 3]");
    }
}
