//! Grid module - manages the settled blocks
//!
//! The grid is a 10x20 container where each slot is empty or holds one block.
//! Uses a flat array for better cache locality and zero-allocation lookups.
//! Coordinates: (column, row) where column ranges 0..9 (left to right), row ranges 0..19
//! (top to bottom). Storage is row-major: column varies fastest.

use std::fmt;

use crate::block::Block;
use crate::types::{NUM_COLUMNS, NUM_ROWS};

/// Total number of slots in the grid
pub const GRID_SIZE: usize = (NUM_COLUMNS as usize) * (NUM_ROWS as usize);

/// The settled-block grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of slots, row-major order (row * COLUMNS + column)
    slots: [Option<Block>; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            slots: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (column, row) coordinates
    #[inline(always)]
    fn index(column: i8, row: i8) -> Option<usize> {
        if Self::is_out_of_bounds(column, row) {
            return None;
        }
        Some((row as usize) * (NUM_COLUMNS as usize) + (column as usize))
    }

    pub fn columns(&self) -> u8 {
        NUM_COLUMNS
    }

    pub fn rows(&self) -> u8 {
        NUM_ROWS
    }

    /// Check if position lies outside the grid
    #[inline]
    pub fn is_out_of_bounds(column: i8, row: i8) -> bool {
        column < 0 || column >= NUM_COLUMNS as i8 || row < 0 || row >= NUM_ROWS as i8
    }

    /// Get the block at (column, row); None if empty or out of bounds
    pub fn get(&self, column: i8, row: i8) -> Option<&Block> {
        Self::index(column, row).and_then(|idx| self.slots[idx].as_ref())
    }

    /// Check if position is within bounds and holds a block
    pub fn is_occupied(&self, column: i8, row: i8) -> bool {
        self.get(column, row).is_some()
    }

    /// Check if position is within bounds and empty
    pub fn is_vacant(&self, column: i8, row: i8) -> bool {
        matches!(Self::index(column, row), Some(idx) if self.slots[idx].is_none())
    }

    /// Store a block at its own position, replacing whatever was there.
    /// Returns false if the block lies out of bounds.
    pub fn place(&mut self, block: Block) -> bool {
        match Self::index(block.column, block.row) {
            Some(idx) => {
                self.slots[idx] = Some(block);
                true
            }
            None => false,
        }
    }

    /// Remove and return the block at (column, row)
    pub fn take(&mut self, column: i8, row: i8) -> Option<Block> {
        Self::index(column, row).and_then(|idx| self.slots[idx].take())
    }

    /// Move the block at (column, from_row) down or up to `to_row`, updating its row.
    /// Returns the moved block, or None if the source was empty or either row is out of bounds.
    pub fn move_block(&mut self, column: i8, from_row: i8, to_row: i8) -> Option<Block> {
        let dst = Self::index(column, to_row)?;
        let mut block = self.take(column, from_row)?;
        block.row = to_row;
        self.slots[dst] = Some(block);
        Some(block)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: i8) -> bool {
        if row < 0 || row >= NUM_ROWS as i8 {
            return false;
        }
        self.row_slots(row as usize).iter().all(Option::is_some)
    }

    /// Blocks in a row, in column order
    pub fn row_blocks(&self, row: i8) -> impl Iterator<Item = &Block> + '_ {
        let slots: &[Option<Block>] = if row < 0 || row >= NUM_ROWS as i8 {
            &[]
        } else {
            self.row_slots(row as usize)
        };
        slots.iter().flatten()
    }

    /// Remove every block in a row, returning them in column order
    pub fn take_row(&mut self, row: i8) -> Vec<Block> {
        if row < 0 || row >= NUM_ROWS as i8 {
            return Vec::new();
        }
        let start = row as usize * NUM_COLUMNS as usize;
        self.slots[start..start + NUM_COLUMNS as usize]
            .iter_mut()
            .filter_map(Option::take)
            .collect()
    }

    fn row_slots(&self, row: usize) -> &[Option<Block>] {
        let start = row * NUM_COLUMNS as usize;
        &self.slots[start..start + NUM_COLUMNS as usize]
    }

    /// All settled blocks in storage order
    pub fn blocks(&self) -> impl Iterator<Item = &Block> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of settled blocks
    pub fn len(&self) -> usize {
        self.blocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Empty every slot, returning the removed blocks grouped by row.
    ///
    /// The result always holds one list per row, top to bottom; empty rows give empty lists.
    pub fn take_all(&mut self) -> Vec<Vec<Block>> {
        (0..NUM_ROWS as i8).map(|row| self.take_row(row)).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..NUM_ROWS as usize {
            for slot in self.row_slots(row) {
                let ch = match slot {
                    Some(block) => block.sprite_name().as_bytes()[0].to_ascii_uppercase() as char,
                    None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
