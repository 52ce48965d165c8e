//! Shapes module - piece layouts per kind and orientation
//!
//! Each kind lists, for every orientation, four (column, row) offsets relative to the
//! piece anchor and the indices of its "bottom" blocks: the blocks with no block of the
//! same piece directly beneath them. Landing checks only look under bottom blocks.
//!
//! Offset order is fixed per kind, so block `i` of a piece is always the same block
//! across moves and rotations.

use crate::types::{Orientation, ShapeKind, NUM_ORIENTATIONS, NUM_SHAPE_KINDS};

/// Offset of a single block relative to the piece anchor
pub type BlockOffset = (i8, i8);

/// Four block offsets from the piece anchor
pub type ShapeOffsets = [BlockOffset; 4];

/// Layout of one kind at one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeLayout {
    pub offsets: ShapeOffsets,
    pub bottom: &'static [usize],
}

const fn layout(offsets: ShapeOffsets, bottom: &'static [usize]) -> ShapeLayout {
    ShapeLayout { offsets, bottom }
}

/*
    | 0•| 1 |
    | 2 | 3 |
*/
const SQUARE: [ShapeLayout; NUM_ORIENTATIONS] = {
    let l = layout([(0, 0), (1, 0), (0, 1), (1, 1)], &[2, 3]);
    [l, l, l, l]
};

const LINE: [ShapeLayout; NUM_ORIENTATIONS] = {
    let vertical = layout([(0, 0), (0, 1), (0, 2), (0, 3)], &[3]);
    let horizontal = layout([(-1, 0), (0, 0), (1, 0), (2, 0)], &[0, 1, 2, 3]);
    [vertical, horizontal, vertical, horizontal]
};

const T: [ShapeLayout; NUM_ORIENTATIONS] = [
    layout([(1, 0), (0, 1), (1, 1), (2, 1)], &[1, 2, 3]),
    layout([(2, 1), (1, 0), (1, 1), (1, 2)], &[0, 3]),
    layout([(1, 2), (0, 1), (1, 1), (2, 1)], &[0, 1, 3]),
    layout([(0, 1), (1, 0), (1, 1), (1, 2)], &[0, 3]),
];

const L: [ShapeLayout; NUM_ORIENTATIONS] = [
    layout([(0, 0), (0, 1), (0, 2), (1, 2)], &[2, 3]),
    layout([(1, 1), (0, 1), (-1, 1), (-1, 2)], &[0, 1, 3]),
    layout([(0, 2), (0, 1), (0, 0), (-1, 0)], &[0, 3]),
    layout([(-1, 1), (0, 1), (1, 1), (1, 0)], &[0, 1, 2]),
];

const J: [ShapeLayout; NUM_ORIENTATIONS] = [
    layout([(1, 0), (1, 1), (1, 2), (0, 2)], &[2, 3]),
    layout([(2, 1), (1, 1), (0, 1), (0, 0)], &[0, 1, 2]),
    layout([(0, 2), (0, 1), (0, 0), (1, 0)], &[0, 3]),
    layout([(0, 0), (1, 0), (2, 0), (2, 1)], &[0, 1, 3]),
];

const S: [ShapeLayout; NUM_ORIENTATIONS] = {
    let upright = layout([(0, 0), (0, 1), (1, 1), (1, 2)], &[1, 3]);
    let flat = layout([(2, 0), (1, 0), (1, 1), (0, 1)], &[0, 2, 3]);
    [upright, flat, upright, flat]
};

const Z: [ShapeLayout; NUM_ORIENTATIONS] = {
    let upright = layout([(1, 0), (1, 1), (0, 1), (0, 2)], &[1, 3]);
    let flat = layout([(-1, 0), (0, 0), (0, 1), (1, 1)], &[0, 2, 3]);
    [upright, flat, upright, flat]
};

/// Indexed by `[ShapeKind::index()][Orientation::index()]`
const CATALOG: [[ShapeLayout; NUM_ORIENTATIONS]; NUM_SHAPE_KINDS] = [SQUARE, LINE, T, L, J, S, Z];

/// A layout must name at least one bottom block, each index in 0..4 and listed once.
const fn catalog_is_well_formed() -> bool {
    let mut k = 0;
    while k < NUM_SHAPE_KINDS {
        let mut o = 0;
        while o < NUM_ORIENTATIONS {
            let bottom = CATALOG[k][o].bottom;
            if bottom.is_empty() || bottom.len() > 4 {
                return false;
            }
            let mut i = 0;
            while i < bottom.len() {
                if bottom[i] >= 4 {
                    return false;
                }
                let mut j = i + 1;
                while j < bottom.len() {
                    if bottom[i] == bottom[j] {
                        return false;
                    }
                    j += 1;
                }
                i += 1;
            }
            o += 1;
        }
        k += 1;
    }
    true
}

const _: () = assert!(catalog_is_well_formed(), "corrupt shape catalog");

/// Get the layout for a piece kind and orientation
pub fn get_layout(kind: ShapeKind, orientation: Orientation) -> &'static ShapeLayout {
    &CATALOG[kind.index()][orientation.index()]
}

/// Get the block offsets for a piece kind and orientation
pub fn get_offsets(kind: ShapeKind, orientation: Orientation) -> ShapeOffsets {
    get_layout(kind, orientation).offsets
}

/// Get the bottom block indices for a piece kind and orientation
pub fn get_bottom_indices(kind: ShapeKind, orientation: Orientation) -> &'static [usize] {
    get_layout(kind, orientation).bottom
}

/// Largest row offset of a layout (how far the piece reaches below its anchor)
pub fn max_row_offset(kind: ShapeKind, orientation: Orientation) -> i8 {
    get_offsets(kind, orientation)
        .iter()
        .map(|&(_, dr)| dr)
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_blocks_have_nothing_of_the_piece_below() {
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                let layout = get_layout(kind, orientation);
                let expected: Vec<usize> = (0..4)
                    .filter(|&i| {
                        let (c, r) = layout.offsets[i];
                        !layout.offsets.contains(&(c, r + 1))
                    })
                    .collect();
                assert_eq!(
                    layout.bottom, expected,
                    "{kind:?} at {orientation:?} has a wrong bottom set"
                );
            }
        }
    }

    #[test]
    fn test_offsets_are_distinct() {
        for kind in ShapeKind::ALL {
            for orientation in Orientation::ALL {
                let offsets = get_offsets(kind, orientation);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(offsets[i], offsets[j], "{kind:?} {orientation:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_catalog_well_formed() {
        assert!(catalog_is_well_formed());
    }

    #[test]
    fn test_max_row_offset() {
        assert_eq!(max_row_offset(ShapeKind::Line, Orientation::Zero), 3);
        assert_eq!(max_row_offset(ShapeKind::Line, Orientation::Ninety), 0);
        assert_eq!(max_row_offset(ShapeKind::Square, Orientation::OneEighty), 1);
        assert_eq!(max_row_offset(ShapeKind::T, Orientation::Ninety), 2);
    }
}
