//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, host glue, tests).
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Starting anchor**: (4, 0) for the falling piece
//! - **Preview anchor**: (12, 1) for the next piece (outside the grid)
//!
//! # Scoring
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POINTS_PER_LINE` | 10 | Points per cleared line, multiplied by the level |
//! | `LEVEL_THRESHOLD` | 1000 | Level `n` ends once the score reaches `n * 1000` |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Orientation, ShapeKind, GameAction, NUM_COLUMNS, NUM_ROWS};
//!
//! let kind = ShapeKind::from_str("t").unwrap();
//! assert_eq!(kind, ShapeKind::T);
//!
//! assert_eq!(Orientation::TwoSeventy.rotate(true), Orientation::Zero);
//! assert_eq!(Orientation::Zero.rotate(false), Orientation::TwoSeventy);
//!
//! assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
//!
//! assert_eq!(NUM_COLUMNS, 10);
//! assert_eq!(NUM_ROWS, 20);
//! ```

use std::fmt;

/// Grid width in cells (10 columns)
pub const NUM_COLUMNS: u8 = 10;

/// Grid height in cells (20 rows)
pub const NUM_ROWS: u8 = 20;

/// Anchor column a promoted piece is moved to
pub const STARTING_COLUMN: i8 = 4;

/// Anchor row a promoted piece is moved to
pub const STARTING_ROW: i8 = 0;

/// Anchor column of the preview ("next") piece
pub const PREVIEW_COLUMN: i8 = 12;

/// Anchor row of the preview ("next") piece
pub const PREVIEW_ROW: i8 = 1;

/// Points awarded per cleared line at level 1
pub const POINTS_PER_LINE: u32 = 10;

/// Score needed per level before advancing
pub const LEVEL_THRESHOLD: u32 = 1000;

/// Gravity tick length a host starts level 1 with
pub const TICK_LENGTH_LEVEL_ONE_MS: u32 = 600;

/// Number of block colors
pub const NUM_COLORS: usize = 6;

/// Number of piece kinds
pub const NUM_SHAPE_KINDS: usize = 7;

/// Number of orientations
pub const NUM_ORIENTATIONS: usize = 4;

/// Tick length a host switches to after a level-up.
///
/// Shortens by 100ms while the tick is at least 100ms long, then by 50ms while it is
/// longer than 50ms.
///
/// ```
/// use blockfall_types::{next_tick_length_ms, TICK_LENGTH_LEVEL_ONE_MS};
///
/// assert_eq!(next_tick_length_ms(TICK_LENGTH_LEVEL_ONE_MS), 500);
/// assert_eq!(next_tick_length_ms(75), 25);
/// assert_eq!(next_tick_length_ms(25), 25);
/// ```
pub fn next_tick_length_ms(current: u32) -> u32 {
    if current >= 100 {
        current - 100
    } else if current > 50 {
        current - 50
    } else {
        current
    }
}

/// Tunable rule parameters.
///
/// Grid dimensions are fixed at compile time; everything else a host may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    pub starting_column: i8,
    pub starting_row: i8,
    pub preview_column: i8,
    pub preview_row: i8,
    pub points_per_line: u32,
    pub level_threshold: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_column: STARTING_COLUMN,
            starting_row: STARTING_ROW,
            preview_column: PREVIEW_COLUMN,
            preview_row: PREVIEW_ROW,
            points_per_line: POINTS_PER_LINE,
            level_threshold: LEVEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_rule_defaults() {
        let rules = Rules::default();
        assert_eq!((rules.starting_column, rules.starting_row), (4, 0));
        assert_eq!((rules.preview_column, rules.preview_row), (12, 1));
        assert_eq!(rules.points_per_line, 10);
        assert_eq!(rules.level_threshold, 1000);
    }

    #[test]
    fn tick_length_shrinks_per_level() {
        let mut tick = TICK_LENGTH_LEVEL_ONE_MS;
        let mut seen = Vec::new();
        for _ in 0..8 {
            tick = next_tick_length_ms(tick);
            seen.push(tick);
        }
        assert_eq!(seen, vec![500, 400, 300, 200, 100, 0, 0, 0]);
    }

    #[test]
    fn orientation_wraps_both_ways() {
        for o in Orientation::ALL {
            assert_eq!(o.rotate(true).rotate(false), o);
            assert_eq!(o.rotate_cw().rotate_cw().rotate_cw().rotate_cw(), o);
        }
    }

    #[test]
    fn index_round_trip() {
        for (i, kind) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(ShapeKind::from_index(i), Some(*kind));
        }
        assert_eq!(ShapeKind::from_index(NUM_SHAPE_KINDS), None);

        for (i, color) in BlockColor::ALL.iter().enumerate() {
            assert_eq!(BlockColor::from_index(i), Some(*color));
        }
        assert_eq!(BlockColor::from_index(NUM_COLORS), None);

        for (i, orientation) in Orientation::ALL.iter().enumerate() {
            assert_eq!(orientation.index(), i);
            assert_eq!(Orientation::from_index(i), Some(*orientation));
        }
        assert_eq!(Orientation::from_index(NUM_ORIENTATIONS), None);
    }

    #[test]
    fn color_from_sprite_name() {
        for color in BlockColor::ALL {
            assert_eq!(BlockColor::from_str(color.sprite_name()), Some(color));
        }
        assert_eq!(BlockColor::from_str("TEAL"), Some(BlockColor::Teal));
        assert_eq!(BlockColor::from_str("green"), None);
    }
}

/// The six block colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockColor {
    Blue,
    Orange,
    Purple,
    Red,
    Teal,
    Yellow,
}

impl BlockColor {
    pub const ALL: [BlockColor; NUM_COLORS] = [
        BlockColor::Blue,
        BlockColor::Orange,
        BlockColor::Purple,
        BlockColor::Red,
        BlockColor::Teal,
        BlockColor::Yellow,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Sprite/asset name a presentation layer can key off
    pub fn sprite_name(&self) -> &'static str {
        match self {
            BlockColor::Blue => "blue",
            BlockColor::Orange => "orange",
            BlockColor::Purple => "purple",
            BlockColor::Red => "red",
            BlockColor::Teal => "teal",
            BlockColor::Yellow => "yellow",
        }
    }

    /// Parse a color from its sprite name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.sprite_name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for BlockColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sprite_name())
    }
}

/// The seven piece kinds
///
/// - **Square**: 2x2 block, rotation is a visual no-op
/// - **Line**: four in a row
/// - **T**, **L**, **J**: three in a row plus one
/// - **S**, **Z**: skewed pairs (mirrors of each other)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Square,
    Line,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; NUM_SHAPE_KINDS] = [
        ShapeKind::Square,
        ShapeKind::Line,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("square"), Some(ShapeKind::Square));
    /// assert_eq!(ShapeKind::from_str("LINE"), Some(ShapeKind::Line));
    /// assert_eq!(ShapeKind::from_str("z"), Some(ShapeKind::Z));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "square" => Some(ShapeKind::Square),
            "line" => Some(ShapeKind::Line),
            "t" => Some(ShapeKind::T),
            "l" => Some(ShapeKind::L),
            "j" => Some(ShapeKind::J),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
            ShapeKind::T => "t",
            ShapeKind::L => "l",
            ShapeKind::J => "j",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rotation states, cyclically ordered
///
/// The cycle goes: 0° → 90° → 180° → 270° → 0°
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    Zero,
    Ninety,
    OneEighty,
    TwoSeventy,
}

impl Orientation {
    pub const ALL: [Orientation; NUM_ORIENTATIONS] = [
        Orientation::Zero,
        Orientation::Ninety,
        Orientation::OneEighty,
        Orientation::TwoSeventy,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Advance (clockwise) or retreat one step, wrapping at both ends
    pub fn rotate(self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use blockfall_types::Orientation;
    ///
    /// assert_eq!(Orientation::Zero.rotate_cw(), Orientation::Ninety);
    /// assert_eq!(Orientation::TwoSeventy.rotate_cw(), Orientation::Zero);
    /// ```
    pub fn rotate_cw(self) -> Self {
        match self {
            Orientation::Zero => Orientation::Ninety,
            Orientation::Ninety => Orientation::OneEighty,
            Orientation::OneEighty => Orientation::TwoSeventy,
            Orientation::TwoSeventy => Orientation::Zero,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(self) -> Self {
        match self {
            Orientation::Zero => Orientation::TwoSeventy,
            Orientation::TwoSeventy => Orientation::OneEighty,
            Orientation::OneEighty => Orientation::Ninety,
            Orientation::Ninety => Orientation::Zero,
        }
    }

    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Zero => 0,
            Orientation::Ninety => 90,
            Orientation::OneEighty => 180,
            Orientation::TwoSeventy => 270,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Player/host intents that can be applied to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop to rest, then settle on the following step
    HardDrop,
    /// One gravity step
    Tick,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "harddrop" => Some(GameAction::HardDrop),
            "tick" => Some(GameAction::Tick),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Tick => "tick",
        }
    }
}
