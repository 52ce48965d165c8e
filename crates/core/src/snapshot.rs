use crate::game::{Game, GameState};
use crate::observer::GameObserver;
use crate::piece::Piece;
use crate::rng::RandomSource;
use crate::types::{BlockColor, Orientation, ShapeKind, NUM_COLUMNS, NUM_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: ShapeKind,
    pub color: BlockColor,
    pub orientation: Orientation,
    pub column: i8,
    pub row: i8,
    pub blocks: [(i8, i8); 4],
}

impl From<&Piece> for PieceSnapshot {
    fn from(value: &Piece) -> Self {
        Self {
            kind: value.kind(),
            color: value.color(),
            orientation: value.orientation(),
            column: value.column(),
            row: value.row(),
            blocks: value.blocks().map(|b| b.position()),
        }
    }
}

/// Plain-data copy of the engine state.
///
/// `board` holds 0 for an empty slot and `color index + 1` for a settled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; NUM_COLUMNS as usize]; NUM_ROWS as usize],
    pub falling: Option<PieceSnapshot>,
    pub next: Option<PieceSnapshot>,
    pub score: u32,
    pub level: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; NUM_COLUMNS as usize]; NUM_ROWS as usize];
        self.falling = None;
        self.next = None;
        self.score = 0;
        self.level = 1;
    }

    /// Settled block count
    pub fn occupied(&self) -> usize {
        self.board.iter().flatten().filter(|&&c| c != 0).count()
    }

    /// Color at (column, row), if a block is settled there
    pub fn color_at(&self, column: usize, row: usize) -> Option<BlockColor> {
        let code = *self.board.get(row)?.get(column)?;
        code.checked_sub(1)
            .and_then(|idx| BlockColor::from_index(idx as usize))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; NUM_COLUMNS as usize]; NUM_ROWS as usize],
            falling: None,
            next: None,
            score: 0,
            level: 1,
        }
    }
}

impl GameState {
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.clear();
        for block in self.grid().blocks() {
            out.board[block.row as usize][block.column as usize] = block.color().index() as u8 + 1;
        }
        out.falling = self.falling().map(PieceSnapshot::from);
        out.next = self.next().map(PieceSnapshot::from);
        out.score = self.score();
        out.level = self.level();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl<O: GameObserver, R: RandomSource> Game<O, R> {
    pub fn snapshot(&self) -> GameSnapshot {
        self.state().snapshot()
    }
}
