//! Game module - the rules engine
//!
//! This module ties together all core components: grid, pieces, randomness and scoring.
//! It handles spawning, gravity, player movement, landing, line clears and the game
//! lifecycle, and reports every transition to a [`GameObserver`].
//!
//! Every mutation of the falling piece follows the same protocol: apply the change,
//! test [`GameState::is_illegal_placement`], and apply the exact inverse if the piece now
//! overlaps a settled block or leaves the grid. Illegal placements are ordinary control
//! flow, never errors.

use log::{debug, trace};

use crate::block::Block;
use crate::grid::Grid;
use crate::observer::{EventLog, GameObserver};
use crate::piece::Piece;
use crate::rng::{RandomSource, SimpleRng};
use crate::scoring::calculate_score;
use crate::types::{GameAction, Rules, NUM_COLUMNS, NUM_ROWS};

/// Everything the observer gets to see
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    grid: Grid,
    falling: Option<Piece>,
    next: Option<Piece>,
    score: u32,
    level: u32,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            falling: None,
            next: None,
            score: 0,
            level: 1,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.falling.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Check if `piece` lies fully inside the grid without overlapping a settled block
    pub fn fits(&self, piece: &Piece) -> bool {
        piece
            .blocks()
            .iter()
            .all(|b| self.grid.is_vacant(b.column, b.row))
    }

    /// True iff a falling piece exists and any of its blocks is out of bounds or on an
    /// occupied slot
    pub fn is_illegal_placement(&self) -> bool {
        self.falling.as_ref().is_some_and(|piece| !self.fits(piece))
    }

    /// True iff any bottom block of the falling piece rests on the floor or on a settled block
    pub fn is_touching(&self) -> bool {
        let Some(piece) = self.falling.as_ref() else {
            return false;
        };
        piece.bottom_blocks().iter().any(|b| {
            b.row == NUM_ROWS as i8 - 1 || self.grid.is_occupied(b.column, b.row + 1)
        })
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one gravity step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fall {
    /// No falling piece
    Idle,
    /// Moved down one row and still airborne
    Moved,
    /// Settled into the grid (possibly right after moving down)
    Landed,
    /// No legal placement left; the round ended
    Ended,
}

/// Result of one line-clearing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    /// Removed rows, bottom-most first; each row's blocks in column order
    pub cleared: Vec<Vec<Block>>,
    /// Per column (columns with nothing to report are omitted), every block that was
    /// lowered, at its new position
    pub fallen: Vec<Vec<Block>>,
}

impl LineClear {
    pub fn lines(&self) -> usize {
        self.cleared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }
}

/// The rules engine
///
/// Generic over the notification sink and the randomness source so hosts can plug in
/// their own and tests can script piece sequences.
#[derive(Debug, Clone)]
pub struct Game<O = EventLog, R = SimpleRng> {
    state: GameState,
    rules: Rules,
    observer: O,
    rng: R,
}

impl Game<EventLog, SimpleRng> {
    /// Game with default rules, an event log and a seeded LCG
    pub fn seeded(seed: u32) -> Self {
        Self::new(EventLog::new(), SimpleRng::new(seed))
    }
}

impl<O: GameObserver, R: RandomSource> Game<O, R> {
    pub fn new(observer: O, rng: R) -> Self {
        Self::with_rules(Rules::default(), observer, rng)
    }

    pub fn with_rules(rules: Rules, observer: O, rng: R) -> Self {
        Self {
            state: GameState::new(),
            rules,
            observer,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    /// Direct grid access for hosts that seed boards (puzzles, tests)
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.state.grid
    }

    pub fn falling(&self) -> Option<&Piece> {
        self.state.falling.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.state.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn is_illegal_placement(&self) -> bool {
        self.state.is_illegal_placement()
    }

    pub fn is_touching(&self) -> bool {
        self.state.is_touching()
    }

    /// Install `piece` as the falling piece.
    /// Returns false (and changes nothing) if it would be illegal.
    pub fn place_falling(&mut self, piece: Piece) -> bool {
        if !self.state.fits(&piece) {
            return false;
        }
        self.state.falling = Some(piece);
        true
    }

    fn random_piece_at_preview(&mut self) -> Piece {
        Piece::random(self.rules.preview_column, self.rules.preview_row, &mut self.rng)
    }

    /// Start a round: make sure a preview piece exists, then notify.
    /// Does not create a falling piece; call [`Game::spawn_next`] for that.
    pub fn begin_game(&mut self) {
        if self.state.next.is_none() {
            self.state.next = Some(self.random_piece_at_preview());
        }
        debug!(
            "game began (score {}, level {})",
            self.state.score, self.state.level
        );
        self.observer.game_did_begin(&self.state);
    }

    /// Promote the preview piece to falling and generate a new preview piece.
    ///
    /// Returns copies of the new (falling, next) pair. Returns `None` when there was no
    /// preview piece (one is generated for the following call) or when the promoted piece
    /// does not fit at the starting anchor, in which case it goes back to the preview
    /// slot and the game ends.
    pub fn spawn_next(&mut self) -> Option<(Piece, Piece)> {
        let Some(mut promoted) = self.state.next.take() else {
            debug!("spawn requested without a preview piece");
            self.state.falling = None;
            self.state.next = Some(self.random_piece_at_preview());
            return None;
        };

        promoted.move_to(self.rules.starting_column, self.rules.starting_row);
        let next = self.random_piece_at_preview();
        self.state.falling = Some(promoted);
        self.state.next = Some(next);

        if self.state.is_illegal_placement() {
            debug!("spawn blocked for {promoted}");
            self.state.falling = None;
            promoted.move_to(self.rules.preview_column, self.rules.preview_row);
            self.state.next = Some(promoted);
            self.end_game();
            return None;
        }

        Some((promoted, next))
    }

    fn shift_falling(&mut self, columns: i8, rows: i8) {
        if let Some(piece) = self.state.falling.as_mut() {
            piece.shift_by(columns, rows);
        }
    }

    /// Apply `change` to the falling piece; if that makes the placement illegal, apply
    /// `undo` and report false.
    fn try_change(
        &mut self,
        change: impl FnOnce(&mut Piece),
        undo: impl FnOnce(&mut Piece),
    ) -> bool {
        let Some(piece) = self.state.falling.as_mut() else {
            return false;
        };
        change(piece);
        if self.state.is_illegal_placement() {
            if let Some(piece) = self.state.falling.as_mut() {
                undo(piece);
            }
            return false;
        }
        true
    }

    /// One gravity step
    pub fn advance_one_step(&mut self) -> Fall {
        if self.state.falling.is_none() {
            return Fall::Idle;
        }

        if !self.try_change(Piece::lower_by_one_row, Piece::raise_by_one_row) {
            if self.state.is_illegal_placement() {
                // Not even the row it came from is free.
                self.state.falling = None;
                self.end_game();
                return Fall::Ended;
            }
            self.settle();
            return Fall::Landed;
        }

        self.observer.game_shape_did_move(&self.state);
        if self.state.is_touching() {
            self.settle();
            return Fall::Landed;
        }
        Fall::Moved
    }

    /// Rotate the falling piece; an illegal result is rotated straight back
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        let moved = self.try_change(|p| p.rotate(clockwise), |p| p.rotate(!clockwise));
        if moved {
            self.observer.game_shape_did_move(&self.state);
        }
        moved
    }

    pub fn rotate_clockwise(&mut self) -> bool {
        self.rotate(true)
    }

    pub fn move_left(&mut self) -> bool {
        let moved = self.try_change(
            Piece::shift_left_by_one_column,
            Piece::shift_right_by_one_column,
        );
        if moved {
            self.observer.game_shape_did_move(&self.state);
        }
        moved
    }

    pub fn move_right(&mut self) -> bool {
        let moved = self.try_change(
            Piece::shift_right_by_one_column,
            Piece::shift_left_by_one_column,
        );
        if moved {
            self.observer.game_shape_did_move(&self.state);
        }
        moved
    }

    /// Drop the falling piece to its resting row and notify.
    ///
    /// The piece is not settled here; the host follows up with
    /// [`Game::advance_one_step`] (or [`Game::settle`]).
    pub fn hard_drop(&mut self) -> bool {
        if self.state.falling.is_none() {
            return false;
        }
        while !self.state.is_illegal_placement() {
            self.shift_falling(0, 1);
        }
        self.shift_falling(0, -1);
        self.observer.game_shape_did_drop(&self.state);
        true
    }

    /// Move the falling piece's blocks into the grid and notify.
    ///
    /// Returns false and leaves everything untouched when there is no falling piece or it
    /// does not fit (off the grid, or on top of a block placed through [`Game::grid_mut`]).
    pub fn settle(&mut self) -> bool {
        if self.state.is_illegal_placement() {
            debug!("refusing to settle an illegal placement");
            return false;
        }
        let Some(piece) = self.state.falling.take() else {
            return false;
        };
        trace!("settling {piece}");
        for block in piece.into_blocks() {
            self.state.grid.place(block);
        }
        self.observer.game_shape_did_land(&self.state);
        true
    }

    /// Remove every full row (row 0 excluded), score them, and let the blocks above fall.
    pub fn clear_completed_lines(&mut self) -> LineClear {
        let rows = NUM_ROWS as i8;

        // Row 0 is never checked.
        let mut cleared = Vec::new();
        for row in (1..rows).rev() {
            if self.state.grid.is_row_full(row) {
                cleared.push(self.state.grid.take_row(row));
            }
        }

        if cleared.is_empty() {
            return LineClear::default();
        }

        let result = calculate_score(
            cleared.len(),
            self.state.score,
            self.state.level,
            &self.rules,
        );
        self.state.score = result.score;
        debug!(
            "cleared {} line(s) for {} points, score {}",
            cleared.len(),
            result.points,
            result.score
        );
        if result.leveled_up {
            self.state.level = result.level;
            debug!("level up to {}", result.level);
            self.observer.game_did_level_up(&self.state);
        }

        let lowest_cleared = cleared[0][0].row;
        let fallen = self.compact_above(lowest_cleared);

        LineClear { cleared, fallen }
    }

    /// Lower every block from `floor - 1` up to row 1 as far as its column allows
    fn compact_above(&mut self, floor: i8) -> Vec<Vec<Block>> {
        let grid = &mut self.state.grid;
        let last_row = NUM_ROWS as i8 - 1;
        let mut fallen = Vec::new();

        for column in 0..NUM_COLUMNS as i8 {
            let mut column_fallen = Vec::new();
            for row in (1..floor).rev() {
                if !grid.is_occupied(column, row) {
                    continue;
                }
                let mut new_row = row;
                while new_row < last_row && grid.is_vacant(column, new_row + 1) {
                    new_row += 1;
                }
                if let Some(block) = grid.move_block(column, row, new_row) {
                    column_fallen.push(block);
                }
            }
            if !column_fallen.is_empty() {
                fallen.push(column_fallen);
            }
        }

        fallen
    }

    /// Clear lines until a pass clears nothing, returning every non-empty pass in order
    pub fn resolve_landing(&mut self) -> Vec<LineClear> {
        let mut passes = Vec::new();
        loop {
            let pass = self.clear_completed_lines();
            if pass.is_empty() {
                break;
            }
            passes.push(pass);
        }
        passes
    }

    /// Drop any falling piece, reset score and level, then notify. The grid is left as is.
    pub fn end_game(&mut self) {
        debug!(
            "game ended at score {}, level {}",
            self.state.score, self.state.level
        );
        self.state.falling = None;
        self.state.score = 0;
        self.state.level = 1;
        self.observer.game_did_end(&self.state);
    }

    /// Empty the grid, returning the removed blocks grouped by row (one list per row)
    pub fn clear_all_cells(&mut self) -> Vec<Vec<Block>> {
        self.state.grid.take_all()
    }

    /// Apply a host intent. Hard drop is followed by the settling step.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::HardDrop => {
                if !self.hard_drop() {
                    return false;
                }
                self.advance_one_step();
                true
            }
            GameAction::Tick => self.advance_one_step() != Fall::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::GameEvent;
    use crate::rng::SequenceRng;
    use crate::types::{BlockColor, Orientation, ShapeKind};

    fn scripted(pieces: &[(ShapeKind, BlockColor, Orientation)]) -> Game<EventLog, SequenceRng> {
        Game::new(EventLog::new(), SequenceRng::from_pieces(pieces))
    }

    fn fill_row(game: &mut Game<EventLog, SequenceRng>, row: i8) {
        for column in 0..NUM_COLUMNS as i8 {
            let color = BlockColor::ALL[column as usize % BlockColor::ALL.len()];
            game.grid_mut().place(Block::new(column, row, color));
        }
    }

    #[test]
    fn test_new_game_state() {
        let game = Game::seeded(12345);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.falling().is_none());
        assert!(game.next().is_none());
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_begin_game_creates_preview_only() {
        let mut game = scripted(&[(ShapeKind::T, BlockColor::Red, Orientation::Zero)]);
        game.begin_game();
        let next = game.next().unwrap();
        assert_eq!((next.column(), next.row()), (12, 1));
        assert_eq!(next.kind(), ShapeKind::T);
        assert!(game.falling().is_none());
        assert_eq!(game.observer().events(), &[GameEvent::Began]);
    }

    #[test]
    fn test_begin_game_keeps_existing_preview() {
        let mut game = scripted(&[
            (ShapeKind::T, BlockColor::Red, Orientation::Zero),
            (ShapeKind::Line, BlockColor::Blue, Orientation::Zero),
        ]);
        game.begin_game();
        game.begin_game();
        assert_eq!(game.next().unwrap().kind(), ShapeKind::T);
    }

    #[test]
    fn test_spawn_next_promotes_preview() {
        let mut game = scripted(&[
            (ShapeKind::J, BlockColor::Teal, Orientation::Ninety),
            (ShapeKind::S, BlockColor::Yellow, Orientation::Zero),
        ]);
        game.begin_game();
        let (falling, next) = game.spawn_next().unwrap();
        assert_eq!(falling.kind(), ShapeKind::J);
        assert_eq!(falling.orientation(), Orientation::Ninety);
        assert_eq!((falling.column(), falling.row()), (4, 0));
        assert_eq!(next.kind(), ShapeKind::S);
        assert_eq!((next.column(), next.row()), (12, 1));
        assert_eq!(game.falling(), Some(&falling));
        assert_eq!(game.next(), Some(&next));
    }

    #[test]
    fn test_spawn_without_preview_returns_none() {
        let mut game = scripted(&[(ShapeKind::T, BlockColor::Red, Orientation::Zero)]);
        assert!(game.spawn_next().is_none());
        assert!(game.falling().is_none());
        assert!(game.next().is_some());
        assert!(game.observer().events().is_empty());
    }

    #[test]
    fn test_try_change_rolls_back() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        let piece = Piece::new(ShapeKind::Square, 0, 5, BlockColor::Red, Orientation::Zero);
        assert!(game.place_falling(piece));

        assert!(!game.move_left());
        assert_eq!(game.falling(), Some(&piece));
        assert!(game.observer().events().is_empty());
    }

    #[test]
    fn test_place_falling_rejects_illegal() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        game.grid_mut().place(Block::new(1, 6, BlockColor::Blue));
        let piece = Piece::new(ShapeKind::Square, 0, 5, BlockColor::Red, Orientation::Zero);
        assert!(!game.place_falling(piece));
        assert!(game.falling().is_none());
    }

    #[test]
    fn test_rotate_blocked_by_wall() {
        let mut game = scripted(&[(ShapeKind::Line, BlockColor::Red, Orientation::Zero)]);
        // Vertical line against the left wall; horizontal needs column -1.
        let piece = Piece::new(ShapeKind::Line, 0, 5, BlockColor::Red, Orientation::Zero);
        assert!(game.place_falling(piece));

        assert!(!game.rotate(true));
        assert_eq!(game.falling().unwrap().orientation(), Orientation::Zero);
        assert_eq!(game.falling(), Some(&piece));
    }

    #[test]
    fn test_hard_drop_does_not_settle() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        let piece = Piece::new(ShapeKind::Square, 4, 0, BlockColor::Red, Orientation::Zero);
        assert!(game.place_falling(piece));

        assert!(game.hard_drop());
        let dropped = game.falling().unwrap();
        assert_eq!(dropped.row(), 18);
        assert!(game.grid().is_empty());
        assert_eq!(game.observer().events(), &[GameEvent::ShapeDropped]);

        assert_eq!(game.advance_one_step(), Fall::Landed);
        assert_eq!(game.grid().len(), 4);
        assert!(game.falling().is_none());
    }

    #[test]
    fn test_settle_refuses_overlapping_piece() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        let piece = Piece::new(ShapeKind::Square, 4, 5, BlockColor::Red, Orientation::Zero);
        assert!(game.place_falling(piece));
        let underneath = Block::new(5, 6, BlockColor::Teal);
        game.grid_mut().place(underneath);

        assert!(!game.settle());
        assert_eq!(game.falling(), Some(&piece));
        assert_eq!(game.grid().len(), 1);
        assert_eq!(game.grid().get(5, 6).map(Block::color), Some(BlockColor::Teal));
        assert!(game.observer().events().is_empty());
    }

    #[test]
    fn test_row_zero_is_never_cleared() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        fill_row(&mut game, 0);
        let result = game.clear_completed_lines();
        assert!(result.is_empty());
        assert_eq!(game.grid().len(), NUM_COLUMNS as usize);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_resolve_landing_stops_when_nothing_clears() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        fill_row(&mut game, 19);
        fill_row(&mut game, 17);
        let passes = game.resolve_landing();
        assert_eq!(passes.len(), 1);
        assert_eq!(passes[0].lines(), 2);
        assert_eq!(game.score(), 20);
        assert!(game.grid().is_empty());
    }

    #[test]
    fn test_end_game_keeps_grid() {
        let mut game = scripted(&[(ShapeKind::Square, BlockColor::Red, Orientation::Zero)]);
        game.grid_mut().place(Block::new(2, 19, BlockColor::Blue));
        let piece = Piece::new(ShapeKind::Square, 4, 3, BlockColor::Red, Orientation::Zero);
        assert!(game.place_falling(piece));
        game.end_game();
        assert_eq!(game.grid().len(), 1);
        assert!(game.falling().is_none());
        assert_eq!(game.observer().events(), &[GameEvent::Ended]);
    }

    #[test]
    fn test_apply_action_hard_drop_settles() {
        let mut game = scripted(&[(ShapeKind::T, BlockColor::Purple, Orientation::Zero)]);
        game.begin_game();
        game.spawn_next().unwrap();
        assert!(game.apply_action(GameAction::HardDrop));
        assert!(game.falling().is_none());
        assert_eq!(game.grid().len(), 4);
        assert_eq!(
            game.observer_mut().drain(),
            vec![GameEvent::Began, GameEvent::ShapeDropped, GameEvent::ShapeLanded]
        );
    }

    #[test]
    fn test_apply_action_without_piece() {
        let mut game = Game::seeded(1);
        assert!(!game.apply_action(GameAction::Tick));
        assert!(!game.apply_action(GameAction::MoveLeft));
        assert!(!game.apply_action(GameAction::HardDrop));
    }
}
