//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management of the falling-block
//! engine. It has **no dependencies** on rendering, input devices, audio or I/O, making it:
//!
//! - **Deterministic**: randomness is injected, so the same source produces identical games
//! - **Testable**: every rule is a plain synchronous method on an owned value
//! - **Portable**: any host (terminal, GUI, headless) drives it the same way
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 container of settled blocks
//! - [`block`]: a single colored square
//! - [`shapes`]: per-kind, per-orientation offsets and bottom-block sets
//! - [`piece`]: the movable four-block aggregate
//! - [`rng`]: injected random source and piece randomization
//! - [`scoring`]: line-clear points and leveling
//! - [`observer`]: notifications from engine to host
//! - [`game`]: the rules engine
//! - [`snapshot`]: plain-data copies of the engine state
//!
//! # Game Rules
//!
//! - **Legality**: a falling piece may never leave the grid or overlap a settled block.
//!   Moves and rotations are tried and rolled back when illegal; there are no wall kicks.
//! - **Landing**: a piece settles when gravity cannot lower it, or right after a step that
//!   leaves one of its bottom blocks on the floor or on a settled block.
//! - **Line clears**: full rows (row 0 excepted) are removed and blocks above fall into the gaps.
//! - **Scoring**: `lines * 10 * level`; reaching `level * 1000` raises the level by one.
//! - **Game over**: a promoted piece that does not fit at the starting anchor ends the round.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Fall, Game, GameEvent};
//!
//! let mut game = Game::seeded(12345);
//! game.begin_game();
//! game.spawn_next().expect("empty board has room");
//!
//! game.move_right();
//! game.rotate(true);
//! game.hard_drop();
//! assert_eq!(game.advance_one_step(), Fall::Landed);
//!
//! let passes = game.resolve_landing();
//! assert!(passes.is_empty());
//! assert!(game.observer().contains(GameEvent::ShapeLanded));
//! ```

pub mod block;
pub mod game;
pub mod grid;
pub mod observer;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use block::{Block, SpriteHandle};
pub use game::{Fall, Game, GameState, LineClear};
pub use grid::Grid;
pub use observer::{EventLog, GameEvent, GameObserver, NullObserver};
pub use piece::Piece;
pub use rng::{RandomSource, SequenceRng, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use shapes::{get_bottom_indices, get_layout, get_offsets, ShapeLayout};
pub use snapshot::{GameSnapshot, PieceSnapshot};
