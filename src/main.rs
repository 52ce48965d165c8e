//! Headless host (default binary).
//!
//! Drives the engine the way an interactive front end would: begin, spawn, tick, react to
//! landings by clearing lines until nothing clears, speed up on level-up, and on game over
//! sweep the board and begin again. A seeded random player stands in for touch input and
//! time is simulated, so runs are reproducible.

use std::io::{self, Write};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::{debug, info};

use blockfall::core::{EventLog, Fall, Game, GameEvent, RandomSource, SimpleRng};
use blockfall::types::{
    next_tick_length_ms, GameAction, Rules, LEVEL_THRESHOLD, NUM_COLUMNS, NUM_ROWS,
    POINTS_PER_LINE, STARTING_COLUMN, STARTING_ROW, TICK_LENGTH_LEVEL_ONE_MS,
};

#[derive(Debug, Parser)]
#[command(name = "blockfall")]
#[command(about = "Play falling-block rounds headlessly with a random player")]
struct Cli {
    /// Seed for piece generation (the player uses the next seed up)
    #[arg(long, default_value_t = 1)]
    seed: u32,
    /// Number of rounds to play
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Give up on a round after this many gravity ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
    /// Chance in percent that the player acts before a tick
    #[arg(long, default_value_t = 60)]
    activity: u32,
    #[arg(long, default_value_t = STARTING_COLUMN)]
    starting_column: i8,
    #[arg(long, default_value_t = STARTING_ROW)]
    starting_row: i8,
    #[arg(long, default_value_t = POINTS_PER_LINE)]
    points_per_line: u32,
    #[arg(long, default_value_t = LEVEL_THRESHOLD)]
    level_threshold: u32,
    /// Print the board as it stood when each round ended
    #[arg(long, default_value_t = false)]
    print_board: bool,
}

impl Cli {
    fn rules(&self) -> Result<Rules> {
        ensure!(
            (0..NUM_COLUMNS as i8).contains(&self.starting_column),
            "starting column {} is outside 0..{}",
            self.starting_column,
            NUM_COLUMNS
        );
        ensure!(
            (0..NUM_ROWS as i8).contains(&self.starting_row),
            "starting row {} is outside 0..{}",
            self.starting_row,
            NUM_ROWS
        );
        ensure!(self.points_per_line > 0, "points per line must be positive");
        ensure!(self.level_threshold > 0, "level threshold must be positive");
        ensure!(self.activity <= 100, "activity is a percentage");

        Ok(Rules {
            starting_column: self.starting_column,
            starting_row: self.starting_row,
            points_per_line: self.points_per_line,
            level_threshold: self.level_threshold,
            ..Rules::default()
        })
    }
}

#[derive(Debug, Default)]
struct RoundSummary {
    pieces: u32,
    lines: usize,
    score: u32,
    level: u32,
    ticks: u64,
    elapsed_ms: u64,
    ended: bool,
    board: String,
}

fn player_action(player: &mut SimpleRng) -> GameAction {
    match player.next_range(8) {
        0 | 1 => GameAction::MoveLeft,
        2 | 3 => GameAction::MoveRight,
        4 | 5 => GameAction::RotateCw,
        6 => GameAction::RotateCcw,
        _ => GameAction::HardDrop,
    }
}

fn play_round(
    game: &mut Game<EventLog, SimpleRng>,
    player: &mut SimpleRng,
    cli: &Cli,
) -> RoundSummary {
    let mut summary = RoundSummary {
        level: game.level(),
        ..RoundSummary::default()
    };
    let mut tick_ms = TICK_LENGTH_LEVEL_ONE_MS;

    game.begin_game();
    if game.spawn_next().is_some() {
        summary.pieces += 1;
    }

    while summary.ticks < cli.max_ticks {
        for event in game.observer_mut().drain() {
            match event {
                GameEvent::Ended => summary.ended = true,
                GameEvent::LeveledUp { level } => {
                    tick_ms = next_tick_length_ms(tick_ms);
                    info!("level {level}, tick {tick_ms}ms");
                }
                _ => {}
            }
        }
        if summary.ended {
            break;
        }

        if player.next_range(100) < cli.activity {
            let action = player_action(player);
            debug!("player {}", action.as_str());
            game.apply_action(action);
        }
        if game.falling().is_some() {
            summary.ticks += 1;
            summary.elapsed_ms += u64::from(tick_ms);
            if game.advance_one_step() == Fall::Ended {
                continue;
            }
        }

        if game.falling().is_none() && !game.observer().contains(GameEvent::Ended) {
            for pass in game.resolve_landing() {
                summary.lines += pass.lines();
            }
            summary.score = game.score();
            summary.level = game.level();
            if game.spawn_next().is_some() {
                summary.pieces += 1;
            }
        }
    }

    summary.board = game.grid().to_string();
    if !summary.ended {
        // Out of ticks mid-round: close it so the next round starts from scratch.
        game.end_game();
        game.observer_mut().clear();
    }
    let swept: usize = game.clear_all_cells().iter().map(Vec::len).sum();
    debug!("swept {swept} blocks");
    summary
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let rules = cli.rules()?;

    let mut game = Game::with_rules(rules, EventLog::new(), SimpleRng::new(cli.seed));
    let mut player = SimpleRng::new(cli.seed.wrapping_add(1));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for round in 1..=cli.games {
        let summary = play_round(&mut game, &mut player, &cli);
        if summary.ended {
            info!("round {round} over after {} pieces", summary.pieces);
        } else {
            info!("round {round} stopped at the tick limit");
        }

        writeln!(
            out,
            "round {round}: pieces={} lines={} score={} level={} ticks={} time={}ms{}",
            summary.pieces,
            summary.lines,
            summary.score,
            summary.level,
            summary.ticks,
            summary.elapsed_ms,
            if summary.ended { "" } else { " (unfinished)" }
        )
        .context("writing round summary")?;
        if cli.print_board {
            write!(out, "{}", summary.board).context("writing board")?;
        }
    }

    Ok(())
}
