use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{Block, Fall, Game, Grid, Piece};
use blockfall::types::{BlockColor, GameAction, Orientation, ShapeKind};

fn bench_gravity_step(c: &mut Criterion) {
    let mut game = Game::seeded(12345);
    game.begin_game();
    game.spawn_next();

    c.bench_function("advance_one_step", |b| {
        b.iter(|| {
            if game.advance_one_step() != Fall::Moved {
                game.resolve_landing();
                if game.spawn_next().is_none() {
                    game.clear_all_cells();
                    game.begin_game();
                    game.spawn_next();
                }
            }
            game.observer_mut().clear();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut game = Game::seeded(1);
            for row in 16..20 {
                for column in 0..10 {
                    game.grid_mut().place(Block::new(column, row, BlockColor::Blue));
                }
            }
            game.grid_mut().place(Block::new(3, 10, BlockColor::Red));
            black_box(game.clear_completed_lines());
        })
    });
}

fn bench_spawn(c: &mut Criterion) {
    let mut game = Game::seeded(12345);
    game.begin_game();

    c.bench_function("spawn_next", |b| {
        b.iter(|| {
            black_box(game.spawn_next());
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut game = Game::seeded(12345);
    game.begin_game();
    game.spawn_next();

    c.bench_function("move_left_right", |b| {
        b.iter(|| {
            game.apply_action(black_box(GameAction::MoveLeft));
            game.apply_action(black_box(GameAction::MoveRight));
            game.observer_mut().clear();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut game = Game::seeded(12345);
    game.begin_game();
    game.spawn_next();
    game.advance_one_step();

    c.bench_function("rotate", |b| {
        b.iter(|| {
            game.rotate(black_box(true));
            game.observer_mut().clear();
        })
    });
}

fn bench_piece_rotation(c: &mut Criterion) {
    let mut piece = Piece::new(ShapeKind::T, 4, 5, BlockColor::Purple, Orientation::Zero);

    c.bench_function("piece_rotate_clockwise", |b| {
        b.iter(|| {
            piece.rotate_clockwise();
            black_box(piece.bottom_blocks());
        })
    });
}

fn bench_grid_row_scan(c: &mut Criterion) {
    let mut grid = Grid::new();
    for row in 10..20 {
        for column in 0..9 {
            grid.place(Block::new(column, row, BlockColor::Orange));
        }
    }

    c.bench_function("is_row_full_scan", |b| {
        b.iter(|| (0..20).filter(|&row| grid.is_row_full(black_box(row))).count())
    });
}

criterion_group!(
    benches,
    bench_gravity_step,
    bench_line_clear,
    bench_spawn,
    bench_move,
    bench_rotate,
    bench_piece_rotation,
    bench_grid_row_scan
);
criterion_main!(benches);
