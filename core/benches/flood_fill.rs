use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use minesweeper_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn open_board_reveal(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    for size in [32, 128, 512] {
        group.bench_function(format!("empty_{size}x{size}"), |b| {
            b.iter_batched(
                || {
                    let grid = Grid::from_bomb_coords(size, &[(size - 1, size - 1)]).unwrap();
                    Minesweeper::from_grid(grid, (), SmallRng::seed_from_u64(0))
                },
                |mut game: Minesweeper<()>| game.trigger((0, 0)).unwrap(),
                BatchSize::LargeInput,
            )
        });
    }

    group.bench_function("random_128x128_hints", |b| {
        b.iter_batched(
            || Minesweeper::with_seed(GameConfig::new(128, 10.0), 9, ()),
            |mut game| {
                while game.can_hint() {
                    game.hint().unwrap();
                }
                game
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, open_board_reveal);
criterion_main!(benches);
