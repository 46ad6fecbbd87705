use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blast::core::{
    collapse_and_refill, find_group, has_any_move, remove_group, smart_shuffle, Board,
    BoardConfig, Grid, RandomSource, SimpleRng, SpawnOrigin,
};
use tui_blast::types::ColorId;

fn random_grid(rows: i32, columns: i32, colors: ColorId, seed: u32) -> Grid {
    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::new(rows, columns).unwrap();
    for row in 0..rows {
        for col in 0..columns {
            grid.spawn(row, col, rng.next_below(colors as u32) as ColorId)
                .unwrap();
        }
    }
    grid
}

fn bench_find_group(c: &mut Criterion) {
    // Two colors on a big board make large groups.
    let mut grid = random_grid(64, 64, 2, 12345);

    c.bench_function("find_group_64x64", |b| {
        b.iter(|| find_group(&mut grid, black_box(32), black_box(32)).unwrap())
    });
}

fn bench_collapse(c: &mut Criterion) {
    let template = random_grid(20, 20, 3, 12345);
    let mut rng = SimpleRng::new(7);

    c.bench_function("remove_and_collapse_20x20", |b| {
        b.iter(|| {
            let mut grid = template.clone();
            let group = find_group(&mut grid, 10, 10).unwrap();
            remove_group(&mut grid, &group).unwrap();
            collapse_and_refill(
                &mut grid,
                &mut rng,
                3,
                SpawnOrigin::FixedOffset { rows_above: 2 },
            )
            .unwrap()
        })
    });
}

fn bench_has_any_move(c: &mut Criterion) {
    // Worst case: a locked board is scanned to the end.
    let cells: Vec<Vec<Option<ColorId>>> = (0..64)
        .map(|r| (0..64).map(|c| Some(((r + 2 * c) % 3) as ColorId)).collect())
        .collect();
    let locked = Grid::from_cells(&cells).unwrap();

    c.bench_function("has_any_move_locked_64x64", |b| {
        b.iter(|| has_any_move(black_box(&locked)))
    });
}

fn bench_shuffle(c: &mut Criterion) {
    let template = random_grid(20, 20, 5, 99);
    let mut rng = SimpleRng::new(3);

    c.bench_function("smart_shuffle_20x20", |b| {
        b.iter(|| {
            let mut grid = template.clone();
            smart_shuffle(&mut grid, &mut rng).unwrap()
        })
    });
}

fn bench_click_cycle(c: &mut Criterion) {
    let mut board = Board::new(BoardConfig::default().with_seed(12345)).unwrap();

    c.bench_function("click_cycle_10x10", |b| {
        b.iter(|| {
            if let Some((target, _)) = board.hint() {
                let _ = board.click(target.row, target.col);
            }
            board.animation_finished();
        })
    });
}

criterion_group!(
    benches,
    bench_find_group,
    bench_collapse,
    bench_has_any_move,
    bench_shuffle,
    bench_click_cycle
);
criterion_main!(benches);
