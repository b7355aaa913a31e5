use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minecweeper_core::*;

fn flood_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_fill");

    group.bench_function("empty_255x255", |b| {
        // the walled-in corner keeps the flood from winning, so undo stays legal
        let mines = [(253, 253), (254, 253), (253, 254)];
        let board = Board::from_mine_coords((255, 255), &mines).unwrap();
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.reveal(black_box((0, 0))).unwrap());
            black_box(board.undo().unwrap());
        })
    });

    group.bench_function("hard_preset_first_zero", |b| {
        let board = Board::new_random(Difficulty::Hard.config(), 0xC0FFEE).unwrap();
        let (width, height) = board.size();
        let start = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .find(|&coords| board.cell_at(coords).unwrap().is_empty_safe())
            .unwrap_or((0, 0));
        b.iter(|| {
            let mut board = board.clone();
            black_box(board.reveal(black_box(start)).unwrap());
        })
    });

    group.finish();
}

fn initialize(c: &mut Criterion) {
    c.bench_function("initialize_hard", |b| {
        let mut board = Board::default();
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            board
                .initialize(Difficulty::Hard.config(), RandomMinefieldGenerator::new(seed))
                .unwrap();
        })
    });
}

criterion_group!(benches, flood_fill, initialize);
criterion_main!(benches);
