use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_function(difficulty.name(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                RandomMinefieldGenerator::new(black_box(seed))
                    .generate(config)
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_flood_fill(c: &mut Criterion) {
    // single mine in the far corner, one reveal opens everything else
    let size = (255, 255);
    let minefield = MineField::from_mine_coords(size, &[(254, 254)]).unwrap();

    c.bench_function("flood_fill_255x255", |b| {
        b.iter(|| {
            let mut game = GameSession::from_minefield(minefield.clone(), 0);
            black_box(game.reveal(black_box((0, 0))))
        })
    });
}

criterion_group!(benches, bench_generate, bench_flood_fill);
criterion_main!(benches);
