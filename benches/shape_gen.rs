//! Benchmarks for shape generation and the per-frame scene tick.
//!
//! Run with: `cargo bench`

use aion::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let count = 18_000;

    for shape in Shape::ALL {
        group.bench_with_input(BenchmarkId::new(shape.id(), count), &count, |b, &count| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(shape.generate(count, &mut rng)))
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_tick");

    for count in [2_000, 18_000] {
        let config = SceneConfig {
            particle_count: count,
            seed: Some(1),
            ..SceneConfig::default()
        };

        group.bench_with_input(BenchmarkId::new("normal", count), &config, |b, config| {
            let mut scene = Scene::new(config);
            let mut board = HudBoard::new();
            b.iter(|| scene.tick(black_box(1.0 / 60.0), &mut board))
        });

        group.bench_with_input(BenchmarkId::new("scan", count), &config, |b, config| {
            let mut scene = Scene::new(config);
            let mut board = HudBoard::new();
            b.iter(|| {
                // Keep the wave pass running
                if !scene.is_scanning() {
                    scene.activate_scan();
                }
                scene.tick(black_box(1.0 / 60.0), &mut board)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_tick);
criterion_main!(benches);
