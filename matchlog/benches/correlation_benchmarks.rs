use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use matchlog::pearson;

fn series(len: usize, seed: f64) -> Vec<f64> {
    // Deterministic pseudo-variation, enough to avoid the zero-variance guard
    (0..len)
        .map(|i| seed + (i as f64 * 0.7).sin() * 10.0 + i as f64 * 0.01)
        .collect()
}

fn benchmark_pearson(c: &mut Criterion) {
    let mut group = c.benchmark_group("pearson");

    for len in [100, 1_000, 10_000] {
        let x = series(len, 3.0);
        let y = series(len, 40.0);

        group.bench_with_input(
            BenchmarkId::new("correlate", format!("{len}pairs")),
            &(x, y),
            |b, (x, y)| b.iter(|| pearson(black_box(x), black_box(y))),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_pearson);
criterion_main!(benches);
