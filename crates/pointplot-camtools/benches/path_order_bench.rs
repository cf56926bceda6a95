use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pointplot_camtools::PathOrderer;
use pointplot_core::Point;

/// Deterministic scatter over an A4 sheet
fn scatter(count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let x = (t * 37.0 % 210.0 + t.sin() * 3.0).abs();
            let y = (t * 61.0 % 297.0 + t.cos() * 3.0).abs();
            Point::new(x, y, (i % 256) as f64)
        })
        .collect()
}

fn bench_nearest_neighbor(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_order");

    for size in [100, 1000, 4000].iter() {
        let points = scatter(*size);
        group.bench_function(format!("nearest_neighbor_{}", size), |b| {
            b.iter(|| PathOrderer::nearest_neighbor(black_box(&points)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_nearest_neighbor);
criterion_main!(benches);
