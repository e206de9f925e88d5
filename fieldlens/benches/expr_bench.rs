//! Benchmarks for bin-expression construction and numeric display helpers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use fieldlens::formatters::group_thousands;
use fieldlens::query::bin_assignment_expr;

fn bench_bin_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_assignment_expr");

    for bins in [20usize, 100] {
        let bounds: Vec<f64> = (1..=bins).map(|i| 10.0 + i as f64 * 0.5).collect();
        group.bench_function(format!("build_and_render_{bins}"), |b| {
            b.iter(|| {
                let expr = bin_assignment_expr(black_box("orders.price"), black_box(&bounds));
                black_box(expr.render())
            })
        });
    }

    group.finish();
}

fn bench_group_thousands(c: &mut Criterion) {
    c.bench_function("group_thousands", |b| {
        b.iter(|| {
            black_box(group_thousands(black_box(1234567.25)));
            black_box(group_thousands(black_box(165.0)));
        })
    });
}

criterion_group!(benches, bench_bin_assignment, bench_group_thousands);
criterion_main!(benches);
