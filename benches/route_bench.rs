//! Benchmarks for route resolution
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mortimer::router::{routes, RouteParams};

fn bench_resolve(c: &mut Criterion) {
    let table = routes("/mortimer/").unwrap();
    let mut group = c.benchmark_group("resolve");

    for path in [
        "/mortimer/",
        "/mortimer/sessions/Screening-20220617",
        "/mortimer/sessions/Screening-20220617/grid/3",
        "/mortimer/sessions/Screening%2020220617/grid/3?view=images",
        "/mortimer/no/such/page",
    ] {
        group.bench_function(path, |b| b.iter(|| table.resolve(black_box(path))));
    }

    group.finish();
}

fn bench_href(c: &mut Criterion) {
    let table = routes("/mortimer/").unwrap();
    let params = RouteParams::new()
        .with("session", "Screening 20220617")
        .with("grid", "3");

    c.bench_function("href_grid_view", |b| {
        b.iter(|| table.href(black_box("gridView"), black_box(&params)))
    });
}

criterion_group!(benches, bench_resolve, bench_href);
criterion_main!(benches);
