//! Benchmarks for the symbol → domain → reshape pipeline.
//!
//! Run with `cargo bench --bench domain_construction`.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use delaney::prelude::*;

const HEXAGONAL_TORUS: &str = "<1.1:12:2 4 6 8 10 12,12 3 5 7 9 11,8 7 10 9 12 11:6,3 3>";
const HEPTAGONAL: &str = "<1.1:1:1,1,1:7,3>";

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("symbol_parse");
    group.bench_function("hexagonal_torus", |b| {
        b.iter(|| black_box(HEXAGONAL_TORUS).parse::<DSymbol>().unwrap());
    });
    group.bench_function("round_trip", |b| {
        let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
        b.iter(|| black_box(&symbol).to_string().parse::<DSymbol>().unwrap());
    });
    group.finish();
}

fn bench_invariants(c: &mut Criterion) {
    let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
    let mut group = c.benchmark_group("invariants");
    group.bench_function("curvature_and_geometry", |b| {
        b.iter(|| black_box(&symbol).geometry());
    });
    group.bench_function("group_name", |b| {
        b.iter(|| black_box(&symbol).group_name());
    });
    group.bench_function("max_symmetry", |b| {
        b.iter(|| black_box(&symbol).max_symmetry());
    });
    group.finish();
}

fn bench_domain_build(c: &mut Criterion) {
    let flat: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
    let hyperbolic: DSymbol = HEPTAGONAL.parse().unwrap();
    let mut group = c.benchmark_group("domain_build");
    group.bench_function("hexagonal_torus", |b| {
        b.iter(|| FundamentalDomain::build(black_box(&flat)));
    });
    group.bench_function("heptagonal", |b| {
        b.iter(|| FundamentalDomain::build(black_box(&hyperbolic)));
    });
    group.finish();
}

fn bench_reshape(c: &mut Criterion) {
    let symbol: DSymbol = HEXAGONAL_TORUS.parse().unwrap();
    let mut group = c.benchmark_group("reshape");
    group.bench_function("drag_frame", |b| {
        let mut domain = FundamentalDomain::build(&symbol);
        let mut solver = ReshapeSolver::default();
        solver.begin_drag(&domain, Handle::edge_center(2, FlagId::from_number(1)));
        b.iter(|| solver.drag(&mut domain, black_box(0.0005), black_box(-0.0003)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_invariants,
    bench_domain_build,
    bench_reshape
);
criterion_main!(benches);
