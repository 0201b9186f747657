//! Benchmarks for tangle graph queries
//!
//! Measures performance of:
//! - Ancestor / descendant reachability
//! - Tip detection
//! - Restricted view construction

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tangle_graph::{Graph, NodeId};

/// Node i approves i-1 and i/2: wide enough to make reachability non-trivial.
fn build(size: u64) -> Graph {
    let mut graph = Graph::new();
    for i in 1..size {
        let id = graph.push_node(i as f64, i % 10 == 0);
        let _ = graph.add_edge(id, NodeId(i - 1));
        let _ = graph.add_edge(id, NodeId(i / 2));
    }
    graph
}

fn bench_ancestors(c: &mut Criterion) {
    let mut group = c.benchmark_group("ancestors_of_genesis");

    for &size in &[100u64, 1_000, 10_000] {
        let graph = build(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| g.view().ancestors(black_box(NodeId::GENESIS)))
        });
    }
    group.finish();
}

fn bench_descendants(c: &mut Criterion) {
    let mut group = c.benchmark_group("descendants_of_newest");

    for &size in &[100u64, 1_000, 10_000] {
        let graph = build(size);
        let newest = graph.newest().id();
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| g.view().descendants(black_box(newest)))
        });
    }
    group.finish();
}

fn bench_tips(c: &mut Criterion) {
    let mut group = c.benchmark_group("tips");

    for &size in &[100u64, 1_000, 10_000] {
        let graph = build(size);
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| g.view().tips())
        });
    }
    group.finish();
}

fn bench_view_before(c: &mut Criterion) {
    let graph = build(10_000);
    c.bench_function("view_before_10k", |b| {
        b.iter(|| graph.view_before(black_box(5_000.5)).len())
    });
}

criterion_group!(
    benches,
    bench_ancestors,
    bench_descendants,
    bench_tips,
    bench_view_before,
);
criterion_main!(benches);
