//! Fan-out and layered diamond graphs

use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;
use topograph::TopoGraph;

pub fn bench_fanout(c: &mut Criterion) {
    let mut group = c.benchmark_group("fanout");

    for width in [10u32, 100, 1_000] {
        let mut graph = TopoGraph::new();
        for leaf in 1..=width {
            graph.add_dependency(0, leaf);
        }
        group.bench_with_input(BenchmarkId::from_parameter(width), &graph, |b, graph| {
            b.iter(|| black_box(graph.sort_ids().unwrap()));
        });
    }

    group.finish();
}

pub fn bench_diamond_layers(c: &mut Criterion) {
    // Every node of a layer depends on every node of the previous layer
    let mut graph = TopoGraph::new();
    for layer in 1..10u32 {
        for from in 0..10u32 {
            for to in 0..10u32 {
                graph.add_dependency((layer - 1, from), (layer, to));
            }
        }
    }

    c.bench_function("diamond_layers_10x10", |b| {
        b.iter(|| black_box(graph.sort_ids().unwrap()));
    });
}
