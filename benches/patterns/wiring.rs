//! Predecessor wiring benchmarks

use criterion::Criterion;
use std::hint::black_box;
use topograph::{Catalog, Sequenced};

struct Step(u32);

impl Sequenced for Step {
    type Key = u32;

    fn key(&self) -> u32 {
        self.0
    }

    fn predecessor(&self) -> Option<u32> {
        self.0.checked_sub(1)
    }
}

pub fn bench_catalog_sequence(c: &mut Criterion) {
    c.bench_function("catalog_wire_100", |b| {
        b.iter(|| {
            // Registered in reverse so every call has to reorder
            let catalog: Catalog<Step> = (0..100).rev().map(Step).collect();
            black_box(catalog.sequence().unwrap().len())
        });
    });

    let catalog: Catalog<Step> = (0..100).rev().map(Step).collect();
    catalog.sequence().unwrap();
    c.bench_function("catalog_cached_100", |b| {
        b.iter(|| black_box(catalog.sequence().unwrap().len()));
    });
}
