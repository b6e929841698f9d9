//! Collector throughput benchmarks.
//!
//! Run with: `cargo bench --package schematika-gc`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use schematika_gc::{GcConfig, GcObject, Heap, Ptr};
use std::any::Any;

struct Leaf(u64);
impl GcObject for Leaf {
    fn children(&self) -> Vec<Ptr> {
        Vec::new()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn bench_alloc(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc");
    group.throughput(Throughput::Elements(1));

    group.bench_function("nursery_alloc", |b| {
        let mut heap = Heap::new(GcConfig::default()).unwrap();
        b.iter(|| black_box(heap.alloc(1, 16, Leaf(42), &[]).unwrap()))
    });

    group.finish();
}

fn bench_nursery_collection(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection");

    group.bench_function("scavenge_small_nursery", |b| {
        let config = GcConfig { nursery_bytes: 64 * 1024, ..Default::default() };
        let mut heap = Heap::new(config).unwrap();
        let root = heap.alloc(1, 16, Leaf(0), &[]).unwrap();
        for _ in 0..1000 {
            let _ = heap.alloc(1, 16, Leaf(1), &[root]);
        }
        b.iter(|| heap.collect_nursery(black_box(&[root])))
    });

    group.finish();
}

criterion_group!(benches, bench_alloc, bench_nursery_collection);
criterion_main!(benches);
