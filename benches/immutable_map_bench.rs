//! Benchmark for ImmutableMap and OrderedImmutableMap vs standard HashMap.
//!
//! Covers construction, lookup, copy and the first (uncached) fingerprint.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use frozenmap::map::{ImmutableMap, OrderedImmutableMap};
use std::collections::HashMap;
use std::hint::black_box;

// =============================================================================
// construction Benchmark
// =============================================================================

fn benchmark_construction(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("construction");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("ImmutableMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let map: ImmutableMap<i32, i32> =
                        (0..size).map(|index| (black_box(index), index * 2)).collect();
                    black_box(map)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("OrderedImmutableMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let map: OrderedImmutableMap<i32, i32> =
                        (0..size).map(|index| (black_box(index), index * 2)).collect();
                    black_box(map)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let map: HashMap<i32, i32> =
                    (0..size).map(|index| (black_box(index), index * 2)).collect();
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100, 1_000, 10_000] {
        let unordered: ImmutableMap<i32, i32> = (0..size).map(|index| (index, index * 2)).collect();
        let ordered: OrderedImmutableMap<i32, i32> =
            (0..size).map(|index| (index, index * 2)).collect();

        group.bench_with_input(
            BenchmarkId::new("ImmutableMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = unordered.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("OrderedImmutableMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut sum = 0;
                    for key in 0..size {
                        if let Some(&value) = ordered.get(&black_box(key)) {
                            sum += value;
                        }
                    }
                    black_box(sum)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// copy Benchmark
// =============================================================================

fn benchmark_copy(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("copy");

    for size in [100, 1_000, 10_000] {
        let map: ImmutableMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        group.bench_with_input(
            BenchmarkId::new("ImmutableMap", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| black_box(map.copy([(black_box(size), 0), (0, -1)])));
            },
        );
    }

    group.finish();
}

// =============================================================================
// fingerprint Benchmark
// =============================================================================

fn benchmark_fingerprint(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("fingerprint");

    for size in [100, 1_000, 10_000] {
        let map: ImmutableMap<i32, i32> = (0..size).map(|index| (index, index)).collect();

        // Each iteration gets a fresh instance, so the cache starts empty.
        group.bench_with_input(BenchmarkId::new("first", size), &size, |bencher, _| {
            bencher.iter_batched(
                || map.copy([]),
                |fresh| black_box(fresh.fingerprint()),
                BatchSize::SmallInput,
            );
        });

        black_box(map.fingerprint());
        group.bench_with_input(BenchmarkId::new("cached", size), &size, |bencher, _| {
            bencher.iter(|| black_box(map.fingerprint()));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_construction,
    benchmark_get,
    benchmark_copy,
    benchmark_fingerprint
);

criterion_main!(benches);
