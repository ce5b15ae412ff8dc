//! Benchmarks for equatable-collections
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use equatable_collections::{EqualityComparer, EquatableArray, EquatableMap, EquatableSet};

fn sample_map(count: u64) -> EquatableMap<u64, u64> {
    (0..count).map(|i| (i, i * 7)).collect()
}

// =============================================================================
// ARRAY BENCHMARKS
// =============================================================================

fn bench_array_from_vec(c: &mut Criterion) {
    c.bench_function("array_from_vec_1000", |b| {
        b.iter(|| black_box(EquatableArray::from((0..1000u64).collect::<Vec<_>>())))
    });
}

fn bench_array_equality(c: &mut Criterion) {
    let a: EquatableArray<u64> = (0..1000).collect();
    let b: EquatableArray<u64> = (0..1000).collect();
    c.bench_function("array_equality_1000", |bench| {
        bench.iter(|| black_box(a == b))
    });
}

// =============================================================================
// MAP BENCHMARKS
// =============================================================================

fn bench_map_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_build");

    for count in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("collect", count), &count, |b, &count| {
            b.iter(|| black_box(sample_map(count)))
        });
    }

    group.finish();
}

fn bench_map_get(c: &mut Criterion) {
    let map = sample_map(10_000);
    c.bench_function("map_get_hit", |b| {
        b.iter(|| black_box(map.get(&black_box(4_321))))
    });
    c.bench_function("map_get_miss", |b| {
        b.iter(|| black_box(map.get(&black_box(99_999))))
    });
}

fn bench_map_set_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_set_item");

    for count in [100, 1000, 10000] {
        let map = sample_map(count);
        group.bench_with_input(BenchmarkId::new("persistent", count), &count, |b, _| {
            b.iter(|| black_box(map.set_item(black_box(42), 0)))
        });
    }

    group.finish();
}

fn bench_map_equality(c: &mut Criterion) {
    let a = sample_map(10_000);
    let b: EquatableMap<u64, u64> = (0..10_000).rev().map(|i| (i, i * 7)).collect();
    let differs = a.set_item(5_000, 0);

    c.bench_function("map_equality_equal", |bench| {
        bench.iter(|| black_box(a == b))
    });
    // rejected by the content hash
    c.bench_function("map_equality_different", |bench| {
        bench.iter(|| black_box(a == differs))
    });
}

// =============================================================================
// SET BENCHMARKS
// =============================================================================

fn bench_set_algebra(c: &mut Criterion) {
    let left: EquatableSet<u64> = (0..5_000).collect();
    let right: EquatableSet<u64> = (2_500..7_500).collect();

    c.bench_function("set_union_5000", |b| b.iter(|| black_box(left.union(&right))));
    c.bench_function("set_intersect_5000", |b| {
        b.iter(|| black_box(left.intersect(&right)))
    });
    c.bench_function("set_symmetric_except_5000", |b| {
        b.iter(|| black_box(left.symmetric_except(&right)))
    });
}

fn bench_custom_policy(c: &mut Criterion) {
    let keys: Vec<String> = (0..1000).map(|i| format!("Header-{i}")).collect();
    c.bench_function("map_build_ignore_case_1000", |b| {
        b.iter(|| {
            black_box(EquatableMap::from_entries_with(
                keys.iter().cloned().map(|k| (k, 0u8)),
                EqualityComparer::ignore_ascii_case(),
                EqualityComparer::new(),
            ))
        })
    });
}

criterion_group!(array_benches, bench_array_from_vec, bench_array_equality);

criterion_group!(
    map_benches,
    bench_map_build,
    bench_map_get,
    bench_map_set_item,
    bench_map_equality,
);

criterion_group!(set_benches, bench_set_algebra, bench_custom_policy);

criterion_main!(array_benches, map_benches, set_benches);
