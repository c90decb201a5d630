//! Shared cache benchmarks
//!
//! Benchmarks for `Cache` operations including puts, gets, hit ratios under
//! skewed access, metrics overhead and concurrent access patterns.
//!
//! Run with: `cargo bench --bench cache_bench -p recency-cache --features
//! runtime`

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use recency_cache::cache::{Cache, CacheConfig};

fn cache_with(capacity: usize, track_metrics: bool) -> Cache<u64, String> {
    let config = CacheConfig::builder().capacity(capacity).track_metrics(track_metrics).build();
    Cache::new(config).unwrap()
}

// ============================================================================
// Basic Operations Benchmarks
// ============================================================================

fn bench_cache_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_put");

    for size in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("lru", size), &size, |b, &size| {
            let cache = cache_with(size, false);
            let mut counter = 0u64;
            b.iter(|| {
                cache.put(black_box(counter), black_box(format!("value_{counter}")));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_cache_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_get_hit");

    for size in [100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("lru", size), &size, |b, &size| {
            let cache = cache_with(size, false);
            for i in 0..size as u64 {
                cache.put(i, format!("value_{i}"));
            }
            let mut counter = 0u64;
            b.iter(|| {
                let key = counter % (size as u64);
                let _ = black_box(cache.get(&black_box(key)));
                counter = counter.wrapping_add(1);
            });
        });
    }

    group.finish();
}

// ============================================================================
// Hit Ratio and Metrics Benchmarks
// ============================================================================

fn bench_skewed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_skewed_workload");
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<u64> = (0..10_000)
        .map(|_| if rng.gen_bool(0.8) { rng.gen_range(0..100) } else { rng.gen_range(0..10_000) })
        .collect();

    for track_metrics in [false, true] {
        group.throughput(Throughput::Elements(keys.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("metrics", track_metrics),
            &track_metrics,
            |b, &track_metrics| {
                b.iter(|| {
                    let cache = cache_with(256, track_metrics);
                    for &key in &keys {
                        let value = cache.get_or_insert_with(key, || format!("value_{key}"));
                        black_box(value);
                    }
                });
            },
        );
    }

    group.finish();
}

// ============================================================================
// Concurrent Access Benchmarks
// ============================================================================

fn bench_concurrent_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_concurrent");

    for threads in [2, 4, 8] {
        group.throughput(Throughput::Elements(threads as u64 * 1000));
        group.bench_with_input(BenchmarkId::new("threads", threads), &threads, |b, &threads| {
            let cache = Arc::new(cache_with(1000, true));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        thread::spawn(move || {
                            for i in 0..1000u64 {
                                let key = (t as u64 * 7919 + i) % 2000;
                                if cache.get(&key).is_none() {
                                    cache.put(key, format!("value_{key}"));
                                }
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(basic_operations, bench_cache_put, bench_cache_get_hit);
criterion_group!(hit_ratios, bench_skewed_workload);
criterion_group!(concurrent, bench_concurrent_access);
criterion_main!(basic_operations, hit_ratios, concurrent);
