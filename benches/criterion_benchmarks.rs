use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use evict_rs::config::{BeladyConfig, LfuCacheConfig, LruCacheConfig};
use evict_rs::{BeladySimulator, LfuCache, LruCache};
use std::num::NonZeroUsize;

// Helper functions to create caches with the init pattern
fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

fn make_lfu<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LfuCache<K, V> {
    let config = LfuCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LfuCache::init(config, None)
}

// Deterministic pseudo-random request stream over a bounded key space.
fn synthetic_trace(len: usize, key_space: u64) -> Vec<u64> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 33) % key_space
        })
        .collect()
}

pub fn cache_operations(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    let mut group = c.benchmark_group("Cache Operations");

    // LRU benchmarks
    {
        let mut cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.put(i % CACHE_SIZE, i));
                }
            });
        });

        group.bench_function("LRU put evicting", |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    // LFU benchmarks
    {
        let mut cache = make_lfu(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LFU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LFU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LFU put evicting", |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    black_box(cache.put(next, next));
                    next += 1;
                }
            });
        });
    }

    group.finish();
}

pub fn request_stream_replay(c: &mut Criterion) {
    const CACHE_SIZE: usize = 1000;
    const TRACE_LEN: usize = 100_000;
    const KEY_SPACE: u64 = 4000;

    let trace = synthetic_trace(TRACE_LEN, KEY_SPACE);
    let mut group = c.benchmark_group("Request Stream Replay");

    group.bench_function("LRU look_update stream", |b| {
        b.iter_batched(
            || make_lru::<u64, u64>(CACHE_SIZE),
            |mut cache| {
                for &key in &trace {
                    black_box(cache.look_update(key, |k| *k));
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.bench_function("LFU look_update stream", |b| {
        b.iter_batched(
            || make_lfu::<u64, u64>(CACHE_SIZE),
            |mut cache| {
                for &key in &trace {
                    black_box(cache.look_update(key, |k| *k));
                }
            },
            BatchSize::LargeInput,
        );
    });

    // Construction does all the work for Belady's MIN: the forward walk
    // with the eviction queue happens in `init`, replay just reads the
    // recorded outcomes.
    group.bench_function("Belady construction", |b| {
        let config = BeladyConfig::try_new(CACHE_SIZE).unwrap();
        b.iter_batched(
            || trace.clone(),
            |t| black_box(BeladySimulator::init(config, t, None)),
            BatchSize::LargeInput,
        );
    });

    group.bench_function("Belady replay", |b| {
        let config = BeladyConfig::try_new(CACHE_SIZE).unwrap();
        b.iter_batched(
            || BeladySimulator::init(config, trace.clone(), None),
            |mut sim| {
                for &key in &trace {
                    black_box(sim.look_update::<u64, _>(key, |k| *k));
                }
            },
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, cache_operations, request_stream_replay);
criterion_main!(benches);
