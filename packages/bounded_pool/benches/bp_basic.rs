//! Basic benchmarks for the `bounded_pool` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::thread;

use bounded_pool::BoundedPool;
use criterion::{Criterion, criterion_group, criterion_main};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("bp_basic");

    group.bench_function("build_default", |b| {
        b.iter(|| {
            drop(black_box(
                BoundedPool::<TestItem>::new().expect("default capacity must be reservable"),
            ));
        });
    });

    group.bench_function("acquire_release", |b| {
        let pool = BoundedPool::<TestItem>::new().expect("default capacity must be reservable");

        b.iter(|| {
            let mut lease = pool.acquire().expect("pool cannot be depleted here");
            *lease = black_box(TEST_VALUE);
            pool.release(lease).expect("lease came from this pool");
        });
    });

    group.bench_function("drain_refill", |b| {
        let pool =
            BoundedPool::<TestItem>::with_capacity(64).expect("capacity 64 must be reservable");

        b.iter(|| {
            let leases = (0..pool.capacity())
                .map(|_| pool.acquire().expect("draining within capacity"))
                .collect::<Vec<_>>();

            for lease in leases {
                pool.release(lease).expect("lease came from this pool");
            }
        });
    });

    group.finish();

    let mut group = c.benchmark_group("bp_contended");

    group.bench_function("acquire_release_4_threads", |b| {
        let pool = BoundedPool::<TestItem>::new().expect("default capacity must be reservable");

        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..4 {
                    let pool = &pool;

                    s.spawn(move || {
                        for _ in 0..64 {
                            let mut lease =
                                pool.acquire().expect("capacity exceeds thread count");
                            *lease = black_box(TEST_VALUE);
                            pool.release(lease).expect("lease came from this pool");
                        }
                    });
                }
            });
        });
    });

    group.finish();
}
