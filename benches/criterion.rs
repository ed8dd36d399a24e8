// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::mem::size_of;

const NUM_THREADS: &[usize] = &[1, 2, 4, 8];
const LENGTHS: &[usize] = &[10_000, 100_000, 1_000_000];

fn dot(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot");
    for len in LENGTHS {
        group.throughput(Throughput::Bytes((len * 2 * size_of::<u64>()) as u64));
        group.bench_with_input(BenchmarkId::new("serial", len), len, serial::dot);
        group.bench_with_input(BenchmarkId::new("lockstep_vec", len), len, lockstep::dot_vec);
        group.bench_with_input(
            BenchmarkId::new("lockstep_fail_fast", len),
            len,
            lockstep::dot_fail_fast,
        );
        group.bench_with_input(
            BenchmarkId::new("lockstep_copy_on_write", len),
            len,
            lockstep::dot_copy_on_write,
        );
        for &num_threads in NUM_THREADS {
            group.bench_with_input(
                BenchmarkId::new(format!("rayon@{num_threads}"), len),
                len,
                |bencher, len| rayon::dot(bencher, num_threads, len),
            );
        }
    }
    group.finish();
}

fn truncate(c: &mut Criterion) {
    let mut group = c.benchmark_group("truncate");
    for len in LENGTHS {
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::new("serial", len), len, serial::truncate);
        group.bench_with_input(BenchmarkId::new("lockstep", len), len, lockstep::truncate);
    }
    group.finish();
}

/// Baseline benchmarks using the standard library's zip.
mod serial {
    use criterion::{black_box, Bencher};

    pub fn dot(bencher: &mut Bencher, len: &usize) {
        let left = (0..*len as u64).collect::<Vec<u64>>();
        let right = (0..*len as u64).collect::<Vec<u64>>();

        let left_slice = left.as_slice();
        let right_slice = right.as_slice();

        bencher.iter(|| {
            black_box(left_slice)
                .iter()
                .zip(black_box(right_slice))
                .map(|(&a, &b)| a.wrapping_mul(b))
                .fold(0u64, u64::wrapping_add)
        });
    }

    pub fn truncate(bencher: &mut Bencher, len: &usize) {
        let len = *len as u64;
        bencher.iter(|| {
            (0u64..)
                .zip(0..black_box(len))
                .map(|(a, b)| a ^ b)
                .fold(0u64, u64::wrapping_add)
        });
    }
}

/// Benchmarks using Rayon's indexed zip.
mod rayon {
    use criterion::{black_box, Bencher};
    use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

    pub fn dot(bencher: &mut Bencher, num_threads: usize, len: &usize) {
        let left = (0..*len as u64).collect::<Vec<u64>>();
        let right = (0..*len as u64).collect::<Vec<u64>>();

        let left_slice = left.as_slice();
        let right_slice = right.as_slice();

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap();
        thread_pool.install(|| {
            bencher.iter(|| {
                black_box(left_slice)
                    .par_iter()
                    .zip(black_box(right_slice))
                    .map(|(&a, &b)| a.wrapping_mul(b))
                    .reduce(|| 0, u64::wrapping_add)
            })
        });
    }
}

/// Benchmarks using lockstep sequences.
mod lockstep {
    use criterion::{black_box, BatchSize, Bencher};
    use lockstep::collections::{CopyOnWriteList, FailFastList};
    use lockstep::{zip, Error, Pair, Sequence};

    fn dot_product(first: Sequence<u64>, second: Sequence<u64>) -> Result<u64, Error> {
        let mut sum = 0u64;
        zip(&first, &second)?.for_each(|pair: Pair<u64, u64>| {
            sum = sum.wrapping_add(pair.m1().wrapping_mul(*pair.m2()));
        })?;
        Ok(sum)
    }

    pub fn dot_vec(bencher: &mut Bencher, len: &usize) {
        let left = (0..*len as u64).collect::<Vec<u64>>();
        let right = (0..*len as u64).collect::<Vec<u64>>();

        bencher.iter_batched(
            || (Sequence::of(left.clone()), Sequence::of(right.clone())),
            |(first, second)| dot_product(black_box(first), black_box(second)).unwrap(),
            BatchSize::LargeInput,
        );
    }

    pub fn dot_fail_fast(bencher: &mut Bencher, len: &usize) {
        let left = (0..*len as u64).collect::<FailFastList<u64>>();
        let right = (0..*len as u64).collect::<FailFastList<u64>>();

        bencher.iter(|| dot_product(black_box(left.sequence()), black_box(right.sequence())).unwrap());
    }

    pub fn dot_copy_on_write(bencher: &mut Bencher, len: &usize) {
        let left = (0..*len as u64).collect::<CopyOnWriteList<u64>>();
        let right = (0..*len as u64).collect::<CopyOnWriteList<u64>>();

        bencher.iter(|| dot_product(black_box(left.sequence()), black_box(right.sequence())).unwrap());
    }

    pub fn truncate(bencher: &mut Bencher, len: &usize) {
        let len = *len as u64;
        bencher.iter(|| {
            let zipped = zip(
                &Sequence::iterate(0u64, |x| x + 1),
                &Sequence::from_iter(0..black_box(len)),
            )
            .unwrap();
            let mut sum = 0u64;
            zipped
                .for_each(|pair| sum = sum.wrapping_add(pair.m1() ^ pair.m2()))
                .unwrap();
            sum
        });
    }
}

criterion_group!(benches, dot, truncate);
criterion_main!(benches);
