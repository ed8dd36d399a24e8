// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![doc = include_str!("../README.md")]
#![forbid(missing_docs, unsafe_code)]

pub mod collections;
mod error;
pub mod iter;
mod macros;

pub use error::{Error, ErrorKind};
pub use iter::{
    zip, zip_nullable, zipped_characteristics, zipped_size, Characteristic, Characteristics,
    Cursor, Pair, Sequence, Size,
};

#[cfg(test)]
mod test {
    use super::*;
    use crate::collections::{ConcurrentSortedSet, CopyOnWriteList, FailFastList};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;

    /// Builds a sequence over the given items.
    type Builder = fn(Vec<u64>) -> Sequence<u64>;

    fn from_vec(items: Vec<u64>) -> Sequence<u64> {
        Sequence::of(items)
    }

    fn from_fail_fast(items: Vec<u64>) -> Sequence<u64> {
        FailFastList::from(items).sequence()
    }

    fn from_copy_on_write(items: Vec<u64>) -> Sequence<u64> {
        CopyOnWriteList::from(items).sequence()
    }

    fn from_concurrent_set(items: Vec<u64>) -> Sequence<u64> {
        ConcurrentSortedSet::from_iter(items).sequence()
    }

    macro_rules! expand_tests {
        ( $builder:expr, ) => {};
        ( $builder:expr, $case:ident, $( $others:tt )* ) => {
            #[test]
            fn $case() {
                $crate::test::$case($builder);
            }

            expand_tests!($builder, $($others)*);
        };
    }

    macro_rules! source_tests {
        ( $mod:ident, $builder:expr, $( $tests:tt )* ) => {
            mod $mod {
                use super::*;

                expand_tests!($builder, $($tests)*);
            }
        };
    }

    macro_rules! all_source_tests {
        ( $mod:ident, $builder:expr ) => {
            source_tests!(
                $mod,
                $builder,
                test_random_lengths,
                test_truncates_infinite,
                test_nested_zip,
                test_skip_limit,
                test_reversed_sides,
                test_second_exhausted_first,
            );
        };
    }

    all_source_tests!(vec, from_vec);
    all_source_tests!(fail_fast, from_fail_fast);
    all_source_tests!(copy_on_write, from_copy_on_write);
    all_source_tests!(concurrent_set, from_concurrent_set);

    fn test_random_lengths(builder: Builder) {
        let mut rng = ChaCha12Rng::seed_from_u64(42);
        for _ in 0..100 {
            let len1 = rng.random_range(0..200);
            let len2 = rng.random_range(0..200);
            let zipped = zip(
                &builder((0..len1).collect()),
                &builder((1000..1000 + len2).collect()),
            )
            .unwrap();

            let pairs: Vec<Pair<u64, u64>> = zipped.try_collect().unwrap();
            assert_eq!(pairs.len() as u64, len1.min(len2));
            for (i, pair) in pairs.iter().enumerate() {
                assert_eq!(*pair.m1(), i as u64);
                assert_eq!(*pair.m2(), 1000 + i as u64);
            }
        }
    }

    fn test_truncates_infinite(builder: Builder) {
        let zipped = zip(&Sequence::iterate(0u64, |x| x + 1), &builder(vec![5, 6, 7])).unwrap();
        let pairs: Vec<(u64, u64)> = zipped
            .iter()
            .unwrap()
            .map(|pair| pair.map(Pair::into_inner))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(pairs, vec![(0, 5), (1, 6), (2, 7)]);
    }

    fn test_nested_zip(builder: Builder) {
        let inner = zip(&builder(vec![1, 2, 3, 4]), &builder(vec![10, 20, 30])).unwrap();
        let outer = zip(&inner, &builder(vec![100, 200, 300, 400])).unwrap();
        let sums: Vec<u64> = outer
            .iter()
            .unwrap()
            .map(|pair| pair.map(|pair| pair.m1().m1() + pair.m1().m2() + pair.m2()))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(sums, vec![111, 222, 333]);
    }

    fn test_skip_limit(builder: Builder) {
        let zipped = zip(
            &builder((0..100).collect()),
            &builder((0..50).map(|x| x * 2).collect()),
        )
        .unwrap();
        let zipped = zipped.skip(10).unwrap().limit(3).unwrap();
        let pairs: Vec<Pair<u64, u64>> = zipped.try_collect().unwrap();
        assert_eq!(
            pairs,
            vec![Pair::of(10, 20), Pair::of(11, 22), Pair::of(12, 24)]
        );
    }

    fn test_reversed_sides(builder: Builder) {
        let zipped = zip(&builder(vec![7, 8, 9]), &Sequence::of(["x", "y"])).unwrap();
        let swapped: Vec<Pair<&str, u64>> = zipped
            .iter()
            .unwrap()
            .map(|pair| pair.map(|pair| Pair::of(*pair.m2(), *pair.m1())))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(swapped, vec![Pair::of("x", 7), Pair::of("y", 8)]);
    }

    fn test_second_exhausted_first(builder: Builder) {
        let zipped = zip(&builder(vec![1, 2, 3]), &Sequence::<u64>::empty()).unwrap();
        let mut cursor = zipped.cursor().unwrap();
        assert!(!cursor.has_more());
        assert!(cursor.advance().is_err());
    }

    #[test]
    fn zipped_size_is_minimum() {
        let mut rng = ChaCha12Rng::seed_from_u64(123);
        for _ in 0..100 {
            let len1: usize = rng.random_range(0..1000);
            let len2: usize = rng.random_range(0..1000);
            let zipped = zip(
                &Sequence::of(0..len1),
                &FailFastList::from_iter(0..len2).sequence(),
            )
            .unwrap();
            assert_eq!(zipped.estimate_size(), Ok(Size::Known(len1.min(len2))));
            assert_eq!(
                zipped.has_characteristics(Characteristics::SIZED | Characteristics::NONNULL),
                Ok(true)
            );
        }
    }

    #[test]
    fn zip_error_kinds() {
        let sequence = Sequence::of([1]);
        assert_eq!(
            zip(&sequence, &sequence).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            zip_nullable(Some(&sequence), None::<&Sequence<i32>>)
                .unwrap_err()
                .kind(),
            ErrorKind::MissingArgument
        );
        sequence.cursor().unwrap();
        assert_eq!(
            zip(&sequence, &Sequence::of([2])).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
    }

    #[test]
    fn zip_across_threads() {
        let list = CopyOnWriteList::from((0..1000u64).collect::<Vec<_>>());
        let zipped = zip(&list.sequence(), &Sequence::iterate(0u64, |x| x + 1)).unwrap();
        let handle = std::thread::spawn(move || {
            zipped
                .iter()
                .unwrap()
                .map(|pair| pair.map(|pair| pair.m1() * pair.m2()))
                .sum::<Result<u64, Error>>()
        });
        let expected: u64 = (0..1000u64).map(|x| x * x).sum();
        assert_eq!(handle.join().unwrap(), Ok(expected));
    }
}
