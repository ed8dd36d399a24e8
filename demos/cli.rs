// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI tool to run examples of zipped sequences.
//!
//! Logs are printed with `RUST_LOG=debug` when the `log` feature is enabled,
//! e.g. `cargo run --example cli --features log_traversal -- --scenario
//! fibonacci`.

use clap::{Parser, ValueEnum};
use lockstep::collections::{ConcurrentSortedSet, CopyOnWriteList, FailFastList};
use lockstep::{zip, Error, Pair, Sequence};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use std::fmt::Display;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    match cli.scenario {
        Scenario::Basic => {
            let numbers = Sequence::of(1..=cli.len);
            let letters = Sequence::of(('a'..='z').cycle().take(cli.len as usize));
            print_pairs(zip(&numbers, &letters)?)
        }
        Scenario::Truncate => {
            let mut rng = ChaCha12Rng::seed_from_u64(cli.seed);
            let len1 = rng.random_range(0..=cli.len);
            let len2 = rng.random_range(0..=cli.len);
            println!("lengths = ({len1}, {len2})");
            print_pairs(zip(&Sequence::of(0..len1), &Sequence::of(0..len2))?)
        }
        Scenario::Infinite => {
            let up = Sequence::iterate(1i64, |n| n + 1);
            let down = Sequence::iterate(-1i64, |n| n - 1);
            let zipped = zip(&up, &down)?;
            print_pairs(zipped.skip(cli.len as usize - 1)?.limit(1)?)
        }
        Scenario::LateBinding => {
            let first = FailFastList::from(vec![1, 2, 3]);
            let second = FailFastList::from(vec!["a", "b", "c", "d", "e"]);
            let zipped = zip(&first.sequence(), &second.sequence())?;
            first.push(4);
            second.remove(1);
            print_pairs(zipped)
        }
        Scenario::FailFast => {
            let first = FailFastList::from(vec![1, 2, 3]);
            let second = FailFastList::from(vec!["a", "b", "c", "d", "e"]);
            let zipped = zip(&first.sequence(), &second.sequence())?;
            zipped.for_each(|pair| {
                println!("{pair}");
                first.push(4);
                second.remove(1);
            })
        }
        Scenario::CopyOnWrite => {
            let first = CopyOnWriteList::from(vec![1, 2, 3]);
            let second = CopyOnWriteList::from(vec!["a", "b", "c", "d", "e"]);
            let zipped = zip(&first.sequence(), &second.sequence())?;
            zipped.for_each(|pair| {
                println!("{pair}");
                first.push(4);
                second.remove(1);
            })?;
            println!("lists are now {first:?} and {second:?}");
            Ok(())
        }
        Scenario::Fibonacci => {
            let set = ConcurrentSortedSet::from_iter([1u64, 2, 3]);
            let zipped = zip(&set.sequence(), &set.sequence().skip(1)?)?;
            for pair in zipped.iter()?.take(cli.len as usize) {
                let pair = pair?;
                set.insert(pair.m1() + pair.m2() * 2);
                println!("{}", pair.m1());
            }
            Ok(())
        }
    }
}

fn print_pairs<T: Display, U: Display>(zipped: Sequence<Pair<T, U>>) -> Result<(), Error> {
    println!(
        "size = {:?}, characteristics = {:?}",
        zipped.estimate_size()?,
        zipped.characteristics()?
    );
    zipped.for_each(|pair| println!("{pair}"))
}

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Scenario to run.
    #[arg(long, value_enum)]
    scenario: Scenario,

    /// Number of items in the input, or of pairs to print for infinite inputs.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=1_000_000))]
    len: u64,

    /// Seed for the random lengths of the truncate scenario.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Scenario to run.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
enum Scenario {
    /// Zips numbers with letters.
    Basic,
    /// Zips two sequences of random lengths.
    Truncate,
    /// Zips two infinite sequences and prints the pair at position `len`.
    Infinite,
    /// Modifies fail-fast lists between zipping and traversal.
    LateBinding,
    /// Modifies fail-fast lists during the traversal.
    FailFast,
    /// Modifies copy-on-write lists during the traversal.
    CopyOnWrite,
    /// Zips a concurrent set with itself while inserting sums.
    Fibonacci,
}
