// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

/// An immutable pair of values, produced by [`zip()`](crate::zip).
///
/// Members are accessed with [`m1()`](Self::m1) and [`m2()`](Self::m2).
/// Equality and hashing are structural over both members. No ordering is
/// defined over pairs.
///
/// ```
/// # use lockstep::Pair;
/// let pair = Pair::of(1, "a");
/// assert_eq!(*pair.m1(), 1);
/// assert_eq!(*pair.m2(), "a");
/// assert_eq!(pair.to_string(), "(1, a)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pair<T, U> {
    m1: T,
    m2: U,
}

impl<T, U> Pair<T, U> {
    /// Creates a pair from its two members.
    pub fn of(m1: T, m2: U) -> Self {
        Self { m1, m2 }
    }

    /// Returns the first member.
    pub fn m1(&self) -> &T {
        &self.m1
    }

    /// Returns the second member.
    pub fn m2(&self) -> &U {
        &self.m2
    }

    /// Decomposes this pair into a tuple of its members.
    pub fn into_inner(self) -> (T, U) {
        (self.m1, self.m2)
    }
}

impl<T, U> Pair<Option<T>, Option<U>> {
    /// Returns an object that displays this pair as `"(m1, m2)"`, rendering
    /// absent members as `null`.
    ///
    /// ```
    /// # use lockstep::Pair;
    /// let pair = Pair::of(None::<i32>, Some("b"));
    /// assert_eq!(pair.display_nullable().to_string(), "(null, b)");
    /// ```
    pub fn display_nullable(&self) -> NullableDisplay<'_, T, U> {
        NullableDisplay { pair: self }
    }
}

impl<T, U> From<(T, U)> for Pair<T, U> {
    fn from((m1, m2): (T, U)) -> Self {
        Pair::of(m1, m2)
    }
}

impl<T, U> From<Pair<T, U>> for (T, U) {
    fn from(pair: Pair<T, U>) -> Self {
        pair.into_inner()
    }
}

impl<T: fmt::Display, U: fmt::Display> fmt::Display for Pair<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.m1, self.m2)
    }
}

/// Helper to display a [`Pair`] of optional members. This struct is created
/// by [`Pair::display_nullable()`].
pub struct NullableDisplay<'a, T, U> {
    pair: &'a Pair<Option<T>, Option<U>>,
}

struct Member<'a, T>(&'a Option<T>);

impl<T: fmt::Display> fmt::Display for Member<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => value.fmt(f),
            None => f.write_str("null"),
        }
    }
}

impl<T: fmt::Display, U: fmt::Display> fmt::Display for NullableDisplay<'_, T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", Member(&self.pair.m1), Member(&self.pair.m2))
    }
}
