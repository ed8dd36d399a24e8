// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Traversal characteristics declared by cursors, and the rules to merge the
//! characteristics of two zipped cursors.

use std::fmt;
use std::ops::{BitAnd, BitOr};

/// A guarantee that a cursor makes about its own traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Elements are traversed in a defined encounter order.
    Ordered,
    /// No two traversed elements are equal.
    Distinct,
    /// Elements are traversed in sorted order.
    Sorted,
    /// The size estimate is exact before the traversal begins.
    Sized,
    /// Any sub-range of the traversal would also be sized.
    Subsized,
    /// Traversed elements are never absent.
    NonNull,
    /// The backing data cannot be structurally modified.
    Immutable,
    /// The backing data can be safely modified concurrently with the
    /// traversal, which tolerates it without failing.
    Concurrent,
}

impl Characteristic {
    /// All characteristics, in declaration order.
    pub const ALL: [Characteristic; 8] = [
        Characteristic::Ordered,
        Characteristic::Distinct,
        Characteristic::Sorted,
        Characteristic::Sized,
        Characteristic::Subsized,
        Characteristic::NonNull,
        Characteristic::Immutable,
        Characteristic::Concurrent,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of [`Characteristic`]s.
///
/// ```
/// # use lockstep::{Characteristic, Characteristics};
/// let set = Characteristics::ORDERED | Characteristics::SIZED;
/// assert!(set.contains(Characteristic::Ordered));
/// assert!(!set.contains(Characteristic::Distinct));
/// assert_eq!(format!("{set:?}"), "{Ordered, Sized}");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Characteristics(u8);

impl Characteristics {
    /// The empty set.
    pub const EMPTY: Self = Self(0);
    /// Singleton set of [`Characteristic::Ordered`].
    pub const ORDERED: Self = Self::only(Characteristic::Ordered);
    /// Singleton set of [`Characteristic::Distinct`].
    pub const DISTINCT: Self = Self::only(Characteristic::Distinct);
    /// Singleton set of [`Characteristic::Sorted`].
    pub const SORTED: Self = Self::only(Characteristic::Sorted);
    /// Singleton set of [`Characteristic::Sized`].
    pub const SIZED: Self = Self::only(Characteristic::Sized);
    /// Singleton set of [`Characteristic::Subsized`].
    pub const SUBSIZED: Self = Self::only(Characteristic::Subsized);
    /// Singleton set of [`Characteristic::NonNull`].
    pub const NONNULL: Self = Self::only(Characteristic::NonNull);
    /// Singleton set of [`Characteristic::Immutable`].
    pub const IMMUTABLE: Self = Self::only(Characteristic::Immutable);
    /// Singleton set of [`Characteristic::Concurrent`].
    pub const CONCURRENT: Self = Self::only(Characteristic::Concurrent);

    const fn only(characteristic: Characteristic) -> Self {
        Self(characteristic.bit())
    }

    /// Returns whether this set contains the given characteristic.
    pub fn contains(self, characteristic: Characteristic) -> bool {
        self.0 & characteristic.bit() != 0
    }

    /// Returns whether this set contains all the characteristics of `other`.
    pub fn contains_all(self, other: Characteristics) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether this set is empty.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns this set with the given characteristic added.
    #[must_use]
    pub fn with(self, characteristic: Characteristic) -> Self {
        Self(self.0 | characteristic.bit())
    }

    /// Returns this set with the given characteristic removed.
    #[must_use]
    pub fn without(self, characteristic: Characteristic) -> Self {
        Self(self.0 & !characteristic.bit())
    }

    /// Returns this set with the given characteristic added if `present` is
    /// true, or removed otherwise.
    #[must_use]
    pub fn with_if(self, characteristic: Characteristic, present: bool) -> Self {
        if present {
            self.with(characteristic)
        } else {
            self.without(characteristic)
        }
    }

    /// Iterates over the characteristics in this set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Characteristic> {
        Characteristic::ALL
            .into_iter()
            .filter(move |&characteristic| self.contains(characteristic))
    }
}

impl From<Characteristic> for Characteristics {
    fn from(characteristic: Characteristic) -> Self {
        Self::only(characteristic)
    }
}

impl FromIterator<Characteristic> for Characteristics {
    fn from_iter<I: IntoIterator<Item = Characteristic>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Characteristics::EMPTY, Characteristics::with)
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for Characteristics {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Estimated number of remaining elements of a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    /// A finite estimate, exact if the cursor is [`Sized`](Characteristic::Sized).
    Known(usize),
    /// Unknown, or infinite.
    Unbounded,
}

impl Size {
    /// Returns the smaller of two estimates. An unbounded estimate loses to any
    /// finite one.
    ///
    /// ```
    /// # use lockstep::Size;
    /// assert_eq!(Size::Known(3).min(Size::Known(5)), Size::Known(3));
    /// assert_eq!(Size::Unbounded.min(Size::Known(5)), Size::Known(5));
    /// assert_eq!(Size::Unbounded.min(Size::Unbounded), Size::Unbounded);
    /// ```
    #[must_use]
    pub fn min(self, other: Size) -> Size {
        match (self, other) {
            (Size::Known(a), Size::Known(b)) => Size::Known(a.min(b)),
            (Size::Known(a), Size::Unbounded) | (Size::Unbounded, Size::Known(a)) => Size::Known(a),
            (Size::Unbounded, Size::Unbounded) => Size::Unbounded,
        }
    }

    /// Returns whether this estimate is finite.
    pub fn is_finite(self) -> bool {
        matches!(self, Size::Known(_))
    }

    /// Returns the finite estimate, if any.
    pub fn known(self) -> Option<usize> {
        match self {
            Size::Known(n) => Some(n),
            Size::Unbounded => None,
        }
    }

    /// Returns this estimate reduced by `n`, saturating at zero. Unbounded
    /// estimates stay unbounded.
    #[must_use]
    pub fn saturating_sub(self, n: usize) -> Size {
        match self {
            Size::Known(size) => Size::Known(size.saturating_sub(n)),
            Size::Unbounded => Size::Unbounded,
        }
    }
}

/// Size estimate of a cursor obtained by zipping cursors with the given
/// estimates.
pub fn zipped_size(size1: Size, size2: Size) -> Size {
    size1.min(size2)
}

/// Characteristics of a cursor obtained by zipping cursors with
/// characteristics `c1` and `c2`, whose merged size estimate is `size` (see
/// [`zipped_size()`]).
///
/// - [`Ordered`](Characteristic::Ordered),
///   [`Immutable`](Characteristic::Immutable): present if present on both
///   sides.
/// - [`Distinct`](Characteristic::Distinct): present if present on either
///   side, as pairs are then distinguishable by that side alone.
/// - [`Sorted`](Characteristic::Sorted): never present, no order is defined
///   over pairs.
/// - [`Sized`](Characteristic::Sized),
///   [`Subsized`](Characteristic::Subsized): present if and only if the merged
///   size is finite. Truncation to the shorter side holds even if one side
///   doesn't report itself as sized.
/// - [`NonNull`](Characteristic::NonNull): always present, the pair itself
///   is never absent whatever its members.
/// - [`Concurrent`](Characteristic::Concurrent): present if present on both
///   sides, or on one side when the other side is
///   [`Immutable`](Characteristic::Immutable).
///
/// ```
/// # use lockstep::{zipped_characteristics, Characteristics, Size};
/// let merged = zipped_characteristics(
///     Characteristics::ORDERED | Characteristics::SORTED,
///     Characteristics::ORDERED | Characteristics::DISTINCT,
///     Size::Known(3),
/// );
/// assert_eq!(
///     merged,
///     Characteristics::ORDERED
///         | Characteristics::DISTINCT
///         | Characteristics::SIZED
///         | Characteristics::SUBSIZED
///         | Characteristics::NONNULL
/// );
/// ```
pub fn zipped_characteristics(c1: Characteristics, c2: Characteristics, size: Size) -> Characteristics {
    let both = c1 & c2;
    let either = c1 | c2;

    let concurrent = both.contains(Characteristic::Concurrent)
        || (c1.contains(Characteristic::Concurrent) && c2.contains(Characteristic::Immutable))
        || (c2.contains(Characteristic::Concurrent) && c1.contains(Characteristic::Immutable));

    Characteristics::EMPTY
        .with_if(Characteristic::Ordered, both.contains(Characteristic::Ordered))
        .with_if(Characteristic::Distinct, either.contains(Characteristic::Distinct))
        .with_if(Characteristic::Sized, size.is_finite())
        .with_if(Characteristic::Subsized, size.is_finite())
        .with(Characteristic::NonNull)
        .with_if(Characteristic::Immutable, both.contains(Characteristic::Immutable))
        .with_if(Characteristic::Concurrent, concurrent)
}
