// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{read, write};
use crate::iter::{Characteristics, Cursor, Sequence, Size};
use crate::Error;
use crossbeam_utils::sync::ShardedLock;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

/// A shared sorted set that supports modifications during a traversal.
///
/// Cursors are weakly consistent: each pull returns the least element greater
/// than the previously returned one, as found in the set at the time of the
/// pull. A cursor therefore observes insertions and removals ahead of its
/// position, and never fails.
pub struct ConcurrentSortedSet<T> {
    set: Arc<ShardedLock<BTreeSet<T>>>,
}

impl<T> Clone for ConcurrentSortedSet<T> {
    fn clone(&self) -> Self {
        Self {
            set: Arc::clone(&self.set),
        }
    }
}

impl<T> Default for ConcurrentSortedSet<T> {
    fn default() -> Self {
        Self::from(BTreeSet::new())
    }
}

impl<T> From<BTreeSet<T>> for ConcurrentSortedSet<T> {
    fn from(set: BTreeSet<T>) -> Self {
        Self {
            set: Arc::new(ShardedLock::new(set)),
        }
    }
}

impl<T: Ord> FromIterator<T> for ConcurrentSortedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<BTreeSet<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for ConcurrentSortedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(read(&self.set).iter()).finish()
    }
}

impl<T> ConcurrentSortedSet<T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        read(&self.set).len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        read(&self.set).is_empty()
    }
}

impl<T: Ord> ConcurrentSortedSet<T> {
    /// Adds an element, returning whether it was newly inserted.
    pub fn insert(&self, item: T) -> bool {
        write(&self.set).insert(item)
    }

    /// Removes an element, returning whether it was present.
    pub fn remove(&self, item: &T) -> bool {
        write(&self.set).remove(item)
    }

    /// Returns whether the set contains the given element.
    pub fn contains(&self, item: &T) -> bool {
        read(&self.set).contains(item)
    }
}

impl<T: Ord + Clone> ConcurrentSortedSet<T> {
    /// Returns a copy of the elements, in ascending order.
    pub fn to_vec(&self) -> Vec<T> {
        read(&self.set).iter().cloned().collect()
    }

    /// Returns a weakly-consistent cursor over this set.
    pub fn cursor(&self) -> ConcurrentSortedSetCursor<T> {
        ConcurrentSortedSetCursor {
            set: self.clone(),
            last: None,
            next: None,
        }
    }

    /// Returns an ordered, distinct and sorted sequence over this set.
    ///
    /// ```
    /// # use lockstep::collections::ConcurrentSortedSet;
    /// let set = ConcurrentSortedSet::from_iter([1, 2, 3]);
    /// let mut output = Vec::new();
    /// set.sequence().for_each(|x| {
    ///     if x < 10 {
    ///         set.insert(x * 4);
    ///     }
    ///     output.push(x);
    /// })?;
    /// assert_eq!(output, vec![1, 2, 3, 4, 8, 12, 16, 32]);
    /// # Ok::<(), lockstep::Error>(())
    /// ```
    pub fn sequence(&self) -> Sequence<T>
    where
        T: Send + Sync + 'static,
    {
        Sequence::from_cursor(self.cursor())
    }
}

/// A weakly-consistent cursor over a [`ConcurrentSortedSet`].
///
/// An element found by [`has_more()`](Cursor::has_more) is kept until the
/// next [`advance()`](Cursor::advance), even if it is removed from the set in
/// the meantime.
pub struct ConcurrentSortedSetCursor<T> {
    set: ConcurrentSortedSet<T>,
    last: Option<T>,
    /// Element found by the last `has_more()`, not returned yet.
    next: Option<T>,
}

impl<T: Ord + Clone> ConcurrentSortedSetCursor<T> {
    fn peek(&self) -> Option<T> {
        let set = read(&self.set.set);
        let lower = match &self.last {
            Some(last) => Bound::Excluded(last),
            None => Bound::Unbounded,
        };
        set.range((lower, Bound::Unbounded)).next().cloned()
    }
}

impl<T: Ord + Clone> Cursor for ConcurrentSortedSetCursor<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        if self.next.is_none() {
            self.next = self.peek();
        }
        self.next.is_some()
    }

    fn advance(&mut self) -> Result<T, Error> {
        let item = match self.next.take() {
            Some(item) => item,
            None => self.peek().ok_or_else(Error::exhausted)?,
        };
        self.last = Some(item.clone());
        Ok(item)
    }

    // The set can change at any time, so there is no reliable estimate.
    fn estimate_size(&self) -> Size {
        Size::Unbounded
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
            | Characteristics::DISTINCT
            | Characteristics::SORTED
            | Characteristics::NONNULL
            | Characteristics::CONCURRENT
    }
}
