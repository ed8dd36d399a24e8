// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::cursor::{Empty, IterCursor, Limit, Skip, Unordered};
use super::{Characteristics, Cursor, Size};
use crate::macros::log_warn;
use crate::Error;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A type-erased cursor, as held by a [`Sequence`].
pub type BoxedCursor<T> = Box<dyn Cursor<Item = T> + Send>;

type CloseHandler = Box<dyn FnOnce() + Send>;

enum Stage<T> {
    Fresh(BoxedCursor<T>),
    Consumed,
}

struct Shared<T> {
    stage: Mutex<Stage<T>>,
    parallel: AtomicBool,
    close_handlers: Mutex<Vec<CloseHandler>>,
}

/// A handle to a lazy, single-use sequence of elements.
///
/// A sequence yields exactly one [`Cursor`] over its lifetime. Operations that
/// take the cursor (intermediate operations such as [`skip()`](Self::skip),
/// terminal operations such as [`iter()`](Self::iter), or passing the
/// sequence to [`zip()`](crate::zip)) mark the sequence as consumed, after
/// which any operation that needs the cursor fails with an
/// [`InvalidState`](crate::ErrorKind::InvalidState) error.
///
/// Cloning a [`Sequence`] clones the handle: both handles refer to the same
/// sequence instance.
///
/// ```
/// # use lockstep::{ErrorKind, Sequence};
/// let sequence = Sequence::of([1, 2, 3]);
/// assert_eq!(sequence.try_collect::<Vec<_>>(), Ok(vec![1, 2, 3]));
/// assert_eq!(
///     sequence.try_collect::<Vec<_>>().unwrap_err().kind(),
///     ErrorKind::InvalidState
/// );
/// ```
pub struct Sequence<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("consumed", &self.is_consumed())
            .field("parallel", &self.is_parallel())
            .finish()
    }
}

impl<T> Sequence<T> {
    fn with_parallel(cursor: BoxedCursor<T>, parallel: bool) -> Self {
        Self {
            shared: Arc::new(Shared {
                stage: Mutex::new(Stage::Fresh(cursor)),
                parallel: AtomicBool::new(parallel),
                close_handlers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a sequential sequence over the given cursor.
    pub fn from_cursor(cursor: impl Cursor<Item = T> + Send + 'static) -> Self {
        Self::with_parallel(Box::new(cursor), false)
    }

    /// Creates an empty sequence.
    pub fn empty() -> Self
    where
        T: 'static,
    {
        Self::from_cursor(Empty::new())
    }

    /// Creates an ordered, sized and immutable sequence over the given items.
    ///
    /// ```
    /// # use lockstep::{Characteristics, Sequence, Size};
    /// let sequence = Sequence::of(["a", "b", "c"]);
    /// assert_eq!(sequence.estimate_size(), Ok(Size::Known(3)));
    /// assert_eq!(
    ///     sequence.characteristics(),
    ///     Ok(Characteristics::ORDERED
    ///         | Characteristics::SIZED
    ///         | Characteristics::SUBSIZED
    ///         | Characteristics::IMMUTABLE)
    /// );
    /// ```
    pub fn of(items: impl IntoIterator<Item = T>) -> Self
    where
        T: Send + 'static,
    {
        let items: Vec<T> = items.into_iter().collect();
        Self::from_iter_with(items, Characteristics::ORDERED | Characteristics::IMMUTABLE)
    }

    /// Creates a sequence over the given iterable, which declares the given
    /// characteristics. [`Sized`](super::Characteristic::Sized) and
    /// [`Subsized`](super::Characteristic::Subsized) are derived from the
    /// iterator's [`size_hint()`](Iterator::size_hint).
    pub fn from_iter_with<I>(iter: I, characteristics: Characteristics) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
        T: Send + 'static,
    {
        Self::from_cursor(IterCursor::new(iter.into_iter(), characteristics))
    }

    /// Creates a distinct, unordered sequence over the items of a
    /// [`HashSet`].
    pub fn from_hash_set(set: HashSet<T>) -> Self
    where
        T: Send + 'static,
    {
        Self::from_iter_with(set, Characteristics::DISTINCT)
    }

    /// Creates an ordered, distinct and sorted sequence over the items of a
    /// [`BTreeSet`].
    pub fn from_btree_set(set: BTreeSet<T>) -> Self
    where
        T: Send + 'static,
    {
        Self::from_iter_with(
            set,
            Characteristics::ORDERED | Characteristics::DISTINCT | Characteristics::SORTED,
        )
    }

    /// Creates an infinite, ordered sequence `seed, f(seed), f(f(seed)), ...`.
    ///
    /// ```
    /// # use lockstep::{Sequence, Size};
    /// let powers = Sequence::iterate(1u64, |x| x * 2);
    /// assert_eq!(powers.estimate_size(), Ok(Size::Unbounded));
    /// let first: Vec<u64> = powers.limit(5)?.try_collect()?;
    /// assert_eq!(first, vec![1, 2, 4, 8, 16]);
    /// # Ok::<(), lockstep::Error>(())
    /// ```
    pub fn iterate(seed: T, mut f: impl FnMut(&T) -> T + Send + 'static) -> Self
    where
        T: Send + 'static,
    {
        Self::from_iter_with(
            std::iter::successors(Some(seed), move |x| Some(f(x))),
            Characteristics::ORDERED | Characteristics::IMMUTABLE,
        )
    }

    /// Returns whether `self` and `other` are handles to the same sequence
    /// instance.
    pub fn is_same_instance<U>(&self, other: &Sequence<U>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.shared), Arc::as_ptr(&other.shared))
    }

    /// Returns whether this sequence's cursor was already taken.
    pub fn is_consumed(&self) -> bool {
        matches!(*self.stage(), Stage::Consumed)
    }

    /// Returns whether parallel evaluation was requested on this sequence.
    pub fn is_parallel(&self) -> bool {
        self.shared.parallel.load(Ordering::Relaxed)
    }

    /// Requests parallel evaluation of this sequence.
    ///
    /// This is only a request that adaptors may honor or drop: in particular
    /// sequences returned by [`zip()`](crate::zip) are always sequential.
    pub fn parallel(self) -> Self {
        self.shared.parallel.store(true, Ordering::Relaxed);
        self
    }

    /// Clears a previous request for parallel evaluation.
    pub fn sequential(self) -> Self {
        self.shared.parallel.store(false, Ordering::Relaxed);
        self
    }

    /// Returns the size estimate of this sequence's cursor.
    pub fn estimate_size(&self) -> Result<Size, Error> {
        self.inspect(|cursor| cursor.estimate_size())
    }

    /// Returns the characteristics of this sequence's cursor.
    pub fn characteristics(&self) -> Result<Characteristics, Error> {
        self.inspect(|cursor| cursor.characteristics())
    }

    /// Returns whether this sequence's cursor has all the given
    /// characteristics.
    pub fn has_characteristics(&self, characteristics: Characteristics) -> Result<bool, Error> {
        Ok(self.characteristics()?.contains_all(characteristics))
    }

    /// Takes the cursor of this sequence, marking it as consumed.
    pub fn cursor(&self) -> Result<BoxedCursor<T>, Error> {
        let mut stage = self.stage();
        match std::mem::replace(&mut *stage, Stage::Consumed) {
            Stage::Fresh(cursor) => Ok(cursor),
            Stage::Consumed => {
                log_warn!("[lockstep] Rejected reuse of a consumed sequence");
                Err(Error::consumed())
            }
        }
    }

    /// Returns a sequence that skips the first `n` elements of this one.
    pub fn skip(&self, n: usize) -> Result<Sequence<T>, Error>
    where
        T: 'static,
    {
        self.derive(|cursor| Box::new(Skip::new(cursor, n)))
    }

    /// Returns a sequence that yields at most `n` elements of this one.
    pub fn limit(&self, n: usize) -> Result<Sequence<T>, Error>
    where
        T: 'static,
    {
        self.derive(|cursor| Box::new(Limit::new(cursor, n)))
    }

    /// Returns a sequence with the same elements as this one, without the
    /// [`Ordered`](super::Characteristic::Ordered) guarantee.
    pub fn unordered(&self) -> Result<Sequence<T>, Error>
    where
        T: 'static,
    {
        self.derive(|cursor| Box::new(Unordered::new(cursor)))
    }

    /// Consumes this sequence into an iterator.
    ///
    /// Each item is either an element or the error reported by the cursor
    /// for that pull. The iterator ends after the first error.
    pub fn iter(&self) -> Result<Pulls<T>, Error> {
        Ok(Pulls {
            cursor: self.cursor()?,
            done: false,
        })
    }

    /// Consumes this sequence into a collection, stopping at the first error.
    pub fn try_collect<B: FromIterator<T>>(&self) -> Result<B, Error> {
        self.iter()?.collect()
    }

    /// Consumes this sequence, calling `f` on each element.
    pub fn for_each(&self, mut f: impl FnMut(T)) -> Result<(), Error> {
        for item in self.iter()? {
            f(item?);
        }
        Ok(())
    }

    /// Registers a handler to run when this sequence is
    /// [closed](Self::close).
    pub fn on_close(&self, handler: impl FnOnce() + Send + 'static) -> Result<(), Error> {
        if self.is_consumed() {
            return Err(Error::consumed());
        }
        self.close_handlers().push(Box::new(handler));
        Ok(())
    }

    /// Runs the close handlers registered on this sequence, in registration
    /// order. Handlers run at most once.
    pub fn close(&self) {
        let handlers = std::mem::take(&mut *self.close_handlers());
        for handler in handlers {
            handler();
        }
    }

    fn stage(&self) -> MutexGuard<'_, Stage<T>> {
        self.shared
            .stage
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn close_handlers(&self) -> MutexGuard<'_, Vec<CloseHandler>> {
        self.shared
            .close_handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn inspect<R>(&self, f: impl FnOnce(&(dyn Cursor<Item = T> + Send)) -> R) -> Result<R, Error> {
        match &*self.stage() {
            Stage::Fresh(cursor) => Ok(f(&**cursor)),
            Stage::Consumed => Err(Error::consumed()),
        }
    }

    /// Builds the next pipeline stage: the new sequence takes over this
    /// sequence's cursor, parallel request and close handlers.
    fn derive<U>(
        &self,
        wrap: impl FnOnce(BoxedCursor<T>) -> BoxedCursor<U>,
    ) -> Result<Sequence<U>, Error> {
        let cursor = self.cursor()?;
        let derived = Sequence::with_parallel(wrap(cursor), self.is_parallel());
        *derived.close_handlers() = std::mem::take(&mut *self.close_handlers());
        Ok(derived)
    }
}

impl<T: Send + 'static> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Sequence::of(iter)
    }
}

/// Iterator over the elements of a consumed [`Sequence`]. This struct is
/// created by [`Sequence::iter()`].
#[must_use = "iterators are lazy"]
pub struct Pulls<T> {
    cursor: BoxedCursor<T>,
    done: bool,
}

impl<T> Pulls<T> {
    /// Returns the characteristics of the underlying cursor.
    pub fn characteristics(&self) -> Characteristics {
        self.cursor.characteristics()
    }
}

impl<T> Iterator for Pulls<T> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || !self.cursor.has_more() {
            self.done = true;
            return None;
        }
        let item = self.cursor.advance();
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

impl<T> FusedIterator for Pulls<T> {}
