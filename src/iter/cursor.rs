// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Cursors are single-pass traversal handles over a sequence of elements.

use super::{Characteristic, Characteristics, Size};
use crate::Error;
use std::iter::Peekable;
use std::marker::PhantomData;

/// A single-pass traversal handle.
///
/// The protocol is to call [`has_more()`](Self::has_more), and to call
/// [`advance()`](Self::advance) only after [`has_more()`](Self::has_more)
/// returned true. Calling [`advance()`](Self::advance) on an exhausted cursor
/// returns an [`Exhausted`](crate::ErrorKind::Exhausted) error.
///
/// Cursors over a shared collection report their own policy with respect to
/// concurrent modifications of that collection: fail-fast cursors return a
/// [`ConcurrentModification`](crate::ErrorKind::ConcurrentModification) error
/// from [`advance()`](Self::advance), concurrent cursors tolerate them.
pub trait Cursor {
    /// The type of elements that this cursor produces.
    type Item;

    /// Returns whether another element is available.
    ///
    /// This must not consume an element: an implementation may prepare
    /// internal state (e.g. look ahead), but the element observed by the next
    /// [`advance()`](Self::advance) is the same whether or not this was
    /// called.
    fn has_more(&mut self) -> bool;

    /// Returns the next element, or relays a traversal error.
    fn advance(&mut self) -> Result<Self::Item, Error>;

    /// Returns an estimate of the number of remaining elements.
    fn estimate_size(&self) -> Size;

    /// Returns the characteristics of this cursor's traversal.
    fn characteristics(&self) -> Characteristics;
}

impl<C: Cursor + ?Sized> Cursor for Box<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        (**self).has_more()
    }

    fn advance(&mut self) -> Result<Self::Item, Error> {
        (**self).advance()
    }

    fn estimate_size(&self) -> Size {
        (**self).estimate_size()
    }

    fn characteristics(&self) -> Characteristics {
        (**self).characteristics()
    }
}

/// A cursor that produces no elements.
pub struct Empty<T> {
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Empty<T> {
    /// Creates an empty cursor.
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Cursor for Empty<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        false
    }

    fn advance(&mut self) -> Result<T, Error> {
        Err(Error::exhausted())
    }

    fn estimate_size(&self) -> Size {
        Size::Known(0)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::SIZED | Characteristics::SUBSIZED
    }
}

/// A cursor over an [`Iterator`].
///
/// The size estimate is derived from the iterator's
/// [`size_hint()`](Iterator::size_hint): its upper bound if any, and the
/// cursor is [`Sized`](Characteristic::Sized) when both bounds agree.
pub struct IterCursor<I: Iterator> {
    iter: Peekable<I>,
    characteristics: Characteristics,
}

impl<I: Iterator> IterCursor<I> {
    /// Creates a cursor over the given iterator, declaring the given
    /// characteristics. [`Sized`](Characteristic::Sized) and
    /// [`Subsized`](Characteristic::Subsized) are derived from the iterator
    /// rather than taken from `characteristics`.
    pub fn new(iter: I, characteristics: Characteristics) -> Self {
        let (lower, upper) = iter.size_hint();
        let exact = upper == Some(lower);
        Self {
            iter: iter.peekable(),
            characteristics: characteristics
                .with_if(Characteristic::Sized, exact)
                .with_if(Characteristic::Subsized, exact),
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn has_more(&mut self) -> bool {
        self.iter.peek().is_some()
    }

    fn advance(&mut self) -> Result<I::Item, Error> {
        self.iter.next().ok_or_else(Error::exhausted)
    }

    fn estimate_size(&self) -> Size {
        match self.iter.size_hint() {
            (_, Some(upper)) => Size::Known(upper),
            (_, None) => Size::Unbounded,
        }
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

/// A cursor that discards the first `n` elements of an inner cursor.
///
/// Elements are discarded lazily, on the first call to
/// [`has_more()`](Cursor::has_more) or [`advance()`](Cursor::advance).
#[must_use = "iterator adaptors are lazy"]
pub struct Skip<C> {
    inner: C,
    remaining_skips: usize,
}

impl<C: Cursor> Skip<C> {
    /// Creates a cursor skipping the first `n` elements of `inner`.
    pub fn new(inner: C, n: usize) -> Self {
        Self {
            inner,
            remaining_skips: n,
        }
    }

    fn skip_pending(&mut self) -> Result<(), Error> {
        while self.remaining_skips > 0 {
            if !self.inner.has_more() {
                self.remaining_skips = 0;
                break;
            }
            self.inner.advance()?;
            self.remaining_skips -= 1;
        }
        Ok(())
    }
}

impl<C: Cursor> Cursor for Skip<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        // An error while skipping is reported by the following advance().
        match self.skip_pending() {
            Ok(()) => self.inner.has_more(),
            Err(_) => true,
        }
    }

    fn advance(&mut self) -> Result<C::Item, Error> {
        self.skip_pending()?;
        self.inner.advance()
    }

    fn estimate_size(&self) -> Size {
        self.inner.estimate_size().saturating_sub(self.remaining_skips)
    }

    fn characteristics(&self) -> Characteristics {
        self.inner.characteristics()
    }
}

/// A cursor that stops after at most `n` elements of an inner cursor.
#[must_use = "iterator adaptors are lazy"]
pub struct Limit<C> {
    inner: C,
    remaining: usize,
}

impl<C: Cursor> Limit<C> {
    /// Creates a cursor producing at most `n` elements of `inner`.
    pub fn new(inner: C, n: usize) -> Self {
        Self {
            inner,
            remaining: n,
        }
    }
}

impl<C: Cursor> Cursor for Limit<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        self.remaining > 0 && self.inner.has_more()
    }

    fn advance(&mut self) -> Result<C::Item, Error> {
        if self.remaining == 0 {
            return Err(Error::exhausted());
        }
        let item = self.inner.advance()?;
        self.remaining -= 1;
        Ok(item)
    }

    fn estimate_size(&self) -> Size {
        self.inner.estimate_size().min(Size::Known(self.remaining))
    }

    // A limit over an unsized cursor gets a finite estimate, but the estimate
    // is only an upper bound so it stays unsized.
    fn characteristics(&self) -> Characteristics {
        self.inner.characteristics()
    }
}

/// A cursor that drops the [`Ordered`](Characteristic::Ordered) guarantee of
/// an inner cursor, leaving its elements unchanged.
#[must_use = "iterator adaptors are lazy"]
pub struct Unordered<C> {
    inner: C,
}

impl<C: Cursor> Unordered<C> {
    /// Wraps the given cursor.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Cursor> Cursor for Unordered<C> {
    type Item = C::Item;

    fn has_more(&mut self) -> bool {
        self.inner.has_more()
    }

    fn advance(&mut self) -> Result<C::Item, Error> {
        self.inner.advance()
    }

    fn estimate_size(&self) -> Size {
        self.inner.estimate_size()
    }

    fn characteristics(&self) -> Characteristics {
        self.inner
            .characteristics()
            .without(Characteristic::Ordered)
    }
}
