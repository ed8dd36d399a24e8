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
use std::fmt;
use std::sync::Arc;

/// A shared list where every mutation publishes a new snapshot of the
/// contents. Cursors traverse the snapshot that was current when they started,
/// and never fail.
pub struct CopyOnWriteList<T> {
    snapshot: Arc<ShardedLock<Arc<Vec<T>>>>,
}

impl<T> Clone for CopyOnWriteList<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Arc::clone(&self.snapshot),
        }
    }
}

impl<T> Default for CopyOnWriteList<T> {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl<T> From<Vec<T>> for CopyOnWriteList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            snapshot: Arc::new(ShardedLock::new(Arc::new(items))),
        }
    }
}

impl<T> FromIterator<T> for CopyOnWriteList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for CopyOnWriteList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot().iter()).finish()
    }
}

impl<T> CopyOnWriteList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current snapshot of the contents.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&read(&self.snapshot))
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        read(&self.snapshot).len()
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        read(&self.snapshot).is_empty()
    }
}

impl<T: Clone> CopyOnWriteList<T> {
    /// Applies a mutation to the contents. The current snapshot is copied only
    /// if a cursor still holds it.
    fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
        let mut snapshot = write(&self.snapshot);
        f(Arc::make_mut(&mut snapshot))
    }

    /// Appends an element.
    pub fn push(&self, item: T) {
        self.mutate(|items| items.push(item))
    }

    /// Inserts an element at position `index`, shifting later elements.
    /// Returns `false` and leaves the list unchanged if `index > len`.
    pub fn insert(&self, index: usize, item: T) -> bool {
        self.mutate(|items| {
            let fits = index <= items.len();
            if fits {
                items.insert(index, item);
            }
            fits
        })
    }

    /// Removes and returns the element at position `index`, or returns
    /// [`None`] if it is out of bounds.
    pub fn remove(&self, index: usize) -> Option<T> {
        self.mutate(|items| (index < items.len()).then(|| items.remove(index)))
    }

    /// Replaces the element at position `index`, returning the previous one,
    /// or returns [`None`] if it is out of bounds.
    pub fn set(&self, index: usize, item: T) -> Option<T> {
        self.mutate(|items| {
            items
                .get_mut(index)
                .map(|slot| std::mem::replace(slot, item))
        })
    }

    /// Removes all elements.
    pub fn clear(&self) {
        *write(&self.snapshot) = Arc::new(Vec::new());
    }

    /// Returns a copy of the element at position `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        read(&self.snapshot).get(index).cloned()
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<T> {
        Vec::clone(&read(&self.snapshot))
    }

    /// Returns a snapshot cursor over this list.
    pub fn cursor(&self) -> CopyOnWriteCursor<T> {
        CopyOnWriteCursor {
            list: self.clone(),
            snapshot: None,
            index: 0,
        }
    }

    /// Returns an ordered, sized and immutable sequence over this list.
    ///
    /// The sequence takes its snapshot when its first element is pulled.
    ///
    /// ```
    /// # use lockstep::collections::CopyOnWriteList;
    /// let list = CopyOnWriteList::from(vec![1, 2, 3]);
    /// let sequence = list.sequence();
    /// list.push(4);
    ///
    /// let mut output = Vec::new();
    /// sequence.for_each(|x| {
    ///     list.push(x * 10);
    ///     output.push(x);
    /// })?;
    /// assert_eq!(output, vec![1, 2, 3, 4]);
    /// assert_eq!(list.len(), 8);
    /// # Ok::<(), lockstep::Error>(())
    /// ```
    pub fn sequence(&self) -> Sequence<T>
    where
        T: Send + Sync + 'static,
    {
        Sequence::from_cursor(self.cursor())
    }
}

/// A cursor over a snapshot of a [`CopyOnWriteList`].
///
/// The snapshot is taken on the first [`advance()`](Cursor::advance).
pub struct CopyOnWriteCursor<T> {
    list: CopyOnWriteList<T>,
    snapshot: Option<Arc<Vec<T>>>,
    index: usize,
}

impl<T> CopyOnWriteCursor<T> {
    fn len(&self) -> usize {
        match &self.snapshot {
            Some(snapshot) => snapshot.len(),
            None => self.list.len(),
        }
    }
}

impl<T: Clone> Cursor for CopyOnWriteCursor<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        self.index < self.len()
    }

    fn advance(&mut self) -> Result<T, Error> {
        let list = &self.list;
        let snapshot = self.snapshot.get_or_insert_with(|| list.snapshot());
        let item = snapshot.get(self.index).cloned().ok_or_else(Error::exhausted)?;
        self.index += 1;
        Ok(item)
    }

    fn estimate_size(&self) -> Size {
        Size::Known(self.len().saturating_sub(self.index))
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
            | Characteristics::SIZED
            | Characteristics::SUBSIZED
            | Characteristics::IMMUTABLE
    }
}
