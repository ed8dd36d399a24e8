// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use super::{read, write};
use crate::iter::{Characteristics, Cursor, Sequence, Size};
use crate::macros::log_debug;
use crate::{Error, ErrorKind};
use crossbeam_utils::sync::ShardedLock;
use std::fmt;
use std::sync::Arc;

struct ListState<T> {
    items: Vec<T>,
    /// Number of structural modifications so far.
    mod_count: u64,
}

impl<T> ListState<T> {
    fn modified(&mut self) {
        self.mod_count = self.mod_count.wrapping_add(1);
    }
}

/// A shared list whose cursors fail fast when the list is structurally
/// modified during a traversal.
///
/// Structural modifications are the ones that change the length: [`push()`],
/// [`insert()`], [`remove()`] and [`clear()`]. Replacing an element with
/// [`set()`] isn't structural.
///
/// [`push()`]: Self::push
/// [`insert()`]: Self::insert
/// [`remove()`]: Self::remove
/// [`clear()`]: Self::clear
/// [`set()`]: Self::set
pub struct FailFastList<T> {
    state: Arc<ShardedLock<ListState<T>>>,
}

impl<T> Clone for FailFastList<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for FailFastList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for FailFastList<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            state: Arc::new(ShardedLock::new(ListState { items, mod_count: 0 })),
        }
    }
}

impl<T> FromIterator<T> for FailFastList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: fmt::Debug> fmt::Debug for FailFastList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(read(&self.state).items.iter()).finish()
    }
}

impl<T> FailFastList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        read(&self.state).items.len()
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        read(&self.state).items.is_empty()
    }

    /// Appends an element.
    pub fn push(&self, item: T) {
        let mut state = write(&self.state);
        state.items.push(item);
        state.modified();
    }

    /// Inserts an element at position `index`, shifting later elements.
    /// Returns `false` and leaves the list unchanged if `index > len`.
    pub fn insert(&self, index: usize, item: T) -> bool {
        let mut state = write(&self.state);
        if index > state.items.len() {
            return false;
        }
        state.items.insert(index, item);
        state.modified();
        true
    }

    /// Removes and returns the element at position `index`, or returns
    /// [`None`] if it is out of bounds.
    pub fn remove(&self, index: usize) -> Option<T> {
        let mut state = write(&self.state);
        if index >= state.items.len() {
            return None;
        }
        let item = state.items.remove(index);
        state.modified();
        Some(item)
    }

    /// Replaces the element at position `index`, returning the previous one,
    /// or returns [`None`] if it is out of bounds.
    pub fn set(&self, index: usize, item: T) -> Option<T> {
        let mut state = write(&self.state);
        state
            .items
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, item))
    }

    /// Removes all elements.
    pub fn clear(&self) {
        let mut state = write(&self.state);
        state.items.clear();
        state.modified();
    }
}

impl<T: Clone> FailFastList<T> {
    /// Returns a copy of the element at position `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        read(&self.state).items.get(index).cloned()
    }

    /// Returns a copy of the elements.
    pub fn to_vec(&self) -> Vec<T> {
        read(&self.state).items.clone()
    }

    /// Returns a fail-fast cursor over this list.
    pub fn cursor(&self) -> FailFastCursor<T> {
        FailFastCursor {
            state: Arc::clone(&self.state),
            index: 0,
            binding: None,
        }
    }

    /// Returns an ordered and sized sequence over this list.
    ///
    /// The sequence is bound to the list's contents when its first element is
    /// pulled, so modifications made before that are visible.
    ///
    /// ```
    /// # use lockstep::collections::FailFastList;
    /// # use lockstep::ErrorKind;
    /// let list = FailFastList::from(vec![1, 2, 3]);
    /// let sequence = list.sequence();
    /// list.push(4);
    ///
    /// let mut pulls = sequence.iter()?;
    /// assert_eq!(pulls.next(), Some(Ok(1)));
    /// list.push(5);
    /// assert_eq!(
    ///     pulls.next().unwrap().unwrap_err().kind(),
    ///     ErrorKind::ConcurrentModification
    /// );
    /// # Ok::<(), lockstep::Error>(())
    /// ```
    pub fn sequence(&self) -> Sequence<T>
    where
        T: Send + Sync + 'static,
    {
        Sequence::from_cursor(self.cursor())
    }
}

#[derive(Clone, Copy)]
struct Binding {
    fence: usize,
    expected_mod_count: u64,
}

/// A cursor over a [`FailFastList`].
///
/// The cursor binds to the list on its first [`advance()`](Cursor::advance),
/// recording the current length and modification count. Any later structural
/// modification of the list makes the next [`advance()`](Cursor::advance)
/// fail with a [`ConcurrentModification`](ErrorKind::ConcurrentModification)
/// error.
pub struct FailFastCursor<T> {
    state: Arc<ShardedLock<ListState<T>>>,
    index: usize,
    binding: Option<Binding>,
}

impl<T: Clone> Cursor for FailFastCursor<T> {
    type Item = T;

    fn has_more(&mut self) -> bool {
        match self.binding {
            Some(binding) => self.index < binding.fence,
            None => self.index < read(&self.state).items.len(),
        }
    }

    fn advance(&mut self) -> Result<T, Error> {
        let state = read(&self.state);
        let binding = *self.binding.get_or_insert_with(|| {
            log_debug!(
                "[lockstep] Bound fail-fast cursor to {} elements",
                state.items.len()
            );
            Binding {
                fence: state.items.len(),
                expected_mod_count: state.mod_count,
            }
        });

        if self.index >= binding.fence {
            return Err(Error::exhausted());
        }
        let item = match state.items.get(self.index) {
            Some(item) if state.mod_count == binding.expected_mod_count => item.clone(),
            _ => {
                return Err(Error::new(ErrorKind::ConcurrentModification)
                    .with_message("list was structurally modified during the traversal"))
            }
        };
        self.index += 1;
        Ok(item)
    }

    fn estimate_size(&self) -> Size {
        let fence = match self.binding {
            Some(binding) => binding.fence,
            None => read(&self.state).items.len(),
        };
        Size::Known(fence.saturating_sub(self.index))
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED | Characteristics::SIZED | Characteristics::SUBSIZED
    }
}
