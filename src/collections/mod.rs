// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shared collections that expose their contents as [`Sequence`]s, each with
//! its own policy with respect to modifications made during a traversal.
//!
//! - [`FailFastList`]: cursors fail with a
//!   [`ConcurrentModification`](crate::ErrorKind::ConcurrentModification)
//!   error once the list is structurally modified after the traversal began.
//! - [`CopyOnWriteList`]: cursors traverse an immutable snapshot, and never
//!   observe later writes.
//! - [`ConcurrentSortedSet`]: cursors are weakly consistent, they observe
//!   insertions ahead of their position and never fail.
//!
//! All collections are cheap-to-clone handles, and clones share the same
//! contents.
//!
//! [`Sequence`]: crate::Sequence

mod concurrent_set;
mod copy_on_write;
mod fail_fast;

pub use concurrent_set::{ConcurrentSortedSet, ConcurrentSortedSetCursor};
pub use copy_on_write::{CopyOnWriteCursor, CopyOnWriteList};
pub use fail_fast::{FailFastCursor, FailFastList};

use crossbeam_utils::sync::{ShardedLock, ShardedLockReadGuard, ShardedLockWriteGuard};
use std::sync::PoisonError;

// Mutations leave the contents consistent even when they panic, so poisoning
// is ignored.
fn read<T>(lock: &ShardedLock<T>) -> ShardedLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &ShardedLock<T>) -> ShardedLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
