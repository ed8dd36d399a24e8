// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lazy pairwise combination of two sequences.

use super::{zipped_characteristics, zipped_size, Characteristics, Cursor, Pair, Sequence, Size};
use crate::macros::{log_debug, log_trace};
use crate::{Error, ErrorKind};

/// A cursor that advances two cursors in lockstep, and stops as soon as either
/// of them is exhausted.
#[must_use = "iterator adaptors are lazy"]
pub struct ZippedCursor<C1, C2> {
    first: C1,
    second: C2,
}

impl<C1: Cursor, C2: Cursor> ZippedCursor<C1, C2> {
    /// Zips the two given cursors.
    pub fn new(first: C1, second: C2) -> Self {
        Self { first, second }
    }
}

impl<C1: Cursor, C2: Cursor> Cursor for ZippedCursor<C1, C2> {
    type Item = Pair<C1::Item, C2::Item>;

    /// Both sides are queried, so that each one can prepare its next element
    /// even when the other one is exhausted.
    fn has_more(&mut self) -> bool {
        let first = self.first.has_more();
        let second = self.second.has_more();
        first && second
    }

    fn advance(&mut self) -> Result<Self::Item, Error> {
        let m1 = self.first.advance()?;
        let m2 = self.second.advance()?;
        Ok(Pair::of(m1, m2))
    }

    fn estimate_size(&self) -> Size {
        zipped_size(self.first.estimate_size(), self.second.estimate_size())
    }

    fn characteristics(&self) -> Characteristics {
        zipped_characteristics(
            self.first.characteristics(),
            self.second.characteristics(),
            self.estimate_size(),
        )
    }
}

/// The traversal source of a zipped sequence.
///
/// The merged characteristics are computed once from both sides at
/// construction. Until the first pull, the size estimate follows both sides,
/// which may still change before they bind to their data. From the first pull
/// on, it counts down from the size found at that point. The source isn't
/// splittable: pairs are only produced sequentially.
#[must_use = "iterator adaptors are lazy"]
pub struct ZippedSource<C1, C2> {
    cursor: ZippedCursor<C1, C2>,
    characteristics: Characteristics,
    /// Size estimate captured on the first pull.
    bound_size: Option<Size>,
    pulled: usize,
}

impl<C1: Cursor, C2: Cursor> ZippedSource<C1, C2> {
    /// Creates a source over the two given cursors.
    pub fn new(first: C1, second: C2) -> Self {
        let cursor = ZippedCursor::new(first, second);
        let characteristics = cursor.characteristics();
        Self {
            cursor,
            characteristics,
            bound_size: None,
            pulled: 0,
        }
    }
}

impl<C1: Cursor, C2: Cursor> Cursor for ZippedSource<C1, C2> {
    type Item = Pair<C1::Item, C2::Item>;

    fn has_more(&mut self) -> bool {
        self.cursor.has_more()
    }

    fn advance(&mut self) -> Result<Self::Item, Error> {
        if self.bound_size.is_none() {
            let size = self.cursor.estimate_size();
            log_debug!("[lockstep] Started zipped traversal: size = {:?}", size);
            self.bound_size = Some(size);
        }
        let pair = self.cursor.advance()?;
        self.pulled += 1;
        log_trace!("[lockstep] Pulled pair #{}", self.pulled);
        Ok(pair)
    }

    fn estimate_size(&self) -> Size {
        match self.bound_size {
            Some(size) => size.saturating_sub(self.pulled),
            None => self.cursor.estimate_size(),
        }
    }

    fn characteristics(&self) -> Characteristics {
        self.characteristics
    }
}

/// Zips two sequences into a lazy sequence of [`Pair`]s.
///
/// The i-th pair holds the i-th element of each sequence, and the zipped
/// sequence stops as soon as either input is exhausted. Both inputs are
/// consumed by this call, but their data is only read once the zipped sequence
/// is traversed, so changes made to the backing collections in the meantime
/// are visible. Changes made during the traversal are handled by each side
/// according to its own concurrency policy, and traversal errors are relayed
/// unchanged.
///
/// The zipped sequence is always sequential, and has its own close handlers.
///
/// # Errors
///
/// - [`InvalidArgument`](ErrorKind::InvalidArgument) if both arguments are
///   the same sequence instance,
/// - [`InvalidState`](ErrorKind::InvalidState) if either sequence is already
///   consumed, in which case neither is consumed by this call.
///
/// ```
/// # use lockstep::{zip, Sequence};
/// let numbers = Sequence::iterate(1, |n| n + 1);
/// let letters = Sequence::of(["a", "b", "c"]);
/// let zipped = zip(&numbers, &letters)?;
///
/// let mut output = Vec::new();
/// zipped.for_each(|pair| output.push(pair.to_string()))?;
/// assert_eq!(output.join(", "), "(1, a), (2, b), (3, c)");
/// # Ok::<(), lockstep::Error>(())
/// ```
pub fn zip<T: 'static, U: 'static>(
    first: &Sequence<T>,
    second: &Sequence<U>,
) -> Result<Sequence<Pair<T, U>>, Error> {
    if first.is_same_instance(second) {
        return Err(Error::new(ErrorKind::InvalidArgument)
            .with_message("cannot zip a sequence with itself"));
    }
    if first.is_consumed() || second.is_consumed() {
        log_debug!("[lockstep] Refused to zip a consumed sequence");
        return Err(Error::consumed());
    }

    let source = ZippedSource::new(first.cursor()?, second.cursor()?);
    log_debug!(
        "[lockstep] Zipped sequences: size = {:?}, characteristics = {:?}",
        source.estimate_size(),
        source.characteristics
    );
    Ok(Sequence::from_cursor(source))
}

/// Same as [`zip()`], for sequences that may be absent.
///
/// # Errors
///
/// [`MissingArgument`](ErrorKind::MissingArgument) if either argument is
/// absent, otherwise see [`zip()`].
pub fn zip_nullable<T: 'static, U: 'static>(
    first: Option<&Sequence<T>>,
    second: Option<&Sequence<U>>,
) -> Result<Sequence<Pair<T, U>>, Error> {
    match (first, second) {
        (Some(first), Some(second)) => zip(first, second),
        (None, _) => Err(Error::new(ErrorKind::MissingArgument)
            .with_message("first sequence is absent")),
        (_, None) => Err(Error::new(ErrorKind::MissingArgument)
            .with_message("second sequence is absent")),
    }
}
