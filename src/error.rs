// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error type shared by sequences, cursors and the zip combinator.

use std::error::Error as StdError;
use std::fmt;

/// Category of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required sequence was absent.
    MissingArgument,
    /// The arguments were present but not acceptable together, e.g. the same
    /// sequence was passed twice.
    InvalidArgument,
    /// A sequence was used after its traversal handle was already taken.
    InvalidState,
    /// The collection backing a fail-fast cursor was structurally modified
    /// after the traversal began.
    ConcurrentModification,
    /// A cursor was advanced past its last element.
    Exhausted,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::MissingArgument => "missing argument",
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::ConcurrentModification => "concurrent modification",
            ErrorKind::Exhausted => "exhausted",
        }
    }
}

/// Error returned by fallible sequence and cursor operations.
///
/// Traversal errors ([`ErrorKind::ConcurrentModification`] and
/// [`ErrorKind::Exhausted`]) are produced by the cursor that owns the
/// backing data, and adaptors such as [`zip()`](crate::zip) relay them
/// unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
}

impl Error {
    /// Creates an error of the given kind without a message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the message attached to this error, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Attaches a human-readable message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn consumed() -> Self {
        Error::new(ErrorKind::InvalidState)
            .with_message("sequence has already been operated upon or consumed")
    }

    pub(crate) fn exhausted() -> Self {
        Error::new(ErrorKind::Exhausted).with_message("cursor has no more elements")
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.as_str())?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl StdError for Error {}
