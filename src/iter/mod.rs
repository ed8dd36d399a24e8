// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lazy sequences, their cursors, and the zip combinator.

mod characteristics;
pub mod cursor;
mod pair;
mod sequence;
mod zip;

pub use characteristics::{
    zipped_characteristics, zipped_size, Characteristic, Characteristics, Size,
};
pub use cursor::Cursor;
pub use pair::{NullableDisplay, Pair};
pub use sequence::{BoxedCursor, Pulls, Sequence};
pub use zip::{zip, zip_nullable, ZippedCursor, ZippedSource};
