// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! I/O interfaces, in lieu of [`std::io`].
//!
//! These functions and traits are intended for walking ATAP frames held in
//! byte buffers. Every read and write is bounds-checked against what is left
//! in the underlying buffer; running off the end is an error, never a
//! truncated or out-of-bounds access.

pub mod endian;
pub mod read;
pub mod write;

pub use read::Read;
pub use read::ReadZero;
pub use write::Write;

/// A generic, low-level I/O error.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that some underlying buffer has been completely used up,
    /// either for reading from or writing to.
    ///
    /// This is typically a fatal error, since it is probably not possible
    /// to re-allocate that underlying buffer.
    BufferExhausted,

    /// Indicates that an unspecified, internal failure occurred.
    Internal,
}
