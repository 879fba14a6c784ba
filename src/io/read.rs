// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Provides the [`Read`] and [`ReadZero`] traits, the decoding half of
//! [`io`](crate::io).

use static_assertions::assert_obj_safe;

use crate::io;
use crate::io::endian::LeInt;

/// A source of frame bytes whose total length is known up front.
///
/// Unlike [`std::io::Read`], a `Read` always knows how much is left. Frame
/// decoders rely on this to check a header's declared length against the
/// bytes actually delivered before consuming the body.
///
/// A read that fails consumes nothing.
pub trait Read {
    /// Fills all of `out`, or fails with `BufferExhausted`.
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error>;

    /// Returns the number of unread bytes.
    fn remaining_data(&self) -> usize;

    /// Reads a little-endian integer.
    #[inline]
    fn read_le<I: LeInt>(&mut self) -> Result<I, io::Error>
    where
        Self: Sized,
    {
        I::read_from(self)
    }

    /// Reads exactly `N` bytes into an array.
    #[inline]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], io::Error>
    where
        Self: Sized,
    {
        let mut out = [0; N];
        self.read_bytes(&mut out)?;
        Ok(out)
    }
}
assert_obj_safe!(Read);

/// A [`Read`] over a buffer of lifetime `'wire`, which can lend out pieces of
/// that buffer instead of copying them.
pub trait ReadZero<'wire>: Read {
    /// Reads exactly `n` bytes as a borrow of the underlying buffer.
    fn read_slice(&mut self, n: usize) -> Result<&'wire [u8], io::Error>;
}

impl<R: Read + ?Sized> Read for &'_ mut R {
    #[inline]
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error> {
        R::read_bytes(*self, out)
    }

    #[inline]
    fn remaining_data(&self) -> usize {
        R::remaining_data(*self)
    }
}

impl<'wire, R: ReadZero<'wire> + ?Sized> ReadZero<'wire> for &'_ mut R {
    #[inline]
    fn read_slice(&mut self, n: usize) -> Result<&'wire [u8], io::Error> {
        R::read_slice(*self, n)
    }
}

/// Splits `n` bytes off the front of `buf`, leaving it untouched if there
/// are fewer than `n`.
fn split_front<'a>(
    buf: &mut &'a [u8],
    n: usize,
) -> Result<&'a [u8], io::Error> {
    if buf.len() < n {
        return Err(io::Error::BufferExhausted);
    }
    let (front, rest) = buf.split_at(n);
    *buf = rest;
    Ok(front)
}

impl Read for &[u8] {
    fn read_bytes(&mut self, out: &mut [u8]) -> Result<(), io::Error> {
        out.copy_from_slice(split_front(self, out.len())?);
        Ok(())
    }

    fn remaining_data(&self) -> usize {
        self.len()
    }
}

impl<'wire> ReadZero<'wire> for &'wire [u8] {
    fn read_slice(&mut self, n: usize) -> Result<&'wire [u8], io::Error> {
        split_front(self, n)
    }
}
