// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Provides the [`Write`] trait, the encoding half of [`io`](crate::io).

use alloc::vec::Vec;

use static_assertions::assert_obj_safe;

use crate::io;
use crate::io::endian::LeInt;

/// A sink for an encoded frame.
///
/// Writes are all-or-nothing: either every byte of `buf` lands, or nothing
/// does and an error is returned.
pub trait Write {
    /// Appends all of `buf`.
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error>;

    /// Appends a little-endian integer.
    #[inline]
    fn write_le<I: LeInt>(&mut self, val: I) -> Result<(), io::Error>
    where
        Self: Sized,
    {
        val.write_to(self)
    }
}

assert_obj_safe!(Write);

impl<W: Write + ?Sized> Write for &'_ mut W {
    #[inline]
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error> {
        W::write_bytes(*self, buf)
    }
}

/// Frames are encoded into a `Vec` reserved up front to the frame's size.
///
/// Writing never grows the `Vec` past the capacity it already has, so an
/// encoder that writes more than it reserved gets `BufferExhausted` rather
/// than a silent reallocation.
impl Write for Vec<u8> {
    fn write_bytes(&mut self, buf: &[u8]) -> Result<(), io::Error> {
        if self.capacity() - self.len() < buf.len() {
            return Err(io::Error::BufferExhausted);
        }
        self.extend_from_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::Read as _;

    #[test]
    fn bounded_by_capacity() {
        let mut buf = Vec::with_capacity(7);
        let spare = buf.capacity() - 7;
        buf.write_bytes(b"AT").unwrap();
        buf.write_le::<u8>(b'A').unwrap();
        buf.write_le::<u32>(0x0201_0050).unwrap();
        assert_eq!(buf, b"ATAP\x00\x01\x02");

        assert_eq!(
            buf.write_bytes(&vec![0; spare + 1]),
            Err(io::Error::BufferExhausted)
        );
        assert_eq!(buf.len(), 7);

        let mut r = &buf[3..];
        assert_eq!(r.read_le::<u32>().unwrap(), 0x0201_0050);
    }
}
