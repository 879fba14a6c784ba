// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Little-endian integer I/O.
//!
//! Every multi-byte integer in an ATAP frame is little-endian; nothing in the
//! protocol is big-endian, so only one byte order is provided.

use byteorder::ByteOrder as _;
use byteorder::LE;

use crate::io;
use crate::io::Read;
use crate::io::Write;

/// An integer that appears on the wire in little-endian order.
pub trait LeInt: Sized + Copy {
    /// Reads a `Self` out of `r`.
    fn read_from<R: Read>(r: R) -> Result<Self, io::Error>;

    /// Writes `self` into `w`.
    fn write_to<W: Write>(self, w: W) -> Result<(), io::Error>;
}

impl LeInt for u8 {
    #[inline]
    fn read_from<R: Read>(mut r: R) -> Result<Self, io::Error> {
        let [byte] = r.read_array::<1>()?;
        Ok(byte)
    }

    #[inline]
    fn write_to<W: Write>(self, mut w: W) -> Result<(), io::Error> {
        w.write_bytes(&[self])
    }
}

macro_rules! le_int {
    ($($int:ty => $read:ident, $write:ident;)*) => {$(
        impl LeInt for $int {
            #[inline]
            fn read_from<R: Read>(mut r: R) -> Result<Self, io::Error> {
                let bytes = r.read_array::<{ core::mem::size_of::<$int>() }>()?;
                Ok(LE::$read(&bytes))
            }

            #[inline]
            fn write_to<W: Write>(self, mut w: W) -> Result<(), io::Error> {
                let mut bytes = [0; core::mem::size_of::<$int>()];
                LE::$write(&mut bytes, self);
                w.write_bytes(&bytes)
            }
        }
    )*};
}

le_int! {
    u16 => read_u16, write_u16;
    u32 => read_u32, write_u32;
}
