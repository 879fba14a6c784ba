// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Encoding and decoding of ATAP frames.
//!
//! Decoding is zero-copy: [`FromWire`] types borrow variable-length fields
//! out of the frame they were parsed from. Encoding goes through
//! [`ToWire::wire_size()`] first, so that [`to_vec()`] allocates once and
//! can report `OutOfMemory` instead of aborting.

use alloc::vec::Vec;
use core::fmt;

use crate::io;
use crate::io::endian::LeInt;
use crate::io::Read as _;
use crate::io::ReadZero;
use crate::io::Write;

/// A type that can be decoded from a frame held in a buffer of lifetime
/// `'wire`.
pub trait FromWire<'wire>: Sized {
    /// Decodes a `Self` from the front of `r`.
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, Error>;
}

/// An encoding or decoding failure.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates that something went wrong in an `io` operation.
    Io(io::Error),

    /// Indicates that allocating the output buffer failed.
    OutOfMemory,

    /// Indicates that some field within the message was outside of its
    /// valid range, or that a declared length disagrees with the bytes
    /// actually present.
    OutOfRange,
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// A type that can be encoded into a frame.
pub trait ToWire: Sized {
    /// Returns the exact number of bytes [`ToWire::to_wire()`] will write.
    fn wire_size(&self) -> usize;

    /// Encodes `self` into `w`.
    fn to_wire<W: Write>(&self, w: W) -> Result<(), Error>;
}

/// Serializes `msg` into a freshly-allocated buffer of exactly
/// [`ToWire::wire_size()`] bytes.
pub fn to_vec<T: ToWire>(msg: &T) -> Result<Vec<u8>, Error> {
    let size = msg.wire_size();
    let mut buf = Vec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| Error::OutOfMemory)?;

    msg.to_wire(&mut buf)?;
    if buf.len() != size {
        return Err(Error::Io(io::Error::Internal));
    }
    Ok(buf)
}

/// Deserializes a `T` that must span all of `bytes`.
///
/// Trailing bytes are an error.
pub fn from_bytes<'wire, T: FromWire<'wire>>(
    bytes: &'wire [u8],
) -> Result<T, Error> {
    let mut r = bytes;
    let msg = T::from_wire(&mut r)?;
    if r.remaining_data() != 0 {
        return Err(Error::OutOfRange);
    }
    Ok(msg)
}

/// Converts a length into a `u32` length field.
pub(crate) fn len_field(len: usize) -> Result<u32, Error> {
    u32::try_from(len).map_err(|_| Error::OutOfRange)
}

/// Writes a variable-length byte field: a `u32` length, then the bytes.
pub(crate) fn write_blob<W: Write>(mut w: W, bytes: &[u8]) -> Result<(), Error> {
    w.write_le(len_field(bytes.len())?)?;
    w.write_bytes(bytes)?;
    Ok(())
}

/// Reads a variable-length byte field written by [`write_blob()`], refusing
/// lengths above `max`.
pub(crate) fn read_blob<'wire, R: ReadZero<'wire>>(
    r: &mut R,
    max: usize,
) -> Result<&'wire [u8], Error> {
    let len = r.read_le::<u32>()? as usize;
    if len > max {
        return Err(Error::OutOfRange);
    }
    Ok(r.read_slice(len)?)
}

/// A fieldless enum with a fixed wire encoding and a name per variant.
///
/// Every ATAP enum is one byte on the wire; the name is the variant's Rust
/// identifier, which is also what `Display`, `FromStr`, and the optional
/// serde derives use. Implement this with `wire_enum!` rather than by hand.
///
/// For every `x`, `from_wire_value(x.to_wire_value()) == Some(x)` and
/// `from_name(x.name()) == Some(x)`.
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    /// The integer type this enum is encoded as.
    type Wire: LeInt + PartialEq;

    /// Every variant, in declaration order.
    const VARIANTS: &'static [Self];

    /// Returns the wire encoding of `self`.
    fn to_wire_value(self) -> Self::Wire;

    /// Returns the name of `self`.
    fn name(self) -> &'static str;

    /// Looks up the variant encoded as `wire`.
    fn from_wire_value(wire: Self::Wire) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|v| v.to_wire_value() == wire)
    }

    /// Looks up the variant called `name`. Matching is exact.
    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.name() == name)
    }
}

impl<'wire, E: WireEnum> FromWire<'wire> for E {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, Error> {
        let wire = E::Wire::read_from(r)?;
        Self::from_wire_value(wire).ok_or(Error::OutOfRange)
    }
}

impl<E: WireEnum> ToWire for E {
    fn wire_size(&self) -> usize {
        core::mem::size_of::<E::Wire>()
    }

    fn to_wire<W: Write>(&self, w: W) -> Result<(), Error> {
        Ok(self.to_wire_value().write_to(w)?)
    }
}

/// The error returned when parsing a [`WireEnum`] from an unknown name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UnknownName;

impl fmt::Display for UnknownName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("unknown variant name")
    }
}

/// Declares a [`WireEnum`].
///
/// ```text
/// wire_enum! {
///     /// A curve.
///     pub enum Curve: u8 {
///         /// NIST P-256.
///         P256 = 0x01,
///     }
/// }
/// ```
macro_rules! wire_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident : $wire:ident {
        $($(#[$meta_variant:meta])* $variant:ident = $value:literal,)*
    }) => {
        $(#[$meta])*
        #[repr($wire)]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
        )]
        $vis enum $name {
            $($(#[$meta_variant])* $variant = $value,)*
        }

        impl $crate::protocol::wire::WireEnum for $name {
            type Wire = $wire;
            const VARIANTS: &'static [Self] = &[$(Self::$variant,)*];

            fn to_wire_value(self) -> $wire {
                self as $wire
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str($crate::protocol::wire::WireEnum::name(*self))
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::protocol::wire::UnknownName;

            fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
                <Self as $crate::protocol::wire::WireEnum>::from_name(s)
                    .ok_or($crate::protocol::wire::UnknownName)
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    wire_enum! {
        /// A sparse enum, with a gap in its encoding.
        pub enum Sparse: u8 {
            /// Zero.
            Zero = 0x00,
            /// One.
            One = 0x01,
            /// Not two.
            Five = 0x05,
        }
    }

    #[test]
    fn names() {
        assert_eq!(Sparse::Five.name(), "Five");
        assert_eq!(Sparse::from_name("One"), Some(Sparse::One));
        assert_eq!(Sparse::from_name("one"), None);
        assert_eq!("Zero".parse::<Sparse>(), Ok(Sparse::Zero));
        assert_eq!("Two".parse::<Sparse>(), Err(UnknownName));
        assert_eq!(Sparse::One.to_string(), "One");
    }

    #[test]
    fn every_variant_encodes() {
        for &v in Sparse::VARIANTS {
            assert_eq!(Sparse::from_wire_value(v.to_wire_value()), Some(v));
        }
        assert_eq!(Sparse::from_wire_value(0x02), None);
    }

    #[test]
    fn enum_from_wire() {
        assert_eq!(from_bytes::<Sparse>(&[0x05]).unwrap(), Sparse::Five);
        assert_eq!(
            from_bytes::<Sparse>(&[0x03]).unwrap_err(),
            Error::OutOfRange
        );
        assert_eq!(
            from_bytes::<Sparse>(&[0x01, 0x00]).unwrap_err(),
            Error::OutOfRange
        );
        assert_eq!(to_vec(&Sparse::One).unwrap(), [0x01]);
    }

    #[test]
    fn blobs() {
        let mut buf = Vec::with_capacity(7);
        write_blob(&mut buf, b"abc").unwrap();
        assert_eq!(buf, [3, 0, 0, 0, b'a', b'b', b'c']);

        let mut r = &buf[..];
        assert_eq!(read_blob(&mut r, 3).unwrap(), b"abc");

        let mut r = &buf[..];
        assert_eq!(read_blob(&mut r, 2).unwrap_err(), Error::OutOfRange);

        let mut r = &buf[..6];
        assert_eq!(
            read_blob(&mut r, 3).unwrap_err(),
            Error::Io(io::Error::BufferExhausted)
        );
    }
}
