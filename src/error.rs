// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The ATAP result taxonomy.

use core::fmt;

use crate::crypto::aead;
use crate::crypto::csrng;
use crate::crypto::ecdh;
use crate::crypto::hkdf;
use crate::crypto::sha256;
use crate::io;
use crate::protocol::wire;

/// An error returned by an ATAP operation.
///
/// Every fallible operation in this crate, including the device callbacks in
/// [`crate::ops::Ops`], reports failure with one of these values.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Error {
    /// A buffer was malformed or undersized, or a field (version, curve,
    /// operation, length) held a value that is not acceptable here.
    ///
    /// This is also returned when an operation is called out of order, such
    /// as setting a CA response when no request is in flight.
    BadArgument,
    /// A capability is not present, such as signing with an auth key on a
    /// device that has none.
    UnsupportedOperation,
    /// A cryptographic operation failed: AEAD tag mismatch, a bad ECDH point,
    /// or a failed key derivation.
    Crypto,
    /// An allocation failed.
    OutOfMemory,
    /// A device I/O operation failed, such as the random-byte source.
    Io,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::BadArgument => "bad argument",
            Self::UnsupportedOperation => "unsupported operation",
            Self::Crypto => "cryptographic failure",
            Self::OutOfMemory => "out of memory",
            Self::Io => "i/o failure",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(_: io::Error) -> Self {
        Self::BadArgument
    }
}

impl From<wire::Error> for Error {
    fn from(e: wire::Error) -> Self {
        match e {
            wire::Error::OutOfMemory => Self::OutOfMemory,
            wire::Error::Io(_) | wire::Error::OutOfRange => Self::BadArgument,
        }
    }
}

impl From<ecdh::Error> for Error {
    fn from(e: ecdh::Error) -> Self {
        match e {
            ecdh::Error::UnsupportedCurve => Self::UnsupportedOperation,
            ecdh::Error::BadStateTransition => Self::BadArgument,
            ecdh::Error::BadPublicKey | ecdh::Error::Unspecified => {
                Self::Crypto
            }
        }
    }
}

impl From<aead::Error> for Error {
    fn from(_: aead::Error) -> Self {
        Self::Crypto
    }
}

impl From<hkdf::Error> for Error {
    fn from(_: hkdf::Error) -> Self {
        Self::Crypto
    }
}

impl From<sha256::Error> for Error {
    fn from(_: sha256::Error) -> Self {
        Self::Crypto
    }
}

impl From<csrng::Error> for Error {
    fn from(_: csrng::Error) -> Self {
        Self::Io
    }
}
