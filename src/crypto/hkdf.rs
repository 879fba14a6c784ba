// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! HKDF-SHA256 key derivation (RFC 5869).

/// An error returned by a key derivation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The requested output is longer than HKDF-SHA256 can produce.
    WrongSize,

    /// Indicates an unspecified, internal error.
    Unspecified,
}

/// An HKDF-SHA256 engine.
pub trait Hkdf {
    /// Runs extract-then-expand over `ikm` with `salt` and `info`, filling
    /// all of `out`.
    fn hkdf_sha256(
        &mut self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), Error>;
}
impl dyn Hkdf {} // Ensure object-safe.

impl<H: Hkdf + ?Sized> Hkdf for &mut H {
    fn hkdf_sha256(
        &mut self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), Error> {
        H::hkdf_sha256(*self, salt, ikm, info, out)
    }
}
