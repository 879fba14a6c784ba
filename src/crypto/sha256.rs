// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! SHA-256 hashing.

/// A SHA-256 digest.
pub type Digest = [u8; 32];

/// An error returned by a hashing operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates that the engine was idle, but a write or finish operation
    /// was requested.
    Idle,

    /// Indicates an unspecified, internal error.
    Unspecified,
}

/// A SHA-256 engine, which maintains the state for one digest.
pub trait Sha256 {
    /// Begins a new hashing operation, discarding any previous state.
    fn start(&mut self) -> Result<(), Error>;

    /// Adds `data` to the hashing state.
    fn write(&mut self, data: &[u8]) -> Result<(), Error>;

    /// Completes the hashing operation, leaving the engine idle.
    fn finish(&mut self, out: &mut Digest) -> Result<(), Error>;

    /// Convenience helper for hashing a contiguous memory region.
    ///
    /// Implementers do not need to implement this function themselves.
    fn contiguous_hash(
        &mut self,
        data: &[u8],
        out: &mut Digest,
    ) -> Result<(), Error> {
        self.start()?;
        self.write(data)?;
        self.finish(out)
    }
}
impl dyn Sha256 {} // Ensure object-safe.

impl<S: Sha256 + ?Sized> Sha256 for &mut S {
    fn start(&mut self) -> Result<(), Error> {
        S::start(*self)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Error> {
        S::write(*self, data)
    }

    fn finish(&mut self, out: &mut Digest) -> Result<(), Error> {
        S::finish(*self, out)
    }
}
