// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! AES-128-GCM authenticated encryption.
//!
//! ATAP seals every payload with AES-128-GCM under a 12-byte IV, with no
//! associated data, and carries the 16-byte tag separately from the
//! ciphertext.

/// An AES-128 key.
pub type Key = [u8; 16];

/// A GCM IV.
pub type Iv = [u8; 12];

/// A GCM authentication tag.
pub type Tag = [u8; 16];

/// An error returned by an AEAD operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// Indicates an unspecified error, including tag mismatch.
    ///
    /// Implementations must not distinguish a bad tag from any other failure.
    Unspecified,
}

/// An AES-128-GCM engine.
pub trait Aes128Gcm {
    /// Encrypts `in_out` in place under `key` and `iv`, writing the
    /// authentication tag to `tag`.
    fn seal(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &mut Tag,
    ) -> Result<(), Error>;

    /// Authenticates and decrypts `in_out` in place under `key` and `iv`.
    ///
    /// On failure, the contents of `in_out` are unspecified, but must not
    /// contain any unauthenticated plaintext.
    fn open(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &Tag,
    ) -> Result<(), Error>;
}
impl dyn Aes128Gcm {} // Ensure object-safe.

impl<A: Aes128Gcm + ?Sized> Aes128Gcm for &mut A {
    fn seal(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &mut Tag,
    ) -> Result<(), Error> {
        A::seal(*self, key, iv, in_out, tag)
    }

    fn open(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &Tag,
    ) -> Result<(), Error> {
        A::open(*self, key, iv, in_out, tag)
    }
}
