// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of crypto traits, using the [`ring`] crate.
//!
//! This module provides software implemenations of [`crypto`] traits suitable
//! for factory tooling and tests, rather than for a device's secure element.
//! ECDH is provided by the RustCrypto [`p256`] and [`x25519_dalek`] crates,
//! since `ring` cannot import a fixed private key or emit compressed points.
//! The `ring` feature flag implies `std`.
//!
//! Types in this module, much like those in [`crypto`], should not be imported
//! directly. Instead, names such as `ring::aead::Aes128Gcm` should be used
//! instead.
//!
//! The [`ring` warranty disclaimer] applies to this module as well.
//!
//! [`ring` warranty disclaimer]: https://github.com/briansmith/ring/blob/main/README.md

use crate::crypto;
use crate::protocol::Curve;

pub mod aead;
pub mod csrng;
pub mod ecdh;
pub mod hkdf;
pub mod sha256;

/// A bundle of every `ring`-based primitive, implementing
/// [`crypto::Crypto`].
#[derive(Default)]
pub struct Crypto {
    ecdh: ecdh::Ecdh,
    aead: aead::Aes128Gcm,
    sha: sha256::Sha256,
    hkdf: hkdf::Hkdf,
}

impl Crypto {
    /// Creates a new `Crypto`, drawing entropy from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`ecdh::Ecdh::set_ecdh_key_for_testing()`].
    pub fn set_ecdh_key_for_testing(
        &mut self,
        curve: Curve,
        private_key: &[u8; 32],
    ) {
        self.ecdh.set_ecdh_key_for_testing(curve, private_key)
    }
}

impl crypto::ecdh::Ecdh for Crypto {
    fn supports(&self, curve: Curve) -> bool {
        self.ecdh.supports(curve)
    }

    fn begin_ecdh(
        &mut self,
        curve: Curve,
        our_key: &mut crypto::ecdh::PublicKey,
    ) -> Result<(), crypto::ecdh::Error> {
        self.ecdh.begin_ecdh(curve, our_key)
    }

    fn finish_ecdh(
        &mut self,
        their_key: &crypto::ecdh::PublicKey,
        shared: &mut crypto::ecdh::SharedSecret,
    ) -> Result<(), crypto::ecdh::Error> {
        self.ecdh.finish_ecdh(their_key, shared)
    }
}

impl crypto::aead::Aes128Gcm for Crypto {
    fn seal(
        &mut self,
        key: &crypto::aead::Key,
        iv: &crypto::aead::Iv,
        in_out: &mut [u8],
        tag: &mut crypto::aead::Tag,
    ) -> Result<(), crypto::aead::Error> {
        self.aead.seal(key, iv, in_out, tag)
    }

    fn open(
        &mut self,
        key: &crypto::aead::Key,
        iv: &crypto::aead::Iv,
        in_out: &mut [u8],
        tag: &crypto::aead::Tag,
    ) -> Result<(), crypto::aead::Error> {
        self.aead.open(key, iv, in_out, tag)
    }
}

impl crypto::sha256::Sha256 for Crypto {
    fn start(&mut self) -> Result<(), crypto::sha256::Error> {
        self.sha.start()
    }

    fn write(&mut self, data: &[u8]) -> Result<(), crypto::sha256::Error> {
        self.sha.write(data)
    }

    fn finish(
        &mut self,
        out: &mut crypto::sha256::Digest,
    ) -> Result<(), crypto::sha256::Error> {
        self.sha.finish(out)
    }
}

impl crypto::hkdf::Hkdf for Crypto {
    fn hkdf_sha256(
        &mut self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), crypto::hkdf::Error> {
        self.hkdf.hkdf_sha256(salt, ikm, info, out)
    }
}
