// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Cryptography provider traits.
//!
//! ATAP needs ECDH over X25519 or P-256, AES-128-GCM, SHA-256, HKDF-SHA256,
//! and a source of random bytes. Each lives behind its own object-safe trait
//! with its own `Error` type, so a device can back each one with whatever
//! hardware it has. [`Crypto`] bundles the four the engine holds on to;
//! randomness comes through [`Ops`](crate::ops::Ops) instead.
//!
//! Refer to these traits through their modules (`ecdh::Ecdh`,
//! `aead::Aes128Gcm`) rather than importing them bare, since every module
//! defines an `Error`.
//!
//! The `ring` feature adds a software provider in the `ring` module.

pub mod aead;
pub mod csrng;
pub mod ecdh;
pub mod hkdf;
pub mod sha256;

#[cfg(feature = "ring")]
pub mod ring;

#[cfg(test)]
pub(crate) mod testdata;

/// The primitives the ATAP engine needs to run a session.
///
/// This trait is implemented automatically for anything that implements all
/// of its supertraits.
pub trait Crypto:
    ecdh::Ecdh + aead::Aes128Gcm + sha256::Sha256 + hkdf::Hkdf
{
}

impl<C> Crypto for C where
    C: ecdh::Ecdh + aead::Aes128Gcm + sha256::Sha256 + hkdf::Hkdf + ?Sized
{
}
impl dyn Crypto {} // Ensure object-safe.
