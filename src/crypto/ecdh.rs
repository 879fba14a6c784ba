// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Ephemeral elliptic-curve Diffie-Hellman.
//!
//! Public keys always occupy a 33-byte [`PublicKey`] slot:
//! - P-256 keys are SEC1 compressed points (`0x02` or `0x03`, then `x`).
//! - X25519 keys are the 32-byte Montgomery `u` coordinate, followed by a
//!   single zero byte. A non-zero trailing byte is a malformed key.
//!
//! The shared secret is 32 bytes: the X25519 output, or the `x` coordinate of
//! the P-256 shared point.

use crate::protocol::Curve;

/// An ECDH public key slot.
pub type PublicKey = [u8; 33];

/// An ECDH shared secret.
pub type SharedSecret = [u8; 32];

/// An error returned by an ECDH operation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    /// The requested curve is not supported by this engine.
    UnsupportedCurve,
    /// The peer's public key is malformed, not on the curve, or yields a
    /// non-contributory shared secret.
    BadPublicKey,
    /// [`Ecdh::finish_ecdh()`] was called without a preceding
    /// [`Ecdh::begin_ecdh()`].
    BadStateTransition,
    /// Indicates an unspecified, internal error.
    Unspecified,
}

/// An ephemeral ECDH engine.
///
/// A key exchange happens in two phases: [`Ecdh::begin_ecdh()`] creates a
/// fresh key pair and returns the public half, keeping the private half
/// inside the engine; [`Ecdh::finish_ecdh()`] consumes that private half to
/// compute a shared secret with a peer's key. Splitting the two lets a CA
/// publish its key before it has seen the device's.
///
/// Beginning a new exchange discards any unfinished one.
pub trait Ecdh {
    /// Returns whether this engine supports `curve`.
    fn supports(&self, curve: Curve) -> bool;

    /// Generates an ephemeral key pair on `curve`, writing the public key to
    /// `our_key`.
    ///
    /// Returns [`Error::UnsupportedCurve`] for a curve this engine does not
    /// support.
    fn begin_ecdh(
        &mut self,
        curve: Curve,
        our_key: &mut PublicKey,
    ) -> Result<(), Error>;

    /// Completes the exchange begun by [`Ecdh::begin_ecdh()`], writing the
    /// shared secret with `their_key` to `shared`.
    ///
    /// The private key is destroyed whether or not this succeeds.
    fn finish_ecdh(
        &mut self,
        their_key: &PublicKey,
        shared: &mut SharedSecret,
    ) -> Result<(), Error>;

    /// Performs an entire exchange against a known peer key.
    ///
    /// Implementers do not need to implement this function themselves.
    fn shared_secret_compute(
        &mut self,
        curve: Curve,
        their_key: &PublicKey,
        our_key: &mut PublicKey,
        shared: &mut SharedSecret,
    ) -> Result<(), Error> {
        self.begin_ecdh(curve, our_key)?;
        self.finish_ecdh(their_key, shared)
    }
}
impl dyn Ecdh {} // Ensure object-safe.

impl<E: Ecdh + ?Sized> Ecdh for &mut E {
    fn supports(&self, curve: Curve) -> bool {
        E::supports(*self, curve)
    }

    fn begin_ecdh(
        &mut self,
        curve: Curve,
        our_key: &mut PublicKey,
    ) -> Result<(), Error> {
        E::begin_ecdh(*self, curve, our_key)
    }

    fn finish_ecdh(
        &mut self,
        their_key: &PublicKey,
        shared: &mut SharedSecret,
    ) -> Result<(), Error> {
        E::finish_ecdh(*self, their_key, shared)
    }
}
