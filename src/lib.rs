// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `atap` is an implementation of the device side of the Android Things
//! Attestation Provisioning (ATAP) protocol.
//!
//! ATAP is a two-message exchange between a device on the factory floor and
//! a provisioning Certificate Authority (CA):
//! 1.  The CA sends an *operation start* message, naming the operation, the
//!     ECDH curve, and its ephemeral public key.
//! 2.  The device answers with a *CA request*: its own ephemeral public key,
//!     and an AES-128-GCM-sealed inner request describing the device (and,
//!     optionally, a signature by its authentication key).
//! 3.  The CA sends a *CA response*, sealed under the same session key, which
//!     carries the issued attestation keys and certificate chains.
//!
//! The protocol engine lives in [`provision`]. It talks to the device through
//! the [`ops::Ops`] trait, and to a cryptography provider through the traits
//! in [`crypto`]; a software provider based on [`ring`] is available under
//! the `ring` feature flag. The wire format is implemented in [`protocol`].
//!
//! [`ring`]: https://docs.rs/ring

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(feature = "log")]
extern crate __raw_log;

#[macro_use]
mod debug;

#[macro_use]
pub mod protocol;

pub mod ca;
pub mod crypto;
pub mod io;
pub mod ops;
pub mod provision;
pub mod session;

mod error;
pub use error::Error;

/// The result type used throughout `atap`.
pub type Result<T, E = Error> = core::result::Result<T, E>;
