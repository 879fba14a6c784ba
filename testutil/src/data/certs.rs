// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! DER-encoded X.509 certificates, and the chains built from them.
//!
//! Chains are leaf first, as they appear on the wire.

/* GENERATED START */

/// Self-signed Ed25519 root for device authentication keys.
#[rustfmt::skip]
pub const AUTH_ROOT: &[u8] = include_bytes!("certs/auth_root.der");
/// Certificate for `keys::AUTH_ED25519_SEED`, issued by `AUTH_ROOT`.
#[rustfmt::skip]
pub const AUTH_LEAF: &[u8] = include_bytes!("certs/auth_leaf.der");

/// Self-signed P-256 CA that issues the attestation certificates below.
#[rustfmt::skip]
pub const PRODUCT_CA: &[u8] = include_bytes!("certs/product_ca.der");
/// Certificate for `keys::ATTEST_RSA_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_RSA: &[u8] = include_bytes!("certs/attest_rsa.der");
/// Certificate for `keys::ATTEST_ECDSA_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_ECDSA: &[u8] = include_bytes!("certs/attest_ecdsa.der");
/// Certificate for `keys::ATTEST_ED25519_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_ED25519: &[u8] = include_bytes!("certs/attest_ed25519.der");

/* GENERATED END */

/// The device authentication chain.
pub const AUTH_CHAIN: &[&[u8]] = &[AUTH_LEAF, AUTH_ROOT];

/// The RSA attestation chain.
pub const ATTEST_RSA_CHAIN: &[&[u8]] = &[ATTEST_RSA, PRODUCT_CA];

/// The ECDSA attestation chain.
pub const ATTEST_ECDSA_CHAIN: &[&[u8]] = &[ATTEST_ECDSA, PRODUCT_CA];

/// The Ed25519 attestation chain.
pub const ATTEST_ED25519_CHAIN: &[&[u8]] = &[ATTEST_ED25519, PRODUCT_CA];
