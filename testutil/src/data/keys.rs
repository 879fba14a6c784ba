// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Key material intended only for testing.

/* GENERATED START */

/// Seed of the test device's Ed25519 authentication key.
#[rustfmt::skip]
pub const AUTH_ED25519_SEED: [u8; 32] = *include_bytes!("keys/auth.ed25519.seed.bin");
/// Raw public half of `AUTH_ED25519_SEED`.
#[rustfmt::skip]
pub const AUTH_ED25519_PUBLIC: [u8; 32] = *include_bytes!("keys/auth.ed25519.pub.bin");

/// A canned RSA PKCS#1 v1.5 signature, for fakes whose auth key is RSA.
#[rustfmt::skip]
pub const AUTH_RSA_SIGNATURE: &[u8] = include_bytes!("keys/auth.rsa.sig.bin");

/// Test-only RSA-2048 attestation keypair, PKCS#8.
#[rustfmt::skip]
pub const ATTEST_RSA_KEYPAIR: &[u8] = include_bytes!("keys/attest.rsa.pk8");
/// SubjectPublicKeyInfo of `ATTEST_RSA_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_RSA_PUBLIC: &[u8] = include_bytes!("keys/attest.rsa.pub.der");

/// Test-only ECDSA P-256 attestation keypair, PKCS#8.
#[rustfmt::skip]
pub const ATTEST_ECDSA_KEYPAIR: &[u8] = include_bytes!("keys/attest.ecdsa.pk8");
/// SubjectPublicKeyInfo of `ATTEST_ECDSA_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_ECDSA_PUBLIC: &[u8] = include_bytes!("keys/attest.ecdsa.pub.der");

/// Test-only Ed25519 attestation keypair, PKCS#8.
#[rustfmt::skip]
pub const ATTEST_ED25519_KEYPAIR: &[u8] = include_bytes!("keys/attest.ed25519.pk8");
/// SubjectPublicKeyInfo of `ATTEST_ED25519_KEYPAIR`.
#[rustfmt::skip]
pub const ATTEST_ED25519_PUBLIC: &[u8] = include_bytes!("keys/attest.ed25519.pub.der");

/// Test-only SoC-global AES-128 key.
#[rustfmt::skip]
pub const SOC_GLOBAL_KEY: [u8; 16] = *include_bytes!("keys/soc_global.aes128.bin");

/// Fixed X25519 CA private key.
#[rustfmt::skip]
pub const CA_X25519_PRIVATE: [u8; 32] = *include_bytes!("keys/ca.x25519.bin");
/// Fixed P-256 CA private scalar.
#[rustfmt::skip]
pub const CA_P256_PRIVATE: [u8; 32] = *include_bytes!("keys/ca.p256.bin");

/* GENERATED END */
