// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Test-only data.
//!
//! Known-answer vectors for the software crypto providers. The X25519 and
//! HKDF vectors are from RFC 7748 section 6.1 and RFC 5869 test case 1; the
//! rest were generated with `openssl`/`cryptography` and checked in.

/// A plaintext string.
pub const PLAIN_TEXT: &[u8] = include_bytes!("plain.txt");

/// The SHA-256 hash of `PLAIN_TEXT`.
pub const PLAIN_SHA256: &[u8] = include_bytes!("plain_sha256.bin");

/// The AES-128 key used to produce `PLAIN_AES128_GCM`.
pub const AES128_KEY: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, //
    0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

/// The IV used to produce `PLAIN_AES128_GCM`.
pub const AES128_IV: [u8; 12] = [
    0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6a, 0x6b, 0x6c, 0x6d, 0x6e, 0x6f,
];

/// `PLAIN_TEXT` sealed with AES-128-GCM under `AES128_KEY` and `AES128_IV`,
/// with no associated data: ciphertext, then the 16-byte tag.
pub const PLAIN_AES128_GCM: &[u8] = include_bytes!("plain_aes128_gcm.bin");

/// Alice's X25519 private key.
pub const X25519_ALICE_PRIV: [u8; 32] = [
    0x77, 0x07, 0x6d, 0x0a, 0x73, 0x18, 0xa5, 0x7d, 0x3c, 0x16, 0xc1, 0x72,
    0x51, 0xb2, 0x66, 0x45, 0xdf, 0x4c, 0x2f, 0x87, 0xeb, 0xc0, 0x99, 0x2a,
    0xb1, 0x77, 0xfb, 0xa5, 0x1d, 0xb9, 0x2c, 0x2a,
];

/// Alice's X25519 public key.
pub const X25519_ALICE_PUB: [u8; 32] = [
    0x85, 0x20, 0xf0, 0x09, 0x89, 0x30, 0xa7, 0x54, 0x74, 0x8b, 0x7d, 0xdc,
    0xb4, 0x3e, 0xf7, 0x5a, 0x0d, 0xbf, 0x3a, 0x0d, 0x26, 0x38, 0x1a, 0xf4,
    0xeb, 0xa4, 0xa9, 0x8e, 0xaa, 0x9b, 0x4e, 0x6a,
];

/// Bob's X25519 public key.
pub const X25519_BOB_PUB: [u8; 32] = [
    0xde, 0x9e, 0xdb, 0x7d, 0x7b, 0x7d, 0xc1, 0xb4, 0xd3, 0x5b, 0x61, 0xc2,
    0xec, 0xe4, 0x35, 0x37, 0x3f, 0x83, 0x43, 0xc8, 0x5b, 0x78, 0x67, 0x4d,
    0xad, 0xfc, 0x7e, 0x14, 0x6f, 0x88, 0x2b, 0x4f,
];

/// The X25519 shared secret between Alice and Bob.
pub const X25519_SHARED: [u8; 32] = [
    0x4a, 0x5d, 0x9d, 0x5b, 0xa4, 0xce, 0x2d, 0xe1, 0x72, 0x8e, 0x3b, 0xf4,
    0x80, 0x35, 0x0f, 0x25, 0xe0, 0x7e, 0x21, 0xc9, 0x47, 0xd1, 0x9e, 0x33,
    0x76, 0xf0, 0x9b, 0x3c, 0x1e, 0x16, 0x17, 0x42,
];

/// A P-256 private scalar: the bytes `0x01..=0x20`.
pub const P256_A_PRIV: [u8; 32] = [
    0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
    0x0d, 0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18,
    0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f, 0x20,
];

/// The compressed public point for `P256_A_PRIV`.
pub const P256_A_PUB: [u8; 33] = [
    0x02, 0x51, 0x5c, 0x3d, 0x6e, 0xb9, 0xe3, 0x96, 0xb9, 0x04, 0xd3, 0xfe,
    0xca, 0x7f, 0x54, 0xfd, 0xcd, 0x0c, 0xc1, 0xe9, 0x97, 0xbf, 0x37, 0x5d,
    0xca, 0x51, 0x5a, 0xd0, 0xa6, 0xc3, 0xb4, 0x03, 0x5f,
];

/// The compressed public point for the scalar `0x21..=0x40`.
pub const P256_B_PUB: [u8; 33] = [
    0x03, 0x1f, 0x14, 0x01, 0x46, 0xbf, 0xb1, 0xb2, 0x51, 0xf8, 0x4f, 0x4d,
    0xdb, 0xe0, 0xd4, 0xcd, 0xcf, 0xd7, 0x7a, 0xfd, 0x98, 0x4a, 0x95, 0x20,
    0xe3, 0x57, 0x94, 0x02, 0x1f, 0x83, 0x12, 0xbb, 0x9e,
];

/// The x-coordinate of the P-256 shared point between A and B.
pub const P256_SHARED: [u8; 32] = [
    0x4f, 0xe2, 0x43, 0x90, 0x8f, 0x37, 0x8a, 0xa1, 0xc2, 0xa6, 0x95, 0x38,
    0x82, 0x2e, 0x6e, 0xd9, 0x08, 0xc3, 0x22, 0x5d, 0x86, 0x92, 0x57, 0x55,
    0x07, 0xc6, 0x49, 0x90, 0x12, 0x45, 0x15, 0x0a,
];

/// HKDF-SHA256 input keying material.
pub const HKDF_IKM: [u8; 22] = [0x0b; 22];

/// HKDF-SHA256 salt.
pub const HKDF_SALT: [u8; 13] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b,
    0x0c,
];

/// HKDF-SHA256 info.
pub const HKDF_INFO: [u8; 10] =
    [0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9];

/// HKDF-SHA256 output for the inputs above, with `L = 42`.
pub const HKDF_OKM: [u8; 42] = [
    0x3c, 0xb2, 0x5f, 0x25, 0xfa, 0xac, 0xd5, 0x7a, 0x90, 0x43, 0x4f, 0x64,
    0xd0, 0x36, 0x2f, 0x2a, 0x2d, 0x2d, 0x0a, 0x90, 0xcf, 0x1a, 0x5a, 0x4c,
    0x5d, 0xb0, 0x2d, 0x56, 0xec, 0xc4, 0xc5, 0xbf, 0x34, 0x00, 0x72, 0x08,
    0xd5, 0xb8, 0x87, 0x18, 0x58, 0x65,
];
