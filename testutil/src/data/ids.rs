// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Device identifiers, and the hashes a CA echoes back for them.

/* GENERATED START */

/// Test-only product ID.
#[rustfmt::skip]
pub const PRODUCT_ID: [u8; 16] = *include_bytes!("ids/product_id.bin");
/// SHA-256 of `PRODUCT_ID`.
#[rustfmt::skip]
pub const PRODUCT_ID_HASH: [u8; 32] = *include_bytes!("ids/product_id.sha256.bin");

/// Test-only SoM ID.
#[rustfmt::skip]
pub const SOM_ID: [u8; 16] = *include_bytes!("ids/som_id.bin");
/// SHA-256 of `SOM_ID`.
#[rustfmt::skip]
pub const SOM_ID_HASH: [u8; 32] = *include_bytes!("ids/som_id.sha256.bin");

/* GENERATED END */
