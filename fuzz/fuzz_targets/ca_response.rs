// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fuzz tests for the CA response parsers, outer and inner, and for the
//! encrypted key blob parser.

#![no_main]

use libfuzzer_sys::fuzz_target;

use atap::protocol::wire;
use atap::protocol::CaResponse;
use atap::protocol::InnerCaResponse;
use atap::protocol::KeyBlob;

fuzz_target!(|data: &[u8]| {
    let _ = wire::from_bytes::<CaResponse>(data);
    let _ = wire::from_bytes::<InnerCaResponse>(data);
    let _ = wire::from_bytes::<KeyBlob>(data);
});
