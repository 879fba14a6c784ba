// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fuzz tests for the operation start parser.

#![no_main]

use libfuzzer_sys::fuzz_target;

use atap::protocol::wire;
use atap::protocol::OperationStart;

fuzz_target!(|data: &[u8]| {
    if let Ok(start) = wire::from_bytes::<OperationStart>(data) {
        // Anything that parses must re-encode to the same bytes.
        assert_eq!(wire::to_vec(&start).unwrap(), data);
    }
});
