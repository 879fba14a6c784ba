// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Fuzz tests for the CA request parsers, outer and inner.
//!
//! The first byte picks the operation the inner request is parsed for.

#![no_main]

use libfuzzer_sys::fuzz_target;

use atap::protocol::wire;
use atap::protocol::CaRequest;
use atap::protocol::InnerCaRequest;
use atap::protocol::Operation;

fuzz_target!(|data: &[u8]| {
    let _ = wire::from_bytes::<CaRequest>(data);

    let (op, rest) = match data.split_first() {
        Some((&op, rest)) => (op, rest),
        None => return,
    };
    let op = if op & 1 == 0 {
        Operation::Issue
    } else {
        Operation::IssueSomKey
    };
    let _ = InnerCaRequest::from_bytes(rest, op);
});
