// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! `atap-tool` plays the CA's half of an ATAP exchange.
//!
//! It does not sign anything: the keys and certificates it hands out are read
//! from a keyset file prepared ahead of time. This makes it suitable for
//! bringing up a device's [`atap::ops::Ops`] integration, not for production.

#![deny(missing_docs)]
#![deny(warnings)]
#![deny(unused)]
#![deny(unsafe_code)]

use structopt::StructOpt as _;

#[macro_use]
mod util;

mod exchange;
mod keyset;

/// A command-line CA for ATAP exchanges.
#[allow(missing_docs)]
#[derive(structopt::StructOpt)]
#[structopt(author)]
enum CliCommand {
    #[structopt(flatten)]
    Exchange(exchange::Exchange),
}

fn main() {
    match CliCommand::from_args() {
        CliCommand::Exchange(e) => e.run(),
    }
}
