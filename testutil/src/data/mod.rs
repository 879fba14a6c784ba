// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Test data of all kinds, ranging from device identifiers, to keys, to
//! certificate chains.
//!
//! None of this material may ever be used on a real device.

pub mod certs;
pub mod ids;
pub mod keys;
