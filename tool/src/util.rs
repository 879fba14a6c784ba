// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! File and stdio helpers.
//!
//! Everything here exits the process on failure; `atap-tool` has no way to
//! recover from a missing file, so there is nothing to propagate to.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;
use std::path::Path;

/// Unwraps a `Result`, or prints the formatted context and the error and
/// exits with status 2.
macro_rules! check {
    ($result:expr, $fmt:literal $(, $args:expr)* $(,)?) => {
        match $result {
            Ok(x) => x,
            Err(e) => {
                eprintln!("error: {}: {:?}", format_args!($fmt, $($args,)*), e);
                std::process::exit(2)
            }
        }
    }
}

/// Opens `input` for reading and `output` for writing, falling back to
/// stdin and stdout for whichever is `None`.
pub fn stdio(
    input: Option<impl AsRef<Path>>,
    output: Option<impl AsRef<Path>>,
) -> (Box<dyn Read>, Box<dyn Write>) {
    let reader: Box<dyn Read> = match &input {
        Some(path) => {
            let path: &Path = path.as_ref();
            let file = check!(File::open(path), "failed to open {:?}", path);
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin()),
    };
    let writer: Box<dyn Write> = match &output {
        Some(path) => {
            let path: &Path = path.as_ref();
            Box::new(check!(
                File::create(path),
                "failed to create {:?}",
                path
            ))
        }
        None => Box::new(io::stdout()),
    };
    (reader, writer)
}

/// Reads `r` to the end.
pub fn read_all(mut r: impl Read) -> Vec<u8> {
    let mut buf = Vec::new();
    check!(r.read_to_end(&mut buf), "failed to read input");
    buf
}
