// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`crypto::sha256`] based on `ring`.
//!
//! [`crypto::sha256`]: ../../sha256/index.html

use ring::digest;

use crate::crypto::sha256;

/// A `ring`-based [`sha256::Sha256`].
#[derive(Default)]
pub struct Sha256 {
    ctx: Option<digest::Context>,
}

impl Sha256 {
    /// Creates a new, idle `Sha256`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl sha256::Sha256 for Sha256 {
    fn start(&mut self) -> Result<(), sha256::Error> {
        self.ctx = Some(digest::Context::new(&digest::SHA256));
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), sha256::Error> {
        match &mut self.ctx {
            Some(ctx) => {
                ctx.update(data);
                Ok(())
            }
            None => fail!(sha256::Error::Idle),
        }
    }

    fn finish(&mut self, out: &mut sha256::Digest) -> Result<(), sha256::Error> {
        let ctx = match self.ctx.take() {
            Some(ctx) => ctx,
            None => return fail!(sha256::Error::Idle),
        };
        out.copy_from_slice(ctx.finish().as_ref());
        Ok(())
    }
}
