// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`crypto::hkdf`] based on `ring`.
//!
//! [`crypto::hkdf`]: ../../hkdf/index.html

use ring::hkdf;

use crate::crypto::hkdf::Error;

/// A `ring`-based [`crate::crypto::hkdf::Hkdf`].
#[derive(Default)]
pub struct Hkdf {
    _priv: (),
}

impl Hkdf {
    /// Creates a new `Hkdf`.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An output length, as `ring` wants it.
struct Len(usize);

impl hkdf::KeyType for Len {
    fn len(&self) -> usize {
        self.0
    }
}

impl crate::crypto::hkdf::Hkdf for Hkdf {
    fn hkdf_sha256(
        &mut self,
        salt: &[u8],
        ikm: &[u8],
        info: &[u8],
        out: &mut [u8],
    ) -> Result<(), Error> {
        let prk = hkdf::Salt::new(hkdf::HKDF_SHA256, salt).extract(ikm);
        let info = [info];
        let okm = prk
            .expand(&info, Len(out.len()))
            .or_else(|_| fail!(Error::WrongSize))?;
        okm.fill(out).or_else(|_| fail!(Error::Unspecified))
    }
}
