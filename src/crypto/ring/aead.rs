// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`crypto::aead`] based on `ring`.
//!
//! [`crypto::aead`]: ../../aead/index.html

use alloc::vec::Vec;

use ring::aead;
use zeroize::Zeroizing;

use crate::crypto::aead::Error;
use crate::crypto::aead::Iv;
use crate::crypto::aead::Key;
use crate::crypto::aead::Tag;

/// A `ring`-based [`crate::crypto::aead::Aes128Gcm`].
#[derive(Default)]
pub struct Aes128Gcm {
    _priv: (),
}

impl Aes128Gcm {
    /// Creates a new `Aes128Gcm`.
    pub fn new() -> Self {
        Self::default()
    }
}

fn make_key(key: &Key) -> Result<aead::LessSafeKey, Error> {
    let unbound = aead::UnboundKey::new(&aead::AES_128_GCM, key)
        .or_else(|_| fail!(Error::Unspecified))?;
    Ok(aead::LessSafeKey::new(unbound))
}

impl crate::crypto::aead::Aes128Gcm for Aes128Gcm {
    fn seal(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &mut Tag,
    ) -> Result<(), Error> {
        let key = make_key(key)?;
        let nonce = aead::Nonce::assume_unique_for_key(*iv);
        let out = key
            .seal_in_place_separate_tag(nonce, aead::Aad::empty(), in_out)
            .or_else(|_| fail!(Error::Unspecified))?;
        tag.copy_from_slice(out.as_ref());
        Ok(())
    }

    fn open(
        &mut self,
        key: &Key,
        iv: &Iv,
        in_out: &mut [u8],
        tag: &Tag,
    ) -> Result<(), Error> {
        let key = make_key(key)?;
        let nonce = aead::Nonce::assume_unique_for_key(*iv);

        // `ring` wants the tag appended to the ciphertext.
        let mut buf = Zeroizing::new(Vec::new());
        buf.try_reserve_exact(in_out.len() + tag.len())
            .or_else(|_| fail!(Error::Unspecified))?;
        buf.extend_from_slice(in_out);
        buf.extend_from_slice(tag);

        let plaintext = key
            .open_in_place(nonce, aead::Aad::empty(), &mut buf)
            .or_else(|_| fail!(Error::Unspecified))?;
        in_out.copy_from_slice(plaintext);
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::aead::Aes128Gcm as _;
    use crate::crypto::testdata;

    #[test]
    fn known_answer() {
        let mut gcm = Aes128Gcm::new();
        let mut buf = testdata::PLAIN_TEXT.to_vec();
        let mut tag = Tag::default();
        gcm.seal(&testdata::AES128_KEY, &testdata::AES128_IV, &mut buf, &mut tag)
            .unwrap();

        let (ct, expected_tag) = testdata::PLAIN_AES128_GCM
            .split_at(testdata::PLAIN_AES128_GCM.len() - 16);
        assert_eq!(buf, ct);
        assert_eq!(&tag, expected_tag);

        gcm.open(&testdata::AES128_KEY, &testdata::AES128_IV, &mut buf, &tag)
            .unwrap();
        assert_eq!(buf, testdata::PLAIN_TEXT);
    }

    #[test]
    fn tamper() {
        let mut gcm = Aes128Gcm::new();
        let (ct, tag) = testdata::PLAIN_AES128_GCM
            .split_at(testdata::PLAIN_AES128_GCM.len() - 16);
        let mut tag: Tag = tag.try_into().unwrap();

        let mut buf = ct.to_vec();
        buf[3] ^= 1;
        assert_eq!(
            gcm.open(&testdata::AES128_KEY, &testdata::AES128_IV, &mut buf, &tag),
            Err(Error::Unspecified)
        );

        let mut buf = ct.to_vec();
        tag[15] ^= 0x80;
        assert_eq!(
            gcm.open(&testdata::AES128_KEY, &testdata::AES128_IV, &mut buf, &tag),
            Err(Error::Unspecified)
        );
        // Nothing was decrypted in place.
        assert_eq!(buf, ct);
    }
}
