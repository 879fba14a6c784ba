// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! ATAP session establishment.
//!
//! An ATAP session is created via the usual ephemeral ECDH scheme, using
//! HKDF-SHA256 as the KDF.
//!
//! # Key Derivation
//!
//! Both parties feed the ECDH shared secret through HKDF-SHA256, salted with
//! both public keys, CA first:
//!
//! ```text
//! salt        := ca_public_key || device_public_key
//! session_key := HKDF(salt, shared_secret, "KEY",  16)
//! auth_nonce  := HKDF(salt, shared_secret, "SIGN", 16)
//! ```
//!
//! The session key seals both directions of the exchange. The auth nonce is
//! the challenge a device's authentication key signs; since the CA derives it
//! independently, the signature is bound to this session.

use alloc::vec::Vec;

use zeroize::Zeroize;
use zeroize::ZeroizeOnDrop;
use zeroize::Zeroizing;

use crate::crypto::aead;
use crate::crypto::ecdh;
use crate::crypto::hkdf;
use crate::crypto::sha256;
use crate::protocol::Curve;
use crate::protocol::Operation;
use crate::protocol::OperationStart;
use crate::protocol::Sealed;
use crate::protocol::Version;
use crate::protocol::AUTH_NONCE_LEN;
use crate::protocol::ECDH_KEY_LEN;
use crate::protocol::GCM_TAG_LEN;
use crate::Error;
use crate::Result;

/// HKDF info for the session key.
pub const SESSION_KEY_INFO: &[u8] = b"KEY";

/// HKDF info for the auth nonce.
pub const AUTH_NONCE_INFO: &[u8] = b"SIGN";

/// The keys derived from one ECDH exchange.
///
/// Zeroed on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Keys {
    session_key: aead::Key,
    auth_nonce: [u8; AUTH_NONCE_LEN],
}

impl Keys {
    /// Returns the AES-128-GCM key sealing this session's payloads.
    pub fn session_key(&self) -> &aead::Key {
        &self.session_key
    }

    /// Returns the challenge a device's authentication key signs.
    pub fn auth_nonce(&self) -> &[u8; AUTH_NONCE_LEN] {
        &self.auth_nonce
    }
}

/// Runs the key derivation described in the [module documentation][self].
pub fn derive_keys(
    hkdf: &mut (impl hkdf::Hkdf + ?Sized),
    ca_public_key: &ecdh::PublicKey,
    device_public_key: &ecdh::PublicKey,
    shared_secret: &ecdh::SharedSecret,
) -> Result<Keys> {
    let mut salt = [0; 2 * ECDH_KEY_LEN];
    salt[..ECDH_KEY_LEN].copy_from_slice(ca_public_key);
    salt[ECDH_KEY_LEN..].copy_from_slice(device_public_key);

    let mut keys = Keys {
        session_key: [0; 16],
        auth_nonce: [0; AUTH_NONCE_LEN],
    };
    hkdf.hkdf_sha256(
        &salt,
        shared_secret,
        SESSION_KEY_INFO,
        &mut keys.session_key,
    )?;
    hkdf.hkdf_sha256(&salt, shared_secret, AUTH_NONCE_INFO, &mut keys.auth_nonce)?;
    Ok(keys)
}

/// Performs a one-shot exchange against `device_public_key` with a fresh CA
/// key pair, returning the CA public key and the derived keys.
///
/// This is the CA's half of the exchange in a single step, for callers that
/// already have the device's key in hand.
pub fn compute_session_key<C>(
    crypto: &mut C,
    curve: Curve,
    device_public_key: &ecdh::PublicKey,
) -> Result<(ecdh::PublicKey, Keys)>
where
    C: ecdh::Ecdh + hkdf::Hkdf + ?Sized,
{
    check!(crypto.supports(curve), Error::UnsupportedOperation);

    let mut ca_public_key = [0; ECDH_KEY_LEN];
    let mut shared = Zeroizing::new([0; 32]);
    crypto.shared_secret_compute(
        curve,
        device_public_key,
        &mut ca_public_key,
        &mut shared,
    )?;
    let keys = derive_keys(crypto, &ca_public_key, device_public_key, &shared)?;
    Ok((ca_public_key, keys))
}

/// Encrypts `buf` in place under `key` and `iv`, returning the envelope
/// that carries it.
pub fn seal<'a>(
    aead: &mut (impl aead::Aes128Gcm + ?Sized),
    key: &aead::Key,
    iv: aead::Iv,
    buf: &'a mut [u8],
) -> Result<Sealed<'a>> {
    let mut tag = [0; GCM_TAG_LEN];
    aead.seal(key, &iv, buf, &mut tag)?;
    Ok(Sealed {
        iv,
        ciphertext: buf,
        tag,
    })
}

/// Authenticates and decrypts `sealed` under `key` into a fresh buffer.
///
/// The buffer is zeroed on drop; on failure, nothing is returned.
pub fn open(
    aead: &mut (impl aead::Aes128Gcm + ?Sized),
    key: &aead::Key,
    sealed: &Sealed,
) -> Result<Zeroizing<Vec<u8>>> {
    let mut plaintext = Zeroizing::new(Vec::new());
    plaintext
        .try_reserve_exact(sealed.ciphertext.len())
        .or_else(|_| fail!(Error::OutOfMemory))?;
    plaintext.extend_from_slice(sealed.ciphertext);
    aead.open(key, &sealed.iv, &mut plaintext[..], &sealed.tag)?;
    Ok(plaintext)
}

/// The device's view of a live ATAP session.
///
/// Created fresh for every provisioning attempt and zeroed on drop.
pub struct Session {
    curve: Curve,
    operation: Operation,
    version: Version,
    ca_public_key: ecdh::PublicKey,
    device_public_key: ecdh::PublicKey,
    identity_hash: sha256::Digest,
    keys: Keys,
}

impl Session {
    /// Answers `start` with a fresh device key pair, deriving the session
    /// keys.
    ///
    /// `identity_hash` is the hash the CA must echo back in its response.
    pub fn establish<C>(
        crypto: &mut C,
        start: &OperationStart,
        identity_hash: sha256::Digest,
    ) -> Result<Self>
    where
        C: ecdh::Ecdh + hkdf::Hkdf + ?Sized,
    {
        check!(crypto.supports(start.curve), Error::UnsupportedOperation);

        let mut device_public_key = [0; ECDH_KEY_LEN];
        let mut shared = Zeroizing::new([0; 32]);
        crypto.shared_secret_compute(
            start.curve,
            &start.ca_public_key,
            &mut device_public_key,
            &mut shared,
        )?;
        let keys = derive_keys(
            crypto,
            &start.ca_public_key,
            &device_public_key,
            &shared,
        )?;

        Ok(Self {
            curve: start.curve,
            operation: start.operation,
            version: start.version,
            ca_public_key: start.ca_public_key,
            device_public_key,
            identity_hash,
            keys,
        })
    }

    /// Returns the curve this session was agreed on.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Returns the operation the CA requested.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the protocol version of this session.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the CA's ephemeral public key.
    pub fn ca_public_key(&self) -> &ecdh::PublicKey {
        &self.ca_public_key
    }

    /// Returns the device's ephemeral public key.
    pub fn device_public_key(&self) -> &ecdh::PublicKey {
        &self.device_public_key
    }

    /// Returns the identity hash the CA must echo back.
    pub fn identity_hash(&self) -> &sha256::Digest {
        &self.identity_hash
    }

    /// Returns the keys derived for this session.
    pub fn keys(&self) -> &Keys {
        &self.keys
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::ecdh::Ecdh as _;
    use crate::crypto::ring;
    use crate::crypto::testdata;

    #[test]
    fn both_sides_agree() {
        for curve in [Curve::X25519, Curve::P256] {
            let mut ca = ring::Crypto::new();
            let mut ca_public_key = [0; ECDH_KEY_LEN];
            ca.begin_ecdh(curve, &mut ca_public_key).unwrap();

            let start = OperationStart {
                version: Version::V1,
                curve,
                operation: Operation::Issue,
                ca_public_key,
            };
            let mut device = ring::Crypto::new();
            let session =
                Session::establish(&mut device, &start, [0x42; 32]).unwrap();

            let mut shared = [0; 32];
            ca.finish_ecdh(session.device_public_key(), &mut shared)
                .unwrap();
            let keys = derive_keys(
                &mut ca,
                &ca_public_key,
                session.device_public_key(),
                &shared,
            )
            .unwrap();

            assert_eq!(keys.session_key(), session.keys().session_key());
            assert_eq!(keys.auth_nonce(), session.keys().auth_nonce());
            assert_ne!(&keys.session_key()[..], &keys.auth_nonce()[..]);
            assert_eq!(session.identity_hash(), &[0x42; 32]);
            assert_eq!(session.operation(), Operation::Issue);
        }
    }

    #[test]
    fn salt_order_matters() {
        let mut hkdf = ring::hkdf::Hkdf::new();
        let a = [0xaa; 33];
        let b = [0xbb; 33];
        let forward = derive_keys(&mut hkdf, &a, &b, &[1; 32]).unwrap();
        let backward = derive_keys(&mut hkdf, &b, &a, &[1; 32]).unwrap();
        assert_ne!(forward.session_key(), backward.session_key());
    }

    #[test]
    fn fixed_ca_key() {
        let mut ca = ring::Crypto::new();
        ca.set_ecdh_key_for_testing(Curve::X25519, &testdata::X25519_ALICE_PRIV);

        let mut device_public_key = [0; 33];
        device_public_key[..32].copy_from_slice(&testdata::X25519_BOB_PUB);
        let (ca_public_key, keys) =
            compute_session_key(&mut ca, Curve::X25519, &device_public_key)
                .unwrap();
        assert_eq!(&ca_public_key[..32], &testdata::X25519_ALICE_PUB);

        let mut hkdf = ring::hkdf::Hkdf::new();
        let expected = derive_keys(
            &mut hkdf,
            &ca_public_key,
            &device_public_key,
            &testdata::X25519_SHARED,
        )
        .unwrap();
        assert_eq!(keys.session_key(), expected.session_key());
    }

    #[test]
    fn fresh_sessions() {
        let mut ca = ring::Crypto::new();
        let mut ca_public_key = [0; ECDH_KEY_LEN];
        ca.begin_ecdh(Curve::P256, &mut ca_public_key).unwrap();
        let start = OperationStart {
            version: Version::V1,
            curve: Curve::P256,
            operation: Operation::Issue,
            ca_public_key,
        };

        let mut device = ring::Crypto::new();
        let a = Session::establish(&mut device, &start, [0; 32]).unwrap();
        let b = Session::establish(&mut device, &start, [0; 32]).unwrap();
        assert_ne!(a.device_public_key(), b.device_public_key());
        assert_ne!(a.keys().session_key(), b.keys().session_key());
    }

    #[test]
    fn seal_then_open() {
        let mut aead = ring::aead::Aes128Gcm::new();
        let mut buf = testdata::PLAIN_TEXT.to_vec();
        let sealed = seal(
            &mut aead,
            &testdata::AES128_KEY,
            testdata::AES128_IV,
            &mut buf,
        )
        .unwrap();
        let (ct, tag) =
            testdata::PLAIN_AES128_GCM.split_at(testdata::PLAIN_TEXT.len());
        assert_eq!(sealed.ciphertext, ct);
        assert_eq!(&sealed.tag[..], tag);

        let plain = open(&mut aead, &testdata::AES128_KEY, &sealed).unwrap();
        assert_eq!(&plain[..], testdata::PLAIN_TEXT);

        let mut tag = sealed.tag;
        tag[0] ^= 1;
        let forged = Sealed { tag, ..sealed };
        assert_eq!(
            open(&mut aead, &testdata::AES128_KEY, &forged).err(),
            Some(Error::Crypto)
        );
    }

    #[test]
    fn bad_ca_key() {
        let start = OperationStart {
            version: Version::V1,
            curve: Curve::X25519,
            operation: Operation::Issue,
            ca_public_key: [0; 33],
        };
        let mut device = ring::Crypto::new();
        assert_eq!(
            Session::establish(&mut device, &start, [0; 32]).err(),
            Some(Error::Crypto)
        );
    }
}
