// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Implementations of [`crypto::ecdh`] based on [`x25519_dalek`] and [`p256`].
//!
//! Ephemeral scalars are drawn from `ring`'s [`SystemRandom`], unless a fixed
//! key has been installed with [`Ecdh::set_ecdh_key_for_testing()`].
//!
//! [`crypto::ecdh`]: ../../ecdh/index.html
//! [`SystemRandom`]: ring::rand::SystemRandom

use p256::elliptic_curve::sec1::ToEncodedPoint as _;
use zeroize::Zeroizing;

use crate::crypto::csrng;
use crate::crypto::csrng::Csrng as _;
use crate::crypto::ecdh::Error;
use crate::crypto::ecdh::PublicKey;
use crate::crypto::ecdh::SharedSecret;
use crate::crypto::ring::csrng::Csrng;
use crate::protocol::Curve;

/// Number of scalars to draw before giving up on finding a valid P-256
/// private key. Each draw fails with probability about 2^-32.
const P256_KEYGEN_ATTEMPTS: usize = 4;

/// A private key awaiting [`crate::crypto::ecdh::Ecdh::finish_ecdh()`].
enum Pending {
    X25519(x25519_dalek::StaticSecret),
    P256(p256::SecretKey),
}

/// A software [`crate::crypto::ecdh::Ecdh`] supporting X25519 and P-256.
#[derive(Default)]
pub struct Ecdh {
    rng: Csrng,
    test_key: Option<(Curve, Zeroizing<[u8; 32]>)>,
    pending: Option<Pending>,
}

impl Ecdh {
    /// Creates a new `Ecdh`, drawing entropy from the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fixed private key for `curve`.
    ///
    /// Every subsequent exchange on `curve` uses this key instead of a fresh
    /// one. This defeats the point of ephemeral keys, and exists only so that
    /// tests and tooling can produce reproducible sessions.
    pub fn set_ecdh_key_for_testing(
        &mut self,
        curve: Curve,
        private_key: &[u8; 32],
    ) {
        warn!("installing a fixed {} ECDH key", curve);
        self.test_key = Some((curve, Zeroizing::new(*private_key)));
    }

    fn scalar_for(
        &mut self,
        curve: Curve,
    ) -> Result<Zeroizing<[u8; 32]>, Error> {
        if let Some((test_curve, key)) = &self.test_key {
            if *test_curve == curve {
                return Ok(key.clone());
            }
        }

        let mut scalar = Zeroizing::new([0; 32]);
        self.rng
            .fill(&mut scalar[..])
            .or_else(|_: csrng::Error| fail!(Error::Unspecified))?;
        Ok(scalar)
    }

    fn begin_p256(&mut self) -> Result<p256::SecretKey, Error> {
        for _ in 0..P256_KEYGEN_ATTEMPTS {
            let scalar = self.scalar_for(Curve::P256)?;
            if let Ok(key) = p256::SecretKey::from_slice(&scalar[..]) {
                return Ok(key);
            }
            // A fixed key that is out of range will never become valid.
            if self.test_key.is_some() {
                break;
            }
        }
        fail!(Error::Unspecified)
    }
}

impl crate::crypto::ecdh::Ecdh for Ecdh {
    fn supports(&self, curve: Curve) -> bool {
        matches!(curve, Curve::P256 | Curve::X25519)
    }

    fn begin_ecdh(
        &mut self,
        curve: Curve,
        our_key: &mut PublicKey,
    ) -> Result<(), Error> {
        self.pending = None;
        let pending = match curve {
            Curve::X25519 => {
                let secret =
                    x25519_dalek::StaticSecret::from(*self.scalar_for(curve)?);
                let public = x25519_dalek::PublicKey::from(&secret);
                our_key[..32].copy_from_slice(public.as_bytes());
                our_key[32] = 0;
                Pending::X25519(secret)
            }
            Curve::P256 => {
                let secret = self.begin_p256()?;
                let point = secret.public_key().to_encoded_point(true);
                if point.as_bytes().len() != our_key.len() {
                    return fail!(Error::Unspecified);
                }
                our_key.copy_from_slice(point.as_bytes());
                Pending::P256(secret)
            }
        };
        trace!("began {} ECDH", curve);
        self.pending = Some(pending);
        Ok(())
    }

    fn finish_ecdh(
        &mut self,
        their_key: &PublicKey,
        shared: &mut SharedSecret,
    ) -> Result<(), Error> {
        let pending = match self.pending.take() {
            Some(p) => p,
            None => return fail!(Error::BadStateTransition),
        };

        match pending {
            Pending::X25519(secret) => {
                check!(their_key[32] == 0, Error::BadPublicKey);
                let mut bytes = [0; 32];
                bytes.copy_from_slice(&their_key[..32]);
                let their_key = x25519_dalek::PublicKey::from(bytes);

                let secret = secret.diffie_hellman(&their_key);
                check!(secret.was_contributory(), Error::BadPublicKey);
                shared.copy_from_slice(secret.as_bytes());
            }
            Pending::P256(secret) => {
                let their_key = p256::PublicKey::from_sec1_bytes(their_key)
                    .or_else(|_| fail!(Error::BadPublicKey))?;
                let secret = p256::ecdh::diffie_hellman(
                    secret.to_nonzero_scalar(),
                    their_key.as_affine(),
                );
                shared.copy_from_slice(secret.raw_secret_bytes());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::crypto::ecdh::Ecdh as _;
    use crate::crypto::testdata;

    fn pad(key: [u8; 32]) -> PublicKey {
        let mut out = [0; 33];
        out[..32].copy_from_slice(&key);
        out
    }

    #[test]
    fn x25519_known_answer() {
        let mut ecdh = Ecdh::new();
        ecdh.set_ecdh_key_for_testing(
            Curve::X25519,
            &testdata::X25519_ALICE_PRIV,
        );

        let mut ours = [0; 33];
        let mut shared = [0; 32];
        ecdh.shared_secret_compute(
            Curve::X25519,
            &pad(testdata::X25519_BOB_PUB),
            &mut ours,
            &mut shared,
        )
        .unwrap();
        assert_eq!(ours, pad(testdata::X25519_ALICE_PUB));
        assert_eq!(shared, testdata::X25519_SHARED);
    }

    #[test]
    fn p256_known_answer() {
        let mut ecdh = Ecdh::new();
        ecdh.set_ecdh_key_for_testing(Curve::P256, &testdata::P256_A_PRIV);

        let mut ours = [0; 33];
        let mut shared = [0; 32];
        ecdh.shared_secret_compute(
            Curve::P256,
            &testdata::P256_B_PUB,
            &mut ours,
            &mut shared,
        )
        .unwrap();
        assert_eq!(ours, testdata::P256_A_PUB);
        assert_eq!(shared, testdata::P256_SHARED);
    }

    #[test]
    fn fresh_keys() {
        for curve in [Curve::X25519, Curve::P256] {
            let mut ecdh = Ecdh::new();
            let mut a = [0; 33];
            let mut b = [0; 33];
            ecdh.begin_ecdh(curve, &mut a).unwrap();
            ecdh.begin_ecdh(curve, &mut b).unwrap();
            assert_ne!(a, b);
        }
    }

    #[test]
    fn two_party() {
        for curve in [Curve::X25519, Curve::P256] {
            let mut alice = Ecdh::new();
            let mut bob = Ecdh::new();
            let mut alice_pub = [0; 33];
            let mut bob_pub = [0; 33];
            alice.begin_ecdh(curve, &mut alice_pub).unwrap();
            bob.begin_ecdh(curve, &mut bob_pub).unwrap();

            let mut alice_shared = [0; 32];
            let mut bob_shared = [0; 32];
            alice.finish_ecdh(&bob_pub, &mut alice_shared).unwrap();
            bob.finish_ecdh(&alice_pub, &mut bob_shared).unwrap();
            assert_eq!(alice_shared, bob_shared);
        }
    }

    #[test]
    fn bad_keys() {
        let mut ecdh = Ecdh::new();
        let mut ours = [0; 33];
        let mut shared = [0; 32];

        let mut padded = pad(testdata::X25519_BOB_PUB);
        padded[32] = 1;
        assert_eq!(
            ecdh.shared_secret_compute(
                Curve::X25519,
                &padded,
                &mut ours,
                &mut shared
            ),
            Err(Error::BadPublicKey)
        );

        // The identity point yields an all-zero secret.
        assert_eq!(
            ecdh.shared_secret_compute(
                Curve::X25519,
                &[0; 33],
                &mut ours,
                &mut shared
            ),
            Err(Error::BadPublicKey)
        );

        let mut off_curve = testdata::P256_B_PUB;
        off_curve[0] = 0x04;
        assert_eq!(
            ecdh.shared_secret_compute(
                Curve::P256,
                &off_curve,
                &mut ours,
                &mut shared
            ),
            Err(Error::BadPublicKey)
        );
    }

    #[test]
    fn finish_without_begin() {
        let mut ecdh = Ecdh::new();
        let mut shared = [0; 32];
        assert_eq!(
            ecdh.finish_ecdh(&testdata::P256_B_PUB, &mut shared),
            Err(Error::BadStateTransition)
        );

        let mut ours = [0; 33];
        ecdh.begin_ecdh(Curve::P256, &mut ours).unwrap();
        ecdh.finish_ecdh(&testdata::P256_B_PUB, &mut shared).unwrap();
        assert_eq!(
            ecdh.finish_ecdh(&testdata::P256_B_PUB, &mut shared),
            Err(Error::BadStateTransition)
        );
    }
}
