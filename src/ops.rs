// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Pluggable device functionality.
//!
//! This module provides the [`Ops`] trait, through which the protocol engine
//! reaches the device it is provisioning: its identifiers, its authentication
//! key, its attestation key storage, and its entropy source.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::crypto::aead;
use crate::protocol::CertChain;
use crate::protocol::KeyType;
use crate::protocol::PRODUCT_ID_LEN;
use crate::protocol::SOM_ID_LEN;
use crate::Error;
use crate::Result;

/// Device operations needed to run ATAP.
///
/// Methods with default implementations are optional capabilities; the
/// defaults report [`Error::UnsupportedOperation`].
pub trait Ops {
    /// Reads the device's 16-byte product ID.
    fn read_product_id(&mut self) -> Result<[u8; PRODUCT_ID_LEN]>;

    /// Reads the device's 16-byte SoM ID.
    ///
    /// Needed only for the SoM operations.
    fn read_som_id(&mut self) -> Result<[u8; SOM_ID_LEN]> {
        Err(Error::UnsupportedOperation)
    }

    /// Returns the type of the device's authentication key, or
    /// [`KeyType::None`] if it has none.
    fn get_auth_key_type(&mut self) -> Result<KeyType>;

    /// Reads the certificate chain for the device's authentication key.
    ///
    /// Returns [`Error::UnsupportedOperation`] if the device has no
    /// authentication key.
    fn read_auth_key_cert_chain(&mut self) -> Result<CertChain<Vec<u8>>>;

    /// Signs `nonce` with the device's authentication key.
    ///
    /// Returns [`Error::UnsupportedOperation`] if the device has no
    /// authentication key.
    fn auth_key_sign(&mut self, nonce: &[u8]) -> Result<Vec<u8>>;

    /// Stores an attestation key of type `key_type`, together with its
    /// certificate chain.
    ///
    /// For `Certify`, `key` is empty: the device keeps the private key it
    /// already has and only receives the chain.
    fn write_attestation_key(
        &mut self,
        key_type: KeyType,
        key: &[u8],
        cert_chain: &CertChain<&[u8]>,
    ) -> Result<()>;

    /// Reads the public half of an existing attestation key of type
    /// `key_type`.
    ///
    /// Returns [`Error::UnsupportedOperation`] if there is no such key.
    fn read_attestation_public_key(
        &mut self,
        key_type: KeyType,
    ) -> Result<Vec<u8>>;

    /// Reads the SoC-global AES key that encrypted issue operations deliver
    /// private keys under.
    fn read_soc_global_key(&mut self) -> Result<aead::Key> {
        Err(Error::UnsupportedOperation)
    }

    /// Fills `buf` with random bytes.
    ///
    /// Failures are reported as [`Error::Io`].
    fn get_random_bytes(&mut self, buf: &mut [u8]) -> Result<()>;
}
impl dyn Ops {} // Ensure object-safe.

macro_rules! forward_ops {
    ($($ty:ty),*) => {$(
        impl<O: Ops + ?Sized> Ops for $ty {
            fn read_product_id(&mut self) -> Result<[u8; PRODUCT_ID_LEN]> {
                O::read_product_id(self)
            }

            fn read_som_id(&mut self) -> Result<[u8; SOM_ID_LEN]> {
                O::read_som_id(self)
            }

            fn get_auth_key_type(&mut self) -> Result<KeyType> {
                O::get_auth_key_type(self)
            }

            fn read_auth_key_cert_chain(
                &mut self,
            ) -> Result<CertChain<Vec<u8>>> {
                O::read_auth_key_cert_chain(self)
            }

            fn auth_key_sign(&mut self, nonce: &[u8]) -> Result<Vec<u8>> {
                O::auth_key_sign(self, nonce)
            }

            fn write_attestation_key(
                &mut self,
                key_type: KeyType,
                key: &[u8],
                cert_chain: &CertChain<&[u8]>,
            ) -> Result<()> {
                O::write_attestation_key(self, key_type, key, cert_chain)
            }

            fn read_attestation_public_key(
                &mut self,
                key_type: KeyType,
            ) -> Result<Vec<u8>> {
                O::read_attestation_public_key(self, key_type)
            }

            fn read_soc_global_key(&mut self) -> Result<aead::Key> {
                O::read_soc_global_key(self)
            }

            fn get_random_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
                O::get_random_bytes(self, buf)
            }
        }
    )*};
}
forward_ops!(&mut O, Box<O>);


#[cfg(test)]
mod test {
    use super::*;

    fn product_id_via(ops: &mut dyn Ops) -> Result<[u8; PRODUCT_ID_LEN]> {
        ops.read_product_id()
    }

    #[test]
    fn defaults_are_unsupported() {
        struct Minimal;
        impl Ops for Minimal {
            fn read_product_id(&mut self) -> Result<[u8; PRODUCT_ID_LEN]> {
                Ok([7; PRODUCT_ID_LEN])
            }
            fn get_auth_key_type(&mut self) -> Result<KeyType> {
                Ok(KeyType::None)
            }
            fn read_auth_key_cert_chain(
                &mut self,
            ) -> Result<CertChain<Vec<u8>>> {
                Err(Error::UnsupportedOperation)
            }
            fn auth_key_sign(&mut self, _: &[u8]) -> Result<Vec<u8>> {
                Err(Error::UnsupportedOperation)
            }
            fn write_attestation_key(
                &mut self,
                _: KeyType,
                _: &[u8],
                _: &CertChain<&[u8]>,
            ) -> Result<()> {
                Ok(())
            }
            fn read_attestation_public_key(
                &mut self,
                _: KeyType,
            ) -> Result<Vec<u8>> {
                Err(Error::UnsupportedOperation)
            }
            fn get_random_bytes(&mut self, _: &mut [u8]) -> Result<()> {
                Ok(())
            }
        }

        let mut boxed: Box<dyn Ops> = Box::new(Minimal);
        assert_eq!(boxed.read_som_id(), Err(Error::UnsupportedOperation));
        assert_eq!(
            boxed.read_soc_global_key(),
            Err(Error::UnsupportedOperation)
        );
        assert_eq!(product_id_via(&mut boxed), Ok([7; PRODUCT_ID_LEN]));
    }

    #[test]
    fn fake_records_writes() {
        let mut ops = fake::Ops::new([1; PRODUCT_ID_LEN]);
        ops.auth = fake::Auth::Fixed {
            key_type: KeyType::Rsa,
            chain: vec![b"cert".to_vec()],
            signature: b"sig".to_vec(),
        };
        let by_ref = &mut ops;
        assert_eq!(by_ref.get_auth_key_type(), Ok(KeyType::Rsa));
        assert_eq!(by_ref.auth_key_sign(b"nonce"), Ok(b"sig".to_vec()));

        let chain = CertChain::from_certs([&b"leaf"[..]]).unwrap();
        by_ref
            .write_attestation_key(KeyType::Ecdsa, b"key", &chain)
            .unwrap();
        assert_eq!(ops.signed_nonces, [b"nonce".to_vec()]);
        assert_eq!(
            ops.written,
            [fake::Written {
                key_type: KeyType::Ecdsa,
                key: b"key".to_vec(),
                chain: vec![b"leaf".to_vec()],
            }]
        );
    }
}
