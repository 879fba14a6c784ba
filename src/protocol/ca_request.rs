// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The CA request message.
//!
//! The device answers an [`OperationStart`] with a [`CaRequest`]:
//! ```text
//! header | device public key (33) | IV (12) | len (4) | ciphertext | tag (16)
//! ```
//! The ciphertext decrypts to an [`InnerCaRequest`], whose layout depends on
//! whether the operation provisions product keys or SoM keys.
//!
//! [`OperationStart`]: crate::protocol::OperationStart

use crate::crypto::ecdh;
use crate::crypto::sha256;
use crate::io::Read as _;
use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;
use crate::protocol::CertChain;
use crate::protocol::Header;
use crate::protocol::KeyType;
use crate::protocol::Operation;
use crate::protocol::Sealed;
use crate::protocol::Version;
use crate::protocol::ECDH_KEY_LEN;
use crate::protocol::HEADER_LEN;
use crate::protocol::KEY_LEN_MAX;
use crate::protocol::SHA256_DIGEST_LEN;
use crate::protocol::SIGNATURE_LEN_MAX;

/// A message from the device to the CA.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CaRequest<'wire> {
    /// The protocol version of this message.
    pub version: Version,
    /// The device's ephemeral ECDH public key.
    pub device_public_key: ecdh::PublicKey,
    /// The sealed [`InnerCaRequest`].
    pub payload: Sealed<'wire>,
}

impl<'wire> FromWire<'wire> for CaRequest<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let header = Header::from_wire(r)?;
        let device_public_key = r.read_array::<ECDH_KEY_LEN>()?;
        let payload = Sealed::from_wire(r)?;
        Ok(Self {
            version: header.version,
            device_public_key,
            payload,
        })
    }
}

impl ToWire for CaRequest<'_> {
    fn wire_size(&self) -> usize {
        HEADER_LEN + ECDH_KEY_LEN + self.payload.wire_size()
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        Header::new(self.version, self.wire_size() - HEADER_LEN)?
            .to_wire(&mut w)?;
        w.write_bytes(&self.device_public_key)?;
        self.payload.to_wire(&mut w)?;
        Ok(())
    }
}

/// The decrypted payload of a [`CaRequest`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InnerCaRequest<'wire> {
    /// The protocol version of this message; matches the outer frame's.
    pub version: Version,
    /// The operation-specific body.
    pub body: RequestBody<'wire>,
}

/// The body of an [`InnerCaRequest`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RequestBody<'wire> {
    /// The body for product-key operations.
    Product(ProductRequest<'wire>),
    /// The body for SoM-key operations.
    Som(SomRequest),
}

impl<'wire> InnerCaRequest<'wire> {
    /// Parses an inner request for `operation` out of `bytes`, which must
    /// contain exactly one request.
    pub fn from_bytes(
        bytes: &'wire [u8],
        operation: Operation,
    ) -> Result<Self, wire::Error> {
        let mut r = bytes;
        let header = Header::from_wire(&mut r)?;
        let body = if operation.is_som() {
            RequestBody::Som(SomRequest::from_wire(&mut r)?)
        } else {
            RequestBody::Product(ProductRequest::from_wire(&mut r)?)
        };
        if r.remaining_data() != 0 {
            return Err(wire::Error::OutOfRange);
        }
        Ok(Self {
            version: header.version,
            body,
        })
    }

    /// Returns the product ID hash or SoM ID hash this request identifies
    /// the device by; the CA echoes it back in its response.
    pub fn identity_hash(&self) -> &sha256::Digest {
        match &self.body {
            RequestBody::Product(p) => &p.product_id_hash,
            RequestBody::Som(s) => &s.som_id_hash,
        }
    }
}

impl ToWire for InnerCaRequest<'_> {
    fn wire_size(&self) -> usize {
        HEADER_LEN
            + match &self.body {
                RequestBody::Product(p) => p.wire_size(),
                RequestBody::Som(s) => s.wire_size(),
            }
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        Header::new(self.version, self.wire_size() - HEADER_LEN)?
            .to_wire(&mut w)?;
        match &self.body {
            RequestBody::Product(p) => p.to_wire(&mut w),
            RequestBody::Som(s) => s.to_wire(&mut w),
        }
    }
}

/// A request for product keys.
///
/// The authentication fields are empty when the device has no authentication
/// key.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ProductRequest<'wire> {
    /// The certificate chain of the device's authentication key.
    pub auth_cert_chain: CertChain<&'wire [u8]>,
    /// The authentication key's signature over the session's auth nonce.
    pub auth_signature: &'wire [u8],
    /// SHA-256 of the device's product ID.
    pub product_id_hash: sha256::Digest,
    /// The device's existing RSA attestation public key, for `Certify`.
    pub rsa_public_key: &'wire [u8],
    /// The device's existing ECDSA attestation public key, for `Certify`.
    pub ecdsa_public_key: &'wire [u8],
    /// The device's existing Ed25519 attestation public key, for `Certify`.
    pub ed25519_public_key: &'wire [u8],
}

impl<'wire> ProductRequest<'wire> {
    /// Returns the public key slot for `key_type`, if it has one.
    pub fn public_key(&self, key_type: KeyType) -> Option<&'wire [u8]> {
        match key_type {
            KeyType::Rsa => Some(self.rsa_public_key),
            KeyType::Ecdsa => Some(self.ecdsa_public_key),
            KeyType::Ed25519 => Some(self.ed25519_public_key),
            _ => None,
        }
    }
}

impl<'wire> FromWire<'wire> for ProductRequest<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let auth_cert_chain = CertChain::from_wire(r)?;
        let auth_signature = wire::read_blob(r, SIGNATURE_LEN_MAX)?;
        let product_id_hash = r.read_array::<SHA256_DIGEST_LEN>()?;
        let rsa_public_key = wire::read_blob(r, KEY_LEN_MAX)?;
        let ecdsa_public_key = wire::read_blob(r, KEY_LEN_MAX)?;
        let ed25519_public_key = wire::read_blob(r, KEY_LEN_MAX)?;
        Ok(Self {
            auth_cert_chain,
            auth_signature,
            product_id_hash,
            rsa_public_key,
            ecdsa_public_key,
            ed25519_public_key,
        })
    }
}

impl ToWire for ProductRequest<'_> {
    fn wire_size(&self) -> usize {
        self.auth_cert_chain.wire_size()
            + 4
            + self.auth_signature.len()
            + SHA256_DIGEST_LEN
            + 4
            + self.rsa_public_key.len()
            + 4
            + self.ecdsa_public_key.len()
            + 4
            + self.ed25519_public_key.len()
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        if self.auth_signature.len() > SIGNATURE_LEN_MAX {
            return Err(wire::Error::OutOfRange);
        }
        self.auth_cert_chain.to_wire(&mut w)?;
        wire::write_blob(&mut w, self.auth_signature)?;
        w.write_bytes(&self.product_id_hash)?;
        for key in [
            self.rsa_public_key,
            self.ecdsa_public_key,
            self.ed25519_public_key,
        ] {
            if key.len() > KEY_LEN_MAX {
                return Err(wire::Error::OutOfRange);
            }
            wire::write_blob(&mut w, key)?;
        }
        Ok(())
    }
}

/// A request for SoM keys.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SomRequest {
    /// SHA-256 of the device's SoM ID.
    pub som_id_hash: sha256::Digest,
}

impl<'wire> FromWire<'wire> for SomRequest {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let som_id_hash = r.read_array::<SHA256_DIGEST_LEN>()?;
        Ok(Self { som_id_hash })
    }
}

impl ToWire for SomRequest {
    fn wire_size(&self) -> usize {
        SHA256_DIGEST_LEN
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        w.write_bytes(&self.som_id_hash)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io;
    use crate::protocol::wire::from_bytes;
    use crate::protocol::wire::to_vec;

    #[test]
    fn outer_round_trip() {
        let ct = [0xcc; 5];
        let req = CaRequest {
            version: Version::V1,
            device_public_key: [0x11; 33],
            payload: Sealed {
                iv: [0x22; 12],
                ciphertext: &ct,
                tag: [0x33; 16],
            },
        };
        let bytes = to_vec(&req).unwrap();
        assert_eq!(bytes.len(), 8 + 33 + 12 + 4 + 5 + 16);
        assert_eq!(&bytes[..8], &[1, 0, 0, 0, 70, 0, 0, 0]);
        assert_eq!(&bytes[53..57], &[5, 0, 0, 0]);
        assert_eq!(from_bytes::<CaRequest>(&bytes).unwrap(), req);
    }

    #[test]
    fn outer_ciphertext_overrun() {
        let ct = [0xcc; 5];
        let req = CaRequest {
            version: Version::V1,
            device_public_key: [0x11; 33],
            payload: Sealed {
                iv: [0x22; 12],
                ciphertext: &ct,
                tag: [0x33; 16],
            },
        };
        let mut bytes = to_vec(&req).unwrap();
        bytes[53] = 6;
        assert_eq!(
            from_bytes::<CaRequest>(&bytes).unwrap_err(),
            wire::Error::Io(io::Error::BufferExhausted)
        );
    }

    #[test]
    fn product_round_trip() {
        let cert = b"auth cert";
        let req = InnerCaRequest {
            version: Version::V1,
            body: RequestBody::Product(ProductRequest {
                auth_cert_chain: CertChain::from_certs([&cert[..]]).unwrap(),
                auth_signature: b"signature",
                product_id_hash: [0x44; 32],
                rsa_public_key: b"",
                ecdsa_public_key: b"ecdsa",
                ed25519_public_key: b"",
            }),
        };
        let bytes = to_vec(&req).unwrap();
        assert_eq!(
            bytes.len(),
            8 + (4 + 4 + 9) + (4 + 9) + 32 + (4 + 0) + (4 + 5) + (4 + 0)
        );

        let parsed = InnerCaRequest::from_bytes(&bytes, Operation::Certify)
            .unwrap();
        assert_eq!(parsed, req);
        match parsed.body {
            RequestBody::Product(p) => {
                assert_eq!(p.public_key(KeyType::Ecdsa), Some(&b"ecdsa"[..]));
                assert_eq!(p.public_key(KeyType::Epid), None);
            }
            RequestBody::Som(_) => panic!("wrong body"),
        }

        // A SoM operation reads the body as a bare hash, leaving bytes over.
        assert_eq!(
            InnerCaRequest::from_bytes(&bytes, Operation::IssueSomKey)
                .unwrap_err(),
            wire::Error::OutOfRange
        );
    }

    #[test]
    fn som_round_trip() {
        let req = InnerCaRequest {
            version: Version::V2,
            body: RequestBody::Som(SomRequest {
                som_id_hash: [0x55; 32],
            }),
        };
        let bytes = to_vec(&req).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(
            InnerCaRequest::from_bytes(&bytes, Operation::IssueEncryptedSomKey)
                .unwrap(),
            req
        );
    }

    #[test]
    fn oversized_signature() {
        let sig = [0; SIGNATURE_LEN_MAX + 1];
        let req = InnerCaRequest {
            version: Version::V1,
            body: RequestBody::Product(ProductRequest {
                auth_cert_chain: CertChain::new(),
                auth_signature: &sig,
                product_id_hash: [0; 32],
                rsa_public_key: b"",
                ecdsa_public_key: b"",
                ed25519_public_key: b"",
            }),
        };
        assert_eq!(to_vec(&req).unwrap_err(), wire::Error::OutOfRange);
    }
}
