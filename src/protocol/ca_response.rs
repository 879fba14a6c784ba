// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The CA response message.
//!
//! The CA answers a [`CaRequest`] with a [`CaResponse`]:
//! ```text
//! header | IV (12) | len (4) | ciphertext | tag (16)
//! ```
//! The ciphertext decrypts to an [`InnerCaResponse`]:
//! ```text
//! header | identity hash (32)
//!        | RSA chain | ECDSA chain | Ed25519 chain
//!        | RSA key   | ECDSA key   | Ed25519 key
//! ```
//!
//! [`CaRequest`]: crate::protocol::CaRequest

use crate::crypto::sha256;
use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;
use crate::protocol::CertChain;
use crate::protocol::Header;
use crate::protocol::KeyType;
use crate::protocol::Sealed;
use crate::protocol::Version;
use crate::protocol::ENCRYPTED_KEY_LEN_MAX;
use crate::protocol::HEADER_LEN;
use crate::protocol::SHA256_DIGEST_LEN;

/// A message from the CA to the device.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CaResponse<'wire> {
    /// The protocol version of this message.
    pub version: Version,
    /// The sealed [`InnerCaResponse`].
    pub payload: Sealed<'wire>,
}

impl<'wire> FromWire<'wire> for CaResponse<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let header = Header::from_wire(r)?;
        let payload = Sealed::from_wire(r)?;
        Ok(Self {
            version: header.version,
            payload,
        })
    }
}

impl ToWire for CaResponse<'_> {
    fn wire_size(&self) -> usize {
        HEADER_LEN + self.payload.wire_size()
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        Header::new(self.version, self.wire_size() - HEADER_LEN)?
            .to_wire(&mut w)?;
        self.payload.to_wire(&mut w)?;
        Ok(())
    }
}

/// A key slot in an [`InnerCaResponse`].
///
/// A slot is *issued* if its certificate chain is non-empty.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct IssuedSlot<'wire> {
    /// The certificate chain for this slot's key, leaf first.
    pub cert_chain: CertChain<&'wire [u8]>,
    /// The private key, possibly encrypted to the SoC-global key. Empty for
    /// `Certify`.
    pub key: &'wire [u8],
}

impl IssuedSlot<'_> {
    /// Returns whether the CA issued anything in this slot.
    pub fn is_issued(&self) -> bool {
        !self.cert_chain.is_empty()
    }
}

/// The decrypted payload of a [`CaResponse`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InnerCaResponse<'wire> {
    /// The protocol version of this message; matches the outer frame's.
    pub version: Version,
    /// Echoes the product ID hash or SoM ID hash from the request.
    pub identity_hash: sha256::Digest,
    /// The key slots, in [`KeyType::ISSUED`] order.
    pub slots: [IssuedSlot<'wire>; 3],
}

impl<'wire> InnerCaResponse<'wire> {
    /// Returns the slot for `key_type`, if it has one.
    pub fn slot(&self, key_type: KeyType) -> Option<&IssuedSlot<'wire>> {
        KeyType::ISSUED
            .iter()
            .position(|&k| k == key_type)
            .map(|i| &self.slots[i])
    }

    /// Iterates over the key types and slots of this response.
    pub fn iter_slots(
        &self,
    ) -> impl Iterator<Item = (KeyType, &IssuedSlot<'wire>)> + '_ {
        KeyType::ISSUED.into_iter().zip(self.slots.iter())
    }
}

impl<'wire> FromWire<'wire> for InnerCaResponse<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let header = Header::from_wire(r)?;
        let identity_hash = r.read_array::<SHA256_DIGEST_LEN>()?;

        let rsa_chain = CertChain::from_wire(r)?;
        let ecdsa_chain = CertChain::from_wire(r)?;
        let ed25519_chain = CertChain::from_wire(r)?;
        let rsa_key = wire::read_blob(r, ENCRYPTED_KEY_LEN_MAX)?;
        let ecdsa_key = wire::read_blob(r, ENCRYPTED_KEY_LEN_MAX)?;
        let ed25519_key = wire::read_blob(r, ENCRYPTED_KEY_LEN_MAX)?;

        Ok(Self {
            version: header.version,
            identity_hash,
            slots: [
                IssuedSlot {
                    cert_chain: rsa_chain,
                    key: rsa_key,
                },
                IssuedSlot {
                    cert_chain: ecdsa_chain,
                    key: ecdsa_key,
                },
                IssuedSlot {
                    cert_chain: ed25519_chain,
                    key: ed25519_key,
                },
            ],
        })
    }
}

impl ToWire for InnerCaResponse<'_> {
    fn wire_size(&self) -> usize {
        let slots: usize = self
            .slots
            .iter()
            .map(|s| s.cert_chain.wire_size() + 4 + s.key.len())
            .sum();
        HEADER_LEN + SHA256_DIGEST_LEN + slots
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        Header::new(self.version, self.wire_size() - HEADER_LEN)?
            .to_wire(&mut w)?;
        w.write_bytes(&self.identity_hash)?;
        for slot in &self.slots {
            slot.cert_chain.to_wire(&mut w)?;
        }
        for slot in &self.slots {
            if slot.key.len() > ENCRYPTED_KEY_LEN_MAX {
                return Err(wire::Error::OutOfRange);
            }
            wire::write_blob(&mut w, slot.key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io;
    use crate::protocol::wire::from_bytes;
    use crate::protocol::wire::to_vec;

    fn response<'a>(chain: &'a [u8], key: &'a [u8]) -> InnerCaResponse<'a> {
        InnerCaResponse {
            version: Version::V1,
            identity_hash: [0x77; 32],
            slots: [
                IssuedSlot::default(),
                IssuedSlot {
                    cert_chain: CertChain::from_certs([chain]).unwrap(),
                    key,
                },
                IssuedSlot::default(),
            ],
        }
    }

    #[test]
    fn inner_layout() {
        let resp = response(b"cert", b"key");
        let bytes = to_vec(&resp).unwrap();

        let mut expected = vec![1, 0, 0, 0, 67, 0, 0, 0];
        expected.extend_from_slice(&[0x77; 32]);
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&[8, 0, 0, 0, 4, 0, 0, 0]);
        expected.extend_from_slice(b"cert");
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&[0, 0, 0, 0]);
        expected.extend_from_slice(&[3, 0, 0, 0]);
        expected.extend_from_slice(b"key");
        expected.extend_from_slice(&[0, 0, 0, 0]);
        assert_eq!(bytes, expected);

        let parsed = from_bytes::<InnerCaResponse>(&bytes).unwrap();
        assert_eq!(parsed, resp);
        assert!(parsed.slot(KeyType::Ecdsa).unwrap().is_issued());
        assert!(!parsed.slot(KeyType::Rsa).unwrap().is_issued());
        assert!(parsed.slot(KeyType::None).is_none());
        assert_eq!(
            parsed
                .iter_slots()
                .filter(|(_, s)| s.is_issued())
                .map(|(k, _)| k)
                .collect::<Vec<_>>(),
            [KeyType::Ecdsa]
        );
    }

    #[test]
    fn inner_truncated() {
        let resp = response(b"cert", b"key");
        let bytes = to_vec(&resp).unwrap();
        let mut short = bytes[..bytes.len() - 1].to_vec();
        short[4] -= 1;
        assert_eq!(
            from_bytes::<InnerCaResponse>(&short).unwrap_err(),
            wire::Error::Io(io::Error::BufferExhausted)
        );
    }

    #[test]
    fn outer_round_trip() {
        let ct = [0xcc; 3];
        let resp = CaResponse {
            version: Version::V2,
            payload: Sealed {
                iv: [0x22; 12],
                ciphertext: &ct,
                tag: [0x33; 16],
            },
        };
        let bytes = to_vec(&resp).unwrap();
        assert_eq!(&bytes[..8], &[2, 0, 0, 0, 35, 0, 0, 0]);
        assert_eq!(from_bytes::<CaResponse>(&bytes).unwrap(), resp);

        // One byte short of what the header declares.
        assert_eq!(
            from_bytes::<CaResponse>(&bytes[..bytes.len() - 1]).unwrap_err(),
            wire::Error::OutOfRange
        );
    }
}
