// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! ATAP protocol messages.
//!
//! Every ATAP frame begins with an eight-byte [`Header`]:
//! - A one-byte protocol [`Version`].
//! - Three reserved bytes, which must be zero.
//! - A little-endian `u32` giving the number of bytes that follow the header.
//!
//! The declared length must agree exactly with the size of the buffer the
//! frame was delivered in; a frame is never a prefix of a larger buffer.
//!
//! Four frames travel between the device and the CA:
//! - [`OperationStart`], from the CA, which opens a session.
//! - [`CaRequest`], from the device, whose sealed payload is an
//!   [`InnerCaRequest`].
//! - [`CaResponse`], from the CA, whose sealed payload is an
//!   [`InnerCaResponse`].
//!
//! All integers are little-endian. Variable-length fields are a `u32` length
//! followed by that many bytes.

use crate::crypto::aead;
use crate::crypto::ecdh;
use crate::crypto::sha256;
use crate::io::Read as _;
use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;

#[macro_use]
pub mod wire;

pub mod ca_request;
pub use ca_request::CaRequest;
pub use ca_request::InnerCaRequest;

pub mod ca_response;
pub use ca_response::CaResponse;
pub use ca_response::InnerCaResponse;

pub mod cert_chain;
pub use cert_chain::CertChain;

pub mod operation_start;
pub use operation_start::OperationStart;

mod sealed;
pub use sealed::KeyBlob;
pub use sealed::Sealed;

/// The length of a [`Header`], in bytes.
pub const HEADER_LEN: usize = 8;

/// The length of an ECDH public key slot, in bytes.
///
/// P-256 keys are SEC1-compressed points; X25519 keys are 32 bytes followed by
/// a single zero byte.
pub const ECDH_KEY_LEN: usize = core::mem::size_of::<ecdh::PublicKey>();

/// The length of an ECDH shared secret, in bytes.
pub const ECDH_SHARED_SECRET_LEN: usize =
    core::mem::size_of::<ecdh::SharedSecret>();

/// The length of an AES-128-GCM IV, in bytes.
pub const GCM_IV_LEN: usize = core::mem::size_of::<aead::Iv>();

/// The length of an AES-128-GCM tag, in bytes.
pub const GCM_TAG_LEN: usize = core::mem::size_of::<aead::Tag>();

/// The length of an AES-128 key, in bytes.
pub const AES_128_KEY_LEN: usize = core::mem::size_of::<aead::Key>();

/// The length of a SHA-256 digest, in bytes.
pub const SHA256_DIGEST_LEN: usize = core::mem::size_of::<sha256::Digest>();

/// The length of the challenge signed by a device's authentication key.
pub const AUTH_NONCE_LEN: usize = 16;

/// The length of a product ID, in bytes.
pub const PRODUCT_ID_LEN: usize = 16;

/// The length of a SoM ID, in bytes.
pub const SOM_ID_LEN: usize = 16;

/// The maximum number of certificates in a [`CertChain`].
pub const CERT_CHAIN_ENTRIES_MAX: usize = 8;

/// The maximum length of a single certificate, in bytes.
pub const CERT_LEN_MAX: usize = 2048;

/// The maximum length of a key, public or private, in bytes.
pub const KEY_LEN_MAX: usize = 2048;

/// The maximum length of an encrypted private key blob, in bytes.
///
/// Such a blob is an IV, a key's ciphertext, and a tag.
pub const ENCRYPTED_KEY_LEN_MAX: usize = GCM_IV_LEN + KEY_LEN_MAX + GCM_TAG_LEN;

/// The maximum length of an authentication signature, in bytes.
pub const SIGNATURE_LEN_MAX: usize = 512;

wire_enum! {
    /// An ATAP protocol version.
    pub enum Version: u8 {
        /// The original protocol.
        V1 = 0x01,
        /// Adds the SoM operations.
        V2 = 0x02,
    }
}

impl Version {
    /// The newest version this crate speaks.
    pub const LATEST: Self = Self::V2;
}

wire_enum! {
    /// An ECDH curve used to agree on a session key.
    pub enum Curve: u8 {
        /// NIST P-256.
        P256 = 0x01,
        /// Curve25519, in its Diffie-Hellman form.
        X25519 = 0x02,
    }
}

wire_enum! {
    /// A provisioning operation, chosen by the CA.
    pub enum Operation: u8 {
        /// Certify keys the device already holds.
        Certify = 0x01,
        /// Issue product attestation keys and certificates.
        Issue = 0x02,
        /// Like `Issue`, but the private keys are additionally encrypted to
        /// the device's SoC-global key.
        IssueEncrypted = 0x03,
        /// Issue SoM attestation keys and certificates.
        IssueSomKey = 0x04,
        /// Like `IssueSomKey`, but the private keys are additionally
        /// encrypted to the device's SoC-global key.
        IssueEncryptedSomKey = 0x05,
    }
}

impl Operation {
    /// Returns whether this operation provisions SoM keys rather than product
    /// keys.
    pub fn is_som(self) -> bool {
        matches!(self, Self::IssueSomKey | Self::IssueEncryptedSomKey)
    }

    /// Returns whether this operation delivers private keys encrypted to the
    /// SoC-global key.
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::IssueEncrypted | Self::IssueEncryptedSomKey)
    }

    /// Returns whether this operation delivers private keys at all.
    pub fn issues_keys(self) -> bool {
        !matches!(self, Self::Certify)
    }

    /// Returns the oldest protocol version that supports this operation.
    pub fn min_version(self) -> Version {
        if self.is_som() {
            Version::V2
        } else {
            Version::V1
        }
    }
}

wire_enum! {
    /// An attestation key type.
    ///
    /// The three issuable types, in wire order, are listed in
    /// [`KeyType::ISSUED`].
    pub enum KeyType: u8 {
        /// No key; used to report that a device has no authentication key.
        None = 0x00,
        /// RSA.
        Rsa = 0x01,
        /// ECDSA.
        Ecdsa = 0x02,
        /// Ed25519.
        Ed25519 = 0x03,
        /// Intel EPID.
        Epid = 0x04,
    }
}

impl KeyType {
    /// The key types a CA may issue, in the order their slots appear on the
    /// wire.
    pub const ISSUED: [Self; 3] = [Self::Rsa, Self::Ecdsa, Self::Ed25519];
}

/// The header at the front of every ATAP frame.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Header {
    /// The protocol version of the frame.
    pub version: Version,
    /// The number of bytes that follow the header.
    pub message_length: u32,
}

impl Header {
    /// Builds a header for a frame whose body is `body_len` bytes long.
    pub fn new(version: Version, body_len: usize) -> Result<Self, wire::Error> {
        Ok(Self {
            version,
            message_length: wire::len_field(body_len)?,
        })
    }
}

impl<'wire> FromWire<'wire> for Header {
    /// Parses a header, checking that exactly `message_length` bytes remain
    /// after it.
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let version = Version::from_wire(r)?;
        let reserved = r.read_array::<3>()?;
        if reserved != [0; 3] {
            return Err(wire::Error::OutOfRange);
        }
        let message_length = r.read_le::<u32>()?;
        if message_length as usize != r.remaining_data() {
            return Err(wire::Error::OutOfRange);
        }
        Ok(Self {
            version,
            message_length,
        })
    }
}

impl ToWire for Header {
    fn wire_size(&self) -> usize {
        HEADER_LEN
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        self.version.to_wire(&mut w)?;
        w.write_bytes(&[0; 3])?;
        w.write_le(self.message_length)?;
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
    fn header_round_trip() {
        let header = Header::new(Version::V2, 3).unwrap();
        let mut bytes = to_vec(&header).unwrap();
        assert_eq!(bytes, [2, 0, 0, 0, 3, 0, 0, 0]);

        bytes.extend_from_slice(&[0xaa; 3]);
        let mut r = &bytes[..];
        assert_eq!(Header::from_wire(&mut r).unwrap(), header);
        assert_eq!(r, &[0xaa; 3]);
    }

    #[test]
    fn header_length_must_match() {
        let short = [1, 0, 0, 0, 3, 0, 0, 0, 0xaa, 0xaa];
        assert_eq!(
            Header::from_wire(&mut &short[..]).unwrap_err(),
            wire::Error::OutOfRange
        );

        let long = [1, 0, 0, 0, 1, 0, 0, 0, 0xaa, 0xaa];
        assert_eq!(
            Header::from_wire(&mut &long[..]).unwrap_err(),
            wire::Error::OutOfRange
        );
    }

    #[test]
    fn header_rejects_bad_fields() {
        let bad_version = [3, 0, 0, 0, 0, 0, 0, 0];
        assert_eq!(
            from_bytes::<Header>(&bad_version).unwrap_err(),
            wire::Error::OutOfRange
        );

        let bad_reserved = [1, 0, 1, 0, 0, 0, 0, 0];
        assert_eq!(
            from_bytes::<Header>(&bad_reserved).unwrap_err(),
            wire::Error::OutOfRange
        );

        let truncated = [1, 0, 0, 0, 0, 0];
        assert_eq!(
            from_bytes::<Header>(&truncated).unwrap_err(),
            wire::Error::Io(io::Error::BufferExhausted)
        );
    }

    #[test]
    fn operation_properties() {
        assert!(Operation::IssueSomKey.is_som());
        assert!(!Operation::IssueEncrypted.is_som());
        assert!(Operation::IssueEncryptedSomKey.is_encrypted());
        assert!(!Operation::Certify.issues_keys());
        assert_eq!(Operation::Issue.min_version(), Version::V1);
        assert_eq!(Operation::IssueSomKey.min_version(), Version::V2);
        assert_eq!("X25519".parse::<Curve>().unwrap(), Curve::X25519);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn enums_serialize_by_name() {
        let json = serde_json::to_string(&Operation::IssueEncrypted).unwrap();
        assert_eq!(json, r#""IssueEncrypted""#);
        assert_eq!(
            serde_json::from_str::<KeyType>(r#""Ed25519""#).unwrap(),
            KeyType::Ed25519
        );
        assert!(serde_json::from_str::<Version>(r#""V3""#).is_err());
    }
}
