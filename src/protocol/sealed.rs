// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The AES-128-GCM envelope shared by requests and responses.
//!
//! The same envelope, without its length prefix, is the format of a private
//! key delivered by an encrypted issue operation; see [`KeyBlob`].

use crate::crypto::aead;
use crate::io;
use crate::io::Read as _;
use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;
use crate::protocol::GCM_IV_LEN;
use crate::protocol::GCM_TAG_LEN;

/// An encrypted payload: an IV, a length-prefixed ciphertext, and a tag.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Sealed<'wire> {
    /// The IV the payload was encrypted under.
    pub iv: aead::Iv,
    /// The encrypted payload.
    pub ciphertext: &'wire [u8],
    /// The authentication tag.
    pub tag: aead::Tag,
}

impl<'wire> FromWire<'wire> for Sealed<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let iv = r.read_array::<GCM_IV_LEN>()?;
        let ct_len = r.read_le::<u32>()? as usize;
        let ciphertext = r.read_slice(ct_len)?;
        let tag = r.read_array::<GCM_TAG_LEN>()?;
        Ok(Self {
            iv,
            ciphertext,
            tag,
        })
    }
}

impl ToWire for Sealed<'_> {
    fn wire_size(&self) -> usize {
        GCM_IV_LEN + 4 + self.ciphertext.len() + GCM_TAG_LEN
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        w.write_bytes(&self.iv)?;
        wire::write_blob(&mut w, self.ciphertext)?;
        w.write_bytes(&self.tag)?;
        Ok(())
    }
}

/// A [`Sealed`] in its key-blob form: `IV || ciphertext || tag`, with the
/// ciphertext spanning everything between the IV and the tag.
///
/// Encrypted issue operations deliver each private key as a `KeyBlob`, sealed
/// under the device's SoC-global key.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct KeyBlob<'wire>(pub Sealed<'wire>);

impl<'wire> FromWire<'wire> for KeyBlob<'wire> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let iv = r.read_array::<GCM_IV_LEN>()?;
        let ct_len = r
            .remaining_data()
            .checked_sub(GCM_TAG_LEN)
            .ok_or(wire::Error::Io(io::Error::BufferExhausted))?;
        let ciphertext = r.read_slice(ct_len)?;
        let tag = r.read_array::<GCM_TAG_LEN>()?;
        Ok(Self(Sealed {
            iv,
            ciphertext,
            tag,
        }))
    }
}

impl ToWire for KeyBlob<'_> {
    fn wire_size(&self) -> usize {
        GCM_IV_LEN + self.0.ciphertext.len() + GCM_TAG_LEN
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        w.write_bytes(&self.0.iv)?;
        w.write_bytes(self.0.ciphertext)?;
        w.write_bytes(&self.0.tag)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::protocol::wire::from_bytes;
    use crate::protocol::wire::to_vec;

    #[test]
    fn key_blob() {
        let ct = [0xcc; 4];
        let blob = KeyBlob(Sealed {
            iv: [0x11; 12],
            ciphertext: &ct,
            tag: [0x22; 16],
        });
        let bytes = to_vec(&blob).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[12..16], &ct);
        assert_eq!(from_bytes::<KeyBlob>(&bytes).unwrap(), blob);

        assert_eq!(
            from_bytes::<KeyBlob>(&bytes[..27]).unwrap_err(),
            wire::Error::Io(io::Error::BufferExhausted)
        );
        // Just an IV and a tag: an empty key.
        let empty = from_bytes::<KeyBlob>(&bytes[..28]).unwrap();
        assert!(empty.0.ciphertext.is_empty());
    }
}
