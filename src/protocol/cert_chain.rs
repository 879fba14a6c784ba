// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Certificate chains.
//!
//! On the wire, a chain is a `u32` giving the size of the body, followed by
//! the body: a sequence of certificates, each a `u32` length followed by that
//! many bytes. An empty chain is just a zero size.

use alloc::vec::Vec;

use arrayvec::ArrayVec;

use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;
use crate::protocol::CERT_CHAIN_ENTRIES_MAX;
use crate::protocol::CERT_LEN_MAX;

/// A chain of at most [`CERT_CHAIN_ENTRIES_MAX`] certificates, leaf first.
///
/// `B` is the storage for each certificate: `&[u8]` when borrowed from a
/// frame, `Vec<u8>` when owned.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CertChain<B> {
    entries: ArrayVec<B, CERT_CHAIN_ENTRIES_MAX>,
}

impl<B> Default for CertChain<B> {
    fn default() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }
}

impl<B: AsRef<[u8]>> CertChain<B> {
    /// Creates a new, empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain out of `certs`, which must number at most
    /// [`CERT_CHAIN_ENTRIES_MAX`] and each be at most [`CERT_LEN_MAX`] bytes.
    pub fn from_certs(
        certs: impl IntoIterator<Item = B>,
    ) -> Result<Self, wire::Error> {
        let mut chain = Self::new();
        for cert in certs {
            chain.push(cert)?;
        }
        Ok(chain)
    }

    /// Appends a certificate to the end of the chain.
    pub fn push(&mut self, cert: B) -> Result<(), wire::Error> {
        if cert.as_ref().len() > CERT_LEN_MAX {
            return Err(wire::Error::OutOfRange);
        }
        self.entries
            .try_push(cert)
            .map_err(|_| wire::Error::OutOfRange)
    }

    /// Returns the certificates in this chain.
    pub fn certs(&self) -> &[B] {
        &self.entries
    }

    /// Returns whether this chain contains no certificates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a borrowed view of this chain.
    pub fn borrowed(&self) -> CertChain<&[u8]> {
        CertChain {
            entries: self.entries.iter().map(AsRef::as_ref).collect(),
        }
    }

    /// Copies this chain into owned storage.
    pub fn owned(&self) -> CertChain<Vec<u8>> {
        CertChain {
            entries: self.entries.iter().map(|c| c.as_ref().to_vec()).collect(),
        }
    }

    fn body_len(&self) -> usize {
        self.entries.iter().map(|c| 4 + c.as_ref().len()).sum()
    }
}

impl<'wire> FromWire<'wire> for CertChain<&'wire [u8]> {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let size = r.read_le::<u32>()? as usize;
        let mut body = r.read_slice(size)?;

        let mut chain = Self::new();
        while !body.is_empty() {
            let cert = wire::read_blob(&mut body, CERT_LEN_MAX)?;
            chain.push(cert)?;
        }
        Ok(chain)
    }
}

impl<B: AsRef<[u8]>> ToWire for CertChain<B> {
    fn wire_size(&self) -> usize {
        4 + self.body_len()
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        w.write_le(wire::len_field(self.body_len())?)?;
        for cert in &self.entries {
            wire::write_blob(&mut w, cert.as_ref())?;
        }
        Ok(())
    }
}
