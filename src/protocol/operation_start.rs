// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The operation start message.
//!
//! This message is sent by the CA to open a provisioning session. It is
//! always exactly [`OPERATION_START_LEN`] bytes:
//! ```text
//! header (8) | curve (1) | operation (1) | CA public key (33)
//! ```

use crate::crypto::ecdh;
use crate::io::ReadZero;
use crate::io::Write;
use crate::protocol::wire;
use crate::protocol::wire::FromWire;
use crate::protocol::wire::ToWire;
use crate::protocol::Curve;
use crate::protocol::Header;
use crate::protocol::Operation;
use crate::protocol::Version;
use crate::protocol::ECDH_KEY_LEN;
use crate::protocol::HEADER_LEN;

/// The length of an [`OperationStart`] message, in bytes.
pub const OPERATION_START_LEN: usize = HEADER_LEN + 2 + ECDH_KEY_LEN;

/// A message from the CA, opening a provisioning session.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OperationStart {
    /// The protocol version the CA speaks.
    pub version: Version,
    /// The curve to agree on a session key with.
    pub curve: Curve,
    /// The operation the CA wishes to perform.
    pub operation: Operation,
    /// The CA's ephemeral ECDH public key.
    pub ca_public_key: ecdh::PublicKey,
}

impl<'wire> FromWire<'wire> for OperationStart {
    fn from_wire<R: ReadZero<'wire>>(r: &mut R) -> Result<Self, wire::Error> {
        let header = Header::from_wire(r)?;
        if header.message_length as usize != OPERATION_START_LEN - HEADER_LEN
        {
            return Err(wire::Error::OutOfRange);
        }

        let curve = Curve::from_wire(r)?;
        let operation = Operation::from_wire(r)?;
        if header.version < operation.min_version() {
            return Err(wire::Error::OutOfRange);
        }

        let ca_public_key = r.read_array::<ECDH_KEY_LEN>()?;
        Ok(Self {
            version: header.version,
            curve,
            operation,
            ca_public_key,
        })
    }
}

impl ToWire for OperationStart {
    fn wire_size(&self) -> usize {
        OPERATION_START_LEN
    }

    fn to_wire<W: Write>(&self, mut w: W) -> Result<(), wire::Error> {
        Header::new(self.version, OPERATION_START_LEN - HEADER_LEN)?
            .to_wire(&mut w)?;
        self.curve.to_wire(&mut w)?;
        self.operation.to_wire(&mut w)?;
        w.write_bytes(&self.ca_public_key)?;
        Ok(())
    }
}
