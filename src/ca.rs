// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The CA side of an ATAP exchange.
//!
//! This is not a CA: it does not mint keys or sign certificates. It speaks
//! the CA's half of the wire protocol, so that factory tooling and tests can
//! drive a device through a complete exchange.
//!
//! ```text
//! let (mut session, start) = ca::Session::start(&mut crypto, curve, op, v)?;
//! // ... device answers `start` with `request` ...
//! let mut buf = Zeroizing::new(Vec::new());
//! let inner = session.open_request(&mut crypto, &request, &mut buf)?;
//! // ... mint keys and chains for `inner` ...
//! let response = session.seal_response(&mut crypto, &mut rng, &issued)?;
//! ```

use alloc::vec::Vec;

use zeroize::Zeroizing;

use crate::crypto::aead;
use crate::crypto::csrng;
use crate::crypto::ecdh;
use crate::crypto::Crypto;
use crate::protocol::wire;
use crate::protocol::CaRequest;
use crate::protocol::CaResponse;
use crate::protocol::Curve;
use crate::protocol::InnerCaRequest;
use crate::protocol::InnerCaResponse;
use crate::protocol::KeyBlob;
use crate::protocol::Operation;
use crate::protocol::OperationStart;
use crate::protocol::Version;
use crate::protocol::AUTH_NONCE_LEN;
use crate::protocol::ECDH_KEY_LEN;
use crate::protocol::ECDH_SHARED_SECRET_LEN;
use crate::protocol::KEY_LEN_MAX;
use crate::session;
use crate::session::Keys;
use crate::Error;
use crate::Result;

/// Keys agreed once the device's request has arrived.
struct Established {
    device_public_key: ecdh::PublicKey,
    keys: Keys,
}

/// The CA's view of one ATAP exchange.
pub struct Session {
    curve: Curve,
    operation: Operation,
    version: Version,
    ca_public_key: ecdh::PublicKey,
    established: Option<Established>,
}

impl Session {
    /// Begins an exchange, returning the session and the encoded operation
    /// start to send to the device.
    ///
    /// The ECDH private key stays inside `crypto` until
    /// [`Session::open_request()`] is called with the same provider.
    pub fn start<C: Crypto + ?Sized>(
        crypto: &mut C,
        curve: Curve,
        operation: Operation,
        version: Version,
    ) -> Result<(Self, Vec<u8>)> {
        check!(version >= operation.min_version(), Error::BadArgument);
        check!(crypto.supports(curve), Error::UnsupportedOperation);

        let mut ca_public_key = [0; ECDH_KEY_LEN];
        crypto.begin_ecdh(curve, &mut ca_public_key)?;
        let start = wire::to_vec(&OperationStart {
            version,
            curve,
            operation,
            ca_public_key,
        })?;
        info!("CA began {} over {} ({})", operation, curve, version);

        let session = Self {
            curve,
            operation,
            version,
            ca_public_key,
            established: None,
        };
        Ok((session, start))
    }

    /// Returns the curve of this exchange.
    pub fn curve(&self) -> Curve {
        self.curve
    }

    /// Returns the operation of this exchange.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the protocol version of this exchange.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the CA's ephemeral public key.
    pub fn ca_public_key(&self) -> &ecdh::PublicKey {
        &self.ca_public_key
    }

    /// Returns the device's ephemeral public key, once its request has been
    /// opened.
    pub fn device_public_key(&self) -> Option<&ecdh::PublicKey> {
        self.established.as_ref().map(|e| &e.device_public_key)
    }

    /// Returns the challenge the device's authentication key must have
    /// signed, once its request has been opened.
    pub fn auth_nonce(&self) -> Option<&[u8; AUTH_NONCE_LEN]> {
        self.established.as_ref().map(|e| e.keys.auth_nonce())
    }

    /// Completes key agreement with the device's `ca_request` and decrypts
    /// it, using `buf` to hold the plaintext.
    ///
    /// The plaintext stays zeroize-on-drop in `buf`; whatever `buf` held
    /// before is zeroized here. A session accepts exactly one request.
    pub fn open_request<'a, C: Crypto + ?Sized>(
        &mut self,
        crypto: &mut C,
        ca_request: &[u8],
        buf: &'a mut Zeroizing<Vec<u8>>,
    ) -> Result<InnerCaRequest<'a>> {
        check!(self.established.is_none(), Error::BadArgument);

        let request = wire::from_bytes::<CaRequest>(ca_request)?;
        check!(request.version == self.version, Error::BadArgument);

        let mut shared = Zeroizing::new([0; ECDH_SHARED_SECRET_LEN]);
        crypto.finish_ecdh(&request.device_public_key, &mut shared)?;
        let keys = session::derive_keys(
            crypto,
            &self.ca_public_key,
            &request.device_public_key,
            &shared,
        )?;

        let mut plaintext =
            session::open(crypto, keys.session_key(), &request.payload)?;
        core::mem::swap::<Vec<u8>>(buf, &mut plaintext);
        let buf: &'a [u8] = buf;
        self.established = Some(Established {
            device_public_key: request.device_public_key,
            keys,
        });

        let inner = InnerCaRequest::from_bytes(buf, self.operation)?;
        check!(inner.version == self.version, Error::BadArgument);
        Ok(inner)
    }

    /// Encrypts `response` under the session key, returning the encoded CA
    /// response.
    pub fn seal_response<C, R>(
        &self,
        crypto: &mut C,
        rng: &mut R,
        response: &InnerCaResponse,
    ) -> Result<Vec<u8>>
    where
        C: aead::Aes128Gcm + ?Sized,
        R: csrng::Csrng + ?Sized,
    {
        let established = match &self.established {
            Some(e) => e,
            None => return fail!(Error::BadArgument, "no request opened yet"),
        };
        check!(response.version == self.version, Error::BadArgument);

        let mut plaintext = Zeroizing::new(wire::to_vec(response)?);
        let iv = csrng::random_array(rng)?;
        let payload = session::seal(
            crypto,
            established.keys.session_key(),
            iv,
            &mut plaintext,
        )?;
        Ok(wire::to_vec(&CaResponse {
            version: self.version,
            payload,
        })?)
    }
}

/// Encrypts a private key to a device's SoC-global key, producing the blob
/// an encrypted issue operation delivers.
pub fn seal_key_blob<C, R>(
    crypto: &mut C,
    rng: &mut R,
    soc_global_key: &aead::Key,
    key: &[u8],
) -> Result<Vec<u8>>
where
    C: aead::Aes128Gcm + ?Sized,
    R: csrng::Csrng + ?Sized,
{
    check!(key.len() <= KEY_LEN_MAX, Error::BadArgument);

    let mut buf = Zeroizing::new(Vec::new());
    buf.try_reserve_exact(key.len())
        .or_else(|_| fail!(Error::OutOfMemory))?;
    buf.extend_from_slice(key);

    let iv = csrng::random_array(rng)?;
    let sealed = session::seal(crypto, soc_global_key, iv, &mut buf)?;
    Ok(wire::to_vec(&KeyBlob(sealed))?)
}
