// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The device side of ATAP.
//!
//! A [`Provisioner`] drives a device through one provisioning attempt at a
//! time:
//!
//! ```text
//!  Start
//!    | get_ca_request()
//!    v
//!  SessionEstablished ------+
//!    |                      |
//!    v                      |
//!  RequestBuilt ------------+-- on error --> Aborted
//!    | set_ca_response()    |
//!    v                      |
//!  ResponseApplied ---------+
//! ```
//!
//! Any state may begin a new attempt with [`Provisioner::get_ca_request()`];
//! doing so discards whatever session was in flight. Session secrets live
//! only inside the `Provisioner`, and are zeroed as soon as the attempt that
//! created them ends, successfully or not.
//!
//! Nothing is written to the device until the CA's response has been fully
//! decrypted and validated.

use alloc::vec::Vec;

use arrayvec::ArrayVec;
use zeroize::Zeroizing;

use crate::crypto::sha256;
use crate::crypto::Crypto;
use crate::ops::Ops;
use crate::protocol::ca_request::ProductRequest;
use crate::protocol::ca_request::RequestBody;
use crate::protocol::ca_request::SomRequest;
use crate::protocol::ca_response::IssuedSlot;
use crate::protocol::wire;
use crate::protocol::CaRequest;
use crate::protocol::CaResponse;
use crate::protocol::CertChain;
use crate::protocol::InnerCaRequest;
use crate::protocol::InnerCaResponse;
use crate::protocol::KeyBlob;
use crate::protocol::KeyType;
use crate::protocol::Operation;
use crate::protocol::OperationStart;
use crate::protocol::GCM_IV_LEN;
use crate::protocol::KEY_LEN_MAX;
use crate::protocol::SHA256_DIGEST_LEN;
use crate::protocol::SIGNATURE_LEN_MAX;
use crate::session;
use crate::session::Session;
use crate::Error;
use crate::Result;

/// The state of a [`Provisioner`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum State {
    /// No attempt has been made yet.
    Start,
    /// Keys have been agreed with the CA, and the request is being built.
    ///
    /// This state never outlives a call to
    /// [`Provisioner::get_ca_request()`].
    SessionEstablished,
    /// A request has been handed out; the engine awaits the CA's response.
    RequestBuilt,
    /// The CA's response was applied to the device.
    ResponseApplied,
    /// The last attempt failed or was abandoned.
    Aborted,
}

/// The ATAP protocol engine.
pub struct Provisioner<O, C> {
    ops: O,
    crypto: C,
    state: State,
    session: Option<Session>,
}

impl<O: Ops, C: Crypto> Provisioner<O, C> {
    /// Creates a new `Provisioner` for the device behind `ops`, using
    /// `crypto` for every cryptographic operation.
    pub fn new(ops: O, crypto: C) -> Self {
        Self {
            ops,
            crypto,
            state: State::Start,
            session: None,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the device operations.
    pub fn ops(&self) -> &O {
        &self.ops
    }

    /// Returns the device operations, mutably.
    pub fn ops_mut(&mut self) -> &mut O {
        &mut self.ops
    }

    /// Returns the cryptography provider, mutably.
    pub fn crypto_mut(&mut self) -> &mut C {
        &mut self.crypto
    }

    /// Abandons the attempt in flight, if any, zeroing its secrets.
    pub fn abort(&mut self) {
        if self.session.take().is_some() {
            warn!("abandoning an in-flight ATAP session");
        }
        self.state = State::Aborted;
    }

    /// Answers the CA's `operation_start` message, returning the CA request
    /// to send back.
    ///
    /// This establishes a fresh session; any previous one is discarded.
    pub fn get_ca_request(
        &mut self,
        operation_start: &[u8],
    ) -> Result<Vec<u8>> {
        if self.session.take().is_some() {
            warn!("discarding the previous ATAP session");
        }
        self.state = State::Start;

        match self.build_request(operation_start) {
            Ok((session, request)) => {
                self.session = Some(session);
                self.state = State::RequestBuilt;
                Ok(request)
            }
            Err(e) => {
                self.abort();
                Err(e)
            }
        }
    }

    /// Applies the CA's `ca_response` to the device, writing every issued key
    /// and certificate chain.
    ///
    /// Only valid after a successful [`Provisioner::get_ca_request()`]. The
    /// session ends with this call either way.
    pub fn set_ca_response(&mut self, ca_response: &[u8]) -> Result<()> {
        let session = match (self.state, self.session.take()) {
            (State::RequestBuilt, Some(session)) => session,
            _ => return fail!(Error::BadArgument, "no ATAP request in flight"),
        };

        match self.apply_response(&session, ca_response) {
            Ok(()) => {
                info!("applied {} response", session.operation());
                self.state = State::ResponseApplied;
                Ok(())
            }
            Err(e) => {
                self.abort();
                Err(e)
            }
        }
    }

    fn build_request(
        &mut self,
        operation_start: &[u8],
    ) -> Result<(Session, Vec<u8>)> {
        let start = wire::from_bytes::<OperationStart>(operation_start)?;
        info!(
            "starting {} over {} ({})",
            start.operation, start.curve, start.version
        );

        let mut identity_hash = [0; SHA256_DIGEST_LEN];
        if start.operation.is_som() {
            let som_id = self.ops.read_som_id()?;
            self.crypto.contiguous_hash(&som_id, &mut identity_hash)?;
        } else {
            let product_id = self.ops.read_product_id()?;
            self.crypto.contiguous_hash(&product_id, &mut identity_hash)?;
        }

        let session =
            Session::establish(&mut self.crypto, &start, identity_hash)?;
        self.state = State::SessionEstablished;

        let mut inner = Zeroizing::new(if start.operation.is_som() {
            wire::to_vec(&InnerCaRequest {
                version: start.version,
                body: RequestBody::Som(SomRequest {
                    som_id_hash: identity_hash,
                }),
            })?
        } else {
            self.product_request(&session, identity_hash)?
        });

        let mut iv = [0; GCM_IV_LEN];
        self.ops.get_random_bytes(&mut iv)?;
        let payload = session::seal(
            &mut self.crypto,
            session.keys().session_key(),
            iv,
            &mut inner,
        )?;
        let request = wire::to_vec(&CaRequest {
            version: start.version,
            device_public_key: *session.device_public_key(),
            payload,
        })?;
        Ok((session, request))
    }

    /// Encodes the inner request for a product-key operation.
    fn product_request(
        &mut self,
        session: &Session,
        product_id_hash: sha256::Digest,
    ) -> Result<Vec<u8>> {
        let mut auth_cert_chain = CertChain::new();
        let mut auth_signature = Vec::new();
        let auth_key_type = self.ops.get_auth_key_type()?;
        if auth_key_type != KeyType::None {
            trace!("signing with {} auth key", auth_key_type);
            auth_cert_chain = self.ops.read_auth_key_cert_chain()?;
            auth_signature = self.ops.auth_key_sign(session.keys().auth_nonce())?;
            check!(
                auth_signature.len() <= SIGNATURE_LEN_MAX,
                Error::BadArgument
            );
        }

        let mut public_keys: [Vec<u8>; 3] = Default::default();
        if session.operation() == Operation::Certify {
            let slots = KeyType::ISSUED.into_iter().zip(&mut public_keys);
            for (key_type, slot) in slots {
                match self.ops.read_attestation_public_key(key_type) {
                    Ok(key) => {
                        check!(key.len() <= KEY_LEN_MAX, Error::BadArgument);
                        *slot = key;
                    }
                    Err(Error::UnsupportedOperation) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        let [rsa, ecdsa, ed25519] = &public_keys;

        let inner = InnerCaRequest {
            version: session.version(),
            body: RequestBody::Product(ProductRequest {
                auth_cert_chain: auth_cert_chain.borrowed(),
                auth_signature: &auth_signature,
                product_id_hash,
                rsa_public_key: rsa,
                ecdsa_public_key: ecdsa,
                ed25519_public_key: ed25519,
            }),
        };
        Ok(wire::to_vec(&inner)?)
    }

    fn apply_response(
        &mut self,
        session: &Session,
        ca_response: &[u8],
    ) -> Result<()> {
        let response = wire::from_bytes::<CaResponse>(ca_response)?;
        check!(response.version == session.version(), Error::BadArgument);

        let plaintext = session::open(
            &mut self.crypto,
            session.keys().session_key(),
            &response.payload,
        )?;
        let inner = wire::from_bytes::<InnerCaResponse>(&plaintext)?;
        check!(inner.version == session.version(), Error::BadArgument);
        check!(
            &inner.identity_hash == session.identity_hash(),
            Error::BadArgument
        );

        let operation = session.operation();
        let mut issued = ArrayVec::<_, 3>::new();
        for (key_type, slot) in inner.iter_slots() {
            if !check_slot(operation, slot)? {
                continue;
            }
            let key = if operation.is_encrypted() {
                self.decrypt_key(slot.key)?
            } else {
                secret_copy(slot.key)?
            };
            issued.push((key_type, key, &slot.cert_chain));
        }
        check!(!issued.is_empty(), Error::BadArgument);

        for (key_type, key, chain) in &issued {
            trace!("writing {} attestation key", key_type);
            self.ops.write_attestation_key(*key_type, key, chain)?;
        }
        Ok(())
    }

    /// Opens a key blob sealed under the device's SoC-global key.
    fn decrypt_key(&mut self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let KeyBlob(sealed) = wire::from_bytes::<KeyBlob>(blob)?;
        let soc_global_key = Zeroizing::new(self.ops.read_soc_global_key()?);
        let key = session::open(&mut self.crypto, &soc_global_key, &sealed)?;
        check!(key.len() <= KEY_LEN_MAX, Error::BadArgument);
        Ok(key)
    }
}

/// Checks that `slot` is consistent with `operation`, returning whether
/// anything was issued in it.
fn check_slot(operation: Operation, slot: &IssuedSlot) -> Result<bool> {
    if !slot.is_issued() {
        check!(slot.key.is_empty(), Error::BadArgument);
        return Ok(false);
    }
    if operation.issues_keys() {
        check!(!slot.key.is_empty(), Error::BadArgument);
    } else {
        check!(slot.key.is_empty(), Error::BadArgument);
    }
    Ok(true)
}

fn secret_copy(bytes: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    check!(bytes.len() <= KEY_LEN_MAX, Error::BadArgument);
    let mut copy = Zeroizing::new(Vec::new());
    copy.try_reserve_exact(bytes.len())
        .or_else(|_| fail!(Error::OutOfMemory))?;
    copy.extend_from_slice(bytes);
    Ok(copy)
}
