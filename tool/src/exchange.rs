// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! The `start` and `respond` commands.
//!
//! `atap-tool` keeps no state between invocations, so `start` writes the
//! CA's ephemeral ECDH key to a session file, and `respond` uses it to
//! recreate the same session.

use std::fs;
use std::io::Write as _;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use zeroize::Zeroizing;

use atap::ca;
use atap::crypto::csrng;
use atap::crypto::ring;
use atap::protocol::ca_request::RequestBody;
use atap::protocol::ca_response::IssuedSlot;
use atap::protocol::CertChain;
use atap::protocol::Curve;
use atap::protocol::InnerCaRequest;
use atap::protocol::InnerCaResponse;
use atap::protocol::KeyType;
use atap::protocol::Operation;
use atap::protocol::Version;

use crate::keyset::Keyset;
use crate::util;

/// ATAP exchange commands.
#[derive(structopt::StructOpt)]
pub enum Exchange {
    /// Begins an exchange, emitting an operation start message.
    Start {
        /// The ECDH curve to agree on a key with.
        #[structopt(long, default_value = "X25519")]
        curve: Curve,
        /// The operation to perform.
        #[structopt(long, default_value = "Issue")]
        operation: Operation,
        /// The protocol version to speak.
        #[structopt(long, default_value = "V2")]
        version: Version,
        /// Where to save the session, for a later `respond`.
        #[structopt(long, parse(from_os_str))]
        session: PathBuf,
        /// The output file; defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
    },

    /// Answers a device's CA request, emitting a CA response.
    ///
    /// A summary of the request is printed to stderr.
    Respond {
        /// The session file written by `start`.
        #[structopt(long, parse(from_os_str))]
        session: PathBuf,
        /// The keyset to issue from.
        #[structopt(long, parse(from_os_str))]
        keyset: PathBuf,
        /// The CA request; defaults to stdin.
        #[structopt(short = "i", long, parse(from_os_str))]
        input: Option<PathBuf>,
        /// The output file; defaults to stdout.
        #[structopt(short = "o", long, parse(from_os_str))]
        output: Option<PathBuf>,
        /// Whether to pretty-print the request summary.
        #[structopt(long)]
        pretty: bool,
    },
}

impl Exchange {
    /// Runs this command.
    pub fn run(self) {
        match self {
            Self::Start {
                curve,
                operation,
                version,
                session,
                output,
            } => {
                let (file, start) =
                    check!(start(curve, operation, version), "start failed");
                let json = check!(
                    serde_json::to_vec_pretty(&file),
                    "failed to serialize session"
                );
                check!(
                    fs::write(&session, json),
                    "failed to write {:?}",
                    session
                );

                let (_, mut out) = util::stdio(None::<PathBuf>, output);
                check!(out.write_all(&start), "failed to write output");
            }
            Self::Respond {
                session,
                keyset,
                input,
                output,
                pretty,
            } => {
                let json = check!(
                    fs::read(&session),
                    "failed to read {:?}",
                    session
                );
                let file: SessionFile = check!(
                    serde_json::from_slice(&json),
                    "failed to parse session {:?}",
                    session
                );
                let keyset = Keyset::load(&keyset);

                let (input, mut out) = util::stdio(input, output);
                let request = util::read_all(input);
                let (response, summary) = check!(
                    respond(&file, &keyset, &request),
                    "respond failed"
                );

                let summary = if pretty {
                    serde_json::to_string_pretty(&summary)
                } else {
                    serde_json::to_string(&summary)
                };
                eprintln!("{}", check!(summary, "failed to serialize summary"));
                check!(out.write_all(&response), "failed to write output");
            }
        }
    }
}

/// The state `start` leaves behind for `respond`.
///
/// This includes the CA's ECDH private key, in the clear.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SessionFile {
    /// The protocol version.
    pub version: Version,
    /// The ECDH curve.
    pub curve: Curve,
    /// The operation the CA asked for.
    pub operation: Operation,
    /// The CA's ephemeral private key, as hex.
    #[serde(with = "hex::serde")]
    pub ca_private_key: Vec<u8>,
}

impl SessionFile {
    /// Recreates the CA session this file describes, along with its
    /// operation start message.
    fn resume(
        &self,
    ) -> Result<(ring::Crypto, ca::Session, Vec<u8>), atap::Error> {
        let key = <[u8; 32]>::try_from(self.ca_private_key.as_slice())
            .map_err(|_| atap::Error::BadArgument)?;
        let mut crypto = ring::Crypto::new();
        crypto.set_ecdh_key_for_testing(self.curve, &key);
        let (session, start) = ca::Session::start(
            &mut crypto,
            self.curve,
            self.operation,
            self.version,
        )?;
        Ok((crypto, session, start))
    }
}

/// Begins an exchange with a fresh ephemeral key.
pub fn start(
    curve: Curve,
    operation: Operation,
    version: Version,
) -> Result<(SessionFile, Vec<u8>), atap::Error> {
    let mut rng = ring::csrng::Csrng::new();
    let key = csrng::random_array::<32>(&mut rng)?;
    let file = SessionFile {
        version,
        curve,
        operation,
        ca_private_key: key.to_vec(),
    };
    let (_, _, start) = file.resume()?;
    Ok((file, start))
}

/// A JSON-friendly description of a device's request.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[allow(missing_docs)]
pub struct RequestSummary {
    pub version: Version,
    pub operation: Operation,
    pub identity_hash: String,
    pub auth_nonce: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<ProductSummary>,
}

/// The product-specific half of a [`RequestSummary`].
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[allow(missing_docs)]
pub struct ProductSummary {
    pub auth_cert_chain: Vec<String>,
    pub auth_signature: String,
    pub rsa_public_key: String,
    pub ecdsa_public_key: String,
    pub ed25519_public_key: String,
}

impl RequestSummary {
    fn new(
        request: &InnerCaRequest,
        operation: Operation,
        auth_nonce: &[u8],
    ) -> Self {
        let product = match &request.body {
            RequestBody::Product(p) => Some(ProductSummary {
                auth_cert_chain: p
                    .auth_cert_chain
                    .certs()
                    .iter()
                    .map(hex::encode)
                    .collect(),
                auth_signature: hex::encode(p.auth_signature),
                rsa_public_key: hex::encode(p.rsa_public_key),
                ecdsa_public_key: hex::encode(p.ecdsa_public_key),
                ed25519_public_key: hex::encode(p.ed25519_public_key),
            }),
            RequestBody::Som(_) => None,
        };
        Self {
            version: request.version,
            operation,
            identity_hash: hex::encode(request.identity_hash()),
            auth_nonce: hex::encode(auth_nonce),
            product,
        }
    }
}

/// Answers `request` out of `keyset`, returning the encoded CA response and
/// a summary of the request.
pub fn respond(
    file: &SessionFile,
    keyset: &Keyset,
    request: &[u8],
) -> Result<(Vec<u8>, RequestSummary), atap::Error> {
    let (mut crypto, mut session, _) = file.resume()?;
    let mut rng = ring::csrng::Csrng::new();

    let mut buf = Zeroizing::new(Vec::new());
    let inner = session.open_request(&mut crypto, request, &mut buf)?;
    let auth_nonce = session.auth_nonce().ok_or(atap::Error::BadArgument)?;
    let summary = RequestSummary::new(&inner, file.operation, auth_nonce);

    let mut keys = Vec::with_capacity(KeyType::ISSUED.len());
    for slot in &keyset.slots {
        let key = if slot.key.is_empty() || !file.operation.is_encrypted() {
            slot.key.clone()
        } else {
            let soc_key =
                keyset.soc_global_key.ok_or(atap::Error::BadArgument)?;
            ca::seal_key_blob(&mut crypto, &mut rng, &soc_key, &slot.key)?
        };
        keys.push(key);
    }

    let mut slots: [IssuedSlot; 3] = Default::default();
    for ((out, slot), key) in slots.iter_mut().zip(&keyset.slots).zip(&keys) {
        *out = IssuedSlot {
            cert_chain: CertChain::from_certs(
                slot.chain.iter().map(Vec::as_slice),
            )?,
            key,
        };
    }

    let response = session.seal_response(
        &mut crypto,
        &mut rng,
        &InnerCaResponse {
            version: file.version,
            identity_hash: *inner.identity_hash(),
            slots,
        },
    )?;
    Ok((response, summary))
}
