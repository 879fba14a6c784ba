// Copyright lowRISC contributors.
// Licensed under the Apache License, Version 2.0, see LICENSE for details.
// SPDX-License-Identifier: Apache-2.0

//! Keyset files, which list the keys and certificates `respond` hands out.
//!
//! A keyset is a JSON object naming, for each issuable key type, a private
//! key and a certificate chain (leaf first), as DER files:
//!
//! ```json
//! {
//!   "rsa": { "key": "attest.rsa.pk8", "chain": ["rsa.der", "ca.der"] },
//!   "ed25519": { "chain": ["ed25519.der", "ca.der"] },
//!   "soc_global_key": "5a0c7b1e9f3d2a6481c0e5f7b3d9a214"
//! }
//! ```
//!
//! Relative paths are resolved against the keyset's own directory. A slot
//! without a key is only useful for `Certify`; `soc_global_key` is only
//! needed by the encrypted issue operations.

use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use atap::crypto::aead;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysetFile {
    #[serde(default)]
    rsa: Option<SlotFile>,
    #[serde(default)]
    ecdsa: Option<SlotFile>,
    #[serde(default)]
    ed25519: Option<SlotFile>,
    #[serde(default)]
    soc_global_key: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SlotFile {
    #[serde(default)]
    key: Option<PathBuf>,
    chain: Vec<PathBuf>,
}

/// A key and its chain, read into memory.
#[derive(Clone, Default)]
pub struct Slot {
    /// The private key; empty if none.
    pub key: Vec<u8>,
    /// The certificate chain; empty if nothing is issued in this slot.
    pub chain: Vec<Vec<u8>>,
}

/// A keyset, with every file it names read into memory.
#[derive(Clone, Default)]
pub struct Keyset {
    /// Slots in RSA, ECDSA, Ed25519 order.
    pub slots: [Slot; 3],
    /// The device's SoC-global key, for encrypted issue operations.
    pub soc_global_key: Option<aead::Key>,
}

impl Keyset {
    /// Loads the keyset at `path`, exiting the process on any failure.
    pub fn load(path: &Path) -> Self {
        let file = check!(File::open(path), "failed to open {:?}", path);
        let parsed: KeysetFile = check!(
            serde_json::from_reader(BufReader::new(file)),
            "failed to parse keyset {:?}",
            path,
        );
        let dir = path.parent().unwrap_or_else(|| Path::new("."));

        let load_slot = |slot: Option<SlotFile>| {
            let slot = match slot {
                Some(s) => s,
                None => return Slot::default(),
            };
            let read = |p: &Path| {
                check!(fs::read(dir.join(p)), "failed to read {:?}", p)
            };
            Slot {
                key: slot.key.as_deref().map(read).unwrap_or_default(),
                chain: slot.chain.iter().map(|p| read(p)).collect(),
            }
        };

        let soc_global_key = parsed.soc_global_key.map(|key| {
            let bytes = check!(hex::decode(&key), "bad SoC-global key");
            check!(
                aead::Key::try_from(bytes.as_slice()),
                "SoC-global key must be 16 bytes",
            )
        });

        Self {
            slots: [
                load_slot(parsed.rsa),
                load_slot(parsed.ecdsa),
                load_slot(parsed.ed25519),
            ],
            soc_global_key,
        }
    }
}
