//! Hash/crypto utilities (C9): BLAKE2b-256 primitives, keyed hashing, and
//! deterministic JSON canonicalization.

use blake2::digest::{consts::U32, Digest, Mac};
use blake2::{Blake2b, Blake2bMac};
use serde::Serialize;
use sha2::Sha256;

use crate::error::{LedgerError, LedgerResult};

type Blake2b256 = Blake2b<U32>;
type Blake2bMac256 = Blake2bMac<U32>;

/// A new ledger always uses [`HashAlgorithm::Blake2b256`]. `Sha256` exists
/// only to read back pre-existing ledgers written before this algorithm was
/// adopted; it is never selected for a new append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Blake2b256,
    Sha256,
}

/// Hashes `bytes` with `algorithm`, returning a lowercase hex digest.
pub fn compute_hash(bytes: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Blake2b256 => {
            let mut hasher = Blake2b256::new();
            hasher.update(bytes);
            hex::encode(hasher.finalize())
        }
        HashAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            hasher.update(bytes);
            hex::encode(hasher.finalize())
        }
    }
}

/// Serializes `value` with sorted keys and no insignificant whitespace, then
/// hashes the resulting bytes with BLAKE2b-256. `serde_json::Value` already
/// stores object keys in a `BTreeMap` (the `preserve_order` feature is not
/// enabled in this workspace), so `to_string` alone yields canonical output.
pub fn hash_json<T: Serialize>(value: &T) -> LedgerResult<String> {
    let canonical = serde_json::to_vec(value)?;
    Ok(compute_hash(&canonical, HashAlgorithm::Blake2b256))
}

/// BLAKE2b's native keyed-hash mode: no separate HMAC construction needed.
pub fn keyed_hash(data: &[u8], key: &[u8]) -> LedgerResult<String> {
    let mut mac = Blake2bMac256::new_from_slice(key)
        .map_err(|e| LedgerError::InvalidKeyLength(e.to_string()))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Recomputes the hash of `bytes` under `algorithm` and compares to `expected`.
pub fn verify_hash(bytes: &[u8], algorithm: HashAlgorithm, expected: &str) -> bool {
    compute_hash(bytes, algorithm) == expected
}
