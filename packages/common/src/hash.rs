//! Keccak-256 hashing helpers.
//!
//! All identifiers the protocol derives (message digests, message ids,
//! bucket ids, role ids) are keccak-256 hashes so that every chain
//! implementation arrives at byte-identical values.

use tiny_keccak::{Hasher, Keccak};

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Convert a 32-byte hash to a 0x-prefixed hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
