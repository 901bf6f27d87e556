//! SHA-256 based hashing utilities

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes SHA-256 hash and returns it as a hex string
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Derive a handle (`0x` + 40 hex chars) for an object of the given kind
///
/// The kind and every part are length-prefixed, so handles of different
/// kinds never collide and no two part lists share an encoding.
pub fn derive_address(kind: &str, parts: &[&str]) -> String {
    let mut input = Vec::new();
    for field in std::iter::once(kind).chain(parts.iter().copied()) {
        input.extend_from_slice(&(field.len() as u64).to_be_bytes());
        input.extend_from_slice(field.as_bytes());
    }
    let hex = sha256_hex(&input);
    format!("0x{}", &hex[..40])
}
