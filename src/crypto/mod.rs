//! Hashing utilities
//!
//! Provides SHA-256 hashing and derivation of `0x`-prefixed handles for
//! ledgers and foreign tokens.

pub mod hash;

pub use hash::{derive_address, sha256, sha256_hex};
