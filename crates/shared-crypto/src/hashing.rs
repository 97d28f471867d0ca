//! # SHA-256 Hashing
//!
//! Every envelope and header identifier is the SHA-256 of its canonical bytes.

use sha2::{Digest, Sha256};
use shared_types::Hash;

/// Hash data with SHA-256.
#[inline]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}
