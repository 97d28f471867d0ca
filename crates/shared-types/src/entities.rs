//! # Core Identifiers
//!
//! - `Id`: content identifier of an envelope, header or inner block
//!   (SHA-256 of canonical bytes).
//! - `NodeId`: identity of a block proposer, derived from its certificate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::IdError;

/// Width of every identifier in bytes.
pub const ID_LEN: usize = 32;

/// A 32-byte hash.
pub type Hash = [u8; ID_LEN];

/// A 32-byte content identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Id(pub Hash);

impl Id {
    /// The all-zero identifier.
    pub const EMPTY: Id = Id([0u8; ID_LEN]);

    /// Wrap raw bytes.
    pub const fn new(bytes: Hash) -> Self {
        Self(bytes)
    }

    /// Build from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, IdError> {
        let array: Hash = bytes.try_into().map_err(|_| IdError::InvalidLength {
            expected: ID_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        &self.0
    }

    /// Whether this is the all-zero identifier.
    pub fn is_empty(&self) -> bool {
        self.0 == [0u8; ID_LEN]
    }
}

impl From<Hash> for Id {
    fn from(bytes: Hash) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", hex::encode(&self.0[..8]))
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| IdError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes)
    }
}

/// Identity of a block proposer.
///
/// Derived as the SHA-256 of the proposer's DER certificate, so two nodes agree
/// on it without exchanging anything but the certificate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct NodeId(pub Id);

impl NodeId {
    /// The node id of an unsigned (proposer-less) block.
    pub const EMPTY: NodeId = NodeId(Id::EMPTY);

    /// Wrap raw bytes.
    pub const fn new(bytes: Hash) -> Self {
        Self(Id(bytes))
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &Hash {
        self.0.as_bytes()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeID-{}", self.0)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", hex::encode(&self.0 .0[..8]))
    }
}
