//! # Detached Header
//!
//! The minimal binding record `{chain, parent, body}`: a producer's claim that
//! the body identified by `body_id` belongs to `chain_id` and extends
//! `parent_id`. The body itself is hashed independently.

use shared_crypto::sha256;
use shared_types::{Id, ID_LEN};

use super::codec::{Packer, Tag, Unpacker, TAG_LEN};
use super::errors::{EnvelopeError, Result};

/// Serialized header length: tag plus three identifiers.
pub const HEADER_LEN: usize = TAG_LEN + 3 * ID_LEN;

/// Immutable chain-binding header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Header {
    chain_id: Id,
    parent_id: Id,
    body_id: Id,
    bytes: Vec<u8>,
    id: Id,
}

impl Header {
    /// Chain the body is declared to belong to.
    pub fn chain_id(&self) -> Id {
        self.chain_id
    }

    /// Block the body extends.
    pub fn parent_id(&self) -> Id {
        self.parent_id
    }

    /// Identifier of the accompanying body.
    pub fn body_id(&self) -> Id {
        self.body_id
    }

    /// Canonical bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the canonical bytes.
    pub fn id(&self) -> Id {
        self.id
    }
}

/// Build a header.
pub fn build_header(chain_id: Id, parent_id: Id, body_id: Id) -> Header {
    let mut packer = Packer::new(Tag::Header, 3 * ID_LEN);
    packer.put_id(&chain_id).put_id(&parent_id).put_id(&body_id);
    let bytes = packer.finish();
    let id = Id::new(sha256(&bytes));

    Header {
        chain_id,
        parent_id,
        body_id,
        bytes,
        id,
    }
}

/// Parse a header.
///
/// # Errors
/// * `UnknownVersion` - tag is not the header tag (including envelope tags)
/// * `Truncated` - fewer than [`HEADER_LEN`] bytes
/// * `TrailingBytes` - more than [`HEADER_LEN`] bytes
pub fn parse_header(bytes: &[u8]) -> Result<Header> {
    let mut unpacker = Unpacker::new(bytes);
    match unpacker.read_tag()? {
        Tag::Header => parse_header_fields(bytes, unpacker),
        other => Err(EnvelopeError::UnknownVersion(other.as_u16())),
    }
}

/// Decode the header fields once the tag has been consumed.
pub(crate) fn parse_header_fields(bytes: &[u8], mut unpacker: Unpacker<'_>) -> Result<Header> {
    let chain_id = unpacker.read_id()?;
    let parent_id = unpacker.read_id()?;
    let body_id = unpacker.read_id()?;
    unpacker.finish()?;

    Ok(Header {
        chain_id,
        parent_id,
        body_id,
        bytes: bytes.to_vec(),
        id: Id::new(sha256(bytes)),
    })
}
