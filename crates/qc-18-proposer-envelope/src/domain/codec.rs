//! # Envelope Codec
//!
//! Low-level binary layout shared by every envelope shape.
//!
//! ## Wire Format
//!
//! - Every structure starts with a 2-byte big-endian [`Tag`]
//! - Identifiers are fixed 32-byte fields
//! - Integers are big-endian (`i64` timestamp, `u64` height)
//! - Variable-length fields carry a 4-byte big-endian length prefix
//!
//! ```text
//! Signed:   tag | parent(32) | timestamp(8) | height(8) | len|cert | len|inner | len|sig
//! Unsigned: tag | parent(32) | timestamp(8) | height(8) | len|inner
//! Option:   tag | parent(32) | len|inner
//! Header:   tag | chain(32)  | parent(32)   | body(32)
//! ```
//!
//! The tag is always read and checked before any other field.

use shared_types::{Id, ID_LEN};

use super::errors::{EnvelopeError, Result};

/// Width of the leading version/type tag.
pub const TAG_LEN: usize = 2;

/// Width of the length prefix in front of variable-length fields.
pub const LENGTH_PREFIX_LEN: usize = 4;

/// Version/type tag at the start of every serialized structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Tag {
    /// Proposer-signed envelope.
    Signed = 0x0010,
    /// Envelope with timing metadata but no proposer.
    Unsigned = 0x0011,
    /// Minimal envelope: parent and inner block only.
    Option = 0x0020,
    /// Detached header.
    Header = 0x0030,
}

impl Tag {
    /// Every recognized tag.
    pub const ALL: [Tag; 4] = [Tag::Signed, Tag::Unsigned, Tag::Option, Tag::Header];

    /// Numeric wire value.
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Human-readable variant name.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Signed => "signed",
            Tag::Unsigned => "unsigned",
            Tag::Option => "option",
            Tag::Header => "header",
        }
    }
}

impl TryFrom<u16> for Tag {
    type Error = EnvelopeError;

    fn try_from(value: u16) -> Result<Self> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_u16() == value)
            .ok_or(EnvelopeError::UnknownVersion(value))
    }
}

/// Append-only writer producing canonical bytes.
#[derive(Debug)]
pub(crate) struct Packer {
    bytes: Vec<u8>,
}

impl Packer {
    /// Start a structure with `tag`.
    pub(crate) fn new(tag: Tag, capacity: usize) -> Self {
        let mut bytes = Vec::with_capacity(TAG_LEN + capacity);
        bytes.extend_from_slice(&tag.as_u16().to_be_bytes());
        Self { bytes }
    }

    pub(crate) fn put_id(&mut self, id: &Id) -> &mut Self {
        self.bytes.extend_from_slice(id.as_bytes());
        self
    }

    pub(crate) fn put_i64(&mut self, value: i64) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub(crate) fn put_u64(&mut self, value: u64) -> &mut Self {
        self.bytes.extend_from_slice(&value.to_be_bytes());
        self
    }

    /// Write a length-prefixed byte string.
    pub(crate) fn put_bytes(&mut self, field: &'static str, value: &[u8]) -> Result<&mut Self> {
        let len = u32::try_from(value.len()).map_err(|_| {
            EnvelopeError::EncodingFailed(format!(
                "{field} is {} bytes, exceeds the {} byte limit",
                value.len(),
                u32::MAX
            ))
        })?;
        self.bytes.extend_from_slice(&len.to_be_bytes());
        self.bytes.extend_from_slice(value);
        Ok(self)
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Bounds-checked reader over untrusted bytes.
#[derive(Debug)]
pub(crate) struct Unpacker<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Unpacker<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(EnvelopeError::Truncated { needed, remaining });
        }
        let start = self.offset;
        self.offset += needed;
        Ok(&self.bytes[start..self.offset])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Read and recognize the leading tag.
    pub(crate) fn read_tag(&mut self) -> Result<Tag> {
        Tag::try_from(u16::from_be_bytes(self.take_array::<TAG_LEN>()?))
    }

    pub(crate) fn read_id(&mut self) -> Result<Id> {
        Ok(Id::new(self.take_array::<ID_LEN>()?))
    }

    pub(crate) fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_be_bytes(self.take_array::<8>()?))
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_be_bytes(self.take_array::<8>()?))
    }

    /// Read a length-prefixed byte string.
    ///
    /// The declared length is checked against the remaining input before
    /// anything is allocated.
    pub(crate) fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let len = u32::from_be_bytes(self.take_array::<LENGTH_PREFIX_LEN>()?) as usize;
        self.take(len)
    }

    /// Require that the whole input was consumed.
    pub(crate) fn finish(self) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            extra => Err(EnvelopeError::TrailingBytes(extra)),
        }
    }
}
