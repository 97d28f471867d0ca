//! # Proposer Envelopes
//!
//! The outer wrapper around an opaque inner block. Three envelope shapes plus
//! the detached header share one tag space:
//!
//! | Shape | Timing | Proposer |
//! |-------|--------|----------|
//! | [`SignedBlock`] | yes | certificate + signature |
//! | [`UnsignedBlock`] | yes | none |
//! | [`OptionBlock`] | no | none |
//! | [`Header`] | no | none |
//!
//! Every value is immutable once built or parsed; its identifier is the
//! SHA-256 of its canonical bytes and is computed exactly once.
//!
//! ## Signing Payload
//!
//! A signed envelope's signature covers
//! `tag | parent | timestamp | height | len|inner`. The certificate travels
//! alongside so verifiers need no prior key exchange, but it is not signed.

use shared_crypto::sha256;
use shared_types::{Id, NodeId, ID_LEN};

use super::certificate::Certificate;
use super::codec::{Packer, Tag, Unpacker, LENGTH_PREFIX_LEN};
use super::errors::{EnvelopeError, Result};
use super::header::{build_header, parse_header_fields, Header};
use crate::ports::outbound::{BlockSigner, CertificateValidator};

/// Fields shared by every envelope shape.
pub trait Block {
    /// SHA-256 of the canonical bytes.
    fn id(&self) -> Id;
    /// Identifier of the parent envelope.
    fn parent_id(&self) -> Id;
    /// Opaque inner block bytes.
    fn inner_block(&self) -> &[u8];
    /// Canonical bytes.
    fn bytes(&self) -> &[u8];
}

/// Envelopes that carry timing metadata.
pub trait TimedBlock: Block {
    /// Seconds since the Unix epoch.
    fn timestamp(&self) -> i64;
    /// Reference chain height used for proposer eligibility.
    fn p_chain_height(&self) -> u64;
}

/// Envelope signed by its proposer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedBlock {
    parent_id: Id,
    timestamp: i64,
    p_chain_height: u64,
    certificate: Certificate,
    inner: Vec<u8>,
    signature: Vec<u8>,
    proposer: NodeId,
    bytes: Vec<u8>,
    id: Id,
}

/// Envelope with timing metadata and no proposer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnsignedBlock {
    parent_id: Id,
    timestamp: i64,
    p_chain_height: u64,
    inner: Vec<u8>,
    bytes: Vec<u8>,
    id: Id,
}

/// Minimal envelope: parent and inner block only.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionBlock {
    parent_id: Id,
    inner: Vec<u8>,
    bytes: Vec<u8>,
    id: Id,
}

macro_rules! impl_block {
    ($ty:ty) => {
        impl Block for $ty {
            fn id(&self) -> Id {
                self.id
            }

            fn parent_id(&self) -> Id {
                self.parent_id
            }

            fn inner_block(&self) -> &[u8] {
                &self.inner
            }

            fn bytes(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

macro_rules! impl_timed_block {
    ($ty:ty) => {
        impl TimedBlock for $ty {
            fn timestamp(&self) -> i64 {
                self.timestamp
            }

            fn p_chain_height(&self) -> u64 {
                self.p_chain_height
            }
        }
    };
}

impl_block!(SignedBlock);
impl_block!(UnsignedBlock);
impl_block!(OptionBlock);
impl_timed_block!(SignedBlock);
impl_timed_block!(UnsignedBlock);

/// Who the caller trusts to have produced a signed envelope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrustContext {
    /// Accept whatever certificate the envelope carries.
    EmbeddedCertificate,
    /// Require this exact certificate.
    Certificate(Certificate),
    /// Require a certificate whose node id matches.
    Proposer(NodeId),
}

impl SignedBlock {
    /// Certificate of the proposer.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Proposer signature over the signing payload.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Node id derived from the embedded certificate.
    pub fn proposer(&self) -> NodeId {
        self.proposer
    }

    /// Bytes covered by the signature.
    pub fn signing_payload(&self) -> Result<Vec<u8>> {
        signing_payload(
            self.parent_id,
            self.timestamp,
            self.p_chain_height,
            &self.inner,
        )
    }

    /// Check the signature against `trust`.
    ///
    /// A mismatch is an expected outcome and reported as `false`.
    pub fn verify_signature(&self, trust: &TrustContext) -> bool {
        let key = match trust {
            TrustContext::EmbeddedCertificate => self.certificate.public_key(),
            TrustContext::Certificate(expected) => {
                if expected.raw() != self.certificate.raw() {
                    tracing::debug!(
                        block = %self.id,
                        "certificate differs from trusted certificate"
                    );
                    return false;
                }
                expected.public_key()
            }
            TrustContext::Proposer(node_id) => {
                if *node_id != self.proposer {
                    tracing::debug!(
                        block = %self.id,
                        expected = %node_id,
                        actual = %self.proposer,
                        "proposer mismatch"
                    );
                    return false;
                }
                self.certificate.public_key()
            }
        };

        let Ok(payload) = self.signing_payload() else {
            return false;
        };
        let valid = key.is_valid(&payload, &self.signature);
        if !valid {
            tracing::debug!(block = %self.id, proposer = %self.proposer, "signature rejected");
        }
        valid
    }
}

/// One parsed envelope or header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Envelope {
    /// Proposer-signed envelope.
    Signed(SignedBlock),
    /// Envelope without proposer.
    Unsigned(UnsignedBlock),
    /// Minimal envelope.
    Option(OptionBlock),
    /// Detached header.
    Header(Header),
}

impl Envelope {
    /// Wire tag of this shape.
    pub fn tag(&self) -> Tag {
        match self {
            Envelope::Signed(_) => Tag::Signed,
            Envelope::Unsigned(_) => Tag::Unsigned,
            Envelope::Option(_) => Tag::Option,
            Envelope::Header(_) => Tag::Header,
        }
    }

    /// SHA-256 of the canonical bytes.
    pub fn id(&self) -> Id {
        match self {
            Envelope::Signed(block) => block.id(),
            Envelope::Unsigned(block) => block.id(),
            Envelope::Option(block) => block.id(),
            Envelope::Header(header) => header.id(),
        }
    }

    /// Canonical bytes.
    pub fn bytes(&self) -> &[u8] {
        match self {
            Envelope::Signed(block) => block.bytes(),
            Envelope::Unsigned(block) => block.bytes(),
            Envelope::Option(block) => block.bytes(),
            Envelope::Header(header) => header.bytes(),
        }
    }

    /// Parent identifier; every shape has one.
    pub fn parent_id(&self) -> Id {
        match self {
            Envelope::Signed(block) => block.parent_id(),
            Envelope::Unsigned(block) => block.parent_id(),
            Envelope::Option(block) => block.parent_id(),
            Envelope::Header(header) => header.parent_id(),
        }
    }

    /// Envelope view, absent for headers.
    pub fn as_block(&self) -> Option<&dyn Block> {
        match self {
            Envelope::Signed(block) => Some(block),
            Envelope::Unsigned(block) => Some(block),
            Envelope::Option(block) => Some(block),
            Envelope::Header(_) => None,
        }
    }

    /// Timing view, present for signed and unsigned envelopes.
    pub fn as_timed(&self) -> Option<&dyn TimedBlock> {
        match self {
            Envelope::Signed(block) => Some(block),
            Envelope::Unsigned(block) => Some(block),
            Envelope::Option(_) | Envelope::Header(_) => None,
        }
    }

    /// Signed view.
    pub fn as_signed(&self) -> Option<&SignedBlock> {
        match self {
            Envelope::Signed(block) => Some(block),
            _ => None,
        }
    }

    /// Inner block bytes, absent for headers.
    pub fn inner_block(&self) -> Option<&[u8]> {
        self.as_block().map(|block| block.inner_block())
    }

    /// Timestamp, for signed and unsigned envelopes.
    pub fn timestamp(&self) -> Option<i64> {
        self.as_timed().map(|block| block.timestamp())
    }

    /// Reference chain height, for signed and unsigned envelopes.
    pub fn p_chain_height(&self) -> Option<u64> {
        self.as_timed().map(|block| block.p_chain_height())
    }

    /// Proposer certificate, for signed envelopes only.
    pub fn certificate(&self) -> Option<&Certificate> {
        self.as_signed().map(SignedBlock::certificate)
    }

    /// Proposer signature, for signed envelopes only.
    pub fn signature(&self) -> Option<&[u8]> {
        self.as_signed().map(SignedBlock::signature)
    }

    /// Proposer node id; [`NodeId::EMPTY`] when unsigned.
    pub fn proposer(&self) -> NodeId {
        self.as_signed()
            .map(SignedBlock::proposer)
            .unwrap_or(NodeId::EMPTY)
    }

    /// Detached header binding this envelope to `chain_id`.
    ///
    /// Returns `None` for headers themselves.
    pub fn header(&self, chain_id: Id) -> Option<Header> {
        self.as_block()
            .map(|block| build_header(chain_id, block.parent_id(), block.id()))
    }

    /// Check the envelope against the caller's proposer expectation.
    ///
    /// # Errors
    /// * `UnexpectedProposer` - signed when no proposer is expected
    /// * `MissingProposer` - unsigned when a proposer is expected
    /// * `InvalidSignature` - signature does not verify under the embedded certificate
    pub fn verify(&self, expect_proposer: bool) -> Result<()> {
        match (self, expect_proposer) {
            (Envelope::Signed(block), true) => {
                if block.verify_signature(&TrustContext::EmbeddedCertificate) {
                    Ok(())
                } else {
                    Err(EnvelopeError::InvalidSignature)
                }
            }
            (Envelope::Signed(_), false) => Err(EnvelopeError::UnexpectedProposer),
            (Envelope::Unsigned(_), true) => Err(EnvelopeError::MissingProposer),
            _ => Ok(()),
        }
    }
}

impl From<SignedBlock> for Envelope {
    fn from(block: SignedBlock) -> Self {
        Envelope::Signed(block)
    }
}

impl From<UnsignedBlock> for Envelope {
    fn from(block: UnsignedBlock) -> Self {
        Envelope::Unsigned(block)
    }
}

impl From<OptionBlock> for Envelope {
    fn from(block: OptionBlock) -> Self {
        Envelope::Option(block)
    }
}

impl From<Header> for Envelope {
    fn from(header: Header) -> Self {
        Envelope::Header(header)
    }
}

// =============================================================================
// BUILD
// =============================================================================

const TIMING_LEN: usize = 16;

fn signing_payload(
    parent_id: Id,
    timestamp: i64,
    p_chain_height: u64,
    inner: &[u8],
) -> Result<Vec<u8>> {
    let mut packer = Packer::new(
        Tag::Signed,
        ID_LEN + TIMING_LEN + LENGTH_PREFIX_LEN + inner.len(),
    );
    packer
        .put_id(&parent_id)
        .put_i64(timestamp)
        .put_u64(p_chain_height)
        .put_bytes("inner block", inner)?;
    Ok(packer.finish())
}

/// Build a proposer-signed envelope.
///
/// # Errors
/// * `SigningFailed` - the signer could not produce a signature
/// * `EncodingFailed` - a variable-length field exceeds the length prefix
pub fn build<S>(
    parent_id: Id,
    timestamp: i64,
    p_chain_height: u64,
    certificate: Certificate,
    inner: Vec<u8>,
    signer: &S,
) -> Result<SignedBlock>
where
    S: BlockSigner + ?Sized,
{
    let payload = signing_payload(parent_id, timestamp, p_chain_height, &inner)?;
    let signature = signer
        .sign(&payload)
        .map_err(|e| EnvelopeError::SigningFailed(e.to_string()))?;

    let capacity = ID_LEN
        + TIMING_LEN
        + 3 * LENGTH_PREFIX_LEN
        + certificate.raw().len()
        + inner.len()
        + signature.len();
    let mut packer = Packer::new(Tag::Signed, capacity);
    packer
        .put_id(&parent_id)
        .put_i64(timestamp)
        .put_u64(p_chain_height)
        .put_bytes("certificate", certificate.raw())?
        .put_bytes("inner block", &inner)?
        .put_bytes("signature", &signature)?;
    let bytes = packer.finish();

    Ok(SignedBlock {
        parent_id,
        timestamp,
        p_chain_height,
        proposer: certificate.node_id(),
        certificate,
        inner,
        signature,
        id: Id::new(sha256(&bytes)),
        bytes,
    })
}

/// Build an envelope with timing metadata and no proposer.
///
/// # Errors
/// * `EncodingFailed` - inner block exceeds the length prefix
pub fn build_unsigned(
    parent_id: Id,
    timestamp: i64,
    p_chain_height: u64,
    inner: Vec<u8>,
) -> Result<UnsignedBlock> {
    let mut packer = Packer::new(
        Tag::Unsigned,
        ID_LEN + TIMING_LEN + LENGTH_PREFIX_LEN + inner.len(),
    );
    packer
        .put_id(&parent_id)
        .put_i64(timestamp)
        .put_u64(p_chain_height)
        .put_bytes("inner block", &inner)?;
    let bytes = packer.finish();

    Ok(UnsignedBlock {
        parent_id,
        timestamp,
        p_chain_height,
        inner,
        id: Id::new(sha256(&bytes)),
        bytes,
    })
}

/// Build a minimal option envelope.
///
/// # Errors
/// * `EncodingFailed` - inner block exceeds the length prefix
pub fn build_option(parent_id: Id, inner: Vec<u8>) -> Result<OptionBlock> {
    let mut packer = Packer::new(Tag::Option, ID_LEN + LENGTH_PREFIX_LEN + inner.len());
    packer.put_id(&parent_id).put_bytes("inner block", &inner)?;
    let bytes = packer.finish();

    Ok(OptionBlock {
        parent_id,
        inner,
        id: Id::new(sha256(&bytes)),
        bytes,
    })
}

// =============================================================================
// PARSE
// =============================================================================

/// Parse untrusted bytes into one of the envelope shapes.
///
/// Signed envelopes have their certificate validated by `validator`; the
/// signature itself is not checked here (see [`SignedBlock::verify_signature`]).
///
/// # Errors
/// * `UnknownVersion` - unrecognized leading tag
/// * `Truncated` / `TrailingBytes` - structural length mismatch
/// * `InvalidCertificate` / `InvalidPublicKey` - rejected by `validator`
pub fn parse<V>(bytes: &[u8], validator: &V) -> Result<Envelope>
where
    V: CertificateValidator + ?Sized,
{
    let mut unpacker = Unpacker::new(bytes);
    match unpacker.read_tag()? {
        Tag::Signed => parse_signed(bytes, unpacker, validator).map(Envelope::Signed),
        Tag::Unsigned => parse_unsigned(bytes, unpacker).map(Envelope::Unsigned),
        Tag::Option => parse_option(bytes, unpacker).map(Envelope::Option),
        Tag::Header => parse_header_fields(bytes, unpacker).map(Envelope::Header),
    }
}

fn parse_signed<V>(
    bytes: &[u8],
    mut unpacker: Unpacker<'_>,
    validator: &V,
) -> Result<SignedBlock>
where
    V: CertificateValidator + ?Sized,
{
    let parent_id = unpacker.read_id()?;
    let timestamp = unpacker.read_i64()?;
    let p_chain_height = unpacker.read_u64()?;
    let certificate_der = unpacker.read_bytes()?;
    let inner = unpacker.read_bytes()?;
    let signature = unpacker.read_bytes()?;
    unpacker.finish()?;

    let certificate = validator.parse_and_validate(certificate_der)?;

    Ok(SignedBlock {
        parent_id,
        timestamp,
        p_chain_height,
        proposer: certificate.node_id(),
        certificate,
        inner: inner.to_vec(),
        signature: signature.to_vec(),
        bytes: bytes.to_vec(),
        id: Id::new(sha256(bytes)),
    })
}

fn parse_unsigned(bytes: &[u8], mut unpacker: Unpacker<'_>) -> Result<UnsignedBlock> {
    let parent_id = unpacker.read_id()?;
    let timestamp = unpacker.read_i64()?;
    let p_chain_height = unpacker.read_u64()?;
    let inner = unpacker.read_bytes()?;
    unpacker.finish()?;

    Ok(UnsignedBlock {
        parent_id,
        timestamp,
        p_chain_height,
        inner: inner.to_vec(),
        bytes: bytes.to_vec(),
        id: Id::new(sha256(bytes)),
    })
}

fn parse_option(bytes: &[u8], mut unpacker: Unpacker<'_>) -> Result<OptionBlock> {
    let parent_id = unpacker.read_id()?;
    let inner = unpacker.read_bytes()?;
    unpacker.finish()?;

    Ok(OptionBlock {
        parent_id,
        inner: inner.to_vec(),
        bytes: bytes.to_vec(),
        id: Id::new(sha256(bytes)),
    })
}
