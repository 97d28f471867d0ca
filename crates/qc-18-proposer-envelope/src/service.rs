//! # Envelope Service
//!
//! Application service layer that implements the `EnvelopeApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`EnvelopeApi`)
//! - Uses the outbound ports (`CertificateValidator`, `BlockSigner`)
//! - Delegates codec and signature work to the domain layer

use shared_types::Id;

use crate::adapters::x509::X509CertificateValidator;
use crate::config::EnvelopeConfig;
use crate::domain::block::{
    self, Block, Envelope, OptionBlock, SignedBlock, TrustContext, UnsignedBlock,
};
use crate::domain::certificate::Certificate;
use crate::domain::errors::Result;
use crate::domain::header::{self, Header};
use crate::ports::inbound::EnvelopeApi;
use crate::ports::outbound::{BlockSigner, CertificateValidator};

/// Envelope service.
///
/// Holds the certificate validator applied to every signed envelope it parses.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeService<V: CertificateValidator = X509CertificateValidator> {
    validator: V,
}

impl EnvelopeService<X509CertificateValidator> {
    /// Create a service enforcing the default certificate limits.
    pub fn with_default_policy() -> Self {
        Self::default()
    }

    /// Create a service enforcing the configured certificate limits.
    pub fn from_config(config: &EnvelopeConfig) -> Self {
        Self::new(X509CertificateValidator::from_config(&config.certificate))
    }
}

impl<V: CertificateValidator> EnvelopeService<V> {
    /// Create a service with a custom certificate validator.
    pub fn new(validator: V) -> Self {
        Self { validator }
    }

    /// Certificate validator in use.
    pub fn validator(&self) -> &V {
        &self.validator
    }
}

impl<V: CertificateValidator> EnvelopeApi for EnvelopeService<V> {
    fn build(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        certificate: Certificate,
        inner: Vec<u8>,
        signer: &dyn BlockSigner,
    ) -> Result<SignedBlock> {
        let block = block::build(
            parent_id,
            timestamp,
            p_chain_height,
            certificate,
            inner,
            signer,
        )?;
        tracing::debug!(
            id = %block.id(),
            parent = %parent_id,
            height = p_chain_height,
            proposer = %block.proposer(),
            "built signed envelope"
        );
        Ok(block)
    }

    fn build_with_der(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        certificate_der: &[u8],
        inner: Vec<u8>,
        signer: &dyn BlockSigner,
    ) -> Result<SignedBlock> {
        let certificate = self.validator.parse_and_validate(certificate_der)?;
        self.build(
            parent_id,
            timestamp,
            p_chain_height,
            certificate,
            inner,
            signer,
        )
    }

    fn build_unsigned(
        &self,
        parent_id: Id,
        timestamp: i64,
        p_chain_height: u64,
        inner: Vec<u8>,
    ) -> Result<UnsignedBlock> {
        let block = block::build_unsigned(parent_id, timestamp, p_chain_height, inner)?;
        tracing::debug!(id = %block.id(), parent = %parent_id, "built unsigned envelope");
        Ok(block)
    }

    fn build_option(&self, parent_id: Id, inner: Vec<u8>) -> Result<OptionBlock> {
        let block = block::build_option(parent_id, inner)?;
        tracing::debug!(id = %block.id(), parent = %parent_id, "built option envelope");
        Ok(block)
    }

    fn build_header(&self, chain_id: Id, parent_id: Id, body_id: Id) -> Header {
        header::build_header(chain_id, parent_id, body_id)
    }

    fn parse(&self, bytes: &[u8]) -> Result<Envelope> {
        match block::parse(bytes, &self.validator) {
            Ok(envelope) => {
                tracing::debug!(
                    id = %envelope.id(),
                    kind = envelope.tag().name(),
                    len = bytes.len(),
                    "parsed envelope"
                );
                Ok(envelope)
            }
            Err(e) => {
                tracing::debug!(len = bytes.len(), error = %e, "failed to parse envelope");
                Err(e)
            }
        }
    }

    fn parse_header(&self, bytes: &[u8]) -> Result<Header> {
        header::parse_header(bytes)
    }

    fn verify_signature(&self, block: &SignedBlock, trust: &TrustContext) -> bool {
        block.verify_signature(trust)
    }
}
