//! X.509 certificate validator backed by `x509-parser`.

use crate::config::CertificateConfig;
use crate::domain::certificate::{Certificate, CertificatePolicy};
use crate::domain::errors::EnvelopeError;
use crate::ports::outbound::CertificateValidator;

/// Validator for certificates arriving in signed envelopes.
///
/// Rejections are logged at `warn` since they usually point at a misbehaving
/// or malicious peer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct X509CertificateValidator {
    policy: CertificatePolicy,
}

impl X509CertificateValidator {
    /// Create a validator enforcing `policy`.
    pub fn new(policy: CertificatePolicy) -> Self {
        Self { policy }
    }

    /// Create a validator from the `[certificate]` config section.
    pub fn from_config(config: &CertificateConfig) -> Self {
        Self::new(config.policy())
    }

    /// Active limits.
    pub fn policy(&self) -> &CertificatePolicy {
        &self.policy
    }
}

impl CertificateValidator for X509CertificateValidator {
    fn parse_and_validate(&self, der: &[u8]) -> Result<Certificate, EnvelopeError> {
        self.policy.validate(der).map_err(|e| {
            tracing::warn!(len = der.len(), error = %e, "rejected staking certificate");
            e
        })
    }
}
