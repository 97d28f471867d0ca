//! # Staking Identity
//!
//! The local proposer's certificate and signing key, loaded from DER files.
//!
//! The private key bytes are held in a [`Zeroizing`] buffer while being parsed
//! and wiped once `ring` has taken its own copy.

use std::fs;
use std::path::Path;

use shared_crypto::{CryptoError, NodeKey};
use shared_types::NodeId;
use zeroize::Zeroizing;

use crate::config::{ConfigError, StakingConfig};
use crate::domain::certificate::Certificate;
use crate::ports::outbound::{BlockSigner, CertificateValidator};

/// Certificate plus matching key: everything a proposer needs to sign.
#[derive(Debug)]
pub struct StakingIdentity {
    certificate: Certificate,
    key: NodeKey,
}

impl StakingIdentity {
    /// Read the files named by the `[staking]` section.
    ///
    /// # Errors
    ///
    /// * `Io` - a file cannot be read
    /// * `Certificate` - the certificate is rejected by `validator`
    /// * `Invalid` - the key is unreadable or does not match the certificate
    pub fn load<V>(config: &StakingConfig, validator: &V) -> Result<Self, ConfigError>
    where
        V: CertificateValidator + ?Sized,
    {
        let certificate_der = read_file(&config.certificate_path)?;
        let key_der = Zeroizing::new(read_file(&config.key_path)?);
        let identity = Self::from_der(&certificate_der, &key_der, validator)?;

        tracing::info!(
            node_id = %identity.node_id(),
            certificate = %config.certificate_path.display(),
            "loaded staking identity"
        );
        Ok(identity)
    }

    /// Build from in-memory DER certificate and PKCS#8 key.
    pub fn from_der<V>(
        certificate_der: &[u8],
        key_pkcs8: &[u8],
        validator: &V,
    ) -> Result<Self, ConfigError>
    where
        V: CertificateValidator + ?Sized,
    {
        let certificate = validator.parse_and_validate(certificate_der)?;
        let key = NodeKey::from_pkcs8(key_pkcs8)
            .map_err(|e| ConfigError::Invalid(format!("staking key: {e}")))?;

        if key.verification_key() != *certificate.public_key() {
            return Err(ConfigError::Invalid(
                "staking key does not match the certificate public key".into(),
            ));
        }

        Ok(Self { certificate, key })
    }

    /// Validated staking certificate.
    pub fn certificate(&self) -> &Certificate {
        &self.certificate
    }

    /// Signing key.
    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    /// Node id derived from the certificate.
    pub fn node_id(&self) -> NodeId {
        self.certificate.node_id()
    }
}

impl BlockSigner for StakingIdentity {
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.key.sign(message)
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, ConfigError> {
    fs::read(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        error: e.to_string(),
    })
}
