//! # Envelope Configuration
//!
//! Certificate acceptance limits and the local staking identity, loaded from TOML.
//!
//! # Config File Format
//!
//! ```toml
//! [certificate]
//! max_public_key_bits = 8192
//! max_certificate_len = 16384
//!
//! [staking]
//! certificate_path = "/var/lib/node/staking.crt.der"
//! key_path = "/var/lib/node/staking.key.der"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::certificate::{
    CertificatePolicy, DEFAULT_MAX_CERTIFICATE_LEN, DEFAULT_MAX_PUBLIC_KEY_BITS,
};
use crate::domain::errors::EnvelopeError;

/// Errors that can occur during config or identity loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },

    /// TOML parse error.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// Parsed values are out of range or inconsistent.
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Staking certificate rejected by the certificate policy.
    #[error("Staking certificate rejected: {0}")]
    Certificate(#[from] EnvelopeError),
}

/// Top-level envelope configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeConfig {
    /// Limits applied to certificates received from the network.
    #[serde(default)]
    pub certificate: CertificateConfig,
    /// Local staking identity; absent on nodes that never propose.
    #[serde(default)]
    pub staking: Option<StakingConfig>,
}

/// `[certificate]` section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CertificateConfig {
    /// Largest accepted public key, in bits.
    pub max_public_key_bits: usize,
    /// Largest accepted DER encoding, in bytes.
    pub max_certificate_len: usize,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            max_public_key_bits: DEFAULT_MAX_PUBLIC_KEY_BITS,
            max_certificate_len: DEFAULT_MAX_CERTIFICATE_LEN,
        }
    }
}

impl CertificateConfig {
    /// Policy enforcing these limits.
    pub fn policy(&self) -> CertificatePolicy {
        CertificatePolicy {
            max_public_key_bits: self.max_public_key_bits,
            max_certificate_len: self.max_certificate_len,
        }
    }
}

/// `[staking]` section.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StakingConfig {
    /// DER-encoded X.509 staking certificate.
    pub certificate_path: PathBuf,
    /// PKCS#8 DER private key matching the certificate.
    pub key_path: PathBuf,
}

impl EnvelopeConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject limits that would refuse every certificate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.certificate.max_public_key_bits == 0 {
            return Err(ConfigError::Invalid(
                "certificate.max_public_key_bits must be positive".into(),
            ));
        }
        if self.certificate.max_certificate_len == 0 {
            return Err(ConfigError::Invalid(
                "certificate.max_certificate_len must be positive".into(),
            ));
        }
        Ok(())
    }
}
