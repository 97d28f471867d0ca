//! # Proposer Envelope Flows
//!
//! End-to-end paths a block takes between the proposing node and its peers:
//!
//! ```text
//! [envelope.toml] ──load──→ EnvelopeConfig ──→ StakingIdentity
//!                                                   │
//!                                                 build
//!                                                   ↓
//!                                           canonical bytes ──network──→ peer parse
//!                                                                            │
//!                                                               verify / header / id
//! ```
//!
//! ## Test Categories
//!
//! 1. **Happy Path**: proposer and peer agree on bytes, id and signature
//! 2. **Policy Mismatch**: peers with stricter limits reject the block
//! 3. **Pre-fork Blocks**: unsigned and option envelopes

#[cfg(test)]
mod tests {
    use std::fs;

    use qc_18_proposer_envelope::test_utils::FakeSigner;
    use qc_18_proposer_envelope::{
        Block, EnvelopeApi, EnvelopeConfig, EnvelopeError, EnvelopeService, Id, StakingIdentity,
        Tag, TrustContext,
    };

    use crate::{generate_staking_der, init_test_logging};

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// Write a staking identity and a config pointing at it.
    fn write_node_config(dir: &std::path::Path, extra: &str) -> EnvelopeConfig {
        let (certificate_der, key_der) = generate_staking_der("proposer.local");
        let certificate_path = dir.join("staking.crt.der");
        let key_path = dir.join("staking.key.der");
        fs::write(&certificate_path, certificate_der).unwrap();
        fs::write(&key_path, key_der).unwrap();

        let config_path = dir.join("envelope.toml");
        fs::write(
            &config_path,
            format!(
                "{extra}\n[staking]\ncertificate_path = {:?}\nkey_path = {:?}\n",
                certificate_path.display().to_string(),
                key_path.display().to_string()
            ),
        )
        .unwrap();
        EnvelopeConfig::load(&config_path).unwrap()
    }

    fn load_identity(config: &EnvelopeConfig, service: &EnvelopeService) -> StakingIdentity {
        let staking = config.staking.as_ref().unwrap();
        StakingIdentity::load(staking, service.validator()).unwrap()
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_proposer_to_peer_flow() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let config = write_node_config(dir.path(), "");

        let proposer = EnvelopeService::from_config(&config);
        let identity = load_identity(&config, &proposer);

        let inner = b"opaque inner block".to_vec();
        let block = proposer
            .build(
                Id::new([7; 32]),
                1_700_000_000,
                42,
                identity.certificate().clone(),
                inner.clone(),
                &identity,
            )
            .unwrap();

        // A peer with default limits receives the bytes.
        let peer = EnvelopeService::with_default_policy();
        let received = peer.parse(block.bytes()).unwrap();

        assert_eq!(received.tag(), Tag::Signed);
        assert_eq!(received.id(), block.id());
        assert_eq!(received.parent_id(), Id::new([7; 32]));
        assert_eq!(received.timestamp(), Some(1_700_000_000));
        assert_eq!(received.p_chain_height(), Some(42));
        assert_eq!(received.inner_block(), Some(inner.as_slice()));
        assert_eq!(received.proposer(), identity.node_id());
        assert!(received.verify(true).is_ok());
        assert!(peer.verify_signature(
            received.as_signed().unwrap(),
            &TrustContext::Proposer(identity.node_id())
        ));

        let header = received.header(Id::new([1; 32])).unwrap();
        let parsed_header = peer.parse_header(header.bytes()).unwrap();
        assert_eq!(parsed_header.body_id(), block.id());
    }

    #[test]
    fn test_build_with_der_matches_build() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_node_config(dir.path(), "");
        let service = EnvelopeService::from_config(&config);
        let identity = load_identity(&config, &service);
        let signer = FakeSigner::fixed(vec![0x42; 70]);

        let certificate = identity.certificate();

        let from_der = service
            .build_with_der(Id::EMPTY, 1, 1, certificate.raw(), vec![1], &signer)
            .unwrap();
        let from_certificate = service
            .build(Id::EMPTY, 1, 1, certificate.clone(), vec![1], &signer)
            .unwrap();
        assert_eq!(from_der.bytes(), from_certificate.bytes());
    }

    // =========================================================================
    // POLICY MISMATCH
    // =========================================================================

    #[test]
    fn test_strict_peer_rejects_block() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_node_config(dir.path(), "");
        let proposer = EnvelopeService::from_config(&config);
        let identity = load_identity(&config, &proposer);
        let certificate = identity.certificate().clone();
        let block = proposer
            .build(Id::EMPTY, 1, 1, certificate, vec![], &identity)
            .unwrap();

        let strict = EnvelopeService::from_config(
            &EnvelopeConfig::from_toml_str("[certificate]\nmax_certificate_len = 64\n").unwrap(),
        );
        let err = strict.parse(block.bytes()).unwrap_err();
        assert!(matches!(err, EnvelopeError::InvalidCertificate(_)));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_strict_node_cannot_load_own_identity() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_node_config(dir.path(), "[certificate]\nmax_public_key_bits = 128");
        let service = EnvelopeService::from_config(&config);

        let staking = config.staking.as_ref().unwrap();
        assert!(StakingIdentity::load(staking, service.validator()).is_err());
    }

    // =========================================================================
    // PRE-FORK BLOCKS
    // =========================================================================

    #[test]
    fn test_unsigned_and_option_flow() {
        let service = EnvelopeService::with_default_policy();

        let unsigned = service.build_unsigned(Id::new([1; 32]), 10, 20, vec![1]).unwrap();
        let option = service.build_option(unsigned.id(), vec![2]).unwrap();

        let parsed_unsigned = service.parse(unsigned.bytes()).unwrap();
        let parsed_option = service.parse(option.bytes()).unwrap();

        assert_eq!(parsed_unsigned.id(), unsigned.id());
        assert_eq!(parsed_option.parent_id(), unsigned.id());
        assert!(parsed_unsigned.certificate().is_none());
        assert!(parsed_option.timestamp().is_none());
        assert!(parsed_unsigned.verify(false).is_ok());
        assert!(parsed_option.verify(true).is_ok());
    }
}
