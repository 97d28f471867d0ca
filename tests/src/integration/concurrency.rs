//! # Concurrent Envelope Handling
//!
//! Build and Parse hold no shared mutable state; many blocks may be processed
//! in parallel on a shared service and a shared signing key.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use qc_18_proposer_envelope::{Block, EnvelopeApi, EnvelopeService, Id, TrustContext};
    use rayon::prelude::*;

    use crate::generate_staking_identity;

    #[test]
    fn test_parallel_build_and_parse() {
        let service = Arc::new(EnvelopeService::with_default_policy());
        let (certificate, key) = generate_staking_identity("parallel.local");
        let key = Arc::new(key);

        let blocks: Vec<_> = (0u64..256)
            .into_par_iter()
            .map(|height| {
                service
                    .build(
                        Id::new([height as u8; 32]),
                        height as i64,
                        height,
                        certificate.clone(),
                        height.to_be_bytes().to_vec(),
                        &key,
                    )
                    .unwrap()
            })
            .collect();

        let verified = blocks
            .par_iter()
            .filter(|block| {
                let parsed = service.parse(block.bytes()).unwrap();
                parsed.id() == block.id()
                    && parsed.as_signed().is_some_and(|signed| {
                        signed.verify_signature(&TrustContext::EmbeddedCertificate)
                    })
            })
            .count();
        assert_eq!(verified, blocks.len());
    }

    #[test]
    fn test_parallel_parse_is_deterministic() {
        let service = EnvelopeService::with_default_policy();
        let block = service
            .build_unsigned(Id::new([3; 32]), 99, 100, vec![0xAB; 1024])
            .unwrap();

        let ids: Vec<Id> = (0..64)
            .into_par_iter()
            .map(|_| service.parse(block.bytes()).unwrap().id())
            .collect();
        assert!(ids.iter().all(|id| *id == block.id()));
    }
}
