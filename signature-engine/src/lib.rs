//! Signature-operation dispatcher
//!
//! Given a stored key and the signature parameters a client declared for it, the
//! engine selects the exact signature algorithm, binds the key's private or public
//! material and signs or verifies a payload. Supported families:
//!
//! - RSA: PKCS#1 v1.5 and PSS over SHA-2 / SHA-3 digests
//! - ECDSA: P-256 and P-384 over SHA-2 / SHA-3 digests
//! - Post-quantum: FALCON, DILITHIUM, SPHINCS+
//!
//! # Quick Start
//!
//! ```rust
//! use pqcrypto_traits::sign::{PublicKey, SecretKey};
//! use signature_engine::keystore::MemoryKeyStore;
//! use signature_engine::{
//!     KeyAlgorithm, KeyRecord, PqKeyBytes, PqParameterSet, PrivateKeyMaterial,
//!     PublicKeyMaterial, SignatureEngine,
//! };
//!
//! // Store a Dilithium3 key pair
//! let (pk, sk) = pqcrypto_dilithium::dilithium3::keypair();
//! let mut keys = MemoryKeyStore::new();
//! keys.insert(
//!     "pq-key",
//!     PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(PqParameterSet::Dilithium3, sk.as_bytes())),
//!     PublicKeyMaterial::PostQuantum(PqKeyBytes::new(PqParameterSet::Dilithium3, pk.as_bytes())),
//! );
//!
//! let engine = SignatureEngine::new(keys);
//! let key = KeyRecord::new("pq-key", KeyAlgorithm::Dilithium, 0);
//!
//! // Post-quantum families take no parameters
//! let signature = engine.sign(&key, &[], b"Payload to sign").unwrap();
//! assert!(engine.verify(&key, &[], b"Payload to sign", &signature).unwrap());
//! ```

pub mod catalog;
pub mod classical;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod key;
pub mod keystore;
pub mod post_quantum;
pub mod provider;
pub mod resolver;
pub mod traits;
pub mod types;

mod dilithium;
mod falcon;
mod sphincs;

// Re-export commonly used types
pub use catalog::{DigestAlgorithm, RsaSignatureScheme, SignatureParameter};
pub use config::EngineConfig;
pub use context::{ContextState, Direction, SignatureContext};
pub use engine::SignatureEngine;
pub use error::{KeyStoreError, PrimitiveError, Result, SignerError};
pub use key::{PqKeyBytes, PqParameterSet, PrivateKeyMaterial, PublicKeyMaterial};
pub use keystore::MemoryKeyStore;
pub use provider::{ProviderRegistry, SignatureProvider};
pub use resolver::resolve;
pub use traits::{KeyMaterialProvider, SignaturePrimitive};
pub use types::{AlgorithmIdentifier, KeyAlgorithm, KeyRecord, ProviderKind};

#[cfg(test)]
mod tests {
    use super::*;

    const RSA_PEM: &str = include_str!("../tests/fixtures/rsa2048.pem");

    #[test]
    fn test_rsa_integration() {
        let mut keys = MemoryKeyStore::new();
        keys.insert_pkcs8_pem("rsa-1", RSA_PEM).unwrap();
        let engine = SignatureEngine::new(keys);

        let key = KeyRecord::new("rsa-1", KeyAlgorithm::Rsa, 2048);
        let params = [
            SignatureParameter::rsa_scheme(RsaSignatureScheme::Pkcs1),
            SignatureParameter::digest(DigestAlgorithm::Sha256),
        ];

        let message = b"Integration test message";
        let signature = engine.sign(&key, &params, message).unwrap();
        assert_eq!(signature.len(), 256);
        assert!(engine.verify(&key, &params, message, &signature).unwrap());
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignatureEngine<MemoryKeyStore>>();
        assert_send_sync::<ProviderRegistry>();
    }
}
