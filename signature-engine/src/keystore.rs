//! In-memory key-material provider
//!
//! Entries are keyed by the key's symbolic name. A key may hold both halves, only
//! the private half (post-quantum secrets do not carry their public key) or only
//! the public half for verification-only use.
//!
//! ```
//! use signature_engine::key::{PqKeyBytes, PqParameterSet, PrivateKeyMaterial};
//! use signature_engine::keystore::MemoryKeyStore;
//!
//! let secret = PqKeyBytes::new(PqParameterSet::Dilithium3, vec![0u8; 4032]);
//! let mut keystore = MemoryKeyStore::new();
//! keystore.insert_private("signing-key", PrivateKeyMaterial::PostQuantum(secret));
//! assert!(keystore.contains("signing-key"));
//! ```

use crate::error::KeyStoreError;
use crate::key::{PrivateKeyMaterial, PublicKeyMaterial};
use crate::traits::KeyMaterialProvider;
use crate::types::KeyRecord;
use std::collections::HashMap;
use tracing::{debug, info};

#[derive(Default)]
struct KeyEntry {
    private: Option<PrivateKeyMaterial>,
    public: Option<PublicKeyMaterial>,
}

/// Key store backed by a `HashMap`; populate it, then share it behind an `Arc`
#[derive(Default)]
pub struct MemoryKeyStore {
    entries: HashMap<String, KeyEntry>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store both halves of a key pair
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        private: PrivateKeyMaterial,
        public: PublicKeyMaterial,
    ) {
        let name = name.into();
        info!("Key '{}' stored ({})", name, private.kind());
        self.entries.insert(
            name,
            KeyEntry {
                private: Some(private),
                public: Some(public),
            },
        );
    }

    /// Store a private key; for classical keys the public half is derived from it
    pub fn insert_private(&mut self, name: impl Into<String>, private: PrivateKeyMaterial) {
        let name = name.into();
        let public = private.public_material();
        if public.is_none() {
            debug!("Key '{}' stored without a public half", name);
        }
        info!("Key '{}' stored ({})", name, private.kind());
        self.entries.insert(
            name,
            KeyEntry {
                private: Some(private),
                public,
            },
        );
    }

    /// Store a public key only, for verification
    pub fn insert_public(&mut self, name: impl Into<String>, public: PublicKeyMaterial) {
        let name = name.into();
        info!("Verification-only key '{}' stored ({})", name, public.kind());
        self.entries.insert(
            name,
            KeyEntry {
                private: None,
                public: Some(public),
            },
        );
    }

    /// Decode and store a PKCS#8 PEM private key
    pub fn insert_pkcs8_pem(
        &mut self,
        name: impl Into<String>,
        pem: &str,
    ) -> Result<(), KeyStoreError> {
        let private = PrivateKeyMaterial::from_pkcs8_pem(pem)?;
        self.insert_private(name, private);
        Ok(())
    }

    /// Decode and store a SubjectPublicKeyInfo PEM public key
    pub fn insert_public_key_pem(
        &mut self,
        name: impl Into<String>,
        pem: &str,
    ) -> Result<(), KeyStoreError> {
        let public = PublicKeyMaterial::from_public_key_pem(pem)?;
        self.insert_public(name, public);
        Ok(())
    }

    /// Drop a key; returns whether it existed
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyMaterialProvider for MemoryKeyStore {
    fn private_key(&self, key: &KeyRecord) -> Result<PrivateKeyMaterial, KeyStoreError> {
        self.entries
            .get(&key.name)
            .and_then(|entry| entry.private.clone())
            .ok_or_else(|| KeyStoreError::PrivateKeyNotFound(key.name.clone()))
    }

    fn public_key(&self, key: &KeyRecord) -> Result<PublicKeyMaterial, KeyStoreError> {
        self.entries
            .get(&key.name)
            .and_then(|entry| entry.public.clone())
            .ok_or_else(|| KeyStoreError::PublicKeyNotFound(key.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{PqKeyBytes, PqParameterSet};
    use crate::types::KeyAlgorithm;

    const EC_P256_PEM: &str = include_str!("../tests/fixtures/ec_p256.pem");
    const EC_P256_PUB_PEM: &str = include_str!("../tests/fixtures/ec_p256_pub.pem");

    #[test]
    fn test_classical_key_derives_public_half() {
        let mut keystore = MemoryKeyStore::new();
        keystore.insert_pkcs8_pem("ec", EC_P256_PEM).unwrap();

        let record = KeyRecord::new("ec", KeyAlgorithm::Ecdsa, 256);
        assert_eq!(keystore.private_key(&record).unwrap().kind(), "EC P-256");
        assert_eq!(keystore.public_key(&record).unwrap().kind(), "EC P-256");
    }

    #[test]
    fn test_verification_only_key() {
        let mut keystore = MemoryKeyStore::new();
        keystore.insert_public_key_pem("ec-pub", EC_P256_PUB_PEM).unwrap();

        let record = KeyRecord::new("ec-pub", KeyAlgorithm::Ecdsa, 256);
        assert!(keystore.public_key(&record).is_ok());
        assert_eq!(
            keystore.private_key(&record).unwrap_err(),
            KeyStoreError::PrivateKeyNotFound("ec-pub".to_string())
        );
    }

    #[test]
    fn test_post_quantum_secret_without_public_half() {
        let mut keystore = MemoryKeyStore::new();
        keystore.insert_private(
            "pq",
            PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(PqParameterSet::Falcon512, vec![1; 8])),
        );

        let record = KeyRecord::new("pq", KeyAlgorithm::Falcon, 512);
        assert!(keystore.private_key(&record).is_ok());
        assert_eq!(
            keystore.public_key(&record).unwrap_err(),
            KeyStoreError::PublicKeyNotFound("pq".to_string())
        );
    }

    #[test]
    fn test_unknown_key_and_removal() {
        let mut keystore = MemoryKeyStore::new();
        assert!(keystore.is_empty());
        assert!(keystore.insert_pkcs8_pem("bad", "not a pem").is_err());
        assert!(keystore.is_empty());

        keystore.insert_pkcs8_pem("ec", EC_P256_PEM).unwrap();
        assert_eq!(keystore.len(), 1);
        assert!(keystore.remove("ec"));
        assert!(!keystore.remove("ec"));

        let record = KeyRecord::new("ec", KeyAlgorithm::Ecdsa, 256);
        assert!(matches!(
            keystore.private_key(&record),
            Err(KeyStoreError::PrivateKeyNotFound(_))
        ));
    }
}
