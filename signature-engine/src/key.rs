//! Key material handed to primitives by the key-material provider
//!
//! Classical keys are held as parsed `rsa` / `p256` / `p384` keys. Post-quantum keys
//! are held as raw bytes tagged with their concrete parameter set and are parsed by
//! the primitive when bound, so a structurally broken key surfaces as `InvalidKey`.

use crate::error::KeyStoreError;
use crate::types::KeyAlgorithm;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use std::fmt;
use zeroize::Zeroizing;

/// Concrete post-quantum parameter sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PqParameterSet {
    Falcon512,
    Falcon1024,
    Dilithium2,
    Dilithium3,
    Dilithium5,
    SphincsSha2_128fSimple,
    SphincsSha2_192fSimple,
    SphincsSha2_256fSimple,
}

impl PqParameterSet {
    pub fn family(&self) -> KeyAlgorithm {
        match self {
            PqParameterSet::Falcon512 | PqParameterSet::Falcon1024 => KeyAlgorithm::Falcon,
            PqParameterSet::Dilithium2
            | PqParameterSet::Dilithium3
            | PqParameterSet::Dilithium5 => KeyAlgorithm::Dilithium,
            PqParameterSet::SphincsSha2_128fSimple
            | PqParameterSet::SphincsSha2_192fSimple
            | PqParameterSet::SphincsSha2_256fSimple => KeyAlgorithm::SphincsPlus,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PqParameterSet::Falcon512 => "Falcon-512",
            PqParameterSet::Falcon1024 => "Falcon-1024",
            PqParameterSet::Dilithium2 => "Dilithium2",
            PqParameterSet::Dilithium3 => "Dilithium3",
            PqParameterSet::Dilithium5 => "Dilithium5",
            PqParameterSet::SphincsSha2_128fSimple => "SPHINCS+-SHA2-128f-simple",
            PqParameterSet::SphincsSha2_192fSimple => "SPHINCS+-SHA2-192f-simple",
            PqParameterSet::SphincsSha2_256fSimple => "SPHINCS+-SHA2-256f-simple",
        }
    }
}

/// Raw post-quantum key bytes; zeroized on drop
#[derive(Clone)]
pub struct PqKeyBytes {
    parameter_set: PqParameterSet,
    bytes: Zeroizing<Vec<u8>>,
}

impl PqKeyBytes {
    pub fn new(parameter_set: PqParameterSet, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            parameter_set,
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    pub fn parameter_set(&self) -> PqParameterSet {
        self.parameter_set
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for PqKeyBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PqKeyBytes")
            .field("parameter_set", &self.parameter_set)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Private key material bound for signing
#[derive(Clone)]
pub enum PrivateKeyMaterial {
    Rsa(RsaPrivateKey),
    EcdsaP256(p256::ecdsa::SigningKey),
    EcdsaP384(p384::ecdsa::SigningKey),
    PostQuantum(PqKeyBytes),
}

/// Public key material bound for verification
#[derive(Clone)]
pub enum PublicKeyMaterial {
    Rsa(RsaPublicKey),
    EcdsaP256(p256::ecdsa::VerifyingKey),
    EcdsaP384(p384::ecdsa::VerifyingKey),
    PostQuantum(PqKeyBytes),
}

impl PrivateKeyMaterial {
    /// Short description of the key type, safe to log
    pub fn kind(&self) -> &'static str {
        match self {
            PrivateKeyMaterial::Rsa(_) => "RSA",
            PrivateKeyMaterial::EcdsaP256(_) => "EC P-256",
            PrivateKeyMaterial::EcdsaP384(_) => "EC P-384",
            PrivateKeyMaterial::PostQuantum(k) => k.parameter_set().name(),
        }
    }

    /// Decode a PKCS#8 DER private key (RSA, P-256 or P-384)
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyStoreError> {
        if let Ok(key) = RsaPrivateKey::from_pkcs8_der(der) {
            return Ok(PrivateKeyMaterial::Rsa(key));
        }
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_der(der) {
            return Ok(PrivateKeyMaterial::EcdsaP256(key));
        }
        p384::ecdsa::SigningKey::from_pkcs8_der(der)
            .map(PrivateKeyMaterial::EcdsaP384)
            .map_err(|e| {
                KeyStoreError::Decoding(format!("Unsupported PKCS#8 private key: {}", e))
            })
    }

    /// Decode a PKCS#8 PEM private key (RSA, P-256 or P-384)
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, KeyStoreError> {
        if let Ok(key) = RsaPrivateKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKeyMaterial::Rsa(key));
        }
        if let Ok(key) = p256::ecdsa::SigningKey::from_pkcs8_pem(pem) {
            return Ok(PrivateKeyMaterial::EcdsaP256(key));
        }
        p384::ecdsa::SigningKey::from_pkcs8_pem(pem)
            .map(PrivateKeyMaterial::EcdsaP384)
            .map_err(|e| {
                KeyStoreError::Decoding(format!("Unsupported PKCS#8 private key: {}", e))
            })
    }

    /// Public half for classical keys. Post-quantum secret keys do not carry it.
    pub fn public_material(&self) -> Option<PublicKeyMaterial> {
        match self {
            PrivateKeyMaterial::Rsa(k) => Some(PublicKeyMaterial::Rsa(k.to_public_key())),
            PrivateKeyMaterial::EcdsaP256(k) => {
                Some(PublicKeyMaterial::EcdsaP256(*k.verifying_key()))
            }
            PrivateKeyMaterial::EcdsaP384(k) => {
                Some(PublicKeyMaterial::EcdsaP384(*k.verifying_key()))
            }
            PrivateKeyMaterial::PostQuantum(_) => None,
        }
    }
}

impl PublicKeyMaterial {
    pub fn kind(&self) -> &'static str {
        match self {
            PublicKeyMaterial::Rsa(_) => "RSA",
            PublicKeyMaterial::EcdsaP256(_) => "EC P-256",
            PublicKeyMaterial::EcdsaP384(_) => "EC P-384",
            PublicKeyMaterial::PostQuantum(k) => k.parameter_set().name(),
        }
    }

    /// Decode a SubjectPublicKeyInfo DER public key (RSA, P-256 or P-384)
    pub fn from_public_key_der(der: &[u8]) -> Result<Self, KeyStoreError> {
        if let Ok(key) = RsaPublicKey::from_public_key_der(der) {
            return Ok(PublicKeyMaterial::Rsa(key));
        }
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_der(der) {
            return Ok(PublicKeyMaterial::EcdsaP256(key));
        }
        p384::ecdsa::VerifyingKey::from_public_key_der(der)
            .map(PublicKeyMaterial::EcdsaP384)
            .map_err(|e| KeyStoreError::Decoding(format!("Unsupported public key: {}", e)))
    }

    /// Decode a SubjectPublicKeyInfo PEM public key (RSA, P-256 or P-384)
    pub fn from_public_key_pem(pem: &str) -> Result<Self, KeyStoreError> {
        if let Ok(key) = RsaPublicKey::from_public_key_pem(pem) {
            return Ok(PublicKeyMaterial::Rsa(key));
        }
        if let Ok(key) = p256::ecdsa::VerifyingKey::from_public_key_pem(pem) {
            return Ok(PublicKeyMaterial::EcdsaP256(key));
        }
        p384::ecdsa::VerifyingKey::from_public_key_pem(pem)
            .map(PublicKeyMaterial::EcdsaP384)
            .map_err(|e| KeyStoreError::Decoding(format!("Unsupported public key: {}", e)))
    }
}

impl fmt::Debug for PrivateKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyMaterial({})", self.kind())
    }
}

impl fmt::Debug for PublicKeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKeyMaterial({})", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EC_P256_PEM: &str = include_str!("../tests/fixtures/ec_p256.pem");
    const EC_P256_PUB_PEM: &str = include_str!("../tests/fixtures/ec_p256_pub.pem");

    #[test]
    fn test_parameter_set_families() {
        assert_eq!(PqParameterSet::Falcon1024.family(), KeyAlgorithm::Falcon);
        assert_eq!(PqParameterSet::Dilithium3.family(), KeyAlgorithm::Dilithium);
        assert_eq!(
            PqParameterSet::SphincsSha2_192fSimple.family(),
            KeyAlgorithm::SphincsPlus
        );
    }

    #[test]
    fn test_decode_ec_pem() {
        let private = PrivateKeyMaterial::from_pkcs8_pem(EC_P256_PEM).unwrap();
        assert_eq!(private.kind(), "EC P-256");

        let public = PublicKeyMaterial::from_public_key_pem(EC_P256_PUB_PEM).unwrap();
        match (private.public_material(), public) {
            (
                Some(PublicKeyMaterial::EcdsaP256(derived)),
                PublicKeyMaterial::EcdsaP256(decoded),
            ) => assert_eq!(derived, decoded),
            other => panic!("Unexpected key material: {:?}", other),
        }
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            PrivateKeyMaterial::from_pkcs8_der(&[0u8; 32]),
            Err(KeyStoreError::Decoding(_))
        ));
        assert!(matches!(
            PublicKeyMaterial::from_public_key_der(b"not a key"),
            Err(KeyStoreError::Decoding(_))
        ));
    }

    #[test]
    fn test_debug_hides_key_bytes() {
        let key = PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(
            PqParameterSet::Dilithium2,
            vec![0xAB; 16],
        ));
        let rendered = format!("{:?}", key);
        assert_eq!(rendered, "PrivateKeyMaterial(Dilithium2)");
        assert!(PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(
            PqParameterSet::Falcon512,
            Vec::new()
        ))
        .public_material()
        .is_none());
    }
}
