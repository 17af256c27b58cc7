//! Classical signature primitives: RSA (PKCS#1 v1.5, PSS) and ECDSA (P-256, P-384)
//!
//! Payload bytes are streamed into the digest as they arrive; the key operation
//! runs over the finished digest. ECDSA signatures are ASN.1 DER encoded.

use crate::catalog::{DigestAlgorithm, RsaSignatureScheme};
use crate::error::PrimitiveError;
use crate::key::{PrivateKeyMaterial, PublicKeyMaterial};
use crate::traits::{KeyBinding, PrimitiveResult, SignaturePrimitive};
use digest::DynDigest;
use p256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use rsa::traits::PublicKeyParts;
use rsa::{Pkcs1v15Sign, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_384, Sha3_512};

const RSA_SUFFIX: &str = "WITHRSA";
const ECDSA_SUFFIX: &str = "WITHECDSA";

/// Every algorithm name served by the classical provider
pub fn algorithm_names() -> Vec<String> {
    let mut names = Vec::new();
    for digest in DigestAlgorithm::ALL {
        for scheme in RsaSignatureScheme::ALL {
            names.push(format!(
                "{}{}{}",
                digest.provider_name(),
                RSA_SUFFIX,
                scheme.algorithm_suffix()
            ));
        }
        names.push(format!("{}{}", digest.provider_name(), ECDSA_SUFFIX));
    }
    names
}

/// Instantiate the primitive registered under `name`
pub fn instantiate(name: &str) -> Option<Box<dyn SignaturePrimitive>> {
    if let Some(digest) = name.strip_suffix(ECDSA_SUFFIX) {
        let digest = DigestAlgorithm::from_provider_name(digest)?;
        return Some(Box::new(EcdsaPrimitive::new(name, digest)));
    }

    let (digest, scheme) = match name.strip_suffix(RsaSignatureScheme::Pss.algorithm_suffix()) {
        Some(rest) if rest.ends_with(RSA_SUFFIX) => (rest, RsaSignatureScheme::Pss),
        _ => (name, RsaSignatureScheme::Pkcs1),
    };
    let digest = DigestAlgorithm::from_provider_name(digest.strip_suffix(RSA_SUFFIX)?)?;
    Some(Box::new(RsaPrimitive::new(name, digest, scheme)))
}

fn pkcs1v15_padding(digest: DigestAlgorithm) -> Pkcs1v15Sign {
    match digest {
        DigestAlgorithm::Sha224 => Pkcs1v15Sign::new::<Sha224>(),
        DigestAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
        DigestAlgorithm::Sha3_256 => Pkcs1v15Sign::new::<Sha3_256>(),
        DigestAlgorithm::Sha3_384 => Pkcs1v15Sign::new::<Sha3_384>(),
        DigestAlgorithm::Sha3_512 => Pkcs1v15Sign::new::<Sha3_512>(),
    }
}

/// MGF1 over the same digest, salt length equal to the digest length
fn pss_padding(digest: DigestAlgorithm) -> Pss {
    match digest {
        DigestAlgorithm::Sha224 => Pss::new::<Sha224>(),
        DigestAlgorithm::Sha256 => Pss::new::<Sha256>(),
        DigestAlgorithm::Sha384 => Pss::new::<Sha384>(),
        DigestAlgorithm::Sha512 => Pss::new::<Sha512>(),
        DigestAlgorithm::Sha3_256 => Pss::new::<Sha3_256>(),
        DigestAlgorithm::Sha3_384 => Pss::new::<Sha3_384>(),
        DigestAlgorithm::Sha3_512 => Pss::new::<Sha3_512>(),
    }
}

pub struct RsaPrimitive {
    name: String,
    digest: DigestAlgorithm,
    scheme: RsaSignatureScheme,
    hasher: Box<dyn DynDigest + Send>,
    key: KeyBinding<RsaPrivateKey, RsaPublicKey>,
}

impl RsaPrimitive {
    pub fn new(name: &str, digest: DigestAlgorithm, scheme: RsaSignatureScheme) -> Self {
        Self {
            name: name.to_string(),
            digest,
            scheme,
            hasher: digest.hasher(),
            key: KeyBinding::Unbound,
        }
    }
}

impl SignaturePrimitive for RsaPrimitive {
    fn algorithm(&self) -> &str {
        &self.name
    }

    fn init_sign(&mut self, key: &PrivateKeyMaterial) -> PrimitiveResult<()> {
        match key {
            PrivateKeyMaterial::Rsa(k) => {
                self.key = KeyBinding::Signing(k.clone());
                self.hasher.reset();
                Ok(())
            }
            other => Err(PrimitiveError::KeyRejected(format!(
                "{} requires an RSA private key, got {}",
                self.name,
                other.kind()
            ))),
        }
    }

    fn init_verify(&mut self, key: &PublicKeyMaterial) -> PrimitiveResult<()> {
        match key {
            PublicKeyMaterial::Rsa(k) => {
                self.key = KeyBinding::Verifying(k.clone());
                self.hasher.reset();
                Ok(())
            }
            other => Err(PrimitiveError::KeyRejected(format!(
                "{} requires an RSA public key, got {}",
                self.name,
                other.kind()
            ))),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn sign(&mut self) -> PrimitiveResult<Vec<u8>> {
        let KeyBinding::Signing(key) = &self.key else {
            return Err(PrimitiveError::Fault("no signing key bound".to_string()));
        };

        let hashed = self.hasher.finalize_reset();
        let mut rng = rand::thread_rng();
        let result = match self.scheme {
            RsaSignatureScheme::Pkcs1 => {
                key.sign_with_rng(&mut rng, pkcs1v15_padding(self.digest), &hashed)
            }
            RsaSignatureScheme::Pss => {
                key.sign_with_rng(&mut rng, pss_padding(self.digest), &hashed)
            }
        };

        result.map_err(|e| PrimitiveError::Fault(format!("{} signing failed: {}", self.name, e)))
    }

    fn verify(&mut self, signature: &[u8]) -> PrimitiveResult<bool> {
        let KeyBinding::Verifying(key) = &self.key else {
            return Err(PrimitiveError::Fault("no verification key bound".to_string()));
        };

        let hashed = self.hasher.finalize_reset();
        if signature.len() != key.size() {
            return Err(PrimitiveError::MalformedSignature(format!(
                "{} signature of {} bytes, modulus is {} bytes",
                self.name,
                signature.len(),
                key.size()
            )));
        }

        let result = match self.scheme {
            RsaSignatureScheme::Pkcs1 => {
                key.verify(pkcs1v15_padding(self.digest), &hashed, signature)
            }
            RsaSignatureScheme::Pss => key.verify(pss_padding(self.digest), &hashed, signature),
        };

        Ok(result.is_ok())
    }
}

enum EcSigner {
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
}

enum EcVerifier {
    P256(p256::ecdsa::VerifyingKey),
    P384(p384::ecdsa::VerifyingKey),
}

pub struct EcdsaPrimitive {
    name: String,
    hasher: Box<dyn DynDigest + Send>,
    key: KeyBinding<EcSigner, EcVerifier>,
}

impl EcdsaPrimitive {
    pub fn new(name: &str, digest: DigestAlgorithm) -> Self {
        Self {
            name: name.to_string(),
            hasher: digest.hasher(),
            key: KeyBinding::Unbound,
        }
    }
}

impl SignaturePrimitive for EcdsaPrimitive {
    fn algorithm(&self) -> &str {
        &self.name
    }

    fn init_sign(&mut self, key: &PrivateKeyMaterial) -> PrimitiveResult<()> {
        let signer = match key {
            PrivateKeyMaterial::EcdsaP256(k) => EcSigner::P256(k.clone()),
            PrivateKeyMaterial::EcdsaP384(k) => EcSigner::P384(k.clone()),
            other => {
                return Err(PrimitiveError::KeyRejected(format!(
                    "{} requires an EC private key, got {}",
                    self.name,
                    other.kind()
                )))
            }
        };
        self.key = KeyBinding::Signing(signer);
        self.hasher.reset();
        Ok(())
    }

    fn init_verify(&mut self, key: &PublicKeyMaterial) -> PrimitiveResult<()> {
        let verifier = match key {
            PublicKeyMaterial::EcdsaP256(k) => EcVerifier::P256(*k),
            PublicKeyMaterial::EcdsaP384(k) => EcVerifier::P384(*k),
            other => {
                return Err(PrimitiveError::KeyRejected(format!(
                    "{} requires an EC public key, got {}",
                    self.name,
                    other.kind()
                )))
            }
        };
        self.key = KeyBinding::Verifying(verifier);
        self.hasher.reset();
        Ok(())
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    fn sign(&mut self) -> PrimitiveResult<Vec<u8>> {
        let KeyBinding::Signing(signer) = &self.key else {
            return Err(PrimitiveError::Fault("no signing key bound".to_string()));
        };

        let prehash = self.hasher.finalize_reset();
        let fault = |e: p256::ecdsa::Error| {
            PrimitiveError::Fault(format!("{} signing failed: {}", self.name, e))
        };

        match signer {
            EcSigner::P256(k) => {
                let sig: p256::ecdsa::DerSignature = k.sign_prehash(&prehash).map_err(fault)?;
                Ok(sig.as_bytes().to_vec())
            }
            EcSigner::P384(k) => {
                let sig: p384::ecdsa::DerSignature = k.sign_prehash(&prehash).map_err(fault)?;
                Ok(sig.as_bytes().to_vec())
            }
        }
    }

    fn verify(&mut self, signature: &[u8]) -> PrimitiveResult<bool> {
        let KeyBinding::Verifying(verifier) = &self.key else {
            return Err(PrimitiveError::Fault("no verification key bound".to_string()));
        };

        let prehash = self.hasher.finalize_reset();
        let malformed = |e: p256::ecdsa::Error| {
            PrimitiveError::MalformedSignature(format!("invalid ECDSA DER signature: {}", e))
        };

        match verifier {
            EcVerifier::P256(k) => {
                let sig = p256::ecdsa::DerSignature::from_bytes(signature).map_err(malformed)?;
                Ok(k.verify_prehash(&prehash, &sig).is_ok())
            }
            EcVerifier::P384(k) => {
                let sig = p384::ecdsa::DerSignature::from_bytes(signature).map_err(malformed)?;
                Ok(k.verify_prehash(&prehash, &sig).is_ok())
            }
        }
    }
}
