//! Post-quantum signature primitives: FALCON, DILITHIUM and SPHINCS+
//!
//! Each family is registered under one generic name. The concrete parameter set
//! (Falcon-512 vs Falcon-1024, Dilithium2/3/5, ...) is taken from the bound key
//! material. The pqcrypto schemes are one-shot, so the payload is buffered until
//! finalization. Signatures are detached.

use crate::error::PrimitiveError;
use crate::key::{PqKeyBytes, PqParameterSet, PrivateKeyMaterial, PublicKeyMaterial};
use crate::resolver::{DILITHIUM, FALCON, SPHINCS_PLUS};
use crate::traits::{KeyBinding, PrimitiveResult, SignaturePrimitive};
use crate::types::KeyAlgorithm;
use crate::{dilithium, falcon, sphincs};
use pqcrypto_traits::sign::{DetachedSignature, PublicKey, SecretKey};

/// Scheme operations of one post-quantum family
pub(crate) struct SchemeOps {
    pub family: KeyAlgorithm,
    pub check_secret_key: fn(&PqKeyBytes) -> PrimitiveResult<()>,
    pub check_public_key: fn(&PqKeyBytes) -> PrimitiveResult<()>,
    pub sign: fn(&PqKeyBytes, &[u8]) -> PrimitiveResult<Vec<u8>>,
    pub verify: fn(&PqKeyBytes, &[u8], &[u8]) -> PrimitiveResult<bool>,
}

/// Size and security level of a concrete parameter set
#[derive(Debug, Clone, Copy)]
pub struct AlgorithmInfo {
    /// Algorithm name
    pub name: &'static str,
    /// NIST security level
    pub nist_level: u8,
    /// Public key size (bytes)
    pub public_key_size: usize,
    /// Secret key size (bytes)
    pub secret_key_size: usize,
    /// Maximum signature size (bytes)
    pub signature_size: usize,
}

impl PqParameterSet {
    pub fn info(&self) -> AlgorithmInfo {
        use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};
        use pqcrypto_falcon::{falcon1024, falcon512};
        use pqcrypto_sphincsplus::{
            sphincssha2128fsimple, sphincssha2192fsimple, sphincssha2256fsimple,
        };

        macro_rules! sizes {
            ($level:expr, $scheme:ident) => {
                (
                    $level,
                    $scheme::public_key_bytes(),
                    $scheme::secret_key_bytes(),
                    $scheme::signature_bytes(),
                )
            };
        }

        let (nist_level, public_key_size, secret_key_size, signature_size) = match self {
            PqParameterSet::Falcon512 => sizes!(1, falcon512),
            PqParameterSet::Falcon1024 => sizes!(5, falcon1024),
            PqParameterSet::Dilithium2 => sizes!(2, dilithium2),
            PqParameterSet::Dilithium3 => sizes!(3, dilithium3),
            PqParameterSet::Dilithium5 => sizes!(5, dilithium5),
            PqParameterSet::SphincsSha2_128fSimple => sizes!(1, sphincssha2128fsimple),
            PqParameterSet::SphincsSha2_192fSimple => sizes!(3, sphincssha2192fsimple),
            PqParameterSet::SphincsSha2_256fSimple => sizes!(5, sphincssha2256fsimple),
        };

        AlgorithmInfo {
            name: self.name(),
            nist_level,
            public_key_size,
            secret_key_size,
            signature_size,
        }
    }
}

/// Every algorithm name served by the post-quantum provider
pub fn algorithm_names() -> Vec<String> {
    vec![FALCON.to_string(), DILITHIUM.to_string(), SPHINCS_PLUS.to_string()]
}

/// Instantiate the primitive registered under `name`
pub fn instantiate(name: &str) -> Option<Box<dyn SignaturePrimitive>> {
    let (name, ops) = match name {
        FALCON => (FALCON, &falcon::OPS),
        DILITHIUM => (DILITHIUM, &dilithium::OPS),
        SPHINCS_PLUS => (SPHINCS_PLUS, &sphincs::OPS),
        _ => return None,
    };
    Some(Box::new(PostQuantumPrimitive::new(name, ops)))
}

pub struct PostQuantumPrimitive {
    name: &'static str,
    ops: &'static SchemeOps,
    message: Vec<u8>,
    key: KeyBinding<PqKeyBytes, PqKeyBytes>,
}

impl PostQuantumPrimitive {
    fn new(name: &'static str, ops: &'static SchemeOps) -> Self {
        Self {
            name,
            ops,
            message: Vec::new(),
            key: KeyBinding::Unbound,
        }
    }

    fn accepts(&self, key: &PqKeyBytes) -> PrimitiveResult<()> {
        if key.parameter_set().family() != self.ops.family {
            return Err(PrimitiveError::KeyRejected(format!(
                "{} cannot use a {} key",
                self.name,
                key.parameter_set().name()
            )));
        }
        Ok(())
    }
}

impl SignaturePrimitive for PostQuantumPrimitive {
    fn algorithm(&self) -> &str {
        self.name
    }

    fn init_sign(&mut self, key: &PrivateKeyMaterial) -> PrimitiveResult<()> {
        let PrivateKeyMaterial::PostQuantum(key) = key else {
            return Err(PrimitiveError::KeyRejected(format!(
                "{} requires a post-quantum private key, got {}",
                self.name,
                key.kind()
            )));
        };
        self.accepts(key)?;
        (self.ops.check_secret_key)(key)?;

        self.key = KeyBinding::Signing(key.clone());
        self.message.clear();
        Ok(())
    }

    fn init_verify(&mut self, key: &PublicKeyMaterial) -> PrimitiveResult<()> {
        let PublicKeyMaterial::PostQuantum(key) = key else {
            return Err(PrimitiveError::KeyRejected(format!(
                "{} requires a post-quantum public key, got {}",
                self.name,
                key.kind()
            )));
        };
        self.accepts(key)?;
        (self.ops.check_public_key)(key)?;

        self.key = KeyBinding::Verifying(key.clone());
        self.message.clear();
        Ok(())
    }

    fn update(&mut self, data: &[u8]) {
        self.message.extend_from_slice(data);
    }

    fn sign(&mut self) -> PrimitiveResult<Vec<u8>> {
        let KeyBinding::Signing(key) = &self.key else {
            return Err(PrimitiveError::Fault("no signing key bound".to_string()));
        };

        let signature = (self.ops.sign)(key, &self.message)?;

        tracing::debug!(
            "Signed message: algorithm={}, msg_len={} bytes, detached_sig_len={} bytes",
            key.parameter_set().name(),
            self.message.len(),
            signature.len()
        );

        self.message.clear();
        Ok(signature)
    }

    fn verify(&mut self, signature: &[u8]) -> PrimitiveResult<bool> {
        let KeyBinding::Verifying(key) = &self.key else {
            return Err(PrimitiveError::Fault("no verification key bound".to_string()));
        };

        let info = key.parameter_set().info();
        if signature.is_empty() || signature.len() > info.signature_size {
            self.message.clear();
            return Err(PrimitiveError::MalformedSignature(format!(
                "{} signature of {} bytes, at most {} expected",
                info.name,
                signature.len(),
                info.signature_size
            )));
        }

        let is_valid = (self.ops.verify)(key, &self.message, signature)?;

        tracing::debug!(
            "Signature verification: algorithm={}, valid={}, msg_len={} bytes",
            key.parameter_set().name(),
            is_valid,
            self.message.len()
        );

        self.message.clear();
        Ok(is_valid)
    }
}

/// Parse a secret key, reporting failure as a rejected key
pub(crate) fn parse_secret_key<SK: SecretKey>(key: &PqKeyBytes) -> PrimitiveResult<SK> {
    SK::from_bytes(key.as_bytes()).map_err(|e| {
        PrimitiveError::KeyRejected(format!(
            "Failed to parse {} secret key: {:?}",
            key.parameter_set().name(),
            e
        ))
    })
}

/// Parse a public key, reporting failure as a rejected key
pub(crate) fn parse_public_key<PK: PublicKey>(key: &PqKeyBytes) -> PrimitiveResult<PK> {
    PK::from_bytes(key.as_bytes()).map_err(|e| {
        PrimitiveError::KeyRejected(format!(
            "Failed to parse {} public key: {:?}",
            key.parameter_set().name(),
            e
        ))
    })
}

pub(crate) fn detached_sign<SK: SecretKey, SIG: DetachedSignature>(
    key: &PqKeyBytes,
    message: &[u8],
    sign: fn(&[u8], &SK) -> SIG,
) -> PrimitiveResult<Vec<u8>> {
    let sk = parse_secret_key::<SK>(key)?;
    Ok(sign(message, &sk).as_bytes().to_vec())
}

pub(crate) fn verify_detached<PK: PublicKey, SIG: DetachedSignature, E>(
    key: &PqKeyBytes,
    message: &[u8],
    signature: &[u8],
    verify: fn(&SIG, &[u8], &PK) -> Result<(), E>,
) -> PrimitiveResult<bool> {
    let pk = parse_public_key::<PK>(key)?;
    let sig = SIG::from_bytes(signature).map_err(|e| {
        PrimitiveError::MalformedSignature(format!(
            "{} signature of {} bytes: {:?}",
            key.parameter_set().name(),
            signature.len(),
            e
        ))
    })?;

    Ok(verify(&sig, message, &pk).is_ok())
}

pub(crate) fn wrong_family(expected: KeyAlgorithm, set: PqParameterSet) -> PrimitiveError {
    PrimitiveError::KeyRejected(format!("{} is not a {} parameter set", set.name(), expected))
}
