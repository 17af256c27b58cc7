//! SPHINCS+ signature operations
//!
//! Stateless hash-based signatures, served as `SPHINCSPlus`. Only the SHA2 "fast,
//! simple" variants are wired; they trade larger signatures for signing speed.

use crate::key::{PqKeyBytes, PqParameterSet};
use crate::post_quantum::{
    detached_sign, parse_public_key, parse_secret_key, verify_detached, wrong_family, SchemeOps,
};
use crate::traits::PrimitiveResult;
use crate::types::KeyAlgorithm;
use pqcrypto_sphincsplus::{sphincssha2128fsimple, sphincssha2192fsimple, sphincssha2256fsimple};

pub(crate) static OPS: SchemeOps = SchemeOps {
    family: KeyAlgorithm::SphincsPlus,
    check_secret_key,
    check_public_key,
    sign,
    verify,
};

fn check_secret_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::SphincsSha2_128fSimple => {
            parse_secret_key::<sphincssha2128fsimple::SecretKey>(key).map(drop)
        }
        PqParameterSet::SphincsSha2_192fSimple => {
            parse_secret_key::<sphincssha2192fsimple::SecretKey>(key).map(drop)
        }
        PqParameterSet::SphincsSha2_256fSimple => {
            parse_secret_key::<sphincssha2256fsimple::SecretKey>(key).map(drop)
        }
        other => Err(wrong_family(KeyAlgorithm::SphincsPlus, other)),
    }
}

fn check_public_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::SphincsSha2_128fSimple => {
            parse_public_key::<sphincssha2128fsimple::PublicKey>(key).map(drop)
        }
        PqParameterSet::SphincsSha2_192fSimple => {
            parse_public_key::<sphincssha2192fsimple::PublicKey>(key).map(drop)
        }
        PqParameterSet::SphincsSha2_256fSimple => {
            parse_public_key::<sphincssha2256fsimple::PublicKey>(key).map(drop)
        }
        other => Err(wrong_family(KeyAlgorithm::SphincsPlus, other)),
    }
}

fn sign(key: &PqKeyBytes, message: &[u8]) -> PrimitiveResult<Vec<u8>> {
    match key.parameter_set() {
        PqParameterSet::SphincsSha2_128fSimple => {
            detached_sign(key, message, sphincssha2128fsimple::detached_sign)
        }
        PqParameterSet::SphincsSha2_192fSimple => {
            detached_sign(key, message, sphincssha2192fsimple::detached_sign)
        }
        PqParameterSet::SphincsSha2_256fSimple => {
            detached_sign(key, message, sphincssha2256fsimple::detached_sign)
        }
        other => Err(wrong_family(KeyAlgorithm::SphincsPlus, other)),
    }
}

fn verify(key: &PqKeyBytes, message: &[u8], signature: &[u8]) -> PrimitiveResult<bool> {
    match key.parameter_set() {
        PqParameterSet::SphincsSha2_128fSimple => verify_detached(
            key,
            message,
            signature,
            sphincssha2128fsimple::verify_detached_signature,
        ),
        PqParameterSet::SphincsSha2_192fSimple => verify_detached(
            key,
            message,
            signature,
            sphincssha2192fsimple::verify_detached_signature,
        ),
        PqParameterSet::SphincsSha2_256fSimple => verify_detached(
            key,
            message,
            signature,
            sphincssha2256fsimple::verify_detached_signature,
        ),
        other => Err(wrong_family(KeyAlgorithm::SphincsPlus, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrimitiveError;
    use pqcrypto_traits::sign::{PublicKey, SecretKey};

    fn keypair_128f() -> (PqKeyBytes, PqKeyBytes) {
        let set = PqParameterSet::SphincsSha2_128fSimple;
        let (pk, sk) = sphincssha2128fsimple::keypair();
        (PqKeyBytes::new(set, pk.as_bytes()), PqKeyBytes::new(set, sk.as_bytes()))
    }

    #[test]
    fn test_sign_and_verify() {
        let (pk, sk) = keypair_128f();
        let message = b"hash-based payload";

        let signature = sign(&sk, message).unwrap();
        assert_eq!(signature.len(), sphincssha2128fsimple::signature_bytes());
        assert!(verify(&pk, message, &signature).unwrap());
        assert!(!verify(&pk, b"other payload", &signature).unwrap());
    }

    #[test]
    fn test_truncated_signature_is_malformed() {
        let (pk, sk) = keypair_128f();
        let signature = sign(&sk, b"payload").unwrap();
        assert!(matches!(
            verify(&pk, b"payload", &signature[..64]),
            Err(PrimitiveError::MalformedSignature(_))
        ));
    }

    #[test]
    fn test_key_of_wrong_size_is_rejected() {
        let (pk, _) = keypair_128f();
        // A 128f public key relabelled as 256f
        let relabelled = PqKeyBytes::new(PqParameterSet::SphincsSha2_256fSimple, pk.as_bytes());
        assert!(matches!(
            check_public_key(&relabelled),
            Err(PrimitiveError::KeyRejected(_))
        ));
    }
}
