//! DILITHIUM post-quantum signature operations
//!
//! Dilithium (NIST FIPS 204, module-lattice based) is served under the single
//! algorithm name `DILITHIUM`; the security level comes from the key.
//!
//! | Parameter set | NIST level | Public key | Signature |
//! |---------------|------------|------------|-----------|
//! | Dilithium2 | 2 | 1,312 bytes | 2,420 bytes |
//! | Dilithium3 | 3 | 1,952 bytes | 3,293 bytes |
//! | Dilithium5 | 5 | 2,592 bytes | 4,595 bytes |
//!
//! pqcrypto-dilithium also offers the attached `SignedMessage` form
//! (`[signature] + [message]`); only detached signatures are produced here.

use crate::key::{PqKeyBytes, PqParameterSet};
use crate::post_quantum::{
    detached_sign, parse_public_key, parse_secret_key, verify_detached, wrong_family, SchemeOps,
};
use crate::traits::PrimitiveResult;
use crate::types::KeyAlgorithm;
use pqcrypto_dilithium::{dilithium2, dilithium3, dilithium5};

pub(crate) static OPS: SchemeOps = SchemeOps {
    family: KeyAlgorithm::Dilithium,
    check_secret_key,
    check_public_key,
    sign,
    verify,
};

fn check_secret_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::Dilithium2 => parse_secret_key::<dilithium2::SecretKey>(key).map(drop),
        PqParameterSet::Dilithium3 => parse_secret_key::<dilithium3::SecretKey>(key).map(drop),
        PqParameterSet::Dilithium5 => parse_secret_key::<dilithium5::SecretKey>(key).map(drop),
        other => Err(wrong_family(KeyAlgorithm::Dilithium, other)),
    }
}

fn check_public_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::Dilithium2 => parse_public_key::<dilithium2::PublicKey>(key).map(drop),
        PqParameterSet::Dilithium3 => parse_public_key::<dilithium3::PublicKey>(key).map(drop),
        PqParameterSet::Dilithium5 => parse_public_key::<dilithium5::PublicKey>(key).map(drop),
        other => Err(wrong_family(KeyAlgorithm::Dilithium, other)),
    }
}

/// Detached signature over `message`
///
/// # Performance
/// - Dilithium3: ~7 ms for a 1 KB message
fn sign(key: &PqKeyBytes, message: &[u8]) -> PrimitiveResult<Vec<u8>> {
    match key.parameter_set() {
        PqParameterSet::Dilithium2 => detached_sign(key, message, dilithium2::detached_sign),
        PqParameterSet::Dilithium3 => detached_sign(key, message, dilithium3::detached_sign),
        PqParameterSet::Dilithium5 => detached_sign(key, message, dilithium5::detached_sign),
        other => Err(wrong_family(KeyAlgorithm::Dilithium, other)),
    }
}

/// Verify a detached signature
///
/// # Returns
/// - `Ok(true)`: Signature is valid
/// - `Ok(false)`: Signature is invalid
/// - `Err`: Signature has the wrong length for the parameter set
fn verify(key: &PqKeyBytes, message: &[u8], signature: &[u8]) -> PrimitiveResult<bool> {
    match key.parameter_set() {
        PqParameterSet::Dilithium2 => {
            verify_detached(key, message, signature, dilithium2::verify_detached_signature)
        }
        PqParameterSet::Dilithium3 => {
            verify_detached(key, message, signature, dilithium3::verify_detached_signature)
        }
        PqParameterSet::Dilithium5 => {
            verify_detached(key, message, signature, dilithium5::verify_detached_signature)
        }
        other => Err(wrong_family(KeyAlgorithm::Dilithium, other)),
    }
}
