//! FALCON signature operations (Falcon-512, Falcon-1024)
use crate::key::{PqKeyBytes, PqParameterSet};
use crate::post_quantum::{
    detached_sign, parse_public_key, parse_secret_key, verify_detached, wrong_family, SchemeOps,
};
use crate::traits::PrimitiveResult;
use crate::types::KeyAlgorithm;
use pqcrypto_falcon::{falcon1024, falcon512};

pub(crate) static OPS: SchemeOps = SchemeOps {
    family: KeyAlgorithm::Falcon,
    check_secret_key,
    check_public_key,
    sign,
    verify,
};

fn check_secret_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::Falcon512 => parse_secret_key::<falcon512::SecretKey>(key).map(drop),
        PqParameterSet::Falcon1024 => parse_secret_key::<falcon1024::SecretKey>(key).map(drop),
        other => Err(wrong_family(KeyAlgorithm::Falcon, other)),
    }
}

fn check_public_key(key: &PqKeyBytes) -> PrimitiveResult<()> {
    match key.parameter_set() {
        PqParameterSet::Falcon512 => parse_public_key::<falcon512::PublicKey>(key).map(drop),
        PqParameterSet::Falcon1024 => parse_public_key::<falcon1024::PublicKey>(key).map(drop),
        other => Err(wrong_family(KeyAlgorithm::Falcon, other)),
    }
}

fn sign(key: &PqKeyBytes, message: &[u8]) -> PrimitiveResult<Vec<u8>> {
    match key.parameter_set() {
        PqParameterSet::Falcon512 => detached_sign(key, message, falcon512::detached_sign),
        PqParameterSet::Falcon1024 => detached_sign(key, message, falcon1024::detached_sign),
        other => Err(wrong_family(KeyAlgorithm::Falcon, other)),
    }
}

fn verify(key: &PqKeyBytes, message: &[u8], signature: &[u8]) -> PrimitiveResult<bool> {
    match key.parameter_set() {
        PqParameterSet::Falcon512 => {
            verify_detached(key, message, signature, falcon512::verify_detached_signature)
        }
        PqParameterSet::Falcon1024 => {
            verify_detached(key, message, signature, falcon1024::verify_detached_signature)
        }
        other => Err(wrong_family(KeyAlgorithm::Falcon, other)),
    }
}
