//! Signature algorithm resolution
//!
//! Maps a key's algorithm family and the caller's declared parameters onto the
//! exact primitive name and the provider that implements it. Resolution is a pure
//! function: no key material is touched and no provider is queried.
//!
//! | Family | Parameters | Identifier |
//! |--------|------------|------------|
//! | RSA | digest, scheme | `<DIGEST>WITHRSA`, `+ANDMGF1` for PSS |
//! | ECDSA | digest | `<DIGEST>WITHECDSA` |
//! | FALCON | - | `FALCON` |
//! | DILITHIUM | - | `DILITHIUM` |
//! | SPHINCSPLUS | - | `SPHINCSPlus` |

use crate::catalog::{declared_digest, declared_rsa_scheme, SignatureParameter};
use crate::error::{Result, SignerError};
use crate::types::{AlgorithmIdentifier, KeyAlgorithm, ProviderKind};

pub const FALCON: &str = "FALCON";
pub const DILITHIUM: &str = "DILITHIUM";
pub const SPHINCS_PLUS: &str = "SPHINCSPlus";

type ResolveFn = fn(&[SignatureParameter]) -> Result<AlgorithmIdentifier>;

/// One resolver per supported family
const RESOLVERS: [(KeyAlgorithm, ResolveFn); 5] = [
    (KeyAlgorithm::Rsa, resolve_rsa),
    (KeyAlgorithm::Ecdsa, resolve_ecdsa),
    (KeyAlgorithm::Falcon, resolve_falcon),
    (KeyAlgorithm::Dilithium, resolve_dilithium),
    (KeyAlgorithm::SphincsPlus, resolve_sphincs_plus),
];

/// Resolve the signature algorithm for `family` from the declared parameters
pub fn resolve(
    family: KeyAlgorithm,
    parameters: &[SignatureParameter],
) -> Result<AlgorithmIdentifier> {
    let (_, resolver) = RESOLVERS
        .iter()
        .find(|(f, _)| *f == family)
        .ok_or_else(|| {
            SignerError::UnsupportedAlgorithm(format!(
                "Cryptographic algorithm '{}' not supported",
                family
            ))
        })?;

    let identifier = resolver(parameters)?;

    tracing::debug!(
        "Resolved signature algorithm: family={}, algorithm={}, provider={}",
        family,
        identifier.algorithm,
        identifier.provider
    );

    Ok(identifier)
}

/// Resolve from a family symbol such as `"RSA"`; unknown symbols are `UnsupportedAlgorithm`
pub fn resolve_named(
    family: &str,
    parameters: &[SignatureParameter],
) -> Result<AlgorithmIdentifier> {
    resolve(family.parse()?, parameters)
}

fn resolve_rsa(parameters: &[SignatureParameter]) -> Result<AlgorithmIdentifier> {
    let scheme = declared_rsa_scheme(parameters)?;
    let digest = declared_digest(parameters)?;

    Ok(AlgorithmIdentifier::new(
        format!("{}WITHRSA{}", digest.provider_name(), scheme.algorithm_suffix()),
        ProviderKind::Classical,
    ))
}

fn resolve_ecdsa(parameters: &[SignatureParameter]) -> Result<AlgorithmIdentifier> {
    let digest = declared_digest(parameters)?;

    Ok(AlgorithmIdentifier::new(
        format!("{}WITHECDSA", digest.provider_name()),
        ProviderKind::Classical,
    ))
}

fn resolve_falcon(_: &[SignatureParameter]) -> Result<AlgorithmIdentifier> {
    Ok(AlgorithmIdentifier::new(FALCON, ProviderKind::PostQuantum))
}

fn resolve_dilithium(_: &[SignatureParameter]) -> Result<AlgorithmIdentifier> {
    Ok(AlgorithmIdentifier::new(DILITHIUM, ProviderKind::PostQuantum))
}

fn resolve_sphincs_plus(_: &[SignatureParameter]) -> Result<AlgorithmIdentifier> {
    Ok(AlgorithmIdentifier::new(SPHINCS_PLUS, ProviderKind::PostQuantum))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        DigestAlgorithm, RsaSignatureScheme, ATTRIBUTE_RSA_SIG_SCHEME, ATTRIBUTE_SIG_DIGEST,
    };

    fn rsa_params(digest: &str, scheme: &str) -> Vec<SignatureParameter> {
        vec![
            SignatureParameter::new(ATTRIBUTE_RSA_SIG_SCHEME, scheme),
            SignatureParameter::new(ATTRIBUTE_SIG_DIGEST, digest),
        ]
    }

    #[test]
    fn test_rsa_pkcs1() {
        let id = resolve(KeyAlgorithm::Rsa, &rsa_params("SHA256", "PKCS1")).unwrap();
        assert_eq!(id.algorithm, "SHA256WITHRSA");
        assert_eq!(id.provider, ProviderKind::Classical);
    }

    #[test]
    fn test_rsa_pss() {
        let id = resolve(KeyAlgorithm::Rsa, &rsa_params("SHA256", "PSS")).unwrap();
        assert_eq!(id.algorithm, "SHA256WITHRSAANDMGF1");

        let id = resolve(KeyAlgorithm::Rsa, &rsa_params("SHA3_512", "PSS")).unwrap();
        assert_eq!(id.algorithm, "SHA3-512WITHRSAANDMGF1");
    }

    #[test]
    fn test_ecdsa() {
        let params = vec![SignatureParameter::digest(DigestAlgorithm::Sha384)];
        let id = resolve(KeyAlgorithm::Ecdsa, &params).unwrap();
        assert_eq!(id.algorithm, "SHA384WITHECDSA");
        assert_eq!(id.provider, ProviderKind::Classical);
    }

    #[test]
    fn test_post_quantum_fixed_identifiers() {
        let cases = [
            (KeyAlgorithm::Falcon, "FALCON"),
            (KeyAlgorithm::Dilithium, "DILITHIUM"),
            (KeyAlgorithm::SphincsPlus, "SPHINCSPlus"),
        ];
        for (family, expected) in cases {
            let id = resolve(family, &[]).unwrap();
            assert_eq!(id.algorithm, expected);
            assert_eq!(id.provider, ProviderKind::PostQuantum);
        }
    }

    #[test]
    fn test_post_quantum_ignores_parameters() {
        let params = rsa_params("SHA256", "PSS");
        let id = resolve(KeyAlgorithm::Falcon, &params).unwrap();
        assert_eq!(id.algorithm, "FALCON");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let params = rsa_params("SHA512", "PKCS1");
        for family in KeyAlgorithm::ALL {
            let first = resolve(family, &params);
            let second = resolve(family, &params);
            match (first, second) {
                (Ok(a), Ok(b)) => assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => panic!("Resolution of {} is not deterministic", family),
            }
        }
    }

    #[test]
    fn test_rsa_without_parameters() {
        match resolve(KeyAlgorithm::Rsa, &[]) {
            Err(SignerError::MissingParameter { .. }) => {}
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_rsa_missing_digest_only() {
        let params = vec![SignatureParameter::rsa_scheme(RsaSignatureScheme::Pss)];
        match resolve(KeyAlgorithm::Rsa, &params) {
            Err(SignerError::MissingParameter { parameter }) => {
                assert_eq!(parameter, ATTRIBUTE_SIG_DIGEST)
            }
            other => panic!("Expected MissingParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_ecdsa_unknown_digest() {
        let params = vec![SignatureParameter::new(ATTRIBUTE_SIG_DIGEST, "MD5")];
        match resolve(KeyAlgorithm::Ecdsa, &params) {
            Err(SignerError::UnknownValue { parameter, value }) => {
                assert_eq!(parameter, ATTRIBUTE_SIG_DIGEST);
                assert_eq!(value, "MD5");
            }
            other => panic!("Expected UnknownValue, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_family() {
        match resolve_named("UNKNOWN_FAMILY", &[]) {
            Err(SignerError::UnsupportedAlgorithm(_)) => {}
            other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
        }

        let params = vec![SignatureParameter::digest(DigestAlgorithm::Sha256)];
        let id = resolve_named("ECDSA", &params).unwrap();
        assert_eq!(id.algorithm, "SHA256WITHECDSA");
    }
}
