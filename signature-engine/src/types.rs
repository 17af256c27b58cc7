//! Core data types shared by the resolver, the providers and the engine

use crate::error::SignerError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Algorithm family of a stored asymmetric key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAlgorithm {
    Rsa,
    Ecdsa,
    Falcon,
    Dilithium,
    SphincsPlus,
}

impl KeyAlgorithm {
    pub const ALL: [KeyAlgorithm; 5] = [
        KeyAlgorithm::Rsa,
        KeyAlgorithm::Ecdsa,
        KeyAlgorithm::Falcon,
        KeyAlgorithm::Dilithium,
        KeyAlgorithm::SphincsPlus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAlgorithm::Rsa => "RSA",
            KeyAlgorithm::Ecdsa => "ECDSA",
            KeyAlgorithm::Falcon => "FALCON",
            KeyAlgorithm::Dilithium => "DILITHIUM",
            KeyAlgorithm::SphincsPlus => "SPHINCSPLUS",
        }
    }

    /// Whether the family is served by the post-quantum provider
    pub fn is_post_quantum(&self) -> bool {
        matches!(
            self,
            KeyAlgorithm::Falcon | KeyAlgorithm::Dilithium | KeyAlgorithm::SphincsPlus
        )
    }
}

impl fmt::Display for KeyAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyAlgorithm {
    type Err = SignerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyAlgorithm::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| {
                SignerError::UnsupportedAlgorithm(format!(
                    "Cryptographic algorithm '{}' not supported",
                    s
                ))
            })
    }
}

/// Read-only handle to a key owned by the keystore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRecord {
    /// Symbolic name, used in diagnostics and as the keystore lookup key
    pub name: String,
    pub algorithm: KeyAlgorithm,
    /// Key length in bits. Not used for algorithm selection.
    pub length: u32,
}

impl KeyRecord {
    pub fn new(name: impl Into<String>, algorithm: KeyAlgorithm, length: u32) -> Self {
        Self {
            name: name.into(),
            algorithm,
            length,
        }
    }
}

/// Cryptographic backend that implements a resolved algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "classical")]
    Classical,
    #[serde(rename = "post-quantum")]
    PostQuantum,
}

impl ProviderKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Classical => "classical",
            ProviderKind::PostQuantum => "post-quantum",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact primitive name plus the provider that serves it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlgorithmIdentifier {
    pub algorithm: String,
    pub provider: ProviderKind,
}

impl AlgorithmIdentifier {
    pub fn new(algorithm: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            algorithm: algorithm.into(),
            provider,
        }
    }
}

impl fmt::Display for AlgorithmIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.algorithm, self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_algorithm_symbols() {
        for family in KeyAlgorithm::ALL {
            assert_eq!(family.as_str().parse::<KeyAlgorithm>().unwrap(), family);
        }
    }

    #[test]
    fn test_unknown_family_is_unsupported() {
        match "UNKNOWN_FAMILY".parse::<KeyAlgorithm>() {
            Err(SignerError::UnsupportedAlgorithm(msg)) => assert!(msg.contains("UNKNOWN_FAMILY")),
            other => panic!("Expected UnsupportedAlgorithm, got {:?}", other),
        }
        // Symbols are exact
        assert!("rsa".parse::<KeyAlgorithm>().is_err());
    }

    #[test]
    fn test_provider_split() {
        assert!(!KeyAlgorithm::Rsa.is_post_quantum());
        assert!(!KeyAlgorithm::Ecdsa.is_post_quantum());
        assert!(KeyAlgorithm::Falcon.is_post_quantum());
        assert!(KeyAlgorithm::SphincsPlus.is_post_quantum());
    }
}
