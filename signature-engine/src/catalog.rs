//! Catalog of digests, RSA signature schemes and declared signature parameters

use crate::error::{Result, SignerError};
use digest::DynDigest;
use sha2::{Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_256, Sha3_384, Sha3_512};

/// Declared parameter carrying the digest symbol (RSA and ECDSA)
pub const ATTRIBUTE_SIG_DIGEST: &str = "data_sigDigest";

/// Declared parameter carrying the RSA padding scheme symbol
pub const ATTRIBUTE_RSA_SIG_SCHEME: &str = "data_rsaSigScheme";

/// A declared (name, value) signature attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    pub name: String,
    pub value: String,
}

impl SignatureParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn digest(digest: DigestAlgorithm) -> Self {
        Self::new(ATTRIBUTE_SIG_DIGEST, digest.symbol())
    }

    pub fn rsa_scheme(scheme: RsaSignatureScheme) -> Self {
        Self::new(ATTRIBUTE_RSA_SIG_SCHEME, scheme.symbol())
    }
}

/// Single string value declared for `name`, if any
pub fn declared_value<'a>(name: &str, parameters: &'a [SignatureParameter]) -> Option<&'a str> {
    parameters
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.value.as_str())
}

/// Like [`declared_value`] but absence is a `MissingParameter` error
pub fn required_value<'a>(name: &str, parameters: &'a [SignatureParameter]) -> Result<&'a str> {
    declared_value(name, parameters).ok_or_else(|| SignerError::MissingParameter {
        parameter: name.to_string(),
    })
}

/// Digest algorithms usable with RSA and ECDSA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 7] = [
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
        DigestAlgorithm::Sha3_256,
        DigestAlgorithm::Sha3_384,
        DigestAlgorithm::Sha3_512,
    ];

    /// Symbol accepted in declared parameters
    pub fn symbol(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "SHA224",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Sha3_256 => "SHA3_256",
            DigestAlgorithm::Sha3_384 => "SHA3_384",
            DigestAlgorithm::Sha3_512 => "SHA3_512",
        }
    }

    /// Canonical digest name used to build provider algorithm names
    pub fn provider_name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "SHA224",
            DigestAlgorithm::Sha256 => "SHA256",
            DigestAlgorithm::Sha384 => "SHA384",
            DigestAlgorithm::Sha512 => "SHA512",
            DigestAlgorithm::Sha3_256 => "SHA3-256",
            DigestAlgorithm::Sha3_384 => "SHA3-384",
            DigestAlgorithm::Sha3_512 => "SHA3-512",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.symbol() == symbol)
    }

    pub fn from_provider_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.provider_name() == name)
    }

    /// Fresh streaming hasher
    pub fn hasher(&self) -> Box<dyn DynDigest + Send> {
        match self {
            DigestAlgorithm::Sha224 => Box::new(Sha224::default()),
            DigestAlgorithm::Sha256 => Box::new(Sha256::default()),
            DigestAlgorithm::Sha384 => Box::new(Sha384::default()),
            DigestAlgorithm::Sha512 => Box::new(Sha512::default()),
            DigestAlgorithm::Sha3_256 => Box::new(Sha3_256::default()),
            DigestAlgorithm::Sha3_384 => Box::new(Sha3_384::default()),
            DigestAlgorithm::Sha3_512 => Box::new(Sha3_512::default()),
        }
    }
}

/// RSA signature padding schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaSignatureScheme {
    Pkcs1,
    Pss,
}

impl RsaSignatureScheme {
    pub const ALL: [RsaSignatureScheme; 2] = [RsaSignatureScheme::Pkcs1, RsaSignatureScheme::Pss];

    pub fn symbol(&self) -> &'static str {
        match self {
            RsaSignatureScheme::Pkcs1 => "PKCS1",
            RsaSignatureScheme::Pss => "PSS",
        }
    }

    /// Suffix appended to `<DIGEST>WITHRSA`
    pub fn algorithm_suffix(&self) -> &'static str {
        match self {
            RsaSignatureScheme::Pkcs1 => "",
            RsaSignatureScheme::Pss => "ANDMGF1",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.symbol() == symbol)
    }
}

/// Digest declared under [`ATTRIBUTE_SIG_DIGEST`]
pub fn declared_digest(parameters: &[SignatureParameter]) -> Result<DigestAlgorithm> {
    let value = required_value(ATTRIBUTE_SIG_DIGEST, parameters)?;
    DigestAlgorithm::from_symbol(value).ok_or_else(|| SignerError::UnknownValue {
        parameter: ATTRIBUTE_SIG_DIGEST.to_string(),
        value: value.to_string(),
    })
}

/// RSA scheme declared under [`ATTRIBUTE_RSA_SIG_SCHEME`]
pub fn declared_rsa_scheme(parameters: &[SignatureParameter]) -> Result<RsaSignatureScheme> {
    let value = required_value(ATTRIBUTE_RSA_SIG_SCHEME, parameters)?;
    RsaSignatureScheme::from_symbol(value).ok_or_else(|| SignerError::UnknownValue {
        parameter: ATTRIBUTE_RSA_SIG_SCHEME.to_string(),
        value: value.to_string(),
    })
}
