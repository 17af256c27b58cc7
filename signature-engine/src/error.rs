//! Error type definitions
use thiserror::Error;

/// Errors surfaced by resolution, context acquisition and the sign/verify protocol.
///
/// Every variant is terminal for the current operation; nothing in this crate retries.
#[derive(Error, Debug)]
pub enum SignerError {
    /// A parameter required by the key's algorithm family was not declared
    #[error("Missing signature parameter '{parameter}'")]
    MissingParameter { parameter: String },

    /// A declared parameter value is not in the catalog
    #[error("Unknown value '{value}' for signature parameter '{parameter}'")]
    UnknownValue { parameter: String, value: String },

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Signature provider '{0}' is not available")]
    ProviderUnavailable(String),

    /// Key material was rejected by the primitive as incompatible with the algorithm
    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("Signing with key '{key}' failed: {reason}")]
    SigningFailure { key: String, reason: String },

    /// The primitive could not evaluate the signature at all. A mismatch is `Ok(false)`, not this.
    #[error("Verification with key '{key}' failed: {reason}")]
    VerificationFailure { key: String, reason: String },

    /// Context used out of order (before init, wrong direction, after finalization)
    #[error("Illegal signature context state: cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: String,
    },

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failures of the key-material provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    #[error("Private key for '{0}' not found")]
    PrivateKeyNotFound(String),

    #[error("Public key or certificate for '{0}' not found")]
    PublicKeyNotFound(String),

    #[error("Key decoding error: {0}")]
    Decoding(String),
}

/// Failures reported by a primitive; mapped onto [`SignerError`] by the signature context
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("key rejected: {0}")]
    KeyRejected(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("internal fault: {0}")]
    Fault(String),
}

pub type Result<T> = std::result::Result<T, SignerError>;
