//! Stateful signing / verification context
//!
//! ```text
//! Created --init_sign--> Initialized(Sign) --update*--> sign   --> Finalized
//! Created --init_verify-> Initialized(Verify) -update*-> verify --> Finalized
//! ```
//!
//! Any failure during initialization or finalization also ends in `Finalized`, so
//! a context is never reused after an error.

use crate::error::{PrimitiveError, Result, SignerError};
use crate::key::{PrivateKeyMaterial, PublicKeyMaterial};
use crate::traits::SignaturePrimitive;
use crate::types::AlgorithmIdentifier;
use std::fmt;
use tracing::{debug, warn};

/// Direction a context was initialized for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sign,
    Verify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    Created,
    Initialized(Direction),
    Finalized,
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextState::Created => f.write_str("uninitialized"),
            ContextState::Initialized(Direction::Sign) => f.write_str("initialized for signing"),
            ContextState::Initialized(Direction::Verify) => {
                f.write_str("initialized for verification")
            }
            ContextState::Finalized => f.write_str("finalized"),
        }
    }
}

/// One primitive instance, exclusively owned by the operation that acquired it
pub struct SignatureContext {
    identifier: AlgorithmIdentifier,
    primitive: Box<dyn SignaturePrimitive>,
    state: ContextState,
    key_name: Option<String>,
}

impl SignatureContext {
    pub fn new(identifier: AlgorithmIdentifier, primitive: Box<dyn SignaturePrimitive>) -> Self {
        Self {
            identifier,
            primitive,
            state: ContextState::Created,
            key_name: None,
        }
    }

    pub fn identifier(&self) -> &AlgorithmIdentifier {
        &self.identifier
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Name of the bound key, once initialized
    pub fn key_name(&self) -> Option<&str> {
        self.key_name.as_deref()
    }

    /// Bind private key material for signing
    ///
    /// # Errors
    /// - `IllegalState`: the context was already initialized or finalized
    /// - `InvalidKey`: the primitive rejected the key
    pub fn init_sign(&mut self, key_name: &str, key: &PrivateKeyMaterial) -> Result<()> {
        self.expect_state("initialize for signing", ContextState::Created)?;
        self.key_name = Some(key_name.to_string());

        match self.primitive.init_sign(key) {
            Ok(()) => {
                self.state = ContextState::Initialized(Direction::Sign);
                debug!("{} bound to key '{}' for signing", self.identifier, key_name);
                Ok(())
            }
            Err(e) => Err(self.fail(e, Direction::Sign)),
        }
    }

    /// Bind public key material for verification
    ///
    /// # Errors
    /// - `IllegalState`: the context was already initialized or finalized
    /// - `InvalidKey`: the primitive rejected the key
    pub fn init_verify(&mut self, key_name: &str, key: &PublicKeyMaterial) -> Result<()> {
        self.expect_state("initialize for verification", ContextState::Created)?;
        self.key_name = Some(key_name.to_string());

        match self.primitive.init_verify(key) {
            Ok(()) => {
                self.state = ContextState::Initialized(Direction::Verify);
                debug!("{} bound to key '{}' for verification", self.identifier, key_name);
                Ok(())
            }
            Err(e) => Err(self.fail(e, Direction::Verify)),
        }
    }

    /// Feed payload bytes; may be called any number of times before finalization
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        if !matches!(self.state, ContextState::Initialized(_)) {
            return Err(self.illegal("update"));
        }
        self.primitive.update(data);
        Ok(())
    }

    /// Finish signing and return the signature bytes
    pub fn sign(&mut self) -> Result<Vec<u8>> {
        self.expect_state("sign", ContextState::Initialized(Direction::Sign))?;

        let result = self.primitive.sign();
        self.state = ContextState::Finalized;

        match result {
            Ok(signature) => {
                debug!(
                    "Signed with {} (key '{}'): {} byte signature",
                    self.identifier,
                    self.key_label(),
                    signature.len()
                );
                Ok(signature)
            }
            Err(e) => Err(self.fail(e, Direction::Sign)),
        }
    }

    /// Finish verification
    ///
    /// `Ok(false)` means a well-formed signature that does not match.
    pub fn verify(&mut self, signature: &[u8]) -> Result<bool> {
        self.expect_state("verify", ContextState::Initialized(Direction::Verify))?;

        let result = self.primitive.verify(signature);
        self.state = ContextState::Finalized;

        match result {
            Ok(valid) => {
                if !valid {
                    warn!(
                        "Signature rejected: algorithm={}, key='{}'",
                        self.identifier,
                        self.key_label()
                    );
                }
                Ok(valid)
            }
            Err(e) => Err(self.fail(e, Direction::Verify)),
        }
    }

    /// Update with the whole payload and sign
    pub fn sign_data(mut self, payload: &[u8]) -> Result<Vec<u8>> {
        self.update(payload)?;
        self.sign()
    }

    /// Update with the whole payload and verify
    pub fn verify_data(mut self, payload: &[u8], signature: &[u8]) -> Result<bool> {
        self.update(payload)?;
        self.verify(signature)
    }

    /// Finalize without finishing, after a failure outside the primitive
    pub(crate) fn abandon(&mut self) {
        self.state = ContextState::Finalized;
    }

    pub(crate) fn expect_state(
        &self,
        operation: &'static str,
        expected: ContextState,
    ) -> Result<()> {
        if self.state != expected {
            return Err(self.illegal(operation));
        }
        Ok(())
    }

    fn illegal(&self, operation: &'static str) -> SignerError {
        SignerError::IllegalState {
            operation,
            state: self.state.to_string(),
        }
    }

    fn key_label(&self) -> &str {
        self.key_name.as_deref().unwrap_or("<unbound>")
    }

    /// Finalize the context and translate a primitive failure
    fn fail(&mut self, error: PrimitiveError, direction: Direction) -> SignerError {
        self.state = ContextState::Finalized;
        let key = self.key_label().to_string();

        match (error, direction) {
            (PrimitiveError::KeyRejected(reason), _) => {
                warn!("Key '{}' refused by {}: {}", key, self.identifier, reason);
                SignerError::InvalidKey { key, reason }
            }
            (e, Direction::Sign) => SignerError::SigningFailure {
                key,
                reason: e.to_string(),
            },
            (e, Direction::Verify) => SignerError::VerificationFailure {
                key,
                reason: e.to_string(),
            },
        }
    }
}

impl fmt::Debug for SignatureContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureContext")
            .field("identifier", &self.identifier)
            .field("state", &self.state)
            .field("key_name", &self.key_name)
            .finish()
    }
}
