//! Signature engine
//!
//! Drives one operation end to end:
//!
//! ```text
//! resolve -> acquire_context -> init_for_signing / init_for_verification -> sign / verify
//! ```
//!
//! Resolution and acquisition fail before any key material is touched. The engine
//! holds no mutable state, so one instance (or its clones) serves any number of
//! threads; each operation owns its own [`SignatureContext`].

use crate::catalog::SignatureParameter;
use crate::config::{validate_config, EngineConfig};
use crate::context::{ContextState, SignatureContext};
use crate::error::Result;
use crate::provider::ProviderRegistry;
use crate::resolver;
use crate::traits::KeyMaterialProvider;
use crate::types::{AlgorithmIdentifier, KeyRecord};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SignatureEngine<K> {
    registry: Arc<ProviderRegistry>,
    keys: K,
}

impl<K: KeyMaterialProvider> SignatureEngine<K> {
    /// Engine with both providers registered
    pub fn new(keys: K) -> Self {
        Self::with_registry(Arc::new(ProviderRegistry::with_defaults()), keys)
    }

    /// Engine over an existing, possibly shared, registry
    pub fn with_registry(registry: Arc<ProviderRegistry>, keys: K) -> Self {
        Self { registry, keys }
    }

    /// Engine with the providers enabled in `config`
    pub fn from_config(config: &EngineConfig, keys: K) -> Result<Self> {
        validate_config(config)?;
        Ok(Self::with_registry(
            Arc::new(ProviderRegistry::from_config(config)),
            keys,
        ))
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn keys(&self) -> &K {
        &self.keys
    }

    /// Select the algorithm for `key` from the declared parameters
    pub fn resolve(
        &self,
        key: &KeyRecord,
        parameters: &[SignatureParameter],
    ) -> Result<AlgorithmIdentifier> {
        resolver::resolve(key.algorithm, parameters)
    }

    /// Fresh context for `identifier` from the provider it names
    ///
    /// # Errors
    /// - `ProviderUnavailable`: the provider is not registered
    /// - `UnsupportedAlgorithm`: the provider does not serve the algorithm
    pub fn acquire_context(&self, identifier: &AlgorithmIdentifier) -> Result<SignatureContext> {
        let primitive = self
            .registry
            .instantiate(identifier.provider, &identifier.algorithm)?;
        Ok(SignatureContext::new(identifier.clone(), primitive))
    }

    /// Bind the private key of `key` for signing
    ///
    /// A context that is not freshly acquired is `IllegalState` before the key store
    /// is consulted. Key-store failures propagate unchanged; a key rejected by the
    /// primitive is `InvalidKey` carrying the key name. Both finalize the context.
    pub fn init_for_signing(&self, context: &mut SignatureContext, key: &KeyRecord) -> Result<()> {
        context.expect_state("initialize for signing", ContextState::Created)?;
        let material = match self.keys.private_key(key) {
            Ok(material) => material,
            Err(e) => {
                warn!("Private key lookup for '{}' failed: {}", key.name, e);
                context.abandon();
                return Err(e.into());
            }
        };
        context.init_sign(&key.name, &material)
    }

    /// Bind the public key (or certificate key) of `key` for verification
    pub fn init_for_verification(
        &self,
        context: &mut SignatureContext,
        key: &KeyRecord,
    ) -> Result<()> {
        context.expect_state("initialize for verification", ContextState::Created)?;
        let material = match self.keys.public_key(key) {
            Ok(material) => material,
            Err(e) => {
                warn!("Public key lookup for '{}' failed: {}", key.name, e);
                context.abandon();
                return Err(e.into());
            }
        };
        context.init_verify(&key.name, &material)
    }

    /// Sign `payload` with `key` using the algorithm selected by `parameters`
    ///
    /// # Example
    /// ```
    /// use signature_engine::catalog::{DigestAlgorithm, SignatureParameter};
    /// use signature_engine::keystore::MemoryKeyStore;
    /// use signature_engine::{KeyAlgorithm, KeyRecord, SignatureEngine};
    ///
    /// let mut keys = MemoryKeyStore::new();
    /// keys.insert_private(
    ///     "ec-1",
    ///     signature_engine::PrivateKeyMaterial::EcdsaP256(p256::ecdsa::SigningKey::random(
    ///         &mut rand::rngs::OsRng,
    ///     )),
    /// );
    /// let engine = SignatureEngine::new(keys);
    ///
    /// let key = KeyRecord::new("ec-1", KeyAlgorithm::Ecdsa, 256);
    /// let params = [SignatureParameter::digest(DigestAlgorithm::Sha256)];
    /// let signature = engine.sign(&key, &params, b"payload").unwrap();
    /// assert!(engine.verify(&key, &params, b"payload", &signature).unwrap());
    /// ```
    pub fn sign(
        &self,
        key: &KeyRecord,
        parameters: &[SignatureParameter],
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let identifier = self.resolve(key, parameters)?;
        let mut context = self.acquire_context(&identifier)?;
        self.init_for_signing(&mut context, key)?;

        let signature = context.sign_data(payload)?;
        debug!(
            "Signed {} bytes with key '{}' ({})",
            payload.len(),
            key.name,
            identifier
        );
        Ok(signature)
    }

    /// Verify `signature` over `payload`; `Ok(false)` means the signature does not match
    pub fn verify(
        &self,
        key: &KeyRecord,
        parameters: &[SignatureParameter],
        payload: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        let identifier = self.resolve(key, parameters)?;
        let mut context = self.acquire_context(&identifier)?;
        self.init_for_verification(&mut context, key)?;

        let valid = context.verify_data(payload, signature)?;
        debug!(
            "Verified {} bytes with key '{}' ({}): valid={}",
            payload.len(),
            key.name,
            identifier,
            valid
        );
        Ok(valid)
    }
}
