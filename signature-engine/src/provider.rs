//! Cryptographic providers and the registry that holds them
//!
//! The registry is assembled once at startup and never mutated afterwards, so an
//! `Arc<ProviderRegistry>` can be shared by any number of concurrent operations.

use crate::config::EngineConfig;
use crate::error::{Result, SignerError};
use crate::traits::SignaturePrimitive;
use crate::types::ProviderKind;
use crate::{classical, post_quantum};
use std::collections::HashMap;
use tracing::{debug, info};

/// A backend that instantiates primitives by exact algorithm name
pub trait SignatureProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Every algorithm name this provider registers
    fn algorithms(&self) -> Vec<String>;

    /// Fresh primitive for `name`, or `None` if the name is not registered
    fn instantiate(&self, name: &str) -> Option<Box<dyn SignaturePrimitive>>;
}

/// RSA (PKCS#1 v1.5, PSS) and ECDSA (P-256, P-384)
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassicalProvider;

impl SignatureProvider for ClassicalProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Classical
    }

    fn algorithms(&self) -> Vec<String> {
        classical::algorithm_names()
    }

    fn instantiate(&self, name: &str) -> Option<Box<dyn SignaturePrimitive>> {
        classical::instantiate(name)
    }
}

/// FALCON, DILITHIUM and SPHINCS+
#[derive(Debug, Default, Clone, Copy)]
pub struct PostQuantumProvider;

impl SignatureProvider for PostQuantumProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::PostQuantum
    }

    fn algorithms(&self) -> Vec<String> {
        post_quantum::algorithm_names()
    }

    fn instantiate(&self, name: &str) -> Option<Box<dyn SignaturePrimitive>> {
        post_quantum::instantiate(name)
    }
}

/// Providers present in the running environment, keyed by kind
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderKind, Box<dyn SignatureProvider>>,
}

impl ProviderRegistry {
    /// Empty registry; add providers with [`ProviderRegistry::with_provider`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with both the classical and the post-quantum provider
    pub fn with_defaults() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Registry with the providers enabled in `config`
    pub fn from_config(config: &EngineConfig) -> Self {
        let registry = config
            .enabled_providers
            .iter()
            .fold(Self::new(), |registry, kind| match kind {
                ProviderKind::Classical => registry.with_provider(ClassicalProvider),
                ProviderKind::PostQuantum => registry.with_provider(PostQuantumProvider),
            });

        info!("Signature providers registered: {:?}", registry.kinds());
        registry
    }

    /// Add a provider, replacing any previous provider of the same kind
    pub fn with_provider<P: SignatureProvider + 'static>(mut self, provider: P) -> Self {
        self.providers.insert(provider.kind(), Box::new(provider));
        self
    }

    pub fn contains(&self, kind: ProviderKind) -> bool {
        self.providers.contains_key(&kind)
    }

    /// Registered provider kinds, classical first
    pub fn kinds(&self) -> Vec<ProviderKind> {
        [ProviderKind::Classical, ProviderKind::PostQuantum]
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    /// Provider of the given kind
    ///
    /// # Errors
    /// `ProviderUnavailable` when the provider is not registered
    pub fn get(&self, kind: ProviderKind) -> Result<&dyn SignatureProvider> {
        self.providers
            .get(&kind)
            .map(|provider| provider.as_ref())
            .ok_or_else(|| SignerError::ProviderUnavailable(kind.name().to_string()))
    }

    /// Fresh primitive for `algorithm` from the provider of kind `kind`
    ///
    /// # Errors
    /// - `ProviderUnavailable`: no provider of that kind is registered
    /// - `UnsupportedAlgorithm`: the provider does not register `algorithm`
    pub fn instantiate(
        &self,
        kind: ProviderKind,
        algorithm: &str,
    ) -> Result<Box<dyn SignaturePrimitive>> {
        let primitive = self.get(kind)?.instantiate(algorithm).ok_or_else(|| {
            SignerError::UnsupportedAlgorithm(format!(
                "{} is not registered by the {} provider",
                algorithm, kind
            ))
        })?;

        debug!("Instantiated {} from the {} provider", algorithm, kind);
        Ok(primitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_register_both_providers() {
        let registry = ProviderRegistry::with_defaults();
        assert_eq!(
            registry.kinds(),
            vec![ProviderKind::Classical, ProviderKind::PostQuantum]
        );
        assert_eq!(
            registry.get(ProviderKind::PostQuantum).unwrap().kind(),
            ProviderKind::PostQuantum
        );
    }

    #[test]
    fn test_missing_provider_is_unavailable() {
        let registry = ProviderRegistry::new().with_provider(ClassicalProvider);
        match registry.instantiate(ProviderKind::PostQuantum, "FALCON") {
            Err(SignerError::ProviderUnavailable(name)) => assert_eq!(name, "post-quantum"),
            other => panic!("Expected ProviderUnavailable, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_name_registered_by_other_provider_is_unsupported() {
        let registry = ProviderRegistry::with_defaults();
        assert!(matches!(
            registry.instantiate(ProviderKind::Classical, "FALCON").map(|_| ()),
            Err(SignerError::UnsupportedAlgorithm(_))
        ));
        assert!(matches!(
            registry.instantiate(ProviderKind::PostQuantum, "SHA256WITHRSA").map(|_| ()),
            Err(SignerError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn test_every_advertised_name_instantiates() {
        let registry = ProviderRegistry::with_defaults();
        for kind in registry.kinds() {
            let provider = registry.get(kind).unwrap();
            for name in provider.algorithms() {
                let primitive = registry.instantiate(kind, &name).unwrap();
                assert_eq!(primitive.algorithm(), name);
            }
        }
    }

    #[test]
    fn test_from_config() {
        let config = EngineConfig {
            enabled_providers: vec![ProviderKind::PostQuantum],
        };
        let registry = ProviderRegistry::from_config(&config);
        assert!(!registry.contains(ProviderKind::Classical));
        assert!(registry.contains(ProviderKind::PostQuantum));
    }
}
