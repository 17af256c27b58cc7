//! Seams between the engine, the primitives and the keystore
use crate::error::{KeyStoreError, PrimitiveError};
use crate::key::{PrivateKeyMaterial, PublicKeyMaterial};
use crate::types::KeyRecord;

/// Result type of primitive operations
pub type PrimitiveResult<T> = std::result::Result<T, PrimitiveError>;

/// A concrete signature primitive as served by a provider
///
/// Primitives only check key compatibility and do the cryptography; call ordering
/// is enforced by [`crate::context::SignatureContext`].
pub trait SignaturePrimitive: Send {
    /// Algorithm name the primitive was registered under
    fn algorithm(&self) -> &str;

    /// Bind private key material for signing
    fn init_sign(&mut self, key: &PrivateKeyMaterial) -> PrimitiveResult<()>;

    /// Bind public key material for verification
    fn init_verify(&mut self, key: &PublicKeyMaterial) -> PrimitiveResult<()>;

    /// Feed payload bytes
    fn update(&mut self, data: &[u8]);

    /// Produce the signature over everything fed so far
    fn sign(&mut self) -> PrimitiveResult<Vec<u8>>;

    /// Check `signature` against everything fed so far
    fn verify(&mut self, signature: &[u8]) -> PrimitiveResult<bool>;
}

/// Source of key material for stored keys
pub trait KeyMaterialProvider {
    /// Private key for signing
    fn private_key(&self, key: &KeyRecord) -> Result<PrivateKeyMaterial, KeyStoreError>;

    /// Certificate public key for verification
    fn public_key(&self, key: &KeyRecord) -> Result<PublicKeyMaterial, KeyStoreError>;
}

impl<T: KeyMaterialProvider + ?Sized> KeyMaterialProvider for &T {
    fn private_key(&self, key: &KeyRecord) -> Result<PrivateKeyMaterial, KeyStoreError> {
        (**self).private_key(key)
    }

    fn public_key(&self, key: &KeyRecord) -> Result<PublicKeyMaterial, KeyStoreError> {
        (**self).public_key(key)
    }
}

impl<T: KeyMaterialProvider + ?Sized> KeyMaterialProvider for std::sync::Arc<T> {
    fn private_key(&self, key: &KeyRecord) -> Result<PrivateKeyMaterial, KeyStoreError> {
        (**self).private_key(key)
    }

    fn public_key(&self, key: &KeyRecord) -> Result<PublicKeyMaterial, KeyStoreError> {
        (**self).public_key(key)
    }
}

/// Key bound into a primitive, and the direction it was bound for
pub(crate) enum KeyBinding<S, V> {
    Unbound,
    Signing(S),
    Verifying(V),
}
