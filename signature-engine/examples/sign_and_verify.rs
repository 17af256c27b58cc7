//! Sign and verify one payload with every configured family
//!
//! ```text
//! SIGNATURE_ENGINE_ENABLED_PROVIDERS=classical cargo run --example sign_and_verify
//! ```

use pqcrypto_traits::sign::{PublicKey, SecretKey};
use signature_engine::config::load_config_from_env;
use signature_engine::{
    DigestAlgorithm, KeyAlgorithm, KeyRecord, MemoryKeyStore, PqKeyBytes, PqParameterSet,
    PrivateKeyMaterial, PublicKeyMaterial, RsaSignatureScheme, SignatureEngine,
    SignatureParameter,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .init();

    println!("=== Signature engine demo ===\n");

    // 1. Configuration
    let config = load_config_from_env()?;
    println!("✓ Enabled providers: {:?}", config.enabled_providers);

    // 2. Key store
    let mut keys = MemoryKeyStore::new();
    keys.insert_pkcs8_pem("rsa-demo", include_str!("../tests/fixtures/rsa2048.pem"))?;
    keys.insert_pkcs8_pem("ec-demo", include_str!("../tests/fixtures/ec_p256.pem"))?;

    let (pk, sk) = pqcrypto_dilithium::dilithium3::keypair();
    keys.insert(
        "dilithium-demo",
        PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(PqParameterSet::Dilithium3, sk.as_bytes())),
        PublicKeyMaterial::PostQuantum(PqKeyBytes::new(PqParameterSet::Dilithium3, pk.as_bytes())),
    );
    println!("✓ Stored {} keys\n", keys.len());

    let engine = SignatureEngine::from_config(&config, keys)?;

    // 3. Sign, verify, tamper
    let requests = [
        (
            KeyRecord::new("rsa-demo", KeyAlgorithm::Rsa, 2048),
            vec![
                SignatureParameter::rsa_scheme(RsaSignatureScheme::Pss),
                SignatureParameter::digest(DigestAlgorithm::Sha256),
            ],
        ),
        (
            KeyRecord::new("ec-demo", KeyAlgorithm::Ecdsa, 256),
            vec![SignatureParameter::digest(DigestAlgorithm::Sha3_256)],
        ),
        (KeyRecord::new("dilithium-demo", KeyAlgorithm::Dilithium, 0), Vec::new()),
    ];

    let message = b"Test message for detached signature";
    for (key, params) in &requests {
        let identifier = match engine.resolve(key, params) {
            Ok(identifier) => identifier,
            Err(e) => {
                println!("✗ {}: {}", key.name, e);
                continue;
            }
        };

        match engine.sign(key, params, message) {
            Ok(signature) => {
                println!("✓ {} signed with {}", key.name, identifier);
                println!("  Signature length: {} bytes", signature.len());

                match engine.verify(key, params, message, &signature) {
                    Ok(true) => println!("✓ Verification successful"),
                    Ok(false) => println!("✗ Verification failed"),
                    Err(e) => println!("✗ Verification error: {}", e),
                }

                match engine.verify(key, params, b"Wrong message", &signature) {
                    Ok(false) => println!("✓ Correct: wrong message was rejected"),
                    Ok(true) => println!("✗ Critical error: wrong message was accepted!"),
                    Err(e) => println!("Verification error: {}", e),
                }
            }
            Err(e) => println!("✗ {} ({}): {}", key.name, identifier, e),
        }
        println!();
    }

    println!("=== Demo complete ===");
    Ok(())
}
