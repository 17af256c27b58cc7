//! Sign / verify throughput per algorithm family

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pqcrypto_traits::sign::{PublicKey, SecretKey};
use signature_engine::{
    DigestAlgorithm, KeyAlgorithm, KeyRecord, MemoryKeyStore, PqKeyBytes, PqParameterSet,
    PrivateKeyMaterial, PublicKeyMaterial, RsaSignatureScheme, SignatureEngine,
    SignatureParameter,
};
use std::hint::black_box;

const RSA_PEM: &str = include_str!("../tests/fixtures/rsa2048.pem");
const EC_P256_PEM: &str = include_str!("../tests/fixtures/ec_p256.pem");

fn insert_pq(keys: &mut MemoryKeyStore, name: &str, set: PqParameterSet, pk: &[u8], sk: &[u8]) {
    keys.insert(
        name,
        PrivateKeyMaterial::PostQuantum(PqKeyBytes::new(set, sk)),
        PublicKeyMaterial::PostQuantum(PqKeyBytes::new(set, pk)),
    );
}

fn setup() -> (SignatureEngine<MemoryKeyStore>, Vec<(KeyRecord, Vec<SignatureParameter>)>) {
    let mut keys = MemoryKeyStore::new();
    keys.insert_pkcs8_pem("rsa", RSA_PEM).expect("RSA fixture");
    keys.insert_pkcs8_pem("ecdsa", EC_P256_PEM).expect("EC fixture");

    let (pk, sk) = pqcrypto_falcon::falcon512::keypair();
    insert_pq(&mut keys, "falcon", PqParameterSet::Falcon512, pk.as_bytes(), sk.as_bytes());
    let (pk, sk) = pqcrypto_dilithium::dilithium3::keypair();
    insert_pq(&mut keys, "dilithium", PqParameterSet::Dilithium3, pk.as_bytes(), sk.as_bytes());
    let (pk, sk) = pqcrypto_sphincsplus::sphincssha2128fsimple::keypair();
    insert_pq(
        &mut keys,
        "sphincsplus",
        PqParameterSet::SphincsSha2_128fSimple,
        pk.as_bytes(),
        sk.as_bytes(),
    );

    let digest = SignatureParameter::digest(DigestAlgorithm::Sha256);
    let cases = vec![
        (
            KeyRecord::new("rsa", KeyAlgorithm::Rsa, 2048),
            vec![SignatureParameter::rsa_scheme(RsaSignatureScheme::Pss), digest.clone()],
        ),
        (KeyRecord::new("ecdsa", KeyAlgorithm::Ecdsa, 256), vec![digest]),
        (KeyRecord::new("falcon", KeyAlgorithm::Falcon, 512), Vec::new()),
        (KeyRecord::new("dilithium", KeyAlgorithm::Dilithium, 0), Vec::new()),
        (KeyRecord::new("sphincsplus", KeyAlgorithm::SphincsPlus, 0), Vec::new()),
    ];

    (SignatureEngine::new(keys), cases)
}

fn bench_sign_verify(c: &mut Criterion) {
    let (engine, cases) = setup();
    let payload = vec![0x5Au8; 1024];

    let mut sign_group = c.benchmark_group("sign_1kb");
    for (key, params) in &cases {
        sign_group.bench_with_input(BenchmarkId::from_parameter(&key.name), key, |b, key| {
            b.iter(|| black_box(engine.sign(key, params, &payload)))
        });
    }
    sign_group.finish();

    let mut verify_group = c.benchmark_group("verify_1kb");
    for (key, params) in &cases {
        let signature = engine.sign(key, params, &payload).expect("sign");
        verify_group.bench_with_input(BenchmarkId::from_parameter(&key.name), key, |b, key| {
            b.iter(|| black_box(engine.verify(key, params, &payload, &signature)))
        });
    }
    verify_group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let key = KeyRecord::new("rsa", KeyAlgorithm::Rsa, 2048);
    let params = [
        SignatureParameter::rsa_scheme(RsaSignatureScheme::Pss),
        SignatureParameter::digest(DigestAlgorithm::Sha3_512),
    ];
    c.bench_function("resolve_rsa_pss", |b| {
        b.iter(|| black_box(signature_engine::resolve(key.algorithm, black_box(&params))))
    });
}

criterion_group!(benches, bench_sign_verify, bench_resolve);
criterion_main!(benches);
