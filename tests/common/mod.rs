#![allow(dead_code)]

use jwtkit::{EcdsaCurve, FixedClock, Key, Parser, ParserBuilder};
use once_cell::sync::Lazy;
use ring::rand::SystemRandom;
use ring::signature::{
    EcdsaKeyPair, Ed25519KeyPair, ECDSA_P256_SHA256_FIXED_SIGNING,
    ECDSA_P384_SHA384_FIXED_SIGNING,
};

/// Fixed "now" shared by every suite
pub const NOW: i64 = 1_700_000_000;

pub const HMAC_SECRET: &[u8] = b"integration-test-secret-with-enough-entropy";

static RSA_PKCS8: Lazy<Vec<u8>> = Lazy::new(|| {
    use rsa::{pkcs8::EncodePrivateKey, RsaPrivateKey};

    let mut rng = rand::thread_rng();
    let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate RSA key");
    private_key
        .to_pkcs8_der()
        .expect("Failed to serialize RSA key")
        .as_bytes()
        .to_vec()
});

static P256_PKCS8: Lazy<Vec<u8>> = Lazy::new(|| {
    EcdsaKeyPair::generate_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, &SystemRandom::new())
        .expect("Failed to generate P-256 key")
        .as_ref()
        .to_vec()
});

static P384_PKCS8: Lazy<Vec<u8>> = Lazy::new(|| {
    EcdsaKeyPair::generate_pkcs8(&ECDSA_P384_SHA384_FIXED_SIGNING, &SystemRandom::new())
        .expect("Failed to generate P-384 key")
        .as_ref()
        .to_vec()
});

static ED25519_PKCS8: Lazy<Vec<u8>> = Lazy::new(|| {
    Ed25519KeyPair::generate_pkcs8(&SystemRandom::new())
        .expect("Failed to generate Ed25519 key")
        .as_ref()
        .to_vec()
});

pub fn rsa_pkcs8_der() -> Vec<u8> {
    RSA_PKCS8.clone()
}

/// A (signing, verification) pair
pub struct KeyPair {
    pub signing: Key,
    pub verification: Key,
}

impl KeyPair {
    fn from_private(signing: Key) -> Self {
        let verification = signing
            .to_verification_key()
            .expect("Failed to derive verification key");
        Self {
            signing,
            verification,
        }
    }
}

pub fn hmac_keys() -> KeyPair {
    let key = Key::symmetric(HMAC_SECRET);
    KeyPair {
        signing: key.clone(),
        verification: key,
    }
}

pub fn rsa_keys() -> KeyPair {
    KeyPair::from_private(Key::rsa_private_pkcs8(&RSA_PKCS8).expect("Failed to load RSA key"))
}

pub fn p256_keys() -> KeyPair {
    KeyPair::from_private(
        Key::ecdsa_private_pkcs8(&P256_PKCS8, EcdsaCurve::P256).expect("Failed to load P-256 key"),
    )
}

pub fn p384_keys() -> KeyPair {
    KeyPair::from_private(
        Key::ecdsa_private_pkcs8(&P384_PKCS8, EcdsaCurve::P384).expect("Failed to load P-384 key"),
    )
}

pub fn ed25519_keys() -> KeyPair {
    KeyPair::from_private(
        Key::ed25519_private_pkcs8(&ED25519_PKCS8).expect("Failed to load Ed25519 key"),
    )
}

/// Parser builder pinned to [`NOW`]
pub fn parser() -> ParserBuilder {
    Parser::builder().clock(FixedClock::new(NOW))
}

/// Build a token from raw JSON text and a raw signature
pub fn forge(header: &str, payload: &str, signature: &[u8]) -> String {
    let signing_input = format!(
        "{}.{}",
        jwtkit::codec::encode_segment(header),
        jwtkit::codec::encode_segment(payload)
    );
    jwtkit::codec::assemble(&signing_input, signature)
}

/// Signing input of a compact token
pub fn signing_input(token: &str) -> &str {
    let end = token.rfind('.').expect("token has no dots");
    &token[..end]
}
