mod common;

use common::*;
use jwtkit::*;

fn claims() -> MapClaims {
    MapClaims::new()
        .with("iss", "https://issuer.example")
        .with("sub", "user-42")
        .with("aud", "api")
        .with("iat", NOW - 10)
        .with("exp", NOW + 3600)
}

fn round_trip(method: &dyn SigningMethod, keys: KeyPair) {
    let token = sign(method, &claims(), &keys.signing).unwrap();

    let parsed = parser()
        .valid_methods([method.alg()])
        .issuer("https://issuer.example")
        .audience("api")
        .build()
        .parse::<MapClaims, _>(&token, &keys.verification)
        .unwrap_or_else(|e| panic!("{} round trip failed: {e}", method.alg()));

    assert_eq!(parsed.algorithm(), method.alg());
    assert_eq!(parsed.header().alg, method.alg());
    assert_eq!(parsed.claims(), &claims());
}

#[test]
fn hmac_round_trips() {
    round_trip(&HS256, hmac_keys());
    round_trip(&HS384, hmac_keys());
    round_trip(&HS512, hmac_keys());
}

#[test]
fn rsa_pkcs1_round_trips() {
    round_trip(&RS256, rsa_keys());
    round_trip(&RS384, rsa_keys());
    round_trip(&RS512, rsa_keys());
}

#[test]
fn rsa_pss_round_trips() {
    round_trip(&PS256, rsa_keys());
    round_trip(&PS384, rsa_keys());
    round_trip(&PS512, rsa_keys());
}

#[test]
fn ecdsa_round_trips() {
    round_trip(&ES256, p256_keys());
    round_trip(&ES384, p384_keys());
}

#[test]
fn eddsa_round_trip() {
    round_trip(&EdDSA, ed25519_keys());
}

#[test]
fn private_key_is_not_a_verification_key() {
    let keys = rsa_keys();
    let token = sign(&RS256, &claims(), &keys.signing).unwrap();

    let result = parser()
        .build()
        .parse::<MapClaims, _>(&token, &keys.signing);
    assert!(matches!(result, Err(Error::KeyTypeMismatch { .. })));
}

#[test]
fn structured_claims_round_trip() {
    let keys = p256_keys();
    let claims = RegisteredClaims {
        issuer: Some("https://issuer.example".to_string()),
        subject: Some("user-42".to_string()),
        audience: Some(Audience::from(vec!["api", "admin"])),
        expiration: Some(NumericDate::from(NOW + 60)),
        issued_at: Some(NumericDate::from(NOW)),
        ..Default::default()
    };
    let token = sign(&ES256, &claims, &keys.signing).unwrap();

    let parsed = parser()
        .audience("admin")
        .build()
        .parse::<RegisteredClaims, _>(&token, &keys.verification)
        .unwrap();
    assert_eq!(parsed.into_claims(), claims);
}

#[test]
fn custom_header_fields_survive() {
    let keys = hmac_keys();
    let mut header = Header::new("HS256").with_kid("2024-01");
    header.cty = Some("example".to_string());
    header
        .extra
        .insert("x-tenant".to_string(), serde_json::json!("acme"));

    let token = sign_with_header(&HS512, header, &claims(), &keys.signing).unwrap();
    let parsed = parser()
        .build()
        .parse::<MapClaims, _>(&token, &keys.verification)
        .unwrap();

    let header = parsed.header();
    assert_eq!(header.alg, "HS512");
    assert_eq!(header.key_id(), Some("2024-01"));
    assert_eq!(header.cty.as_deref(), Some("example"));
    assert_eq!(header.get("x-tenant"), Some(&serde_json::json!("acme")));
}

#[test]
fn public_key_imported_from_components() {
    use rsa::traits::PublicKeyParts;
    use rsa::{pkcs8::DecodePrivateKey, RsaPrivateKey};

    let keys = rsa_keys();
    let token = sign(&RS256, &claims(), &keys.signing).unwrap();

    let private = RsaPrivateKey::from_pkcs8_der(&rsa_pkcs8_der()).unwrap();
    let public = Key::rsa_public_components(
        &private.n().to_bytes_be(),
        &private.e().to_bytes_be(),
    )
    .unwrap();

    assert!(parser()
        .build()
        .parse::<MapClaims, _>(&token, &public)
        .is_ok());
}

#[test]
fn public_key_imported_from_spki() {
    use rsa::pkcs8::{DecodePrivateKey, EncodePublicKey};
    use rsa::RsaPrivateKey;

    let keys = rsa_keys();
    let token = sign(&PS256, &claims(), &keys.signing).unwrap();

    let private = RsaPrivateKey::from_pkcs8_der(&rsa_pkcs8_der()).unwrap();
    let spki = private.to_public_key().to_public_key_der().unwrap();
    let public = Key::rsa_public(spki.as_bytes()).unwrap();

    assert!(parser()
        .build()
        .parse::<MapClaims, _>(&token, &public)
        .is_ok());
}
