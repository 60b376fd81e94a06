//! RSASSA-PSS signing methods
//!
//! ring fixes the salt length to the digest length, matching RFC 7518 §3.5.

use super::rsa::{sign_rsa, verify_rsa};
use crate::algorithm::SigningMethod;
use crate::error::Result;
use crate::keys::Key;

use ring::signature;

/// PS256 algorithm (RSASSA-PSS with SHA-256 and MGF1)
#[derive(Debug, Clone, Copy, Default)]
pub struct PS256;

/// PS384 algorithm (RSASSA-PSS with SHA-384 and MGF1)
#[derive(Debug, Clone, Copy, Default)]
pub struct PS384;

/// PS512 algorithm (RSASSA-PSS with SHA-512 and MGF1)
#[derive(Debug, Clone, Copy, Default)]
pub struct PS512;

impl SigningMethod for PS256 {
    fn alg(&self) -> &str {
        "PS256"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "PS256",
            &signature::RSA_PSS_2048_8192_SHA256,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("PS256", &signature::RSA_PSS_SHA256, signing_input, key)
    }
}

impl SigningMethod for PS384 {
    fn alg(&self) -> &str {
        "PS384"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "PS384",
            &signature::RSA_PSS_2048_8192_SHA384,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("PS384", &signature::RSA_PSS_SHA384, signing_input, key)
    }
}

impl SigningMethod for PS512 {
    fn alg(&self) -> &str {
        "PS512"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "PS512",
            &signature::RSA_PSS_2048_8192_SHA512,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("PS512", &signature::RSA_PSS_SHA512, signing_input, key)
    }
}
