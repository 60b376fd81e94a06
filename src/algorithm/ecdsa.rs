use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, Key};

use ring::rand::SystemRandom;
use ring::signature::{self, UnparsedPublicKey, VerificationAlgorithm};

/// ES256 algorithm (ECDSA with P-256 and SHA-256)
#[derive(Debug, Clone, Copy, Default)]
pub struct ES256;

/// ES384 algorithm (ECDSA with P-384 and SHA-384)
#[derive(Debug, Clone, Copy, Default)]
pub struct ES384;

impl SigningMethod for ES256 {
    fn alg(&self) -> &str {
        "ES256"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_ecdsa(
            "ES256",
            EcdsaCurve::P256,
            &signature::ECDSA_P256_SHA256_FIXED,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa("ES256", EcdsaCurve::P256, signing_input, key)
    }
}

impl SigningMethod for ES384 {
    fn alg(&self) -> &str {
        "ES384"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_ecdsa(
            "ES384",
            EcdsaCurve::P384,
            &signature::ECDSA_P384_SHA384_FIXED,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_ecdsa("ES384", EcdsaCurve::P384, signing_input, key)
    }
}

fn curve_mismatch(alg: &str, expected: EcdsaCurve, actual: String) -> Error {
    Error::KeyTypeMismatch {
        algorithm: alg.to_string(),
        expected: format!("ECDSA {expected:?}"),
        actual,
    }
}

/// Fixed-width `R || S` verification
fn verify_ecdsa(
    alg: &str,
    curve: EcdsaCurve,
    params: &'static dyn VerificationAlgorithm,
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
) -> Result<()> {
    let ecdsa_key = key.as_ecdsa_public(alg)?;

    if ecdsa_key.curve() != curve {
        return Err(curve_mismatch(
            alg,
            curve,
            format!("ECDSA {:?}", ecdsa_key.curve()),
        ));
    }
    if ecdsa_key.as_bytes().len() != curve.point_len() {
        return Err(curve_mismatch(
            alg,
            curve,
            format!("{}-byte point", ecdsa_key.as_bytes().len()),
        ));
    }
    if signature.len() != curve.signature_len() {
        return Err(Error::MalformedSignature {
            algorithm: alg.to_string(),
            expected: format!("{} bytes (R || S)", curve.signature_len()),
            found: signature.len(),
        });
    }

    UnparsedPublicKey::new(params, ecdsa_key.as_bytes())
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}

fn sign_ecdsa(alg: &str, curve: EcdsaCurve, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
    let ecdsa_key = key.as_ecdsa_private(alg)?;
    if ecdsa_key.curve() != curve {
        return Err(curve_mismatch(
            alg,
            curve,
            format!("ECDSA {:?}", ecdsa_key.curve()),
        ));
    }

    let signature = ecdsa_key
        .pair()
        .sign(&SystemRandom::new(), signing_input)
        .map_err(|_| Error::Signing(format!("{alg} signing failed")))?;
    Ok(signature.as_ref().to_vec())
}
