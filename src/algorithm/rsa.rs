use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;

use ring::rand::SystemRandom;
use ring::signature::{self, RsaEncoding, UnparsedPublicKey, VerificationAlgorithm};

/// Smallest RSA modulus accepted for signing or verification
pub const MIN_MODULUS_BITS: usize = 2048;

/// Largest RSA modulus accepted for signing or verification
pub const MAX_MODULUS_BITS: usize = 8192;

/// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
#[derive(Debug, Clone, Copy, Default)]
pub struct RS256;

/// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
#[derive(Debug, Clone, Copy, Default)]
pub struct RS384;

/// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
#[derive(Debug, Clone, Copy, Default)]
pub struct RS512;

impl SigningMethod for RS256 {
    fn alg(&self) -> &str {
        "RS256"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "RS256",
            &signature::RSA_PKCS1_2048_8192_SHA256,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("RS256", &signature::RSA_PKCS1_SHA256, signing_input, key)
    }
}

impl SigningMethod for RS384 {
    fn alg(&self) -> &str {
        "RS384"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "RS384",
            &signature::RSA_PKCS1_2048_8192_SHA384,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("RS384", &signature::RSA_PKCS1_SHA384, signing_input, key)
    }
}

impl SigningMethod for RS512 {
    fn alg(&self) -> &str {
        "RS512"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_rsa(
            "RS512",
            &signature::RSA_PKCS1_2048_8192_SHA512,
            signing_input,
            signature,
            key,
        )
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        sign_rsa("RS512", &signature::RSA_PKCS1_SHA512, signing_input, key)
    }
}

fn check_modulus(alg: &str, bits: usize, key: &Key) -> Result<()> {
    if (MIN_MODULUS_BITS..=MAX_MODULUS_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(Error::KeyTypeMismatch {
            algorithm: alg.to_string(),
            expected: format!("RSA key of {MIN_MODULUS_BITS}-{MAX_MODULUS_BITS} bits"),
            actual: format!("{} of {bits} bits", key.key_type()),
        })
    }
}

/// Shared RSA verification for the PKCS#1 v1.5 and PSS families
///
/// Key size and signature length are checked before ring runs, so an
/// undersized key reports `KeyTypeMismatch` rather than a bad signature.
pub(super) fn verify_rsa(
    alg: &str,
    params: &'static dyn VerificationAlgorithm,
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
) -> Result<()> {
    let rsa_key = key.as_rsa_public(alg)?;
    check_modulus(alg, rsa_key.modulus_bits(), key)?;

    if signature.len() != rsa_key.modulus_len() {
        return Err(Error::MalformedSignature {
            algorithm: alg.to_string(),
            expected: format!("{} bytes", rsa_key.modulus_len()),
            found: signature.len(),
        });
    }

    UnparsedPublicKey::new(params, rsa_key.as_der())
        .verify(signing_input, signature)
        .map_err(|_| Error::SignatureInvalid)
}

/// Shared RSA signing for the PKCS#1 v1.5 and PSS families
pub(super) fn sign_rsa(
    alg: &str,
    padding: &'static dyn RsaEncoding,
    signing_input: &[u8],
    key: &Key,
) -> Result<Vec<u8>> {
    let rsa_key = key.as_rsa_private(alg)?;
    check_modulus(alg, rsa_key.modulus_len() * 8, key)?;

    let mut signature = vec![0u8; rsa_key.modulus_len()];
    rsa_key
        .pair()
        .sign(padding, &SystemRandom::new(), signing_input, &mut signature)
        .map_err(|_| Error::Signing(format!("{alg} signing failed")))?;
    Ok(signature)
}

#[cfg(test)]
pub(crate) mod test_keys {
    use crate::keys::Key;
    use once_cell::sync::Lazy;

    /// 2048-bit PKCS#8 key generated once per test binary
    pub static RSA_PKCS8: Lazy<Vec<u8>> = Lazy::new(|| {
        use rsa::{pkcs8::EncodePrivateKey, RsaPrivateKey};

        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate key");
        private_key
            .to_pkcs8_der()
            .expect("Failed to serialize to PKCS#8")
            .as_bytes()
            .to_vec()
    });

    pub fn rsa_key_pair() -> (Key, Key) {
        let private = Key::rsa_private_pkcs8(&RSA_PKCS8).expect("Failed to load RSA key");
        let public = private.to_verification_key().expect("Failed to derive public key");
        (private, public)
    }
}
