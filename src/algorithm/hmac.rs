use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::{Key, SymmetricKey};

use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

/// HS256 algorithm (HMAC with SHA-256)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS256;

/// HS384 algorithm (HMAC with SHA-384)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS384;

/// HS512 algorithm (HMAC with SHA-512)
#[derive(Debug, Clone, Copy, Default)]
pub struct HS512;

#[derive(Clone, Copy)]
enum Digest {
    Sha256,
    Sha384,
    Sha512,
}

macro_rules! mac_with {
    ($hash:ty, $secret:expr, $input:expr) => {{
        let mut mac = Hmac::<$hash>::new_from_slice($secret)
            .map_err(|e| Error::InvalidKey(format!("HMAC secret: {e}")))?;
        mac.update($input);
        mac.finalize().into_bytes().to_vec()
    }};
}

fn secret<'k>(alg: &str, key: &'k Key) -> Result<&'k SymmetricKey> {
    let secret = key.as_symmetric(alg)?;
    if secret.as_bytes().is_empty() {
        return Err(Error::InvalidKey(format!("{alg} secret is empty")));
    }
    Ok(secret)
}

fn compute(alg: &str, digest: Digest, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
    let secret = secret(alg, key)?.as_bytes();
    let tag = match digest {
        Digest::Sha256 => mac_with!(Sha256, secret, signing_input),
        Digest::Sha384 => mac_with!(Sha384, secret, signing_input),
        Digest::Sha512 => mac_with!(Sha512, secret, signing_input),
    };
    Ok(tag)
}

/// Recompute the MAC and compare in constant time
fn verify_hmac(
    alg: &str,
    digest: Digest,
    signing_input: &[u8],
    signature: &[u8],
    key: &Key,
) -> Result<()> {
    let expected = compute(alg, digest, signing_input, key)?;

    if signature.len() != expected.len() {
        return Err(Error::SignatureInvalid);
    }

    if constant_time_eq(signature, &expected) {
        Ok(())
    } else {
        Err(Error::SignatureInvalid)
    }
}

impl SigningMethod for HS256 {
    fn alg(&self) -> &str {
        "HS256"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_hmac("HS256", Digest::Sha256, signing_input, signature, key)
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute("HS256", Digest::Sha256, signing_input, key)
    }
}

impl SigningMethod for HS384 {
    fn alg(&self) -> &str {
        "HS384"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_hmac("HS384", Digest::Sha384, signing_input, signature, key)
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute("HS384", Digest::Sha384, signing_input, key)
    }
}

impl SigningMethod for HS512 {
    fn alg(&self) -> &str {
        "HS512"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        verify_hmac("HS512", Digest::Sha512, signing_input, signature, key)
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        compute("HS512", Digest::Sha512, signing_input, key)
    }
}
