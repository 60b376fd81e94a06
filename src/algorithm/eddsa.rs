use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;

use ring::signature::{UnparsedPublicKey, ED25519};

const PUBLIC_KEY_LEN: usize = 32;
const SIGNATURE_LEN: usize = 64;

/// EdDSA algorithm over Ed25519
#[derive(Debug, Clone, Copy, Default)]
pub struct EdDSA;

impl SigningMethod for EdDSA {
    fn alg(&self) -> &str {
        "EdDSA"
    }

    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()> {
        let public = key.as_ed25519_public("EdDSA")?;
        if public.as_bytes().len() != PUBLIC_KEY_LEN {
            return Err(Error::KeyTypeMismatch {
                algorithm: "EdDSA".to_string(),
                expected: format!("{PUBLIC_KEY_LEN}-byte Ed25519 public key"),
                actual: format!("{}-byte key", public.as_bytes().len()),
            });
        }
        if signature.len() != SIGNATURE_LEN {
            return Err(Error::MalformedSignature {
                algorithm: "EdDSA".to_string(),
                expected: format!("{SIGNATURE_LEN} bytes"),
                found: signature.len(),
            });
        }

        UnparsedPublicKey::new(&ED25519, public.as_bytes())
            .verify(signing_input, signature)
            .map_err(|_| Error::SignatureInvalid)
    }

    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>> {
        let private = key.as_ed25519_private("EdDSA")?;
        Ok(private.pair().sign(signing_input).as_ref().to_vec())
    }
}
