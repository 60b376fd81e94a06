use crate::algorithm::SigningMethod;
use crate::error::{Error, Result};
use crate::keys::Key;

/// The unsecured `none` method
///
/// Verification succeeds only for an empty signature, whatever key is
/// supplied. Parsers refuse this method unless it is explicitly allow-listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoneMethod;

impl SigningMethod for NoneMethod {
    fn alg(&self) -> &str {
        "none"
    }

    fn verify(&self, _signing_input: &[u8], signature: &[u8], _key: &Key) -> Result<()> {
        if signature.is_empty() {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }

    fn sign(&self, _signing_input: &[u8], _key: &Key) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}
