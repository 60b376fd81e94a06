use crate::error::Result;
use crate::keys::Key;

/// Core trait that every JWT signing method implements
///
/// A method is identified by the exact `alg` string it answers to and owns
/// both directions of the signature operation. Implementations are stateless,
/// so one instance is shared by every thread through the registry.
pub trait SigningMethod: Send + Sync {
    /// The algorithm identifier (e.g., "HS256", "RS256", "EdDSA")
    fn alg(&self) -> &str;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The exact bytes that were signed (`header.payload`)
    /// * `signature` - The decoded signature bytes
    /// * `key` - The key to use for verification
    fn verify(&self, signing_input: &[u8], signature: &[u8], key: &Key) -> Result<()>;

    /// Produce a signature over `signing_input`
    fn sign(&self, signing_input: &[u8], key: &Key) -> Result<Vec<u8>>;
}

impl std::fmt::Debug for dyn SigningMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningMethod").field(&self.alg()).finish()
    }
}
