//! Key types for JWT signing and verification
//!
//! This module provides a type-safe abstraction over the key shapes each
//! algorithm family needs:
//! - Symmetric secrets (HMAC)
//! - Public keys (RSA, ECDSA, Ed25519) for verification
//! - Private key pairs (RSA, ECDSA, Ed25519) for signing
//!
//! Every signing method asks for exactly one shape and rejects the others with
//! [`Error::KeyTypeMismatch`], so an RSA public key can never be mistaken for
//! an HMAC secret.

use crate::error::{Error, Result};
use crate::utils::der;

use ring::rand::SystemRandom;
use ring::signature::{
    EcdsaKeyPair, Ed25519KeyPair, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_FIXED_SIGNING,
    ECDSA_P384_SHA384_FIXED_SIGNING,
};
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A key that can be used for JWT signing or verification
#[derive(Debug, Clone)]
pub enum Key {
    /// Shared secret for HMAC algorithms
    Symmetric(SymmetricKey),

    /// Public key for verifying asymmetric signatures
    Public(PublicKey),

    /// Private key pair for producing asymmetric signatures
    Private(PrivateKey),
}

impl Key {
    /// Create a symmetric key from bytes
    pub fn symmetric(secret: impl Into<Vec<u8>>) -> Self {
        Key::Symmetric(SymmetricKey::new(secret.into()))
    }

    /// Create an RSA public key from PKCS#1 `RSAPublicKey` or `SubjectPublicKeyInfo` DER
    pub fn rsa_public(der: impl AsRef<[u8]>) -> Result<Self> {
        let parts = der::rsa_public_key(der.as_ref())?;
        Ok(Key::Public(PublicKey::Rsa(RsaPublicKey {
            der: parts.pkcs1_der.into(),
            modulus_bits: parts.modulus_bits,
        })))
    }

    /// Create an RSA public key from big-endian modulus and exponent bytes
    pub fn rsa_public_components(n: &[u8], e: &[u8]) -> Result<Self> {
        Self::rsa_public(der::rsa_public_key_from_components(n, e)?)
    }

    /// Create an ECDSA public key from an uncompressed SEC1 point or `SubjectPublicKeyInfo` DER
    pub fn ecdsa_public(point_or_der: impl AsRef<[u8]>, curve: EcdsaCurve) -> Result<Self> {
        let point = der::ec_public_point(point_or_der.as_ref())?;
        Ok(Key::Public(PublicKey::Ecdsa(EcdsaPublicKey {
            point: point.into(),
            curve,
        })))
    }

    /// Create an ECDSA public key from big-endian affine coordinates
    pub fn ecdsa_public_coordinates(x: &[u8], y: &[u8], curve: EcdsaCurve) -> Result<Self> {
        let point = der::ec_point_from_coordinates(x, y, curve)?;
        Ok(Key::Public(PublicKey::Ecdsa(EcdsaPublicKey {
            point: point.into(),
            curve,
        })))
    }

    /// Create an Ed25519 public key from its raw 32-byte encoding
    pub fn ed25519_public(bytes: impl Into<Vec<u8>>) -> Self {
        Key::Public(PublicKey::Ed25519(Ed25519PublicKey {
            bytes: bytes.into().into(),
        }))
    }

    /// Load an RSA private key from PKCS#8 DER
    pub fn rsa_private_pkcs8(der: &[u8]) -> Result<Self> {
        let pair = RsaKeyPair::from_pkcs8(der)
            .map_err(|e| Error::InvalidKey(format!("RSA PKCS#8: {e}")))?;
        Ok(Key::Private(PrivateKey::Rsa(RsaPrivateKey(Arc::new(pair)))))
    }

    /// Load an RSA private key from PKCS#1 `RSAPrivateKey` DER
    pub fn rsa_private_pkcs1(der: &[u8]) -> Result<Self> {
        let pair =
            RsaKeyPair::from_der(der).map_err(|e| Error::InvalidKey(format!("RSA PKCS#1: {e}")))?;
        Ok(Key::Private(PrivateKey::Rsa(RsaPrivateKey(Arc::new(pair)))))
    }

    /// Load an ECDSA private key from PKCS#8 DER
    pub fn ecdsa_private_pkcs8(der: &[u8], curve: EcdsaCurve) -> Result<Self> {
        let alg = match curve {
            EcdsaCurve::P256 => &ECDSA_P256_SHA256_FIXED_SIGNING,
            EcdsaCurve::P384 => &ECDSA_P384_SHA384_FIXED_SIGNING,
        };
        let pair = EcdsaKeyPair::from_pkcs8(alg, der, &SystemRandom::new())
            .map_err(|e| Error::InvalidKey(format!("ECDSA {curve:?} PKCS#8: {e}")))?;
        Ok(Key::Private(PrivateKey::Ecdsa(EcdsaPrivateKey {
            pair: Arc::new(pair),
            curve,
        })))
    }

    /// Load an Ed25519 private key from PKCS#8 DER
    pub fn ed25519_private_pkcs8(der: &[u8]) -> Result<Self> {
        let pair = Ed25519KeyPair::from_pkcs8_maybe_unchecked(der)
            .map_err(|e| Error::InvalidKey(format!("Ed25519 PKCS#8: {e}")))?;
        Ok(Key::Private(PrivateKey::Ed25519(Ed25519PrivateKey(Arc::new(
            pair,
        )))))
    }

    /// Derive the verification key matching this key
    ///
    /// Symmetric and public keys are returned unchanged; private key pairs
    /// yield their public half.
    pub fn to_verification_key(&self) -> Result<Key> {
        match self {
            Key::Symmetric(_) | Key::Public(_) => Ok(self.clone()),
            Key::Private(PrivateKey::Rsa(key)) => Key::rsa_public(key.0.public().as_ref()),
            Key::Private(PrivateKey::Ecdsa(key)) => {
                Key::ecdsa_public(key.pair.public_key().as_ref(), key.curve)
            }
            Key::Private(PrivateKey::Ed25519(key)) => {
                Ok(Key::ed25519_public(key.0.public_key().as_ref()))
            }
        }
    }

    /// Get key type name for error messages
    pub fn key_type(&self) -> &'static str {
        match self {
            Key::Symmetric(_) => "Symmetric",
            Key::Public(PublicKey::Rsa(_)) => "RSA public",
            Key::Public(PublicKey::Ecdsa(_)) => "ECDSA public",
            Key::Public(PublicKey::Ed25519(_)) => "Ed25519 public",
            Key::Private(PrivateKey::Rsa(_)) => "RSA private",
            Key::Private(PrivateKey::Ecdsa(_)) => "ECDSA private",
            Key::Private(PrivateKey::Ed25519(_)) => "Ed25519 private",
        }
    }

    fn mismatch(&self, algorithm: &str, expected: &str) -> Error {
        Error::KeyTypeMismatch {
            algorithm: algorithm.to_string(),
            expected: expected.to_string(),
            actual: self.key_type().to_string(),
        }
    }

    /// Get as symmetric key or return error
    pub fn as_symmetric(&self, algorithm: &str) -> Result<&SymmetricKey> {
        match self {
            Key::Symmetric(key) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Symmetric")),
        }
    }

    /// Get as RSA public key or return error
    pub fn as_rsa_public(&self, algorithm: &str) -> Result<&RsaPublicKey> {
        match self {
            Key::Public(PublicKey::Rsa(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "RSA public")),
        }
    }

    /// Get as RSA private key or return error
    pub fn as_rsa_private(&self, algorithm: &str) -> Result<&RsaPrivateKey> {
        match self {
            Key::Private(PrivateKey::Rsa(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "RSA private")),
        }
    }

    /// Get as ECDSA public key or return error
    pub fn as_ecdsa_public(&self, algorithm: &str) -> Result<&EcdsaPublicKey> {
        match self {
            Key::Public(PublicKey::Ecdsa(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "ECDSA public")),
        }
    }

    /// Get as ECDSA private key or return error
    pub fn as_ecdsa_private(&self, algorithm: &str) -> Result<&EcdsaPrivateKey> {
        match self {
            Key::Private(PrivateKey::Ecdsa(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "ECDSA private")),
        }
    }

    /// Get as Ed25519 public key or return error
    pub fn as_ed25519_public(&self, algorithm: &str) -> Result<&Ed25519PublicKey> {
        match self {
            Key::Public(PublicKey::Ed25519(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Ed25519 public")),
        }
    }

    /// Get as Ed25519 private key or return error
    pub fn as_ed25519_private(&self, algorithm: &str) -> Result<&Ed25519PrivateKey> {
        match self {
            Key::Private(PrivateKey::Ed25519(key)) => Ok(key),
            _ => Err(self.mismatch(algorithm, "Ed25519 private")),
        }
    }
}

/// Symmetric key for HMAC algorithms
///
/// The secret is wiped from memory when the key is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    secret: Vec<u8>,
}

impl SymmetricKey {
    /// Create a new symmetric key
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }

    /// Get the secret bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("len", &self.secret.len())
            .finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for SymmetricKey {
    fn from(secret: Vec<u8>) -> Self {
        Self::new(secret)
    }
}

impl From<&[u8]> for SymmetricKey {
    fn from(secret: &[u8]) -> Self {
        Self::new(secret.to_vec())
    }
}

impl From<String> for SymmetricKey {
    fn from(secret: String) -> Self {
        Self::new(secret.into_bytes())
    }
}

impl From<&str> for SymmetricKey {
    fn from(secret: &str) -> Self {
        Self::new(secret.as_bytes().to_vec())
    }
}

/// Public key for asymmetric algorithms
#[derive(Debug, Clone)]
pub enum PublicKey {
    Rsa(RsaPublicKey),
    Ecdsa(EcdsaPublicKey),
    Ed25519(Ed25519PublicKey),
}

/// Private key pair for asymmetric algorithms
#[derive(Clone)]
pub enum PrivateKey {
    Rsa(RsaPrivateKey),
    Ecdsa(EcdsaPrivateKey),
    Ed25519(Ed25519PrivateKey),
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrivateKey::Rsa(key) => f
                .debug_struct("RsaPrivateKey")
                .field("modulus_bits", &(key.modulus_len() * 8))
                .finish_non_exhaustive(),
            PrivateKey::Ecdsa(key) => f
                .debug_struct("EcdsaPrivateKey")
                .field("curve", &key.curve)
                .finish_non_exhaustive(),
            PrivateKey::Ed25519(_) => f.debug_struct("Ed25519PrivateKey").finish_non_exhaustive(),
        }
    }
}

/// RSA public key (PKCS#1 `RSAPublicKey` DER)
#[derive(Debug, Clone)]
pub struct RsaPublicKey {
    der: Arc<[u8]>,
    modulus_bits: usize,
}

impl RsaPublicKey {
    /// Get the PKCS#1 DER-encoded key bytes
    pub fn as_der(&self) -> &[u8] {
        &self.der
    }

    /// Size of the modulus in bits
    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Size of a signature produced by this key, in bytes
    pub fn modulus_len(&self) -> usize {
        self.modulus_bits.div_ceil(8)
    }
}

/// RSA private key pair
#[derive(Clone)]
pub struct RsaPrivateKey(Arc<RsaKeyPair>);

impl RsaPrivateKey {
    pub(crate) fn pair(&self) -> &RsaKeyPair {
        &self.0
    }

    /// Size of a signature produced by this key, in bytes
    pub fn modulus_len(&self) -> usize {
        self.0.public().modulus_len()
    }
}

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
}

impl EcdsaCurve {
    /// Byte length of one affine coordinate (and of R or S)
    pub const fn coordinate_len(self) -> usize {
        match self {
            EcdsaCurve::P256 => 32,
            EcdsaCurve::P384 => 48,
        }
    }

    /// Byte length of an uncompressed SEC1 point
    pub const fn point_len(self) -> usize {
        1 + 2 * self.coordinate_len()
    }

    /// Byte length of a fixed-width `R || S` signature
    pub const fn signature_len(self) -> usize {
        2 * self.coordinate_len()
    }
}

/// ECDSA public key (uncompressed SEC1 point)
#[derive(Debug, Clone)]
pub struct EcdsaPublicKey {
    point: Arc<[u8]>,
    curve: EcdsaCurve,
}

impl EcdsaPublicKey {
    /// Get the uncompressed point bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.point
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}

/// ECDSA private key pair
#[derive(Clone)]
pub struct EcdsaPrivateKey {
    pair: Arc<EcdsaKeyPair>,
    curve: EcdsaCurve,
}

impl EcdsaPrivateKey {
    pub(crate) fn pair(&self) -> &EcdsaKeyPair {
        &self.pair
    }

    /// Get the curve
    pub fn curve(&self) -> EcdsaCurve {
        self.curve
    }
}

/// Ed25519 public key (raw 32 bytes)
#[derive(Debug, Clone)]
pub struct Ed25519PublicKey {
    bytes: Arc<[u8]>,
}

impl Ed25519PublicKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Ed25519 private key pair
#[derive(Clone)]
pub struct Ed25519PrivateKey(Arc<Ed25519KeyPair>);

impl Ed25519PrivateKey {
    pub(crate) fn pair(&self) -> &Ed25519KeyPair {
        &self.0
    }
}
