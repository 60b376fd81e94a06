//! Errors for jwtkit
//!
//! Every stage of the pipeline reports a distinct variant so callers can tell a
//! forged token (`SignatureInvalid`) from a stale one (`ClaimsInvalid`) or a
//! configuration bug (`KeyTypeMismatch`).

use thiserror::Error;

/// jwtkit errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Malformed token: {0}")]
    MalformedToken(Malformed),

    // ============================================================================
    // Algorithm Errors
    // ============================================================================
    #[error("Algorithm '{found}' not allowed. Allowed: {allowed:?}")]
    UnauthorizedAlgorithm { found: String, allowed: Vec<String> },

    #[error("Signing method '{0}' is not registered")]
    UnknownMethod(String),

    // ============================================================================
    // Key Errors
    // ============================================================================
    #[error("Key type mismatch for algorithm '{algorithm}': expected {expected}, got {actual}")]
    KeyTypeMismatch {
        algorithm: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Verification key unavailable: {0}")]
    KeyUnavailable(String),

    // ============================================================================
    // Signature Errors
    // ============================================================================
    #[error("Signature verification failed")]
    SignatureInvalid,

    #[error("Malformed signature for '{algorithm}': expected {expected}, found {found} bytes")]
    MalformedSignature {
        algorithm: String,
        expected: String,
        found: usize,
    },

    // ============================================================================
    // Claims Errors
    // ============================================================================
    #[error("Token claims invalid: {0}")]
    ClaimsInvalid(ClaimErrors),

    // ============================================================================
    // Signing / Registry Errors
    // ============================================================================
    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Signing method registry: {0}")]
    Registry(String),
}

/// Structural reasons a token string could not be decoded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("expected three segments separated by '.', found {0}")]
    SegmentCount(usize),

    #[error("{segment} segment is not valid base64url: {reason}")]
    Base64 {
        segment: Segment,
        reason: String,
    },

    #[error("{segment} segment is not a valid JSON object: {reason}")]
    Json {
        segment: Segment,
        reason: String,
    },

    #[error("header is missing the 'alg' member")]
    MissingAlgorithm,

    #[error("token too large: {size} bytes (maximum: {max} bytes)")]
    TooLarge { size: usize, max: usize },
}

/// Segment of the compact serialization an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Header,
    Payload,
    Signature,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Segment::Header => "header",
            Segment::Payload => "payload",
            Segment::Signature => "signature",
        })
    }
}

/// A single failed claim check
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClaimError {
    #[error("token expired at {expired_at} (now: {now}, leeway: {leeway}s)")]
    Expired { expired_at: f64, now: f64, leeway: f64 },

    #[error("token not valid until {not_before} (now: {now}, leeway: {leeway}s)")]
    NotYetValid { not_before: f64, now: f64, leeway: f64 },

    #[error("token used before issued at {issued_at} (now: {now}, leeway: {leeway}s)")]
    UsedBeforeIssued { issued_at: f64, now: f64, leeway: f64 },

    #[error("audience mismatch: expected '{expected}', found {found:?}")]
    AudienceMismatch {
        expected: String,
        found: Vec<String>,
    },

    #[error("issuer mismatch: expected '{expected}', found {found:?}")]
    IssuerMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("subject mismatch: expected '{expected}', found {found:?}")]
    SubjectMismatch {
        expected: String,
        found: Option<String>,
    },

    #[error("required claim '{0}' is missing")]
    MissingClaim(String),

    #[error("claim '{claim}' has invalid type: expected {expected}")]
    InvalidType {
        claim: String,
        expected: &'static str,
    },
}

/// Every claim check that failed in one validation pass
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimErrors(Vec<ClaimError>);

impl ClaimErrors {
    pub(crate) fn new(errors: Vec<ClaimError>) -> Self {
        Self(errors)
    }

    /// All failures, in the order they were checked
    pub fn as_slice(&self) -> &[ClaimError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClaimError> {
        self.0.iter()
    }

    /// Whether any failure matches `predicate`
    pub fn contains(&self, predicate: impl Fn(&ClaimError) -> bool) -> bool {
        self.0.iter().any(predicate)
    }
}

impl std::fmt::Display for ClaimErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ClaimErrors {}

impl<'a> IntoIterator for &'a ClaimErrors {
    type Item = &'a ClaimError;
    type IntoIter = std::slice::Iter<'a, ClaimError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Malformed> for Error {
    fn from(reason: Malformed) -> Self {
        Error::MalformedToken(reason)
    }
}

impl From<ClaimErrors> for Error {
    fn from(errors: ClaimErrors) -> Self {
        Error::ClaimsInvalid(errors)
    }
}

/// Result type alias for jwtkit operations
pub type Result<T> = std::result::Result<T, Error>;
