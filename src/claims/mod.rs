//! JWT claims
//!
//! Two claim representations are supported:
//! - structured claims: a struct annotated with [`#[claims]`](crate::claims),
//!   which adds the registered claim fields and decodes with serde
//! - [`MapClaims`]: an ordered map for claim sets that are not known ahead of
//!   time
//!
//! Both expose the registered claims of
//! [RFC 7519 Section 4.1](https://datatracker.ietf.org/doc/html/rfc7519#section-4.1)
//! through [`StandardClaims`], which is all the validator needs.

mod map;
mod time;
mod value;

pub use map::MapClaims;
pub use time::{Audience, NumericDate};
pub use value::{ClaimValue, Number, NumberMode};

use crate::error::{ClaimError, Malformed, Result, Segment};
use jwtkit_derive::claims;
use serde::de::DeserializeOwned;

/// Read access to the registered claims
///
/// Accessors return `Ok(None)` for an absent claim and
/// [`ClaimError::InvalidType`] when a present claim has the wrong JSON type.
pub trait StandardClaims {
    /// Expiration Time (exp) - seconds since Unix epoch
    fn expiration(&self) -> std::result::Result<Option<NumericDate>, ClaimError>;
    /// Not Before (nbf) - the token MUST NOT be accepted before this time
    fn not_before(&self) -> std::result::Result<Option<NumericDate>, ClaimError>;
    /// Issued At (iat)
    fn issued_at(&self) -> std::result::Result<Option<NumericDate>, ClaimError>;
    /// Audience (aud) - intended recipients
    fn audience(&self) -> std::result::Result<Option<Audience>, ClaimError>;
    /// Issuer (iss)
    fn issuer(&self) -> std::result::Result<Option<&str>, ClaimError>;
    /// Subject (sub)
    fn subject(&self) -> std::result::Result<Option<&str>, ClaimError>;
    /// JWT ID (jti)
    fn jwt_id(&self) -> std::result::Result<Option<&str>, ClaimError>;
}

/// Marker for serde-backed claim structs, implemented by `#[claims]`
pub trait StructuredClaims: StandardClaims {}

/// Decode a verified payload into a claims type
pub trait FromPayload: Sized {
    fn from_payload(payload: &[u8], mode: NumberMode) -> Result<Self>;
}

/// Structured claims decode with serde; the number mode only applies to
/// [`ClaimValue`] and [`MapClaims`].
impl<T: DeserializeOwned + StructuredClaims> FromPayload for T {
    fn from_payload(payload: &[u8], _mode: NumberMode) -> Result<Self> {
        ensure_object(payload)?;
        serde_json::from_slice(payload).map_err(|e| {
            Malformed::Json {
                segment: Segment::Payload,
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// The payload must be a JSON object; serde would otherwise accept a
/// sequence for a struct.
pub(crate) fn ensure_object(payload: &[u8]) -> Result<()> {
    match payload.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(()),
        _ => Err(Malformed::Json {
            segment: Segment::Payload,
            reason: "expected a JSON object".to_string(),
        }
        .into()),
    }
}

/// The registered claims and nothing else
#[claims]
#[derive(PartialEq, Default)]
pub struct RegisteredClaims {}
