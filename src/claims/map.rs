use super::{Audience, ClaimValue, FromPayload, NumberMode, NumericDate, StandardClaims};
use crate::error::{ClaimError, Malformed, Result, Segment};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Claims held as an ordered map of arbitrary JSON values
///
/// Use this when the claim set is not known ahead of time. Registered claims
/// are read through [`StandardClaims`]; everything else through the typed
/// accessors.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapClaims(BTreeMap<String, ClaimValue>);

impl MapClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim, returning the previous value
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<ClaimValue>,
    ) -> Option<ClaimValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ClaimValue> {
        self.0.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ClaimValue> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(ClaimValue::as_str)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(ClaimValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(ClaimValue::as_bool)
    }

    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, ClaimValue> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, ClaimValue> {
        self.0
    }

    fn date(&self, name: &str) -> std::result::Result<Option<NumericDate>, ClaimError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => value
                .as_f64()
                .map(|seconds| Some(NumericDate::from_seconds(seconds)))
                .ok_or_else(|| invalid_type(name, "number")),
        }
    }

    fn string(&self, name: &str) -> std::result::Result<Option<&str>, ClaimError> {
        match self.get(name) {
            None => Ok(None),
            Some(ClaimValue::String(value)) => Ok(Some(value)),
            Some(_) => Err(invalid_type(name, "string")),
        }
    }
}

fn invalid_type(claim: &str, expected: &'static str) -> ClaimError {
    ClaimError::InvalidType {
        claim: claim.to_string(),
        expected,
    }
}

impl StandardClaims for MapClaims {
    fn expiration(&self) -> std::result::Result<Option<NumericDate>, ClaimError> {
        self.date("exp")
    }

    fn not_before(&self) -> std::result::Result<Option<NumericDate>, ClaimError> {
        self.date("nbf")
    }

    fn issued_at(&self) -> std::result::Result<Option<NumericDate>, ClaimError> {
        self.date("iat")
    }

    fn audience(&self) -> std::result::Result<Option<Audience>, ClaimError> {
        match self.get("aud") {
            None => Ok(None),
            Some(ClaimValue::String(recipient)) => Ok(Some(Audience::from(recipient.as_str()))),
            Some(ClaimValue::Array(values)) => values
                .iter()
                .map(|value| value.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(|recipients| Some(Audience::new(recipients)))
                .ok_or_else(|| invalid_type("aud", "string or array of strings")),
            Some(_) => Err(invalid_type("aud", "string or array of strings")),
        }
    }

    fn issuer(&self) -> std::result::Result<Option<&str>, ClaimError> {
        self.string("iss")
    }

    fn subject(&self) -> std::result::Result<Option<&str>, ClaimError> {
        self.string("sub")
    }

    fn jwt_id(&self) -> std::result::Result<Option<&str>, ClaimError> {
        self.string("jti")
    }
}

impl FromPayload for MapClaims {
    fn from_payload(payload: &[u8], mode: NumberMode) -> Result<Self> {
        super::ensure_object(payload)?;

        let text = std::str::from_utf8(payload).map_err(|e| Malformed::Json {
            segment: Segment::Payload,
            reason: e.to_string(),
        })?;
        match ClaimValue::from_json(text, mode) {
            Ok(ClaimValue::Object(members)) => Ok(Self(members)),
            Ok(other) => Err(Malformed::Json {
                segment: Segment::Payload,
                reason: format!("expected an object, found {}", other.type_name()),
            }
            .into()),
            Err(e) => Err(Malformed::Json {
                segment: Segment::Payload,
                reason: e.to_string(),
            }
            .into()),
        }
    }
}

impl<K: Into<String>, V: Into<ClaimValue>> FromIterator<(K, V)> for MapClaims {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}
