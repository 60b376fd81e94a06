//! Dynamically typed claim values
//!
//! [`ClaimValue`] is the value type of [`MapClaims`](super::MapClaims). Numbers
//! are decoded according to a [`NumberMode`]: `Float` converts them to the
//! nearest `f64`, `Decimal` keeps the literal text so large or very precise
//! values survive unchanged.

use serde::de::{self, Error as _, MapAccess, SeqAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::BTreeMap;

/// Nesting depth accepted by the decimal-preserving decoder
const MAX_DEPTH: usize = 128;

/// How JSON numbers in claims are represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    /// Nearest `f64`
    #[default]
    Float,
    /// Exact literal text
    Decimal,
}

/// A JSON number in one of the two representations
///
/// Two decimals are equal when their text is; any other pair compares by
/// numeric value, so `Decimal("60")` equals `Float(60.0)`.
#[derive(Debug, Clone)]
pub enum Number {
    Float(f64),
    Decimal(String),
}

impl Number {
    /// Numeric value, parsing decimal text when needed
    ///
    /// `None` for text that does not fit in a finite `f64`, such as `1e400`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Number::Float(value) => Some(*value),
            Number::Decimal(text) => text.parse().ok(),
        };
        value.filter(|v: &f64| v.is_finite())
    }

    /// Literal text, only available in decimal mode
    pub fn as_decimal(&self) -> Option<&str> {
        match self {
            Number::Decimal(text) => Some(text),
            Number::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Float(a), Number::Float(b)) => a == b,
            (Number::Decimal(a), Number::Decimal(b)) => a == b,
            _ => matches!((self.as_f64(), other.as_f64()), (Some(a), Some(b)) if a == b),
        }
    }
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Float(value) => write!(f, "{value}"),
            Number::Decimal(text) => f.write_str(text),
        }
    }
}

/// A claim value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ClaimValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<ClaimValue>),
    Object(BTreeMap<String, ClaimValue>),
}

impl ClaimValue {
    /// Decode JSON text using the given number mode
    pub fn from_json(json: &str, mode: NumberMode) -> serde_json::Result<Self> {
        match mode {
            NumberMode::Float => serde_json::from_str(json),
            NumberMode::Decimal => {
                let raw: &RawValue = serde_json::from_str(json)?;
                from_raw(raw, 0)
            }
        }
    }

    /// Name of the JSON type, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ClaimValue::Null => "null",
            ClaimValue::Bool(_) => "boolean",
            ClaimValue::Number(_) => "number",
            ClaimValue::String(_) => "string",
            ClaimValue::Array(_) => "array",
            ClaimValue::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ClaimValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            ClaimValue::Number(number) => Some(number),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().and_then(Number::as_f64)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ClaimValue]> {
        match self {
            ClaimValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, ClaimValue>> {
        match self {
            ClaimValue::Object(members) => Some(members),
            _ => None,
        }
    }
}

fn from_raw(raw: &RawValue, depth: usize) -> serde_json::Result<ClaimValue> {
    if depth > MAX_DEPTH {
        return Err(serde_json::Error::custom("claims nested too deeply"));
    }

    let text = raw.get().trim();
    let value = match text.as_bytes().first() {
        Some(b'{') => {
            let members: BTreeMap<String, &RawValue> = serde_json::from_str(text)?;
            let mut object = BTreeMap::new();
            for (name, member) in members {
                object.insert(name, from_raw(member, depth + 1)?);
            }
            ClaimValue::Object(object)
        }
        Some(b'[') => {
            let items: Vec<&RawValue> = serde_json::from_str(text)?;
            ClaimValue::Array(
                items
                    .into_iter()
                    .map(|item| from_raw(item, depth + 1))
                    .collect::<serde_json::Result<_>>()?,
            )
        }
        Some(b'"') => ClaimValue::String(serde_json::from_str(text)?),
        Some(b't' | b'f') => ClaimValue::Bool(serde_json::from_str(text)?),
        Some(b'n') => ClaimValue::Null,
        _ => ClaimValue::Number(Number::Decimal(text.to_string())),
    };
    Ok(value)
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Number(Number::Float(value))
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Number(Number::Float(value as f64))
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(values: Vec<T>) -> Self {
        ClaimValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Number::Float(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*value as i64)
            }
            Number::Float(value) => serializer.serialize_f64(*value),
            Number::Decimal(text) => match RawValue::from_string(text.clone()) {
                Ok(raw) => raw.serialize(serializer),
                Err(_) => serializer.serialize_str(text),
            },
        }
    }
}

impl Serialize for ClaimValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClaimValue::Null => serializer.serialize_unit(),
            ClaimValue::Bool(value) => serializer.serialize_bool(*value),
            ClaimValue::Number(number) => number.serialize(serializer),
            ClaimValue::String(value) => serializer.serialize_str(value),
            ClaimValue::Array(values) => values.serialize(serializer),
            ClaimValue::Object(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (name, value) in members {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

/// Generic decoding always uses [`NumberMode::Float`]
impl<'de> Deserialize<'de> for ClaimValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClaimValueVisitor;

        impl<'de> Visitor<'de> for ClaimValueVisitor {
            type Value = ClaimValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("any JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<ClaimValue, D::Error> {
                ClaimValue::deserialize(d)
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Bool(value))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Number(Number::Float(value as f64)))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Number(Number::Float(value as f64)))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<ClaimValue, E> {
                Ok(ClaimValue::Number(Number::Float(value)))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ClaimValue, E> {
                Ok(ClaimValue::String(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<ClaimValue, E> {
                Ok(ClaimValue::String(value))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<ClaimValue, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                Ok(ClaimValue::Array(values))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ClaimValue, A::Error> {
                let mut members = BTreeMap::new();
                while let Some((name, value)) = map.next_entry::<String, ClaimValue>()? {
                    members.insert(name, value);
                }
                Ok(ClaimValue::Object(members))
            }
        }

        deserializer.deserialize_any(ClaimValueVisitor)
    }
}
