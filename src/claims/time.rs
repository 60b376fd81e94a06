use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch, possibly fractional
///
/// Integral values serialize as JSON integers; any JSON number deserializes.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct NumericDate(f64);

impl NumericDate {
    pub const fn from_seconds(seconds: f64) -> Self {
        Self(seconds)
    }

    pub const fn as_seconds(self) -> f64 {
        self.0
    }

    /// Convert a `SystemTime`, keeping sub-second precision
    pub fn from_system_time(time: SystemTime) -> Self {
        let seconds = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => after.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        };
        Self(seconds)
    }

    /// Shift forward by `duration`
    pub fn add(self, duration: Duration) -> Self {
        Self(self.0 + duration.as_secs_f64())
    }

    /// Shift backward by `duration`
    pub fn sub(self, duration: Duration) -> Self {
        Self(self.0 - duration.as_secs_f64())
    }
}

impl From<i64> for NumericDate {
    fn from(seconds: i64) -> Self {
        Self(seconds as f64)
    }
}

impl From<f64> for NumericDate {
    fn from(seconds: f64) -> Self {
        Self(seconds)
    }
}

impl std::fmt::Display for NumericDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NumericDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.0;
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            serializer.serialize_i64(value as i64)
        } else {
            serializer.serialize_f64(value)
        }
    }
}

impl<'de> Deserialize<'de> for NumericDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self)
    }
}

/// The `aud` claim: one or more recipients
///
/// Accepts either a single string or an array of strings. A single recipient
/// serializes back as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Audience(Vec<String>);

impl Audience {
    pub fn new(recipients: Vec<String>) -> Self {
        Self(recipients)
    }

    /// Whether `recipient` is one of the audience values
    pub fn contains(&self, recipient: &str) -> bool {
        self.0.iter().any(|value| value == recipient)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Audience {
    fn from(recipient: &str) -> Self {
        Self(vec![recipient.to_string()])
    }
}

impl From<String> for Audience {
    fn from(recipient: String) -> Self {
        Self(vec![recipient])
    }
}

impl From<Vec<String>> for Audience {
    fn from(recipients: Vec<String>) -> Self {
        Self(recipients)
    }
}

impl From<Vec<&str>> for Audience {
    fn from(recipients: Vec<&str>) -> Self {
        Self(recipients.into_iter().map(str::to_string).collect())
    }
}

impl Serialize for Audience {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => serializer.serialize_str(single),
            many => many.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Audience {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AudienceVisitor;

        impl<'de> Visitor<'de> for AudienceVisitor {
            type Value = Audience;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a string or an array of strings")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Audience, E> {
                Ok(Audience::from(value))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<Audience, E> {
                Ok(Audience::from(value))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Audience, A::Error> {
                let mut recipients = Vec::with_capacity(seq.size_hint().unwrap_or(1));
                while let Some(recipient) = seq.next_element::<String>()? {
                    recipients.push(recipient);
                }
                Ok(Audience(recipients))
            }
        }

        deserializer.deserialize_any(AudienceVisitor)
    }
}
