use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JOSE header of a compact token
///
/// `alg` selects the signing method. Unrecognized members are kept in
/// [`Header::extra`] so resolvers can inspect them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    pub alg: String,

    /// Token type (typically "JWT")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,

    /// Key ID, for selecting the verification key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,

    /// Content type of a nested token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cty: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Header {
    /// A header for `alg` with `typ` set to `JWT`
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: Some("JWT".to_string()),
            kid: None,
            cty: None,
            extra: Map::new(),
        }
    }

    pub fn with_kid(mut self, kid: impl Into<String>) -> Self {
        self.kid = Some(kid.into());
        self
    }

    pub fn algorithm(&self) -> &str {
        &self.alg
    }

    pub fn key_id(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// Look up a non-standard header member
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new("HS256")
    }
}
