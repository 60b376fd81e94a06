//! Decoded token types
//!
//! - [`Token`]: signature verified and claims validated (unless validation was
//!   explicitly skipped)
//! - [`UnverifiedToken`]: decoded only, for inspection before trusting it

mod header;

pub use header::Header;

/// A token whose signature has been verified
#[derive(Debug, Clone)]
pub struct Token<C> {
    header: Header,
    claims: C,
    algorithm: String,
    signature: Vec<u8>,
}

impl<C> Token<C> {
    pub(crate) fn new(header: Header, claims: C, algorithm: String, signature: Vec<u8>) -> Self {
        Self {
            header,
            claims,
            algorithm,
            signature,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn claims(&self) -> &C {
        &self.claims
    }

    /// Name of the signing method that verified this token
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn into_claims(self) -> C {
        self.claims
    }

    pub fn into_parts(self) -> (Header, C) {
        (self.header, self.claims)
    }
}

/// A decoded token that has NOT been verified
///
/// Nothing in it can be trusted. Use it to pick a key (for example by `kid`)
/// and then parse the token properly.
#[derive(Debug, Clone)]
pub struct UnverifiedToken<C> {
    header: Header,
    claims: C,
    signature: Vec<u8>,
}

impl<C> UnverifiedToken<C> {
    pub(crate) fn new(header: Header, claims: C, signature: Vec<u8>) -> Self {
        Self {
            header,
            claims,
            signature,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Algorithm named by the header, not checked against anything
    pub fn algorithm(&self) -> &str {
        &self.header.alg
    }

    pub fn claims(&self) -> &C {
        &self.claims
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Consume the token and return the unverified claims
    pub fn dangerous_claims(self) -> C {
        self.claims
    }
}
