//! Token parsing pipeline
//!
//! A [`Parser`] is configured once with [`ParserBuilder`] and then used for
//! any number of tokens, from any number of threads:
//!
//! ```ignore
//! use jwtkit::{Key, MapClaims, Parser};
//! use std::time::Duration;
//!
//! let parser = Parser::builder()
//!     .valid_methods(["RS256", "ES256"])
//!     .issuer("https://issuer.example")
//!     .audience("my-api")
//!     .leeway(Duration::from_secs(30))
//!     .build();
//!
//! let token = parser.parse::<MapClaims, _>(token_str, &public_key)?;
//! ```
//!
//! Each call runs: size check → decode → allow-list → method lookup → key
//! resolution → signature verification → claims decoding → claims validation.
//! The first failing stage ends the call.

use crate::algorithm::{registry, SigningMethodRegistry};
use crate::claims::{FromPayload, NumberMode, StandardClaims};
use crate::codec;
use crate::error::{Error, Malformed, Result};
use crate::keys::Key;
use crate::token::{Header, Token, UnverifiedToken};
use crate::validation::{Clock, ValidationHelper};

use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Supplies the verification key for a token
///
/// Called at most once per parse, after the header is decoded and the
/// algorithm is allowed, before the signature is checked. The header is not
/// yet verified and must be treated as untrusted input.
pub trait KeyResolver {
    fn resolve(&self, header: &Header) -> Result<Cow<'_, Key>>;
}

/// A single static key
impl KeyResolver for Key {
    fn resolve(&self, _header: &Header) -> Result<Cow<'_, Key>> {
        Ok(Cow::Borrowed(self))
    }
}

/// Keys selected by the header's `kid`
impl KeyResolver for HashMap<String, Key> {
    fn resolve(&self, header: &Header) -> Result<Cow<'_, Key>> {
        let kid = header
            .key_id()
            .ok_or_else(|| Error::KeyUnavailable("token header has no 'kid'".to_string()))?;
        self.get(kid)
            .map(Cow::Borrowed)
            .ok_or_else(|| Error::KeyUnavailable(format!("no key for kid '{kid}'")))
    }
}

impl<F> KeyResolver for F
where
    F: Fn(&Header) -> Result<Key>,
{
    fn resolve(&self, header: &Header) -> Result<Cow<'_, Key>> {
        self(header).map(Cow::Owned)
    }
}

/// Immutable token parser
#[derive(Debug, Clone)]
pub struct Parser {
    valid_methods: Vec<String>,
    number_mode: NumberMode,
    validation: ValidationHelper,
    max_token_length: Option<usize>,
    registry: Arc<SigningMethodRegistry>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Parser {
    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    /// Parse, verify and validate a token
    pub fn parse<C, R>(&self, token: &str, resolver: &R) -> Result<Token<C>>
    where
        C: FromPayload + StandardClaims,
        R: KeyResolver + ?Sized,
    {
        self.check_length(token)?;

        let raw = codec::decode(token).map_err(|e| rejected("decode", None, e))?;
        let header = &raw.header;
        tracing::trace!(alg = %header.alg, kid = ?header.kid, "token decoded");

        self.check_allowed(&header.alg)
            .map_err(|e| rejected("allow-list", Some(header), e))?;

        let method = self
            .registry
            .lookup(&header.alg)
            .map_err(|e| rejected("lookup", Some(header), e))?;

        let key = resolver
            .resolve(header)
            .map_err(|e| rejected("key resolution", Some(header), e))?;

        let signature = raw
            .signature()
            .map_err(|_| rejected("signature", Some(header), Error::SignatureInvalid))?;
        method
            .verify(raw.signing_input.as_bytes(), &signature, &key)
            .map_err(|e| rejected("signature", Some(header), e))?;
        tracing::trace!(alg = %header.alg, "signature verified");

        let claims = C::from_payload(&raw.payload, self.number_mode)
            .map_err(|e| rejected("claims decode", Some(header), e))?;

        self.validation
            .validate(&claims)
            .map_err(|e| rejected("claims validation", Some(header), e.into()))?;
        tracing::trace!(alg = %header.alg, "claims validated");

        let algorithm = method.alg().to_string();
        Ok(Token::new(raw.header, claims, algorithm, signature))
    }

    /// Decode a token without verifying its signature or validating claims
    ///
    /// The result must not be used for authorization decisions.
    pub fn parse_unverified<C: FromPayload>(&self, token: &str) -> Result<UnverifiedToken<C>> {
        self.check_length(token)?;

        let raw = codec::decode(token)?;
        let signature = raw.signature()?;
        let claims = C::from_payload(&raw.payload, self.number_mode)?;
        Ok(UnverifiedToken::new(raw.header, claims, signature))
    }

    /// Claims validation policy used after verification
    pub fn validation(&self) -> &ValidationHelper {
        &self.validation
    }

    pub fn valid_methods(&self) -> &[String] {
        &self.valid_methods
    }

    pub fn number_mode(&self) -> NumberMode {
        self.number_mode
    }

    fn check_length(&self, token: &str) -> Result<()> {
        match self.max_token_length {
            Some(max) if token.len() > max => Err(rejected(
                "size",
                None,
                Malformed::TooLarge {
                    size: token.len(),
                    max,
                }
                .into(),
            )),
            _ => Ok(()),
        }
    }

    /// `none` must be named explicitly; anything else passes an empty list
    fn check_allowed(&self, alg: &str) -> Result<()> {
        let listed = self.valid_methods.iter().any(|method| method == alg);
        let allowed = if alg == "none" {
            listed
        } else {
            listed || self.valid_methods.is_empty()
        };

        if allowed {
            Ok(())
        } else {
            Err(Error::UnauthorizedAlgorithm {
                found: alg.to_string(),
                allowed: self.valid_methods.clone(),
            })
        }
    }
}

fn rejected(stage: &'static str, header: Option<&Header>, error: Error) -> Error {
    match header {
        Some(header) => tracing::debug!(
            stage,
            alg = %header.alg,
            kid = ?header.kid,
            reason = %error,
            "token rejected"
        ),
        None => tracing::debug!(stage, reason = %error, "token rejected"),
    }
    error
}

/// Builder for [`Parser`]
///
/// # Defaults
///
/// - every registered method except `none`
/// - [`NumberMode::Float`]
/// - claims validated with no leeway and no audience, issuer or subject
/// - no token length limit
/// - the global registry
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    valid_methods: Vec<String>,
    number_mode: NumberMode,
    validation: ValidationHelper,
    max_token_length: Option<usize>,
    registry: Option<Arc<SigningMethodRegistry>>,
}

impl ParserBuilder {
    /// Accept only these `alg` values
    pub fn valid_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn number_mode(mut self, mode: NumberMode) -> Self {
        self.number_mode = mode;
        self
    }

    /// Keep the exact text of every number in map claims
    pub fn use_decimal_numbers(self) -> Self {
        self.number_mode(NumberMode::Decimal)
    }

    pub fn leeway(mut self, leeway: Duration) -> Self {
        self.validation = self.validation.leeway(leeway);
        self
    }

    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.validation = self.validation.audience(audience);
        self
    }

    pub fn skip_audience_validation(mut self) -> Self {
        self.validation = self.validation.skip_audience();
        self
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.validation = self.validation.issuer(issuer);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.validation = self.validation.subject(subject);
        self
    }

    pub fn require_expiration(mut self) -> Self {
        self.validation = self.validation.require_expiration();
        self
    }

    /// Skip claims validation; signatures are still verified
    pub fn skip_claims_validation(mut self) -> Self {
        self.validation = self.validation.skip_claims_validation();
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.validation = self.validation.clock(clock);
        self
    }

    /// Replace the whole validation policy
    pub fn validation(mut self, validation: ValidationHelper) -> Self {
        self.validation = validation;
        self
    }

    /// Reject tokens longer than `max` bytes before decoding
    pub fn max_token_length(mut self, max: usize) -> Self {
        self.max_token_length = Some(max);
        self
    }

    pub fn registry(mut self, registry: Arc<SigningMethodRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Parser {
        Parser {
            valid_methods: self.valid_methods,
            number_mode: self.number_mode,
            validation: self.validation,
            max_token_length: self.max_token_length,
            registry: self.registry.unwrap_or_else(registry::global),
        }
    }
}
