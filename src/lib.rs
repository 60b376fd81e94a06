//! # jwtkit - Parse, Verify and Validate JSON Web Tokens
//!
//! **jwtkit** turns a compact token (`header.payload.signature`) into trusted
//! claims in one linear pass:
//!
//! ```text
//! token string
//!     │ codec::decode          split, base64url, header JSON
//!     ▼
//! allow-list on `alg`          `none` only when named explicitly
//!     │ registry.lookup(alg)
//!     ▼
//! KeyResolver::resolve(header) static key, kid map or closure
//!     │ SigningMethod::verify
//!     ▼
//! FromPayload                  structured or map claims
//!     │ ValidationHelper::validate
//!     ▼
//! Token<C>
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtkit::*;
//!
//! let key = Key::symmetric(b"your-256-bit-secret".to_vec());
//!
//! let token = sign(&HS256, &MapClaims::new().with("sub", "alice"), &key)?;
//!
//! let parser = Parser::builder()
//!     .valid_methods(["HS256"])
//!     .issuer("https://issuer.example")
//!     .build();
//! let verified = parser.parse::<RegisteredClaims, _>(&token, &key)?;
//! println!("Subject: {:?}", verified.claims().subject);
//! ```
//!
//! ## Signing Methods
//!
//! Every method implements [`SigningMethod`] and is looked up by its exact
//! `alg` name in a [`SigningMethodRegistry`]:
//!
//! - **HMAC**: HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5**: RS256, RS384, RS512
//! - **RSA-PSS**: PS256, PS384, PS512
//! - **ECDSA**: ES256, ES384
//! - **EdDSA**: Ed25519
//! - **none**: only when explicitly allow-listed
//!
//! The process-wide registry is built-in by default. Install a custom one with
//! [`registry::install`] before the first parser is built.
//!
//! ## Claims
//!
//! Annotate a struct with [`#[claims]`](macro@claims) to add the registered
//! claims and decode it with serde, or use [`MapClaims`] for open-ended claim
//! sets. Map claims can keep the exact text of numbers with
//! [`ParserBuilder::use_decimal_numbers`].
//!
//! ## Logging
//!
//! Rejections are emitted as `tracing` events at `debug` level, stage
//! transitions at `trace`. No subscriber is installed by the library.

extern crate self as jwtkit;

pub mod algorithm;
pub mod claims;
pub mod codec;
pub mod error;
pub mod keys;
pub mod parser;
pub mod signer;
pub mod token;
pub mod utils;
pub mod validation;

pub use algorithm::registry;
pub use algorithm::{
    EdDSA, NoneMethod, SigningMethod, SigningMethodRegistry, ES256, ES384, HS256, HS384, HS512,
    PS256, PS384, PS512, RS256, RS384, RS512,
};
pub use claims::{
    Audience, ClaimValue, FromPayload, MapClaims, Number, NumberMode, NumericDate,
    RegisteredClaims, StandardClaims, StructuredClaims,
};
pub use error::{ClaimError, ClaimErrors, Error, Malformed, Result, Segment};
pub use keys::{EcdsaCurve, Key};
pub use parser::{KeyResolver, Parser, ParserBuilder};
pub use signer::{sign, sign_with_header};
pub use token::{Header, Token, UnverifiedToken};
pub use validation::{Clock, FixedClock, SystemClock, ValidationHelper};

pub use jwtkit_derive::claims;

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
