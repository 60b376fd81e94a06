//! Signing methods and the registry that selects them
//!
//! Each family lives in its own module and implements [`SigningMethod`] for a
//! set of unit structs, one per `alg` value.

mod traits;

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod none;
pub mod registry;
pub mod rsa;
pub mod rsa_pss;

pub use ecdsa::{ES256, ES384};
pub use eddsa::EdDSA;
pub use hmac::{HS256, HS384, HS512};
pub use none::NoneMethod;
pub use registry::SigningMethodRegistry;
pub use rsa::{RS256, RS384, RS512};
pub use rsa_pss::{PS256, PS384, PS512};
pub use traits::SigningMethod;
