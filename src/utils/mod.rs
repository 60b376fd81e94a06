pub mod base64url;
pub(crate) mod der;

pub use base64url::{decode_bytes, encode_bytes};
