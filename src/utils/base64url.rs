//! Base64URL encoding/decoding per RFC 4648 §5
//!
//! Thin wrapper around the `base64` crate. Decoding is strict: no padding,
//! URL-safe alphabet only, canonical trailing bits.

use crate::error::{Error, Malformed, Result, Segment};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encode bytes to an unpadded Base64URL string
pub fn encode_bytes(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode an unpadded Base64URL string to bytes
pub fn decode_bytes(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}

/// Decode one segment of a compact token, mapping failures to `MalformedToken`
pub(crate) fn decode_segment(input: &str, segment: Segment) -> Result<Vec<u8>> {
    decode_bytes(input).map_err(|e| {
        Error::MalformedToken(Malformed::Base64 {
            segment,
            reason: e.to_string(),
        })
    })
}
